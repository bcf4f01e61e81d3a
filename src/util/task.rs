use std::collections::HashMap;
use tokio::task::JoinHandle;

/// Background jobs owned by the UI. One job per key: spawning again aborts
/// the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKey {
    PlaybackRetry,
    ViewJitter,
}

#[derive(Default)]
pub struct TaskManager {
    tasks: HashMap<TaskKey, JoinHandle<()>>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    pub fn spawn(&mut self, key: TaskKey, task: JoinHandle<()>) {
        if let Some(handle) = self.tasks.insert(key, task) {
            handle.abort();
        }
    }

    pub fn abort_all(&mut self) {
        for handle in self.tasks.values() {
            handle.abort();
        }
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn drain(rx: flume::Receiver<&'static str>) -> Vec<&'static str> {
        let mut received = Vec::new();
        while let Ok(msg) = rx.recv_async().await {
            received.push(msg);
        }
        received
    }

    fn delayed(tx: flume::Sender<&'static str>, msg: &'static str, ms: u64) -> JoinHandle<()> {
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            let _ = tx.send(msg);
        })
    }

    #[tokio::test]
    async fn respawning_a_key_replaces_the_task() {
        let (tx, rx) = flume::unbounded();
        let mut tasks = TaskManager::new();

        tasks.spawn(TaskKey::ViewJitter, delayed(tx.clone(), "first", 50));
        tasks.spawn(TaskKey::ViewJitter, delayed(tx.clone(), "second", 0));
        tasks.spawn(TaskKey::PlaybackRetry, delayed(tx.clone(), "retry", 0));
        drop(tx);

        let mut received = drain(rx).await;
        received.sort();
        assert_eq!(received, vec!["retry", "second"]);
    }

    #[tokio::test]
    async fn abort_all_cancels_everything() {
        let (tx, rx) = flume::unbounded();
        let mut tasks = TaskManager::new();

        tasks.spawn(TaskKey::ViewJitter, delayed(tx.clone(), "jitter", 50));
        tasks.spawn(TaskKey::PlaybackRetry, delayed(tx.clone(), "retry", 50));
        drop(tx);
        tasks.abort_all();

        assert!(drain(rx).await.is_empty());
    }
}
