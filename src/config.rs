use std::{path::PathBuf, time::Duration};

use directories::{ProjectDirs, UserDirs};

const DATA_DIR_ENV: &str = "PORTFOLIO_DATA_DIR";
const EXPORT_DIR_ENV: &str = "PORTFOLIO_EXPORT_DIR";
const VIEW_JITTER_ENV: &str = "PORTFOLIO_VIEW_JITTER";
const JITTER_SECS_ENV: &str = "PORTFOLIO_JITTER_SECS";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
    pub view_jitter: bool,
    pub jitter_interval: Duration,
    pub notification_duration: Duration,
    pub retry_delay: Duration,
    pub tick_rate: Duration,
    pub volume_step: f32,
    pub seek_step: f64,
    pub capture_width: u32,
    pub capture_height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            export_dir: None,
            view_jitter: true,
            jitter_interval: Duration::from_secs(30),
            notification_duration: Duration::from_secs(3),
            retry_delay: Duration::from_secs(1),
            tick_rate: Duration::from_millis(100),
            volume_step: 0.05,
            seek_step: 0.05,
            capture_width: 1280,
            capture_height: 720,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `PORTFOLIO_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Ok(dir) = std::env::var(EXPORT_DIR_ENV) {
            config.export_dir = Some(PathBuf::from(dir));
        }
        if let Ok(flag) = std::env::var(VIEW_JITTER_ENV) {
            config.view_jitter = parse_flag(&flag).unwrap_or(config.view_jitter);
        }
        if let Some(secs) = std::env::var(JITTER_SECS_ENV)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
        {
            config.jitter_interval = Duration::from_secs(secs);
        }

        config
    }

    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(|| {
            ProjectDirs::from("com", "portfolio", "portfolio").map(|dirs| dirs.data_dir().to_path_buf())
        })
    }

    /// Where exported photos land: the configured directory, the user's
    /// pictures folder, or `photos/` under the data dir.
    pub fn export_dir(&self) -> Option<PathBuf> {
        self.export_dir
            .clone()
            .or_else(|| {
                UserDirs::new().and_then(|dirs| dirs.picture_dir().map(|p| p.join("portfolio")))
            })
            .or_else(|| self.data_dir().map(|dir| dir.join("photos")))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag("ON"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn explicit_dirs_win() {
        let config = AppConfig {
            data_dir: Some(PathBuf::from("/tmp/data")),
            export_dir: Some(PathBuf::from("/tmp/out")),
            ..AppConfig::default()
        };
        assert_eq!(config.data_dir(), Some(PathBuf::from("/tmp/data")));
        assert_eq!(config.export_dir(), Some(PathBuf::from("/tmp/out")));
    }
}
