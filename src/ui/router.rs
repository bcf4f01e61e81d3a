use crate::ui::state::Section;
use crate::ui::traits::{Action, View};
use crate::ui::view_model::ViewModel;
use ratatui::Frame;
use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Flex, Layout, Rect};

pub struct Router {
    pub sections: Vec<Box<dyn View>>,
    pub overlays: Vec<Box<dyn View>>,
}

impl Router {
    pub fn new(sections: Vec<Box<dyn View>>) -> Self {
        Self {
            sections,
            overlays: Vec::new(),
        }
    }

    pub fn push_overlay(&mut self, view: Box<dyn View>) {
        self.overlays.push(view);
    }

    pub fn pop_overlay(&mut self) {
        self.overlays.pop();
    }

    pub fn clear_overlays(&mut self) {
        self.overlays.clear();
    }

    pub fn has_overlay(&self) -> bool {
        !self.overlays.is_empty()
    }

    pub fn active_view_mut(&mut self, section: Section) -> Option<&mut Box<dyn View>> {
        if !self.overlays.is_empty() {
            self.overlays.last_mut()
        } else {
            self.sections.get_mut(section.index())
        }
    }

    pub fn is_editing(&mut self, section: Section) -> bool {
        self.active_view_mut(section).is_some_and(|v| v.is_editing())
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, section: Section, vm: &ViewModel) {
        if let Some(view) = self.sections.get_mut(section.index()) {
            view.render(f, area, vm);
        }

        let popup = centered(area, 70, 70);
        for overlay in &mut self.overlays {
            overlay.render(f, popup, vm);
        }
    }

    pub fn handle_input(
        &mut self,
        key: KeyEvent,
        section: Section,
        vm: &ViewModel,
    ) -> Option<Action> {
        self.active_view_mut(section)
            .and_then(|view| view.handle_input(key, vm))
    }

    pub fn reset_active(&mut self, section: Section) {
        if let Some(view) = self.active_view_mut(section) {
            view.reset();
        }
    }

    pub fn handle_paste(&mut self, text: &str, section: Section) -> bool {
        self.active_view_mut(section)
            .is_some_and(|view| view.handle_paste(text))
    }
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
