use ratatui::widgets::ListState;

use crate::domain::FilterCategory;
use crate::engine::FilterPill;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Terminal-local UI state. View state lives in the interaction controller.
pub struct TuiApp {
    pub mode: InputMode,
    pub search_buffer: String,
    pub selected: usize,
    pub list_state: ListState,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            mode: InputMode::Normal,
            search_buffer: String::new(),
            selected: 0,
            list_state,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.list_state.select(Some(self.selected));
    }

    pub fn move_down(&mut self, visible: usize) {
        if visible > 0 && self.selected < visible - 1 {
            self.selected += 1;
            self.list_state.select(Some(self.selected));
        }
    }

    /// Back to the top after the list was recomputed.
    pub fn reset_selection(&mut self) {
        self.selected = 0;
        self.list_state = ListState::default();
        self.list_state.select(Some(0));
    }

    /// Keep the selection inside a list that may have shrunk.
    pub fn clamp_selection(&mut self, visible: usize) {
        if self.selected >= visible {
            self.selected = visible.saturating_sub(1);
            self.list_state.select(Some(self.selected));
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}

/// The pill `step` places away from `active`, wrapping around.
pub fn cycle_pill<'a>(
    pills: &'a [FilterPill],
    active: &FilterCategory,
    step: isize,
) -> Option<&'a FilterPill> {
    if pills.is_empty() {
        return None;
    }
    let current = pills.iter().position(|p| &p.filter == active).unwrap_or(0) as isize;
    let next = (current + step).rem_euclid(pills.len() as isize) as usize;
    pills.get(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryCounts;
    use crate::engine::derive_pills;

    #[test]
    fn test_selection_bounds() {
        let mut app = TuiApp::new();
        app.move_up();
        assert_eq!(app.selected, 0);

        app.move_down(3);
        app.move_down(3);
        app.move_down(3);
        assert_eq!(app.selected, 2);

        app.clamp_selection(1);
        assert_eq!(app.selected, 0);

        app.move_down(0);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_cycle_pill_wraps() {
        let pills = derive_pills(&CategoryCounts::new(vec![
            ("Privacy".into(), 3),
            ("Security".into(), 1),
        ]));

        let next = cycle_pill(&pills, &FilterCategory::All, 1).unwrap();
        assert_eq!(next.label, "Privacy");

        let prev = cycle_pill(&pills, &FilterCategory::All, -1).unwrap();
        assert_eq!(prev.label, "Security");

        let wrapped = cycle_pill(&pills, &FilterCategory::from_key("Security"), 1).unwrap();
        assert_eq!(wrapped.filter, FilterCategory::All);

        assert!(cycle_pill(&[], &FilterCategory::All, 1).is_none());
    }
}
