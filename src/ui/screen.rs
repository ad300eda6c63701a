use ratatui::Frame;

use unwind::app::{App, View};

use crate::ui::{history::HistoryView, SessionView};

/// A UI Screen boundary: responsible for rendering one view of the app
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Guided session - stage copy, breathing pacer, check-in
pub struct SessionScreen;

impl Screen for SessionScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(SessionView(app), f.area());
    }
}

/// Mood log history and export
pub struct HistoryScreen;

impl Screen for HistoryScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(HistoryView(app), f.area());
    }
}

/// Helper to construct the appropriate screen for the current view
pub fn current_screen(view: View) -> Box<dyn Screen> {
    match view {
        View::Session => Box::new(SessionScreen),
        View::History => Box::new(HistoryScreen),
    }
}
