//! Navigation side effects of session transitions.

use std::sync::Mutex;

use tracing::debug;

use stockdesk_auth::View;

/// Receives the view changes the session asks for (landing after login,
/// login view after logout).
pub trait Navigator: Send + Sync {
    fn navigate(&self, view: View);
}

/// Keeps every requested view, most recent last.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<View>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<View> {
        self.history().last().copied()
    }

    pub fn history(&self) -> Vec<View> {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, view: View) {
        debug!(%view, "navigate");
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_views_in_order() {
        let nav = RecordingNavigator::new();
        assert_eq!(nav.current(), None);

        nav.navigate(View::Dashboard);
        nav.navigate(View::Login);

        assert_eq!(nav.current(), Some(View::Login));
        assert_eq!(nav.history(), vec![View::Dashboard, View::Login]);
    }
}
