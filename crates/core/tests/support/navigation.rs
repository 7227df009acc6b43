use parking_lot::Mutex;
use waypoint_core::Navigator;
use waypoint_domain::{RedirectOptions, RoutePath};

/// Navigator that only records what it was asked to do.
#[derive(Default)]
pub struct RecordingNavigator {
    calls: Mutex<Vec<(RoutePath, RedirectOptions)>>,
}

impl RecordingNavigator {
    pub fn calls(&self) -> Vec<(RoutePath, RedirectOptions)> {
        self.calls.lock().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(path, _)| path.to_string()).collect()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &RoutePath, options: RedirectOptions) {
        self.calls.lock().push((path.clone(), options));
    }
}
