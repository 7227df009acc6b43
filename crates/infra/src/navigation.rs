//! In-memory history stack implementing [`Navigator`]

use parking_lot::Mutex;
use tracing::debug;
use waypoint_core::Navigator;
use waypoint_domain::{RedirectOptions, RoutePath};

/// One navigation the coordinator issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRecord {
    pub path: RoutePath,
    pub replace: bool,
}

#[derive(Debug, Default)]
struct History {
    entries: Vec<RoutePath>,
    issued: Vec<NavigationRecord>,
}

/// History stack where `replace` overwrites the top entry.
///
/// Every issued navigation is also kept in order so callers can audit what
/// the coordinator did.
#[derive(Debug)]
pub struct HistoryNavigator {
    history: Mutex<History>,
}

impl HistoryNavigator {
    pub fn starting_at(path: RoutePath) -> Self {
        Self { history: Mutex::new(History { entries: vec![path], issued: Vec::new() }) }
    }

    /// User-initiated navigation, pushed without going through the
    /// coordinator.
    pub fn visit(&self, path: RoutePath) {
        self.history.lock().entries.push(path);
    }

    pub fn current(&self) -> Option<RoutePath> {
        self.history.lock().entries.last().cloned()
    }

    pub fn entries(&self) -> Vec<RoutePath> {
        self.history.lock().entries.clone()
    }

    pub fn issued(&self) -> Vec<NavigationRecord> {
        self.history.lock().issued.clone()
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::starting_at(RoutePath::root())
    }
}

impl Navigator for HistoryNavigator {
    fn redirect(&self, path: &RoutePath, options: RedirectOptions) {
        let mut history = self.history.lock();
        if options.replace {
            history.entries.pop();
        }
        history.entries.push(path.clone());
        history.issued.push(NavigationRecord { path: path.clone(), replace: options.replace });
        debug!(
            path = %path,
            replace = options.replace,
            depth = history.entries.len(),
            "history updated"
        );
    }
}
