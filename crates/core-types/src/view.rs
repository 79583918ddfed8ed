// In crates/core-types/src/view.rs

use serde::Serialize;

/// Whether the most recent poll of a view succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Liveness {
    /// No poll has resolved yet.
    Loading,
    /// The last poll succeeded.
    Live,
    /// The last poll failed.
    Offline,
}

/// The state a single view holds about its backend data.
///
/// Snapshots are replaced wholesale on success. A failed poll keeps the
/// previous snapshot, so a transient outage never loses data that was
/// already on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState<T> {
    snapshot: Option<T>,
    liveness: Liveness,
    last_error: Option<String>,
    polls: u64,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self {
            snapshot: None,
            liveness: Liveness::Loading,
            last_error: None,
            polls: 0,
        }
    }

    /// Records a successful poll, replacing the snapshot.
    pub fn succeed(&mut self, snapshot: T) {
        self.snapshot = Some(snapshot);
        self.liveness = Liveness::Live;
        self.last_error = None;
        self.polls += 1;
    }

    /// Records a failed poll. The previous snapshot, if any, is retained.
    pub fn fail(&mut self, reason: impl ToString) {
        self.liveness = Liveness::Offline;
        self.last_error = Some(reason.to_string());
        self.polls += 1;
    }

    /// Records a failed poll and shows `fallback` in place of any previous
    /// snapshot. Used by views that prefer fabricated data over stale data.
    pub fn fail_with(&mut self, reason: impl ToString, fallback: T) {
        self.snapshot = Some(fallback);
        self.fail(reason);
    }

    pub fn snapshot(&self) -> Option<&T> {
        self.snapshot.as_ref()
    }

    pub fn liveness(&self) -> Liveness {
        self.liveness
    }

    pub fn is_live(&self) -> bool {
        self.liveness == Liveness::Live
    }

    pub fn is_offline(&self) -> bool {
        self.liveness == Liveness::Offline
    }

    /// True while there is nothing to show: the view renders a placeholder.
    pub fn is_loading(&self) -> bool {
        self.snapshot.is_none()
    }

    /// The display string of the failure behind the current `Offline` state.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Number of polls that have resolved, successful or not.
    pub fn polls(&self) -> u64 {
        self.polls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_loading_without_snapshot() {
        let state: ViewState<u32> = ViewState::new();
        assert_eq!(state.liveness(), Liveness::Loading);
        assert!(state.is_loading());
        assert_eq!(state.polls(), 0);
    }

    #[test]
    fn offline_flag_tracks_only_the_latest_poll() {
        let outcomes = [true, false, false, true, false, true, true];
        let mut state = ViewState::new();

        for (n, ok) in outcomes.iter().enumerate() {
            if *ok {
                state.succeed(n);
            } else {
                state.fail("connection refused");
            }
            assert_eq!(state.is_offline(), !ok, "poll {n}");
            assert_eq!(state.is_live(), *ok, "poll {n}");
        }
    }

    #[test]
    fn failure_retains_previous_snapshot() {
        let mut state = ViewState::new();
        state.succeed(vec![1, 2, 3]);
        state.fail("HTTP 502");

        assert_eq!(state.snapshot(), Some(&vec![1, 2, 3]));
        assert_eq!(state.last_error(), Some("HTTP 502"));

        state.succeed(vec![4]);
        assert_eq!(state.snapshot(), Some(&vec![4]));
        assert_eq!(state.last_error(), None);
    }

    #[test]
    fn first_poll_failure_keeps_placeholder() {
        let mut state: ViewState<String> = ViewState::new();
        state.fail("timeout");

        assert!(state.is_offline());
        assert!(state.is_loading());
        assert_eq!(state.snapshot(), None);
    }

    #[test]
    fn fail_with_substitutes_fallback() {
        let mut state = ViewState::new();
        state.succeed("live");
        state.fail_with("empty", "demo");

        assert!(state.is_offline());
        assert_eq!(state.snapshot(), Some(&"demo"));
    }
}
