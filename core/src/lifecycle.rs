//! Per-screen request lifecycle.
//!
//! # Design
//! A screen fires one request per mount or parameter change. Responses can
//! arrive after the screen moved on, so every request carries a `Generation`
//! ticket and only the newest ticket may write the state. Unmounting bumps
//! the counter without starting a request, which orphans whatever is in
//! flight.

use crate::error::ApiError;

/// Ticket identifying one request issued by a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// Monotonic generation counter.
#[derive(Debug, Default)]
pub struct RequestTracker {
    current: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket.
    pub fn begin(&mut self) -> Generation {
        self.current += 1;
        Generation(self.current)
    }

    /// Supersede every outstanding ticket without starting a request.
    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, ticket: Generation) -> bool {
        ticket.0 == self.current
    }
}

/// What a screen renders. A failure never carries partial data.
#[derive(Debug)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(ApiError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Load state plus the tracker guarding it.
#[derive(Debug)]
pub struct ScreenModel<T> {
    tracker: RequestTracker,
    state: LoadState<T>,
}

impl<T> Default for ScreenModel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ScreenModel<T> {
    pub fn new() -> Self {
        Self {
            tracker: RequestTracker::new(),
            state: LoadState::Idle,
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    /// Enter `Loading` and hand out the ticket the response must present.
    pub fn begin(&mut self) -> Generation {
        self.state = LoadState::Loading;
        self.tracker.begin()
    }

    /// Apply `result` if `ticket` is still current. Returns whether it was applied.
    pub fn resolve(&mut self, ticket: Generation, result: Result<T, ApiError>) -> bool {
        if !self.tracker.is_current(ticket) {
            tracing::debug!(?ticket, "dropping superseded response");
            return false;
        }
        self.state = match result {
            Ok(data) => LoadState::Loaded(data),
            Err(err) => {
                tracing::debug!(error = %err, "request failed");
                LoadState::Failed(err)
            }
        };
        true
    }

    /// Screen went away: ignore anything still in flight and reset to `Idle`.
    pub fn cancel(&mut self) {
        self.tracker.invalidate();
        self.state = LoadState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn tracker_only_honours_latest_ticket() {
        let mut tracker = RequestTracker::new();
        let first = tracker.begin();
        assert!(tracker.is_current(first));
        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        tracker.invalidate();
        assert!(!tracker.is_current(second));
    }

    #[test]
    fn begin_enters_loading() {
        let mut screen: ScreenModel<u32> = ScreenModel::new();
        assert!(matches!(screen.state(), LoadState::Idle));
        screen.begin();
        assert!(screen.state().is_loading());
        assert!(screen.state().data().is_none());
    }

    #[test]
    fn resolve_success_stores_data() {
        let mut screen = ScreenModel::new();
        let ticket = screen.begin();
        assert!(screen.resolve(ticket, Ok("pikachu")));
        assert_eq!(screen.state().data(), Some(&"pikachu"));
        assert!(screen.state().error().is_none());
    }

    #[test]
    fn resolve_failure_has_error_and_no_data() {
        let mut screen: ScreenModel<String> = ScreenModel::new();
        let ticket = screen.begin();
        assert!(screen.resolve(ticket, Err(ApiError::Network("offline".to_string()))));
        assert!(matches!(screen.state().error(), Some(ApiError::Network(_))));
        assert!(screen.state().data().is_none());
        assert!(!screen.state().is_loading());
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut screen = ScreenModel::new();
        let old = screen.begin();
        let new = screen.begin();

        assert!(screen.resolve(new, Ok(25)));
        assert!(!screen.resolve(old, Ok(1)));
        assert_eq!(screen.state().data(), Some(&25));
    }

    #[test]
    fn stale_failure_does_not_clobber_loading() {
        let mut screen: ScreenModel<u32> = ScreenModel::new();
        let old = screen.begin();
        let _new = screen.begin();

        assert!(!screen.resolve(old, Err(ApiError::NotFound)));
        assert!(screen.state().is_loading());
    }

    #[test]
    fn cancel_orphans_in_flight_request() {
        let mut screen = ScreenModel::new();
        let ticket = screen.begin();
        screen.cancel();

        assert!(!screen.resolve(ticket, Ok(7)));
        assert!(matches!(screen.state(), LoadState::Idle));
    }

    #[test]
    fn resolves_from_another_thread() {
        let screen = Arc::new(Mutex::new(ScreenModel::new()));
        let ticket = screen.lock().unwrap().begin();

        let worker = {
            let screen = Arc::clone(&screen);
            std::thread::spawn(move || {
                let mut screen = screen.lock().unwrap();
                screen.resolve(ticket, Ok(150u32))
            })
        };

        assert!(worker.join().unwrap());
        assert_eq!(screen.lock().unwrap().state().data(), Some(&150));
    }
}
