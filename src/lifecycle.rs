//! Per-operation request lifecycle.
//!
//! Every user-triggered operation (search, analyze, the two guard checks)
//! owns one [`RequestLifecycle`]. The lifecycle enforces that at most one
//! request per operation is in flight, and stamps each accepted submission
//! with a generation token so that completions arriving after a newer
//! submission or a reset are discarded instead of clobbering fresh state.

/// State of one operation's latest request.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Pending,
    Succeeded(T),
    Failed(String),
}

#[derive(Debug)]
pub struct RequestLifecycle<T> {
    state: RequestState<T>,
    generation: u64,
}

impl<T> Default for RequestLifecycle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RequestLifecycle<T> {
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, RequestState::Pending)
    }

    /// Latest successful payload, if any.
    pub fn payload(&self) -> Option<&T> {
        match &self.state {
            RequestState::Succeeded(payload) => Some(payload),
            _ => None,
        }
    }

    /// Latest failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Accept a new submission. Moves to `Pending` synchronously and returns
    /// the generation token the completion must present. Returns `None`
    /// while a request is already in flight; the caller treats that as a
    /// no-op, not an error.
    pub fn begin(&mut self) -> Option<u64> {
        if self.is_pending() {
            return None;
        }
        self.generation += 1;
        self.state = RequestState::Pending;
        Some(self.generation)
    }

    /// Apply a completion. The outcome is applied only when `generation`
    /// matches the token handed out by the accepting [`begin`] and the
    /// lifecycle is still pending; stale completions are dropped. Returns
    /// whether the outcome was applied.
    ///
    /// [`begin`]: RequestLifecycle::begin
    pub fn settle(&mut self, generation: u64, outcome: Result<T, String>) -> bool {
        if generation != self.generation || !self.is_pending() {
            return false;
        }
        self.state = match outcome {
            Ok(payload) => RequestState::Succeeded(payload),
            Err(message) => RequestState::Failed(message),
        };
        true
    }

    /// Back to `Idle`, invalidating any in-flight generation.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = RequestState::Idle;
    }
}
