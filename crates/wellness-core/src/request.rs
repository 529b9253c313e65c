//! Per-flow request state machine.

/// Lifecycle of a flow's single in-flight request.
///
/// A new request may only begin from `Idle`, `Succeeded` or `Failed`; while
/// `Pending`, further attempts are refused.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Pending,
    Succeeded(T),
    Failed(String),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> RequestState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Move to `Pending`. Returns `false` (and changes nothing) if a
    /// request is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = Self::Pending;
        true
    }

    /// Record a successful response. Ignored unless a request is pending.
    pub fn succeed(&mut self, value: T) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = Self::Succeeded(value);
        true
    }

    /// Record a failure message. Ignored unless a request is pending.
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if !self.is_pending() {
            return false;
        }
        *self = Self::Failed(message.into());
        true
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// What happened to a submit or load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The response was applied as a success.
    Completed,
    /// The response was applied as a failure.
    Failed,
    /// Another request was already in flight; nothing was sent.
    Ignored,
    /// The view was torn down before the response arrived; it was dropped.
    Discarded,
}
