//! Per-call lifecycle: `Idle → InFlight → Populated | Degraded`.

/// How a single request settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The service answered and the payload validated.
    Populated(T),
    /// Something failed; the value is the operation's fallback.
    Fallback(T),
}

impl<T> Outcome<T> {
    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Outcome::Populated(v) | Outcome::Fallback(v) => v,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback(_))
    }
}

/// State of one call site, as a view sees it.
///
/// There are no partial or cancelled states: once `InFlight`, the call runs
/// until it settles into one of the two terminal variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState<T> {
    #[default]
    Idle,
    InFlight,
    Populated(T),
    Degraded(T),
}

impl<T> LoadState<T> {
    /// Mark the call as issued.
    pub fn begin(&mut self) {
        *self = LoadState::InFlight;
    }

    /// Record how the call settled.
    pub fn settle(&mut self, outcome: Outcome<T>) {
        *self = match outcome {
            Outcome::Populated(v) => LoadState::Populated(v),
            Outcome::Fallback(v) => LoadState::Degraded(v),
        };
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::InFlight)
    }

    /// The settled value, whether real or fallback.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            LoadState::Populated(v) | LoadState::Degraded(v) => Some(v),
            LoadState::Idle | LoadState::InFlight => None,
        }
    }
}
