use crate::timeline::SessionId;

/// Open/close lifecycle of the scroll graphic.
///
/// `Opening` covers the unrolling transition before the timeline may start.
/// `Closing` is transient: teardown happens while in it and the machine lands
/// in `Closed` before control returns to the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScrollPhase {
    #[default]
    Closed,
    Opening {
        session: SessionId,
        start_at_ms: f64,
    },
    Open {
        session: SessionId,
    },
    Closing {
        session: SessionId,
    },
}

#[derive(Debug, Default)]
pub struct ScrollState {
    phase: ScrollPhase,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// The click-time flag: true from the moment an open is requested until close.
    pub fn is_open(&self) -> bool {
        matches!(
            self.phase,
            ScrollPhase::Opening { .. } | ScrollPhase::Open { .. }
        )
    }

    pub fn session(&self) -> Option<SessionId> {
        match self.phase {
            ScrollPhase::Closed => None,
            ScrollPhase::Opening { session, .. }
            | ScrollPhase::Open { session }
            | ScrollPhase::Closing { session } => Some(session),
        }
    }

    pub fn request_open(&mut self, session: SessionId, start_at_ms: f64) -> bool {
        if self.phase != ScrollPhase::Closed {
            return false;
        }
        self.phase = ScrollPhase::Opening {
            session,
            start_at_ms,
        };
        true
    }

    /// Only the session that requested the open may complete it.
    pub fn complete_opening(&mut self, session: SessionId) -> bool {
        match self.phase {
            ScrollPhase::Opening { session: current, .. } if current == session => {
                self.phase = ScrollPhase::Open { session };
                true
            }
            _ => false,
        }
    }

    pub fn begin_closing(&mut self) -> Option<SessionId> {
        let session = match self.phase {
            ScrollPhase::Opening { session, .. } | ScrollPhase::Open { session } => session,
            ScrollPhase::Closed | ScrollPhase::Closing { .. } => return None,
        };
        self.phase = ScrollPhase::Closing { session };
        Some(session)
    }

    pub fn finish_closing(&mut self) {
        if matches!(self.phase, ScrollPhase::Closing { .. }) {
            self.phase = ScrollPhase::Closed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle() {
        let id = SessionId::from_raw(1);
        let mut state = ScrollState::new();
        assert!(!state.is_open());
        assert!(state.request_open(id, 2_800.0));
        assert!(state.is_open());
        assert!(!state.request_open(SessionId::from_raw(2), 3_000.0));
        assert!(state.complete_opening(id));
        assert_eq!(state.phase(), ScrollPhase::Open { session: id });
        assert_eq!(state.begin_closing(), Some(id));
        assert!(!state.is_open());
        state.finish_closing();
        assert_eq!(state.phase(), ScrollPhase::Closed);
        assert_eq!(state.begin_closing(), None);
    }

    #[test]
    fn stale_session_cannot_complete_opening() {
        let mut state = ScrollState::new();
        state.request_open(SessionId::from_raw(1), 2_800.0);
        state.begin_closing();
        state.finish_closing();
        state.request_open(SessionId::from_raw(2), 9_000.0);
        assert!(!state.complete_opening(SessionId::from_raw(1)));
        assert!(state.complete_opening(SessionId::from_raw(2)));
    }
}
