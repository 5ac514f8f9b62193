//! The shared clock of one open scroll.
//!
//! A [`Timeline`] mints a fresh [`SessionId`] every time the scroll opens.
//! Consumers tag their pending work with that id; anything carrying an older
//! id is stale and must not touch the current session.

use crate::image_scroller::ScrollLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub const fn from_raw(raw: u64) -> Self {
        SessionId(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One open-to-close lifecycle of the scroll.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollSession {
    pub id: SessionId,
    pub is_open: bool,
    pub opened_at_ms: f64,
    /// Set once the opening transition is over and the consumers are running.
    pub started_at_ms: Option<f64>,
    pub elapsed_ms: f64,
    pub scaled_content_width: f32,
    pub viewport_width: f32,
}

#[derive(Debug, Default)]
pub struct Timeline {
    generation: u64,
    session: Option<ScrollSession>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session. Returns `None` if one is already live.
    pub fn open(&mut self, now_ms: f64, layout: ScrollLayout) -> Option<SessionId> {
        if self.live().is_some() {
            return None;
        }
        self.generation += 1;
        let id = SessionId(self.generation);
        self.session = Some(ScrollSession {
            id,
            is_open: true,
            opened_at_ms: now_ms,
            started_at_ms: None,
            elapsed_ms: 0.0,
            scaled_content_width: layout.scaled_content_width,
            viewport_width: layout.viewport_width,
        });
        Some(id)
    }

    /// Mark the session's clock as running from `now_ms`.
    pub fn start(&mut self, id: SessionId, now_ms: f64) -> bool {
        match self.session.as_mut() {
            Some(session) if session.id == id && session.is_open => {
                session.started_at_ms = Some(now_ms);
                session.elapsed_ms = 0.0;
                true
            }
            _ => false,
        }
    }

    /// Close the live session, freezing its elapsed time.
    pub fn close(&mut self) -> Option<SessionId> {
        let session = self.session.as_mut().filter(|session| session.is_open)?;
        session.is_open = false;
        Some(session.id)
    }

    pub fn advance(&mut self, now_ms: f64) {
        if let Some(session) = self.session.as_mut().filter(|session| session.is_open) {
            if let Some(started) = session.started_at_ms {
                session.elapsed_ms = (now_ms - started).max(0.0);
            }
        }
    }

    pub fn relayout(&mut self, layout: ScrollLayout) {
        if let Some(session) = self.session.as_mut().filter(|session| session.is_open) {
            session.scaled_content_width = layout.scaled_content_width;
            session.viewport_width = layout.viewport_width;
        }
    }

    pub fn is_live(&self, id: SessionId) -> bool {
        self.live().is_some_and(|session| session.id == id)
    }

    pub fn live(&self) -> Option<&ScrollSession> {
        self.session.as_ref().filter(|session| session.is_open)
    }

    /// The most recent session, live or not.
    pub fn session(&self) -> Option<&ScrollSession> {
        self.session.as_ref()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.session
            .as_ref()
            .map(|session| session.elapsed_ms)
            .unwrap_or(0.0)
    }
}
