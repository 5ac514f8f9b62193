//! Timeline coordination for the unrolling scroll.
//!
//! Everything in this crate is single-threaded and clock-free: the host owns
//! the event loop, measures time, and feeds [`coordinator::Input`]s into a
//! [`coordinator::Coordinator`]. That keeps every timing rule testable
//! against a logical millisecond clock.

pub mod assets;
pub mod audio;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod image_scroller;
pub mod poem;
pub mod scheduler;
pub mod scroll_state;
pub mod timeline;

pub use coordinator::{Coordinator, Effect, Input, Stage};
