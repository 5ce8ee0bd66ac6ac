//! mazewalk-session: a playable session on top of the mazewalk core.
//!
//! [`Session`] owns the map, player and fog state; [`AutoPlay`] walks the
//! computed path on a background thread; [`render`](render::render) draws
//! the whole thing as text.

pub mod autoplay;
pub mod config;
pub mod gamelog;
pub mod player;
pub mod render;
pub mod session;

pub use autoplay::{AutoPlay, StepReport};
pub use config::SessionConfig;
pub use gamelog::{GameLog, LogStyle};
pub use player::Player;
pub use session::{Outcome, Session, SessionError, StepOutcome};
