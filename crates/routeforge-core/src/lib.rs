// RouteForge Core Library
// Autorouting parameters, board view transform and the panels editing them

pub mod autoroute;
pub mod config;
pub mod display;
pub mod error;
pub mod session;
pub mod sync;
pub mod ui;

pub use config::SessionConfig;
pub use error::{ConfigError, StateError};
pub use session::BoardSession;
pub use sync::SyncController;
