//! Runner configuration
//!
//! Values resolve in this order, later sources winning:
//! defaults, configuration file, environment variables, explicit builder calls.

mod env_loader;
mod file_loader;
mod model;

pub use env_loader::{ENV_DISPATCH, ENV_MAX_CONCURRENCY};
pub use file_loader::load_from_file;
pub use model::{DEFAULT_MAX_CONCURRENCY, DispatchMode, ThrottleConfig};
