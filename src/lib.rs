// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod best;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod render;
pub mod runtime;
pub mod sentences;
pub mod session;
pub mod store;
pub mod timer;
pub mod ui;

pub use app::App;
pub use error::{Error, Result};
