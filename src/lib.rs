// Library surface for headless/integration tests and reuse.
// The binary in main.rs only adds the CLI and the terminal loop.
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod typing;
pub mod ui;
pub mod util;

pub use app::{App, Control};
pub use catalog::{Catalog, Difficulty, Tier};
pub use error::{Error, Result};
pub use typing::TypingTest;
