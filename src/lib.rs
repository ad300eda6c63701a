// Library surface for headless/integration tests and reuse.
// Terminal drawing stays in the binary (main.rs + ui/).
pub mod app;
pub mod app_dirs;
pub mod breathing;
pub mod capabilities;
pub mod config;
pub mod content;
pub mod guidance;
pub mod habits;
pub mod insights;
pub mod logging;
pub mod mood;
pub mod runtime;
pub mod session;
pub mod stage;
pub mod storage;
pub mod triggers;
pub mod util;
