// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod clock;
pub mod game;
pub mod presenter;
pub mod runtime;
pub mod settings;
pub mod stats;
pub mod timer;
pub mod util;
