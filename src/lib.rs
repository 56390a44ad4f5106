pub mod config;
pub mod kernel;
pub mod outputs;
pub mod render;

// Re-export specific items if needed for convenient access
pub use kernel::reactor::Reactor;
pub use kernel::session::{SessionContext, SessionEvent, SessionKernel};
