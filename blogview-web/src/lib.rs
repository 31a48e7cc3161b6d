use std::sync::atomic::AtomicBool;

pub mod router;
pub mod server;
pub mod theme;
pub mod view;

/// Set by the signal handler; the accept loop drains once this is true.
pub static DONE: AtomicBool = AtomicBool::new(false);
