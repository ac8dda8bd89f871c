pub mod config;
pub mod console;
pub mod lineup;
pub mod logging;
pub mod render;
pub mod session;
