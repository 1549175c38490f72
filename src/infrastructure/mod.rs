// Infrastructure module - Config files and process diagnostics
pub mod config;
pub mod logging;
