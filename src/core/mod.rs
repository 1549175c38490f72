// Core module - Command lifecycle and logging
pub mod command;
pub mod kernel;
pub mod logging;
