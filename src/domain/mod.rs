// Domain module - Errors and configuration records
pub mod config;
pub mod error;
