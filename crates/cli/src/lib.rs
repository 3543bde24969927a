//! liftsync command-line driver

pub mod cmd;
pub mod config;
pub mod edits;
pub mod logging;
