//! Library side of the `ontonav` command-line tool.

pub mod cli;
pub mod commands;
pub mod logging;
