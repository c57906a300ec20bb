//! Command Saver CLI Library
//!
//! This crate provides the terminal front end of Command Saver: argument
//! parsing, the menu-driven interaction loop and log setup. Storage lives in
//! `command_saver_core`.
//!
//! # Architecture
//!
//! - [`cli_args`]: command-line argument parsing
//! - [`answer`]: parsing of the line typed at the menu prompt
//! - [`interaction`]: the interaction loop, prompts and rendering
//! - [`logging`]: sends diagnostics to the log file
//!
//! # Examples
//!
//! ```bash
//! # Interactive mode, shows the main menu
//! cs
//!
//! # Run one action and exit, here executing saved command 3
//! cs e 3
//!
//! # Use another store file
//! cs --store-path ./work-store.yml
//! ```

pub mod answer;
pub mod cli_args;
pub mod interaction;
pub mod logging;
