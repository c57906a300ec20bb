//! Command Saver Core Library
//!
//! This crate provides the core functionality for command-saver, a personal
//! command bookmarking tool that lets a user save, list, execute, edit and
//! delete frequently used terminal commands while tracking how often and how
//! recently each one is used.
//!
//! # Key Features
//!
//! - **Persisted Store**: Saved commands, menu catalog and user profile in one YAML file
//! - **Stable IDs**: Commands keep their ID for life; display positions stay dense
//! - **Usage Tracking**: Execution counts and creation/edit timestamps
//! - **Summary List**: Newest and most used commands, without duplicates
//! - **Shell Execution**: Run saved or ad-hoc text through the user's shell
//!
//! # Examples
//!
//! ```no_run
//! use command_saver_core::store::Store;
//!
//! let store = Store::open_or_create("/tmp/command-saver/store.yml")?;
//! for command in store.list_all()? {
//!     println!("[{}] {}", command.id, command);
//! }
//! # Ok::<(), command_saver_core::error::Error>(())
//! ```

pub mod config;
pub mod defaults;
pub mod error;
pub mod execution;
pub mod menu;
pub mod model;
pub mod store;
