//! The menu-driven interaction loop.
//!
//! # Overview
//!
//! - [`session`]: the loop itself, dispatching options to store operations
//! - [`input`]: prompts for text, command IDs and yes/no answers
//! - [`ui`]: menus, tables and status messages
//! - [`types`]: loop states and the results prompts and actions return
//!
//! `q`, `b` and `bs` are recognised at every prompt. Typed at a sub-prompt
//! they cancel the action in progress and are handled next by the loop.

pub mod input;
pub mod session;
pub mod types;
pub mod ui;

pub use input::{Console, StdConsole};
pub use session::{report_failure, Session, SessionSettings, EXIT_MESSAGE};
pub use types::{Mode, SessionExit};
