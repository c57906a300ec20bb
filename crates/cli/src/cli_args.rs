//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the
//! `clap` crate.

use clap::Parser;

/// Command-line arguments for the command-saver CLI tool.
///
/// With no positional arguments the interactive menu starts. With an option
/// (and optionally its argument) exactly one action runs and the program
/// exits.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use command_saver_cli::cli_args::Args;
///
/// let args = Args::parse_from(["cs", "e", "3"]);
/// assert!(args.is_single_invocation());
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the saved commands store YAML.
    ///
    /// If not provided, defaults to `~/.command-saver/store.yml`.
    #[arg(long, short = 's')]
    pub store_path: Option<String>,

    /// Path to the diagnostic log file.
    ///
    /// If not provided, defaults to `~/.command-saver/cs.log`.
    #[arg(long, short = 'l')]
    pub log_path: Option<String>,

    /// Path the `exportall` option writes to.
    ///
    /// If not provided, defaults to `~/.command-saver/saved_commands.txt`.
    #[arg(long, short = 'x')]
    pub export_path: Option<String>,

    /// Replace the store with a fresh one holding only the default data.
    ///
    /// Asks for confirmation first when a store already exists.
    #[arg(long, action)]
    pub reset_store: bool,

    /// Menu option to run once, e.g. `e` to execute a saved command.
    pub option: Option<String>,

    /// Command ID for the option, or the text for the `t` option.
    pub argument: Option<String>,
}

impl Args {
    /// True when an option was given on the command line.
    #[must_use]
    pub fn is_single_invocation(&self) -> bool {
        self.option.is_some()
    }

    /// The option and argument joined back into one line of input, as if typed
    /// at the menu prompt.
    #[must_use]
    pub fn single_invocation_input(&self) -> Option<String> {
        let option = self.option.as_ref()?;
        Some(match &self.argument {
            Some(argument) => format!("{option} {argument}"),
            None => option.clone(),
        })
    }
}
