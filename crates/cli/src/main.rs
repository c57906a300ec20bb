use std::env;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, info};

use command_saver_cli::cli_args::Args;
use command_saver_cli::interaction::input::ask_confirmation;
use command_saver_cli::interaction::types::Confirmation;
use command_saver_cli::interaction::{
    report_failure, ui, Session, SessionSettings, StdConsole, EXIT_MESSAGE,
};
use command_saver_cli::logging;
use command_saver_core::config;
use command_saver_core::error::Result;
use command_saver_core::store::{store_exists, Store};

/// Replaces the store with the default data, asking first if one exists.
///
/// Returns false when the user kept the existing store.
fn reset_store(store_path: &str) -> Result<bool> {
    if store_exists(store_path) {
        println!("Store found at {store_path}.");
        println!("Would you like to delete all data and create a new store with default data?");

        if ask_confirmation(&mut StdConsole, "Please choose y (delete) or n (keep): ")?
            != Confirmation::Confirmed
        {
            println!("Reset cancelled, the existing store was kept.");
            return Ok(false);
        }
    }

    Store::reset(store_path)?;
    info!("Store reset at `{store_path}`");
    ui::print_success(&format!("Success! Store created at: {store_path}"))?;
    Ok(true)
}

fn execute() -> Result<u8> {
    let args = Args::parse();

    let log_path = config::get_log_path(&args.log_path);
    logging::init(&log_path);

    let store_path = config::get_store_path(&args.store_path);
    debug!("Using store at `{store_path}`");

    if args.reset_store {
        if let Err(e) = reset_store(&store_path) {
            report_failure("reset the store", e, &log_path)?;
        }
        if !args.is_single_invocation() {
            return Ok(0);
        }
    }

    // Every operation reports an unusable store on its own.
    let store = match Store::open_or_create(&store_path) {
        Ok(store) => store,
        Err(e) => {
            report_failure("create the store", e, &log_path)?;
            Store::at(&store_path)
        }
    };
    let settings = SessionSettings {
        shell: config::get_shell(env::var("SHELL").ok()),
        export_path: config::get_export_path(&args.export_path),
        log_path,
    };

    let exit = match args.single_invocation_input() {
        Some(input) => Session::single_invocation(store, StdConsole, settings, input).run()?,
        None => Session::interactive(store, StdConsole, settings).run()?,
    };

    println!("{EXIT_MESSAGE}");
    Ok(exit.exit_code())
}

fn main() -> ExitCode {
    match execute() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
