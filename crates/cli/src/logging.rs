//! Diagnostic logging to a local file.

use std::fs::File;

use command_saver_core::config::ensure_parent_dir;
use env_logger::{Builder, Env, Target};

/// Default filter when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "command_saver_core=debug,command_saver_cli=debug";

/// Sends `log` output to `log_path`, truncating it first.
///
/// Falls back to the default stderr logger if the file cannot be opened, so
/// logging never stops the program from starting.
pub fn init(log_path: &str) {
    let env = Env::default().default_filter_or(DEFAULT_FILTER);

    let file = ensure_parent_dir("log", log_path)
        .ok()
        .and_then(|()| File::create(log_path).ok());

    match file {
        Some(file) => {
            let _ = Builder::from_env(env)
                .target(Target::Pipe(Box::new(file)))
                .format_timestamp_millis()
                .try_init();
        }
        None => {
            let _ = env_logger::try_init();
        }
    }
}
