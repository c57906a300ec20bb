use std::io::{stdin, stdout, Write};

use indexmap::IndexSet;
use itertools::Itertools;
use command_saver_core::error::Result;

use super::types::{Confirmation, GlobalToken, Reply};

const VALID_YES: [&str; 2] = ["y", "yes"];
const VALID_NO: [&str; 2] = ["n", "no"];

/// Source of typed answers.
pub trait Console {
    /// Shows `prompt` and reads one line, without its line ending.
    ///
    /// Returns `None` once there is no more input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Reads answers from the terminal.
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        stdout().flush()?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            return Ok(None);
        }

        Ok(Some(input.trim_end_matches(['\n', '\r']).to_string()))
    }
}

fn print_invalid(answer: &str, valid_answers: &str) {
    println!("Sorry! {answer} is not a valid answer. Please try again or exit.");
    println!("Valid answers: {valid_answers}");
}

/// Reads a line, turning end of input into the quit token.
fn read_or_quit<C: Console>(console: &mut C, prompt: &str) -> Result<Reply<String>> {
    match console.read_line(prompt)? {
        Some(line) => Ok(Reply::Value(line)),
        None => Ok(Reply::Bailed(GlobalToken::Quit)),
    }
}

/// Prompts until non-empty text or a global token is entered.
pub fn ask_text<C: Console>(console: &mut C, prompt: &str) -> Result<Reply<String>> {
    loop {
        let line = match read_or_quit(console, prompt)? {
            Reply::Value(line) => line,
            bailed @ Reply::Bailed(_) => return Ok(bailed),
        };

        if let Some(token) = GlobalToken::from_answer(&line) {
            return Ok(Reply::Bailed(token));
        }

        let text = line.trim();
        if !text.is_empty() {
            return Ok(Reply::Value(text.to_string()));
        }

        print_invalid("an empty line", "any text.");
    }
}

/// Prompts until one of `valid_ids` or a global token is entered.
pub fn ask_id<C: Console>(
    console: &mut C,
    prompt: &str,
    valid_ids: &IndexSet<u64>,
) -> Result<Reply<u64>> {
    loop {
        let line = match read_or_quit(console, prompt)? {
            Reply::Value(line) => line,
            Reply::Bailed(token) => return Ok(Reply::Bailed(token)),
        };

        if let Some(token) = GlobalToken::from_answer(&line) {
            return Ok(Reply::Bailed(token));
        }

        match line.trim().parse::<u64>() {
            Ok(id) if valid_ids.contains(&id) => return Ok(Reply::Value(id)),
            _ => print_invalid(line.trim(), &valid_ids.iter().join(", ")),
        }
    }
}

/// Asks a yes/no question. A global token typed instead is passed back as is.
pub fn ask_confirmation<C: Console>(console: &mut C, prompt: &str) -> Result<Confirmation> {
    loop {
        let line = match read_or_quit(console, prompt)? {
            Reply::Value(line) => line,
            Reply::Bailed(token) => return Ok(Confirmation::Bailed(token)),
        };

        if let Some(token) = GlobalToken::from_answer(&line) {
            return Ok(Confirmation::Bailed(token));
        }

        let lowercase_input = line.trim().to_lowercase();

        if VALID_YES.contains(&lowercase_input.as_str()) {
            return Ok(Confirmation::Confirmed);
        }

        if VALID_NO.contains(&lowercase_input.as_str()) {
            return Ok(Confirmation::Declined);
        }

        print_invalid(
            line.trim(),
            &VALID_YES.iter().chain(VALID_NO.iter()).join(", "),
        );
    }
}
