//! Turns a line typed at the menu prompt into an option and its argument.
//!
//! Parsing is deliberately forgiving: `e 3`, `e3` and `exportall 2 extra
//! text` are all understood. The option is the leading run of lowercase
//! letters. For every option except the free-text terminal one, the first
//! run of digits is taken as a command ID, but only if that ID currently
//! exists; otherwise the argument is left empty so the caller asks for it.

use indexmap::IndexSet;

use command_saver_core::menu::MenuAction;

/// Argument following an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// A saved command ID known to exist when the line was parsed.
    Id(u64),
    /// Literal text for the free-text terminal option.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAnswer {
    pub option: String,
    pub argument: Option<Argument>,
}

impl ParsedAnswer {
    #[must_use]
    pub fn option_only(option: &str) -> Self {
        Self {
            option: option.to_string(),
            argument: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<u64> {
        match self.argument {
            Some(Argument::Id(id)) => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.argument {
            Some(Argument::Text(text)) => Some(text),
            _ => None,
        }
    }
}

/// Parses one line of input.
///
/// Returns `None` when the line does not start with an option token, which
/// includes a line starting with whitespace; the caller reports that and
/// prompts again.
#[must_use]
pub fn parse_answer(raw: &str, valid_ids: &IndexSet<u64>) -> Option<ParsedAnswer> {
    let line = raw.trim_end();

    let option_end = line
        .find(|c: char| !c.is_ascii_lowercase())
        .unwrap_or(line.len());
    if option_end == 0 {
        return None;
    }

    let (option, rest) = line.split_at(option_end);

    if option == MenuAction::Terminal.key() {
        let text = rest.trim_start();
        return Some(ParsedAnswer {
            option: option.to_string(),
            argument: (!text.is_empty()).then(|| Argument::Text(text.to_string())),
        });
    }

    let argument = first_digit_run(rest)
        .and_then(|digits| digits.parse::<u64>().ok())
        .filter(|id| valid_ids.contains(id))
        .map(Argument::Id);

    Some(ParsedAnswer {
        option: option.to_string(),
        argument,
    })
}

fn first_digit_run(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits = &text[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    Some(&digits[..end])
}
