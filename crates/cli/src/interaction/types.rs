//! Type definitions for the interaction loop.
//!
//! This module defines the loop's states, the in-memory session state and
//! the results that prompts and actions hand back to the loop.

use command_saver_core::menu::MenuAction;

use crate::answer::ParsedAnswer;

/// Whether the program was started interactively or to run one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Interactive,
    SingleActionPending,
    SingleActionDone,
}

/// Options that can be typed at any prompt to leave what is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalToken {
    Quit,
    MainMenu,
    SavedCommandsMenu,
}

impl GlobalToken {
    /// Recognises a global token typed on its own at a prompt.
    #[must_use]
    pub fn from_answer(answer: &str) -> Option<Self> {
        match MenuAction::from_key(answer.trim())? {
            MenuAction::Quit => Some(GlobalToken::Quit),
            MenuAction::MainMenu => Some(GlobalToken::MainMenu),
            MenuAction::SavedCommandsMenu => Some(GlobalToken::SavedCommandsMenu),
            _ => None,
        }
    }

    #[must_use]
    pub fn action(self) -> MenuAction {
        match self {
            GlobalToken::Quit => MenuAction::Quit,
            GlobalToken::MainMenu => MenuAction::MainMenu,
            GlobalToken::SavedCommandsMenu => MenuAction::SavedCommandsMenu,
        }
    }

    /// The token as an answer the loop can dispatch next.
    #[must_use]
    pub fn as_answer(self) -> ParsedAnswer {
        ParsedAnswer::option_only(self.action().key())
    }
}

/// A sub-prompt either produced a value or the user jumped elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    Value(T),
    Bailed(GlobalToken),
}

impl<T> Reply<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        match self {
            Reply::Value(value) => Reply::Value(f(value)),
            Reply::Bailed(token) => Reply::Bailed(token),
        }
    }
}

/// Answer to an "are you sure" question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
    Bailed(GlobalToken),
}

/// How a dispatched action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The user declined a confirmation.
    Stopped,
    /// The target command does not exist.
    NotFound,
    /// A storage or subprocess failure, already logged and reported.
    Failed,
    Bailed(GlobalToken),
}

/// States of the interaction loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    AwaitingInput,
    DispatchingOption(ParsedAnswer),
    AwaitingSubArgument(MenuAction),
    Terminated,
}

/// State kept for the lifetime of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionState {
    pub mode: Mode,
    /// The most recently attempted repeatable option.
    pub last_option: Option<MenuAction>,
    /// An answer to dispatch before prompting again, e.g. a global token typed
    /// at a sub-prompt.
    pub pending: Option<ParsedAnswer>,
    /// Exit code of the most recent command run through the shell.
    pub last_exit_code: Option<i32>,
}

impl InteractionState {
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            last_option: None,
            pending: None,
            last_exit_code: None,
        }
    }
}

/// What the session reports when the loop ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionExit {
    pub mode: Mode,
    pub last_exit_code: Option<i32>,
}

impl SessionExit {
    /// Process exit status: the last command's status for a single action,
    /// success otherwise.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match (self.mode, self.last_exit_code) {
            (Mode::Interactive, _) | (_, None) => 0,
            (_, Some(code)) => u8::try_from(code).unwrap_or(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_token_from_answer() {
        assert_eq!(GlobalToken::from_answer("q"), Some(GlobalToken::Quit));
        assert_eq!(GlobalToken::from_answer(" b "), Some(GlobalToken::MainMenu));
        assert_eq!(
            GlobalToken::from_answer("bs"),
            Some(GlobalToken::SavedCommandsMenu)
        );
        assert_eq!(GlobalToken::from_answer("e"), None);
        assert_eq!(GlobalToken::from_answer("quit"), None);
        assert_eq!(GlobalToken::from_answer(""), None);
    }

    #[test]
    fn test_global_token_as_answer() {
        let answer = GlobalToken::SavedCommandsMenu.as_answer();
        assert_eq!(answer.option, "bs");
        assert!(answer.argument.is_none());
    }

    #[test]
    fn test_every_global_action_has_a_token() {
        for action in MenuAction::GLOBAL {
            let token = GlobalToken::from_answer(action.key()).unwrap();
            assert_eq!(token.action(), action);
        }
    }

    #[test]
    fn test_reply_map() {
        assert_eq!(Reply::Value(2).map(|v| v * 2), Reply::Value(4));
        assert_eq!(
            Reply::<u64>::Bailed(GlobalToken::Quit).map(|v| v * 2),
            Reply::Bailed(GlobalToken::Quit)
        );
    }

    #[test]
    fn test_exit_code() {
        let exit = |mode, last_exit_code| SessionExit {
            mode,
            last_exit_code,
        };
        assert_eq!(exit(Mode::Interactive, Some(3)).exit_code(), 0);
        assert_eq!(exit(Mode::SingleActionDone, None).exit_code(), 0);
        assert_eq!(exit(Mode::SingleActionDone, Some(3)).exit_code(), 3);
        assert_eq!(exit(Mode::SingleActionDone, Some(-1)).exit_code(), 1);
    }

    #[test]
    fn test_new_state() {
        let state = InteractionState::new(Mode::SingleActionPending);
        assert_eq!(state.mode, Mode::SingleActionPending);
        assert!(state.last_option.is_none());
        assert!(state.pending.is_none());
        assert!(state.last_exit_code.is_none());
    }
}
