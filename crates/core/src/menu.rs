//! The menu catalog: every option key the interaction loop understands.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A menu entry as persisted in the store, used for validation and display.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub key: String,
    pub description: String,
    pub created_at: i64,
}

impl Display for MenuOption {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} ({})", self.key, self.description)
    }
}

/// Actions selected by an option key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Execute,
    Add,
    Edit,
    Delete,
    ShowSingle,
    Terminal,
    MainMenu,
    SavedCommandsMenu,
    Help,
    Repeat,
    Quit,
    ExportAll,
    SetUser,
    SetUserDepartment,
}

impl MenuAction {
    /// Catalog order, which is also the order options are displayed in.
    pub const ALL: [MenuAction; 14] = [
        MenuAction::Execute,
        MenuAction::Add,
        MenuAction::Edit,
        MenuAction::Delete,
        MenuAction::ShowSingle,
        MenuAction::Terminal,
        MenuAction::MainMenu,
        MenuAction::SavedCommandsMenu,
        MenuAction::Help,
        MenuAction::Repeat,
        MenuAction::Quit,
        MenuAction::ExportAll,
        MenuAction::SetUser,
        MenuAction::SetUserDepartment,
    ];

    /// Options that may be typed at any prompt, overriding whatever is in progress.
    pub const GLOBAL: [MenuAction; 3] = [
        MenuAction::Quit,
        MenuAction::MainMenu,
        MenuAction::SavedCommandsMenu,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            MenuAction::Execute => "e",
            MenuAction::Add => "a",
            MenuAction::Edit => "edit",
            MenuAction::Delete => "d",
            MenuAction::ShowSingle => "ss",
            MenuAction::Terminal => "t",
            MenuAction::MainMenu => "b",
            MenuAction::SavedCommandsMenu => "bs",
            MenuAction::Help => "help",
            MenuAction::Repeat => "r",
            MenuAction::Quit => "q",
            MenuAction::ExportAll => "exportall",
            MenuAction::SetUser => "setuser",
            MenuAction::SetUserDepartment => "setuserdep",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            MenuAction::Execute => "Execute an existing command",
            MenuAction::Add => "Add a new command",
            MenuAction::Edit => "Edit an existing command",
            MenuAction::Delete => "Delete a command",
            MenuAction::ShowSingle => "Show single command full data",
            MenuAction::Terminal => "Write a command directly for the terminal",
            MenuAction::MainMenu => "Go to the Main Menu",
            MenuAction::SavedCommandsMenu => "Go to the Saved Commands Menu",
            MenuAction::Help => "Go to the Help Page",
            MenuAction::Repeat => "Repeat last command",
            MenuAction::Quit => "Exit program",
            MenuAction::ExportAll => "Export all saved commands to a text file.",
            MenuAction::SetUser => "Set user's name.",
            MenuAction::SetUserDepartment => "Set user's department.",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.key() == key)
    }

    #[must_use]
    pub fn is_global(self) -> bool {
        Self::GLOBAL.contains(&self)
    }

    /// Options that act on one saved command and so need its ID.
    #[must_use]
    pub fn needs_command_id(self) -> bool {
        matches!(
            self,
            MenuAction::Execute | MenuAction::Edit | MenuAction::Delete | MenuAction::ShowSingle
        )
    }

    /// Options remembered as the target of the repeat option.
    #[must_use]
    pub fn is_repeatable(self) -> bool {
        matches!(
            self,
            MenuAction::Execute
                | MenuAction::Add
                | MenuAction::Edit
                | MenuAction::Delete
                | MenuAction::ShowSingle
                | MenuAction::Terminal
                | MenuAction::SetUser
                | MenuAction::SetUserDepartment
        )
    }
}

impl Display for MenuAction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.key())
    }
}

/// Builds the full catalog as it is seeded into a new store.
#[must_use]
pub fn default_menu_options(created_at: i64) -> Vec<MenuOption> {
    MenuAction::ALL
        .iter()
        .map(|action| MenuOption {
            key: action.key().to_string(),
            description: action.description().to_string(),
            created_at,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique_lowercase_letters() {
        let mut keys = HashSet::new();
        for action in MenuAction::ALL {
            assert!(action.key().chars().all(|c| c.is_ascii_lowercase()));
            assert!(keys.insert(action.key()), "duplicate key {}", action.key());
        }
    }

    #[test]
    fn test_from_key_round_trips_catalog() {
        for action in MenuAction::ALL {
            assert_eq!(MenuAction::from_key(action.key()), Some(action));
        }
        assert_eq!(MenuAction::from_key("x"), None);
        assert_eq!(MenuAction::from_key(""), None);
    }

    #[test]
    fn test_global_tokens() {
        let globals: Vec<&str> = MenuAction::ALL
            .iter()
            .filter(|a| a.is_global())
            .map(|a| a.key())
            .collect();
        assert_eq!(globals, vec!["b", "bs", "q"]);
    }

    #[test]
    fn test_views_are_not_repeatable() {
        assert!(!MenuAction::MainMenu.is_repeatable());
        assert!(!MenuAction::Help.is_repeatable());
        assert!(!MenuAction::Repeat.is_repeatable());
        assert!(!MenuAction::ExportAll.is_repeatable());
        assert!(MenuAction::Delete.is_repeatable());
        assert!(MenuAction::Terminal.is_repeatable());
    }

    #[test]
    fn test_default_menu_options_cover_catalog() {
        let options = default_menu_options(42);
        assert_eq!(options.len(), MenuAction::ALL.len());
        assert_eq!(options[0].key, "e");
        assert!(options.iter().all(|o| o.created_at == 42));
    }
}
