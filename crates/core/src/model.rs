use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::menu::MenuOption;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SavedCommand {
    /// Stable identity, never reused after a delete.
    pub id: u64,
    /// Dense 1..N display position.
    pub position: usize,
    pub description: String,
    pub command_text: String,
    pub date_created: String,
    pub created_at: i64,
    pub times_called: u64,
    pub author: String,
    pub last_edited: i64,
}

impl SavedCommand {
    /// Field values in storage order, as written by the export.
    #[must_use]
    pub fn field_values(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.description.clone(),
            self.command_text.clone(),
            self.date_created.clone(),
            self.created_at.to_string(),
            self.times_called.to_string(),
            self.author.clone(),
            self.last_edited.to_string(),
        ]
    }
}

impl Display for SavedCommand {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.description.is_empty() {
            formatter.write_str(&self.command_text)
        } else {
            write!(formatter, "{} ({})", self.command_text, self.description)
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub author_name: String,
    pub department: String,
}

/// The whole persisted document.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StoreData {
    pub next_id: u64,
    pub saved_commands: Vec<SavedCommand>,
    pub menu_options: Vec<MenuOption>,
    pub user_profile: UserProfile,
}

impl StoreData {
    /// Rewrites every display position so they run 1..N in the current order.
    pub fn reindex(&mut self) {
        self.saved_commands.sort_by_key(|command| command.position);
        for (index, command) in self.saved_commands.iter_mut().enumerate() {
            command.position = index + 1;
        }
    }

    pub fn command(&self, id: u64) -> Option<&SavedCommand> {
        self.saved_commands.iter().find(|command| command.id == id)
    }

    pub fn command_mut(&mut self, id: u64) -> Option<&mut SavedCommand> {
        self.saved_commands.iter_mut().find(|command| command.id == id)
    }
}
