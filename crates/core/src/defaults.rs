//! Seed data for a freshly created store.

use chrono::{Local, Utc};

use crate::menu::default_menu_options;
use crate::model::{SavedCommand, StoreData, UserProfile};

pub const DEFAULT_AUTHOR: &str = "admin";
pub const DEFAULT_DEPARTMENT: &str = "administration";

/// (description, command, times called)
const DEFAULT_COMMANDS: [(&str, &str, u64); 4] = [
    ("Check git status", "git status", 2),
    ("Add all git command", "git add --all", 0),
    ("Git log", "git log --oneline", 4),
    ("Hello world!", "echo \"Hello world!\"", 5),
];

/// Current time as Unix milliseconds.
#[must_use]
pub fn timestamp_now() -> i64 {
    Utc::now().timestamp_millis()
}

/// Today's local date as `YYYY-MM-DD`.
#[must_use]
pub fn date_today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[must_use]
pub fn default_store_data() -> StoreData {
    let now = timestamp_now();
    let today = date_today();

    let saved_commands: Vec<SavedCommand> = DEFAULT_COMMANDS
        .iter()
        .enumerate()
        .map(|(index, (description, command_text, times_called))| SavedCommand {
            id: index as u64 + 1,
            position: index + 1,
            description: (*description).to_string(),
            command_text: (*command_text).to_string(),
            date_created: today.clone(),
            created_at: now,
            times_called: *times_called,
            author: DEFAULT_AUTHOR.to_string(),
            last_edited: now,
        })
        .collect();

    StoreData {
        next_id: saved_commands.len() as u64 + 1,
        saved_commands,
        menu_options: default_menu_options(now),
        user_profile: UserProfile {
            author_name: DEFAULT_AUTHOR.to_string(),
            department: DEFAULT_DEPARTMENT.to_string(),
        },
    }
}
