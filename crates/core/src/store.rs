//! The persisted command store.
//!
//! The store is a single YAML document holding saved commands, the menu
//! catalog and the user profile. Every public operation reads the document,
//! does its work and writes the document back before returning; nothing is
//! held open between operations.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use indexmap::IndexSet;
use log::{debug, info};

use crate::config::ensure_parent_dir;
use crate::defaults::{date_today, default_store_data, timestamp_now};
use crate::error::{Error, Result};
use crate::execution::run_in_shell;
use crate::menu::MenuOption;
use crate::model::{SavedCommand, StoreData};

/// How many of the newest commands lead the summary list.
pub const DEFAULT_RECENT_LIMIT: usize = 3;
/// How many of the most executed commands are considered for the summary list,
/// which is also the length the summary list is capped at.
pub const DEFAULT_POPULAR_LIMIT: usize = 8;

const FILE_DESCRIPTION: &str = "store";

#[derive(Debug, Clone)]
pub struct Store {
    path: String,
}

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    File::open(path)
        .map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

impl Store {
    /// A handle on the store at `path`. Nothing is read until the first
    /// operation.
    #[must_use]
    pub fn at(path: &str) -> Self {
        Store {
            path: path.to_string(),
        }
    }

    /// Returns a handle on the store at `path`, creating and seeding the file
    /// if it is missing.
    ///
    /// An existing file is left untouched; a corrupt one surfaces as an
    /// error from the first operation that reads it.
    ///
    /// # Errors
    ///
    /// Returns an error if a new store cannot be written.
    pub fn open_or_create(path: &str) -> Result<Self> {
        let store = Store::at(path);

        if !Path::new(path).is_file() {
            info!("No store at `{path}`, creating a default one");
            store.commit(&default_store_data())?;
        }

        Ok(store)
    }

    /// Replaces whatever is at `path` with a freshly seeded store.
    ///
    /// # Errors
    ///
    /// Returns an error if the new store cannot be written.
    pub fn reset(path: &str) -> Result<Self> {
        info!("Resetting store at `{path}` to defaults");
        let store = Store::at(path);
        store.commit(&default_store_data())?;
        Ok(store)
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    fn open(&self) -> Result<StoreData> {
        let reader = get_reader(FILE_DESCRIPTION, &self.path)?;

        serde_yaml::from_reader(reader).map_err(|e| {
            Error::yaml_error(
                "reading".to_string(),
                FILE_DESCRIPTION.to_string(),
                self.path.clone(),
                e,
            )
        })
    }

    fn commit(&self, data: &StoreData) -> Result<()> {
        ensure_parent_dir(FILE_DESCRIPTION, &self.path)?;

        let f = File::create(&self.path).map_err(|e| {
            Error::io_error(FILE_DESCRIPTION.to_string(), self.path.clone(), e)
        })?;

        serde_yaml::to_writer(f, data).map_err(|e| {
            Error::yaml_error(
                "writing".to_string(),
                FILE_DESCRIPTION.to_string(),
                self.path.clone(),
                e,
            )
        })
    }

    /// All saved commands in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn list_all(&self) -> Result<Vec<SavedCommand>> {
        let mut commands = self.open()?.saved_commands;
        commands.sort_by_key(|command| command.position);
        Ok(commands)
    }

    /// Looks up one saved command. `Ok(None)` means the ID does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn find(&self, id: u64) -> Result<Option<SavedCommand>> {
        Ok(self.open()?.command(id).cloned())
    }

    /// IDs of every saved command, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn valid_ids(&self) -> Result<IndexSet<u64>> {
        Ok(self.list_all()?.iter().map(|command| command.id).collect())
    }

    /// The persisted menu catalog, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn menu_options(&self) -> Result<Vec<MenuOption>> {
        Ok(self.open()?.menu_options)
    }

    /// Saves a new command authored by the current profile's author.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn add(&self, description: &str, command_text: &str) -> Result<SavedCommand> {
        let mut data = self.open()?;
        let now = timestamp_now();

        let command = SavedCommand {
            id: data.next_id,
            position: data.saved_commands.len() + 1,
            description: description.to_string(),
            command_text: command_text.to_string(),
            date_created: date_today(),
            created_at: now,
            times_called: 0,
            author: data.user_profile.author_name.clone(),
            last_edited: now,
        };

        data.next_id += 1;
        data.saved_commands.push(command.clone());
        data.reindex();
        self.commit(&data)?;

        debug!("Added command {command:?}");
        Ok(command)
    }

    /// Replaces a command's text and bumps its last edited timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandNotFound`] if there is no command with `id`, or
    /// an error if the store cannot be read or written.
    pub fn update_text(&self, id: u64, new_text: &str) -> Result<SavedCommand> {
        let mut data = self.open()?;

        let command = data.command_mut(id).ok_or(Error::CommandNotFound(id))?;
        command.command_text = new_text.to_string();
        command.last_edited = timestamp_now();
        let updated = command.clone();

        self.commit(&data)?;
        Ok(updated)
    }

    /// Removes a command and renumbers the remaining display positions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandNotFound`] if there is no command with `id`, or
    /// an error if the store cannot be read or written.
    pub fn delete(&self, id: u64) -> Result<SavedCommand> {
        let mut data = self.open()?;

        let index = data
            .saved_commands
            .iter()
            .position(|command| command.id == id)
            .ok_or(Error::CommandNotFound(id))?;
        let removed = data.saved_commands.remove(index);
        data.reindex();

        self.commit(&data)?;
        Ok(removed)
    }

    /// Counts one more call of the command, commits, then runs it.
    ///
    /// Returns the exit code of the command.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandNotFound`] if there is no command with `id`, an
    /// error if the store cannot be read or written, or an error if the shell
    /// could not be launched.
    pub fn execute(&self, id: u64, shell: &str) -> Result<i32> {
        let mut data = self.open()?;

        let command = data.command_mut(id).ok_or(Error::CommandNotFound(id))?;
        command.times_called += 1;
        let command_text = command.command_text.clone();

        self.commit(&data)?;
        run_in_shell(shell, &command_text)
    }

    /// Writes every saved command to `export_path`, one per line.
    ///
    /// Returns the number of lines written.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the file cannot be written.
    pub fn export_snapshot(&self, export_path: &str) -> Result<usize> {
        let commands = self.list_all()?;
        let export_error = |e| Error::io_error("export".to_string(), export_path.to_string(), e);

        ensure_parent_dir("export", export_path)?;
        let mut writer = BufWriter::new(File::create(export_path).map_err(export_error)?);

        for command in &commands {
            writeln!(writer, "{}", command.field_values().join(", ")).map_err(export_error)?;
        }
        writer.flush().map_err(export_error)?;

        Ok(commands.len())
    }

    /// Newest commands first, then the most executed ones, without duplicates.
    ///
    /// The `limit_recent` newest commands lead the list. The `limit_popular`
    /// most executed commands are then scanned in popularity order, skipping
    /// any already listed, until the list holds `limit_popular` entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn top_recent_and_popular(
        &self,
        limit_recent: usize,
        limit_popular: usize,
    ) -> Result<Vec<SavedCommand>> {
        let commands = self.list_all()?;

        let mut recent = commands.clone();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut popular = commands;
        popular.sort_by(|a, b| b.times_called.cmp(&a.times_called));

        let mut summary: Vec<SavedCommand> = recent.into_iter().take(limit_recent).collect();

        for command in popular.into_iter().take(limit_popular) {
            if summary.len() >= limit_popular {
                break;
            }
            if summary.iter().any(|listed| listed.id == command.id) {
                continue;
            }
            summary.push(command);
        }

        Ok(summary)
    }

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn get_author(&self) -> Result<String> {
        Ok(self.open()?.user_profile.author_name)
    }

    /// Sets the author name, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn set_author(&self, new_name: &str) -> Result<String> {
        let mut data = self.open()?;
        let previous = std::mem::replace(&mut data.user_profile.author_name, new_name.to_string());
        self.commit(&data)?;
        Ok(previous)
    }

    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn get_department(&self) -> Result<String> {
        Ok(self.open()?.user_profile.department)
    }

    /// Sets the department, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn set_department(&self, new_department: &str) -> Result<String> {
        let mut data = self.open()?;
        let previous = std::mem::replace(
            &mut data.user_profile.department,
            new_department.to_string(),
        );
        self.commit(&data)?;
        Ok(previous)
    }
}

/// Whether a store file already exists at `path`.
#[must_use]
pub fn store_exists(path: &str) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}
