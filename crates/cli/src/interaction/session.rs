//! The interaction loop.
//!
//! A [`Session`] owns the store handle, the console answers are read from
//! and the per-session state. [`Session::run`] drives the loop through its
//! [`LoopState`]s until the user quits or a single action has been handled.

use indexmap::IndexSet;
use log::{debug, error, info, warn};

use command_saver_core::error::{Error, Result};
use command_saver_core::execution::run_in_shell;
use command_saver_core::menu::{default_menu_options, MenuAction, MenuOption};
use command_saver_core::model::SavedCommand;
use command_saver_core::store::{Store, DEFAULT_POPULAR_LIMIT, DEFAULT_RECENT_LIMIT};

use super::input::{ask_confirmation, ask_id, ask_text, Console};
use super::types::{Confirmation, InteractionState, LoopState, Mode, Outcome, Reply, SessionExit};
use super::ui;
use crate::answer::{parse_answer, Argument, ParsedAnswer};

/// Printed when the program ends normally.
pub const EXIT_MESSAGE: &str = "Command Saver exited.";

/// Exit code recorded when the shell itself could not be started.
const LAUNCH_FAILURE_EXIT_CODE: i32 = 127;

const MAIN_PROMPT: &str = "\nPlease choose what you would like to do: ";
const ID_PROMPT: &str = "Command ID not found. Please enter ID: ";
const TEXT_PROMPT: &str = "Terminal text not found. Please enter text: ";

const COMMAND_WARNING: &str = "Caution! This program does not test the correctness of the command. \
Make sure it works in your terminal before saving it.";

/// Logs a failure that should not end the program and shows the generic
/// failure notice.
///
/// # Errors
///
/// Terminal I/O errors are returned as they are; so is a failure to print
/// the notice.
pub fn report_failure(doing: &str, error: Error, log_path: &str) -> Result<()> {
    if let Error::Stdio(_) = error {
        return Err(error);
    }

    error!("An error occurred when trying to {doing}.\nThe error: {error}");
    ui::print_failure(log_path)
}

/// Settings the session needs besides the store.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub shell: String,
    pub export_path: String,
    pub log_path: String,
}

pub struct Session<C: Console> {
    store: Store,
    console: C,
    settings: SessionSettings,
    state: InteractionState,
    single_input: Option<String>,
}

impl<C: Console> Session<C> {
    /// A session that prompts until the user quits.
    pub fn interactive(store: Store, console: C, settings: SessionSettings) -> Self {
        Self {
            store,
            console,
            settings,
            state: InteractionState::new(Mode::Interactive),
            single_input: None,
        }
    }

    /// A session that handles `input` as its only answer and then ends.
    ///
    /// The console is still used for sub-prompts such as a missing ID or a
    /// confirmation.
    pub fn single_invocation(
        store: Store,
        console: C,
        settings: SessionSettings,
        input: String,
    ) -> Self {
        Self {
            store,
            console,
            settings,
            state: InteractionState::new(Mode::SingleActionPending),
            single_input: Some(input),
        }
    }

    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Runs the loop until it terminates.
    ///
    /// # Errors
    ///
    /// Only terminal I/O failures end the loop with an error. Storage and
    /// subprocess failures are logged, reported to the user and survived.
    pub fn run(&mut self) -> Result<SessionExit> {
        info!("Session started in {:?} mode", self.state.mode);

        if self.state.mode == Mode::Interactive {
            self.show_main_menu()?;
        }

        let mut loop_state = LoopState::AwaitingInput;
        loop {
            debug!("Loop state: {loop_state:?}");
            loop_state = match loop_state {
                LoopState::AwaitingInput => self.await_input()?,
                LoopState::DispatchingOption(answer) => self.dispatch(answer)?,
                LoopState::AwaitingSubArgument(action) => self.await_sub_argument(action)?,
                LoopState::Terminated => break,
            };
        }

        info!("Session ended");
        Ok(SessionExit {
            mode: self.state.mode,
            last_exit_code: self.state.last_exit_code,
        })
    }

    /// Logs and reports a failure that should not end the session.
    ///
    /// Terminal I/O errors are passed through.
    fn guard<T>(&self, doing: &str, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                report_failure(doing, e, &self.settings.log_path)?;
                Ok(None)
            }
        }
    }

    fn valid_ids(&self) -> Result<IndexSet<u64>> {
        Ok(self
            .guard("read the saved command IDs", self.store.valid_ids())?
            .unwrap_or_default())
    }

    fn await_input(&mut self) -> Result<LoopState> {
        if let Some(answer) = self.state.pending.take() {
            return Ok(LoopState::DispatchingOption(answer));
        }

        let line = match self.state.mode {
            Mode::SingleActionDone => return Ok(LoopState::Terminated),
            Mode::SingleActionPending => {
                self.state.mode = Mode::SingleActionDone;
                self.single_input.take().unwrap_or_default()
            }
            Mode::Interactive => match self.console.read_line(MAIN_PROMPT)? {
                Some(line) => line,
                None => {
                    info!("End of input, quitting");
                    return Ok(LoopState::Terminated);
                }
            },
        };

        let valid_ids = self.valid_ids()?;
        match parse_answer(&line, &valid_ids) {
            Some(answer) => Ok(LoopState::DispatchingOption(answer)),
            None => {
                debug!("Could not parse an option from `{line}`");
                ui::print_error("Error! Valid option has not been found.")?;
                println!("Please try again.");
                Ok(LoopState::AwaitingInput)
            }
        }
    }

    /// The menu catalog, or the built-in one if the store cannot be read so
    /// that quitting still works.
    fn menu_options(&self) -> Result<Vec<MenuOption>> {
        Ok(self
            .guard("read the menu options", self.store.menu_options())?
            .unwrap_or_else(|| default_menu_options(0)))
    }

    fn dispatch(&mut self, answer: ParsedAnswer) -> Result<LoopState> {
        let options = self.menu_options()?;
        let action = options
            .iter()
            .any(|option| option.key == answer.option)
            .then(|| MenuAction::from_key(&answer.option))
            .flatten();

        let Some(action) = action else {
            debug!("`{}` is not a menu option", answer.option);
            ui::print_error("Error! Option not in the Main Menu.")?;
            println!("Please try again.");
            return Ok(self.settle(Outcome::NotFound));
        };

        debug!("Dispatching `{action}` with argument {:?}", answer.argument);

        match action {
            MenuAction::Quit => Ok(LoopState::Terminated),
            MenuAction::MainMenu => {
                self.show_main_menu()?;
                Ok(self.settle(Outcome::Completed))
            }
            MenuAction::SavedCommandsMenu => {
                self.show_saved_commands()?;
                Ok(self.settle(Outcome::Completed))
            }
            MenuAction::Help => {
                ui::print_help_page(&options)?;
                Ok(self.settle(Outcome::Completed))
            }
            MenuAction::ExportAll => {
                let outcome = self.export_all()?;
                Ok(self.settle(outcome))
            }
            MenuAction::Repeat => match self.state.last_option {
                Some(last) => {
                    info!("Repeating `{last}`");
                    self.perform(last, None)
                }
                None => {
                    println!("Sorry! It appears command to repeat was not found.");
                    Ok(self.settle(Outcome::NotFound))
                }
            },
            _ => self.perform(action, answer.argument),
        }
    }

    /// Where the loop goes once an option has been handled.
    fn settle(&mut self, outcome: Outcome) -> LoopState {
        debug!("Outcome: {outcome:?}");
        match outcome {
            Outcome::Bailed(token) => {
                self.state.pending = Some(token.as_answer());
                LoopState::AwaitingInput
            }
            _ if self.state.mode == Mode::SingleActionDone => LoopState::Terminated,
            _ => LoopState::AwaitingInput,
        }
    }

    fn await_sub_argument(&mut self, action: MenuAction) -> Result<LoopState> {
        let reply = if action == MenuAction::Terminal {
            ask_text(&mut self.console, TEXT_PROMPT)?.map(Argument::Text)
        } else {
            let valid_ids = self.valid_ids()?;
            if valid_ids.is_empty() {
                ui::print_error("There are no saved commands yet.")?;
                return Ok(self.settle(Outcome::NotFound));
            }
            ask_id(&mut self.console, ID_PROMPT, &valid_ids)?.map(Argument::Id)
        };

        match reply {
            Reply::Value(argument) => self.perform(action, Some(argument)),
            Reply::Bailed(token) => Ok(LoopState::DispatchingOption(token.as_answer())),
        }
    }

    /// Runs a repeatable action, asking for its argument first if it is missing.
    fn perform(&mut self, action: MenuAction, argument: Option<Argument>) -> Result<LoopState> {
        if action.is_repeatable() {
            self.state.last_option = Some(action);
        }

        let result = match (action, argument) {
            (MenuAction::Execute, Some(Argument::Id(id))) => self.execute_saved(id),
            (MenuAction::Edit, Some(Argument::Id(id))) => self.edit_command(id),
            (MenuAction::Delete, Some(Argument::Id(id))) => self.delete_command(id),
            (MenuAction::ShowSingle, Some(Argument::Id(id))) => self.show_single(id),
            (MenuAction::Terminal, Some(Argument::Text(text))) => self.execute_text(&text),
            (MenuAction::Terminal, _) => return Ok(LoopState::AwaitingSubArgument(action)),
            (action, _) if action.needs_command_id() => {
                return Ok(LoopState::AwaitingSubArgument(action))
            }
            (MenuAction::Add, _) => self.add_command(),
            (MenuAction::SetUser, _) => self.set_author(),
            (MenuAction::SetUserDepartment, _) => self.set_department(),
            (action, _) => {
                warn!("`{action}` cannot be performed directly");
                Ok(Outcome::NotFound)
            }
        };

        let outcome = self
            .guard(&action.description().to_lowercase(), result)?
            .unwrap_or(Outcome::Failed);
        Ok(self.settle(outcome))
    }

    fn show_main_menu(&self) -> Result<()> {
        let options = self.menu_options()?;
        let summary = self
            .store
            .top_recent_and_popular(DEFAULT_RECENT_LIMIT, DEFAULT_POPULAR_LIMIT);
        if let Some(summary) = self.guard("build the command summary", summary)? {
            ui::print_main_menu(&options, &summary)?;
        }
        Ok(())
    }

    fn show_saved_commands(&self) -> Result<()> {
        let commands = self.store.list_all();
        if let Some(commands) = self.guard("list the saved commands", commands)? {
            ui::print_saved_commands_menu(&commands)?;
        }
        Ok(())
    }

    fn show_input_window_table(&self) -> Result<()> {
        let options = self.menu_options()?;
        ui::print_input_window_table(&options)?;
        Ok(())
    }

    fn export_all(&self) -> Result<Outcome> {
        let path = &self.settings.export_path;
        let exported = self.store.export_snapshot(path);
        match self.guard("export the saved commands", exported)? {
            Some(count) => {
                info!("Exported {count} commands to `{path}`");
                ui::print_success(&format!("Successfully saved at: {path}"))?;
                Ok(Outcome::Completed)
            }
            None => Ok(Outcome::Failed),
        }
    }

    fn record_exit_code(&mut self, code: i32) -> Result<()> {
        self.state.last_exit_code = Some(code);
        if code != 0 {
            ui::print_warning(&format!("Command exited with status {code}."))?;
        }
        Ok(())
    }

    fn execute_saved(&mut self, id: u64) -> Result<Outcome> {
        let Some(command) = self.store.find(id)? else {
            ui::print_not_found(id)?;
            return Ok(Outcome::NotFound);
        };

        info!("Executing command {id}: `{}`", command.command_text);
        println!("Executing: {command}");
        println!("----Terminal----");
        let executed = self.store.execute(id, &self.settings.shell);
        println!("----End of Terminal execute----");

        match executed {
            Ok(code) => {
                self.record_exit_code(code)?;
                Ok(Outcome::Completed)
            }
            Err(Error::CommandNotFound(id)) => {
                ui::print_not_found(id)?;
                Ok(Outcome::NotFound)
            }
            Err(e @ Error::SubProcess { .. }) => {
                self.state.last_exit_code = Some(LAUNCH_FAILURE_EXIT_CODE);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    fn execute_text(&mut self, text: &str) -> Result<Outcome> {
        info!("Executing free text: `{text}`");
        println!("----Terminal----");
        let executed = run_in_shell(&self.settings.shell, text);
        println!("----End of Terminal execute----");

        match executed {
            Ok(code) => {
                self.record_exit_code(code)?;
                Ok(Outcome::Completed)
            }
            Err(e) => {
                self.state.last_exit_code = Some(LAUNCH_FAILURE_EXIT_CODE);
                Err(e)
            }
        }
    }

    fn show_single(&self, id: u64) -> Result<Outcome> {
        match self.store.find(id)? {
            Some(command) => {
                ui::print_single_command(&command)?;
                Ok(Outcome::Completed)
            }
            None => {
                ui::print_not_found(id)?;
                Ok(Outcome::NotFound)
            }
        }
    }

    fn add_command(&mut self) -> Result<Outcome> {
        self.show_input_window_table()?;

        println!("Add command selected (step 1 of 2).");
        let description = match ask_text(&mut self.console, "The description: ")? {
            Reply::Value(description) => description,
            Reply::Bailed(token) => return Ok(Outcome::Bailed(token)),
        };

        ui::print_warning(COMMAND_WARNING)?;
        println!("Add command selected (step 2 of 2).");
        let command_text = match ask_text(&mut self.console, "Terminal command: ")? {
            Reply::Value(command_text) => command_text,
            Reply::Bailed(token) => return Ok(Outcome::Bailed(token)),
        };

        let added = self.store.add(&description, &command_text)?;
        info!("Added command {}: `{}`", added.id, added.command_text);
        ui::print_success(&format!(
            "Success! A new command added with ID {}: {added}",
            added.id
        ))?;
        Ok(Outcome::Completed)
    }

    /// Shows the target and asks before running `action` on it.
    fn with_confirmation<F>(&mut self, verb: &str, id: u64, action: F) -> Result<Outcome>
    where
        F: FnOnce(&mut Self, &SavedCommand) -> Result<Outcome>,
    {
        let Some(target) = self.store.find(id)? else {
            ui::print_not_found(id)?;
            return Ok(Outcome::NotFound);
        };

        ui::print_single_command(&target)?;
        let prompt = format!(
            "Are you sure you want to {} the command {id}: {}? (y/n): ",
            verb.to_lowercase(),
            target.command_text
        );

        match ask_confirmation(&mut self.console, &prompt)? {
            Confirmation::Confirmed => {
                info!("{verb} confirmed for command {id}");
                match action(self, &target) {
                    Err(Error::CommandNotFound(id)) => {
                        ui::print_not_found(id)?;
                        Ok(Outcome::NotFound)
                    }
                    other => other,
                }
            }
            Confirmation::Declined => {
                println!("{verb} command stopped.");
                Ok(Outcome::Stopped)
            }
            Confirmation::Bailed(token) => Ok(Outcome::Bailed(token)),
        }
    }

    fn delete_command(&mut self, id: u64) -> Result<Outcome> {
        self.with_confirmation("Delete", id, |session, target| {
            session.store.delete(target.id)?;
            ui::print_success(&format!(
                "Success! Command with ID: {} has been deleted.",
                target.id
            ))?;
            Ok(Outcome::Completed)
        })
    }

    fn edit_command(&mut self, id: u64) -> Result<Outcome> {
        self.show_input_window_table()?;

        self.with_confirmation("Edit", id, |session, target| {
            println!("Command being edited: {}", target.command_text);
            ui::print_warning(COMMAND_WARNING)?;
            let new_text = match ask_text(&mut session.console, "Please enter the new command: ")? {
                Reply::Value(new_text) => new_text,
                Reply::Bailed(token) => return Ok(Outcome::Bailed(token)),
            };

            let updated = session.store.update_text(target.id, &new_text)?;
            ui::print_success(&format!(
                "Success! Command with ID: {} has been edited from `{}` to `{}`.",
                updated.id, target.command_text, updated.command_text
            ))?;
            Ok(Outcome::Completed)
        })
    }

    fn set_author(&mut self) -> Result<Outcome> {
        let current = self.store.get_author()?;
        println!("Current author: {current}");

        match ask_text(&mut self.console, "Please enter the new author name: ")? {
            Reply::Value(new_name) => {
                let previous = self.store.set_author(&new_name)?;
                ui::print_success(&format!(
                    "Author successfully changed from {previous} to {new_name}."
                ))?;
                Ok(Outcome::Completed)
            }
            Reply::Bailed(token) => Ok(Outcome::Bailed(token)),
        }
    }

    fn set_department(&mut self) -> Result<Outcome> {
        let current = self.store.get_department()?;
        println!("Current department: {current}");

        match ask_text(&mut self.console, "Please enter the new department: ")? {
            Reply::Value(new_department) => {
                let previous = self.store.set_department(&new_department)?;
                ui::print_success(&format!(
                    "Department successfully changed from {previous} to {new_department}."
                ))?;
                Ok(Outcome::Completed)
            }
            Reply::Bailed(token) => Ok(Outcome::Bailed(token)),
        }
    }
}
