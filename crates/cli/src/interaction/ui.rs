use std::fmt::Display;
use std::io::{stdout, Write};

use crossterm::queue;
use crossterm::style::Color::{DarkGreen, Green, Red, Reset, Yellow};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetForegroundColor};
use itertools::Itertools;

use command_saver_core::error::Result;
use command_saver_core::menu::{MenuAction, MenuOption};
use command_saver_core::model::SavedCommand;

const MAIN_MENU_INFO: &str = "Welcome to Command Saver!\n\
Save the terminal commands you use most and run them again by ID.\n\
Type an option, optionally followed by a command ID, e.g. `e 3` to execute command 3.";

const HELP_INFO: &str = "Command Saver help\n\
Options are short words typed at the prompt. Options that work on a saved command\n\
take its ID after the option (`d 2`, `edit 4`); if the ID is missing or unknown you\n\
are asked for it. `t` runs the rest of the line in the terminal without saving it.\n\
`q`, `b` and `bs` work at any prompt and cancel whatever is in progress.";

/// Widest a table cell is allowed to get before it is cut short.
const MAX_CELL_WIDTH: usize = 60;

fn print_styled(text: &str, color: Color, bold: bool) -> Result<()> {
    let mut stdout = stdout();
    if bold {
        queue!(stdout, SetAttribute(Attribute::Bold))?;
    }
    queue!(
        stdout,
        SetForegroundColor(color),
        Print(text),
        SetForegroundColor(Reset),
        SetAttribute(Attribute::Reset),
        Print("\n"),
    )?;
    stdout.flush()?;
    Ok(())
}

pub fn print_success(text: &str) -> Result<()> {
    print_styled(text, Green, true)
}

pub fn print_error(text: &str) -> Result<()> {
    print_styled(text, Red, true)
}

pub fn print_warning(text: &str) -> Result<()> {
    print_styled(text, Yellow, true)
}

/// Generic failure notice; the detail is in the log.
pub fn print_failure(log_path: &str) -> Result<()> {
    print_error("Oh no! An error happened.")?;
    writeln!(stdout(), "See logs in: {log_path}")?;
    Ok(())
}

pub fn print_not_found(id: u64) -> Result<()> {
    print_error(&format!("Error! Command ID {id} not found."))
}

/// A boxed panel around `text`, padded by character count.
fn panel_lines(text: &str) -> Vec<String> {
    let width = text
        .lines()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let border = format!("+{}+", "-".repeat(width + 2));

    std::iter::once(border.clone())
        .chain(text.lines().map(|line| format!("| {line:<width$} |")))
        .chain(std::iter::once(border))
        .collect()
}

fn print_panel(text: &str) -> Result<()> {
    let mut stdout = stdout();
    for line in panel_lines(text) {
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_CELL_WIDTH {
        value.to_string()
    } else {
        let cut: String = value.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{cut}...")
    }
}

fn print_table<T: Display>(title: &str, headers: &[&str], rows: &[Vec<T>]) -> Result<()> {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| truncate(&cell.to_string())).collect())
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |row: &[String]| {
        row.iter()
            .zip(widths.iter())
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .join(" | ")
    };

    print_styled(title, DarkGreen, true)?;
    let header_cells: Vec<String> = headers.iter().map(ToString::to_string).collect();
    print_styled(&format_row(header_cells.as_slice()), Reset, true)?;

    let mut stdout = stdout();
    if cells.is_empty() {
        writeln!(stdout, "(nothing to show)")?;
    }
    for row in &cells {
        writeln!(stdout, "{}", format_row(row.as_slice()))?;
    }
    writeln!(stdout)?;
    Ok(())
}

pub fn print_menu_options(title: &str, options: &[MenuOption]) -> Result<()> {
    let rows: Vec<Vec<&str>> = options
        .iter()
        .map(|option| vec![option.key.as_str(), option.description.as_str()])
        .collect();
    print_table(title, &["Option", "Description"], &rows)
}

pub fn print_saved_commands(title: &str, commands: &[SavedCommand]) -> Result<()> {
    let rows: Vec<Vec<String>> = commands
        .iter()
        .map(|command| {
            vec![
                command.position.to_string(),
                command.id.to_string(),
                command.description.clone(),
                command.command_text.clone(),
            ]
        })
        .collect();
    print_table(title, &["#", "ID", "Description", "Command"], &rows)
}

/// Every field of one saved command.
pub fn print_single_command(command: &SavedCommand) -> Result<()> {
    let rows = vec![
        vec!["ID".to_string(), command.id.to_string()],
        vec!["Position".to_string(), command.position.to_string()],
        vec!["Description".to_string(), command.description.clone()],
        vec!["Command".to_string(), command.command_text.clone()],
        vec!["Date created".to_string(), command.date_created.clone()],
        vec!["Created at".to_string(), command.created_at.to_string()],
        vec!["Times called".to_string(), command.times_called.to_string()],
        vec!["Author".to_string(), command.author.clone()],
        vec!["Last edited".to_string(), command.last_edited.to_string()],
    ];
    print_table(
        &format!("COMMAND ID {}", command.id),
        &["Field", "Value"],
        &rows,
    )
}

fn options_matching(options: &[MenuOption], keep: impl Fn(MenuAction) -> bool) -> Vec<MenuOption> {
    options
        .iter()
        .filter(|option| MenuAction::from_key(&option.key).is_some_and(&keep))
        .cloned()
        .collect()
}

pub fn print_main_menu(options: &[MenuOption], summary: &[SavedCommand]) -> Result<()> {
    print_panel(MAIN_MENU_INFO)?;
    print_menu_options(
        "MENU OPTIONS",
        &options_matching(options, |action| action != MenuAction::MainMenu),
    )?;
    print_saved_commands("SAVED COMMANDS SUMMARY", summary)
}

pub fn print_saved_commands_menu(commands: &[SavedCommand]) -> Result<()> {
    print_saved_commands("SAVED COMMANDS", commands)
}

pub fn print_help_page(options: &[MenuOption]) -> Result<()> {
    print_panel(HELP_INFO)?;
    print_menu_options("ALL MENU OPTIONS AVAILABLE AT DIFFERENT STAGES", options)
}

/// The options that cancel a multi-step action, shown before it starts.
pub fn print_input_window_table(options: &[MenuOption]) -> Result<()> {
    print_menu_options(
        "OPTIONS AVAILABLE AT ANY POINT",
        &options_matching(options, MenuAction::is_global),
    )
}
