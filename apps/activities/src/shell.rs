//! Line-oriented interactive front end over the controller.

use std::io::Write;

use anyhow::Context;
use client_core::{Notice, NoticeKind};
use thiserror::Error;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::debug;
use view::{DisplayState, ListRegion};

use crate::controller::{Controller, SignupForm, UiCommand};

const COMMAND_QUEUE_CAPACITY: usize = 32;
const FETCH_QUEUE_CAPACITY: usize = 8;

pub const HELP: &str = "\
commands:
  refresh                       reload the activity directory
  show                          print the activities and the signup form
  select N                      choose activity N for the signup form
  email ADDR                    set the signup form email
  submit                        sign up with the form values
  remove CARD ROW               unregister participant ROW of activity CARD
  signup EMAIL ACTIVITY...      sign EMAIL up for ACTIVITY
  unregister EMAIL ACTIVITY...  remove EMAIL from ACTIVITY
  help                          show this help
  quit                          leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Command(UiCommand),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellParseError {
    #[error("unknown command '{0}', type 'help' for a list")]
    UnknownCommand(String),
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("'{0}' is not a position; positions start at 1")]
    InvalidPosition(String),
}

/// Parses one input line. Blank lines yield `None`. Positions typed by the
/// user are one-based and converted to zero-based here.
pub fn parse_line(line: &str) -> Result<Option<ShellInput>, ShellParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };

    let input = match head.to_ascii_lowercase().as_str() {
        "refresh" => ShellInput::Command(UiCommand::Refresh),
        "show" | "ls" => ShellInput::Show,
        "help" | "?" => ShellInput::Help,
        "quit" | "exit" => ShellInput::Quit,
        "submit" => ShellInput::Command(UiCommand::SubmitSignup),
        "select" => {
            let position = position(words.next(), "select", "an activity number")?;
            ShellInput::Command(UiCommand::SelectActivity { position })
        }
        "email" => {
            let email = words.collect::<Vec<_>>().join(" ");
            ShellInput::Command(UiCommand::EditEmail { email })
        }
        "remove" => {
            let card = position(words.next(), "remove", "an activity number")?;
            let row = position(words.next(), "remove", "a participant number")?;
            ShellInput::Command(UiCommand::UnregisterRow { card, row })
        }
        "signup" => {
            let (email, activity) = email_and_activity(words, "signup")?;
            ShellInput::Command(UiCommand::SignupRequested { activity, email })
        }
        "unregister" => {
            let (email, activity) = email_and_activity(words, "unregister")?;
            ShellInput::Command(UiCommand::UnregisterRequested { activity, email })
        }
        _ => return Err(ShellParseError::UnknownCommand(head.to_string())),
    };
    Ok(Some(input))
}

fn position(
    word: Option<&str>,
    command: &'static str,
    argument: &'static str,
) -> Result<usize, ShellParseError> {
    let word = word.ok_or(ShellParseError::MissingArgument { command, argument })?;
    match word.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(ShellParseError::InvalidPosition(word.to_string())),
    }
}

fn email_and_activity<'a>(
    mut words: impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<(String, String), ShellParseError> {
    let email = words.next().ok_or(ShellParseError::MissingArgument {
        command,
        argument: "an email",
    })?;
    let activity = words.collect::<Vec<_>>().join(" ");
    if activity.is_empty() {
        return Err(ShellParseError::MissingArgument {
            command,
            argument: "an activity name",
        });
    }
    Ok((email.to_string(), activity))
}

/// Drops control characters so directory text cannot drive the terminal.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

pub fn format_display(display: &DisplayState, form: &SignupForm) -> String {
    let mut out = String::new();
    match display.list() {
        ListRegion::Loading => {
            out.push_str(view::LOADING_MESSAGE);
            out.push('\n');
        }
        ListRegion::Failed(message) => {
            out.push_str(&sanitize(message));
            out.push('\n');
        }
        ListRegion::Activities(cards) => {
            for (index, card) in cards.iter().enumerate() {
                out.push_str(&format!("{}. {}\n", index + 1, sanitize(&card.name)));
                out.push_str(&format!("   {}\n", sanitize(&card.description)));
                out.push_str(&format!("   Schedule: {}\n", sanitize(&card.schedule)));
                out.push_str(&format!("   Availability: {}\n", card.availability()));
                if card.participants.is_empty() {
                    out.push_str("   No participants yet.\n");
                } else {
                    out.push_str("   Participants:\n");
                    for (row, participant) in card.participants.iter().enumerate() {
                        out.push_str(&format!(
                            "     {}. {}\n",
                            row + 1,
                            sanitize(&participant.email)
                        ));
                    }
                }
            }
        }
    }

    let activity = if form.activity.is_empty() {
        view::SELECT_PLACEHOLDER_LABEL.to_string()
    } else {
        sanitize(&form.activity)
    };
    out.push_str(&format!(
        "Signup form: activity={activity} email={}\n",
        sanitize(&form.email)
    ));
    out
}

fn format_notice(notice: &Notice) -> Option<String> {
    let message = notice.message()?;
    if !notice.is_visible() {
        return Some("(message dismissed)".to_string());
    }
    let label = match message.kind {
        NoticeKind::Success => "ok",
        NoticeKind::Error => "error",
    };
    Some(format!("[{label}] {}", sanitize(&message.text)))
}

fn prompt() -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "> ")?;
    stdout.flush().context("failed to flush prompt")
}

/// Parses input lines and queues them for the controller loop. Stops after
/// `quit`, at end of input, or once the loop is gone.
async fn read_commands<R>(input: R, commands: mpsc::Sender<ShellInput>) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("failed to read from stdin")? {
        match parse_line(&line) {
            Ok(None) => prompt()?,
            Ok(Some(input)) => {
                let quit = input == ShellInput::Quit;
                if commands.send(input).await.is_err() || quit {
                    break;
                }
            }
            Err(err) => {
                println!("{err}");
                prompt()?;
            }
        }
    }
    Ok(())
}

/// Runs until `quit` or end of input. Commands are handled one at a time in
/// queue order; directory fetches run in the background and are applied as
/// they complete. Notices, including their dismissal, are printed as they
/// change.
pub async fn run_shell(controller: &mut Controller) -> anyhow::Result<()> {
    let mut notices = controller.notifier().subscribe();
    let mut notices_open = true;
    let mut fetches = controller.enable_fetch_queue(FETCH_QUEUE_CAPACITY);
    let (command_tx, mut commands) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
    let reader = tokio::spawn(read_commands(BufReader::new(tokio::io::stdin()), command_tx));

    controller.handle(UiCommand::Refresh).await;

    loop {
        tokio::select! {
            input = commands.recv() => {
                match input {
                    None | Some(ShellInput::Quit) => break,
                    Some(ShellInput::Help) => println!("{HELP}"),
                    Some(ShellInput::Show) => {
                        print!("{}", format_display(controller.display(), controller.form()));
                    }
                    Some(ShellInput::Command(command)) => {
                        controller.handle(command).await;
                    }
                }
                prompt()?;
            }
            Some(completion) = fetches.recv() => {
                if controller.complete_fetch(completion) {
                    print!("{}", format_display(controller.display(), controller.form()));
                    prompt()?;
                }
            }
            changed = notices.changed(), if notices_open => {
                if changed.is_err() {
                    debug!("notifier dropped; notices no longer shown");
                    notices_open = false;
                    continue;
                }
                let notice = notices.borrow_and_update().clone();
                if let Some(text) = format_notice(&notice) {
                    println!("{text}");
                }
            }
        }
    }

    reader.await.context("stdin reader stopped unexpectedly")?
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
