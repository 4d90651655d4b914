use super::*;

use client_core::Notifier;
use shared::domain::{Activity, ActivityDirectory};
use view::render;

fn chess_club() -> ActivityDirectory {
    let mut directory = ActivityDirectory::new();
    directory.insert(
        "Chess Club",
        Activity {
            description: "Learn strategies\u{1b}[2J".into(),
            schedule: "Fridays, 3:30 PM - 5:00 PM".into(),
            max_participants: 12,
            participants: vec!["michael@mergington.edu".into()],
        },
    );
    directory.insert(
        "Art Club",
        Activity {
            description: "Paint".into(),
            schedule: "Thursdays".into(),
            max_participants: 5,
            participants: vec![],
        },
    );
    directory
}

#[test]
fn positions_are_one_based() {
    assert_eq!(
        parse_line("select 2"),
        Ok(Some(ShellInput::Command(UiCommand::SelectActivity { position: 1 })))
    );
    assert_eq!(
        parse_line("remove 1 3"),
        Ok(Some(ShellInput::Command(UiCommand::UnregisterRow { card: 0, row: 2 })))
    );
    assert_eq!(
        parse_line("select 0"),
        Err(ShellParseError::InvalidPosition("0".into()))
    );
    assert_eq!(
        parse_line("remove 1"),
        Err(ShellParseError::MissingArgument {
            command: "remove",
            argument: "a participant number",
        })
    );
}

#[test]
fn activity_names_may_contain_spaces() {
    assert_eq!(
        parse_line("signup ada@example.com Chess Club"),
        Ok(Some(ShellInput::Command(UiCommand::SignupRequested {
            activity: "Chess Club".into(),
            email: "ada@example.com".into(),
        })))
    );
    assert_eq!(
        parse_line("unregister ada@example.com"),
        Err(ShellParseError::MissingArgument {
            command: "unregister",
            argument: "an activity name",
        })
    );
}

#[test]
fn blank_and_unknown_lines() {
    assert_eq!(parse_line("   "), Ok(None));
    assert_eq!(parse_line("QUIT"), Ok(Some(ShellInput::Quit)));
    assert_eq!(parse_line("show"), Ok(Some(ShellInput::Show)));
    assert_eq!(
        parse_line("dance"),
        Err(ShellParseError::UnknownCommand("dance".into()))
    );
}

#[test]
fn email_keeps_the_rest_of_the_line() {
    assert_eq!(
        parse_line("email ada@example.com"),
        Ok(Some(ShellInput::Command(UiCommand::EditEmail {
            email: "ada@example.com".into()
        })))
    );
    assert_eq!(
        parse_line("email"),
        Ok(Some(ShellInput::Command(UiCommand::EditEmail {
            email: String::new()
        })))
    );
}

#[test]
fn display_lists_cards_in_order_without_control_characters() {
    let mut display = DisplayState::default();
    display.replace(render(&chess_club()));
    let form = SignupForm {
        activity: "Art Club".into(),
        email: "ada@example.com".into(),
    };

    let text = format_display(&display, &form);
    let chess = text.find("1. Chess Club").expect("chess card");
    let art = text.find("2. Art Club").expect("art card");
    assert!(chess < art);
    assert!(text.contains("Availability: 11 spots left"));
    assert!(text.contains("1. michael@mergington.edu"));
    assert!(text.contains("No participants yet."));
    assert!(text.contains("activity=Art Club email=ada@example.com"));
    assert!(!text.contains('\u{1b}'));
}

#[test]
fn display_before_first_fetch_and_after_failure() {
    let mut display = DisplayState::default();
    let text = format_display(&display, &SignupForm::default());
    assert!(text.starts_with(view::LOADING_MESSAGE));
    assert!(text.contains(view::SELECT_PLACEHOLDER_LABEL));

    display.fail_list(view::FETCH_FAILURE_MESSAGE);
    let text = format_display(&display, &SignupForm::default());
    assert!(text.starts_with(view::FETCH_FAILURE_MESSAGE));
}

#[tokio::test(start_paused = true)]
async fn notice_lines_follow_visibility() {
    let notifier = Notifier::new();
    assert_eq!(format_notice(&notifier.current()), None);

    notifier.notify("Signed up ada@example.com for Chess Club", NoticeKind::Success);
    assert_eq!(
        format_notice(&notifier.current()).as_deref(),
        Some("[ok] Signed up ada@example.com for Chess Club")
    );

    tokio::time::sleep(client_core::NOTICE_DISMISS_AFTER + std::time::Duration::from_millis(1))
        .await;
    assert_eq!(
        format_notice(&notifier.current()).as_deref(),
        Some("(message dismissed)")
    );
}

#[tokio::test]
async fn reader_queues_commands_until_quit() {
    let (tx, mut rx) = tokio::sync::mpsc::channel(8);
    let input: &[u8] = b"select 1\n\ndance\nquit\nrefresh\n";

    read_commands(input, tx).await.expect("read");

    assert_eq!(
        rx.recv().await,
        Some(ShellInput::Command(UiCommand::SelectActivity { position: 0 }))
    );
    assert_eq!(rx.recv().await, Some(ShellInput::Quit));
    assert_eq!(rx.recv().await, None);
}
