use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{DirectoryClient, Notifier};
use view::markup;

mod config;
mod controller;
mod shell;

use controller::{Controller, UiCommand};

#[derive(Parser, Debug)]
#[command(name = "activities", about = "Browse and manage extracurricular activity rosters")]
struct Cli {
    /// Base URL of the activity directory service.
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every activity with its roster.
    List,
    Signup {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
    Unregister {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
    /// Render the activities page as HTML.
    Page {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Interactive session (the default).
    Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut settings = config::load_settings(cli.config.as_deref())?;
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(server_url = %settings.server_url, "settings loaded");

    let client = DirectoryClient::with_timeout(&settings.server_url, settings.request_timeout())
        .context("failed to set up directory client")?;
    let mut controller = Controller::new(Arc::new(client), Notifier::new());

    match cli.command.unwrap_or(Command::Shell) {
        Command::List => {
            controller.handle(UiCommand::Refresh).await;
            print!(
                "{}",
                shell::format_display(controller.display(), controller.form())
            );
            if controller.snapshot().is_none() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Signup { activity, email } => {
            let outcome = controller.signup(&activity, &email).await;
            return Ok(report(outcome.ok, &outcome.message));
        }
        Command::Unregister { activity, email } => {
            let outcome = controller.unregister(&activity, &email).await;
            return Ok(report(outcome.ok, &outcome.message));
        }
        Command::Page { out } => {
            controller.handle(UiCommand::Refresh).await;
            let form = controller.form();
            let html = markup::page(
                controller.display(),
                markup::FormValues {
                    activity: &form.activity,
                    email: &form.email,
                },
                &controller.notifier().current(),
            )
            .context("failed to render page")?;
            match out {
                Some(path) => tokio::fs::write(&path, html)
                    .await
                    .with_context(|| format!("failed to write '{}'", path.display()))?,
                None => print!("{html}"),
            }
        }
        Command::Shell => shell::run_shell(&mut controller).await?,
    }

    Ok(ExitCode::SUCCESS)
}

fn report(ok: bool, message: &str) -> ExitCode {
    let message = shell::sanitize(message);
    if ok {
        println!("{message}");
        ExitCode::SUCCESS
    } else {
        eprintln!("{message}");
        ExitCode::FAILURE
    }
}
