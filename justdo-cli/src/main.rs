//! JustDo CLI - weekly task board client.
//!
//! Commands:
//! - `justdo` (no args): show the current week's board
//! - `justdo register` / `login` / `logout` / `whoami`: session lifecycle
//! - `justdo board [--week DATE] [--json]`: the week view
//! - `justdo day [DATE]`: one day's tasks
//! - `justdo add/done/undone/edit/rm/move`: task mutations
//! - `justdo diary add/list/rm`: the done/learned diary
//! - `justdo theme [light|dark]`: color preference
//!
//! Exit codes: 0 success, 1 error.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;

use cli::{Cli, Commands, DiaryCommands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("justdo=debug,justdo_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = dispatch_command(cli).await;
    std::process::exit(exit_code);
}

/// Dispatch a parsed CLI to the appropriate command handler. Bare
/// `justdo` shows the current week's board.
async fn dispatch_command(cli: Cli) -> i32 {
    match cli.command {
        Some(command) => dispatch_subcommand(command).await,
        None => result_to_exit(commands::board::board(None, false).await),
    }
}

async fn dispatch_subcommand(command: Commands) -> i32 {
    match command {
        Commands::Register => result_to_exit(commands::auth::register().await),
        Commands::Login => result_to_exit(commands::auth::login().await),
        Commands::Logout => result_to_exit(commands::auth::logout()),
        Commands::Whoami => result_to_exit(commands::auth::whoami().await),
        Commands::Board { week, json } => result_to_exit(commands::board::board(week, json).await),
        Commands::Day { date } => result_to_exit(commands::board::day(date).await),
        Commands::Add { text, on, tag } => result_to_exit(commands::tasks::add(text, on, tag).await),
        Commands::Done { id } => result_to_exit(commands::tasks::set_done(id, true).await),
        Commands::Undone { id } => result_to_exit(commands::tasks::set_done(id, false).await),
        Commands::Edit {
            id,
            text,
            tag,
            clear_tag,
            on,
            unschedule,
        } => result_to_exit(commands::tasks::edit(id, text, tag, clear_tag, on, unschedule).await),
        Commands::Rm { id } => result_to_exit(commands::tasks::rm(id).await),
        Commands::Move {
            id,
            to,
            before,
            week,
        } => result_to_exit(commands::tasks::move_task(id, to, before, week).await),
        Commands::Diary(diary) => match diary {
            DiaryCommands::Add { text, kind, date } => {
                result_to_exit(commands::diary::add(text, kind, date).await)
            }
            DiaryCommands::List { date } => result_to_exit(commands::diary::list(date).await),
            DiaryCommands::Rm { id } => result_to_exit(commands::diary::rm(id).await),
        },
        Commands::Theme { mode } => result_to_exit(commands::theme::run(mode)),
    }
}

/// Convert a `Result<(), E: Display>` to an exit code.
fn result_to_exit<E: std::fmt::Display>(result: Result<(), E>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}
