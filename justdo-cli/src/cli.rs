//! CLI definition for the justdo command-line interface.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use justdo::{EntryKind, LaneKey};

use crate::config::ColorMode;

/// JustDo - a weekly task board in the terminal
///
/// Tasks live in a general lane or on a calendar day; one global order
/// runs through all of them.
#[derive(Parser, Debug)]
#[command(name = "justdo")]
#[command(version)]
#[command(about = "Weekly task board client")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account and log in
    Register,
    /// Log in and store the session token
    Login,
    /// Forget the stored session token
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Show the week board (the default when no command is given)
    Board {
        /// Any date inside the week to show (defaults to today)
        #[arg(long, value_name = "DATE")]
        week: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List one day's tasks
    Day {
        /// The day to list (defaults to today)
        date: Option<NaiveDate>,
    },
    /// Add a task
    Add {
        /// Task text
        #[arg(required = true)]
        text: Vec<String>,
        /// Schedule on a day; lands in the general lane otherwise
        #[arg(long, value_name = "DATE")]
        on: Option<NaiveDate>,
        /// Tag label
        #[arg(long)]
        tag: Option<String>,
    },
    /// Mark a task done
    Done {
        /// Task id
        id: i64,
    },
    /// Mark a task not done
    Undone {
        /// Task id
        id: i64,
    },
    /// Edit a task
    Edit {
        /// Task id
        id: i64,
        /// New text; whitespace-only or unchanged text is ignored
        #[arg(long)]
        text: Option<String>,
        /// New tag
        #[arg(long, conflicts_with = "clear_tag")]
        tag: Option<String>,
        /// Remove the tag
        #[arg(long)]
        clear_tag: bool,
        /// Move to a day
        #[arg(long, value_name = "DATE", conflicts_with = "unschedule")]
        on: Option<NaiveDate>,
        /// Move back to the general lane
        #[arg(long)]
        unschedule: bool,
    },
    /// Delete a task
    Rm {
        /// Task id
        id: i64,
    },
    /// Move a task to a position on the board
    Move {
        /// Task id
        id: i64,
        /// Destination lane: 'general' or a date (YYYY-MM-DD)
        #[arg(long, value_name = "LANE")]
        to: LaneKey,
        /// Insert in front of this task; end of the lane otherwise
        #[arg(long, value_name = "ID")]
        before: Option<i64>,
        /// Week the board is laid out around (defaults to today's)
        #[arg(long, value_name = "DATE")]
        week: Option<NaiveDate>,
    },
    /// Record and browse the done/learned diary
    #[command(subcommand)]
    Diary(DiaryCommands),
    /// Show or set the color theme
    Theme {
        /// light or dark; prints the current theme when omitted
        #[arg(value_enum)]
        mode: Option<ColorMode>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DiaryCommands {
    /// Record an entry
    Add {
        /// Entry text
        #[arg(required = true)]
        text: Vec<String>,
        /// done or learned
        #[arg(long, default_value_t = EntryKind::Done)]
        kind: EntryKind,
        /// Entry day (defaults to today)
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
    },
    /// List entries grouped by day, newest first
    List {
        /// Only this day
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
    },
    /// Delete an entry
    Rm {
        /// Entry id
        id: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bare_invocation_has_no_command() {
        let cli = parse(&["justdo"]);
        assert!(cli.command.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn test_board_with_week_and_json() {
        let cli = parse(&["justdo", "board", "--week", "2024-01-03", "--json"]);
        match cli.command {
            Some(Commands::Board { week, json }) => {
                assert_eq!(week, Some(day(2024, 1, 3)));
                assert!(json);
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_day_date_is_optional() {
        let cli = parse(&["justdo", "day"]);
        assert!(matches!(cli.command, Some(Commands::Day { date: None })));

        let cli = parse(&["justdo", "day", "2024-01-05"]);
        match cli.command {
            Some(Commands::Day { date }) => assert_eq!(date, Some(day(2024, 1, 5))),
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_add_collects_multiword_text() {
        let cli = parse(&[
            "justdo", "add", "water", "the", "plants", "--on", "2024-01-05", "--tag", "Home",
        ]);
        match cli.command {
            Some(Commands::Add { text, on, tag }) => {
                assert_eq!(text.join(" "), "water the plants");
                assert_eq!(on, Some(day(2024, 1, 5)));
                assert_eq!(tag.as_deref(), Some("Home"));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_add_requires_text() {
        assert!(Cli::try_parse_from(["justdo", "add"]).is_err());
    }

    #[test]
    fn test_move_parses_general_and_date_lanes() {
        let cli = parse(&["justdo", "move", "7", "--to", "general"]);
        match cli.command {
            Some(Commands::Move { id, to, before, .. }) => {
                assert_eq!(id, 7);
                assert_eq!(to, LaneKey::General);
                assert_eq!(before, None);
            }
            other => panic!("unexpected parse: {other:?}"),
        }

        let cli = parse(&["justdo", "move", "7", "--to", "2024-01-03", "--before", "2"]);
        match cli.command {
            Some(Commands::Move { to, before, .. }) => {
                assert_eq!(to, LaneKey::Day(day(2024, 1, 3)));
                assert_eq!(before, Some(2));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_move_rejects_bad_lane() {
        assert!(Cli::try_parse_from(["justdo", "move", "7", "--to", "someday"]).is_err());
    }

    #[test]
    fn test_edit_tag_conflicts_with_clear_tag() {
        assert!(Cli::try_parse_from([
            "justdo", "edit", "3", "--tag", "home", "--clear-tag"
        ])
        .is_err());
        assert!(Cli::try_parse_from([
            "justdo",
            "edit",
            "3",
            "--on",
            "2024-01-05",
            "--unschedule"
        ])
        .is_err());
    }

    #[test]
    fn test_auth_commands_parse() {
        assert!(matches!(parse(&["justdo", "register"]).command, Some(Commands::Register)));
        assert!(matches!(parse(&["justdo", "login"]).command, Some(Commands::Login)));
        assert!(matches!(parse(&["justdo", "logout"]).command, Some(Commands::Logout)));
        assert!(matches!(parse(&["justdo", "whoami"]).command, Some(Commands::Whoami)));
    }

    #[test]
    fn test_id_commands_take_a_task_id() {
        assert!(matches!(
            parse(&["justdo", "done", "3"]).command,
            Some(Commands::Done { id: 3 })
        ));
        assert!(matches!(
            parse(&["justdo", "undone", "3"]).command,
            Some(Commands::Undone { id: 3 })
        ));
        assert!(matches!(
            parse(&["justdo", "rm", "9"]).command,
            Some(Commands::Rm { id: 9 })
        ));
        assert!(matches!(
            parse(&["justdo", "diary", "rm", "4"]).command,
            Some(Commands::Diary(DiaryCommands::Rm { id: 4 }))
        ));
        assert!(Cli::try_parse_from(["justdo", "done", "soon"]).is_err());
    }

    #[test]
    fn test_diary_list_date_filter() {
        assert!(matches!(
            parse(&["justdo", "diary", "list"]).command,
            Some(Commands::Diary(DiaryCommands::List { date: None }))
        ));
        match parse(&["justdo", "diary", "list", "--date", "2024-01-05"]).command {
            Some(Commands::Diary(DiaryCommands::List { date })) => {
                assert_eq!(date, Some(day(2024, 1, 5)));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_diary_add_defaults_to_done_kind() {
        let cli = parse(&["justdo", "diary", "add", "shipped", "the", "thing"]);
        match cli.command {
            Some(Commands::Diary(DiaryCommands::Add { kind, date, text })) => {
                assert_eq!(kind, EntryKind::Done);
                assert_eq!(date, None);
                assert_eq!(text.join(" "), "shipped the thing");
            }
            other => panic!("unexpected parse: {other:?}"),
        }

        let cli = parse(&[
            "justdo", "diary", "add", "lifetimes", "--kind", "learned", "--date", "2024-01-05",
        ]);
        match cli.command {
            Some(Commands::Diary(DiaryCommands::Add { kind, date, .. })) => {
                assert_eq!(kind, EntryKind::Learned);
                assert_eq!(date, Some(day(2024, 1, 5)));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_theme_parses_mode_or_nothing() {
        let cli = parse(&["justdo", "theme"]);
        assert!(matches!(cli.command, Some(Commands::Theme { mode: None })));

        let cli = parse(&["justdo", "theme", "light"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Theme {
                mode: Some(ColorMode::Light)
            })
        ));

        assert!(Cli::try_parse_from(["justdo", "theme", "sepia"]).is_err());
    }

    #[test]
    fn test_debug_flag_is_global() {
        let cli = parse(&["justdo", "board", "--debug"]);
        assert!(cli.debug);
    }
}
