//! The week board and single-day views.

use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, Table};
use serde_json::json;

use justdo::board::DateGroup;
use justdo::{ApiError, BoardView, LaneKey, Task, User, Week};

use crate::config::{ColorMode, Preferences};

/// Show the week board.
pub async fn board(week_anchor: Option<NaiveDate>, json_output: bool) -> Result<(), ApiError> {
    let (user, store) = super::open_board().await?;
    let week = match week_anchor {
        Some(date) => Week::containing(date),
        None => Week::current(),
    };
    let view = BoardView::build(&store.tasks().await, week);

    if json_output {
        return print_json(&user, &view);
    }

    let accent = accent_color(Preferences::load().color_mode);

    println!(
        "{} · {} pending    {}",
        user.username,
        view.pending_count(),
        view.week.label()
    );
    println!();

    render_lane("GENERAL", &view.general, accent);
    for group in &view.days {
        let title = group.date.format("%a %b %-d").to_string().to_uppercase();
        render_lane(&title, &group.tasks, accent);
    }
    render_collapsed("HISTORY", &view.history);
    render_collapsed("LATER", &view.later);
    Ok(())
}

/// List one day's tasks.
pub async fn day(date: Option<NaiveDate>) -> Result<(), ApiError> {
    let (user, store) = super::open_board().await?;
    let date = date.unwrap_or_else(super::today);
    let tasks = store.tasks_in_lane(&LaneKey::Day(date)).await;

    println!("{} · {}", user.username, date.format("%A, %B %-d, %Y"));
    if tasks.is_empty() {
        println!("No tasks on this day.");
        return Ok(());
    }
    let accent = accent_color(Preferences::load().color_mode);
    println!("{}", task_table(&tasks, accent));
    Ok(())
}

fn print_json(user: &User, view: &BoardView) -> Result<(), ApiError> {
    let groups = |groups: &[DateGroup]| -> Vec<serde_json::Value> {
        groups
            .iter()
            .map(|g| json!({"date": g.date, "tasks": &g.tasks}))
            .collect()
    };
    let output = json!({
        "user": user,
        "week": {
            "start": view.week.start(),
            "end": view.week.end(),
            "label": view.week.label(),
        },
        "pending": view.pending_count(),
        "general": &view.general,
        "days": groups(&view.days),
        "history": groups(&view.history),
        "later": groups(&view.later),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn accent_color(mode: ColorMode) -> Color {
    match mode {
        ColorMode::Dark => Color::Cyan,
        ColorMode::Light => Color::Blue,
    }
}

fn render_lane(title: &str, tasks: &[Task], accent: Color) {
    if tasks.is_empty() {
        println!("{title}");
        return;
    }
    println!("{title}");
    println!("{}", task_table(tasks, accent));
}

/// History and later stay collapsed to per-day counts.
fn render_collapsed(title: &str, groups: &[DateGroup]) {
    if groups.is_empty() {
        return;
    }
    println!("{title}");
    for group in groups {
        println!("  {} · {}", group.date, count_label(group.tasks.len()));
    }
    println!();
}

fn count_label(count: usize) -> String {
    if count == 1 {
        "1 task".to_string()
    } else {
        format!("{count} tasks")
    }
}

fn task_table(tasks: &[Task], accent: Color) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("ID").fg(accent),
        Cell::new("Task").fg(accent),
        Cell::new("Tag").fg(accent),
    ]);
    for task in tasks {
        let mut text = Cell::new(&task.text);
        if task.done {
            text = text
                .add_attribute(Attribute::CrossedOut)
                .add_attribute(Attribute::Dim);
        }
        table.add_row(vec![
            Cell::new(task.id),
            text,
            Cell::new(task.tag.as_deref().unwrap_or("")),
        ]);
    }
    table
}
