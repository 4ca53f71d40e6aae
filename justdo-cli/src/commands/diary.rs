//! Diary commands: the record of things done and learned, day by day.

use chrono::NaiveDate;

use justdo::board::entries_by_day;
use justdo::{ApiError, DoneEntry, EntryKind, NewDoneEntry};

/// Record an entry.
pub async fn add(text: Vec<String>, kind: EntryKind, date: Option<NaiveDate>) -> Result<(), ApiError> {
    let (_user, store) = super::open_board().await?;
    let entry = NewDoneEntry {
        entry_date: date.unwrap_or_else(super::today),
        kind,
        text: text.join(" "),
    };
    let created = store.add_done_entry(&entry).await?;
    println!(
        "Recorded {} entry #{} for {}.",
        created.kind, created.id, created.entry_date
    );
    Ok(())
}

/// List entries grouped by day, newest first.
pub async fn list(date: Option<NaiveDate>) -> Result<(), ApiError> {
    let (_user, store) = super::open_board().await?;

    match date {
        Some(date) => {
            let on_day = store.entries_on(date).await;
            if on_day.is_empty() {
                println!("No entries on {date}.");
                return Ok(());
            }
            print_day(date, &on_day);
        }
        None => {
            let entries = store.entries().await;
            if entries.is_empty() {
                println!("No diary entries yet.");
                return Ok(());
            }
            for (date, group) in entries_by_day(&entries) {
                print_day(date, &group);
            }
        }
    }
    Ok(())
}

/// Delete an entry.
pub async fn rm(id: i64) -> Result<(), ApiError> {
    let (_user, store) = super::open_board().await?;
    store.delete_done_entry(id).await?;
    println!("Deleted entry #{id}.");
    Ok(())
}

fn print_day(date: NaiveDate, entries: &[DoneEntry]) {
    println!("{}", date.format("%A, %B %-d, %Y"));
    for entry in entries {
        println!("  #{} [{}] {}", entry.id, entry.kind, entry.text);
    }
}
