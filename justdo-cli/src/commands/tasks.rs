//! Task mutation commands: add, done/undone, edit, rm, move.

use chrono::NaiveDate;

use justdo::{reorder_by_move, ApiError, LaneKey, MoveRequest, NewTask, TaskPatch, Week};

/// Add a task, optionally scheduled and tagged.
pub async fn add(text: Vec<String>, on: Option<NaiveDate>, tag: Option<String>) -> Result<(), ApiError> {
    let (_user, store) = super::open_board().await?;

    let mut options = NewTask::default();
    if let Some(date) = on {
        options = options.with_scheduled_for(date);
    }
    if let Some(tag) = tag {
        options = options.with_tag(tag);
    }

    match store.add_task(&text.join(" "), options).await? {
        Some(task) => match task.scheduled_for {
            Some(date) => println!("Added #{} on {}: {}", task.id, date, task.text),
            None => println!("Added #{}: {}", task.id, task.text),
        },
        None => println!("Nothing to add."),
    }
    Ok(())
}

/// Flip the completion flag.
pub async fn set_done(id: i64, done: bool) -> Result<(), ApiError> {
    let (_user, store) = super::open_board().await?;
    let task = store
        .update_task(id, &TaskPatch::default().with_done(done))
        .await?;
    if done {
        println!("Done: {}", task.text);
    } else {
        println!("Reopened: {}", task.text);
    }
    Ok(())
}

/// Edit text, tag, or schedule. Text that trims to nothing or matches
/// the current text is dropped; a patch with nothing left makes no
/// request at all.
pub async fn edit(
    id: i64,
    text: Option<String>,
    tag: Option<String>,
    clear_tag: bool,
    on: Option<NaiveDate>,
    unschedule: bool,
) -> Result<(), ApiError> {
    let (_user, store) = super::open_board().await?;
    let current = store
        .find_task(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("no task with id {id}")))?;

    let mut patch = TaskPatch::default();
    if let Some(text) = text {
        let trimmed = text.trim();
        if !trimmed.is_empty() && trimmed != current.text {
            patch = patch.with_text(trimmed);
        }
    }
    if clear_tag {
        patch = patch.with_tag(None);
    } else if let Some(tag) = tag {
        patch = patch.with_tag(Some(tag));
    }
    if unschedule {
        patch = patch.with_scheduled_for(None);
    } else if let Some(date) = on {
        patch = patch.with_scheduled_for(Some(date));
    }

    if patch.is_empty() {
        println!("Nothing to change.");
        return Ok(());
    }
    let task = store.update_task(id, &patch).await?;
    println!("Updated #{}.", task.id);
    Ok(())
}

/// Delete a task.
pub async fn rm(id: i64) -> Result<(), ApiError> {
    let (_user, store) = super::open_board().await?;
    store.delete_task(id).await?;
    println!("Deleted #{id}.");
    Ok(())
}

/// Move a task to a lane position: patch its schedule first when the
/// lane changes, then recompute the global order and persist it.
pub async fn move_task(
    id: i64,
    to: LaneKey,
    before: Option<i64>,
    week_anchor: Option<NaiveDate>,
) -> Result<(), ApiError> {
    let (_user, store) = super::open_board().await?;
    let week = match week_anchor {
        Some(date) => Week::containing(date),
        None => Week::current(),
    };

    let task = store
        .find_task(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("no task with id {id}")))?;
    if LaneKey::for_task(&task) != to {
        store
            .update_task(id, &TaskPatch::default().with_scheduled_for(to.scheduled_for()))
            .await?;
    }

    let tasks = store.tasks().await;
    let request = MoveRequest {
        task_id: id,
        target_lane: to,
        before_id: before,
    };
    let new_order = reorder_by_move(&tasks, &week, &request);
    store.reorder(new_order).await?;

    println!("Moved #{id} to {to}.");
    Ok(())
}
