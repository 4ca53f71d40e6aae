//! The in-memory task collection and its synchronization with the API.
//!
//! One store per run. Reads are served from the local copy without
//! touching the network. Mutations go to the server first and fold the
//! response into the local copy, except reorders, which apply locally
//! before the request and roll back by refetching when it fails.

use chrono::NaiveDate;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::api::{ApiClient, NewDoneEntry, NewTask, TaskPatch};
use crate::board::LaneKey;
use crate::error::Result;
use crate::types::{DoneEntry, Task};

#[derive(Debug, Default)]
struct StoreState {
    tasks: Vec<Task>,
    entries: Vec<DoneEntry>,
}

/// Authoritative client-side copy of the user's tasks and diary
/// entries.
pub struct TaskStore {
    api: ApiClient,
    state: RwLock<StoreState>,
    /// Serializes mutators over their whole span, network call
    /// included, so overlapping writes cannot interleave their server
    /// calls with their local updates. Snapshot reads never take it.
    write_gate: Mutex<()>,
}

/// Lowercase the tag; a tag that trims to nothing is no tag at all.
fn normalize_tag(raw: &str) -> Option<String> {
    let tag = raw.trim().to_lowercase();
    if tag.is_empty() {
        None
    } else {
        Some(tag)
    }
}

/// Insert keeping the slice sorted by the canonical task order. Only
/// used for freshly created tasks; a user-made order is never
/// re-sorted.
fn insert_task_canonical(tasks: &mut Vec<Task>, task: Task) {
    let at = tasks
        .iter()
        .position(|t| t.canonical_cmp(&task) == std::cmp::Ordering::Greater)
        .unwrap_or(tasks.len());
    tasks.insert(at, task);
}

fn insert_entry_canonical(entries: &mut Vec<DoneEntry>, entry: DoneEntry) {
    let at = entries
        .iter()
        .position(|e| e.canonical_cmp(&entry) == std::cmp::Ordering::Greater)
        .unwrap_or(entries.len());
    entries.insert(at, entry);
}

impl TaskStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: RwLock::new(StoreState::default()),
            write_gate: Mutex::new(()),
        }
    }

    /// Fetch tasks and diary entries together and replace the local
    /// copy wholesale.
    pub async fn load(&self) -> Result<()> {
        let _gate = self.write_gate.lock().await;
        self.refetch().await
    }

    async fn refetch(&self) -> Result<()> {
        let (tasks, entries) =
            tokio::try_join!(self.api.list_tasks(), self.api.list_entries())?;
        debug!(tasks = tasks.len(), entries = entries.len(), "collection loaded");
        let mut state = self.state.write().await;
        state.tasks = tasks;
        state.entries = entries;
        Ok(())
    }

    // ── Snapshot reads ───────────────────────────────────────────────

    /// The full task list in its current global order.
    pub async fn tasks(&self) -> Vec<Task> {
        self.state.read().await.tasks.clone()
    }

    /// All diary entries, newest day first.
    pub async fn entries(&self) -> Vec<DoneEntry> {
        self.state.read().await.entries.clone()
    }

    pub async fn find_task(&self, id: i64) -> Option<Task> {
        self.state
            .read()
            .await
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    /// Tasks in one lane, in their global relative order.
    pub async fn tasks_in_lane(&self, lane: &LaneKey) -> Vec<Task> {
        self.state
            .read()
            .await
            .tasks
            .iter()
            .filter(|t| LaneKey::for_task(t) == *lane)
            .cloned()
            .collect()
    }

    /// Diary entries recorded for one day.
    pub async fn entries_on(&self, date: NaiveDate) -> Vec<DoneEntry> {
        self.state
            .read()
            .await
            .entries
            .iter()
            .filter(|e| e.entry_date == date)
            .cloned()
            .collect()
    }

    // ── Task mutations ───────────────────────────────────────────────

    /// Create a task from user input.
    ///
    /// The text is trimmed; input that trims to nothing is dropped
    /// without a request and `Ok(None)` comes back. The created task
    /// is inserted at its canonical position, which is where the next
    /// full fetch would list it.
    pub async fn add_task(&self, text: &str, options: NewTask) -> Result<Option<Task>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let options = NewTask {
            tag: options.tag.as_deref().and_then(normalize_tag),
            scheduled_for: options.scheduled_for,
        };

        let _gate = self.write_gate.lock().await;
        let task = self.api.create_task(text, &options).await?;
        let mut state = self.state.write().await;
        insert_task_canonical(&mut state.tasks, task.clone());
        Ok(Some(task))
    }

    /// Apply a partial update. The server's representation replaces the
    /// local task in place; a failed request leaves the local copy
    /// untouched.
    pub async fn update_task(&self, id: i64, patch: &TaskPatch) -> Result<Task> {
        let mut patch = patch.clone();
        if let Some(Some(raw)) = &patch.tag {
            patch.tag = Some(normalize_tag(raw));
        }

        let _gate = self.write_gate.lock().await;
        let updated = self.api.update_task(id, &patch).await?;
        let mut state = self.state.write().await;
        if let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) {
            *task = updated.clone();
        }
        Ok(updated)
    }

    pub async fn delete_task(&self, id: i64) -> Result<()> {
        let _gate = self.write_gate.lock().await;
        self.api.delete_task(id).await?;
        let mut state = self.state.write().await;
        state.tasks.retain(|t| t.id != id);
        Ok(())
    }

    /// Persist a new global order. The only optimistic mutator: the
    /// local list is replaced before the request goes out. When the
    /// server rejects it, both lists are refetched so the local copy
    /// snaps back to what the server holds, and the reorder error is
    /// the one surfaced.
    pub async fn reorder(&self, new_order: Vec<Task>) -> Result<()> {
        let _gate = self.write_gate.lock().await;
        let task_ids: Vec<i64> = new_order.iter().map(|t| t.id).collect();
        {
            let mut state = self.state.write().await;
            state.tasks = new_order;
        }

        if let Err(error) = self.api.reorder_tasks(task_ids).await {
            if let Err(refetch_error) = self.refetch().await {
                warn!(%refetch_error, "refetch after failed reorder also failed");
            }
            return Err(error);
        }
        Ok(())
    }

    // ── Diary mutations ──────────────────────────────────────────────

    /// Record a diary entry and slot it where the next fetch would
    /// list it.
    pub async fn add_done_entry(&self, entry: &NewDoneEntry) -> Result<DoneEntry> {
        let _gate = self.write_gate.lock().await;
        let created = self.api.create_entry(entry).await?;
        let mut state = self.state.write().await;
        insert_entry_canonical(&mut state.entries, created.clone());
        Ok(created)
    }

    pub async fn delete_done_entry(&self, id: i64) -> Result<()> {
        let _gate = self.write_gate.lock().await;
        self.api.delete_entry(id).await?;
        let mut state = self.state.write().await;
        state.entries.retain(|e| e.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::CredentialStore;
    use crate::types::EntryKind;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_at(server: &MockServer, dir: &tempfile::TempDir) -> TaskStore {
        TaskStore::new(ApiClient::with_base_url(
            server.uri(),
            CredentialStore::at(dir.path().join("credentials")),
        ))
    }

    fn task_json(id: i64, text: &str, order: i64, created_at: &str) -> serde_json::Value {
        json!({
            "id": id, "text": text, "done": false, "tag": null,
            "scheduled_for": null, "order": order, "created_at": created_at
        })
    }

    async fn mount_lists(
        server: &MockServer,
        tasks: serde_json::Value,
        entries: serde_json::Value,
    ) {
        Mock::given(method("GET"))
            .and(path("/tasks/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(tasks))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tasks/done-entries/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(entries))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_load_fetches_both_lists() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&server, &dir);
        mount_lists(
            &server,
            json!([
                task_json(1, "alpha", 0, "2024-01-02T09:00:00Z"),
                {
                    "id": 2, "text": "beta", "done": false, "tag": null,
                    "scheduled_for": "2024-01-03", "order": 1,
                    "created_at": "2024-01-02T08:00:00Z"
                },
            ]),
            json!([{
                "id": 5, "entry_date": "2024-01-02", "entry_type": "done",
                "text": "shipped", "created_at": "2024-01-02T18:00:00Z"
            }]),
        )
        .await;

        store.load().await.unwrap();
        assert_eq!(store.tasks().await.len(), 2);
        assert_eq!(store.entries().await.len(), 1);

        let general = store.tasks_in_lane(&LaneKey::General).await;
        assert_eq!(general.len(), 1);
        assert_eq!(general[0].id, 1);
        let wednesday = chrono::NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let day = store.tasks_in_lane(&LaneKey::Day(wednesday)).await;
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].id, 2);
    }

    #[tokio::test]
    async fn test_whitespace_add_makes_no_request() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&server, &dir);

        Mock::given(method("POST"))
            .and(path("/tasks/"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let created = store.add_task("   \t ", NewTask::default()).await.unwrap();
        assert_eq!(created, None);
        assert!(store.tasks().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_trims_and_normalizes_tag_in_request_body() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&server, &dir);

        Mock::given(method("POST"))
            .and(path("/tasks/"))
            .and(body_json(json!({"text": "water plants", "tag": "home"})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(task_json(9, "water plants", 0, "2024-01-05T10:00:00Z")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let created = store
            .add_task("  water plants ", NewTask::default().with_tag("  HoMe "))
            .await
            .unwrap();
        assert_eq!(created.unwrap().id, 9);
    }

    #[tokio::test]
    async fn test_created_task_lands_at_canonical_position() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&server, &dir);
        mount_lists(
            &server,
            json!([
                task_json(1, "old zero", 0, "2024-01-01T09:00:00Z"),
                task_json(2, "ranked", 1, "2024-01-01T08:00:00Z"),
            ]),
            json!([]),
        )
        .await;
        store.load().await.unwrap();

        Mock::given(method("POST"))
            .and(path("/tasks/"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(task_json(3, "fresh", 0, "2024-01-05T10:00:00Z")),
            )
            .mount(&server)
            .await;

        store.add_task("fresh", NewTask::default()).await.unwrap();
        let ids: Vec<i64> = store.tasks().await.iter().map(|t| t.id).collect();
        // Newest rank-zero task sorts ahead of the older one.
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_update_failure_leaves_state_untouched() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&server, &dir);
        mount_lists(
            &server,
            json!([task_json(1, "alpha", 0, "2024-01-02T09:00:00Z")]),
            json!([]),
        )
        .await;
        store.load().await.unwrap();

        Mock::given(method("PATCH"))
            .and(path("/tasks/1/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = store
            .update_task(1, &TaskPatch::default().with_done(true))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert!(!store.tasks().await[0].done);
    }

    #[tokio::test]
    async fn test_update_replaces_task_in_place() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&server, &dir);
        mount_lists(
            &server,
            json!([
                task_json(1, "alpha", 0, "2024-01-02T09:00:00Z"),
                task_json(2, "beta", 1, "2024-01-02T08:00:00Z"),
            ]),
            json!([]),
        )
        .await;
        store.load().await.unwrap();

        Mock::given(method("PATCH"))
            .and(path("/tasks/2/"))
            .and(body_json(json!({"done": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 2, "text": "beta", "done": true, "tag": null,
                "scheduled_for": null, "order": 1, "created_at": "2024-01-02T08:00:00Z"
            })))
            .mount(&server)
            .await;

        let updated = store
            .update_task(2, &TaskPatch::default().with_done(true))
            .await
            .unwrap();
        assert!(updated.done);
        let tasks = store.tasks().await;
        assert_eq!(tasks[1].id, 2);
        assert!(tasks[1].done);
        assert!(!tasks[0].done);
    }

    #[tokio::test]
    async fn test_update_normalizes_tag_and_blank_tag_clears() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&server, &dir);

        Mock::given(method("PATCH"))
            .and(path("/tasks/1/"))
            .and(body_json(json!({"tag": "errands"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1, "text": "alpha", "done": false, "tag": "errands",
                "scheduled_for": null, "order": 0, "created_at": "2024-01-02T09:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/tasks/2/"))
            .and(body_json(json!({"tag": null})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 2, "text": "beta", "done": false, "tag": null,
                "scheduled_for": null, "order": 1, "created_at": "2024-01-02T08:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        store
            .update_task(1, &TaskPatch::default().with_tag(Some(" Errands ".into())))
            .await
            .unwrap();
        store
            .update_task(2, &TaskPatch::default().with_tag(Some("   ".into())))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_removes_locally_after_server_accepts() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&server, &dir);
        mount_lists(
            &server,
            json!([
                task_json(1, "alpha", 0, "2024-01-02T09:00:00Z"),
                task_json(2, "beta", 1, "2024-01-02T08:00:00Z"),
            ]),
            json!([]),
        )
        .await;
        store.load().await.unwrap();

        Mock::given(method("DELETE"))
            .and(path("/tasks/1/"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        store.delete_task(1).await.unwrap();
        let ids: Vec<i64> = store.tasks().await.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_reorder_success_keeps_optimistic_order() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&server, &dir);
        mount_lists(
            &server,
            json!([
                task_json(1, "alpha", 0, "2024-01-02T09:00:00Z"),
                task_json(2, "beta", 1, "2024-01-02T08:00:00Z"),
            ]),
            json!([]),
        )
        .await;
        store.load().await.unwrap();

        Mock::given(method("POST"))
            .and(path("/tasks/reorder/"))
            .and(body_json(json!({"task_ids": [2, 1]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let mut reversed = store.tasks().await;
        reversed.reverse();
        store.reorder(reversed).await.unwrap();
        let ids: Vec<i64> = store.tasks().await.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_reorder_failure_rolls_back_by_refetching() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&server, &dir);
        mount_lists(
            &server,
            json!([
                task_json(1, "alpha", 0, "2024-01-02T09:00:00Z"),
                task_json(2, "beta", 1, "2024-01-02T08:00:00Z"),
            ]),
            json!([]),
        )
        .await;
        store.load().await.unwrap();

        Mock::given(method("POST"))
            .and(path("/tasks/reorder/"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"error": "Some task IDs are invalid"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut reversed = store.tasks().await;
        reversed.reverse();
        let err = store.reorder(reversed).await.unwrap_err();
        assert!(err.to_string().contains("Some task IDs are invalid"));
        // The rollback refetch restored the server's order.
        let ids: Vec<i64> = store.tasks().await.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_diary_entry_roundtrip() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&server, &dir);
        mount_lists(
            &server,
            json!([]),
            json!([{
                "id": 5, "entry_date": "2024-01-02", "entry_type": "done",
                "text": "shipped", "created_at": "2024-01-02T18:00:00Z"
            }]),
        )
        .await;
        store.load().await.unwrap();

        Mock::given(method("POST"))
            .and(path("/tasks/done-entries/"))
            .and(body_json(json!({
                "entry_date": "2024-01-03", "entry_type": "learned", "text": "tokio locks"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 6, "entry_date": "2024-01-03", "entry_type": "learned",
                "text": "tokio locks", "created_at": "2024-01-03T18:00:00Z"
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/tasks/done-entries/5/"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let entry = NewDoneEntry {
            entry_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            kind: EntryKind::Learned,
            text: "tokio locks".into(),
        };
        let created = store.add_done_entry(&entry).await.unwrap();
        assert_eq!(created.id, 6);
        // Newer day sorts first.
        let ids: Vec<i64> = store.entries().await.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![6, 5]);

        store.delete_done_entry(5).await.unwrap();
        let ids: Vec<i64> = store.entries().await.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![6]);
        assert_eq!(
            store
                .entries_on(chrono::NaiveDate::from_ymd_opt(2024, 1, 3).unwrap())
                .await
                .len(),
            1
        );
    }
}
