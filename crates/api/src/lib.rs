//! Shared API types for the taskdeck backend.
//!
//! This crate is the single source of truth for all request/response shapes
//! exchanged with the REST API, and the one place where tolerant wire records
//! are normalized into the canonical [`taskdeck_core::Task`] model. Backends
//! in the wild disagree on field naming (`id` vs `_id`, `completed` vs
//! `is_completed`) and on list pagination; all of that is absorbed here so
//! the core never sees an open/dynamic map.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use taskdeck_core::{Priority, Task};

// ─── Auth ────────────────────────────────────────────────────────────────────

/// Username + password login, `POST /api/token/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned on successful login: a JWT access/refresh pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

/// Refresh request, `POST /api/token/refresh/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Returned on successful refresh: a new access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access: String,
}

// ─── Tasks ───────────────────────────────────────────────────────────────────

/// Raw task record as the backend serializes it.
///
/// Tolerant on input: `_id` for `id` (integer or string), `is_completed` for
/// `completed`, and due dates that carry a time suffix. Normalization into
/// the canonical model happens in [`TaskRecord::into_task`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(alias = "_id", deserialize_with = "deserialize_task_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, alias = "is_completed")]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl TaskRecord {
    /// Normalize into the canonical core shape: string id, day-granularity
    /// due date, lowercased priority enum (unknown values become `None`).
    pub fn into_task(self) -> Task {
        Task {
            id: self.id,
            title: self.title,
            due_date: self.due_date.as_deref().and_then(parse_due_date),
            priority: self.priority.as_deref().and_then(Priority::parse),
            completed: self.completed,
        }
    }
}

/// Parse an ISO due date, dropping any `T…` time component: the backend
/// stores a date but some serializers emit a full timestamp.
fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTaskId {
    Int(i64),
    Str(String),
}

fn deserialize_task_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match RawTaskId::deserialize(deserializer)? {
        RawTaskId::Int(n) => Ok(n.to_string()),
        RawTaskId::Str(s) => Ok(s),
    }
}

/// `GET /api/tasks/` returns either a bare array or a DRF-paginated page.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TaskListResponse {
    Paginated {
        results: Vec<TaskRecord>,
        #[serde(default)]
        count: Option<u64>,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
    },
    Plain(Vec<TaskRecord>),
}

impl TaskListResponse {
    pub fn into_records(self) -> Vec<TaskRecord> {
        match self {
            Self::Plain(records) => records,
            Self::Paginated { results, .. } => results,
        }
    }
}

/// Request body for `POST /api/tasks/`. `due_date` serializes as `null`
/// when absent, matching the original client.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub due_date: Option<String>,
    pub priority: String,
}

/// Request body for `PATCH /api/tasks/<id>/`.
///
/// The original client always patches the full title/due_date/priority
/// payload (re-encoding the folder tag), adding `completed` only when
/// toggling status; this mirrors that.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateTaskRequest {
    pub title: String,
    pub due_date: Option<String>,
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// DRF error body, `{ "detail": "..." }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}
