use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task priority. Unknown or missing priorities are represented as `None`
/// on [`Task`] and score 0 when ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Case-insensitive parse; anything outside the three known levels is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Numeric rank used for sort ordering: high=3 > medium=2 > low=1.
    pub fn score(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority '{0}' (expected low, medium or high)")]
pub struct ParsePriorityError(pub String);

impl std::str::FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParsePriorityError(s.to_string()))
    }
}

/// Canonical task shape the core operates on.
///
/// The backend owns the authoritative record; this is the normalized copy
/// produced at the wire boundary. Integer ids are normalized to strings,
/// field-name variants (`_id`, `is_completed`) are resolved before a record
/// becomes a `Task`, and due dates are held at day granularity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub completed: bool,
}

impl Task {
    /// Score of this task's priority (0 when unset).
    pub fn priority_score(&self) -> u8 {
        self.priority.map_or(0, |p| p.score())
    }

    /// A task is overdue iff it is incomplete and its due date is strictly
    /// before the start of the given day.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < today)
    }
}

/// Start of the current day in local time.
///
/// Comparing `NaiveDate`s at day granularity is equivalent to the original
/// client's midnight-normalized `Date` comparison: a task due today is never
/// overdue. Callers snapshot this once per operation.
pub fn start_of_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
