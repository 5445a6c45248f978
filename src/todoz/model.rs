use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A single todo record.
///
/// Field names follow the durable storage format (see [`crate::schema`]); the
/// Rust side keeps dates as `DateTime<Utc>` and only the schema layer knows
/// about their string encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date_created: DateTime<Utc>,
    pub is_done: bool,
    pub date_deleted: Option<DateTime<Utc>>,
    pub date_marked_as_to_be_done_today: Option<DateTime<Utc>>,
    pub number_of_times_marked_as_to_be_done_today: u32,
}

impl Todo {
    pub fn new(title: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            description: String::new(),
            date_created: Utc::now(),
            is_done: false,
            date_deleted: None,
            date_marked_as_to_be_done_today: None,
            number_of_times_marked_as_to_be_done_today: 0,
        }
    }

    /// A new todo that starts out in the today bucket, counted as its first
    /// time being marked for today.
    pub fn new_for_today(title: String, now: DateTime<Utc>) -> Self {
        Self {
            date_created: now,
            date_marked_as_to_be_done_today: Some(now),
            number_of_times_marked_as_to_be_done_today: 1,
            ..Self::new(title)
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.date_deleted.is_some()
    }

    /// Whether the today mark falls on the same calendar day as `now`, in
    /// `now`'s timezone. A mark from a previous day does not count.
    pub fn is_marked_for<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        match self.date_marked_as_to_be_done_today {
            Some(marked) => {
                marked.with_timezone(&now.timezone()).date_naive() == now.date_naive()
            }
            None => false,
        }
    }
}

/// The five named views a client can select between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    #[default]
    Today,
    Backlog,
    All,
    Done,
    Deleted,
}

impl FilterType {
    pub fn all() -> &'static [FilterType] {
        &[
            FilterType::Today,
            FilterType::Backlog,
            FilterType::All,
            FilterType::Done,
            FilterType::Deleted,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::Today => "today",
            FilterType::Backlog => "backlog",
            FilterType::All => "all",
            FilterType::Done => "done",
            FilterType::Deleted => "deleted",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterType::all()
            .iter()
            .copied()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown filter '{}' (expected one of: today, backlog, all, done, deleted)",
                    s
                )
            })
    }
}
