//! Property names used when reading and writing database pages.

use chrono::{Datelike, NaiveDate, Weekday};

/// Property names of the task database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSchema {
    /// Title property holding the task text.
    pub title: String,
    /// Date property the task is listed under.
    pub date: String,
    /// People property holding the owner.
    pub owner: String,
    /// Checkbox property holding the completion flag.
    pub completed: String,
    /// Optional select property filled with the weekday label on create.
    pub weekday: Option<String>,
}

impl Default for TaskSchema {
    fn default() -> Self {
        Self {
            title: "Task".to_owned(),
            date: "Date".to_owned(),
            owner: "Person".to_owned(),
            completed: "Done".to_owned(),
            weekday: Some("Day".to_owned()),
        }
    }
}

/// Property names of the run log database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSchema {
    /// Title property.
    pub title: String,
    /// Date property holding the run date.
    pub date: String,
    /// Number property holding the total carried count.
    pub carried: String,
    /// Select property holding the run status.
    pub status: String,
    /// Rich-text property holding the per-owner breakdown.
    pub details: String,
    /// Rich-text property holding the run message.
    pub message: String,
}

impl Default for LogSchema {
    fn default() -> Self {
        Self {
            title: "Name".to_owned(),
            date: "Date".to_owned(),
            carried: "Carried".to_owned(),
            status: "Status".to_owned(),
            details: "Details".to_owned(),
            message: "Message".to_owned(),
        }
    }
}

/// Property names of both databases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotionSchema {
    /// Task database properties.
    pub tasks: TaskSchema,
    /// Log database properties.
    pub log: LogSchema,
}

/// Short weekday label written to the weekday select property.
pub(super) fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}
