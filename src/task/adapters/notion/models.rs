//! Wire shapes of the database API and their mapping to domain records.

use super::schema::{LogSchema, TaskSchema, weekday_label};
use crate::task::domain::{LogEntry, OwnerId, RawTaskRecord, TaskDraft};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;

/// Maximum characters the API accepts in one rich-text object.
pub(super) const RICH_TEXT_LIMIT: usize = 2000;

/// Maximum page size accepted by database queries.
pub(super) const QUERY_PAGE_SIZE: u32 = 100;

/// Response of a database query.
#[derive(Debug, Deserialize)]
pub(super) struct QueryResponse {
    pub(super) results: Vec<PageObject>,
    #[serde(default)]
    pub(super) has_more: bool,
    #[serde(default)]
    pub(super) next_cursor: Option<String>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub(super) message: String,
}

/// A database page.
#[derive(Debug, Deserialize)]
pub(super) struct PageObject {
    id: String,
    #[serde(default)]
    properties: HashMap<String, PropertyValue>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum PropertyValue {
    Title {
        title: Vec<RichText>,
    },
    RichText {
        rich_text: Vec<RichText>,
    },
    Checkbox {
        checkbox: bool,
    },
    Date {
        date: Option<DateValue>,
    },
    People {
        people: Vec<PartialUser>,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Deserialize)]
struct RichText {
    #[serde(default)]
    plain_text: String,
}

#[derive(Debug, Deserialize)]
struct DateValue {
    start: String,
}

#[derive(Debug, Deserialize)]
struct PartialUser {
    id: String,
}

impl PageObject {
    /// Maps the page onto a raw record without validating it.
    ///
    /// The owner is the queried owner when listed among the page's people,
    /// otherwise the first listed person.
    pub(super) fn into_raw(self, schema: &TaskSchema, queried: &OwnerId) -> RawTaskRecord {
        let Self { id, properties } = self;
        let mut raw = RawTaskRecord::new(id);

        raw.title = match properties.get(&schema.title) {
            Some(PropertyValue::Title { title } | PropertyValue::RichText { rich_text: title }) => {
                Some(plain_text(title))
            }
            _ => None,
        };
        raw.owner = match properties.get(&schema.owner) {
            Some(PropertyValue::People { people }) => people
                .iter()
                .find(|person| person.id == queried.as_str())
                .or_else(|| people.first())
                .map(|person| person.id.clone()),
            _ => None,
        };
        raw.completed = match properties.get(&schema.completed) {
            Some(PropertyValue::Checkbox { checkbox }) => Some(*checkbox),
            _ => None,
        };
        raw.date = match properties.get(&schema.date) {
            Some(PropertyValue::Date { date: Some(value) }) => parse_start_date(&value.start),
            _ => None,
        };
        raw
    }
}

fn plain_text(blocks: &[RichText]) -> String {
    blocks.iter().map(|block| block.plain_text.as_str()).collect()
}

/// Parses the calendar date of a date property start, which may carry a
/// time component.
fn parse_start_date(start: &str) -> Option<NaiveDate> {
    let day = start.split('T').next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Splits text into rich-text objects within the per-object limit.
pub(super) fn rich_text(content: &str) -> Vec<Value> {
    let chars: Vec<char> = content.chars().collect();
    chars
        .chunks(RICH_TEXT_LIMIT)
        .map(|chunk| {
            let text: String = chunk.iter().collect();
            json!({ "type": "text", "text": { "content": text } })
        })
        .collect()
}

/// Builds the query body for one owner's records on one day.
pub(super) fn query_body(
    schema: &TaskSchema,
    owner: &OwnerId,
    date: NaiveDate,
    cursor: Option<&str>,
) -> Value {
    let mut body = json!({
        "filter": {
            "and": [
                { "property": schema.date, "date": { "equals": date.to_string() } },
                { "property": schema.owner, "people": { "contains": owner.as_str() } }
            ]
        },
        "page_size": QUERY_PAGE_SIZE
    });
    if let (Some(next), Some(object)) = (cursor, body.as_object_mut()) {
        object.insert("start_cursor".to_owned(), Value::from(next));
    }
    body
}

/// Builds the page-creation body for a carried draft.
pub(super) fn task_page_body(schema: &TaskSchema, database_id: &str, draft: &TaskDraft) -> Value {
    let mut properties = serde_json::Map::new();
    properties.insert(schema.title.clone(), json!({ "title": rich_text(draft.title()) }));
    properties.insert(
        schema.date.clone(),
        json!({ "date": { "start": draft.date().to_string() } }),
    );
    properties.insert(
        schema.owner.clone(),
        json!({ "people": [{ "id": draft.owner().as_str() }] }),
    );
    properties.insert(
        schema.completed.clone(),
        json!({ "checkbox": draft.completed() }),
    );
    if let Some(weekday) = &schema.weekday {
        properties.insert(
            weekday.clone(),
            json!({ "select": { "name": weekday_label(draft.date()) } }),
        );
    }
    json!({ "parent": { "database_id": database_id }, "properties": properties })
}

/// Builds the page-creation body for a run log entry.
pub(super) fn log_page_body(schema: &LogSchema, database_id: &str, entry: &LogEntry) -> Value {
    let title = format!(
        "Carry-forward {} ({})",
        entry.run_date(),
        entry.status().as_str()
    );
    let mut properties = serde_json::Map::new();
    properties.insert(schema.title.clone(), json!({ "title": rich_text(&title) }));
    properties.insert(
        schema.date.clone(),
        json!({ "date": { "start": entry.run_date().to_string() } }),
    );
    properties.insert(
        schema.carried.clone(),
        json!({ "number": entry.carried_count() }),
    );
    properties.insert(
        schema.status.clone(),
        json!({ "select": { "name": entry.status().as_str() } }),
    );
    properties.insert(
        schema.details.clone(),
        json!({ "rich_text": rich_text(&owner_breakdown(entry)) }),
    );
    properties.insert(
        schema.message.clone(),
        json!({ "rich_text": rich_text(entry.message().unwrap_or_default()) }),
    );
    json!({ "parent": { "database_id": database_id }, "properties": properties })
}

fn owner_breakdown(entry: &LogEntry) -> String {
    let counts = entry
        .per_owner_counts()
        .iter()
        .map(|(owner, count)| format!("{owner}: {count}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("run {}; {counts}", entry.run_id())
}

/// Extracts a readable message from an error response body.
pub(super) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.message)
        .unwrap_or_else(|_| body.to_owned())
}
