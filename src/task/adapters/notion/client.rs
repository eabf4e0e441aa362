//! Task store backed by the hosted database API.

use super::models::{
    QueryResponse, error_message, log_page_body, query_body, task_page_body,
};
use super::schema::NotionSchema;
use crate::config::NotionConfig;
use crate::task::{
    domain::{LogEntry, OwnerId, RawTaskRecord, TaskDraft},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// API version sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

const NOTION_VERSION_HEADER: &str = "Notion-Version";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// [`TaskStore`] implementation speaking to the hosted database API.
#[derive(Debug, Clone)]
pub struct NotionTaskStore {
    http: reqwest::Client,
    config: NotionConfig,
    schema: NotionSchema,
}

impl NotionTaskStore {
    /// Creates a store for the configured databases.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Unavailable`] when the HTTP client cannot be
    /// built.
    pub fn new(config: NotionConfig, schema: NotionSchema) -> TaskStoreResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("carryover/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| TaskStoreError::Unavailable(format!("http client: {err}")))?;
        Ok(Self {
            http,
            config,
            schema,
        })
    }

    async fn post(&self, path: &str, body: &Value) -> TaskStoreResult<reqwest::Response> {
        let url = format!("{}/v1/{path}", self.config.api_url.trim_end_matches('/'));
        debug!(%url, "posting to store");
        let response = self
            .http
            .post(url)
            .bearer_auth(self.config.token())
            .header(NOTION_VERSION_HEADER, NOTION_VERSION)
            .json(body)
            .send()
            .await
            .map_err(|err| classify_transport_error(&err))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body_text = response.text().await.unwrap_or_default();
        Err(classify_status(status, &error_message(&body_text)))
    }
}

/// Maps a transport failure onto the store error kinds.
///
/// Failures while the body streams are transport failures too; only a body
/// that arrived whole but does not parse is a decode error.
fn classify_transport_error(err: &reqwest::Error) -> TaskStoreError {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "connection failed"
    } else if err.is_body() {
        "response body interrupted"
    } else {
        "transport error"
    };
    TaskStoreError::Unavailable(format!("{kind}: {err}"))
}

/// Throttling and server faults are transient; other statuses are final.
fn classify_status(status: StatusCode, message: &str) -> TaskStoreError {
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        TaskStoreError::Unavailable(format!("HTTP {status}: {message}"))
    } else {
        TaskStoreError::Rejected {
            status: status.as_u16(),
            message: message.to_owned(),
        }
    }
}

#[async_trait]
impl TaskStore for NotionTaskStore {
    async fn fetch_tasks(
        &self,
        owner: &OwnerId,
        date: NaiveDate,
    ) -> TaskStoreResult<Vec<RawTaskRecord>> {
        let path = format!("databases/{}/query", self.config.tasks_database_id);
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let body = query_body(&self.schema.tasks, owner, date, cursor.as_deref());
            let bytes = self
                .post(&path, &body)
                .await?
                .bytes()
                .await
                .map_err(|err| classify_transport_error(&err))?;
            let page: QueryResponse =
                serde_json::from_slice(&bytes).map_err(TaskStoreError::decode)?;
            records.extend(
                page.results
                    .into_iter()
                    .map(|object| object.into_raw(&self.schema.tasks, owner)),
            );
            match page.next_cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }
        debug!(owner = %owner, %date, count = records.len(), "fetched task records");
        Ok(records)
    }

    async fn create_task(&self, draft: &TaskDraft) -> TaskStoreResult<()> {
        let body = task_page_body(&self.schema.tasks, &self.config.tasks_database_id, draft);
        self.post("pages", &body).await?;
        Ok(())
    }

    async fn append_log(&self, entry: &LogEntry) -> TaskStoreResult<()> {
        let body = log_page_body(&self.schema.log, &self.config.log_database_id, entry);
        self.post("pages", &body).await?;
        Ok(())
    }
}
