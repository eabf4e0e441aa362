//! HTTP adapter for the hosted workspace database API.
//!
//! Tasks live as pages in one database and run logs as pages in another.
//! Page properties are addressed by name, see [`NotionSchema`].

mod client;
mod models;
mod schema;

pub use client::{NOTION_VERSION, NotionTaskStore};
pub use schema::{LogSchema, NotionSchema, TaskSchema};
