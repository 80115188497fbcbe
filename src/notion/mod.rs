//! The client for the external Notion store.
//!
//! The [NotionStore] trait is the seam between endpoint handlers and the
//! network: the real [NotionClient] performs authenticated HTTP calls against
//! the public Notion API, while tests substitute a scripted double.

mod client;
mod types;

#[cfg(test)]
pub(crate) mod test_store;

pub use client::{NOTION_API_TOKEN_VAR, NotionClient};
pub use types::{
    CreatePageRequest, CreatePageResponse, DateValue, Page, Parent, Property, PropertyMap,
    QueryRequest, QueryResponse, RichText, SelectValue, Sort, SortDirection, TextContent,
};

use crate::Error;

/// Operations against the external document store.
///
/// Both operations perform exactly one outbound call with no retry.
#[async_trait::async_trait]
pub trait NotionStore: Send + Sync {
    /// Query `database_id` and return its pages in the order the store
    /// applied `sorts`.
    async fn query_database(&self, database_id: &str, sorts: Vec<Sort>)
    -> Result<Vec<Page>, Error>;

    /// Create a page in `database_id` with the given properties and return
    /// the ID the store assigned.
    async fn create_page(&self, database_id: &str, properties: PropertyMap)
    -> Result<String, Error>;
}
