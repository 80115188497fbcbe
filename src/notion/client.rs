//! Implements [NotionStore] with authenticated reqwest calls to the public
//! Notion API.

use std::time::Duration;

use reqwest::StatusCode;

use crate::{
    Error,
    notion::{
        CreatePageRequest, CreatePageResponse, NotionStore, Page, Parent, PropertyMap,
        QueryRequest, QueryResponse, Sort,
    },
};

/// The environment variable holding the integration's API token.
pub const NOTION_API_TOKEN_VAR: &str = "NOTION_API_TOKEN";

const NOTION_API_BASE: &str = "https://api.notion.com/v1";

/// Every call pins the API revision the record mapper was written against.
const NOTION_VERSION: &str = "2022-06-28";

/// A stalled call should fail the request rather than block it indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Performs authenticated HTTP calls to the Notion API.
///
/// The token is read once at process startup and held for the process
/// lifetime. When no token was configured the client still constructs, but
/// every call fails fast with [Error::MissingApiToken] before any network
/// traffic.
pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl NotionClient {
    /// Create a client around an optional API token.
    pub fn new(token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: NOTION_API_BASE.to_owned(),
            token: token.filter(|token| !token.is_empty()),
        }
    }

    fn token(&self) -> Result<&str, Error> {
        self.token.as_deref().ok_or(Error::MissingApiToken)
    }
}

#[async_trait::async_trait]
impl NotionStore for NotionClient {
    async fn query_database(
        &self,
        database_id: &str,
        sorts: Vec<Sort>,
    ) -> Result<Vec<Page>, Error> {
        let token = self.token()?;
        tracing::debug!("querying Notion database {database_id}");

        let response = self
            .http
            .post(format!("{}/databases/{database_id}/query", self.base_url))
            .bearer_auth(token)
            .header("Notion-Version", NOTION_VERSION)
            .timeout(REQUEST_TIMEOUT)
            .json(&QueryRequest { sorts })
            .send()
            .await?;

        let body: QueryResponse = check_status(response).await?.json().await?;

        Ok(body.results)
    }

    async fn create_page(
        &self,
        database_id: &str,
        properties: PropertyMap,
    ) -> Result<String, Error> {
        let token = self.token()?;
        tracing::debug!("creating a page in Notion database {database_id}");

        let response = self
            .http
            .post(format!("{}/pages", self.base_url))
            .bearer_auth(token)
            .header("Notion-Version", NOTION_VERSION)
            .timeout(REQUEST_TIMEOUT)
            .json(&CreatePageRequest {
                parent: Parent {
                    database_id: database_id.to_owned(),
                },
                properties,
            })
            .send()
            .await?;

        let body: CreatePageResponse = check_status(response).await?.json().await?;

        Ok(body.id)
    }
}

/// Classify a non-success status into the matching [Error] variant.
///
/// The response body is logged for debugging but never forwarded to the
/// caller.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!("Notion API error: {status}: {body}");

    Err(classify_status(status))
}

fn classify_status(status: StatusCode) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::DatabaseNotShared,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::InvalidCredential,
        other => Error::NotionStatus(other.as_u16()),
    }
}
