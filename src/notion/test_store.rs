//! A scripted in-memory [NotionStore] for endpoint tests.

use std::sync::Mutex;

use crate::{
    Error,
    notion::{NotionStore, Page, PropertyMap, Sort},
};

/// The calls a [TestStore] has received, in order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StoreCall {
    /// A database query with its sort specification.
    Query {
        database_id: String,
        sorts: Vec<Sort>,
    },
    /// A page create with the mapped property document.
    Create {
        database_id: String,
        properties: PropertyMap,
    },
}

/// Answers store calls from scripted results and records every call.
///
/// The default store returns no pages and assigns `"page-1"` to creates.
pub(crate) struct TestStore {
    pages: Result<Vec<Page>, Error>,
    created_id: Result<String, Error>,
    calls: Mutex<Vec<StoreCall>>,
}

impl Default for TestStore {
    fn default() -> Self {
        Self {
            pages: Ok(Vec::new()),
            created_id: Ok("page-1".to_owned()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl TestStore {
    /// A store whose queries return `pages`.
    pub(crate) fn with_pages(pages: Vec<Page>) -> Self {
        Self {
            pages: Ok(pages),
            ..Self::default()
        }
    }

    /// A store where every call fails with `error`.
    pub(crate) fn failing(error: Error) -> Self {
        Self {
            pages: Err(error.clone()),
            created_id: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The calls received so far.
    pub(crate) fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl NotionStore for TestStore {
    async fn query_database(
        &self,
        database_id: &str,
        sorts: Vec<Sort>,
    ) -> Result<Vec<Page>, Error> {
        self.calls.lock().unwrap().push(StoreCall::Query {
            database_id: database_id.to_owned(),
            sorts,
        });
        self.pages.clone()
    }

    async fn create_page(
        &self,
        database_id: &str,
        properties: PropertyMap,
    ) -> Result<String, Error> {
        self.calls.lock().unwrap().push(StoreCall::Create {
            database_id: database_id.to_owned(),
            properties,
        });
        self.created_id.clone()
    }
}
