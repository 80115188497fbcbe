//! The JSON envelopes shared by the proxy endpoints.

use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

/// The response body for a successful create call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateResponse {
    /// Always `true` in a success response.
    pub success: bool,
    /// The ID Notion assigned to the new page.
    pub id: String,
}

/// The response body for a successful list-transactions call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
    /// Always `true` in a success response.
    pub success: bool,
    /// The full current record set, in the order Notion returned it.
    pub transactions: Vec<Transaction>,
}

/// The response body for every failed call, paired with a 500 status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// A human-readable description of what went wrong.
    pub error: String,
}
