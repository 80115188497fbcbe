//! The route paths served by the proxy.
//!
//! The paths keep the names of the original hosted functions so existing
//! dashboard clients do not need to change.

/// Creates a transaction page in the Notion transactions database.
pub const CREATE_TRANSACTION: &str = "/notion-transactions";

/// Queries the Notion transactions database and returns flat records.
pub const FETCH_TRANSACTIONS: &str = "/notion-fetch-transactions";

/// Creates a reminder page in the Notion reminders database.
pub const CREATE_REMINDER: &str = "/notion-reminders";
