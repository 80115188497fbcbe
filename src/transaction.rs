//! Transaction management for the dashboard.
//!
//! This module contains everything related to financial transactions:
//! - The flat `Transaction` record and the `TransactionType` token/label
//!   lookup
//! - The bidirectional mapper between flat records and Notion's
//!   typed-property pages
//! - The create and list endpoint handlers

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error,
    envelope::{CreateResponse, ListResponse},
    notion::{Page, PropertyMap, Sort},
    schema,
};

/// The closed category set the dashboard offers.
///
/// Presentation-level only: the mapper forwards whatever category the client
/// sent and Notion accepts any select value.
pub const CATEGORIES: [&str; 7] = ["OBR", "OBA", "OBB", "OBS", "BBU", "Home", "General"];

const DATE_FORMAT: &'static [BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income stored as a page in the Notion transactions database.
///
/// This is the flat, application-facing shape: primitive fields, independent
/// of the store's property wrappers. String fields default to empty and
/// `amount` to zero when the stored page omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The page ID assigned by Notion. Never generated or mutated here.
    pub id: String,
    /// The display label of the transaction.
    pub name: String,
    /// The calendar date, serialized as `YYYY-MM-DD` or `""` when unset.
    #[serde(with = "iso_date")]
    pub date: Option<Date>,
    /// The non-negative amount, currency-agnostic.
    pub amount: f64,
    /// The localized type label, e.g. "Pemasukan". Empty when unset.
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// The category label.
    pub category: String,
    /// Optional free-text description.
    pub description: String,
    /// Optional related project.
    pub project: String,
}

/// The two kinds of transaction, with their internal tokens and external
/// labels.
///
/// Both mapping directions share this one lookup so the token/label pairs
/// cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    /// Money earned. Token "income", label "Pemasukan".
    Income,
    /// Money spent. Token "expense", label "Pengeluaran".
    Expense,
}

impl TransactionType {
    /// Parse the internal token used in request bodies.
    ///
    /// # Errors
    /// Returns [Error::InvalidTransactionType] for anything other than
    /// "income" or "expense".
    pub fn from_token(token: &str) -> Result<Self, Error> {
        match token {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(Error::InvalidTransactionType(other.to_owned())),
        }
    }

    /// Look up the type by its external label, e.g. "Pemasukan".
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Pemasukan" => Some(Self::Income),
            "Pengeluaran" => Some(Self::Expense),
            _ => None,
        }
    }

    /// The internal token.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// The localized label stored in Notion.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Pemasukan",
            Self::Expense => "Pengeluaran",
        }
    }
}

// ============================================================================
// MAPPER
// ============================================================================

/// The request body for creating a transaction.
///
/// Absent or null fields default to empty strings and zero rather than being
/// rejected; Notion itself rejects documents it cannot accept. The one
/// exception is `type`, which must be a recognized token.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionForm {
    /// The display label.
    #[serde(default)]
    pub name: String,
    /// The calendar date as an ISO string, forwarded verbatim.
    #[serde(default)]
    pub date: String,
    /// The non-negative amount.
    #[serde(default)]
    pub amount: f64,
    /// The internal type token, "income" or "expense".
    #[serde(default, rename = "type")]
    pub transaction_type: String,
    /// The category label.
    #[serde(default)]
    pub category: String,
    /// Optional free-text description.
    #[serde(default)]
    pub description: String,
    /// Optional related project.
    #[serde(default)]
    pub project: String,
}

/// Map a create request to the Notion property document described by
/// [schema::transaction].
///
/// # Errors
/// Returns [Error::InvalidTransactionType] when the type token is not
/// recognized, rather than writing an unintended label.
pub fn to_notion_properties(form: &TransactionForm) -> Result<PropertyMap, Error> {
    let transaction_type = TransactionType::from_token(&form.transaction_type)?;

    let mut properties = PropertyMap::new();
    schema::transaction::NAME.insert_text(&mut properties, &form.name);
    schema::transaction::DATE.insert_text(&mut properties, &form.date);
    schema::transaction::AMOUNT.insert_number(&mut properties, form.amount);
    schema::transaction::TYPE.insert_text(&mut properties, transaction_type.label());
    schema::transaction::CATEGORY.insert_text(&mut properties, &form.category);
    schema::transaction::DESCRIPTION.insert_text(&mut properties, &form.description);
    schema::transaction::PROJECT.insert_text(&mut properties, &form.project);

    Ok(properties)
}

/// Map a Notion page to a flat record.
///
/// Total: every absent or null nested property defaults to the empty string,
/// zero or no-date. Ordering is owned by the caller; this function does not
/// re-sort.
pub fn from_notion_page(page: &Page) -> Transaction {
    let properties = &page.properties;

    Transaction {
        id: page.id.clone(),
        name: schema::transaction::NAME.read_text(properties),
        date: parse_iso_date(&schema::transaction::DATE.read_text(properties)),
        amount: schema::transaction::AMOUNT.read_number(properties),
        transaction_type: schema::transaction::TYPE.read_text(properties),
        category: schema::transaction::CATEGORY.read_text(properties),
        description: schema::transaction::DESCRIPTION.read_text(properties),
        project: schema::transaction::PROJECT.read_text(properties),
    }
}

/// Parse the calendar date part of an ISO date or date-time string.
///
/// Returns `None` for empty or unparseable input.
fn parse_iso_date(value: &str) -> Option<Date> {
    let date_part = value.get(..10).unwrap_or(value);
    Date::parse(date_part, DATE_FORMAT).ok()
}

/// Serializes `Option<Date>` as the ISO date string, with `None` as `""` to
/// match the envelope contract that absent values are empty strings.
mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => {
                let formatted = date
                    .format(super::DATE_FORMAT)
                    .map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&formatted)
            }
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Date>, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(super::parse_iso_date(&value))
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// A route handler for creating a transaction page in the Notion
/// transactions database.
///
/// One outbound store call, no retry. Responds `{success: true, id}` or the
/// uniform error body.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    Json(form): Json<TransactionForm>,
) -> Response {
    tracing::info!(
        "Adding transaction to Notion: {} {} {}",
        form.date,
        form.amount,
        form.transaction_type
    );

    let properties = match to_notion_properties(&form) {
        Ok(properties) => properties,
        Err(error) => return error.into_response(),
    };

    match state
        .store
        .create_page(schema::transaction::DATABASE_ID, properties)
        .await
    {
        Ok(id) => {
            tracing::info!("Transaction added successfully: {id}");
            Json(CreateResponse { success: true, id }).into_response()
        }
        Err(error) => error.into_response(),
    }
}

/// A route handler for listing the full current transaction set.
///
/// Queries the transactions database sorted by date descending and maps each
/// page to a flat record. Always a full re-fetch; nothing is cached across
/// requests.
pub async fn list_transactions_endpoint(State(state): State<AppState>) -> Response {
    let sorts = vec![Sort::descending(schema::transaction::DATE.property)];

    match state
        .store
        .query_database(schema::transaction::DATABASE_ID, sorts)
        .await
    {
        Ok(pages) => {
            let transactions: Vec<Transaction> = pages.iter().map(from_notion_page).collect();
            tracing::info!("Fetched {} transactions", transactions.len());
            Json(ListResponse {
                success: true,
                transactions,
            })
            .into_response()
        }
        Err(error) => error.into_response(),
    }
}
