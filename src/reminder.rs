//! Reminder management for the dashboard.
//!
//! Reminders are write-only in this service: the dashboard creates them in
//! the Notion reminders database and Notion's own views drive everything
//! after that.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    AppState,
    envelope::CreateResponse,
    notion::PropertyMap,
    schema,
};

/// The workflow status every reminder starts in. There is no update path in
/// this service.
pub const INITIAL_STATUS: &str = "In progress";

/// The request body for creating a reminder.
///
/// Absent or null fields default to empty strings; Notion rejects documents
/// it cannot accept.
#[derive(Debug, Default, Deserialize)]
pub struct ReminderForm {
    /// The calendar date as an ISO string.
    #[serde(default)]
    pub date: String,
    /// The time of day as `HH:MM`.
    #[serde(default)]
    pub time: String,
    /// The display label of the reminder.
    #[serde(default)]
    pub title: String,
    /// Optional free-text notes.
    #[serde(default)]
    pub notes: String,
}

/// Combine a date and a time into the single timestamp stored in Notion.
pub fn combine_timestamp(date: &str, time: &str) -> String {
    format!("{date}T{time}:00")
}

/// Map a create request to the Notion property document described by
/// [schema::reminder].
pub fn to_notion_properties(form: &ReminderForm) -> PropertyMap {
    let mut properties = PropertyMap::new();
    schema::reminder::TIMESTAMP
        .insert_text(&mut properties, &combine_timestamp(&form.date, &form.time));
    schema::reminder::TITLE.insert_text(&mut properties, &form.title);
    schema::reminder::NOTES.insert_text(&mut properties, &form.notes);
    schema::reminder::STATUS.insert_text(&mut properties, INITIAL_STATUS);

    properties
}

/// A route handler for creating a reminder page in the Notion reminders
/// database.
pub async fn create_reminder_endpoint(
    State(state): State<AppState>,
    Json(form): Json<ReminderForm>,
) -> Response {
    tracing::info!(
        "Adding reminder to Notion: {} {} {}",
        form.date,
        form.time,
        form.title
    );

    let properties = to_notion_properties(&form);

    match state
        .store
        .create_page(schema::reminder::DATABASE_ID, properties)
        .await
    {
        Ok(id) => {
            tracing::info!("Reminder added successfully: {id}");
            Json(CreateResponse { success: true, id }).into_response()
        }
        Err(error) => error.into_response(),
    }
}
