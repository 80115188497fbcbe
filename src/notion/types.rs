//! Serde models for the slice of the Notion API this app consumes.
//!
//! Only the fields the record mapper reads are modelled; everything else in
//! Notion's responses is ignored during deserialization. All nested values
//! are optional so that inbound mapping is total: an empty or half-filled
//! page deserializes cleanly and the mapper substitutes defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The named, typed properties of a single Notion page.
pub type PropertyMap = BTreeMap<String, Property>;

/// One document in a Notion database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// The opaque page identifier assigned by Notion.
    pub id: String,
    /// The page's properties, keyed by property name.
    #[serde(default)]
    pub properties: PropertyMap,
}

/// A single typed property value.
///
/// Notion tags each property with its kind; here a property is a bag of
/// optional kind-specific payloads of which exactly one is populated. The
/// constructors build the outbound wrappers, the accessors read the inbound
/// ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Payload of a title property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Vec<RichText>>,

    /// Payload of a rich text property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rich_text: Option<Vec<RichText>>,

    /// Payload of a date property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateValue>,

    /// Payload of a number property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<f64>,

    /// Payload of a select property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<SelectValue>,

    /// Payload of a status property.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SelectValue>,
}

impl Property {
    /// Wrap `content` in a single-element title container.
    pub fn title(content: &str) -> Self {
        Self {
            title: Some(vec![RichText::text(content)]),
            ..Self::default()
        }
    }

    /// Wrap `content` in a single-element rich text container.
    pub fn rich_text(content: &str) -> Self {
        Self {
            rich_text: Some(vec![RichText::text(content)]),
            ..Self::default()
        }
    }

    /// Wrap an ISO date or date-time string in a date container.
    pub fn date(start: &str) -> Self {
        Self {
            date: Some(DateValue {
                start: start.to_owned(),
            }),
            ..Self::default()
        }
    }

    /// Wrap a plain number.
    pub fn number(value: f64) -> Self {
        Self {
            number: Some(value),
            ..Self::default()
        }
    }

    /// Wrap `name` as a single select value.
    pub fn select(name: &str) -> Self {
        Self {
            select: Some(SelectValue {
                name: name.to_owned(),
            }),
            ..Self::default()
        }
    }

    /// Wrap `name` as a status value.
    pub fn status(name: &str) -> Self {
        Self {
            status: Some(SelectValue {
                name: name.to_owned(),
            }),
            ..Self::default()
        }
    }

    /// The text content of the first title element, if any.
    pub fn title_text(&self) -> Option<&str> {
        first_text(self.title.as_deref())
    }

    /// The text content of the first rich text element, if any.
    pub fn rich_text_text(&self) -> Option<&str> {
        first_text(self.rich_text.as_deref())
    }

    /// The start of the date payload, if any.
    pub fn date_start(&self) -> Option<&str> {
        self.date.as_ref().map(|date| date.start.as_str())
    }

    /// The name of the select payload, if any.
    pub fn select_name(&self) -> Option<&str> {
        self.select.as_ref().map(|select| select.name.as_str())
    }

    /// The name of the status payload, if any.
    pub fn status_name(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.name.as_str())
    }
}

fn first_text(elements: Option<&[RichText]>) -> Option<&str> {
    elements?
        .first()?
        .text
        .as_ref()
        .map(|text| text.content.as_str())
}

/// One element of a title or rich text container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    /// The plain text payload. Absent for mention or equation elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
}

impl RichText {
    /// A plain text element carrying `content`.
    pub fn text(content: &str) -> Self {
        Self {
            text: Some(TextContent {
                content: content.to_owned(),
            }),
        }
    }
}

/// The content of a plain text element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    /// The text itself.
    pub content: String,
}

/// The payload of a date property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    /// An ISO date (`2024-01-05`) or date-time (`2024-01-05T07:30:00`).
    #[serde(default)]
    pub start: String,
}

/// The payload of a select or status property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectValue {
    /// The selected option's name.
    #[serde(default)]
    pub name: String,
}

/// The sort specification sent with a database query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sort {
    /// The property to sort by.
    pub property: String,
    /// The sort direction.
    pub direction: SortDirection,
}

impl Sort {
    /// Sort by `property` in order of decreasing value.
    pub fn descending(property: &str) -> Self {
        Self {
            property: property.to_owned(),
            direction: SortDirection::Descending,
        }
    }
}

/// The order to sort query results in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}

/// The body of a `POST /v1/databases/{id}/query` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// How to order the returned pages.
    pub sorts: Vec<Sort>,
}

/// The body of a database query response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The returned pages, in the requested order.
    #[serde(default)]
    pub results: Vec<Page>,
}

/// The body of a `POST /v1/pages` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePageRequest {
    /// The database the new page belongs to.
    pub parent: Parent,
    /// The new page's properties.
    pub properties: PropertyMap,
}

/// The parent reference of a new page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parent {
    /// The target database's identifier.
    pub database_id: String,
}

/// The body of a page create response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatePageResponse {
    /// The ID assigned to the new page.
    #[serde(default)]
    pub id: String,
}
