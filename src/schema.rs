//! The schema-description tables tying flat record fields to Notion
//! properties.
//!
//! Each record kind has a table of [FieldSpec] constants mapping a field to
//! its property key and wrapper kind, plus the fixed ID of the database that
//! holds it. A schema change in the Notion workspace is an edit to this
//! module, not to the mapper code.

use crate::notion::{Property, PropertyMap};

/// The wrapper shapes a Notion property value can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// A single-element title container.
    Title,
    /// A single-element rich text container.
    RichText,
    /// An ISO date or date-time wrapper.
    Date,
    /// A plain number.
    Number,
    /// A single select value.
    Select,
    /// A status value.
    Status,
}

/// One row of a schema table: a property key and its wrapper kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// The property's name in the Notion database.
    pub property: &'static str,
    /// The wrapper shape the property carries.
    pub kind: PropertyKind,
}

impl FieldSpec {
    /// Wrap the string form of a value in this field's property container.
    ///
    /// Numeric fields parse the string form; use [Property::number] directly
    /// when the value is already numeric.
    pub fn wrap_text(&self, content: &str) -> Property {
        match self.kind {
            PropertyKind::Title => Property::title(content),
            PropertyKind::RichText => Property::rich_text(content),
            PropertyKind::Date => Property::date(content),
            PropertyKind::Number => Property::number(content.parse().unwrap_or(0.0)),
            PropertyKind::Select => Property::select(content),
            PropertyKind::Status => Property::status(content),
        }
    }

    /// Insert the wrapped string form of a value into a property map.
    pub fn insert_text(&self, properties: &mut PropertyMap, content: &str) {
        properties.insert(self.property.to_owned(), self.wrap_text(content));
    }

    /// Insert a wrapped number into a property map.
    pub fn insert_number(&self, properties: &mut PropertyMap, value: f64) {
        properties.insert(self.property.to_owned(), Property::number(value));
    }

    /// Read this field's string value from a property map.
    ///
    /// Total: an absent property, an empty container or a mismatched wrapper
    /// all read as the empty string.
    pub fn read_text(&self, properties: &PropertyMap) -> String {
        let Some(property) = properties.get(self.property) else {
            return String::new();
        };

        let value = match self.kind {
            PropertyKind::Title => property.title_text(),
            PropertyKind::RichText => property.rich_text_text(),
            PropertyKind::Date => property.date_start(),
            PropertyKind::Number => None,
            PropertyKind::Select => property.select_name(),
            PropertyKind::Status => property.status_name(),
        };

        value.unwrap_or_default().to_owned()
    }

    /// Read this field's numeric value from a property map, defaulting to 0.
    pub fn read_number(&self, properties: &PropertyMap) -> f64 {
        properties
            .get(self.property)
            .and_then(|property| property.number)
            .unwrap_or(0.0)
    }
}

/// The transaction record's schema.
pub mod transaction {
    use super::{FieldSpec, PropertyKind};

    /// The Notion database holding transaction pages.
    pub const DATABASE_ID: &str = "08efbd0774044342981e9d04c872a7dd";

    /// The display label of the transaction.
    pub const NAME: FieldSpec = FieldSpec {
        property: "Nama Transaksi",
        kind: PropertyKind::Title,
    };

    /// The calendar date of the transaction.
    pub const DATE: FieldSpec = FieldSpec {
        property: "Tanggal",
        kind: PropertyKind::Date,
    };

    /// The non-negative amount.
    pub const AMOUNT: FieldSpec = FieldSpec {
        property: "Jumlah",
        kind: PropertyKind::Number,
    };

    /// The income/expense label.
    pub const TYPE: FieldSpec = FieldSpec {
        property: "Tipe",
        kind: PropertyKind::Select,
    };

    /// The category, one of the dashboard's closed set.
    pub const CATEGORY: FieldSpec = FieldSpec {
        property: "Kategori",
        kind: PropertyKind::Select,
    };

    /// Optional free-text description.
    pub const DESCRIPTION: FieldSpec = FieldSpec {
        property: "Deskripsi",
        kind: PropertyKind::RichText,
    };

    /// Optional related project.
    pub const PROJECT: FieldSpec = FieldSpec {
        property: "Proyek Terkait",
        kind: PropertyKind::RichText,
    };
}

/// The reminder record's schema.
pub mod reminder {
    use super::{FieldSpec, PropertyKind};

    /// The Notion database holding reminder pages.
    pub const DATABASE_ID: &str = "e885eabb7fb54576b76ae83abe7552cb";

    /// The combined date and time of the reminder.
    pub const TIMESTAMP: FieldSpec = FieldSpec {
        property: "Tanggal & Waktu",
        kind: PropertyKind::Date,
    };

    /// The display label of the reminder.
    pub const TITLE: FieldSpec = FieldSpec {
        property: "Judul",
        kind: PropertyKind::Title,
    };

    /// Optional free-text notes.
    pub const NOTES: FieldSpec = FieldSpec {
        property: "Catatan",
        kind: PropertyKind::RichText,
    };

    /// The workflow status, fixed at creation.
    pub const STATUS: FieldSpec = FieldSpec {
        property: "Status",
        kind: PropertyKind::Status,
    };
}
