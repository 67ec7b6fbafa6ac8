//! Singers, composers, record companies and customers.
//!
//! The four kinds share one row shape (`name`, `contact`, `address`) and have
//! no relationships among themselves, so they are modelled as a single
//! [`Party`] record tagged by [`PartyKind`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::RecordId;

/// Which of the four contact-style tables a party lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyKind {
    Singer,
    Composer,
    RecordCompany,
    Customer,
}

impl PartyKind {
    /// Every kind, in the order the API documents them.
    pub const ALL: [PartyKind; 4] = [
        PartyKind::Singer,
        PartyKind::Composer,
        PartyKind::RecordCompany,
        PartyKind::Customer,
    ];

    /// URL path segment under `/api`.
    pub fn collection(self) -> &'static str {
        match self {
            PartyKind::Singer => "singers",
            PartyKind::Composer => "composers",
            PartyKind::RecordCompany => "record-companies",
            PartyKind::Customer => "customers",
        }
    }

    /// SQL table name.
    pub fn table(self) -> &'static str {
        match self {
            PartyKind::Singer => "singers",
            PartyKind::Composer => "composers",
            PartyKind::RecordCompany => "record_companies",
            PartyKind::Customer => "customers",
        }
    }

    /// Key of the serialized collection in the local fallback store.
    pub fn storage_key(self) -> &'static str {
        match self {
            PartyKind::Singer => "singers",
            PartyKind::Composer => "composers",
            PartyKind::RecordCompany => "recordCompanies",
            PartyKind::Customer => "customers",
        }
    }

    /// Human-readable label, used in messages such as "Singer deleted successfully".
    pub fn label(self) -> &'static str {
        match self {
            PartyKind::Singer => "Singer",
            PartyKind::Composer => "Composer",
            PartyKind::RecordCompany => "Record company",
            PartyKind::Customer => "Customer",
        }
    }

    /// Resolves a URL path segment back to a kind.
    pub fn from_collection(segment: &str) -> Option<PartyKind> {
        PartyKind::ALL
            .into_iter()
            .find(|kind| kind.collection() == segment)
    }
}

impl fmt::Display for PartyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A stored singer, composer, record company or customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub address: String,
}

impl Party {
    /// Combines an assigned id with validated fields.
    pub fn from_fields(id: RecordId, fields: PartyFields) -> Self {
        Party {
            id,
            name: fields.name,
            contact: fields.contact,
            address: fields.address,
        }
    }
}

/// Validated, non-id fields of a party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyFields {
    pub name: String,
    pub contact: String,
    pub address: String,
}

impl PartyFields {
    /// Builds fields from plain strings, rejecting a blank name.
    pub fn new(
        name: impl Into<String>,
        contact: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let fields = PartyFields {
            name: name.into(),
            contact: contact.into(),
            address: address.into(),
        };
        fields.validate()?;
        Ok(fields)
    }

    /// Re-checks the required-field rule. Stores call this before writing.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::MissingField { field: "name" });
        }
        Ok(())
    }
}

/// A party request body as it arrives over the wire.
///
/// Every field is optional here; [`PartyDraft::into_fields`] applies the
/// required-field rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl PartyDraft {
    pub fn into_fields(self) -> Result<PartyFields, CoreError> {
        PartyFields::new(
            self.name.unwrap_or_default(),
            self.contact.unwrap_or_default(),
            self.address.unwrap_or_default(),
        )
    }
}

impl From<PartyFields> for PartyDraft {
    fn from(fields: PartyFields) -> Self {
        PartyDraft {
            name: Some(fields.name),
            contact: Some(fields.contact),
            address: Some(fields.address),
        }
    }
}
