//! The entity served by the REST resource.
//!
//! The shape is fixed by the upstream API; field names follow its JSON keys
//! except where they collide with Rust keywords.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::EntityId;

/// Life status of an entity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Status {
    /// `"Alive"`
    Alive,
    /// `"Dead"`
    Dead,
    /// `"unknown"`, or any value this client does not recognise.
    #[default]
    Unknown,
}

impl Status {
    /// The wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Alive => "Alive",
            Status::Dead => "Dead",
            Status::Unknown => "unknown",
        }
    }

    fn from_wire(s: &str) -> Self {
        match s {
            "Alive" => Status::Alive,
            "Dead" => Status::Dead,
            _ => Status::Unknown,
        }
    }
}

/// Gender of an entity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Gender {
    /// `"Female"`
    Female,
    /// `"Male"`
    Male,
    /// `"Genderless"`
    Genderless,
    /// `"unknown"`, or any value this client does not recognise.
    #[default]
    Unknown,
}

impl Gender {
    /// The wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Genderless => "Genderless",
            Gender::Unknown => "unknown",
        }
    }

    fn from_wire(s: &str) -> Self {
        match s {
            "Female" => Gender::Female,
            "Male" => Gender::Male,
            "Genderless" => Gender::Genderless,
            _ => Gender::Unknown,
        }
    }
}

macro_rules! wire_string_enum {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Ok(Self::from_wire(&raw))
            }
        }
    };
}

wire_string_enum!(Status);
wire_string_enum!(Gender);

/// A named reference to another resource (origin or last known location).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationRef {
    /// Display name, e.g. `"Earth (C-137)"`.
    pub name: String,
    /// URL of the referenced resource. Empty when the server has none.
    pub url: String,
}

/// A single item of the paginated collection.
///
/// Entities are immutable once received; identity is [`Entity::id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Server-assigned identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Life status.
    pub status: Status,
    /// Species, free text.
    pub species: String,
    /// Sub-species or variant, free text (often empty).
    #[serde(rename = "type")]
    pub kind: String,
    /// Gender.
    pub gender: Gender,
    /// Place of origin.
    pub origin: LocationRef,
    /// Last known location.
    pub location: LocationRef,
    /// Avatar image URL.
    pub image: String,
    /// URLs of the episodes this entity appears in.
    pub episode: Vec<String>,
    /// Canonical URL of this entity.
    pub url: String,
    /// Creation timestamp (ISO 8601) as reported by the server.
    pub created: String,
}
