//! # sync-types
//!
//! Wire schema types for the pagesync paginated list engine.
//!
//! This crate provides the foundational types used across all pagesync crates:
//! - [`EntityId`], [`PageNumber`] - Identity and ordering types
//! - [`Entity`] - The resource item served by the REST API
//! - [`Page`], [`PageInfo`] - The paginated response envelope
//! - [`FetchError`] - Failures surfaced by a fetch

#![warn(missing_docs)]
#![warn(clippy::all)]

mod entity;
mod error;
mod ids;
mod page;

pub use entity::{Entity, Gender, LocationRef, Status};
pub use error::FetchError;
pub use ids::{EntityId, PageNumber};
pub use page::{Page, PageInfo};
