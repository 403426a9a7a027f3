//! `storefront-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error model, field-level validation and the entity trait.

pub mod entity;
pub mod error;
pub mod validation;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, FieldViolation};
pub use validation::{Rule, RuleSet, Validate};
