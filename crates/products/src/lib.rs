//! Products domain module.
//!
//! Business rules for the product catalog: the `Product` entity, its
//! validation rules, and the in-memory `ProductStore` that owns every record
//! and assigns identifiers. No IO, no HTTP.

pub mod product;
pub mod store;

pub use product::{Product, ProductDraft, ProductId, ProductValidator};
pub use store::ProductStore;
