use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use storefront_core::{DomainResult, Entity, Rule, RuleSet, Validate};

/// Product identifier, assigned by the store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl ProductId {
    pub fn value(self) -> i64 {
        self.0
    }

    /// The identifier following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::str::FromStr for ProductId {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A stored product.
///
/// Instances only come out of a [`crate::ProductStore`], so `price > 0` holds for
/// every value a caller can observe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    price: Decimal,
}

impl Product {
    pub(crate) fn new(id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    pub(crate) fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self::new(id, draft.name, draft.price)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Overwrite both fields (full update; the draft has already been validated).
    pub(crate) fn replace(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.price = draft.price;
    }

    /// Partial update: an empty name or a non-positive price leaves the field alone.
    pub(crate) fn merge(&mut self, draft: ProductDraft) {
        if !draft.name.is_empty() {
            self.name = draft.name;
        }
        if draft.price > Decimal::ZERO {
            self.price = draft.price;
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

/// Candidate product data supplied by a client (no identifier).
///
/// Missing fields default to an empty name and a zero price, which the
/// validator rejects and a partial update ignores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

pub const NAME_REQUIRED: &str = "Name is required.";
pub const PRICE_NOT_POSITIVE: &str = "Price must be greater than zero.";

/// Exact JSON number for a decimal (no round trip through `f64`).
fn decimal_to_json(value: Decimal) -> serde_json::Value {
    value
        .to_string()
        .parse::<serde_json::Number>()
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// Field rules applied to full creates and updates.
///
/// A name made only of whitespace counts as missing.
#[derive(Debug)]
pub struct ProductValidator {
    rules: RuleSet<ProductDraft>,
}

impl ProductValidator {
    pub fn new() -> Self {
        let rules = RuleSet::new()
            .rule(Rule::new(
                "name",
                NAME_REQUIRED,
                |d: &ProductDraft| !d.name.trim().is_empty(),
                |d: &ProductDraft| json!(d.name),
            ))
            .rule(Rule::new(
                "price",
                PRICE_NOT_POSITIVE,
                |d: &ProductDraft| d.price > Decimal::ZERO,
                |d: &ProductDraft| decimal_to_json(d.price),
            ));
        Self { rules }
    }
}

impl Default for ProductValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate<ProductDraft> for ProductValidator {
    fn validate(&self, candidate: &ProductDraft) -> DomainResult<()> {
        self.rules.validate(candidate)
    }
}
