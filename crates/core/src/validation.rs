//! Declarative field validation.
//!
//! A [`RuleSet`] is an ordered list of `(field, predicate, message)` rules. Every
//! rule is evaluated against the candidate and all failures are reported
//! together; evaluation never stops at the first failure.

use crate::error::{DomainError, DomainResult, FieldViolation};

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type Extractor<T> = Box<dyn Fn(&T) -> serde_json::Value + Send + Sync>;

/// A single field rule: `predicate` must hold, otherwise `message` is reported.
pub struct Rule<T> {
    field: &'static str,
    message: &'static str,
    predicate: Predicate<T>,
    attempted: Extractor<T>,
}

impl<T> Rule<T> {
    pub fn new(
        field: &'static str,
        message: &'static str,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
        attempted: impl Fn(&T) -> serde_json::Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            field,
            message,
            predicate: Box::new(predicate),
            attempted: Box::new(attempted),
        }
    }

    fn check(&self, candidate: &T) -> Option<FieldViolation> {
        if (self.predicate)(candidate) {
            None
        } else {
            Some(FieldViolation::new(
                self.field,
                self.message,
                (self.attempted)(candidate),
            ))
        }
    }
}

impl<T> core::fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Rule")
            .field("field", &self.field)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of rules for one candidate type.
#[derive(Debug)]
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
}

impl<T> RuleSet<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule (builder style). Rules are reported in insertion order.
    pub fn rule(mut self, rule: Rule<T>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule and collect all violations.
    pub fn violations(&self, candidate: &T) -> Vec<FieldViolation> {
        self.rules
            .iter()
            .filter_map(|rule| rule.check(candidate))
            .collect()
    }
}

impl<T> Default for RuleSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation seam: anything that can accept or reject a candidate.
pub trait Validate<T> {
    fn validate(&self, candidate: &T) -> DomainResult<()>;
}

impl<T> Validate<T> for RuleSet<T> {
    fn validate(&self, candidate: &T) -> DomainResult<()> {
        let violations = self.violations(candidate);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(violations))
        }
    }
}
