//! Binding raw query values to typed predicates.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde_json::json;
use tracing::debug;

use super::registry::{FieldDescriptor, FieldKind, FieldValue, Filterable};
use crate::domain::Error;

/// Raw query parameters: name to every supplied value, in request order.
pub type QueryValues = BTreeMap<String, Vec<String>>;

/// Test applied to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Field text contains the needle, ignoring case. The needle is stored
    /// lowercased.
    ContainsIgnoreCase(String),
    /// `field >= bound`.
    AtLeast(FieldValue),
    /// `from <= field <= to`.
    Between(FieldValue, FieldValue),
}

/// A condition bound to a registered field.
pub struct Predicate<E: 'static> {
    field: &'static FieldDescriptor<E>,
    condition: Condition,
}

impl<E> Predicate<E> {
    /// Name of the filtered field.
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        self.field.name()
    }

    /// Condition applied to the field.
    #[must_use]
    pub const fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Evaluate against `entity` with derived fields computed for `today`.
    #[must_use]
    pub fn matches(&self, entity: &E, today: NaiveDate) -> bool {
        let value = self.field.read(entity, today);
        match &self.condition {
            Condition::ContainsIgnoreCase(needle) => match value {
                FieldValue::Text(text) => text.to_lowercase().contains(needle.as_str()),
                _ => false,
            },
            Condition::AtLeast(bound) => value >= *bound,
            Condition::Between(from, to) => *from <= value && value <= *to,
        }
    }
}

impl<E> Clone for Predicate<E> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            condition: self.condition.clone(),
        }
    }
}

impl<E> PartialEq for Predicate<E> {
    fn eq(&self, other: &Self) -> bool {
        self.field.name() == other.field.name() && self.condition == other.condition
    }
}

impl<E> fmt::Debug for Predicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("field", &self.field.name())
            .field("condition", &self.condition)
            .finish()
    }
}

/// Conjunction of predicates; empty matches everything.
pub struct Filter<E: 'static> {
    predicates: Vec<Predicate<E>>,
}

impl<E> Filter<E> {
    /// Filter accepting every entity.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Bound predicates in registry order.
    #[must_use]
    pub fn predicates(&self) -> &[Predicate<E>] {
        &self.predicates
    }

    /// Whether every predicate accepts `entity`.
    #[must_use]
    pub fn matches(&self, entity: &E, today: NaiveDate) -> bool {
        self.predicates
            .iter()
            .all(|predicate| predicate.matches(entity, today))
    }
}

impl<E> Default for Filter<E> {
    fn default() -> Self {
        Self::all()
    }
}

impl<E> Clone for Filter<E> {
    fn clone(&self) -> Self {
        Self {
            predicates: self.predicates.clone(),
        }
    }
}

impl<E> PartialEq for Filter<E> {
    fn eq(&self, other: &Self) -> bool {
        self.predicates == other.predicates
    }
}

impl<E> fmt::Debug for Filter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.predicates.iter()).finish()
    }
}

/// Reasons a filter could not be bound.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// A registered field was named without any usable value.
    #[error("filter `{field}` was supplied without a value")]
    MissingValues {
        /// Offending field.
        field: &'static str,
    },
    /// A value could not be parsed for the field's kind.
    #[error("filter `{field}` expects {expected}, got `{value}`")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// Raw value as supplied.
        value: String,
        /// Accepted input description.
        expected: &'static str,
    },
}

impl From<FilterError> for Error {
    fn from(value: FilterError) -> Self {
        let details = match &value {
            FilterError::MissingValues { field } => {
                json!({ "field": field, "code": "malformed_filter" })
            }
            FilterError::InvalidValue { field, value, .. } => {
                json!({ "field": field, "code": "invalid_filter_value", "value": value })
            }
        };
        Self::invalid_request(value.to_string()).with_details(details)
    }
}

/// Bind `values` against the registry of `E`.
///
/// Parameters that do not name a registered field are ignored, as are
/// identifier fields. Values keep their positions: text fields read the first
/// value verbatim, orderable fields read the first two and ignore the rest.
///
/// # Errors
///
/// [`FilterError::MissingValues`] when a registered, non-identifier field is
/// named without a value or with a blank first value;
/// [`FilterError::InvalidValue`] when one of the considered values does not
/// parse for the field's kind.
///
/// # Examples
/// ```
/// use roster::domain::filter::{bind, Condition, FieldValue, QueryValues};
/// use roster::domain::Model;
///
/// let mut values = QueryValues::new();
/// values.insert("number".to_owned(), vec!["3".to_owned(), "7".to_owned()]);
/// let filter = bind::<Model>(&values).expect("valid filter");
/// assert_eq!(
///     filter.predicates()[0].condition(),
///     &Condition::Between(FieldValue::Integer(3), FieldValue::Integer(7))
/// );
/// ```
pub fn bind<E: Filterable>(values: &QueryValues) -> Result<Filter<E>, FilterError> {
    let mut predicates = Vec::new();
    for field in E::registry().fields() {
        let Some(raw) = values.get(field.name()) else {
            continue;
        };
        if field.kind() == FieldKind::Identifier {
            debug!(field = field.name(), "ignoring filter on identifier field");
            continue;
        }
        let condition = bind_condition(field, raw)?;
        predicates.push(Predicate { field, condition });
    }
    Ok(Filter { predicates })
}

fn bind_condition<E>(field: &FieldDescriptor<E>, raw: &[String]) -> Result<Condition, FilterError> {
    let missing = || FilterError::MissingValues {
        field: field.name(),
    };
    match field.kind() {
        FieldKind::Text => match raw.first() {
            Some(needle) if !needle.is_empty() => {
                Ok(Condition::ContainsIgnoreCase(needle.to_lowercase()))
            }
            _ => Err(missing()),
        },
        FieldKind::Integer | FieldKind::Date => match raw {
            [] => Err(missing()),
            [first, ..] if first.trim().is_empty() => Err(missing()),
            [only] => Ok(Condition::AtLeast(parse_value(field, only)?)),
            [from, to, ..] => Ok(Condition::Between(
                parse_value(field, from)?,
                parse_value(field, to)?,
            )),
        },
        FieldKind::Identifier => Err(missing()),
    }
}

fn parse_value<E>(field: &FieldDescriptor<E>, raw: &str) -> Result<FieldValue, FilterError> {
    let invalid = || FilterError::InvalidValue {
        field: field.name(),
        value: raw.to_owned(),
        expected: field.kind().expectation(),
    };
    let raw = raw.trim();
    match field.kind() {
        FieldKind::Integer => raw
            .parse::<i32>()
            .map(|value| FieldValue::Integer(i64::from(value)))
            .map_err(|_| invalid()),
        FieldKind::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(FieldValue::Date)
            .map_err(|_| invalid()),
        FieldKind::Text => Ok(FieldValue::Text(raw.to_owned())),
        FieldKind::Identifier => Err(invalid()),
    }
}
