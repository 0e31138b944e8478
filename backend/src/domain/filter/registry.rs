//! Field descriptors and typed field values.

use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

/// How a field participates in filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Surrogate key; sortable but never filtered.
    Identifier,
    /// Free text matched by case-insensitive substring.
    Text,
    /// Orderable 32-bit integer.
    Integer,
    /// Orderable calendar date (`YYYY-MM-DD`).
    Date,
}

impl FieldKind {
    /// Describes accepted filter input for error messages.
    #[must_use]
    pub const fn expectation(self) -> &'static str {
        match self {
            Self::Identifier => "no filter value",
            Self::Text => "text",
            Self::Integer => "a 32-bit integer",
            Self::Date => "a date formatted as YYYY-MM-DD",
        }
    }
}

/// Typed value read from an entity or parsed from a query parameter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue {
    /// Integer value; identifiers and 32-bit fields both widen to `i64`.
    Integer(i64),
    /// Calendar date.
    Date(NaiveDate),
    /// Text value.
    Text(String),
    /// UUID identifier.
    Uuid(Uuid),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Date(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Uuid(value) => write!(f, "{value}"),
        }
    }
}

/// Reads a field from an entity; `today` feeds derived fields.
pub type FieldReader<E> = fn(&E, NaiveDate) -> FieldValue;

/// One filterable and sortable field.
pub struct FieldDescriptor<E> {
    name: &'static str,
    kind: FieldKind,
    read: FieldReader<E>,
}

impl<E> FieldDescriptor<E> {
    /// Describe a field named `name`.
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind, read: FieldReader<E>) -> Self {
        Self { name, kind, read }
    }

    /// Query-parameter and sort-property name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Binding rule family.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Current value of the field on `entity`.
    #[must_use]
    pub fn read(&self, entity: &E, today: NaiveDate) -> FieldValue {
        (self.read)(entity, today)
    }
}

impl<E> fmt::Debug for FieldDescriptor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Static table of the fields an entity exposes to callers.
pub struct FieldRegistry<E: 'static> {
    fields: &'static [FieldDescriptor<E>],
}

impl<E: 'static> FieldRegistry<E> {
    /// Wrap a static field table.
    #[must_use]
    pub const fn new(fields: &'static [FieldDescriptor<E>]) -> Self {
        Self { fields }
    }

    /// Every field in declaration order.
    #[must_use]
    pub const fn fields(&self) -> &'static [FieldDescriptor<E>] {
        self.fields
    }

    /// Look up a field by its exact name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor<E>> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl<E: 'static> fmt::Debug for FieldRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.fields.iter()).finish()
    }
}

/// Entities exposing a field registry.
pub trait Filterable: Sized + 'static {
    /// Registry listing the entity's filterable fields.
    fn registry() -> &'static FieldRegistry<Self>;
}
