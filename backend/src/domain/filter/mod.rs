//! Query-parameter filtering over explicit per-entity field registries.
//!
//! A [`FieldRegistry`] lists the fields callers may filter and sort on. The
//! [`bind`] function turns raw query values into a [`Filter`], which adapters
//! either evaluate in memory with [`Filter::matches`] or translate into SQL by
//! walking [`Filter::predicates`].
//!
//! Binding rules per [`FieldKind`]:
//!
//! - `Identifier`: never filtered; supplied values are ignored.
//! - `Text`: case-insensitive substring match on the first value.
//! - `Integer` and `Date`: one value is an inclusive lower bound; two or more
//!   values are an inclusive range over the first two.
//!
//! A registered field named with no usable value is a malformed filter.

mod binder;
mod registries;
mod registry;

pub use binder::{Condition, Filter, FilterError, Predicate, QueryValues, bind};
pub use registries::{MODEL_FIELDS, PERSON_FIELDS};
pub use registry::{FieldDescriptor, FieldKind, FieldRegistry, FieldValue, Filterable};
