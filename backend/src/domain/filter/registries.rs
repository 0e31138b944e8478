//! Field registries for the person and model entities.

use chrono::NaiveDate;

use super::registry::{FieldDescriptor, FieldKind, FieldRegistry, FieldValue, Filterable};
use crate::domain::{Model, Person};

/// Person fields: `id`, `name`, `dob` and the derived `age`.
pub static PERSON_FIELDS: FieldRegistry<Person> = FieldRegistry::new(&[
    FieldDescriptor::new("id", FieldKind::Identifier, person_id),
    FieldDescriptor::new("name", FieldKind::Text, person_name),
    FieldDescriptor::new("dob", FieldKind::Date, person_dob),
    FieldDescriptor::new("age", FieldKind::Integer, person_age),
]);

/// Model fields: `id`, `number` and `name`.
pub static MODEL_FIELDS: FieldRegistry<Model> = FieldRegistry::new(&[
    FieldDescriptor::new("id", FieldKind::Identifier, model_id),
    FieldDescriptor::new("number", FieldKind::Integer, model_number),
    FieldDescriptor::new("name", FieldKind::Text, model_name),
]);

impl Filterable for Person {
    fn registry() -> &'static FieldRegistry<Self> {
        &PERSON_FIELDS
    }
}

impl Filterable for Model {
    fn registry() -> &'static FieldRegistry<Self> {
        &MODEL_FIELDS
    }
}

fn person_id(person: &Person, _today: NaiveDate) -> FieldValue {
    FieldValue::Integer(person.id().get())
}

fn person_name(person: &Person, _today: NaiveDate) -> FieldValue {
    FieldValue::Text(person.name().to_owned())
}

fn person_dob(person: &Person, _today: NaiveDate) -> FieldValue {
    FieldValue::Date(person.dob())
}

fn person_age(person: &Person, today: NaiveDate) -> FieldValue {
    FieldValue::Integer(i64::from(person.age_on(today)))
}

fn model_id(model: &Model, _today: NaiveDate) -> FieldValue {
    FieldValue::Uuid(*model.id().as_uuid())
}

fn model_number(model: &Model, _today: NaiveDate) -> FieldValue {
    FieldValue::Integer(i64::from(model.number()))
}

fn model_name(model: &Model, _today: NaiveDate) -> FieldValue {
    FieldValue::Text(model.name().to_owned())
}
