//! Numbered model records.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{ValidationError, check_present, check_text};

/// Maximum model name length in characters.
pub const MODEL_NAME_MAX: usize = 255;

/// Server-generated model identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(Uuid);

impl ModelId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated model attributes awaiting an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDraft {
    number: i32,
    name: String,
}

impl ModelDraft {
    /// Validate raw payload fields, reporting every offending field at once.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when `number` is missing or `name` is
    /// missing, blank or longer than [`MODEL_NAME_MAX`].
    pub fn try_new(number: Option<i32>, name: Option<String>) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();
        let number = check_present(&mut errors, "number", number);
        let name = check_text(&mut errors, "name", name, MODEL_NAME_MAX);
        match (number, name) {
            (Some(number), Some(name)) => errors.into_result(|| Self { number, name }),
            _ => Err(errors),
        }
    }

    /// Draft named after its number, e.g. `Model7`.
    ///
    /// # Examples
    /// ```
    /// use roster::domain::ModelDraft;
    ///
    /// assert_eq!(ModelDraft::numbered(7).name(), "Model7");
    /// ```
    #[must_use]
    pub fn numbered(number: i32) -> Self {
        Self {
            number,
            name: format!("Model{number}"),
        }
    }

    /// Model number.
    #[must_use]
    pub const fn number(&self) -> i32 {
        self.number
    }

    /// Trimmed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Stored model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    id: ModelId,
    number: i32,
    name: String,
}

impl Model {
    /// Attach an identifier to validated attributes.
    #[must_use]
    pub fn new(id: ModelId, draft: ModelDraft) -> Self {
        let ModelDraft { number, name } = draft;
        Self { id, number, name }
    }

    /// Identifier.
    #[must_use]
    pub const fn id(&self) -> ModelId {
        self.id
    }

    /// Model number.
    #[must_use]
    pub const fn number(&self) -> i32 {
        self.number
    }

    /// Name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ViolationCode;
    use rstest::rstest;

    #[rstest]
    fn accepts_valid_payload() {
        let draft = ModelDraft::try_new(Some(5), Some("Model5".to_owned())).expect("valid");
        let model = Model::new(ModelId::random(), draft);
        assert_eq!(model.number(), 5);
        assert_eq!(model.name(), "Model5");
    }

    #[rstest]
    #[case(None, Some("Model5"), vec![("number", ViolationCode::Missing)])]
    #[case(Some(5), Some(" "), vec![("name", ViolationCode::Blank)])]
    #[case(None, None, vec![("number", ViolationCode::Missing), ("name", ViolationCode::Missing)])]
    fn rejects_invalid_payload(
        #[case] number: Option<i32>,
        #[case] name: Option<&str>,
        #[case] expected: Vec<(&str, ViolationCode)>,
    ) {
        let err = ModelDraft::try_new(number, name.map(str::to_owned)).expect_err("invalid");
        let found: Vec<_> = err.violations().iter().map(|v| (v.field, v.code)).collect();
        assert_eq!(found, expected);
    }

    #[rstest]
    fn rejects_overlong_name() {
        let err = ModelDraft::try_new(Some(1), Some("m".repeat(MODEL_NAME_MAX + 1)))
            .expect_err("too long");
        assert_eq!(err.violations()[0].code, ViolationCode::TooLong);
    }

    #[rstest]
    #[case(-3, "Model-3")]
    #[case(0, "Model0")]
    #[case(10, "Model10")]
    fn numbered_drafts_follow_naming(#[case] number: i32, #[case] name: &str) {
        let draft = ModelDraft::numbered(number);
        assert_eq!(draft.number(), number);
        assert_eq!(draft.name(), name);
    }
}
