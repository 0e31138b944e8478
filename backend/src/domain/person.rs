//! Person records and the derived age calculation.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, check_present, check_text};

/// Maximum person name length in characters.
pub const PERSON_NAME_MAX: usize = 32;

/// Storage-assigned person identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(i64);

impl PersonId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated person attributes awaiting an identifier.
///
/// Used for both inserts and full replacement updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDraft {
    name: String,
    dob: NaiveDate,
}

impl PersonDraft {
    /// Validate raw payload fields, reporting every offending field at once.
    ///
    /// Names are trimmed before the length check.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when `name` is missing, blank or longer
    /// than [`PERSON_NAME_MAX`], or when `dob` is missing.
    pub fn try_new(name: Option<String>, dob: Option<NaiveDate>) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();
        let name = check_text(&mut errors, "name", name, PERSON_NAME_MAX);
        let dob = check_present(&mut errors, "dob", dob);
        match (name, dob) {
            (Some(name), Some(dob)) => errors.into_result(|| Self { name, dob }),
            _ => Err(errors),
        }
    }

    /// Trimmed display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Date of birth.
    #[must_use]
    pub const fn dob(&self) -> NaiveDate {
        self.dob
    }
}

/// Stored person.
///
/// Age is never stored; read it with [`Person::age_on`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    id: PersonId,
    name: String,
    dob: NaiveDate,
}

impl Person {
    /// Attach a storage identifier to validated attributes.
    #[must_use]
    pub fn new(id: PersonId, draft: PersonDraft) -> Self {
        let PersonDraft { name, dob } = draft;
        Self { id, name, dob }
    }

    /// Storage identifier.
    #[must_use]
    pub const fn id(&self) -> PersonId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Date of birth.
    #[must_use]
    pub const fn dob(&self) -> NaiveDate {
        self.dob
    }

    /// Whole years lived on `today`.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use roster::domain::{Person, PersonDraft, PersonId};
    ///
    /// let dob = NaiveDate::from_ymd_opt(1990, 6, 15).expect("date");
    /// let draft = PersonDraft::try_new(Some("Alice".to_owned()), Some(dob)).expect("draft");
    /// let person = Person::new(PersonId::new(1), draft);
    ///
    /// let before = NaiveDate::from_ymd_opt(2024, 6, 14).expect("date");
    /// let on = NaiveDate::from_ymd_opt(2024, 6, 15).expect("date");
    /// assert_eq!(person.age_on(before), 33);
    /// assert_eq!(person.age_on(on), 34);
    /// ```
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        years_between(self.dob, today)
    }
}

/// Whole years from `from` to `to`, rounded towards negative infinity.
///
/// A year completes on the anniversary of `from`; 29 February anniversaries
/// complete on 1 March in common years.
#[must_use]
pub fn years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years - 1
    } else {
        years
    }
}

/// Latest date of birth whose age on `today` is at least `years`.
///
/// `age_on(today) >= years` holds exactly when `dob <= latest_birth_date_for_age(today, years)`.
/// Results outside the calendar range saturate to [`NaiveDate::MIN`] or
/// [`NaiveDate::MAX`].
#[must_use]
pub fn latest_birth_date_for_age(today: NaiveDate, years: i64) -> NaiveDate {
    let shifted = years
        .checked_mul(12)
        .and_then(|months| u32::try_from(months.unsigned_abs()).ok())
        .and_then(|months| {
            if years >= 0 {
                today.checked_sub_months(Months::new(months))
            } else {
                today.checked_add_months(Months::new(months))
            }
        });
    match shifted {
        Some(date) => date,
        None if years >= 0 => NaiveDate::MIN,
        None => NaiveDate::MAX,
    }
}
