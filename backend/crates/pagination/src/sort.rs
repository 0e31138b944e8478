//! Sort order parsing for `sort=prop[,prop...][,asc|desc]` parameters.

use serde::{Deserialize, Serialize};

/// Ordering direction for one sort property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Smallest values first.
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Largest values first.
    #[serde(rename = "desc")]
    Descending,
}

impl Direction {
    /// Parse `asc`/`desc`, ignoring ASCII case.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(Self::Ascending)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(Self::Descending)
        } else {
            None
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// One property plus its direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    property: String,
    direction: Direction,
}

impl SortOrder {
    /// Create an order on `property`.
    pub fn new(property: impl Into<String>, direction: Direction) -> Self {
        Self {
            property: property.into(),
            direction,
        }
    }

    /// Property name as supplied by the caller.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Requested direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

/// Ordered list of sort criteria; empty means natural order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    orders: Vec<SortOrder>,
}

impl Sort {
    /// Natural (storage) order.
    #[must_use]
    pub const fn unsorted() -> Self {
        Self { orders: Vec::new() }
    }

    /// Build from explicit orders.
    #[must_use]
    pub const fn by(orders: Vec<SortOrder>) -> Self {
        Self { orders }
    }

    /// Parse every raw `sort` parameter value.
    ///
    /// Each value lists comma-separated properties, optionally followed by a
    /// trailing `asc` or `desc` applying to all of them. Empty segments are
    /// skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::{Direction, Sort};
    ///
    /// let sort = Sort::from_params(["name,dob,desc", "id"]);
    /// let parsed: Vec<_> = sort
    ///     .orders()
    ///     .iter()
    ///     .map(|order| (order.property(), order.direction()))
    ///     .collect();
    /// assert_eq!(
    ///     parsed,
    ///     vec![
    ///         ("name", Direction::Descending),
    ///         ("dob", Direction::Descending),
    ///         ("id", Direction::Ascending),
    ///     ]
    /// );
    /// ```
    pub fn from_params<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut orders = Vec::new();
        for value in values {
            let segments: Vec<&str> = value
                .as_ref()
                .split(',')
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .collect();
            let (direction, properties) = match segments.split_last() {
                Some((last, rest)) => match Direction::parse(last) {
                    Some(direction) => (direction, rest),
                    None => (Direction::Ascending, segments.as_slice()),
                },
                None => continue,
            };
            orders.extend(
                properties
                    .iter()
                    .map(|property| SortOrder::new(*property, direction)),
            );
        }
        Self { orders }
    }

    /// Criteria in precedence order.
    #[must_use]
    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    /// Whether no criteria were requested.
    #[must_use]
    pub fn is_unsorted(&self) -> bool {
        self.orders.is_empty()
    }
}
