//! Scan filter conditions.

use crate::error::{ClientError, ClientResult};
use std::cmp::Ordering;
use std::fmt;
use tablestore_codec::{Item, Value};

/// Comparison applied by a [`ScanCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanOperator {
    /// Attribute equals the value.
    Equal,
    /// Attribute is absent or differs from the value.
    NotEqual,
    /// Attribute is less than the value.
    LessThan,
    /// Attribute is less than or equal to the value.
    LessThanOrEqual,
    /// Attribute is greater than the value.
    GreaterThan,
    /// Attribute is greater than or equal to the value.
    GreaterThanOrEqual,
    /// Attribute is present and not null.
    IsNotNull,
    /// Attribute is absent or null.
    IsNull,
    /// Attribute contains the value (substring, subsequence or list member).
    Contains,
    /// Attribute is present and does not contain the value.
    NotContains,
    /// Attribute starts with the value.
    BeginsWith,
    /// Attribute equals one of the values.
    In,
    /// Attribute lies within the two values, inclusive.
    Between,
}

impl ScanOperator {
    /// Wire-format name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "EQ",
            Self::NotEqual => "NE",
            Self::LessThan => "LT",
            Self::LessThanOrEqual => "LE",
            Self::GreaterThan => "GT",
            Self::GreaterThanOrEqual => "GE",
            Self::IsNotNull => "NOT_NULL",
            Self::IsNull => "NULL",
            Self::Contains => "CONTAINS",
            Self::NotContains => "NOT_CONTAINS",
            Self::BeginsWith => "BEGINS_WITH",
            Self::In => "IN",
            Self::Between => "BETWEEN",
        }
    }

    fn arity_ok(self, n: usize) -> bool {
        match self {
            Self::IsNull | Self::IsNotNull => n == 0,
            Self::Between => n == 2,
            Self::In => n >= 1,
            _ => n == 1,
        }
    }
}

impl fmt::Display for ScanOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filter on one attribute, evaluated during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanCondition {
    /// Attribute the condition inspects.
    pub attribute_name: String,
    /// Comparison to apply.
    pub operator: ScanOperator,
    /// Comparison operands.
    pub values: Vec<Value>,
}

impl ScanCondition {
    /// Creates a condition from its parts.
    pub fn new(
        attribute_name: impl Into<String>,
        operator: ScanOperator,
        values: Vec<Value>,
    ) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            operator,
            values,
        }
    }

    /// `attribute == value`.
    pub fn eq(attribute_name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(attribute_name, ScanOperator::Equal, vec![value.into()])
    }

    /// `attribute != value`.
    pub fn ne(attribute_name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(attribute_name, ScanOperator::NotEqual, vec![value.into()])
    }

    /// `attribute < value`.
    pub fn lt(attribute_name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(attribute_name, ScanOperator::LessThan, vec![value.into()])
    }

    /// `attribute > value`.
    pub fn gt(attribute_name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(attribute_name, ScanOperator::GreaterThan, vec![value.into()])
    }

    /// Attribute is present and not null.
    pub fn not_null(attribute_name: impl Into<String>) -> Self {
        Self::new(attribute_name, ScanOperator::IsNotNull, Vec::new())
    }

    /// Attribute is absent or null.
    pub fn is_null(attribute_name: impl Into<String>) -> Self {
        Self::new(attribute_name, ScanOperator::IsNull, Vec::new())
    }

    /// `low <= attribute <= high`.
    pub fn between(
        attribute_name: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        Self::new(
            attribute_name,
            ScanOperator::Between,
            vec![low.into(), high.into()],
        )
    }

    /// Checks the operand count against the operator.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] on a wrong operand count.
    pub fn validate(&self) -> ClientResult<()> {
        if self.operator.arity_ok(self.values.len()) {
            Ok(())
        } else {
            Err(ClientError::validation(format!(
                "invalid number of operands ({}) for operator {} on attribute {}",
                self.values.len(),
                self.operator,
                self.attribute_name
            )))
        }
    }

    /// Evaluates the condition against an item.
    ///
    /// A condition missing an operand its operator needs matches nothing;
    /// [`validate`](Self::validate) reports it as an error instead.
    pub fn matches(&self, item: &Item) -> bool {
        if !self.operator.arity_ok(self.values.len()) {
            return false;
        }
        let attr = item.get(&self.attribute_name);
        let present = attr.filter(|v| !v.is_null());
        let first = self.values.first();
        let ordered = |want: fn(Ordering) -> bool| {
            present
                .zip(first)
                .and_then(|(v, operand)| v.compare(operand))
                .is_some_and(want)
        };
        let with_operand = |test: fn(&Value, &Value) -> bool| {
            present
                .zip(first)
                .is_some_and(|(v, operand)| test(v, operand))
        };

        match self.operator {
            ScanOperator::Equal => first.is_some_and(|operand| attr == Some(operand)),
            ScanOperator::NotEqual => first.is_some_and(|operand| attr != Some(operand)),
            ScanOperator::LessThan => ordered(Ordering::is_lt),
            ScanOperator::LessThanOrEqual => ordered(Ordering::is_le),
            ScanOperator::GreaterThan => ordered(Ordering::is_gt),
            ScanOperator::GreaterThanOrEqual => ordered(Ordering::is_ge),
            ScanOperator::IsNotNull => present.is_some(),
            ScanOperator::IsNull => present.is_none(),
            ScanOperator::Contains => with_operand(Value::contains),
            ScanOperator::NotContains => with_operand(|v, operand| !v.contains(operand)),
            ScanOperator::BeginsWith => with_operand(Value::begins_with),
            ScanOperator::In => attr.is_some_and(|v| self.values.contains(v)),
            ScanOperator::Between => match (present, first, self.values.get(1)) {
                (Some(v), Some(low), Some(high)) => {
                    v.compare(low).is_some_and(Ordering::is_ge)
                        && v.compare(high).is_some_and(Ordering::is_le)
                }
                _ => false,
            },
        }
    }
}

/// Returns true if `item` satisfies every condition.
pub fn matches_all(conditions: &[ScanCondition], item: &Item) -> bool {
    conditions.iter().all(|c| c.matches(item))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(id: &str, color: &str, size: i64) -> Item {
        Item::new()
            .with("Id", id)
            .with("Color", color)
            .with("Size", size)
    }

    #[test]
    fn equality_and_inequality() {
        let red = widget("w1", "red", 3);
        assert!(ScanCondition::eq("Color", "red").matches(&red));
        assert!(!ScanCondition::eq("Color", "blue").matches(&red));
        assert!(ScanCondition::ne("Color", "blue").matches(&red));
        // Missing attribute is "not equal" but never "equal".
        assert!(ScanCondition::ne("Finish", "matte").matches(&red));
        assert!(!ScanCondition::eq("Finish", "matte").matches(&red));
    }

    #[test]
    fn ordering_requires_matching_types() {
        let item = widget("w1", "red", 3);
        assert!(ScanCondition::lt("Size", 4i64).matches(&item));
        assert!(ScanCondition::gt("Size", 2i64).matches(&item));
        assert!(!ScanCondition::gt("Size", "2").matches(&item));
        assert!(ScanCondition::between("Size", 3i64, 5i64).matches(&item));
        assert!(!ScanCondition::between("Size", 4i64, 5i64).matches(&item));
    }

    #[test]
    fn null_checks() {
        let item = widget("w1", "red", 3).with("Note", ());
        assert!(ScanCondition::not_null("Id").matches(&item));
        assert!(!ScanCondition::not_null("Note").matches(&item));
        assert!(ScanCondition::is_null("Note").matches(&item));
        assert!(ScanCondition::is_null("Missing").matches(&item));
    }

    #[test]
    fn contains_begins_with_and_in() {
        let item = widget("widget-7", "dark red", 3);
        let c = |op, v: &str| ScanCondition::new("Color", op, vec![Value::from(v)]);

        assert!(c(ScanOperator::Contains, "red").matches(&item));
        assert!(!c(ScanOperator::NotContains, "red").matches(&item));
        assert!(c(ScanOperator::NotContains, "blue").matches(&item));
        assert!(c(ScanOperator::BeginsWith, "dark").matches(&item));

        let within = ScanCondition::new(
            "Size",
            ScanOperator::In,
            vec![Value::Integer(1), Value::Integer(3)],
        );
        assert!(within.matches(&item));
    }

    #[test]
    fn conditions_combine_with_and() {
        let item = widget("w1", "red", 3);
        let both = [ScanCondition::eq("Color", "red"), ScanCondition::gt("Size", 1i64)];
        let one_fails = [ScanCondition::eq("Color", "red"), ScanCondition::gt("Size", 9i64)];

        assert!(matches_all(&both, &item));
        assert!(!matches_all(&one_fails, &item));
        assert!(matches_all(&[], &item));
    }

    #[test]
    fn operand_count_is_validated() {
        assert!(ScanCondition::not_null("Id").validate().is_ok());
        assert!(ScanCondition::between("Size", 1i64, 2i64).validate().is_ok());

        let bad = ScanCondition::new("Id", ScanOperator::IsNotNull, vec![Value::Bool(true)]);
        assert!(matches!(bad.validate(), Err(ClientError::Validation { .. })));

        let bad = ScanCondition::new("Size", ScanOperator::Between, vec![Value::Integer(1)]);
        assert!(bad.validate().is_err());

        let bad = ScanCondition::new("Size", ScanOperator::In, vec![]);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn missing_operands_match_nothing() {
        let item = widget("w1", "red", 3);
        let bare = |attribute: &str, op| ScanCondition::new(attribute, op, vec![]);

        assert!(!bare("Id", ScanOperator::Equal).matches(&item));
        assert!(!bare("Id", ScanOperator::NotEqual).matches(&item));
        assert!(!bare("Size", ScanOperator::LessThan).matches(&item));
        assert!(!bare("Color", ScanOperator::Contains).matches(&item));
        assert!(!bare("Color", ScanOperator::BeginsWith).matches(&item));

        let half_range = ScanCondition::new("Size", ScanOperator::Between, vec![Value::Integer(1)]);
        assert!(!half_range.matches(&item));
        assert!(!matches_all(
            &[ScanCondition::eq("Color", "red"), half_range],
            &item
        ));
    }
}
