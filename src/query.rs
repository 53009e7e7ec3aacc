//! Builders for the `WHERE` portion of QuickBooks SQL-like select statements.

use std::fmt;

use rust_decimal::Decimal;

/// A filter value, rendered into a where clause according to its type:
/// booleans as the bare tokens `True`/`False`, numbers unquoted, strings
/// single-quoted with embedded quotes escaped.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Number(Decimal),
    Text(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "'{}'", value.replace('\'', "\\'")),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<Decimal> for FilterValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Comparison operators selectable by a field-name suffix, matching the
/// vendor's filter grammar. Longer suffixes first so `__gte` wins over `__gt`.
const OPERATOR_SUFFIXES: &[(&str, &str)] = &[
    ("__gte", ">="),
    ("__lte", "<="),
    ("__gt", ">"),
    ("__lt", "<"),
    ("__like", "LIKE"),
];

fn split_operator(field: &str) -> (&str, &str) {
    for (suffix, operator) in OPERATOR_SUFFIXES {
        if let Some(column) = field.strip_suffix(suffix) {
            return (column, operator);
        }
    }
    (field, "=")
}

/// Builds a where clause from field/value pairs, joined with ` AND `.
///
/// Conditions appear in the input's iteration order, so the resulting select
/// statement is reproducible. Field names may carry an operator suffix
/// (`Balance__gt`, `DisplayName__like`); without one the comparison is
/// equality.
///
/// ```
/// use quickbooks_rs::query::build_where_clause;
///
/// let clause = build_where_clause([
///     ("Active", true.into()),
///     ("DisplayName__like", "Acme%".into()),
/// ]);
/// assert_eq!(clause, "Active = True AND DisplayName LIKE 'Acme%'");
/// ```
pub fn build_where_clause<'a, I>(filters: I) -> String
where
    I: IntoIterator<Item = (&'a str, FilterValue)>,
{
    let conditions: Vec<String> = filters
        .into_iter()
        .map(|(field, value)| {
            let (column, operator) = split_operator(field);
            format!("{column} {operator} {value}")
        })
        .collect();
    conditions.join(" AND ")
}

/// Builds an `in (...)` clause for a single field from explicit candidate
/// values. Returns an empty string for an empty candidate list.
pub fn build_choose_clause<I>(choices: I, field: &str) -> String
where
    I: IntoIterator<Item = FilterValue>,
{
    let rendered: Vec<String> = choices.into_iter().map(|c| c.to_string()).collect();
    if rendered.is_empty() {
        String::new()
    } else {
        format!("{field} in ({})", rendered.join(", "))
    }
}
