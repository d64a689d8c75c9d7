use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;

/// Sort field; renders as `field` or `-field` (descending) on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl SortKey {
    /// Parses the backend spelling, `-created_date` sorts newest first.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.strip_prefix('-').map_or_else(
            || Self { field: raw.to_owned(), descending: false },
            |field| Self { field: field.to_owned(), descending: true },
        )
    }

    fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let ord = compare_values(a.get(&self.field), b.get(&self.field));
        if self.descending { ord.reverse() } else { ord }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            f.write_str(&self.field)
        }
    }
}

/// Optional ordering and page size for `list`/`filter`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub sort: Option<SortKey>,
    pub limit: Option<usize>,
}

impl ListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sort(mut self, raw: &str) -> Self {
        self.sort = Some(SortKey::parse(raw));
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sorts (stable) and truncates locally, for stores that cannot do it server side.
    #[must_use]
    pub fn apply(&self, mut records: Vec<Value>) -> Vec<Value> {
        if let Some(key) = &self.sort {
            records.sort_by(|a, b| key.compare(a, b));
        }
        if let Some(limit) = self.limit {
            records.truncate(limit);
        }
        records
    }
}

/// Field equality conditions, all of which must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Map<String, Value>);

impl Filter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub const fn conditions(&self) -> &Map<String, Value> {
        &self.0
    }

    /// JSON form sent as the `q` query parameter.
    #[must_use]
    pub fn to_query(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    #[must_use]
    pub fn matches(&self, record: &Value) -> bool {
        self.0.iter().all(|(field, expected)| {
            record.get(field).is_some_and(|actual| loosely_equal(actual, expected))
        })
    }
}

/// Equality that treats `1` and `"1"` as the same value, as backend ids come in both shapes.
#[must_use]
pub fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            n.to_string() == *s
        },
        _ => a == b,
    }
}

fn rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_) | Value::Object(_)) => 4,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.total_cmp(&y)
        },
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}
