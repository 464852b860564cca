use chrono::NaiveDate;

/// A single query-string value before stringification.
///
/// `Absent` and empty text are dropped when the URL is built, so callers can
/// pass optional filters straight through without branching.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Absent,
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
}

impl QueryValue {
    /// The stringified value, or `None` when the parameter must be omitted.
    pub fn render(&self) -> Option<String> {
        match self {
            QueryValue::Absent => None,
            QueryValue::Text(text) if text.is_empty() => None,
            QueryValue::Text(text) => Some(text.clone()),
            QueryValue::Integer(value) => Some(value.to_string()),
            QueryValue::Unsigned(value) => Some(value.to_string()),
            QueryValue::Float(value) => Some(value.to_string()),
            QueryValue::Bool(value) => Some(value.to_string()),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        QueryValue::Text(value.clone())
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Integer(i64::from(value))
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Integer(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Unsigned(u64::from(value))
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        QueryValue::Unsigned(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<NaiveDate> for QueryValue {
    fn from(value: NaiveDate) -> Self {
        QueryValue::Text(value.format("%Y-%m-%d").to_string())
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(QueryValue::Absent, Into::into)
    }
}

/// Ordered query parameters for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    params: Vec<(String, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key`, replacing an earlier value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
    }

    /// Parameters that survive into the URL, already stringified.
    pub fn pairs(&self) -> Vec<(&str, String)> {
        self.params
            .iter()
            .filter_map(|(key, value)| value.render().map(|rendered| (key.as_str(), rendered)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
