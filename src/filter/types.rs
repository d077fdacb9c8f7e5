use serde_json::{Map, Value};

/// Read description consumed by `Filter::assign`.
///
/// `where_clause` is an object of column → value pairs joined with `AND`;
/// a `null` value matches `IS NULL`. `order` is a comma-separated list of
/// `column [asc|desc]` terms.
#[derive(Debug, Clone, Default)]
pub struct FilterData {
    pub where_clause: Option<Value>,
    pub order: Option<String>,
    pub limit: Option<i32>,
}

impl FilterData {
    pub fn where_(conditions: Value) -> Self {
        Self { where_clause: Some(conditions), ..Default::default() }
    }

    /// Shorthand for a single `column = value` condition
    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        let mut conditions = Map::new();
        conditions.insert(column.to_string(), value.into());
        Self::where_(Value::Object(conditions))
    }

    pub fn order_by(mut self, order: &str) -> Self {
        self.order = Some(order.to_string());
        self
    }

    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}

/// Identifier check shared by table, column and order validation
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
