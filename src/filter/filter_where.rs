use serde_json::Value;

use super::error::FilterError;
use super::types::is_valid_identifier;

/// Translates a JSON where object into a parameterised SQL predicate.
///
/// Every key is a column compared for equality with its value; `null`
/// becomes `IS NULL`. Terms are joined with `AND`.
pub struct FilterWhere {
    param_values: Vec<Value>,
}

impl FilterWhere {
    /// Returns the predicate (`1=1` when there is nothing to filter) and its params
    pub fn generate(where_data: &Value) -> Result<(String, Vec<Value>), FilterError> {
        let obj = match where_data {
            Value::Null => return Ok(("1=1".to_string(), vec![])),
            Value::Object(obj) => obj,
            _ => return Err(FilterError::InvalidWhereClause("WHERE must be an object".to_string())),
        };

        let mut filter_where = Self { param_values: vec![] };
        let mut parts = Vec::with_capacity(obj.len());
        for (column, value) in obj {
            parts.push(filter_where.condition(column, value)?);
        }

        let sql = if parts.is_empty() { "1=1".to_string() } else { parts.join(" AND ") };
        Ok((sql, filter_where.param_values))
    }

    pub fn validate(where_data: &Value) -> Result<(), FilterError> {
        match where_data {
            Value::Null | Value::Object(_) => Ok(()),
            _ => Err(FilterError::InvalidWhereClause("WHERE must be an object".to_string())),
        }
    }

    fn condition(&mut self, column: &str, value: &Value) -> Result<String, FilterError> {
        if !is_valid_identifier(column) {
            return Err(FilterError::InvalidColumn(column.to_string()));
        }
        match value {
            Value::Null => Ok(format!("\"{}\" IS NULL", column)),
            Value::Array(_) | Value::Object(_) => Err(FilterError::InvalidValue(column.to_string())),
            scalar => {
                self.param_values.push(scalar.clone());
                Ok(format!("\"{}\" = ${}", column, self.param_values.len()))
            }
        }
    }
}
