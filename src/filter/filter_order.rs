use super::error::FilterError;
use super::types::{is_valid_identifier, FilterOrderInfo, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    /// Parses `"created_at desc"` or `"category_id, order_index"`
    pub fn parse(order: &str) -> Result<Vec<FilterOrderInfo>, FilterError> {
        let mut out = Vec::new();
        for part in order.split(',') {
            let mut it = part.split_whitespace();
            let Some(column) = it.next() else { continue };
            if !is_valid_identifier(column) {
                return Err(FilterError::InvalidColumn(column.to_string()));
            }
            let sort = match it.next() {
                None => SortDirection::Asc,
                Some(d) if d.eq_ignore_ascii_case("asc") => SortDirection::Asc,
                Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Desc,
                Some(_) => return Err(FilterError::InvalidOrder(part.trim().to_string())),
            };
            if it.next().is_some() {
                return Err(FilterError::InvalidOrder(part.trim().to_string()));
            }
            out.push(FilterOrderInfo { column: column.to_string(), sort });
        }
        Ok(out)
    }

    pub fn generate(infos: &[FilterOrderInfo]) -> String {
        if infos.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = infos
            .iter()
            .map(|i| format!("\"{}\" {}", i.column, i.sort.to_sql()))
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_terms() {
        let infos = FilterOrder::parse("order_index, created_at DESC").unwrap();
        assert_eq!(FilterOrder::generate(&infos), "ORDER BY \"order_index\" ASC, \"created_at\" DESC");
    }

    #[test]
    fn rejects_bad_column_and_direction() {
        assert!(matches!(FilterOrder::parse("1; drop"), Err(FilterError::InvalidColumn(_))));
        assert!(matches!(FilterOrder::parse("name sideways"), Err(FilterError::InvalidOrder(_))));
    }

    #[test]
    fn empty_order_generates_nothing() {
        assert!(FilterOrder::generate(&FilterOrder::parse("").unwrap()).is_empty());
    }
}
