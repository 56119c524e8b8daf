use super::field::{self, Field};
use super::{SqlError, check_column};
use crate::ast::SearchClause;
use crate::value::Value;
use rust_decimal::Decimal;
use std::str::FromStr;

/// A numeric column compared with ordered relations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberField {
    column: String,
}

impl NumberField {
    pub fn new(column: impl Into<String>) -> Self {
        NumberField {
            column: column.into(),
        }
    }
}

fn parse_number(term: &str) -> Result<Decimal, SqlError> {
    Decimal::from_str(term)
        .or_else(|_| Decimal::from_scientific(term))
        .map_err(|_| SqlError::InvalidNumber(term.to_string()))
}

impl Field for NumberField {
    fn column(&self) -> &str {
        &self.column
    }

    fn generate(
        &self,
        search: &SearchClause,
        first_argument: usize,
    ) -> Result<(String, Vec<Value>), SqlError> {
        let column = check_column(&self.column)?;
        if let Some(sql) = field::empty_term(column, search) {
            return Ok((sql, Vec::new()));
        }
        let op = field::ordered_relation(search)?;
        let number = parse_number(&search.term)?;
        Ok((
            format!("{column} {op} ${first_argument}"),
            vec![Value::Number(number)],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42").unwrap(), Decimal::from(42));
        assert_eq!(parse_number("-1.5").unwrap(), Decimal::new(-15, 1));
        assert_eq!(parse_number("1e3").unwrap(), Decimal::from(1000));
        assert_eq!(
            parse_number("x1").unwrap_err(),
            SqlError::InvalidNumber("x1".to_string())
        );
    }
}
