//! Defines common, reusable AST nodes for building SQL queries.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    /// Splits a configured table name such as `archive.citizens` into its
    /// schema and table parts. Names without a dot have no schema.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('.') {
            Some((schema, name)) if !schema.is_empty() && !name.is_empty() => TableRef {
                schema: Some(schema.to_string()),
                name: name.to_string(),
            },
            _ => TableRef {
                schema: None,
                name: raw.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_name() {
        assert_eq!(TableRef::parse("citizens"), crate::table_ref!("citizens"));
    }

    #[test]
    fn test_parse_schema_qualified_name() {
        assert_eq!(
            TableRef::parse("archive.citizens"),
            crate::table_ref!("archive", "citizens")
        );
    }
}
