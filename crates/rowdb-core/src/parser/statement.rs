//! Data statement parsing.

use tracing::debug;

use crate::error::{RowDbError, RowDbResult};
use crate::storage::Record;

use super::split_command;

/// Number of fields an `insert` takes.
const INSERT_FIELDS: usize = 3;

/// A parsed data statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Append a record to the store.
    Insert(Record),
    /// Render every stored record.
    Select,
}

impl Statement {
    /// Parses a line classified as a data statement.
    ///
    /// ```rust
    /// use rowdb_core::parser::Statement;
    /// use rowdb_core::storage::Record;
    ///
    /// let stmt = Statement::parse("insert 1, alice, alice@example.com").unwrap();
    /// assert_eq!(
    ///     stmt,
    ///     Statement::Insert(Record::new(1, "alice", "alice@example.com"))
    /// );
    /// assert_eq!(Statement::parse("select").unwrap(), Statement::Select);
    /// ```
    pub fn parse(line: &str) -> RowDbResult<Self> {
        let (keyword, args) = split_command(line);

        let statement = match keyword {
            "insert" => Self::parse_insert(&args)?,
            // Arguments to select are accepted and ignored.
            "select" => Self::Select,
            _ => {
                return Err(RowDbError::unrecognized_statement(format!(
                    "unrecognized keyword at start of `{}`",
                    line.trim()
                )))
            }
        };

        debug!(?statement, "parsed statement");
        Ok(statement)
    }

    fn parse_insert(args: &[&str]) -> RowDbResult<Self> {
        if args.len() != INSERT_FIELDS {
            return Err(RowDbError::statement_argument(format!(
                "insert expects {INSERT_FIELDS} fields, got {}",
                args.len()
            )));
        }

        let id = parse_id(args[0])?;
        let record = Record::new(id, args[1], args[2]);
        if record.is_empty() {
            return Err(RowDbError::statement_argument(
                "insert requires a non-empty record",
            ));
        }

        Ok(Self::Insert(record))
    }
}

/// Parses an unsigned decimal id that fits in 32 bits.
fn parse_id(field: &str) -> RowDbResult<u32> {
    let invalid = || RowDbError::statement_argument(format!("invalid id `{field}`"));

    // `u32::from_str` would also accept a leading `+`.
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    field.parse().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kind_of(line: &str) -> ErrorKind {
        Statement::parse(line).unwrap_err().kind()
    }

    #[test]
    fn test_parse_insert() {
        match Statement::parse("insert 42,bob,bob@x.com").unwrap() {
            Statement::Insert(record) => {
                assert_eq!(record.id, 42);
                assert_eq!(record.username, "bob");
                assert_eq!(record.email, "bob@x.com");
            }
            Statement::Select => panic!("Expected Insert statement"),
        }
    }

    #[test]
    fn test_parse_select_ignores_arguments() {
        assert_eq!(Statement::parse("select").unwrap(), Statement::Select);
        assert_eq!(Statement::parse("select a,b").unwrap(), Statement::Select);
    }

    #[test]
    fn test_insert_field_count() {
        assert_eq!(kind_of("insert"), ErrorKind::StatementArgument);
        assert_eq!(kind_of("insert 1,bob"), ErrorKind::StatementArgument);
        assert_eq!(kind_of("insert 1,bob,b@x,extra"), ErrorKind::StatementArgument);
    }

    #[test]
    fn test_insert_bad_id() {
        assert_eq!(kind_of("insert abc,bob,bob@x.com"), ErrorKind::StatementArgument);
        assert_eq!(kind_of("insert -1,bob,bob@x.com"), ErrorKind::StatementArgument);
        assert_eq!(kind_of("insert +1,bob,bob@x.com"), ErrorKind::StatementArgument);
        assert_eq!(kind_of("insert 4294967296,bob,b@x"), ErrorKind::StatementArgument);
        assert_eq!(kind_of("insert ,bob,bob@x.com"), ErrorKind::StatementArgument);
    }

    #[test]
    fn test_insert_max_id() {
        match Statement::parse("insert 4294967295,bob,b@x").unwrap() {
            Statement::Insert(record) => assert_eq!(record.id, u32::MAX),
            Statement::Select => panic!("Expected Insert statement"),
        }
    }

    #[test]
    fn test_insert_empty_record() {
        assert_eq!(kind_of("insert 0,,"), ErrorKind::StatementArgument);
    }

    #[test]
    fn test_insert_partially_blank_record() {
        assert_eq!(
            Statement::parse("insert 0,bob,").unwrap(),
            Statement::Insert(Record::new(0, "bob", ""))
        );
    }

    #[test]
    fn test_unrecognized_statement() {
        assert_eq!(kind_of("update 1,x,y"), ErrorKind::UnrecognizedStatement);
        assert_eq!(kind_of("INSERT 1,x,y"), ErrorKind::UnrecognizedStatement);
        assert_eq!(kind_of(""), ErrorKind::UnrecognizedStatement);
    }
}
