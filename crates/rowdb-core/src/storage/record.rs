//! The record stored in every row.

/// One stored row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Record {
    /// Row id. Not checked for uniqueness.
    pub id: u32,
    /// User name.
    pub username: String,
    /// E-mail address.
    pub email: String,
}

impl Record {
    /// Creates a new record.
    pub fn new(id: u32, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }

    /// Returns true if every field is blank: id `0` and both strings empty.
    ///
    /// A record with only some blank fields is not empty.
    pub fn is_empty(&self) -> bool {
        self.id == 0 && self.username.is_empty() && self.email.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record() {
        assert!(Record::default().is_empty());
        assert!(Record::new(0, "", "").is_empty());
    }

    #[test]
    fn test_partially_blank_record_is_not_empty() {
        assert!(!Record::new(0, "alice", "").is_empty());
        assert!(!Record::new(0, "", "a@x.com").is_empty());
        assert!(!Record::new(7, "", "").is_empty());
    }
}
