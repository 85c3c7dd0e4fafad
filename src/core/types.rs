use serde::{Serialize, Deserialize};
use std::borrow::Borrow;
use std::fmt;
use chrono::{Datelike, NaiveDate};

/// Opaque record identifier, unique within a store
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId(id)
    }
}

// Lets HashMap<RecordId, _> be queried with a plain &str
impl Borrow<str> for RecordId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One person's directory entry. Never mutated once built; an update is a
/// delete followed by a fresh insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub dob: NaiveDate,
    pub country: String,
    pub email: String,
}

impl Record {
    pub fn new(
        id: impl Into<RecordId>,
        name: impl Into<String>,
        dob: NaiveDate,
        country: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Record {
            id: id.into(),
            name: name.into(),
            dob,
            country: country.into(),
            email: email.into(),
        }
    }

    pub fn birth_month(&self) -> BirthMonth {
        BirthMonth::from_date(self.dob)
    }
}

/// Anything stored in the name index must expose the id used for removal
pub trait Identified {
    fn record_id(&self) -> &RecordId;
}

impl Identified for Record {
    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

impl<T: Identified + ?Sized> Identified for std::sync::Arc<T> {
    fn record_id(&self) -> &RecordId {
        (**self).record_id()
    }
}

/// Year-month bucket key for birth dates, `month` is 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BirthMonth {
    pub year: i32,
    pub month: u32,
}

impl BirthMonth {
    pub fn new(year: i32, month: u32) -> Self {
        BirthMonth { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        BirthMonth {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for BirthMonth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birth_month_from_date() {
        let dob = NaiveDate::from_ymd_opt(2000, 5, 17).unwrap();
        let record = Record::new("1", "Ann Lee", dob, "Norway", "ann@example.com");

        assert_eq!(record.birth_month(), BirthMonth::new(2000, 5));
        assert_eq!(record.birth_month().to_string(), "2000-05");
    }

    #[test]
    fn test_record_id_borrows_as_str() {
        let mut ids = std::collections::HashSet::new();
        ids.insert(RecordId::from("abc"));

        assert!(ids.contains("abc"));
        assert_eq!(RecordId::new("abc").as_str(), "abc");
    }
}
