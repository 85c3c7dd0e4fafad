use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::Record;

/// Date layouts accepted for the DOB column, tried in order
pub const DOB_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// One row from the tabular source, before coercion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRow {
    #[serde(rename = "Id", deserialize_with = "text_or_number")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "DOB")]
    pub dob: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Email", default)]
    pub email: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
}

fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::UInt(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
    })
}

pub fn parse_dob(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    let mut last_err = None;

    for format in DOB_FORMATS {
        match NaiveDate::parse_from_str(text, format) {
            Ok(date) => return Ok(date),
            Err(e) => last_err = Some(e),
        }
    }

    Err(Error::new(
        ErrorKind::Parse,
        format!(
            "unrecognized date '{}': {}",
            text,
            last_err.map(|e| e.to_string()).unwrap_or_default()
        ),
    ))
}

impl TryFrom<RecordRow> for Record {
    type Error = Error;

    fn try_from(row: RecordRow) -> Result<Self> {
        let id = row.id.trim();
        if id.is_empty() {
            return Err(Error::invalid_input("row has a blank Id"));
        }

        let name = row.name.trim();
        if name.is_empty() {
            return Err(Error::invalid_input(format!("row {} has a blank Name", id)));
        }

        let dob = parse_dob(&row.dob)?;

        Ok(Record::new(id, name, dob, row.country.trim(), row.email.trim()))
    }
}
