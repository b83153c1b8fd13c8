/*! Structured records

A [Record] is an `(article, abstract)` pair of byte strings.
Its payload encoding is a single Avro datum (no container header) of the following schema:

```json
{
  "type": "record",
  "name": "tweetsum_example",
  "fields": [
    {"name": "article", "type": "bytes"},
    {"name": "abstract", "type": "bytes"}
  ]
}
```
!*/
use std::io::Cursor;

use avro_rs::{types::Value, Schema};
use lazy_static::lazy_static;

use crate::error::Error;

const SCHEMA_STR: &str = r#"
{
  "type": "record",
  "name": "tweetsum_example",
  "fields": [
    {"name": "article", "type": "bytes"},
    {"name": "abstract", "type": "bytes"}
  ]
}
"#;

lazy_static! {
    pub static ref SCHEMA: Schema = match Schema::parse_str(SCHEMA_STR) {
        Ok(schema) => schema,
        Err(e) => panic!("invalid record schema: {}", e),
    };
}

/// Immutable `(article, abstract)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    article: Vec<u8>,
    abstract_: Vec<u8>,
}

impl Record {
    pub fn new(article: Vec<u8>, abstract_: Vec<u8>) -> Self {
        Self { article, abstract_ }
    }

    /// Get a reference to the record's article.
    pub fn article(&self) -> &[u8] {
        &self.article
    }

    /// Get a reference to the record's abstract.
    pub fn abstract_(&self) -> &[u8] {
        &self.abstract_
    }

    /// Encode the record as an Avro datum.
    pub fn to_payload(&self) -> Result<Vec<u8>, Error> {
        let value = Value::Record(vec![
            ("article".to_string(), Value::Bytes(self.article.clone())),
            ("abstract".to_string(), Value::Bytes(self.abstract_.clone())),
        ]);
        Ok(avro_rs::to_avro_datum(&SCHEMA, value)?)
    }

    /// Decode a record from an Avro datum.
    ///
    /// The whole payload has to be consumed.
    pub fn from_payload(payload: &[u8]) -> Result<Self, Error> {
        let mut cursor = Cursor::new(payload);
        let value = avro_rs::from_avro_datum(&SCHEMA, &mut cursor, None)?;
        if cursor.position() != payload.len() as u64 {
            return Err(Error::Record(format!(
                "{} trailing bytes after record",
                payload.len() as u64 - cursor.position()
            )));
        }

        let fields = match value {
            Value::Record(fields) => fields,
            other => return Err(Error::Record(format!("expected a record, got {:?}", other))),
        };

        let mut article = None;
        let mut abstract_ = None;
        for (name, value) in fields {
            match (name.as_str(), value) {
                ("article", Value::Bytes(b)) => article = Some(b),
                ("abstract", Value::Bytes(b)) => abstract_ = Some(b),
                (name, value) => {
                    return Err(Error::Record(format!(
                        "unexpected field {}: {:?}",
                        name, value
                    )))
                }
            }
        }

        match (article, abstract_) {
            (Some(article), Some(abstract_)) => Ok(Self { article, abstract_ }),
            _ => Err(Error::Record("missing article or abstract".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_round_trip() {
        let r = Record::new(b"some article .".to_vec(), b"<s> t </s> <s> p </s>".to_vec());
        let payload = r.to_payload().unwrap();
        assert_eq!(Record::from_payload(&payload).unwrap(), r);
    }

    #[test]
    fn empty_fields() {
        let r = Record::new(vec![], vec![]);
        let payload = r.to_payload().unwrap();
        // two zero-length byte fields
        assert_eq!(payload, vec![0, 0]);
        assert_eq!(Record::from_payload(&payload).unwrap(), r);
    }

    #[test]
    fn trailing_bytes() {
        let mut payload = Record::new(b"a".to_vec(), b"b".to_vec())
            .to_payload()
            .unwrap();
        payload.push(0);
        assert!(matches!(
            Record::from_payload(&payload),
            Err(Error::Record(_))
        ));
    }

    #[test]
    fn truncated_payload() {
        let payload = Record::new(b"article".to_vec(), b"abstract".to_vec())
            .to_payload()
            .unwrap();
        assert!(Record::from_payload(&payload[..3]).is_err());
    }
}
