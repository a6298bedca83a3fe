//! Raw connection-log records
//!
//! A record is the ordered 41-field line produced by the connection-log
//! schema. Three fields are categorical strings (protocol type, service,
//! flag); the rest are numeric. Fields are kept as text here and only
//! coerced when the feature vector is built.

use crate::error::{ClassifierError, Result};

/// Number of fields in the connection-log schema.
pub const RECORD_FIELDS: usize = 41;

/// Field names of the connection-log schema, in record order.
pub const FIELD_NAMES: &[&str] = &[
    "duration",
    "protocol_type",
    "service",
    "flag",
    "src_bytes",
    "dst_bytes",
    "land",
    "wrong_fragment",
    "urgent",
    "hot",
    "num_failed_logins",
    "logged_in",
    "num_compromised",
    "root_shell",
    "su_attempted",
    "num_root",
    "num_file_creations",
    "num_shells",
    "num_access_files",
    "num_outbound_cmds",
    "is_host_login",
    "is_guest_login",
    "count",
    "srv_count",
    "serror_rate",
    "srv_serror_rate",
    "rerror_rate",
    "srv_rerror_rate",
    "same_srv_rate",
    "diff_srv_rate",
    "srv_diff_host_rate",
    "dst_host_count",
    "dst_host_srv_count",
    "dst_host_same_srv_rate",
    "dst_host_diff_srv_rate",
    "dst_host_same_src_port_rate",
    "dst_host_srv_diff_host_rate",
    "dst_host_serror_rate",
    "dst_host_srv_serror_rate",
    "dst_host_rerror_rate",
    "dst_host_srv_rerror_rate",
];

/// One connection record, immutable once constructed.
#[derive(Debug, Clone)]
pub struct RawRecord {
    fields: Vec<String>,
}

impl RawRecord {
    /// Parse a record from a comma-separated line.
    ///
    /// Trailing fields beyond the schema (e.g. a dataset label column) are
    /// carried along and ignored by the feature builder. Fewer than 41
    /// fields is a malformed record.
    pub fn parse(line: &str) -> Result<Self> {
        let fields: Vec<String> = line
            .trim_end_matches(['\r', '\n'])
            .split(',')
            .map(|f| f.to_string())
            .collect();
        Self::from_fields(fields)
    }

    /// Build a record from an already-split field sequence.
    pub fn from_fields(fields: Vec<String>) -> Result<Self> {
        if fields.len() < RECORD_FIELDS {
            return Err(ClassifierError::MalformedRecord(format!(
                "expected at least {} fields, got {}",
                RECORD_FIELDS,
                fields.len()
            )));
        }
        Ok(Self { fields })
    }

    /// Get a field by schema position.
    pub fn field(&self, index: usize) -> &str {
        &self.fields[index]
    }

    /// Number of fields carried (>= 41).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record carries no fields (never true for a parsed record).
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_line() -> String {
        let mut fields = vec!["0", "tcp", "telnet", "SF"];
        fields.extend(std::iter::repeat("0").take(37));
        fields.join(",")
    }

    #[test]
    fn test_schema_width() {
        assert_eq!(FIELD_NAMES.len(), RECORD_FIELDS);
    }

    #[test]
    fn test_parse_full_record() {
        let record = RawRecord::parse(&sample_line()).unwrap();
        assert_eq!(record.len(), RECORD_FIELDS);
        assert_eq!(record.field(0), "0");
        assert_eq!(record.field(1), "tcp");
        assert_eq!(record.field(2), "telnet");
        assert_eq!(record.field(3), "SF");
    }

    #[test]
    fn test_parse_strips_line_ending() {
        let line = format!("{}\r\n", sample_line());
        let record = RawRecord::parse(&line).unwrap();
        assert_eq!(record.field(RECORD_FIELDS - 1), "0");
    }

    #[test]
    fn test_trailing_label_column_kept() {
        let line = format!("{},normal", sample_line());
        let record = RawRecord::parse(&line).unwrap();
        assert_eq!(record.len(), RECORD_FIELDS + 1);
    }

    #[test]
    fn test_short_record_rejected() {
        let err = RawRecord::parse("0,tcp,telnet,SF").unwrap_err();
        assert!(matches!(err, ClassifierError::MalformedRecord(_)));
    }

    #[test]
    fn test_empty_line_rejected() {
        assert!(RawRecord::parse("").is_err());
    }
}
