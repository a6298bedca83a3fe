//! Categorical codebooks for connection-record fields
//!
//! Maps the three categorical record fields (protocol type, service,
//! connection flag) to the dense integer codes the classifier was trained
//! with. A value's code is its position in the vocabulary slice; the
//! orderings are training-time constants and must not be rearranged.

use crate::error::{ClassifierError, Result};

/// Output label vocabulary. Position == class index of the network's output
/// layer, so this ordering is load-bearing data.
pub const LABELS: &[&str] = &["DOS", "Probing", "R2L", "U2R", "normal"];

/// A fixed vocabulary for one categorical field.
#[derive(Debug)]
pub struct Codebook {
    field: &'static str,
    values: &'static [&'static str],
}

/// Protocol type codebook (record field 1).
pub static PROTOCOL_TYPE: Codebook = Codebook {
    field: "protocol_type",
    values: &["icmp", "tcp", "udp"],
};

/// Network service codebook (record field 2).
pub static SERVICE: Codebook = Codebook {
    field: "service",
    values: &[
        "IRC", "X11", "Z39_50", "aol", "auth", "bgp", "courier", "csnet_ns", "ctf", "daytime",
        "discard", "domain", "domain_u", "echo", "eco_i", "ecr_i", "efs", "exec", "finger", "ftp",
        "ftp_data", "gopher", "harvest", "hostnames", "http", "http_2784", "http_443", "http_8001",
        "imap4", "iso_tsap", "klogin", "kshell", "ldap", "link", "login", "mtp", "name",
        "netbios_dgm", "netbios_ns", "netbios_ssn", "netstat", "nnsp", "nntp", "ntp_u", "other",
        "pm_dump", "pop_2", "pop_3", "printer", "private", "red_i", "remote_job", "rje", "shell",
        "smtp", "sql_net", "ssh", "sunrpc", "supdup", "systat", "telnet", "tftp_u", "tim_i",
        "time", "urh_i", "urp_i", "uucp", "uucp_path", "vmnet", "whois",
    ],
};

/// Connection status flag codebook (record field 3).
pub static FLAG: Codebook = Codebook {
    field: "flag",
    values: &[
        "OTH", "REJ", "RSTO", "RSTOS0", "RSTR", "S0", "S1", "S2", "S3", "SF", "SH",
    ],
};

impl Codebook {
    /// Encode a categorical value to its integer code.
    ///
    /// Lookup is exact-string match; no trimming or case folding. A value
    /// absent from the vocabulary is a hard failure, not a fallback bucket.
    pub fn encode(&self, value: &str) -> Result<u32> {
        self.values
            .iter()
            .position(|&v| v == value)
            .map(|idx| idx as u32)
            .ok_or_else(|| ClassifierError::UnknownCategory {
                field: self.field,
                value: value.to_string(),
            })
    }

    /// Field name this codebook encodes.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Number of entries in the vocabulary.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_sizes() {
        assert_eq!(PROTOCOL_TYPE.len(), 3);
        assert_eq!(SERVICE.len(), 70);
        assert_eq!(FLAG.len(), 11);
        assert_eq!(LABELS.len(), 5);
    }

    #[test]
    fn test_known_encodings() {
        assert_eq!(PROTOCOL_TYPE.encode("icmp").unwrap(), 0);
        assert_eq!(PROTOCOL_TYPE.encode("tcp").unwrap(), 1);
        assert_eq!(PROTOCOL_TYPE.encode("udp").unwrap(), 2);

        assert_eq!(SERVICE.encode("IRC").unwrap(), 0);
        assert_eq!(SERVICE.encode("http").unwrap(), 24);
        assert_eq!(SERVICE.encode("other").unwrap(), 44);
        assert_eq!(SERVICE.encode("telnet").unwrap(), 60);
        assert_eq!(SERVICE.encode("whois").unwrap(), 69);

        assert_eq!(FLAG.encode("OTH").unwrap(), 0);
        assert_eq!(FLAG.encode("SF").unwrap(), 9);
        assert_eq!(FLAG.encode("SH").unwrap(), 10);
    }

    #[test]
    fn test_unknown_value() {
        let err = SERVICE.encode("not_a_real_service").unwrap_err();
        match err {
            ClassifierError::UnknownCategory { field, value } => {
                assert_eq!(field, "service");
                assert_eq!(value, "not_a_real_service");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        assert!(PROTOCOL_TYPE.encode("TCP").is_err());
        assert!(PROTOCOL_TYPE.encode(" tcp").is_err());
        assert!(FLAG.encode("sf").is_err());
    }

    #[test]
    fn test_label_order() {
        assert_eq!(LABELS[0], "DOS");
        assert_eq!(LABELS[4], "normal");
    }
}
