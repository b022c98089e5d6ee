// Standard library
use std::fmt;

// 3rd party crates
use serde_json::Value;
use tracing::{error, warn};

// Project imports
use crate::records::RecordType;
use crate::resources::{Diagnostic, Severity};

// Current module imports
use super::errors::ApplyError;
use super::functions::parse_record;
use super::types::{ApplySummary, RecordKind};

/// Runs `$body` with `$record` bound to the record type of `$kind`.
macro_rules! with_record_type {
    ($kind:expr, $record:ident => $body:expr) => {
        match $kind {
            $crate::apply::RecordKind::A => {
                type $record = $crate::records::RecordA;
                $body
            }
            $crate::apply::RecordKind::AIpaddress => {
                type $record = $crate::records::RecordAIpAddress;
                $body
            }
            $crate::apply::RecordKind::Aaaa => {
                type $record = $crate::records::RecordAaaa;
                $body
            }
            $crate::apply::RecordKind::AaaaIpaddress => {
                type $record = $crate::records::RecordAaaaIpAddress;
                $body
            }
            $crate::apply::RecordKind::Cname => {
                type $record = $crate::records::RecordCname;
                $body
            }
            $crate::apply::RecordKind::CnameIpaddress => {
                type $record = $crate::records::RecordCnameIpAddress;
                $body
            }
            $crate::apply::RecordKind::CnameIpaddressdn => {
                type $record = $crate::records::RecordCnameIpAddressDn;
                $body
            }
            $crate::apply::RecordKind::CnameClientipaddress => {
                type $record = $crate::records::RecordCnameClientIpAddress;
                $body
            }
            $crate::apply::RecordKind::CnameClientipaddressdn => {
                type $record = $crate::records::RecordCnameClientIpAddressDn;
                $body
            }
            $crate::apply::RecordKind::Mx => {
                type $record = $crate::records::RecordMx;
                $body
            }
            $crate::apply::RecordKind::Naptr => {
                type $record = $crate::records::RecordNaptr;
                $body
            }
            $crate::apply::RecordKind::Ptr => {
                type $record = $crate::records::RecordPtr;
                $body
            }
            $crate::apply::RecordKind::Srv => {
                type $record = $crate::records::RecordSrv;
                $body
            }
            $crate::apply::RecordKind::Txt => {
                type $record = $crate::records::RecordTxt;
                $body
            }
        }
    };
}

pub(super) use with_record_type;

impl RecordKind {
    /// Name used in configuration and state.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::A => "a",
            RecordKind::AIpaddress => "a_ipaddress",
            RecordKind::Aaaa => "aaaa",
            RecordKind::AaaaIpaddress => "aaaa_ipaddress",
            RecordKind::Cname => "cname",
            RecordKind::CnameIpaddress => "cname_ipaddress",
            RecordKind::CnameIpaddressdn => "cname_ipaddressdn",
            RecordKind::CnameClientipaddress => "cname_clientipaddress",
            RecordKind::CnameClientipaddressdn => "cname_clientipaddressdn",
            RecordKind::Mx => "mx",
            RecordKind::Naptr => "naptr",
            RecordKind::Ptr => "ptr",
            RecordKind::Srv => "srv",
            RecordKind::Txt => "txt",
        }
    }

    pub fn object_type(&self) -> &'static str {
        with_record_type!(self, R => R::OBJECT_TYPE)
    }

    /// Checks that `fields` describe a valid record of this kind.
    pub fn check(self, fields: &Value) -> Result<(), ApplyError> {
        with_record_type!(self, R => {
            let record: R = parse_record(self, fields)?;
            record
                .validate()
                .map_err(|source| ApplyError::Record { kind: self, source })
        })
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ApplySummary {
    pub(super) fn fail(&mut self, address: &str, err: &ApplyError) {
        let diagnostic = err.to_diagnostic();
        error!(
            address = %address,
            summary = %diagnostic.summary,
            "{}",
            diagnostic.detail
        );
        self.failed += 1;
        self.diagnostics.push(diagnostic);
    }

    pub(super) fn warn(&mut self, address: &str, summary: &str, detail: String) {
        warn!(address = %address, summary = %summary, "{}", detail);
        self.diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            summary: summary.to_string(),
            detail,
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Number of resources that were changed on the grid.
    pub fn changes(&self) -> usize {
        self.created + self.imported + self.updated + self.replaced + self.deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kinds_use_configuration_names() {
        let kind: RecordKind = serde_json::from_value(json!("cname_clientipaddressdn")).unwrap();
        assert_eq!(kind, RecordKind::CnameClientipaddressdn);
        assert_eq!(kind.object_type(), "record:rpz:cname:clientipaddressdn");

        for kind in [RecordKind::AIpaddress, RecordKind::AaaaIpaddress, RecordKind::Naptr] {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
    }

    #[test]
    fn check_accepts_valid_fields() {
        RecordKind::Mx
            .check(&json!({
                "name": "mail.rpz.local",
                "rp_zone": "rpz.local",
                "mail_exchanger": "mx.example.com",
                "preference": 10
            }))
            .unwrap();
    }

    #[test]
    fn check_reports_wrong_types_and_invalid_values() {
        let err = RecordKind::Srv
            .check(&json!({"name": "_sip._tcp.rpz.local", "port": "five"}))
            .unwrap_err();
        assert!(matches!(err, ApplyError::Fields { kind: RecordKind::Srv, .. }));

        let err = RecordKind::Aaaa
            .check(&json!({"name": "x.rpz.local", "rp_zone": "rpz.local", "ipv6addr": "10.0.0.1"}))
            .unwrap_err();
        assert!(matches!(err, ApplyError::Record { kind: RecordKind::Aaaa, .. }));
        assert_eq!(err.to_diagnostic().summary, "Invalid Configuration");
    }

    #[test]
    fn check_treats_missing_fields_as_empty() {
        let err = RecordKind::Txt.check(&Value::Null).unwrap_err();
        assert!(err.to_string().contains("rp_zone"));
    }
}
