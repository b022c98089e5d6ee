// 3rd party crates
use serde::{Deserialize, Serialize};

/// Fields shared by every response policy zone record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommonFields {
    /// Response policy zone holding the record.
    #[serde(default)]
    pub rp_zone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_ttl: Option<bool>,
    /// Zone the record was placed in. Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

/// Substitute IPv4 address rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ipv4Fields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ipv4addr: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

/// Substitute IPv6 address rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ipv6Fields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ipv6addr: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

/// CNAME rule. An empty `canonical` is a block (NXDOMAIN) rule, `*` a
/// block (no data) rule and the record's own name a passthru rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CnameFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub canonical: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

/// `record:rpz:a`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordA(pub Ipv4Fields);

/// `record:rpz:a:ipaddress`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordAIpAddress(pub Ipv4Fields);

/// `record:rpz:aaaa`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordAaaa(pub Ipv6Fields);

/// `record:rpz:aaaa:ipaddress`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordAaaaIpAddress(pub Ipv6Fields);

/// `record:rpz:cname`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordCname(pub CnameFields);

/// `record:rpz:cname:ipaddress`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordCnameIpAddress(pub CnameFields);

/// `record:rpz:cname:ipaddressdn`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordCnameIpAddressDn(pub CnameFields);

/// `record:rpz:cname:clientipaddress`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordCnameClientIpAddress(pub CnameFields);

/// `record:rpz:cname:clientipaddressdn`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordCnameClientIpAddressDn(pub CnameFields);

/// `record:rpz:mx`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMx {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mail_exchanger: String,
    #[serde(default)]
    pub preference: u16,
    #[serde(flatten)]
    pub common: CommonFields,
}

/// `record:rpz:naptr`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordNaptr {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub order: u16,
    #[serde(default)]
    pub preference: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regexp: Option<String>,
    #[serde(default)]
    pub replacement: String,
    #[serde(flatten)]
    pub common: CommonFields,
}

/// `record:rpz:ptr`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPtr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub ptrdname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4addr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6addr: Option<String>,
    #[serde(flatten)]
    pub common: CommonFields,
}

/// `record:rpz:srv`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSrv {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub priority: u16,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub weight: u16,
    #[serde(flatten)]
    pub common: CommonFields,
}

/// `record:rpz:txt`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordTxt {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub common: CommonFields,
}
