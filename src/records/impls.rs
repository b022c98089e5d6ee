// Standard library
use std::net::{Ipv4Addr, Ipv6Addr};

// Current module imports
use super::errors::ValidationError;
use super::traits::RecordType;
use super::types::*;

impl CommonFields {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("rp_zone", &self.rp_zone)?;

        if self.use_ttl == Some(true) && self.ttl.is_none() {
            return Err(ValidationError::TtlNotSet);
        }

        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

fn require_ipv4(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require(field, value)?;
    value
        .parse::<Ipv4Addr>()
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidAddress {
            field,
            family: "IPv4",
            value: value.to_string(),
        })
}

fn require_ipv6(field: &'static str, value: &str) -> Result<(), ValidationError> {
    require(field, value)?;
    value
        .parse::<Ipv6Addr>()
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidAddress {
            field,
            family: "IPv6",
            value: value.to_string(),
        })
}

impl Ipv4Fields {
    fn validate_fields(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require_ipv4("ipv4addr", &self.ipv4addr)
    }
}

impl Ipv6Fields {
    fn validate_fields(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require_ipv6("ipv6addr", &self.ipv6addr)
    }
}

impl CnameFields {
    fn validate_fields(&self) -> Result<(), ValidationError> {
        // An empty canonical name is a valid block rule.
        require("name", &self.name)
    }
}

impl RecordType for RecordA {
    const OBJECT_TYPE: &'static str = "record:rpz:a";
    const RETURN_FIELDS: &'static str =
        "comment,disable,extattrs,ipv4addr,name,rp_zone,ttl,use_ttl,view,zone";

    fn common(&self) -> &CommonFields {
        &self.0.common
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        self.0.validate_fields()
    }
}

impl RecordType for RecordAIpAddress {
    const OBJECT_TYPE: &'static str = "record:rpz:a:ipaddress";
    const RETURN_FIELDS: &'static str =
        "comment,disable,extattrs,ipv4addr,name,rp_zone,ttl,use_ttl,view,zone";

    fn common(&self) -> &CommonFields {
        &self.0.common
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        self.0.validate_fields()
    }
}

impl RecordType for RecordAaaa {
    const OBJECT_TYPE: &'static str = "record:rpz:aaaa";
    const RETURN_FIELDS: &'static str =
        "comment,disable,extattrs,ipv6addr,name,rp_zone,ttl,use_ttl,view,zone";

    fn common(&self) -> &CommonFields {
        &self.0.common
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        self.0.validate_fields()
    }
}

impl RecordType for RecordAaaaIpAddress {
    const OBJECT_TYPE: &'static str = "record:rpz:aaaa:ipaddress";
    const RETURN_FIELDS: &'static str =
        "comment,disable,extattrs,ipv6addr,name,rp_zone,ttl,use_ttl,view,zone";

    fn common(&self) -> &CommonFields {
        &self.0.common
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        self.0.validate_fields()
    }
}

impl RecordType for RecordCname {
    const OBJECT_TYPE: &'static str = "record:rpz:cname";
    const RETURN_FIELDS: &'static str =
        "canonical,comment,disable,extattrs,name,rp_zone,ttl,use_ttl,view,zone";

    fn common(&self) -> &CommonFields {
        &self.0.common
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        self.0.validate_fields()
    }
}

impl RecordType for RecordCnameIpAddress {
    const OBJECT_TYPE: &'static str = "record:rpz:cname:ipaddress";
    const RETURN_FIELDS: &'static str =
        "canonical,comment,disable,extattrs,name,rp_zone,ttl,use_ttl,view,zone";

    fn common(&self) -> &CommonFields {
        &self.0.common
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        self.0.validate_fields()
    }
}

impl RecordType for RecordCnameIpAddressDn {
    const OBJECT_TYPE: &'static str = "record:rpz:cname:ipaddressdn";
    const RETURN_FIELDS: &'static str =
        "canonical,comment,disable,extattrs,name,rp_zone,ttl,use_ttl,view,zone";

    fn common(&self) -> &CommonFields {
        &self.0.common
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        self.0.validate_fields()
    }
}

impl RecordType for RecordCnameClientIpAddress {
    const OBJECT_TYPE: &'static str = "record:rpz:cname:clientipaddress";
    const RETURN_FIELDS: &'static str =
        "canonical,comment,disable,extattrs,name,rp_zone,ttl,use_ttl,view,zone";

    fn common(&self) -> &CommonFields {
        &self.0.common
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        self.0.validate_fields()
    }
}

impl RecordType for RecordCnameClientIpAddressDn {
    const OBJECT_TYPE: &'static str = "record:rpz:cname:clientipaddressdn";
    const RETURN_FIELDS: &'static str =
        "canonical,comment,disable,extattrs,name,rp_zone,ttl,use_ttl,view,zone";

    fn common(&self) -> &CommonFields {
        &self.0.common
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        self.0.validate_fields()
    }
}

impl RecordType for RecordMx {
    const OBJECT_TYPE: &'static str = "record:rpz:mx";
    const RETURN_FIELDS: &'static str =
        "comment,disable,extattrs,mail_exchanger,name,preference,rp_zone,ttl,use_ttl,view,zone";

    fn common(&self) -> &CommonFields {
        &self.common
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("mail_exchanger", &self.mail_exchanger)
    }
}

impl RecordType for RecordNaptr {
    const OBJECT_TYPE: &'static str = "record:rpz:naptr";
    const RETURN_FIELDS: &'static str = "comment,disable,extattrs,flags,name,order,preference,\
        regexp,replacement,rp_zone,services,ttl,use_ttl,view,zone";

    fn common(&self) -> &CommonFields {
        &self.common
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("replacement", &self.replacement)?;

        if let Some(flags) = &self.flags {
            if !matches!(flags.as_str(), "" | "U" | "S" | "A" | "P") {
                return Err(ValidationError::InvalidNaptrFlags(flags.clone()));
            }
        }

        Ok(())
    }
}

impl RecordType for RecordPtr {
    const OBJECT_TYPE: &'static str = "record:rpz:ptr";
    const RETURN_FIELDS: &'static str =
        "comment,disable,extattrs,ipv4addr,ipv6addr,name,ptrdname,rp_zone,ttl,use_ttl,view,zone";

    fn common(&self) -> &CommonFields {
        &self.common
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        require("ptrdname", &self.ptrdname)?;

        if let Some(ipv4addr) = &self.ipv4addr {
            require_ipv4("ipv4addr", ipv4addr)?;
        }
        if let Some(ipv6addr) = &self.ipv6addr {
            require_ipv6("ipv6addr", ipv6addr)?;
        }

        let has_name = self.name.as_deref().is_some_and(|n| !n.trim().is_empty());
        if !has_name && self.ipv4addr.is_none() && self.ipv6addr.is_none() {
            return Err(ValidationError::PtrWithoutOwner);
        }

        Ok(())
    }
}

impl RecordType for RecordSrv {
    const OBJECT_TYPE: &'static str = "record:rpz:srv";
    const RETURN_FIELDS: &'static str =
        "comment,disable,extattrs,name,port,priority,rp_zone,target,ttl,use_ttl,view,weight,zone";

    fn common(&self) -> &CommonFields {
        &self.common
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("target", &self.target)
    }
}

impl RecordType for RecordTxt {
    const OBJECT_TYPE: &'static str = "record:rpz:txt";
    const RETURN_FIELDS: &'static str =
        "comment,disable,extattrs,name,rp_zone,text,ttl,use_ttl,view,zone";

    fn common(&self) -> &CommonFields {
        &self.common
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("text", &self.text)
    }
}
