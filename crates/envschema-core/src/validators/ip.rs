//! IP address check, with optional version restriction

use crate::schema::IpVersion;
use serde_json::Value;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

pub fn check(value: &Value, version: IpVersion) -> Result<(), String> {
    let Some(s) = value.as_str() else {
        return Err("must be a string".to_string());
    };
    match version {
        IpVersion::V4 => s
            .parse::<Ipv4Addr>()
            .map(|_| ())
            .map_err(|_| format!("'{}' is not a valid IPv4 address", s)),
        IpVersion::V6 => s
            .parse::<Ipv6Addr>()
            .map(|_| ())
            .map_err(|_| format!("'{}' is not a valid IPv6 address", s)),
        IpVersion::Any => s
            .parse::<IpAddr>()
            .map(|_| ())
            .map_err(|_| format!("'{}' is not a valid IP address", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ipv4() {
        assert!(check(&json!("127.0.0.1"), IpVersion::V4).is_ok());
        assert!(check(&json!("255.255.255.255"), IpVersion::V4).is_ok());
        assert!(check(&json!("256.0.0.1"), IpVersion::V4).is_err());
        assert!(check(&json!("1.2.3"), IpVersion::V4).is_err());
    }

    #[test]
    fn test_ipv6() {
        assert!(check(&json!("::1"), IpVersion::V6).is_ok());
        assert!(check(&json!("2001:db8::8a2e:370:7334"), IpVersion::V6).is_ok());
        assert!(check(&json!("127.0.0.1"), IpVersion::V6).is_err());
    }

    #[test]
    fn test_any_accepts_both() {
        assert!(check(&json!("10.0.0.1"), IpVersion::Any).is_ok());
        assert!(check(&json!("fe80::1"), IpVersion::Any).is_ok());
        assert!(check(&json!("localhost"), IpVersion::Any).is_err());
    }

    #[test]
    fn test_version_restriction() {
        assert!(check(&json!("::1"), IpVersion::V4).is_err());
    }
}
