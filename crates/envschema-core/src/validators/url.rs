//! URL check: must parse with an allowed scheme, hostname length capped

use ::url::Url;
use serde_json::Value;

/// DNS caps a full hostname at 253 characters
const MAX_HOSTNAME_LEN: usize = 253;

pub fn check(value: &Value, protocols: &[String]) -> Result<(), String> {
    let Some(s) = value.as_str() else {
        return Err("must be a string".to_string());
    };
    let parsed = Url::parse(s).map_err(|_| format!("'{}' is not a valid URL", s))?;

    let scheme = parsed.scheme();
    if !protocols.iter().any(|p| p == scheme) {
        return Err(format!(
            "protocol '{}' is not allowed (expected one of: {})",
            scheme,
            protocols.join(", ")
        ));
    }

    if let Some(host) = parsed.host_str() {
        if host.len() > MAX_HOSTNAME_LEN {
            return Err(format!(
                "hostname exceeds {} characters",
                MAX_HOSTNAME_LEN
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DEFAULT_URL_PROTOCOLS;
    use serde_json::json;

    fn defaults() -> Vec<String> {
        DEFAULT_URL_PROTOCOLS.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_accepts_default_protocols() {
        for url in [
            "http://example.com",
            "https://example.com/path?q=1",
            "ftp://files.example.com",
        ] {
            assert!(check(&json!(url), &defaults()).is_ok(), "url: {}", url);
        }
    }

    #[test]
    fn test_rejects_unparseable() {
        assert!(check(&json!("not a url"), &defaults()).is_err());
        assert!(check(&json!("example.com"), &defaults()).is_err());
    }

    #[test]
    fn test_rejects_disallowed_protocol() {
        let err = check(&json!("wss://example.com"), &defaults()).unwrap_err();
        assert!(err.contains("protocol 'wss'"));
    }

    #[test]
    fn test_custom_protocols() {
        let custom = vec!["postgres".to_string()];
        assert!(check(&json!("postgres://db:5432/app"), &custom).is_ok());
        assert!(check(&json!("https://example.com"), &custom).is_err());
    }

    #[test]
    fn test_rejects_oversized_hostname() {
        let host = "a.".repeat(130) + "com";
        let url = format!("https://{}", host);
        assert!(check(&json!(url), &defaults()).is_err());
    }
}
