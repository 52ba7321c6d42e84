//! WHOIS and DNS source — registration and resolution data.
//!
//! Domains are looked up twice: registration metadata via the public
//! RDAP bootstrap service, and live A/MX/NS records via DNS-over-HTTPS
//! JSON. The two halves fail independently; each contributes its own
//! finding under its own source label (`"whois"` and `"dns"`). IPv4
//! queries are validated locally and recorded as an `"ip_lookup"` lead.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::http;
use crate::source::{courtesy_pause, Source};
use crate::types::{Confidence, Finding, Query, QueryType, SourceKind};
use serde_json::{json, Map, Value};

/// DNS record types resolved for a domain query.
const RECORD_TYPES: &[&str] = &["A", "MX", "NS"];

/// WHOIS (RDAP) and DNS-over-HTTPS source.
pub struct WhoisDnsSource {
    rdap_base: String,
    doh_base: String,
}

impl Default for WhoisDnsSource {
    fn default() -> Self {
        Self {
            rdap_base: "https://rdap.org".into(),
            doh_base: "https://dns.google".into(),
        }
    }
}

impl WhoisDnsSource {
    /// Override the RDAP base URL (used by tests).
    pub fn with_rdap_base(mut self, base_url: impl Into<String>) -> Self {
        self.rdap_base = base_url.into();
        self
    }

    /// Override the DNS-over-HTTPS base URL (used by tests).
    pub fn with_doh_base(mut self, base_url: impl Into<String>) -> Self {
        self.doh_base = base_url.into();
        self
    }

    async fn collect_domain(
        &self,
        domain: &str,
        config: &EngineConfig,
    ) -> Result<Vec<Finding>, EngineError> {
        let client = http::build_client(config, self.kind().timeout_secs())?;
        let mut findings = Vec::new();

        // Registration metadata. RDAP replaces port-43 WHOIS with a
        // JSON contract and needs no key.
        let rdap_url = format!("{}/domain/{}", self.rdap_base, urlencoding::encode(domain));
        match client.get(&rdap_url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<Value>().await {
                    Ok(body) => {
                        findings.push(Finding::new(
                            "whois",
                            parse_rdap(&body, domain),
                            Confidence::High,
                        ));
                    }
                    Err(err) => tracing::debug!(error = %err, "RDAP body unreadable"),
                }
            }
            Ok(response) => {
                tracing::debug!(status = %response.status(), "RDAP lookup non-success");
            }
            Err(err) => tracing::debug!(error = %err, "RDAP lookup failed"),
        }

        // Live resolution, one DoH query per record type.
        let mut records = Map::new();
        for record_type in RECORD_TYPES {
            let doh_url = format!(
                "{}/resolve?name={}&type={}",
                self.doh_base,
                urlencoding::encode(domain),
                record_type
            );
            match client.get(&doh_url).send().await {
                Ok(response) if response.status().is_success() => {
                    if let Ok(body) = response.json::<Value>().await {
                        let answers = parse_doh_answers(&body);
                        if !answers.is_empty() {
                            records.insert((*record_type).into(), json!(answers));
                        }
                    }
                }
                Ok(response) => {
                    tracing::trace!(
                        record_type,
                        status = %response.status(),
                        "DoH query non-success"
                    );
                }
                Err(err) => tracing::debug!(record_type, error = %err, "DoH query failed"),
            }
        }
        if !records.is_empty() {
            let mut data = Map::new();
            data.insert("domain".into(), json!(domain));
            data.insert("records".into(), Value::Object(records));
            findings.push(Finding::new("dns", data, Confidence::High));
        }

        Ok(findings)
    }
}

impl Source for WhoisDnsSource {
    async fn collect(
        &self,
        query: &Query,
        config: &EngineConfig,
    ) -> Result<Vec<Finding>, EngineError> {
        match query.query_type {
            QueryType::Domain => {
                courtesy_pause(self.kind(), config).await;
                let domain = normalize_domain(&query.value);
                tracing::trace!(domain = %domain, "whois/dns domain lookup");
                let findings = self.collect_domain(&domain, config).await?;
                tracing::debug!(count = findings.len(), "whois/dns source findings");
                Ok(findings)
            }
            QueryType::Ip => {
                // Validated locally; detailed geolocation is a
                // downstream concern, the finding records the lead.
                if query.value.parse::<std::net::Ipv4Addr>().is_err() {
                    tracing::trace!("ip query value is not a dotted-quad IPv4 address");
                    return Ok(vec![]);
                }
                let mut data = Map::new();
                data.insert("ip".into(), json!(query.value));
                Ok(vec![Finding::new("ip_lookup", data, Confidence::Medium)])
            }
            _ => Ok(vec![]),
        }
    }

    fn kind(&self) -> SourceKind {
        SourceKind::WhoisDns
    }
}

/// Reduce a user-supplied domain to its bare registrable form:
/// lowercase, scheme and `www.` stripped, path discarded.
pub(crate) fn normalize_domain(value: &str) -> String {
    let trimmed = value.trim();
    let host = url::Url::parse(trimmed)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        // Bare domains carry no scheme and do not parse as URLs.
        .unwrap_or_else(|| trimmed.split('/').next().unwrap_or_default().to_string());
    let host = host.to_lowercase();
    host.strip_prefix("www.").unwrap_or(&host).to_string()
}

/// Extract registration metadata from an RDAP domain payload.
///
/// RDAP responses are deeply nested and vary per registry; every field
/// is optional and absent values are recorded as `null`.
pub(crate) fn parse_rdap(body: &Value, domain: &str) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("domain".into(), json!(domain));
    data.insert("registrar".into(), rdap_registrar(body));
    data.insert("creation_date".into(), rdap_event(body, "registration"));
    data.insert("expiration_date".into(), rdap_event(body, "expiration"));
    data.insert("name_servers".into(), rdap_name_servers(body));
    data.insert(
        "status".into(),
        body.get("status").cloned().unwrap_or(json!([])),
    );
    data
}

/// Registrar display name: the `fn` vCard entry of the entity carrying
/// the `registrar` role.
fn rdap_registrar(body: &Value) -> Value {
    let entities = match body.get("entities").and_then(Value::as_array) {
        Some(entities) => entities,
        None => return Value::Null,
    };
    for entity in entities {
        let is_registrar = entity
            .get("roles")
            .and_then(Value::as_array)
            .is_some_and(|roles| roles.iter().any(|r| r.as_str() == Some("registrar")));
        if !is_registrar {
            continue;
        }
        let vcard_entries = entity
            .get("vcardArray")
            .and_then(|v| v.get(1))
            .and_then(Value::as_array);
        if let Some(entries) = vcard_entries {
            for entry in entries {
                let entry = match entry.as_array() {
                    Some(entry) => entry,
                    None => continue,
                };
                if entry.first().and_then(Value::as_str) == Some("fn") {
                    if let Some(name) = entry.get(3).and_then(Value::as_str) {
                        return json!(name);
                    }
                }
            }
        }
    }
    Value::Null
}

/// First event date matching the given RDAP `eventAction`.
fn rdap_event(body: &Value, action: &str) -> Value {
    body.get("events")
        .and_then(Value::as_array)
        .and_then(|events| {
            events.iter().find(|e| {
                e.get("eventAction").and_then(Value::as_str) == Some(action)
            })
        })
        .and_then(|e| e.get("eventDate"))
        .cloned()
        .unwrap_or(Value::Null)
}

/// Lowercased nameserver host names from an RDAP payload.
fn rdap_name_servers(body: &Value) -> Value {
    let servers: Vec<String> = body
        .get("nameservers")
        .and_then(Value::as_array)
        .map(|ns| {
            ns.iter()
                .filter_map(|n| n.get("ldhName").and_then(Value::as_str))
                .map(str::to_lowercase)
                .collect()
        })
        .unwrap_or_default();
    json!(servers)
}

/// Record data strings from a DNS-over-HTTPS JSON answer section.
pub(crate) fn parse_doh_answers(body: &Value) -> Vec<String> {
    body.get("Answer")
        .and_then(Value::as_array)
        .map(|answers| {
            answers
                .iter()
                .filter_map(|a| a.get("data").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_RDAP: &str = r#"{
        "ldhName": "EXAMPLE.COM",
        "status": ["client transfer prohibited"],
        "events": [
            {"eventAction": "registration", "eventDate": "1995-08-14T04:00:00Z"},
            {"eventAction": "expiration", "eventDate": "2026-08-13T04:00:00Z"}
        ],
        "nameservers": [
            {"ldhName": "A.IANA-SERVERS.NET"},
            {"ldhName": "B.IANA-SERVERS.NET"}
        ],
        "entities": [
            {
                "roles": ["registrar"],
                "vcardArray": ["vcard", [
                    ["version", {}, "text", "4.0"],
                    ["fn", {}, "text", "Example Registrar Inc."]
                ]]
            }
        ]
    }"#;

    const MOCK_DOH: &str = r#"{
        "Status": 0,
        "Answer": [
            {"name": "example.com.", "type": 1, "TTL": 300, "data": "93.184.215.14"},
            {"name": "example.com.", "type": 1, "TTL": 300, "data": "93.184.215.15"}
        ]
    }"#;

    #[test]
    fn normalize_strips_scheme_www_and_path() {
        assert_eq!(normalize_domain("https://www.Example.com/about"), "example.com");
        assert_eq!(normalize_domain("http://example.com"), "example.com");
        assert_eq!(normalize_domain("example.com"), "example.com");
        assert_eq!(normalize_domain("  EXAMPLE.COM  "), "example.com");
    }

    #[test]
    fn parse_rdap_extracts_registration_fields() {
        let body: Value = serde_json::from_str(MOCK_RDAP).expect("valid json");
        let data = parse_rdap(&body, "example.com");

        assert_eq!(data.get("domain"), Some(&json!("example.com")));
        assert_eq!(data.get("registrar"), Some(&json!("Example Registrar Inc.")));
        assert_eq!(
            data.get("creation_date"),
            Some(&json!("1995-08-14T04:00:00Z"))
        );
        assert_eq!(
            data.get("expiration_date"),
            Some(&json!("2026-08-13T04:00:00Z"))
        );
        assert_eq!(
            data.get("name_servers"),
            Some(&json!(["a.iana-servers.net", "b.iana-servers.net"]))
        );
        assert_eq!(
            data.get("status"),
            Some(&json!(["client transfer prohibited"]))
        );
    }

    #[test]
    fn parse_rdap_tolerates_sparse_payloads() {
        let body: Value = serde_json::from_str("{}").expect("valid json");
        let data = parse_rdap(&body, "example.com");

        assert_eq!(data.get("registrar"), Some(&Value::Null));
        assert_eq!(data.get("creation_date"), Some(&Value::Null));
        assert_eq!(data.get("name_servers"), Some(&json!([])));
        assert_eq!(data.get("status"), Some(&json!([])));
    }

    #[test]
    fn parse_doh_extracts_record_data() {
        let body: Value = serde_json::from_str(MOCK_DOH).expect("valid json");
        let answers = parse_doh_answers(&body);
        assert_eq!(answers, vec!["93.184.215.14", "93.184.215.15"]);
    }

    #[test]
    fn parse_doh_no_answer_section_is_empty() {
        let body: Value = serde_json::from_str(r#"{"Status": 3}"#).expect("valid json");
        assert!(parse_doh_answers(&body).is_empty());
    }

    #[tokio::test]
    async fn invalid_ipv4_yields_no_findings() {
        let source = WhoisDnsSource::default();
        let config = EngineConfig::default();
        let query = Query::new(QueryType::Ip, "999.1.2.3");
        let findings = source.collect(&query, &config).await.expect("collect");
        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn valid_ipv4_yields_lookup_lead() {
        let source = WhoisDnsSource::default();
        let config = EngineConfig::default();
        let query = Query::new(QueryType::Ip, "8.8.8.8");
        let findings = source.collect(&query, &config).await.expect("collect");

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].source, "ip_lookup");
        assert_eq!(findings[0].confidence, Confidence::Medium);
        assert_eq!(findings[0].data.get("ip"), Some(&json!("8.8.8.8")));
    }

    #[tokio::test]
    async fn unsupported_query_type_is_empty() {
        let source = WhoisDnsSource::default();
        let config = EngineConfig::default();
        let query = Query::new(QueryType::Username, "alice");
        let findings = source.collect(&query, &config).await.expect("collect");
        assert!(findings.is_empty());
    }

    #[test]
    fn kind_is_whois_dns() {
        assert_eq!(WhoisDnsSource::default().kind(), SourceKind::WhoisDns);
    }

    #[tokio::test]
    #[ignore] // Live test — run with `cargo test -- --ignored`
    async fn live_domain_lookup_returns_both_halves() {
        let source = WhoisDnsSource::default();
        let config = EngineConfig {
            request_delay_ms: (0, 0),
            ..Default::default()
        };
        let query = Query::new(QueryType::Domain, "example.com");
        let findings = source.collect(&query, &config).await.expect("collect");
        assert!(findings.iter().any(|f| f.source == "whois"));
        assert!(findings.iter().any(|f| f.source == "dns"));
    }
}
