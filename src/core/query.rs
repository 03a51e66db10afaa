use crate::domain::model::{Registry, Service};
use crate::utils::error::Result;
use regex::Regex;

pub const PORT_DELIMITER: char = ',';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Comma-separated port-keys, looked up verbatim.
    Ports(String),
    /// Regular expression matched against `"<lowercased description> <protocol>"`.
    Pattern(String),
}

/// Services found by a query plus the port-keys that had no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOutcome {
    pub services: Vec<Service>,
    pub missing: Vec<String>,
}

pub struct QueryEngine<'a> {
    registry: &'a Registry,
}

impl<'a> QueryEngine<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub fn run(&self, query: &Query) -> Result<QueryOutcome> {
        match query {
            Query::Ports(ports) => Ok(self.by_ports(ports)),
            Query::Pattern(pattern) => self.by_pattern(pattern),
        }
    }

    /// 依輸入順序查詢每個 port-key，找不到的記錄下來但不中斷
    pub fn by_ports(&self, ports: &str) -> QueryOutcome {
        let mut outcome = QueryOutcome::default();

        for key in ports.split(PORT_DELIMITER) {
            match self.registry.get(key) {
                Some(services) => outcome.services.extend_from_slice(services),
                None => {
                    tracing::warn!("service with port '{}' not found in db", key);
                    outcome.missing.push(key.to_string());
                }
            }
        }

        tracing::debug!(
            "Port query '{}' matched {} services ({} missing keys)",
            ports,
            outcome.services.len(),
            outcome.missing.len()
        );
        outcome
    }

    pub fn by_pattern(&self, pattern: &str) -> Result<QueryOutcome> {
        let re = Regex::new(pattern)?;

        let services: Vec<Service> = self
            .registry
            .services()
            .filter(|service| re.is_match(&subject(service)))
            .cloned()
            .collect();

        tracing::debug!("Pattern '{}' matched {} services", pattern, services.len());
        Ok(QueryOutcome {
            services,
            missing: Vec::new(),
        })
    }
}

/// 正規表達式比對的字串: 小寫描述 + 空白 + 協定
pub fn subject(service: &Service) -> String {
    format!(
        "{} {}",
        service.description.to_lowercase(),
        service.protocol()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SvdbError;

    fn registry() -> Registry {
        Registry::from_json_str(
            r#"{
                "80": [{"port": "80", "description": "HTTP", "tcp": true, "status": "active"}],
                "443": [
                    {"port": "443", "description": "HTTPS", "tcp": true},
                    {"port": "443", "description": "QUIC", "udp": true}
                ],
                "8080": [{"port": "8080", "description": "Web server alt", "tcp": true}]
            }"#,
        )
        .unwrap()
    }

    fn ports(outcome: &QueryOutcome) -> Vec<(&str, &str)> {
        outcome
            .services
            .iter()
            .map(|s| (s.port.as_str(), s.description.as_str()))
            .collect()
    }

    #[test]
    fn test_by_ports_keeps_request_and_bucket_order() {
        let registry = registry();
        let outcome = QueryEngine::new(&registry).by_ports("80,443");

        assert_eq!(
            ports(&outcome),
            vec![("80", "HTTP"), ("443", "HTTPS"), ("443", "QUIC")]
        );
        assert!(outcome.missing.is_empty());

        let reversed = QueryEngine::new(&registry).by_ports("443,80");
        assert_eq!(reversed.services[2].port, "80");
    }

    #[test]
    fn test_by_ports_reports_missing_keys() {
        let registry = registry();
        let outcome = QueryEngine::new(&registry).by_ports("80,9999");

        assert_eq!(ports(&outcome), vec![("80", "HTTP")]);
        assert_eq!(outcome.missing, vec!["9999"]);
    }

    #[test]
    fn test_by_ports_empty_segments_are_reported_not_raised() {
        let registry = registry();
        let outcome = QueryEngine::new(&registry).by_ports("80,");
        assert_eq!(outcome.services.len(), 1);
        assert_eq!(outcome.missing, vec![""]);

        let outcome = QueryEngine::new(&registry).by_ports("");
        assert!(outcome.services.is_empty());
        assert_eq!(outcome.missing, vec![""]);
    }

    #[test]
    fn test_by_pattern_matches_lowercased_description_and_protocol() {
        let registry = registry();
        let engine = QueryEngine::new(&registry);

        let outcome = engine.by_pattern("web").unwrap();
        assert_eq!(ports(&outcome), vec![("8080", "Web server alt")]);

        let outcome = engine.by_pattern("udp$").unwrap();
        assert_eq!(ports(&outcome), vec![("443", "QUIC")]);

        // Uppercase in the pattern never matches the lowercased subject
        assert!(engine.by_pattern("HTTP").unwrap().services.is_empty());
    }

    #[test]
    fn test_by_pattern_walks_sorted_keys() {
        let registry = registry();
        let outcome = QueryEngine::new(&registry).by_pattern("tcp").unwrap();
        assert_eq!(
            ports(&outcome),
            vec![("443", "HTTPS"), ("80", "HTTP"), ("8080", "Web server alt")]
        );
    }

    #[test]
    fn test_by_pattern_rejects_invalid_regex() {
        let registry = registry();
        let result = QueryEngine::new(&registry).run(&Query::Pattern("(".to_string()));
        assert!(matches!(result, Err(SvdbError::PatternError(_))));
    }

    #[test]
    fn test_subject() {
        let service = Service {
            description: "Web server".to_string(),
            tcp: true,
            ..Default::default()
        };
        assert_eq!(subject(&service), "web server tcp");
        assert_eq!(subject(&Service::default()), " ");
    }
}
