use crate::error::ConfigurationError;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

// DESIGN CHOICE: Flat option set, read once at writer construction
// The host framework hands writers a map of named options. The same keys
// work in that map, in YAML files and in code via the with_* setters.
// Keys the writer does not know are rejected, as the host framework does.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WriterConfig {
    #[serde(default)]
    hostname: String, // Collector host, empty = local default UDP target

    #[serde(default = "default_port")]
    port: u16,

    #[serde(default = "default_protocol")]
    protocol: String, // "tcp", "udp" or "http"

    // Exposed through accessors only, never written into messages
    #[serde(default = "default_facility")]
    facility: String,

    // Merged into every outgoing message, wins over record data
    #[serde(default, rename = "additionalData", alias = "additional_data")]
    additional_data: Map<String, Value>,
}

// Default: Graylog's GELF port
fn default_port() -> u16 {
    12201
}

fn default_protocol() -> String {
    "tcp".to_string()
}

fn default_facility() -> String {
    "typo3".to_string()
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            port: default_port(),
            protocol: default_protocol(),
            facility: default_facility(),
            additional_data: Map::new(),
        }
    }
}

impl WriterConfig {
    /// Build from the option map a host framework passes to its writers.
    pub fn from_options(options: Map<String, Value>) -> Result<Self, ConfigurationError> {
        serde_json::from_value(Value::Object(options))
            .map_err(|e| ConfigurationError::InvalidOptions(e.to_string()))
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigurationError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigurationError::InvalidOptions(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigurationError::InvalidOptions(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn facility(&self) -> &str {
        &self.facility
    }

    pub fn with_facility(mut self, facility: impl Into<String>) -> Self {
        self.facility = facility.into();
        self
    }

    pub fn additional_data(&self) -> &Map<String, Value> {
        &self.additional_data
    }

    pub fn with_additional_data(mut self, additional_data: Map<String, Value>) -> Self {
        self.additional_data = additional_data;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn options(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_defaults() {
        let config = WriterConfig::from_options(Map::new()).unwrap();
        assert_eq!(config, WriterConfig::default());
        assert_eq!(config.hostname(), "");
        assert_eq!(config.port(), 12201);
        assert_eq!(config.protocol(), "tcp");
        assert_eq!(config.facility(), "typo3");
        assert!(config.additional_data().is_empty());
    }

    #[test]
    fn test_full_options() {
        let config = WriterConfig::from_options(options(json!({
            "hostname": "graylog.internal",
            "port": 12202,
            "protocol": "udp",
            "facility": "shop",
            "additionalData": {"env": "prod", "node": 3}
        })))
        .unwrap();

        assert_eq!(config.hostname(), "graylog.internal");
        assert_eq!(config.port(), 12202);
        assert_eq!(config.protocol(), "udp");
        assert_eq!(config.facility(), "shop");
        assert_eq!(config.additional_data()["env"], "prod");
        assert_eq!(config.additional_data()["node"], 3);
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let result = WriterConfig::from_options(options(json!({"hostnme": "typo"})));
        match result {
            Err(ConfigurationError::InvalidOptions(msg)) => assert!(msg.contains("hostnme")),
            other => panic!("expected InvalidOptions, got {other:?}"),
        }
    }

    #[test]
    fn test_port_out_of_range() {
        let result = WriterConfig::from_options(options(json!({"port": 70000})));
        assert!(result.is_err());
    }

    #[test]
    fn test_protocol_is_not_validated_here() {
        // Only the transport factory knows whether a hostname makes it matter
        let config = WriterConfig::from_options(options(json!({"protocol": "smtp"}))).unwrap();
        assert_eq!(config.protocol(), "smtp");
    }

    #[test]
    fn test_yaml_config() {
        let yaml = r#"
hostname: "logs.example.com"
port: 12201
protocol: "http"
additionalData:
  datacenter: "fra1"
        "#;

        let config = WriterConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.hostname(), "logs.example.com");
        assert_eq!(config.protocol(), "http");
        assert_eq!(config.additional_data()["datacenter"], "fra1");
        assert_eq!(config.facility(), "typo3"); // Default
    }

    #[test]
    fn test_snake_case_alias() {
        let yaml = r#"
additional_data:
  team: "payments"
        "#;

        let config = WriterConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.additional_data()["team"], "payments");
    }

    #[test]
    fn test_invalid_yaml() {
        let yaml = "invalid: yaml: syntax: [[[";
        assert!(WriterConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hostname: \"10.1.2.3\"\nprotocol: \"udp\"").unwrap();

        let config = WriterConfig::load(file.path()).unwrap();
        assert_eq!(config.hostname(), "10.1.2.3");
        assert_eq!(config.protocol(), "udp");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = WriterConfig::load(dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ConfigurationError::InvalidOptions(_))));
    }

    #[test]
    fn test_setters() {
        let config = WriterConfig::default()
            .with_hostname("h")
            .with_port(1)
            .with_protocol("udp")
            .with_facility("f")
            .with_additional_data(options(json!({"k": "v"})));

        assert_eq!(config.hostname(), "h");
        assert_eq!(config.port(), 1);
        assert_eq!(config.protocol(), "udp");
        assert_eq!(config.facility(), "f");
        assert_eq!(config.additional_data()["k"], "v");
    }
}
