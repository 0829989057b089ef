//! # AdWords client configuration
//!
//! Configuration is resolved in layers:
//! 1. The default configuration embedded in the crate (`adwords.yaml`)
//! 2. An optional external YAML file, merged on top of the defaults
//! 3. Environment overrides of the form `ADWORDS_CONFIG__SECTION__KEY=value`
//! 4. The legacy `DEBUG` toggle: any non-empty value turns on `transport.debug`
//!
//! There is no global instance: [`ApiConfig::load`] returns a value that the
//! caller builds its endpoint catalog and credential context from.
//!
//! ```no_run
//! use adwconfig::ApiConfig;
//!
//! let config = ApiConfig::load(None)?;
//! println!("API version: {}", config.endpoints.version);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::{env, fs, path::Path};
use tracing::{debug, info};

// Configuration par défaut intégrée
const DEFAULT_CONFIG: &str = include_str!("adwords.yaml");

const ENV_CONFIG_FILE: &str = "ADWORDS_CONFIG";
const ENV_PREFIX: &str = "ADWORDS_CONFIG__";
const ENV_DEBUG: &str = "DEBUG";

pub const DEFAULT_HOST: &str = "https://adwords.google.com/api/adwords";
pub const DEFAULT_VERSION: &str = "v201603";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RESPONSE_BYTES: u64 = 64 * 1024 * 1024;
pub const DEFAULT_USER_AGENT: &str = "adwords-rs";

/// HTTP statuses for which a response body is decoded as a fault
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Only 400, 401, 403, 405 and 500; every other status is a success
    #[default]
    StatusSet,
    /// Every status outside 2xx
    NonSuccess,
}

impl FaultPolicy {
    pub const FAULT_STATUSES: [u16; 5] = [400, 401, 403, 405, 500];

    pub fn is_fault_status(&self, status: u16) -> bool {
        match self {
            FaultPolicy::StatusSet => Self::FAULT_STATUSES.contains(&status),
            FaultPolicy::NonSuccess => !(200..300).contains(&status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Root shared by every endpoint group, without trailing slash
    pub host: String,
    /// API version baked into every endpoint URL
    pub version: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            version: DEFAULT_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Dump full requests and responses to the diagnostic sink
    pub debug: bool,
    pub timeout_secs: u64,
    pub max_response_bytes: u64,
    pub fault_policy: FaultPolicy,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            debug: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            fault_policy: FaultPolicy::StatusSet,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoints: EndpointsConfig,
    pub transport: TransportConfig,
}

impl ApiConfig {
    /// Loads the configuration from `path`, or from the file named by the
    /// `ADWORDS_CONFIG` environment variable, or from the embedded defaults
    /// alone, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => env::var(ENV_CONFIG_FILE).ok().map(Into::into),
        };

        let external = match path {
            Some(p) => {
                let data = fs::read_to_string(&p)
                    .with_context(|| format!("Cannot read config file {}", p.display()))?;
                info!(config_file=%p.display(), "Loaded config file");
                Some(data)
            }
            None => {
                info!("No config file, using default embedded config");
                None
            }
        };

        Self::resolve(external.as_deref(), env::vars())
    }

    /// Builds a configuration from a YAML document merged over the defaults,
    /// ignoring the process environment
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::resolve(Some(yaml), std::iter::empty())
    }

    /// Merges `external` over the embedded defaults and applies the given
    /// environment variables
    pub fn resolve<I>(external: Option<&str>, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut value: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;

        if let Some(yaml) = external {
            let external_value: Value = serde_yaml::from_str(yaml)?;
            // Un fichier vide se lit comme Null : rien à fusionner
            if !external_value.is_null() {
                merge_yaml(&mut value, &external_value);
            }
        }

        let mut value = lower_keys_value(value);
        let mut debug_toggle = false;

        for (key, raw) in vars {
            if let Some(path) = key.strip_prefix(ENV_PREFIX) {
                let key_path = path.split("__").collect::<Vec<_>>();
                debug!(env_var=%key, "Applying config override");
                set_value(&mut value, &key_path, convert_env_value(&raw))?;
            } else if key == ENV_DEBUG && !raw.is_empty() {
                debug_toggle = true;
            }
        }

        let mut config: ApiConfig =
            serde_yaml::from_value(value).context("Invalid AdWords configuration")?;
        if debug_toggle {
            config.transport.debug = true;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.endpoints.host.trim().is_empty() {
            return Err(anyhow!("endpoints.host must not be empty"));
        }
        if self.endpoints.version.trim().is_empty() {
            return Err(anyhow!("endpoints.version must not be empty"));
        }
        Ok(())
    }
}

fn set_value(data: &mut Value, path: &[&str], value: Value) -> Result<()> {
    if path.is_empty() {
        *data = value;
        return Ok(());
    }
    if let Value::Mapping(map) = data {
        let key_value = Value::String(path[0].to_lowercase());
        if path.len() == 1 {
            map.insert(key_value, value);
        } else {
            let entry = map
                .entry(key_value)
                .or_insert(Value::Mapping(Mapping::new()));
            set_value(entry, &path[1..], value)?;
        }
        Ok(())
    } else {
        Err(anyhow!("Current node is not a map"))
    }
}

fn convert_env_value(value: &str) -> Value {
    if let Ok(parsed) = serde_yaml::from_str::<Value>(value) {
        return parsed;
    }
    Value::String(value.to_string())
}

fn lower_keys_value(value: Value) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut new_map = Mapping::new();
            for (k, v) in map {
                if let Value::String(s) = k {
                    new_map.insert(Value::String(s.to_lowercase()), lower_keys_value(v));
                } else {
                    new_map.insert(k, lower_keys_value(v));
                }
            }
            Value::Mapping(new_map)
        }
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(lower_keys_value).collect()),
        _ => value,
    }
}

fn merge_yaml(default: &mut Value, external: &Value) {
    match (default, external) {
        (Value::Mapping(dmap), Value::Mapping(emap)) => {
            for (k, v) in emap {
                match dmap.get_mut(k) {
                    Some(dv) => merge_yaml(dv, v),
                    None => {
                        dmap.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (d, e) => *d = e.clone(), // pour les scalaires ou séquences, on remplace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let config = ApiConfig::resolve(None, std::iter::empty()).unwrap();
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn test_fault_policy_status_set() {
        let policy = FaultPolicy::StatusSet;
        for status in [400, 401, 403, 405, 500] {
            assert!(policy.is_fault_status(status));
        }
        for status in [200, 201, 302, 404, 429, 502, 503] {
            assert!(!policy.is_fault_status(status));
        }
    }

    #[test]
    fn test_fault_policy_non_success() {
        let policy = FaultPolicy::NonSuccess;
        assert!(!policy.is_fault_status(200));
        assert!(!policy.is_fault_status(204));
        assert!(policy.is_fault_status(404));
        assert!(policy.is_fault_status(503));
        assert!(policy.is_fault_status(302));
    }

    #[test]
    fn test_merge_keeps_unspecified_defaults() {
        let config = ApiConfig::from_yaml("endpoints:\n  version: v201609\n").unwrap();
        assert_eq!(config.endpoints.version, "v201609");
        assert_eq!(config.endpoints.host, DEFAULT_HOST);
        assert_eq!(config.transport, TransportConfig::default());
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let config = ApiConfig::from_yaml("Transport:\n  Fault_Policy: non_success\n").unwrap();
        assert_eq!(config.transport.fault_policy, FaultPolicy::NonSuccess);
    }

    #[test]
    fn test_env_overrides() {
        let vars = vec![
            ("ADWORDS_CONFIG__TRANSPORT__TIMEOUT_SECS".to_string(), "5".to_string()),
            ("ADWORDS_CONFIG__ENDPOINTS__HOST".to_string(), "http://localhost:8080/api".to_string()),
            ("UNRELATED".to_string(), "x".to_string()),
        ];
        let config = ApiConfig::resolve(None, vars).unwrap();
        assert_eq!(config.transport.timeout_secs, 5);
        assert_eq!(config.endpoints.host, "http://localhost:8080/api");
        assert!(!config.transport.debug);
    }

    #[test]
    fn test_debug_toggle() {
        let on = ApiConfig::resolve(None, vec![("DEBUG".to_string(), "1".to_string())]).unwrap();
        assert!(on.transport.debug);

        let off = ApiConfig::resolve(None, vec![("DEBUG".to_string(), String::new())]).unwrap();
        assert!(!off.transport.debug);
    }

    #[test]
    fn test_rejects_empty_version() {
        assert!(ApiConfig::from_yaml("endpoints:\n  version: ''\n").is_err());
    }
}
