//! Client configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `TOKEN_CLI_*` environment variables. The binary applies its own flags on
//! top and calls [`Config::validate`] before use.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Cluster, Commitment};

/// Token program deployment the CLI targets unless configured otherwise.
pub const DEFAULT_PROGRAM_ID: &str = "2V3eUpxJK3n1ionrg2xsy5HAVuHzxArnZ3Xg6vbV5Pzb";

pub const ENV_CONFIG: &str = "TOKEN_CLI_CONFIG";
pub const ENV_RPC_URL: &str = "TOKEN_CLI_RPC_URL";
pub const ENV_CLUSTER: &str = "TOKEN_CLI_CLUSTER";
pub const ENV_KEYPAIR: &str = "TOKEN_CLI_KEYPAIR";
pub const ENV_PROGRAM_ID: &str = "TOKEN_CLI_PROGRAM_ID";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub cluster: Cluster,
    /// Overrides the cluster's public endpoint.
    pub rpc_url: Option<String>,
    pub program_id: String,
    /// Defaults to `~/.config/solana/id.json`.
    pub keypair_path: Option<PathBuf>,
    pub commitment: Commitment,
    pub rpc_timeout_secs: u64,
    pub confirm_timeout_secs: u64,
    pub confirm_poll_interval_ms: u64,
    /// Pause between the steps of `demo`.
    pub demo_step_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cluster: Cluster::Devnet,
            rpc_url: None,
            program_id: DEFAULT_PROGRAM_ID.to_string(),
            keypair_path: None,
            commitment: Commitment::Confirmed,
            rpc_timeout_secs: 30,
            confirm_timeout_secs: 60,
            confirm_poll_interval_ms: 500,
            demo_step_delay_ms: 2000,
        }
    }
}

impl Config {
    /// Defaults, overlaid with `path` (or `$TOKEN_CLI_CONFIG`) and the
    /// process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var_os(ENV_CONFIG).map(PathBuf::from);
        let mut config = match path.or(env_path.as_deref()) {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "config file loaded");
        Ok(config)
    }

    /// Apply `TOKEN_CLI_*` overrides read through `lookup`. Blank values are
    /// ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        if let Some(cluster) = get(ENV_CLUSTER) {
            self.cluster = cluster.parse().map_err(|reason| ConfigError::Env {
                var: ENV_CLUSTER.to_string(),
                reason,
            })?;
        }
        if let Some(url) = get(ENV_RPC_URL) {
            self.rpc_url = Some(url);
        }
        if let Some(path) = get(ENV_KEYPAIR) {
            self.keypair_path = Some(PathBuf::from(path));
        }
        if let Some(program_id) = get(ENV_PROGRAM_ID) {
            self.program_id = program_id;
        }
        Ok(())
    }

    /// The endpoint requests go to.
    pub fn rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.cluster.default_rpc_url())
    }

    pub fn program_id_bytes(&self) -> Result<[u8; 32], ConfigError> {
        chain_sol::address_to_bytes(&self.program_id)
            .map_err(|e| ConfigError::Validation(vec![format!("program_id: {e}")]))
    }

    /// Resolved keypair location, with `~` expanded.
    pub fn keypair_path(&self) -> Result<PathBuf, keystore::KeystoreError> {
        match &self.keypair_path {
            Some(path) => keystore::expand_home(path),
            None => keystore::default_keypair_path(),
        }
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout_secs)
    }

    pub fn confirm_poll_interval(&self) -> Duration {
        Duration::from_millis(self.confirm_poll_interval_ms)
    }

    pub fn demo_step_delay(&self) -> Duration {
        Duration::from_millis(self.demo_step_delay_ms)
    }

    /// Check every field, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = chain_sol::validate_address(&self.program_id) {
            errors.push(format!("program_id: {e}"));
        }

        match url::Url::parse(self.rpc_url()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(format!(
                "rpc_url: unsupported scheme '{}', expected http or https",
                url.scheme()
            )),
            Err(e) => errors.push(format!("rpc_url: {e}")),
        }

        for (name, value) in [
            ("rpc_timeout_secs", self.rpc_timeout_secs),
            ("confirm_timeout_secs", self.confirm_timeout_secs),
            ("confirm_poll_interval_ms", self.confirm_poll_interval_ms),
        ] {
            if value == 0 {
                errors.push(format!("{name} must be > 0"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_target_devnet_and_validate() {
        let config = Config::default();
        assert_eq!(config.cluster, Cluster::Devnet);
        assert_eq!(config.rpc_url(), "https://api.devnet.solana.com");
        assert_eq!(config.program_id, DEFAULT_PROGRAM_ID);
        assert_eq!(config.commitment, Commitment::Confirmed);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config: Config = toml::from_str(
            r#"
            cluster = "localnet"
            commitment = "finalized"
            demo_step_delay_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.cluster, Cluster::Localnet);
        assert_eq!(config.rpc_url(), "http://127.0.0.1:8899");
        assert_eq!(config.commitment, Commitment::Finalized);
        assert_eq!(config.demo_step_delay_ms, 0);
        assert_eq!(config.rpc_timeout_secs, 30);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("rpc_ur = \"http://x\"").is_err());
    }

    #[test]
    fn file_errors_name_the_path() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.toml");
        let err = Config::from_file(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "cluster = ").unwrap();
        let err = Config::from_file(&broken).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = Config {
            rpc_url: Some("https://from-file.example".into()),
            ..Config::default()
        };
        config
            .apply_env(env(&[
                (ENV_CLUSTER, "testnet"),
                (ENV_RPC_URL, "https://from-env.example"),
                (ENV_KEYPAIR, "/keys/ci.json"),
                (ENV_PROGRAM_ID, "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"),
            ]))
            .unwrap();

        assert_eq!(config.cluster, Cluster::Testnet);
        assert_eq!(config.rpc_url(), "https://from-env.example");
        assert_eq!(config.keypair_path().unwrap(), PathBuf::from("/keys/ci.json"));
        assert_eq!(
            config.program_id,
            "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
        );
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = Config::default();
        config.apply_env(env(&[(ENV_RPC_URL, "  ")])).unwrap();
        assert_eq!(config.rpc_url, None);
    }

    #[test]
    fn bad_env_cluster_is_reported() {
        let mut config = Config::default();
        let err = config.apply_env(env(&[(ENV_CLUSTER, "moonnet")])).unwrap_err();
        assert!(err.to_string().contains(ENV_CLUSTER));
    }

    #[test]
    fn validation_collects_every_problem() {
        let config = Config {
            program_id: "not-base58!".into(),
            rpc_url: Some("ftp://example.com".into()),
            rpc_timeout_secs: 0,
            confirm_poll_interval_ms: 0,
            ..Config::default()
        };

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 4, "{errors:?}");
                assert!(errors[0].starts_with("program_id"));
                assert!(errors[1].contains("unsupported scheme 'ftp'"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn unparsable_url_is_reported() {
        let config = Config {
            rpc_url: Some("not a url".into()),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn program_id_bytes_decodes_default() {
        let bytes = Config::default().program_id_bytes().unwrap();
        assert_eq!(chain_sol::bytes_to_address(&bytes), DEFAULT_PROGRAM_ID);
    }
}
