use std::{net::IpAddr, path::PathBuf, str::FromStr};

use anyhow::anyhow;

use super::state::DeploymentEnvironment;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_UPLOAD_SIZE_BYTES: usize = 1024 * 1024 * 150; // 150MB

pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub deployment_environment: DeploymentEnvironment,
    pub max_upload_size_bytes: usize,
    pub storage_dir: Option<PathBuf>,
    pub logs_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = parse_or(non_empty("HOST"), "HOST", DEFAULT_HOST.parse::<IpAddr>()?)?;
        let port = parse_or(non_empty("PORT"), "PORT", DEFAULT_PORT)?;
        let max_upload_size_bytes = parse_or(
            non_empty("MAX_UPLOAD_SIZE_BYTES"),
            "MAX_UPLOAD_SIZE_BYTES",
            DEFAULT_MAX_UPLOAD_SIZE_BYTES,
        )?;

        Ok(ServerConfig {
            host,
            port,
            deployment_environment: DeploymentEnvironment::from_env_value(
                non_empty("CURR_ENV").as_deref(),
            ),
            max_upload_size_bytes,
            storage_dir: non_empty("PHOTOZ_STORAGE_DIR").map(PathBuf::from),
            logs_dir: non_empty("LOGS_DIR").map(PathBuf::from),
        })
    }

    pub fn bind_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("Environment variable {key} is invalid ({raw}): {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.max_upload_size_bytes, DEFAULT_MAX_UPLOAD_SIZE_BYTES);
        assert_eq!(config.deployment_environment, DeploymentEnvironment::Local);
        assert!(config.storage_dir.is_none());
        assert!(config.logs_dir.is_none());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("CURR_ENV", "prod"),
            ("MAX_UPLOAD_SIZE_BYTES", "1024"),
            ("PHOTOZ_STORAGE_DIR", "/var/lib/photoz"),
            ("LOGS_DIR", "  "),
        ])
        .unwrap();

        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.deployment_environment, DeploymentEnvironment::Prod);
        assert_eq!(config.max_upload_size_bytes, 1024);
        assert_eq!(config.storage_dir, Some(PathBuf::from("/var/lib/photoz")));
        assert!(config.logs_dir.is_none());
    }

    #[test]
    fn malformed_port_is_an_error() {
        let err = config_from(&[("PORT", "eighty")]).err().unwrap();
        assert!(err.to_string().contains("PORT"));
    }
}
