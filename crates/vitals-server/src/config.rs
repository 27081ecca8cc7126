use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_STORE_PATH: &str = "patients.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub store_path: PathBuf,
    /// Write an empty store file at startup when none exists.
    pub create_store: bool,
    pub log_format: LogFormat,
}

impl ServiceConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset variables take their
    /// defaults; set-but-invalid ones are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let bind_addr = lookup("VITALS_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| eyre::eyre!("invalid VITALS_BIND_ADDR '{bind_addr}': {e}"))?;

        let store_path = lookup("VITALS_STORE_PATH")
            .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string())
            .into();

        let create_store = match lookup("VITALS_CREATE_STORE").as_deref() {
            None | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => {
                return Err(eyre::eyre!(
                    "invalid VITALS_CREATE_STORE '{other}': expected true or false"
                ));
            }
        };

        let log_format = match lookup("VITALS_LOG_FORMAT").as_deref() {
            None | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => {
                return Err(eyre::eyre!(
                    "invalid VITALS_LOG_FORMAT '{other}': expected json or pretty"
                ));
            }
        };

        Ok(Self {
            bind_addr,
            store_path,
            create_store,
            log_format,
        })
    }
}
