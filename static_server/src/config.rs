//! Runtime settings, read from the environment (and `.env` when present).

use anyhow::{bail, Context, Result};
use std::{env, net::SocketAddr, path::PathBuf};

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_DIST: &str = "frontend/dist";

#[derive(Clone, Debug, PartialEq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub bind: SocketAddr,
    /// Output directory of `trunk build`.
    pub dist: PathBuf,
    pub tls: Option<TlsPaths>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_bind = get("URBANFIX_BIND").unwrap_or_else(|| DEFAULT_BIND.into());
        let bind = raw_bind
            .parse()
            .with_context(|| format!("URBANFIX_BIND is not a socket address: {raw_bind}"))?;

        let dist = get("URBANFIX_DIST")
            .unwrap_or_else(|| DEFAULT_DIST.into())
            .into();

        let tls = match (get("URBANFIX_TLS_CERT"), get("URBANFIX_TLS_KEY")) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            _ => bail!("URBANFIX_TLS_CERT and URBANFIX_TLS_KEY must be set together"),
        };

        Ok(Config { bind, dist, tls })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_serve_plain_http_from_the_trunk_output() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.bind, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.dist, PathBuf::from("frontend/dist"));
        assert_eq!(cfg.tls, None);
    }

    #[test]
    fn tls_needs_both_files() {
        let err = Config::from_lookup(lookup(&[("URBANFIX_TLS_CERT", "cert.pem")])).unwrap_err();
        assert!(err.to_string().contains("set together"));

        let cfg = Config::from_lookup(lookup(&[
            ("URBANFIX_TLS_CERT", "certs/dev-cert.pem"),
            ("URBANFIX_TLS_KEY", "certs/dev-key.pem"),
        ]))
        .unwrap();
        assert_eq!(
            cfg.tls.map(|t| t.key),
            Some(PathBuf::from("certs/dev-key.pem"))
        );
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let err = Config::from_lookup(lookup(&[("URBANFIX_BIND", "localhost")])).unwrap_err();
        assert!(err.to_string().contains("URBANFIX_BIND"));
    }
}
