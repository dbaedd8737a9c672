use anyhow::{Context, Result};
use rustls::pki_types::PrivateKeyDer;
use rustls::server::ServerConfig;
use rustls_pemfile::{certs, pkcs8_private_keys};
use std::fs;

use crate::config::TlsPaths;

/// Loads a PEM chain and its PKCS#8 key into a rustls server config.
pub fn rustls_config(paths: &TlsPaths) -> Result<ServerConfig> {
    let cert_pem = fs::read(&paths.cert)
        .with_context(|| format!("reading {}", paths.cert.display()))?;
    let key_pem = fs::read(&paths.key)
        .with_context(|| format!("reading {}", paths.key.display()))?;

    let chain: Vec<_> = certs(&mut &*cert_pem).collect::<Result<_, _>>()?;
    let key = pkcs8_private_keys(&mut &*key_pem)
        .next()
        .context("no PKCS#8 private key found")??;

    let cfg = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(chain, PrivateKeyDer::Pkcs8(key))?;

    Ok(cfg)
}
