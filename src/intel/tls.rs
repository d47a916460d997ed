// src/intel/tls.rs - TLS certificate probe against port 443
use std::time::Duration;
use anyhow::{anyhow, Context, Result};
use tokio::net::TcpStream;
use tracing::{debug, warn};
use x509_parser::prelude::FromDer;
use x509_parser::certificate::X509Certificate;

use crate::error::ContactHuntError;
use crate::model::SslInfo;

const TLS_PORT: u16 = 443;

/// Open a TLS connection solely to retrieve and inspect the server certificate.
///
/// Any failure (refused connection, handshake error, missing or unparsable
/// certificate) collapses into a tagged `NoSsl` value carrying the reason.
pub async fn probe(domain: &str, timeout_secs: u64) -> SslInfo {
    match probe_inner(domain, TLS_PORT, timeout_secs).await {
        Ok(info) => info,
        Err(e) => {
            warn!("TLS probe failed for {}: {}", domain, e);
            SslInfo::NoSsl {
                error: e.to_string(),
            }
        }
    }
}

async fn probe_inner(domain: &str, port: u16, timeout_secs: u64) -> Result<SslInfo> {
    let timeout = Duration::from_secs(timeout_secs);
    debug!("TLS probe for {}:{}", domain, port);

    let connector = native_tls::TlsConnector::new().context("Failed to build TLS connector")?;
    let connector = tokio_native_tls::TlsConnector::from(connector);

    let tcp = tokio::time::timeout(timeout, TcpStream::connect((domain, port)))
        .await
        .map_err(|_| {
            anyhow::Error::new(ContactHuntError::TimeoutError {
                operation: format!("Connection to {}:{}", domain, port),
                seconds: timeout_secs,
            })
        })?
        .with_context(|| format!("Failed to connect to {}:{}", domain, port))?;

    let tls = tokio::time::timeout(timeout, connector.connect(domain, tcp))
        .await
        .map_err(|_| {
            anyhow::Error::new(ContactHuntError::TimeoutError {
                operation: format!("TLS handshake with {}", domain),
                seconds: timeout_secs,
            })
        })?
        .with_context(|| format!("TLS handshake with {} failed", domain))?;

    let certificate = tls
        .get_ref()
        .peer_certificate()
        .context("Failed to read peer certificate")?
        .ok_or_else(|| anyhow!("Server presented no certificate"))?;

    let der = certificate
        .to_der()
        .context("Failed to encode certificate as DER")?;

    let (_, parsed) = X509Certificate::from_der(&der)
        .map_err(|e| anyhow!("Failed to parse certificate: {}", e))?;

    Ok(SslInfo::HasSsl {
        subject: parsed.subject().to_string(),
        issuer: parsed.issuer().to_string(),
        serial_number: parsed.raw_serial_as_string(),
        not_before: parsed.validity().not_before.to_string(),
        not_after: parsed.validity().not_after.to_string(),
    })
}
