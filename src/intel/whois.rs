// src/intel/whois.rs - WHOIS lookup over TCP port 43 with simulated fallback
use std::time::Duration;
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::error::ContactHuntError;
use crate::model::{Sourced, WhoisInfo};

const WHOIS_PORT: u16 = 43;

/// Registry servers for the TLDs we most often see; everything else goes through
/// the IANA referral server.
const WHOIS_SERVERS: &[(&str, &str)] = &[
    ("com", "whois.verisign-grs.com"),
    ("net", "whois.verisign-grs.com"),
    ("org", "whois.pir.org"),
    ("io", "whois.nic.io"),
    ("br", "whois.registro.br"),
    ("info", "whois.nic.info"),
    ("dev", "whois.nic.google"),
];

const FALLBACK_SERVER: &str = "whois.iana.org";

/// Look up registration data for a domain.
///
/// A failed or empty lookup never propagates: it is replaced by a deterministic
/// placeholder record, tagged `Simulated` so callers cannot mistake it for
/// registry data.
pub async fn whois_info(domain: &str, timeout_secs: u64) -> Sourced<WhoisInfo> {
    match lookup(domain, timeout_secs).await {
        Ok(info) => Sourced::Real(info),
        Err(e) => {
            warn!("WHOIS lookup failed for {}: {}; substituting simulated record", domain, e);
            Sourced::Simulated(simulated_whois(domain))
        }
    }
}

async fn lookup(domain: &str, timeout_secs: u64) -> Result<WhoisInfo> {
    let server = server_for(domain);
    let timeout = Duration::from_secs(timeout_secs);
    debug!("WHOIS query for {} via {}", domain, server);

    let response = tokio::time::timeout(timeout, query(server, domain))
        .await
        .map_err(|_| {
            anyhow::Error::new(ContactHuntError::TimeoutError {
                operation: format!("WHOIS query to {}", server),
                seconds: timeout_secs,
            })
        })??;

    let info = parse_response(domain, &response);
    if info.registrar.is_none() && info.name_servers.is_empty() {
        return Err(anyhow!("WHOIS response for {} carried no usable fields", domain));
    }

    Ok(info)
}

async fn query(server: &str, domain: &str) -> Result<String> {
    let mut stream = TcpStream::connect((server, WHOIS_PORT))
        .await
        .with_context(|| format!("Failed to connect to {}:{}", server, WHOIS_PORT))?;

    stream
        .write_all(format!("{}\r\n", domain).as_bytes())
        .await
        .context("Failed to send WHOIS query")?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .await
        .context("Failed to read WHOIS response")?;

    Ok(String::from_utf8_lossy(&response).into_owned())
}

/// Pick the registry server from the domain's final label.
fn server_for(domain: &str) -> &'static str {
    let tld = domain.rsplit('.').next().unwrap_or_default();
    WHOIS_SERVERS
        .iter()
        .find(|(known, _)| *known == tld)
        .map(|(_, server)| *server)
        .unwrap_or(FALLBACK_SERVER)
}

/// Line-oriented parse of the key fields registries agree on.
fn parse_response(domain: &str, response: &str) -> WhoisInfo {
    let mut info = WhoisInfo {
        domain_name: domain.to_string(),
        ..Default::default()
    };

    for line in response.lines() {
        let line = line.trim();
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match key.as_str() {
            "registrar" => set_if_empty(&mut info.registrar, value),
            "registrar whois server" | "whois server" => {
                set_if_empty(&mut info.whois_server, value)
            }
            "creation date" | "created" | "registered on" => {
                set_if_empty(&mut info.creation_date, value)
            }
            "registry expiry date" | "expiration date" | "expiry date" | "expires" => {
                set_if_empty(&mut info.expiration_date, value)
            }
            "updated date" | "last updated" | "changed" => {
                set_if_empty(&mut info.updated_date, value)
            }
            "name server" | "nserver" => {
                info.name_servers.push(value.to_lowercase());
            }
            "domain status" | "status" => {
                info.status.push(value.to_string());
            }
            "registrant email" | "admin email" | "tech email" => {
                info.emails.push(value.to_lowercase());
            }
            "registrant organization" | "registrant organisation" | "org" | "owner" => {
                set_if_empty(&mut info.org, value)
            }
            "registrant country" | "country" => set_if_empty(&mut info.country, value),
            _ => {}
        }
    }

    info
}

fn set_if_empty(slot: &mut Option<String>, value: &str) {
    if slot.is_none() {
        *slot = Some(value.to_string());
    }
}

/// Deterministic placeholder registration record for when the registry cannot be
/// reached.
pub fn simulated_whois(domain: &str) -> WhoisInfo {
    let tld = domain.rsplit('.').next().unwrap_or_default();

    WhoisInfo {
        domain_name: domain.to_string(),
        registrar: Some("Registrar Simulado Ltda.".to_string()),
        whois_server: Some(format!("whois.{}", tld)),
        creation_date: Some("2020-01-01T00:00:00".to_string()),
        expiration_date: Some("2025-01-01T00:00:00".to_string()),
        updated_date: Some(Utc::now().to_rfc3339()),
        name_servers: vec![format!("ns1.{}", domain), format!("ns2.{}", domain)],
        status: vec!["active".to_string()],
        emails: vec![format!("admin@{}", domain), format!("tech@{}", domain)],
        org: Some("Organização Simulada".to_string()),
        country: Some("BR".to_string()),
    }
}
