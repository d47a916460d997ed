// src/intel/mod.rs - Domain intelligence aggregation
pub mod dns;
pub mod tls;
pub mod whois;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::is_valid_domain;
use crate::error::{ContactHuntError, ContactHuntResult};
use crate::model::DomainReport;
use crate::utils::http::HttpClient;

/// Build an aggregated report for a domain: WHOIS registration, DNS A records,
/// HTTPS reachability and TLS certificate details.
///
/// Only a syntactically invalid domain fails fast; each probe runs regardless of
/// the others, and a failed probe contributes its failure sentinel (simulated
/// WHOIS, empty address list, unavailable flag, tagged `NoSsl`) instead of
/// aborting the report.
pub async fn analyze_domain(
    http: &HttpClient,
    timeout_secs: u64,
    domain: &str,
) -> ContactHuntResult<DomainReport> {
    if !is_valid_domain(domain) {
        return Err(ContactHuntError::InvalidDomain(domain.to_string()));
    }

    info!("Analyzing domain: {}", domain);

    let whois_info = whois::whois_info(domain, timeout_secs).await;
    let ip_addresses = dns::resolve_ipv4(domain).await;
    let (site_available, status_code) = probe_site(http, domain).await;
    let ssl_info = tls::probe(domain, timeout_secs).await;

    Ok(DomainReport {
        domain: domain.to_string(),
        whois_info,
        ip_addresses,
        site_available,
        status_code,
        ssl_info,
        collected_at: Utc::now(),
    })
}

/// GET `https://{domain}` and record availability plus the status code.
///
/// Both fall to their failure sentinel (`false`, `None`) on any network error.
async fn probe_site(http: &HttpClient, domain: &str) -> (bool, Option<u16>) {
    let url = format!("https://{}", domain);

    match http.get(&url).await {
        Ok(response) => {
            let status = response.status().as_u16();
            (status == 200, Some(status))
        }
        Err(e) => {
            warn!("Site availability probe failed for {}: {}", domain, e);
            (false, None)
        }
    }
}
