// src/model.rs - Record types shared across harvesting operations
use std::collections::BTreeSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wrapper distinguishing genuine lookup results from deterministic placeholders.
///
/// Fabricated data is only ever produced behind the `Simulated` variant so that a
/// caller can never mistake it for authoritative data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "source", content = "data", rename_all = "snake_case")]
pub enum Sourced<T> {
    Real(T),
    Simulated(T),
}

impl<T> Sourced<T> {
    pub fn is_simulated(&self) -> bool {
        matches!(self, Sourced::Simulated(_))
    }

    pub fn inner(&self) -> &T {
        match self {
            Sourced::Real(value) | Sourced::Simulated(value) => value,
        }
    }
}

/// Result of a domain-scoped email harvest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestResult {
    pub domain: String,
    pub emails_found: BTreeSet<String>,
    pub possible_patterns: Vec<String>,
    /// WHOIS registration data for the harvested domain. The `Simulated` tag
    /// marks the cases where the registry could not be reached.
    pub domain_info: Option<Sourced<WhoisInfo>>,
    pub collected_at: DateTime<Utc>,
}

/// Candidate emails derived from a person's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonQuery {
    pub name: String,
    pub domains_checked: Vec<String>,
    pub name_variations: BTreeSet<String>,
    pub possible_emails: Vec<String>,
    pub collected_at: DateTime<Utc>,
}

/// Normalized phone number plus inferred (simulated) line intelligence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneRecord {
    pub original_number: String,
    pub normalized_number: String,
    pub country_code: String,
    pub phone_info: PhoneInfo,
    pub collected_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhoneInfo {
    pub country: String,
    pub carrier: String,
    pub region: String,
    pub line_type: String,
    pub valid_format: bool,
    /// Always true: carrier/region/line type come from a deterministic placeholder,
    /// not a telecom lookup.
    pub simulated: bool,
}

/// Aggregated registration, DNS, reachability and TLS intelligence for a domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainReport {
    pub domain: String,
    pub whois_info: Sourced<WhoisInfo>,
    pub ip_addresses: Vec<String>,
    pub site_available: bool,
    pub status_code: Option<u16>,
    pub ssl_info: SslInfo,
    pub collected_at: DateTime<Utc>,
}

/// Registration metadata from a WHOIS lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WhoisInfo {
    pub domain_name: String,
    pub registrar: Option<String>,
    pub whois_server: Option<String>,
    pub creation_date: Option<String>,
    pub expiration_date: Option<String>,
    pub updated_date: Option<String>,
    pub name_servers: Vec<String>,
    pub status: Vec<String>,
    pub emails: Vec<String>,
    pub org: Option<String>,
    pub country: Option<String>,
}

/// Outcome of the TLS certificate probe against port 443.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SslInfo {
    HasSsl {
        subject: String,
        issuer: String,
        serial_number: String,
        not_before: String,
        not_after: String,
    },
    NoSsl {
        error: String,
    },
}

impl SslInfo {
    pub fn has_ssl(&self) -> bool {
        matches!(self, SslInfo::HasSsl { .. })
    }
}
