// src/config.rs - Application configuration with serde-backed defaults
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Application-wide configuration.
///
/// Every field has a default so the tool works with no config file at all; a TOML
/// file can override any subset. The email pattern templates and default provider
/// domains are presentation data carried as configuration, not derived at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout applied to every network call (page fetch, probe, WHOIS, TLS).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Politeness delay between page fetches during a crawl, in milliseconds.
    #[serde(default = "default_crawl_delay_ms")]
    pub crawl_delay_ms: u64,

    #[serde(default = "default_max_pages")]
    pub default_max_pages: usize,

    /// Country calling prefix assumed for phone numbers given without one.
    #[serde(default = "default_phone_prefix")]
    pub default_phone_prefix: String,

    /// Candidate email templates, applied to a domain in this exact order.
    #[serde(default = "default_email_templates")]
    pub email_templates: Vec<String>,

    /// Public providers checked when a person lookup supplies no domains.
    #[serde(default = "default_provider_domains")]
    pub default_provider_domains: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            crawl_delay_ms: default_crawl_delay_ms(),
            default_max_pages: default_max_pages(),
            default_phone_prefix: default_phone_prefix(),
            email_templates: default_email_templates(),
            default_provider_domains: default_provider_domains(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, or fall back to defaults when no path
    /// is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                let config: AppConfig = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?;
                info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_user_agent() -> String {
    format!("contacthunt/{}", env!("CARGO_PKG_VERSION"))
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_crawl_delay_ms() -> u64 {
    1000
}

fn default_max_pages() -> usize {
    5
}

fn default_phone_prefix() -> String {
    "55".to_string()
}

fn default_email_templates() -> Vec<String> {
    // Order is a contract: the plain-name template comes first, followed by
    // name/surname combinations and then role aliases.
    [
        "nome@{domain}",
        "nome.sobrenome@{domain}",
        "n.sobrenome@{domain}",
        "nomesob@{domain}",
        "nome_sobrenome@{domain}",
        "sobrenome.nome@{domain}",
        "sobrenome@{domain}",
        "nome-sobrenome@{domain}",
        "contato@{domain}",
        "info@{domain}",
        "atendimento@{domain}",
        "suporte@{domain}",
        "vendas@{domain}",
        "comercial@{domain}",
        "admin@{domain}",
        "administracao@{domain}",
        "rh@{domain}",
        "financeiro@{domain}",
        "marketing@{domain}",
        "sac@{domain}",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_provider_domains() -> Vec<String> {
    ["gmail.com", "outlook.com", "hotmail.com", "yahoo.com"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable_without_a_file() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.default_max_pages, 5);
        assert_eq!(config.default_phone_prefix, "55");
        assert!(config.email_templates[0].starts_with("nome@"));
        assert_eq!(config.default_provider_domains.len(), 4);
    }

    #[test]
    fn partial_toml_overrides_merge_with_defaults() {
        let parsed: AppConfig = toml::from_str("default_max_pages = 12").unwrap();
        assert_eq!(parsed.default_max_pages, 12);
        assert_eq!(parsed.crawl_delay_ms, 1000);
    }
}
