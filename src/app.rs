// src/app.rs - Service facade tying harvesting operations to the result store
use std::path::PathBuf;
use std::time::Duration;
use chrono::Utc;
use tracing::{info, warn};
use url::Url;

use crate::config::AppConfig;
use crate::crawler::{Crawler, HttpPageFetcher};
use crate::domain::is_valid_domain;
use crate::error::{ContactHuntError, ContactHuntResult};
use crate::intel;
use crate::model::{DomainReport, HarvestResult, PersonQuery, PhoneRecord};
use crate::patterns;
use crate::phone;
use crate::store::{Category, ResultStore};
use crate::utils::http::HttpClient;

/// Main entry point for contact harvesting operations.
///
/// Owns its configuration, HTTP client and result store; a separate instance
/// should back each concurrent harvesting session, since the store is not
/// internally synchronized.
pub struct ContactHunt {
    config: AppConfig,
    http: HttpClient,
    crawler: Crawler<HttpPageFetcher>,
    store: ResultStore,
}

impl ContactHunt {
    /// Create a new instance, preparing the output directory tree.
    pub fn new(config: AppConfig) -> ContactHuntResult<Self> {
        let http = HttpClient::new(&config.user_agent, config.request_timeout_secs)
            .map_err(|e| ContactHuntError::ConfigError(e.to_string()))?;

        let crawler = Crawler::new(
            HttpPageFetcher::new(http.clone()),
            Duration::from_millis(config.crawl_delay_ms),
        );

        let store = ResultStore::new(config.output_dir.clone())?;

        Ok(Self {
            config,
            http,
            crawler,
            store,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Harvest email addresses from a domain's own website.
    ///
    /// Crawls breadth-first from `https://{domain}` within the page budget,
    /// generates candidate patterns, and attaches WHOIS registration data when
    /// obtainable. The record is persisted under the `emails` category.
    pub async fn harvest_domain(
        &mut self,
        domain: &str,
        max_pages: Option<usize>,
    ) -> ContactHuntResult<HarvestResult> {
        if !is_valid_domain(domain) {
            return Err(ContactHuntError::InvalidDomain(domain.to_string()));
        }

        let max_pages = max_pages.unwrap_or(self.config.default_max_pages);
        info!("Starting email harvest for {} (budget {} pages)", domain, max_pages);

        let seed = Url::parse(&format!("https://{}", domain))
            .map_err(|e| ContactHuntError::InvalidDomain(format!("{}: {}", domain, e)))?;

        let emails_found = self.crawler.crawl(&seed, max_pages).await?;

        let possible_patterns =
            patterns::generate_email_patterns(&self.config.email_templates, domain);

        let domain_info = Some(
            intel::whois::whois_info(domain, self.config.request_timeout_secs).await,
        );

        let result = HarvestResult {
            domain: domain.to_string(),
            emails_found: emails_found.into_iter().collect(),
            possible_patterns,
            domain_info,
            collected_at: Utc::now(),
        };

        self.store.save(Category::Emails, domain, &result)?;

        info!(
            "Email harvest finished for {}: {} address(es) found",
            domain,
            result.emails_found.len()
        );
        Ok(result)
    }

    /// Generate candidate email addresses for a person.
    ///
    /// The name is normalized to lowercase and split on whitespace; variations
    /// are crossed with the supplied domains, or the default public providers
    /// when none are given.
    pub async fn person_emails(
        &mut self,
        name: &str,
        domains: Option<Vec<String>>,
    ) -> ContactHuntResult<PersonQuery> {
        let name = name.trim().to_lowercase();
        let parts: Vec<&str> = name.split_whitespace().collect();

        if parts.is_empty() {
            return Err(ContactHuntError::InvalidInput("Empty person name".to_string()));
        }
        if parts.len() < 2 {
            warn!("Single-token name may produce imprecise results: {}", name);
        }

        info!("Generating candidate emails for: {}", name);

        let domains_checked = match domains {
            Some(list) if !list.is_empty() => list,
            _ => self.config.default_provider_domains.clone(),
        };

        let name_variations = patterns::generate_name_variations(&parts);
        let possible_emails = patterns::possible_emails(&name_variations, &domains_checked);

        let query = PersonQuery {
            name: name.clone(),
            domains_checked,
            name_variations,
            possible_emails,
            collected_at: Utc::now(),
        };

        let identifier = name.replace(' ', "_");
        self.store.save(Category::Emails, &identifier, &query)?;

        info!(
            "Generated {} candidate email(s) for {}",
            query.possible_emails.len(),
            name
        );
        Ok(query)
    }

    /// Normalize a phone number and attach simulated line intelligence.
    pub async fn phone_info(&mut self, phone_number: &str) -> ContactHuntResult<PhoneRecord> {
        info!("Resolving phone number: {}", phone_number);

        let normalized =
            phone::normalize(phone_number, &self.config.default_phone_prefix)?;
        let country_code = phone::extract_country_code(&normalized);
        let phone_info = phone::simulated_phone_info(&normalized, country_code);

        let record = PhoneRecord {
            original_number: phone_number.to_string(),
            normalized_number: normalized.clone(),
            country_code: country_code.to_string(),
            phone_info,
            collected_at: Utc::now(),
        };

        let identifier: String = normalized
            .chars()
            .filter(|c| *c != '+' && *c != ' ')
            .collect();
        self.store.save(Category::Phones, &identifier, &record)?;

        Ok(record)
    }

    /// Build and persist an aggregated intelligence report for a domain.
    pub async fn analyze_domain(&mut self, domain: &str) -> ContactHuntResult<DomainReport> {
        let report =
            intel::analyze_domain(&self.http, self.config.request_timeout_secs, domain).await?;

        self.store.save(Category::Domains, domain, &report)?;

        info!("Domain analysis finished for {}", domain);
        Ok(report)
    }

    /// Export a stored category to CSV; `None` when the category holds nothing.
    pub fn export_to_csv(&self, category: Category) -> ContactHuntResult<Option<PathBuf>> {
        self.store.export_to_csv(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn app() -> (TempDir, ContactHunt) {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            output_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        let app = ContactHunt::new(config).unwrap();
        (dir, app)
    }

    #[tokio::test]
    async fn facade_exposes_its_config_and_store() {
        let (dir, app) = app();
        assert_eq!(app.config().default_max_pages, 5);
        assert_eq!(app.store().root(), dir.path());
        assert!(app.store().records(Category::Emails).is_none());
    }

    #[tokio::test]
    async fn invalid_domain_fails_before_any_network_call() {
        let (_dir, mut app) = app();
        let err = app.harvest_domain("exa..com", Some(1)).await.unwrap_err();
        assert!(matches!(err, ContactHuntError::InvalidDomain(_)));
    }

    #[tokio::test]
    async fn person_query_uses_default_providers_and_persists() {
        let (dir, mut app) = app();

        let query = app.person_emails("João Silva", None).await.unwrap();
        assert_eq!(query.name, "joão silva");
        assert_eq!(query.domains_checked.len(), 4);
        assert_eq!(
            query.possible_emails.len(),
            query.name_variations.len() * query.domains_checked.len()
        );

        let saved: Vec<_> = std::fs::read_dir(dir.path().join("emails"))
            .unwrap()
            .collect();
        assert_eq!(saved.len(), 1);

        let records = app.store().records(Category::Emails).unwrap();
        assert!(records.contains_key("joão_silva"));
    }

    #[tokio::test]
    async fn person_query_rejects_empty_names() {
        let (_dir, mut app) = app();
        assert!(app.person_emails("   ", None).await.is_err());
    }

    #[tokio::test]
    async fn phone_record_is_normalized_and_tagged_simulated() {
        let (_dir, mut app) = app();

        let record = app.phone_info("(011) 98765-4321").await.unwrap();
        assert_eq!(record.normalized_number, "+5511987654321");
        assert_eq!(record.country_code, "55");
        assert!(record.phone_info.simulated);
    }

    #[tokio::test]
    async fn unusable_phone_is_rejected_before_storage() {
        let (dir, mut app) = app();

        assert!(app.phone_info("no digits here").await.is_err());
        let saved: Vec<_> = std::fs::read_dir(dir.path().join("phones"))
            .unwrap()
            .collect();
        assert!(saved.is_empty());
    }

    #[tokio::test]
    async fn export_of_empty_category_returns_none() {
        let (_dir, app) = app();
        assert!(app.export_to_csv(Category::Phones).unwrap().is_none());
    }

    #[tokio::test]
    async fn phone_export_round_trips_through_the_store() {
        let (_dir, mut app) = app();

        app.phone_info("+351 912 345 678").await.unwrap();
        let path = app.export_to_csv(Category::Phones).unwrap().unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("+351912345678"));
        assert!(content.contains("Portugal"));
    }
}
