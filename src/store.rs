// src/store.rs - Per-session result store with JSON persistence and CSV export
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{ContactHuntError, ContactHuntResult};

/// Result categories, one directory each under the store root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Emails,
    Domains,
    Phones,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Emails, Category::Domains, Category::Phones];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Emails => "emails",
            Category::Domains => "domains",
            Category::Phones => "phones",
        }
    }
}

impl FromStr for Category {
    type Err = ContactHuntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "emails" => Ok(Category::Emails),
            "domains" => Ok(Category::Domains),
            "phones" => Ok(Category::Phones),
            other => Err(ContactHuntError::InvalidInput(format!(
                "Unknown category: {} (expected emails, domains or phones)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-memory map of past results plus one JSON file per insert.
///
/// Owned by a single harvesting session; append-only for the process lifetime.
/// Files are qualified with a timestamp so repeat lookups never overwrite
/// earlier snapshots.
pub struct ResultStore {
    root: PathBuf,
    results: HashMap<Category, BTreeMap<String, Value>>,
}

impl ResultStore {
    /// Create a store rooted at `root`, creating the per-category directories.
    pub fn new(root: impl Into<PathBuf>) -> ContactHuntResult<Self> {
        let root = root.into();

        for category in Category::ALL {
            let dir = root.join(category.as_str());
            fs::create_dir_all(&dir).map_err(|e| ContactHuntError::FileError {
                path: dir.clone(),
                message: format!("Failed to create category directory: {}", e),
            })?;
        }

        Ok(Self {
            root,
            results: HashMap::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist a record as JSON and upsert it into the in-memory map.
    ///
    /// Returns the path of the file written for this insert.
    pub fn save<T: Serialize>(
        &mut self,
        category: Category,
        identifier: &str,
        record: &T,
    ) -> ContactHuntResult<PathBuf> {
        let value = serde_json::to_value(record)?;

        let filename = format!(
            "{}_{}.json",
            identifier,
            Utc::now().format("%Y%m%d_%H%M%S")
        );
        let path = self.root.join(category.as_str()).join(filename);

        let pretty = serde_json::to_string_pretty(&value)?;
        fs::write(&path, pretty).map_err(|e| ContactHuntError::FileError {
            path: path.clone(),
            message: format!("Failed to write result file: {}", e),
        })?;

        info!("Saved {} result to {}", category, path.display());

        self.results
            .entry(category)
            .or_default()
            .insert(identifier.to_string(), value);

        Ok(path)
    }

    pub fn records(&self, category: Category) -> Option<&BTreeMap<String, Value>> {
        self.results.get(&category)
    }

    /// Flatten one category to CSV with its fixed column projection.
    ///
    /// An empty category is not an error: it yields `None` and writes nothing.
    pub fn export_to_csv(&self, category: Category) -> ContactHuntResult<Option<PathBuf>> {
        let Some(records) = self.results.get(&category).filter(|map| !map.is_empty()) else {
            warn!("No results to export for category: {}", category);
            return Ok(None);
        };

        let filename = format!("{}_{}.csv", category, Utc::now().format("%Y%m%d_%H%M%S"));
        let path = self.root.join(filename);

        let mut writer = csv::Writer::from_path(&path).map_err(|e| ContactHuntError::FileError {
            path: path.clone(),
            message: format!("Failed to create CSV file: {}", e),
        })?;

        let write_result = match category {
            Category::Emails => write_email_rows(&mut writer, records),
            Category::Domains => write_domain_rows(&mut writer, records),
            Category::Phones => write_phone_rows(&mut writer, records),
        };
        write_result.map_err(|e| ContactHuntError::FileError {
            path: path.clone(),
            message: format!("Failed to write CSV rows: {}", e),
        })?;

        writer.flush().map_err(|e| ContactHuntError::FileError {
            path: path.clone(),
            message: format!("Failed to flush CSV file: {}", e),
        })?;

        info!("Exported {} results to {}", category, path.display());
        Ok(Some(path))
    }
}

/// One row per harvested email address.
fn write_email_rows(
    writer: &mut csv::Writer<fs::File>,
    records: &BTreeMap<String, Value>,
) -> csv::Result<()> {
    writer.write_record(["domain", "email", "collected_at"])?;

    for (identifier, record) in records {
        let Some(emails) = record.get("emails_found").and_then(Value::as_array) else {
            // Person queries live in the same category but carry candidate
            // emails, not harvested ones; they contribute no rows.
            continue;
        };

        for email in emails {
            writer.write_record([
                identifier.as_str(),
                email.as_str().unwrap_or_default(),
                str_field(record, &["collected_at"]),
            ])?;
        }
    }

    Ok(())
}

/// One row per analyzed domain.
fn write_domain_rows(
    writer: &mut csv::Writer<fs::File>,
    records: &BTreeMap<String, Value>,
) -> csv::Result<()> {
    writer.write_record([
        "domain",
        "registrar",
        "creation_date",
        "expiration_date",
        "site_available",
        "ip_addresses",
        "collected_at",
    ])?;

    for (identifier, record) in records {
        let ip_addresses = record
            .get("ip_addresses")
            .and_then(Value::as_array)
            .map(|ips| {
                ips.iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();

        let site_available = record
            .get("site_available")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        writer.write_record([
            identifier.as_str(),
            str_field(record, &["whois_info", "data", "registrar"]),
            str_field(record, &["whois_info", "data", "creation_date"]),
            str_field(record, &["whois_info", "data", "expiration_date"]),
            if site_available { "true" } else { "false" },
            ip_addresses.as_str(),
            str_field(record, &["collected_at"]),
        ])?;
    }

    Ok(())
}

/// One row per phone record.
fn write_phone_rows(
    writer: &mut csv::Writer<fs::File>,
    records: &BTreeMap<String, Value>,
) -> csv::Result<()> {
    writer.write_record([
        "phone_number",
        "country",
        "carrier",
        "line_type",
        "collected_at",
    ])?;

    for record in records.values() {
        writer.write_record([
            str_field(record, &["normalized_number"]),
            str_field(record, &["phone_info", "country"]),
            str_field(record, &["phone_info", "carrier"]),
            str_field(record, &["phone_info", "line_type"]),
            str_field(record, &["collected_at"]),
        ])?;
    }

    Ok(())
}

fn str_field<'a>(record: &'a Value, path: &[&str]) -> &'a str {
    let mut current = record;
    for key in path {
        match current.get(key) {
            Some(next) => current = next,
            None => return "",
        }
    }
    current.as_str().unwrap_or("")
}
