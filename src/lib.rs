pub mod app;
pub mod config;
pub mod crawler;
pub mod domain;
pub mod error;
pub mod extract;
pub mod intel;
pub mod model;
pub mod patterns;
pub mod phone;
pub mod store;
pub mod utils;

// Re-export main types for easier access
pub use app::ContactHunt;
pub use config::AppConfig;
pub use error::{ContactHuntError, ContactHuntResult};
pub use model::{
    DomainReport,
    HarvestResult,
    PersonQuery,
    PhoneRecord,
    Sourced,
    SslInfo,
    WhoisInfo,
};
pub use store::{Category, ResultStore};
