// src/intel/dns.rs - A-record resolution
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use tracing::{debug, warn};

/// Resolve a domain to its IPv4 addresses.
///
/// Resolution failure is a localized fault: it logs and yields an empty list so
/// the enclosing report still gets built.
pub async fn resolve_ipv4(domain: &str) -> Vec<String> {
    let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());

    match resolver.ipv4_lookup(domain).await {
        Ok(lookup) => {
            let addresses: Vec<String> = lookup.iter().map(|a| a.0.to_string()).collect();
            debug!("Resolved {} to {} address(es)", domain, addresses.len());
            addresses
        }
        Err(e) => {
            warn!("DNS resolution failed for {}: {}", domain, e);
            Vec::new()
        }
    }
}
