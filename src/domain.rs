// src/domain.rs - Syntactic domain name validation
use once_cell::sync::Lazy;
use regex::Regex;

/// One or more labels of 1-63 alphanumeric/hyphen characters (no leading or
/// trailing hyphen), dot separated, ending in an alphabetic TLD of length >= 2.
static DOMAIN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$")
        .expect("domain regex is valid")
});

/// Check whether a string is a syntactically valid domain name.
///
/// Pure function; performs no lookups.
pub fn is_valid_domain(domain: &str) -> bool {
    DOMAIN_REGEX.is_match(domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_domains() {
        assert!(is_valid_domain("example.com"));
        assert!(is_valid_domain("sub.example.com"));
        assert!(is_valid_domain("exemplo.com.br"));
        assert!(is_valid_domain("my-site.org"));
        assert!(is_valid_domain("a.io"));
    }

    #[test]
    fn rejects_malformed_domains() {
        assert!(!is_valid_domain(""));
        assert!(!is_valid_domain("exa..com"));
        assert!(!is_valid_domain("example"));
        assert!(!is_valid_domain(".example.com"));
        assert!(!is_valid_domain("example.com."));
        assert!(!is_valid_domain("example.c"));
        assert!(!is_valid_domain("-example.com"));
        assert!(!is_valid_domain("example-.com"));
        assert!(!is_valid_domain("exam ple.com"));
        assert!(!is_valid_domain("example.123"));
    }

    #[test]
    fn rejects_hyphen_at_label_edges_but_allows_inner_hyphens() {
        assert!(is_valid_domain("ab-cd.example.com"));
        assert!(!is_valid_domain("ab-.example.com"));
        assert!(!is_valid_domain("-ab.example.com"));
    }
}
