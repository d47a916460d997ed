// src/patterns.rs - Deterministic candidate email generation
use std::collections::BTreeSet;

/// Apply the configured email templates to a domain.
///
/// Template order is preserved: callers rely on the first entry being the plain
/// name template.
pub fn generate_email_patterns(templates: &[String], domain: &str) -> Vec<String> {
    templates
        .iter()
        .map(|template| template.replace("{domain}", domain))
        .collect()
}

/// Derive plausible mailbox local parts from whitespace-split name tokens.
///
/// Returned as a set; callers must not assume any particular ordering.
pub fn generate_name_variations(name_parts: &[&str]) -> BTreeSet<String> {
    let mut variations = BTreeSet::new();

    let Some(first) = name_parts.first() else {
        return variations;
    };
    variations.insert(first.to_string());

    if name_parts.len() > 1 {
        let last = name_parts[name_parts.len() - 1];
        variations.insert(last.to_string());

        let first_initial = initial_of(first);

        variations.insert(format!("{}{}", first, last));
        variations.insert(format!("{}.{}", first, last));
        variations.insert(format!("{}_{}", first, last));
        variations.insert(format!("{}-{}", first, last));
        variations.insert(format!("{}{}", first_initial, last));
        variations.insert(format!("{}.{}", first_initial, last));

        variations.insert(format!("{}{}", last, first));
        variations.insert(format!("{}.{}", last, first));
        variations.insert(format!("{}_{}", last, first));

        if name_parts.len() > 2 {
            let middle_initial = initial_of(name_parts[1]);
            variations.insert(format!("{}{}{}", first, middle_initial, last));
            variations.insert(format!("{}.{}.{}", first, middle_initial, last));

            let initials: String = name_parts.iter().map(|part| initial_of(part)).collect();
            variations.insert(initials);
        }
    }

    variations
}

/// Cross product of name variations and domains, formatted as addresses.
///
/// Domain order drives the outer iteration inside each variation block so the
/// output is deterministic for a given variation set and domain list.
pub fn possible_emails(variations: &BTreeSet<String>, domains: &[String]) -> Vec<String> {
    let mut emails = Vec::with_capacity(variations.len() * domains.len());
    for variation in variations {
        for domain in domains {
            emails.push(format!("{}@{}", variation, domain));
        }
    }
    emails
}

fn initial_of(token: &str) -> String {
    token.chars().take(1).collect()
}
