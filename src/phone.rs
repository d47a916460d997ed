// src/phone.rs - Phone number normalization and country resolution
use tracing::debug;

use crate::error::{ContactHuntError, ContactHuntResult};
use crate::model::PhoneInfo;

/// Country calling codes ordered by descending code length.
///
/// The order is load-bearing: prefix matching walks this list front to back, so a
/// longer code ("351") must be tried before a shorter one ("1" or "3") that would
/// also match.
pub const COUNTRY_CODES: &[(&str, &str)] = &[
    ("351", "Portugal"),
    ("44", "Reino Unido"),
    ("49", "Alemanha"),
    ("55", "Brasil"),
    ("34", "Espanha"),
    ("33", "França"),
    ("39", "Itália"),
    ("81", "Japão"),
    ("86", "China"),
    ("1", "Estados Unidos/Canadá"),
    ("7", "Rússia"),
];

const UNKNOWN_CODE: &str = "unknown";

/// Normalize a raw phone number into canonical `+<countrycode><number>` form.
///
/// Strips punctuation, drops a single leading zero, and prepends the configured
/// default country prefix when the input carried no `+` and has at most 11 digits
/// (a national-format number).
pub fn normalize(raw_number: &str, default_prefix: &str) -> ContactHuntResult<String> {
    let had_plus = raw_number.trim_start().starts_with('+');

    let mut digits: String = raw_number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(ContactHuntError::InvalidPhone(raw_number.to_string()));
    }

    if digits.starts_with('0') {
        digits.remove(0);
    }

    if !had_plus && digits.len() <= 11 {
        digits = format!("{}{}", default_prefix, digits);
    }

    let normalized = if let Some(rest) = digits.strip_prefix("00") {
        format!("+{}", rest)
    } else {
        format!("+{}", digits)
    };

    debug!("Normalized phone {} -> {}", raw_number, normalized);
    Ok(normalized)
}

/// Resolve the country calling code of a normalized number.
///
/// Returns `"unknown"` when no entry of the table is a prefix of the number.
pub fn extract_country_code(normalized: &str) -> &'static str {
    let number = normalized.strip_prefix('+').unwrap_or(normalized);

    for (code, _country) in COUNTRY_CODES {
        if number.starts_with(code) {
            return code;
        }
    }

    UNKNOWN_CODE
}

/// Fabricate plausible line intelligence for a normalized number.
///
/// Deterministic in the country code and trailing digits; real carrier lookups are
/// out of scope, so every record is tagged `simulated`.
pub fn simulated_phone_info(normalized: &str, country_code: &str) -> PhoneInfo {
    let country = COUNTRY_CODES
        .iter()
        .find(|(code, _)| *code == country_code)
        .map(|(_, country)| country.to_string())
        .unwrap_or_else(|| "País desconhecido".to_string());

    let (carrier, region, line_type) = if country_code == "55" {
        brazilian_line_details(normalized)
    } else {
        (
            "Operadora internacional".to_string(),
            "Internacional".to_string(),
            "Desconhecido".to_string(),
        )
    };

    PhoneInfo {
        country,
        carrier,
        region,
        line_type,
        valid_format: true,
        simulated: true,
    }
}

/// Infer carrier, region and line type for a Brazilian number from its DDD (the
/// two-digit regional dialing prefix) and trailing digit.
fn brazilian_line_details(normalized: &str) -> (String, String, String) {
    let chars: Vec<char> = normalized.chars().collect();
    if chars.len() < 5 {
        return (
            "Desconhecida".to_string(),
            "Desconhecida".to_string(),
            "Desconhecido".to_string(),
        );
    }

    let ddd: String = if normalized.starts_with('+') {
        chars[3..5].iter().collect()
    } else {
        chars[2..4].iter().collect()
    };

    let carrier = match chars.last() {
        Some(d) if "01234".contains(*d) => "Vivo",
        Some(d) if "56".contains(*d) => "Claro",
        Some(d) if "78".contains(*d) => "TIM",
        _ => "Oi",
    };

    let region = if ["11", "21", "31", "41", "51", "61"].contains(&ddd.as_str()) {
        "Grande centro urbano"
    } else {
        "Interior"
    };

    let line_type = if chars.len() >= 13 && "6789".contains(chars[5]) {
        "Celular"
    } else {
        "Fixo"
    };

    (carrier.to_string(), region.to_string(), line_type.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn national_format_gets_default_prefix() {
        assert_eq!(
            normalize("(011) 98765-4321", "55").unwrap(),
            "+5511987654321"
        );
    }

    #[test]
    fn international_dialing_prefix_becomes_plus() {
        // One leading zero is dropped before the 00 check, so the
        // international-prefix form needs three zeros to reach that branch.
        assert_eq!(normalize("000351912345678", "55").unwrap(), "+351912345678");
    }

    #[test]
    fn leading_zero_drop_precedes_the_international_prefix_check() {
        assert_eq!(normalize("00351912345678", "55").unwrap(), "+0351912345678");
    }

    #[test]
    fn already_prefixed_numbers_stay_canonical() {
        assert_eq!(normalize("+351 912 345 678", "55").unwrap(), "+351912345678");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(normalize("abc", "55").is_err());
    }

    #[test]
    fn longest_code_wins_over_shorter_prefixes() {
        // "351" must match before "1" or any shorter code.
        assert_eq!(extract_country_code("+351912345678"), "351");
        assert_eq!(extract_country_code("+5511987654321"), "55");
        assert_eq!(extract_country_code("+14155552671"), "1");
    }

    #[test]
    fn unmatched_prefix_is_unknown() {
        assert_eq!(extract_country_code("+999123"), "unknown");
    }

    #[test]
    fn code_table_is_ordered_longest_first() {
        let lengths: Vec<usize> = COUNTRY_CODES.iter().map(|(code, _)| code.len()).collect();
        let mut sorted = lengths.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(lengths, sorted);
    }

    #[test]
    fn brazilian_mobile_in_capital_ddd() {
        let info = simulated_phone_info("+5511987654321", "55");
        assert_eq!(info.country, "Brasil");
        assert_eq!(info.region, "Grande centro urbano");
        assert_eq!(info.line_type, "Celular");
        assert_eq!(info.carrier, "Vivo");
        assert!(info.simulated);
    }

    #[test]
    fn non_brazilian_numbers_get_international_placeholders() {
        let info = simulated_phone_info("+351912345678", "351");
        assert_eq!(info.country, "Portugal");
        assert_eq!(info.carrier, "Operadora internacional");
        assert!(info.simulated);
    }
}
