use std::collections::{BTreeSet, HashSet};

use once_cell::sync::Lazy;

use crate::errors::ServiceError;

/// ISO 3166-1 alpha-2 codes.
const ISO_3166_ALPHA2: [&str; 249] = [
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT",
    "AU", "AW", "AX", "AZ", "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI",
    "BJ", "BL", "BM", "BN", "BO", "BQ", "BR", "BS", "BT", "BV", "BW", "BY",
    "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN",
    "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM",
    "DO", "DZ", "EC", "EE", "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK",
    "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF", "GG", "GH", "GI", "GL",
    "GM", "GN", "GP", "GQ", "GR", "GS", "GT", "GU", "GW", "GY", "HK", "HM",
    "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR",
    "IS", "IT", "JE", "JM", "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN",
    "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC", "LI", "LK", "LR", "LS",
    "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK",
    "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW",
    "MX", "MY", "MZ", "NA", "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP",
    "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG", "PH", "PK", "PL", "PM",
    "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM",
    "SN", "SO", "SR", "SS", "ST", "SV", "SX", "SY", "SZ", "TC", "TD", "TF",
    "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO", "TR", "TT", "TV", "TW",
    "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

static COUNTRY_CODES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ISO_3166_ALPHA2.iter().copied().collect());

pub fn is_country_code(code: &str) -> bool {
    COUNTRY_CODES.contains(code)
}

/// Trims and upper-cases `raw`, then checks it is a known country code.
pub fn normalize_country(field: &str, raw: &str) -> Result<String, ServiceError> {
    let code = raw.trim().to_ascii_uppercase();
    if is_country_code(&code) {
        Ok(code)
    } else {
        Err(ServiceError::invalid_field(
            field,
            format!("'{}' is not a valid ISO 3166-1 alpha-2 country code", raw.trim()),
        ))
    }
}

/// Normalizes a list of codes into a sorted set.
pub fn normalize_country_set<I, S>(field: &str, raw: I) -> Result<Vec<String>, ServiceError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut codes = BTreeSet::new();
    for code in raw {
        codes.insert(normalize_country(field, code.as_ref())?);
    }
    Ok(codes.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_uppercased() {
        assert_eq!(normalize_country("hq_country", " cn ").unwrap(), "CN");
    }

    #[test]
    fn unknown_codes_are_rejected() {
        let err = normalize_country("hq_country", "XX").unwrap_err();
        assert!(err.is_invalid_field("hq_country"));
        assert!(normalize_country("hq_country", "USA").is_err());
    }

    #[test]
    fn sets_are_sorted_and_deduplicated() {
        let codes = normalize_country_set("mfg_country", ["vn", "CN", "my", "cn"]).unwrap();
        assert_eq!(codes, vec!["CN", "MY", "VN"]);
    }

    #[test]
    fn empty_set_is_allowed() {
        let codes = normalize_country_set("mfg_country", Vec::<String>::new()).unwrap();
        assert!(codes.is_empty());
    }
}
