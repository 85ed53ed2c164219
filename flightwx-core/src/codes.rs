//! Static city name to ICAO code lookup.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Code reported for cities missing from the table.
pub const UNKNOWN_CODE: &str = "Unknown";

const KNOWN_CITIES: &[(&str, &str)] = &[
    ("Delhi", "VIDP"),
    ("Jaipur", "VIJP"),
    ("Ahmedabad", "VAAH"),
    ("Mumbai", "VABB"),
    ("Kolkata", "VECC"),
    ("Bhubaneswar", "VEBS"),
    ("Hyderabad", "VOHY"),
    ("Bangalore", "VOBL"),
    ("Goa", "VOGO"),
    ("Coimbatore", "VOCB"),
    ("Kochi", "VOCI"),
    ("Thiruvananthapuram", "VOTV"),
    ("Chennai", "VOMM"),
    ("Nagpur", "VANP"),
    ("Lucknow", "VILK"),
    ("Pune", "VAPO"),
    ("Chandigarh", "VICG"),
    ("Guwahati", "VEGT"),
    ("Mysuru", "VOMY"),
    ("Patna", "VEPT"),
    ("Bhopal", "VABP"),
];

static CODE_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| KNOWN_CITIES.iter().copied().collect());

/// City paired with its resolved location code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCity {
    pub city: String,
    pub code: String,
}

/// Exact, case-sensitive lookup. Unknown cities yield [`UNKNOWN_CODE`].
pub fn lookup(city: &str) -> &'static str {
    CODE_TABLE.get(city).copied().unwrap_or(UNKNOWN_CODE)
}

/// Resolve every city, keeping input order and duplicates.
pub fn resolve(cities: &[String]) -> Vec<ResolvedCity> {
    cities
        .iter()
        .map(|city| ResolvedCity { city: city.clone(), code: lookup(city).to_string() })
        .collect()
}

/// Known cities in table order.
pub fn entries() -> &'static [(&'static str, &'static str)] {
    KNOWN_CITIES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_city_resolves_to_its_code() {
        for (city, code) in entries() {
            assert_eq!(lookup(city), *code, "{city}");
        }
    }

    #[test]
    fn unknown_and_miscased_cities_are_unknown() {
        assert_eq!(lookup("Atlantis"), UNKNOWN_CODE);
        assert_eq!(lookup("delhi"), UNKNOWN_CODE);
        assert_eq!(lookup("MUMBAI"), UNKNOWN_CODE);
        assert_eq!(lookup(" Delhi"), UNKNOWN_CODE);
        assert_eq!(lookup(""), UNKNOWN_CODE);
    }

    #[test]
    fn resolve_preserves_order_and_duplicates() {
        let cities: Vec<String> =
            ["Mumbai", "Nowhere", "Delhi", "Mumbai"].into_iter().map(String::from).collect();
        let resolved = resolve(&cities);
        let pairs: Vec<(&str, &str)> =
            resolved.iter().map(|r| (r.city.as_str(), r.code.as_str())).collect();

        assert_eq!(
            pairs,
            vec![("Mumbai", "VABB"), ("Nowhere", "Unknown"), ("Delhi", "VIDP"), ("Mumbai", "VABB")]
        );
    }
}
