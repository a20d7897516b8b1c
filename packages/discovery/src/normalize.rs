//! Sector and stage normalization.
//!
//! Pure, total functions that map free-text sector/stage strings onto a
//! canonical taxonomy so filtering and grouping behave consistently across
//! sources. Lookup is case-insensitive on the trimmed input; unknown
//! vocabulary falls back to title-casing, which keeps the functions
//! idempotent: every canonical form's lowercase is itself a valid key.

/// Canonical sector for a free-text sector string.
///
/// Empty or whitespace input maps to "Technology".
pub fn normalize_sector(raw: &str) -> String {
    let key = lookup_key(raw);
    if key.is_empty() {
        return "Technology".to_string();
    }

    let canonical = match key.as_str() {
        "fintech" | "financial services" => "FinTech",
        "healthcare" | "health" | "healthtech" | "medical" => "HealthTech",
        "ai" | "ai/ml" | "artificial intelligence" | "machine learning" | "ml" => "AI/ML",
        "saas" | "b2b" | "b2b saas" | "productivity" | "software" => "B2B SaaS",
        "enterprise" | "enterprise software" => "Enterprise Software",
        "developer tools" | "devtools" => "Developer Tools",
        "climate" | "climate tech" | "cleantech" | "climatetech" | "clean technology" => {
            "Climate Tech"
        }
        "crypto" | "web3" | "blockchain" | "blockchain/web3" | "cryptocurrency" => {
            "Blockchain/Web3"
        }
        "consumer" => "Consumer",
        "education" | "edtech" => "EdTech",
        "ecommerce" | "e-commerce" | "retail" => "E-commerce",
        "marketplace" => "Marketplace",
        "security" | "cybersecurity" | "cyber security" => "Cybersecurity",
        "deeptech" | "hardware" | "biotech" | "biotechnology" => "DeepTech",
        _ => return title_case(&key),
    };
    canonical.to_string()
}

/// Canonical stage for a free-text stage string.
///
/// Empty or whitespace input maps to "Seed".
pub fn normalize_stage(raw: &str) -> String {
    let key = lookup_key(raw);
    if key.is_empty() {
        return "Seed".to_string();
    }

    let canonical = match key.as_str() {
        "pre-seed" | "preseed" => "Pre-Seed",
        "seed" | "early stage" => "Seed",
        "series a" => "Series A",
        "series b" => "Series B",
        "series c" | "series c+" | "series d" | "series e" => "Series C+",
        "growth" | "growth/late stage" | "late stage" | "public" | "acquired" => {
            "Growth/Late Stage"
        }
        _ => return title_case(&key),
    };
    canonical.to_string()
}

/// Lowercased, whitespace-collapsed lookup key.
fn lookup_key(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character of each whitespace-separated word,
/// lowercasing the rest. Characters without a one-to-one uppercase
/// mapping are left alone so the function stays idempotent.
fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut upper = first.to_uppercase();
                    let head = match (upper.next(), upper.next()) {
                        (Some(c), None) => c,
                        _ => first,
                    };
                    head.to_string() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_sector_synonyms_map_to_canonical() {
        assert_eq!(normalize_sector("fintech"), "FinTech");
        assert_eq!(normalize_sector("Financial Services"), "FinTech");
        assert_eq!(normalize_sector("  machine learning  "), "AI/ML");
        assert_eq!(normalize_sector("crypto"), "Blockchain/Web3");
        assert_eq!(normalize_sector("saas"), "B2B SaaS");
    }

    #[test]
    fn unknown_sector_is_title_cased() {
        assert_eq!(normalize_sector("space logistics"), "Space Logistics");
        assert_eq!(normalize_sector("AGRITECH"), "Agritech");
    }

    #[test]
    fn empty_sector_defaults_to_technology() {
        assert_eq!(normalize_sector(""), "Technology");
        assert_eq!(normalize_sector("   "), "Technology");
    }

    #[test]
    fn known_stage_synonyms_map_to_canonical() {
        assert_eq!(normalize_stage("preseed"), "Pre-Seed");
        assert_eq!(normalize_stage("Series D"), "Series C+");
        assert_eq!(normalize_stage("acquired"), "Growth/Late Stage");
        assert_eq!(normalize_stage("early stage"), "Seed");
    }

    #[test]
    fn empty_stage_defaults_to_seed() {
        assert_eq!(normalize_stage(""), "Seed");
    }

    #[test]
    fn canonical_forms_are_fixed_points() {
        for canonical in [
            "FinTech",
            "HealthTech",
            "AI/ML",
            "B2B SaaS",
            "Enterprise Software",
            "Developer Tools",
            "Climate Tech",
            "Blockchain/Web3",
            "Consumer",
            "EdTech",
            "E-commerce",
            "Marketplace",
            "Cybersecurity",
            "DeepTech",
            "Technology",
        ] {
            assert_eq!(normalize_sector(canonical), canonical);
        }

        for canonical in [
            "Pre-Seed",
            "Seed",
            "Series A",
            "Series B",
            "Series C+",
            "Growth/Late Stage",
        ] {
            assert_eq!(normalize_stage(canonical), canonical);
        }
    }

    proptest! {
        #[test]
        fn normalize_sector_is_idempotent(raw in ".*") {
            let once = normalize_sector(&raw);
            prop_assert_eq!(normalize_sector(&once), once);
        }

        #[test]
        fn normalize_stage_is_idempotent(raw in ".*") {
            let once = normalize_stage(&raw);
            prop_assert_eq!(normalize_stage(&once), once);
        }
    }
}
