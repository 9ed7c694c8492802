//! Pure classification of a variant's merchandising label.

use chrono::{DateTime, Duration, Utc};

use crate::label::Label;

/// How long after creation a variant still counts as "new".
/// The boundary is exclusive: a variant exactly this old is no longer new.
const NEW_WINDOW_DAYS: i64 = 45;

/// The commercial attributes a classification decision is made from.
///
/// Prices stay decimal strings exactly as the platform returns them
/// (e.g. `"12.99"`); they are parsed with standard floating semantics only
/// at comparison time.
#[derive(Debug, Clone)]
pub struct VariantFacts {
    /// When the variant itself was created.
    pub variant_created_at: DateTime<Utc>,
    /// When the parent product was created. Original variants carry the
    /// same timestamp as the product; variants added later are younger.
    pub product_created_at: DateTime<Utc>,
    /// Current price as a decimal string. Never empty.
    pub price: String,
    /// Compare-at (list) price, or `None` when the variant is not on sale.
    pub compare_at_price: Option<String>,
    /// Whether the variant is currently flagged as a recent best seller.
    pub bestseller: bool,
}

/// Computes the label a variant should carry at `now`.
///
/// Rules are evaluated in strict priority order — first match wins:
///
/// 1. **New** — the variant is no older than its parent product and was
///    created less than [`NEW_WINDOW_DAYS`] days ago. The window is the
///    deciding test: a product's original variants (same timestamp as the
///    product) qualify just like a variant added to an old product later.
/// 2. **Offer** — the compare-at price strictly exceeds the price. A
///    missing or unparseable compare-at price is treated as zero and can
///    never win, so equality is never an offer.
/// 3. **Hot** — the best-seller flag is set.
/// 4. **None** otherwise.
#[must_use]
pub fn classify(now: DateTime<Utc>, facts: &VariantFacts) -> Label {
    if facts.variant_created_at >= facts.product_created_at
        && now - facts.variant_created_at < Duration::days(NEW_WINDOW_DAYS)
    {
        return Label::New;
    }

    let price = parse_price(Some(&facts.price));
    let compare_at = parse_price(facts.compare_at_price.as_deref());
    if compare_at > price {
        return Label::Offer;
    }

    if facts.bestseller {
        return Label::Hot;
    }

    Label::None
}

/// Parses a decimal price string to `f64`; absent or malformed values are 0.
fn parse_price(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, mo: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, 12, 0, 0).unwrap()
    }

    fn base_facts() -> VariantFacts {
        VariantFacts {
            variant_created_at: ts(2023, 1, 1),
            product_created_at: ts(2023, 1, 1),
            price: "20.00".to_owned(),
            compare_at_price: None,
            bestseller: false,
        }
    }

    #[test]
    fn recent_variant_of_older_product_is_new() {
        let now = ts(2024, 6, 1);
        let facts = VariantFacts {
            variant_created_at: now - Duration::days(10),
            product_created_at: now - Duration::days(400),
            ..base_facts()
        };
        assert_eq!(classify(now, &facts), Label::New);
    }

    #[test]
    fn original_variant_with_equal_timestamp_is_new_inside_window() {
        let now = ts(2024, 6, 1);
        let created = now - Duration::days(5);
        let facts = VariantFacts {
            variant_created_at: created,
            product_created_at: created,
            ..base_facts()
        };
        assert_eq!(classify(now, &facts), Label::New);
    }

    #[test]
    fn variant_exactly_45_days_old_is_not_new() {
        let now = ts(2024, 6, 1);
        let facts = VariantFacts {
            variant_created_at: now - Duration::days(45),
            product_created_at: now - Duration::days(400),
            ..base_facts()
        };
        assert_ne!(classify(now, &facts), Label::New);
    }

    #[test]
    fn variant_44_days_23_hours_old_is_new() {
        let now = ts(2024, 6, 1);
        let facts = VariantFacts {
            variant_created_at: now - (Duration::days(44) + Duration::hours(23)),
            product_created_at: now - Duration::days(400),
            ..base_facts()
        };
        assert_eq!(classify(now, &facts), Label::New);
    }

    #[test]
    fn variant_older_than_its_product_is_not_new() {
        // A stale variant timestamp predating the product is not treated
        // as new no matter how recent it is relative to now.
        let now = ts(2024, 6, 1);
        let facts = VariantFacts {
            variant_created_at: now - Duration::days(10),
            product_created_at: now - Duration::days(5),
            ..base_facts()
        };
        assert_ne!(classify(now, &facts), Label::New);
    }

    #[test]
    fn compare_at_above_price_is_offer() {
        let now = ts(2024, 6, 1);
        let facts = VariantFacts {
            compare_at_price: Some("25.00".to_owned()),
            ..base_facts()
        };
        assert_eq!(classify(now, &facts), Label::Offer);
    }

    #[test]
    fn compare_at_equal_to_price_is_not_offer() {
        let now = ts(2024, 6, 1);
        let facts = VariantFacts {
            compare_at_price: Some("20.00".to_owned()),
            ..base_facts()
        };
        assert_eq!(classify(now, &facts), Label::None);
    }

    #[test]
    fn compare_at_one_cent_above_price_is_offer() {
        let now = ts(2024, 6, 1);
        let facts = VariantFacts {
            compare_at_price: Some("20.01".to_owned()),
            ..base_facts()
        };
        assert_eq!(classify(now, &facts), Label::Offer);
    }

    #[test]
    fn missing_compare_at_price_never_yields_offer() {
        let now = ts(2024, 6, 1);
        let facts = VariantFacts {
            compare_at_price: None,
            bestseller: false,
            ..base_facts()
        };
        assert_eq!(classify(now, &facts), Label::None);
    }

    #[test]
    fn bestseller_is_hot_when_nothing_else_applies() {
        let now = ts(2024, 6, 1);
        let facts = VariantFacts {
            bestseller: true,
            ..base_facts()
        };
        assert_eq!(classify(now, &facts), Label::Hot);
    }

    #[test]
    fn new_beats_offer_and_hot() {
        // All three conditions hold; priority picks New.
        let now = ts(2024, 6, 1);
        let facts = VariantFacts {
            variant_created_at: now - Duration::days(10),
            product_created_at: now - Duration::days(20),
            price: "20.00".to_owned(),
            compare_at_price: Some("25.00".to_owned()),
            bestseller: true,
        };
        assert_eq!(classify(now, &facts), Label::New);
    }

    #[test]
    fn offer_beats_hot() {
        let now = ts(2024, 6, 1);
        let facts = VariantFacts {
            compare_at_price: Some("25.00".to_owned()),
            bestseller: true,
            ..base_facts()
        };
        assert_eq!(classify(now, &facts), Label::Offer);
    }

    #[test]
    fn unparseable_compare_at_price_is_treated_as_zero() {
        let now = ts(2024, 6, 1);
        let facts = VariantFacts {
            compare_at_price: Some("not-a-price".to_owned()),
            ..base_facts()
        };
        assert_eq!(classify(now, &facts), Label::None);
    }
}
