//! Deterministic category rules mapping merchant categories + names
//! onto the standard budget taxonomy.
//!
//! Exact label lookup first, then the generator's own hint, then keywords
//! in the merchant name. No scoring: the first rule that fires wins.

use fincoai_core::{RawTransaction, StandardCategory};

/// Raw category labels and the standard category they belong to.
///
/// Covers licence categories from the merchant registry, the generator's
/// lower-case spending buckets (sent as `mapped_category`), and the standard
/// names themselves. Matching is exact and case-sensitive.
const CATEGORY_TABLE: &[(&str, StandardCategory)] = &[
    ("Grocery Store", StandardCategory::Food),
    ("Restaurant", StandardCategory::Food),
    ("Caterers", StandardCategory::Food),
    ("Delicatessen", StandardCategory::Food),
    ("Bakery", StandardCategory::Food),
    ("Food Products", StandardCategory::Food),
    ("groceries", StandardCategory::Food),
    ("dining", StandardCategory::Food),
    ("Food", StandardCategory::Food),
    ("Gasoline Dealer", StandardCategory::Transportation),
    ("Auto Rental", StandardCategory::Transportation),
    ("Auto Wash", StandardCategory::Transportation),
    ("transportation", StandardCategory::Transportation),
    ("Transportation", StandardCategory::Transportation),
    ("Motion Picture Theatre", StandardCategory::Entertainment),
    ("Public Hall", StandardCategory::Entertainment),
    ("Theater (Live)", StandardCategory::Entertainment),
    ("Bowling Alley", StandardCategory::Entertainment),
    ("entertainment", StandardCategory::Entertainment),
    ("Entertainment", StandardCategory::Entertainment),
    ("Hotel", StandardCategory::Lodging),
    ("Inn And Motel", StandardCategory::Lodging),
    ("Vacation Rental", StandardCategory::Lodging),
    ("housing", StandardCategory::Lodging),
    ("Lodging", StandardCategory::Lodging),
    ("Beauty Shop", StandardCategory::PersonalCare),
    ("Health Spa", StandardCategory::PersonalCare),
    ("Massage Establishment", StandardCategory::PersonalCare),
    ("personal_care", StandardCategory::PersonalCare),
    ("Personal Care", StandardCategory::PersonalCare),
    ("other", StandardCategory::Other),
    ("Other", StandardCategory::Other),
];

/// Merchant-name keywords, checked in this order.
const KEYWORD_RULES: &[(StandardCategory, &[&str])] = &[
    (StandardCategory::Food, &["restaurant", "food", "cafe", "grocery"]),
    (StandardCategory::PersonalCare, &["beauty", "salon", "spa"]),
    (StandardCategory::Lodging, &["hotel", "motel", "inn"]),
    (StandardCategory::Entertainment, &["theater", "cinema", "entertainment"]),
    (StandardCategory::Transportation, &["auto", "car", "gas"]),
];

/// Exact lookup of a raw category label.
pub fn lookup_category(label: &str) -> Option<StandardCategory> {
    CATEGORY_TABLE
        .iter()
        .find(|(raw, _)| *raw == label)
        .map(|(_, category)| *category)
}

/// Keyword match against a merchant name (case-insensitive).
pub fn match_keywords(merchant_name: &str) -> Option<StandardCategory> {
    let name = merchant_name.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
        .map(|(category, _)| *category)
}

/// Deterministically classify a raw transaction.
/// Priority: source category > generator hint > name keywords > Other.
pub fn classify(txn: &RawTransaction) -> StandardCategory {
    if let Some(category) = lookup_category(txn.merchant_category()) {
        return category;
    }

    if let Some(category) = txn.mapped_category().and_then(lookup_category) {
        return category;
    }

    match_keywords(txn.merchant_name()).unwrap_or(StandardCategory::Other)
}
