//! Classify a batch of raw transactions and fold them into category totals.

use fincoai_core::{CategoryTotals, NormalizedTransaction, RawTransaction, StandardCategory};

use crate::category_rules::classify;

/// Share of `Other` above which a batch is flagged (strictly greater).
pub const OTHER_WARNING_THRESHOLD: f64 = 0.20;

/// Too many records fell through every rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataQualityWarning {
    pub other_count: usize,
    pub total_count: usize,
}

impl DataQualityWarning {
    pub fn other_ratio(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.other_count as f64 / self.total_count as f64
        }
    }
}

/// Output of `normalize`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub transactions: Vec<NormalizedTransaction>,
    pub totals: CategoryTotals,
    pub warning: Option<DataQualityWarning>,
}

impl Normalized {
    pub fn into_parts(self) -> (Vec<NormalizedTransaction>, CategoryTotals) {
        (self.transactions, self.totals)
    }
}

/// Normalize every record, preserving order. Never fails: bad amounts count
/// as 0 and unclassifiable records land in `Other`.
pub fn normalize(records: &[RawTransaction]) -> Normalized {
    let mut totals = CategoryTotals::new();
    let mut other_count = 0;

    let transactions: Vec<NormalizedTransaction> = records
        .iter()
        .map(|raw| {
            let category = classify(raw);
            if category == StandardCategory::Other {
                other_count += 1;
            }
            let normalized = NormalizedTransaction::from_raw(raw, category);
            totals.add(category, normalized.amount);
            normalized
        })
        .collect();

    let total_count = transactions.len();
    // other / total > 0.20, kept in integers so the boundary is exact
    let warning = (other_count * 5 > total_count).then_some(DataQualityWarning {
        other_count,
        total_count,
    });

    if let Some(w) = &warning {
        tracing::warn!(
            other = w.other_count,
            total = w.total_count,
            ratio = w.other_ratio(),
            "more than {:.0}% of transactions classified as Other",
            OTHER_WARNING_THRESHOLD * 100.0
        );
    }

    Normalized {
        transactions,
        totals,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fincoai_core::RawAmount;

    fn txn(amount: f64, category: &str) -> RawTransaction {
        RawTransaction::new("2024-03-01", amount, "Merchant", category)
    }

    fn batch(other: usize, total: usize) -> Vec<RawTransaction> {
        (0..total)
            .map(|i| {
                if i < other {
                    txn(1.0, "Widget Factory")
                } else {
                    txn(1.0, "Restaurant")
                }
            })
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let out = normalize(&[]);
        assert!(out.warning.is_none());
        let (txns, totals) = out.into_parts();
        assert!(txns.is_empty());
        assert!(totals.is_empty());
    }

    #[test]
    fn test_totals_per_category() {
        let out = normalize(&[txn(10.0, "Grocery Store"), txn(20.0, "Gasoline Dealer")]);
        assert_eq!(out.totals.len(), 2);
        assert_eq!(out.totals.get(StandardCategory::Food), Some(10.0));
        assert_eq!(out.totals.get(StandardCategory::Transportation), Some(20.0));
        assert!(out.warning.is_none());
    }

    #[test]
    fn test_order_and_fields_preserved() {
        let out = normalize(&[txn(3.0, "Hotel"), txn(4.0, "Bakery"), txn(5.0, "Health Spa")]);
        let cats: Vec<_> = out.transactions.iter().map(|t| t.category).collect();
        assert_eq!(
            cats,
            vec![
                StandardCategory::Lodging,
                StandardCategory::Food,
                StandardCategory::PersonalCare
            ]
        );
        let first = &out.transactions[0];
        assert_eq!(first.amount, 3.0);
        assert_eq!(first.date, "03/01/2024");
        assert_eq!(first.description, "Merchant");
        assert_eq!(first.original_category, "Hotel");
    }

    #[test]
    fn test_non_numeric_amount_is_zero() {
        let mut raw = txn(0.0, "Restaurant");
        raw.amount = Some(RawAmount::Text("not-a-number".into()));
        let out = normalize(&[raw]);
        assert_eq!(out.transactions.len(), 1);
        assert_eq!(out.transactions[0].amount, 0.0);
        assert_eq!(out.totals.get(StandardCategory::Food), Some(0.0));
    }

    #[test]
    fn test_malformed_record_defaults() {
        let out = normalize(&[RawTransaction::default()]);
        let t = &out.transactions[0];
        assert_eq!(t.category, StandardCategory::Other);
        assert_eq!(t.description, "Unknown");
        assert_eq!(t.original_category, "");
        assert_eq!(t.amount, 0.0);
    }

    #[test]
    fn test_warning_boundary() {
        assert!(normalize(&batch(2, 10)).warning.is_none(), "20% does not trigger");

        let out = normalize(&batch(3, 10));
        let w = out.warning.expect("30% triggers");
        assert_eq!(w.other_count, 3);
        assert_eq!(w.total_count, 10);
        assert!((w.other_ratio() - 0.3).abs() < 1e-9);
        // processing continues regardless
        assert_eq!(out.transactions.len(), 10);
        let others = out
            .transactions
            .iter()
            .filter(|t| t.category == StandardCategory::Other)
            .count();
        assert_eq!(others, 3);
    }

    #[test]
    fn test_single_other_record_triggers() {
        assert!(normalize(&batch(1, 1)).warning.is_some());
        assert!(normalize(&batch(1, 5)).warning.is_none());
        assert!(normalize(&batch(1, 4)).warning.is_some());
    }
}
