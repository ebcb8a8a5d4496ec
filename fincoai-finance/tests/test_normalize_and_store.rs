use fincoai_core::{RawTransaction, StandardCategory};
use fincoai_finance::{RecordStore, normalize};

fn generated_batch() -> Vec<RawTransaction> {
    let json = r#"[
        {"timestamp": "2024-03-01T09:15:00Z", "amount": 18.4,
         "merchant_details": {"name": "Café Olé", "category": "Restaurant"}},
        {"timestamp": "2024-03-02T18:00:00Z", "amount": "62.10",
         "merchant_details": {"name": "Shell", "category": "Gasoline Dealer"}},
        {"timestamp": "2024-03-03", "amount": 140,
         "merchant_details": {"name": "Capitol Hill Inn", "category": "Inn And Motel", "mapped_category": "housing"}},
        {"timestamp": "2024-03-04", "amount": 35,
         "merchant_details": {"name": "DC Personal_care Service", "category": "personal_care", "mapped_category": "personal_care"}},
        {"timestamp": "2024-03-05", "amount": 12.5,
         "merchant_details": {"name": "Uptown Cinema", "category": "Unlisted"}},
        {"timestamp": "2024-03-06", "amount": 9.0}
    ]"#;
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_generated_batch_end_to_end() {
    let out = normalize(&generated_batch());

    let cats: Vec<_> = out.transactions.iter().map(|t| t.category).collect();
    assert_eq!(
        cats,
        vec![
            StandardCategory::Food,
            StandardCategory::Transportation,
            StandardCategory::Lodging,
            StandardCategory::PersonalCare,
            StandardCategory::Entertainment,
            StandardCategory::Other,
        ]
    );
    assert_eq!(out.totals.get(StandardCategory::Transportation), Some(62.10));
    assert_eq!(out.totals.get(StandardCategory::Other), Some(9.0));
    assert!(out.warning.is_none(), "1 of 6 is under the threshold");
}

#[test]
fn test_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("records"));

    assert!(store.load_transactions().unwrap().is_empty());
    assert!(store.load_totals().unwrap().is_empty());

    let out = normalize(&generated_batch());
    store.save(&out).unwrap();

    assert_eq!(store.load_transactions().unwrap(), out.transactions);
    assert_eq!(store.load_totals().unwrap(), out.totals);

    let raw = std::fs::read_to_string(store.totals_path()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(v["Personal Care"], 35.0);

    let raw = std::fs::read_to_string(store.transactions_path()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(v[0]["originalCategory"], "Restaurant");
    assert_eq!(v[0]["date"], "03/01/2024");
}

#[test]
fn test_store_rejects_corrupt_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path());
    std::fs::write(store.totals_path(), "not json").unwrap();
    let err = store.load_totals().unwrap_err();
    assert!(err.to_string().contains("category_totals.json"));
}
