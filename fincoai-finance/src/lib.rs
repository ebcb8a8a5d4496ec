//! fincoai-finance: category rules, batch normalization, and persisted records

pub mod category_rules;
pub mod normalizer;
pub mod store;

pub use category_rules::{classify, lookup_category, match_keywords};
pub use normalizer::{DataQualityWarning, Normalized, OTHER_WARNING_THRESHOLD, normalize};
pub use store::RecordStore;
