//! fincoai-core: transaction records and the standard budget taxonomy

pub mod category;
pub mod finance;

pub use category::{CategoryTotals, StandardCategory};
pub use finance::{MerchantDetails, NormalizedTransaction, RawAmount, RawTransaction, UNKNOWN_MERCHANT};
