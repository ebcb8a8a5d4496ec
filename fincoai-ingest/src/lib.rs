//! fincoai-ingest: generation stream decoding, the generator HTTP client, and statement uploads.

pub mod client;
pub mod error;
pub mod events;
pub mod frame;
pub mod stream;
pub mod upload;

pub use client::{CustomerProfile, DEFAULT_BASE_URL, GenerationClient};
pub use error::IngestError;
pub use events::StreamEvent;
pub use frame::{DecoderStats, FrameDecoder};
pub use stream::{Generation, collect_generation, ingest};
pub use upload::{StatementFormat, parse_statement_file, parse_statement_str};
