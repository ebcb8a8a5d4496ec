use fincoai_core::RawTransaction;

/// One decoded unit of the generation stream
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Progress {
        message: Option<String>,
        completed: Option<u64>,
        total: Option<u64>,
    },
    MerchantBatch {
        merchants: Vec<String>,
    },
    DataChunk {
        transactions: Vec<RawTransaction>,
    },
    Complete {
        transactions: Vec<RawTransaction>,
    },
    Error {
        message: String,
    },
}

impl StreamEvent {
    /// `Complete` and `Error` end the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Complete { .. } | StreamEvent::Error { .. })
    }
}
