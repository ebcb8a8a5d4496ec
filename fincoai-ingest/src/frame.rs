//! Newline-delimited `data:` frame decoding.
//!
//! The generation service writes one JSON object per line, prefixed with
//! `data:`. Transport chunks do not line up with lines, so the decoder keeps
//! the trailing fragment of every push until the rest of it arrives.

use fincoai_core::RawTransaction;
use serde_json::{Map, Value};

use crate::events::StreamEvent;

const DATA_PREFIX: &str = "data:";
const STATUS_COMPLETE: &str = "complete";
const STATUS_ERROR: &str = "error";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderStats {
    /// `data:` frames that decoded into a payload object
    pub accepted_frames: usize,
    /// `data:` frames dropped because the payload was not a JSON object
    pub rejected_frames: usize,
}

/// Incremental decoder for one stream. Owns its buffer; not shared.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: Vec<u8>,
    finished: bool,
    stats: DecoderStats,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a terminal frame was decoded or `finish` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Feed the next chunk and return the events of every line it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        if self.finished {
            return events;
        }
        self.buf.extend_from_slice(chunk);

        let mut start = 0;
        while let Some(offset) = self.buf[start..].iter().position(|b| *b == b'\n') {
            let end = start + offset;
            let line = String::from_utf8_lossy(&self.buf[start..end]).into_owned();
            start = end + 1;

            self.decode_line(&line, &mut events);
            if self.finished {
                self.buf.clear();
                return events;
            }
        }
        self.buf.drain(..start);
        events
    }

    /// End of input. A trailing line without a newline is discarded.
    pub fn finish(&mut self) {
        if !self.buf.is_empty() {
            tracing::debug!(bytes = self.buf.len(), "discarding partial frame at end of stream");
            self.buf.clear();
        }
        self.finished = true;
    }

    fn decode_line(&mut self, line: &str, events: &mut Vec<StreamEvent>) {
        let Some(rest) = line.trim().strip_prefix(DATA_PREFIX) else {
            return;
        };
        let payload = rest.trim();
        if payload.is_empty() {
            return;
        }

        let obj = match serde_json::from_str::<Value>(payload) {
            Ok(Value::Object(obj)) => obj,
            Ok(other) => {
                self.stats.rejected_frames += 1;
                tracing::warn!(kind = json_kind(&other), "dropping frame: payload is not an object");
                return;
            }
            Err(e) => {
                self.stats.rejected_frames += 1;
                tracing::warn!(error = %e, "dropping malformed frame");
                return;
            }
        };

        self.stats.accepted_frames += 1;
        let before = events.len();
        map_payload(&obj, events);
        if events[before..].iter().any(StreamEvent::is_terminal) {
            self.finished = true;
        }
    }
}

/// Translate one payload object into events, in field priority order.
fn map_payload(obj: &Map<String, Value>, events: &mut Vec<StreamEvent>) {
    let status = obj.get("status").and_then(Value::as_str);
    let message = obj.get("message").and_then(Value::as_str).map(str::to_string);

    let total = obj.get("total").and_then(as_count);
    let completed = obj.get("progress").and_then(as_count);
    if message.is_some() || total.is_some() || completed.is_some() {
        events.push(StreamEvent::Progress {
            message: message.clone(),
            completed,
            total,
        });
    }

    if let Some(merchants) = obj.get("merchants") {
        let merchants = match merchants {
            Value::Array(items) => items
                .iter()
                .filter_map(|m| m.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };
        events.push(StreamEvent::MerchantBatch { merchants });
    }

    let transactions = obj.get("transactions");
    if let Some(txns) = transactions {
        if status != Some(STATUS_COMPLETE) {
            events.push(StreamEvent::DataChunk {
                transactions: parse_transactions(txns),
            });
        }
    }

    match status {
        Some(STATUS_COMPLETE) => events.push(StreamEvent::Complete {
            transactions: transactions.map(parse_transactions).unwrap_or_default(),
        }),
        Some(STATUS_ERROR) => events.push(StreamEvent::Error {
            message: message.unwrap_or_else(|| "generation failed".to_string()),
        }),
        _ => {}
    }
}

/// Non-object entries are dropped; the rest of the batch survives. Fields of
/// the wrong type inside an object default instead of rejecting the entry.
pub(crate) fn parse_transactions(v: &Value) -> Vec<RawTransaction> {
    let Value::Array(items) = v else {
        tracing::warn!(kind = json_kind(v), "ignoring non-array transactions field");
        return Vec::new();
    };
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<RawTransaction>(item.clone()) {
            Ok(t) => Some(t),
            Err(e) => {
                tracing::warn!(index = i, error = %e, "dropping malformed transaction entry");
                None
            }
        })
        .collect()
}

/// Non-negative count from a number or numeric string; fractions round to nearest.
fn as_count(v: &Value) -> Option<u64> {
    if let Some(n) = v.as_u64() {
        return Some(n);
    }
    let f = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (f.is_finite() && f >= 0.0).then(|| f.round() as u64)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
