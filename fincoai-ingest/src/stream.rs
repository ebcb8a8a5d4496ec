//! Async adapter from a chunk source to a lazy `StreamEvent` sequence.

use std::collections::VecDeque;
use std::fmt::Display;

use fincoai_core::RawTransaction;
use futures_util::stream::{self, Stream, StreamExt};

use crate::error::{IngestError, Result};
use crate::events::StreamEvent;
use crate::frame::FrameDecoder;

struct IngestState<S> {
    /// `None` once the source is exhausted, failed, or a terminal frame arrived.
    /// Dropping it here releases the underlying response.
    source: Option<S>,
    decoder: FrameDecoder,
    pending: VecDeque<StreamEvent>,
}

impl<S> IngestState<S> {
    fn close(&mut self) {
        self.source = None;
        self.decoder.finish();
        let stats = self.decoder.stats();
        tracing::debug!(
            accepted = stats.accepted_frames,
            rejected = stats.rejected_frames,
            "ingestion finished"
        );
    }
}

/// Decode `source` into events, pulling chunks only as events are requested.
///
/// A source error becomes one `Error` event and ends the sequence. Dropping the
/// returned stream drops the source with it.
pub fn ingest<S, B, E>(source: S) -> impl Stream<Item = StreamEvent>
where
    S: Stream<Item = std::result::Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Display,
{
    let state = IngestState {
        source: Some(source),
        decoder: FrameDecoder::new(),
        pending: VecDeque::new(),
    };

    stream::unfold(state, |mut st| async move {
        loop {
            if let Some(ev) = st.pending.pop_front() {
                return Some((ev, st));
            }
            let src = st.source.as_mut()?;
            match src.next().await {
                Some(Ok(chunk)) => {
                    st.pending.extend(st.decoder.push(chunk.as_ref()));
                    if st.decoder.is_finished() {
                        tracing::debug!("terminal frame received; closing source");
                        st.close();
                    }
                }
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "transport failure during ingestion");
                    st.close();
                    return Some((
                        StreamEvent::Error {
                            message: format!("transport error: {e}"),
                        },
                        st,
                    ));
                }
                None => {
                    tracing::debug!("source ended without terminal frame");
                    st.close();
                }
            }
        }
    })
}

/// Result of driving a generation stream to its end
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generation {
    pub transactions: Vec<RawTransaction>,
    pub merchants: Vec<String>,
    /// False when the source ended without a `Complete` frame
    pub completed: bool,
}

/// Drain `events`, accumulating transactions in arrival order.
///
/// `Progress` events go to `on_progress`. An `Error` event fails the whole
/// operation with `IngestError::Remote`.
pub async fn collect_generation<S>(
    events: S,
    mut on_progress: impl FnMut(&StreamEvent),
) -> Result<Generation>
where
    S: Stream<Item = StreamEvent>,
{
    let mut events = std::pin::pin!(events);
    let mut out = Generation::default();

    while let Some(ev) = events.next().await {
        match ev {
            StreamEvent::Progress { .. } => on_progress(&ev),
            StreamEvent::MerchantBatch { merchants } => out.merchants.extend(merchants),
            StreamEvent::DataChunk { transactions } => out.transactions.extend(transactions),
            StreamEvent::Complete { transactions } => {
                // the final list is the full set when the service sends one
                if !transactions.is_empty() {
                    out.transactions = transactions;
                }
                out.completed = true;
                break;
            }
            StreamEvent::Error { message } => return Err(IngestError::Remote(message)),
        }
    }

    Ok(out)
}
