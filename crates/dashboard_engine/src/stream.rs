use std::fmt;

use bytes::Bytes;
use dashboard_core::{update, DashboardState, Msg, SseLine};
use dashboard_logging::{dashboard_error, dashboard_trace};
use futures_util::{Stream, StreamExt};

use crate::SseLineDecoder;

/// Read an operation's SSE stream to its end, applying every event to `state`.
///
/// A malformed `data:` line is reported in the output and skipped. A read
/// failure marks the operation as errored and ends the loop.
pub async fn consume_stream<S, E>(state: &DashboardState, mut body: S)
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: fmt::Display,
{
    let mut decoder = SseLineDecoder::new();
    while let Some(chunk) = body.next().await {
        match chunk {
            Ok(chunk) => {
                for line in decoder.push(&chunk) {
                    dispatch_line(state, &line);
                }
            }
            Err(err) => {
                dashboard_error!("Operation stream failed: {}", err);
                update(
                    state,
                    Msg::StreamFailed {
                        message: err.to_string(),
                    },
                );
                return;
            }
        }
    }
    if let Some(line) = decoder.finish() {
        dispatch_line(state, &line);
    }
}

fn dispatch_line(state: &DashboardState, line: &str) {
    match SseLine::classify(line) {
        SseLine::Event(event) => {
            dashboard_trace!("SSE event: {:?}", event);
            update(state, Msg::Stream(event));
        }
        SseLine::Malformed { line } => {
            dashboard_error!("Failed to parse SSE data: {}", line);
            update(state, Msg::StreamLineMalformed { line });
        }
        SseLine::Skip => {}
    }
}
