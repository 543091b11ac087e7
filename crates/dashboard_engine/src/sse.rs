use bytes::BytesMut;

/// Splits a chunked byte stream into text lines.
///
/// An incomplete trailing line is held back until the chunk that completes
/// it arrives, and each line is decoded as a whole, so neither a line nor a
/// multi-byte character split across chunks is damaged.
#[derive(Debug, Default)]
pub struct SseLineDecoder {
    pending: BytesMut,
    scanned: usize,
}

impl SseLineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk; returns every line it completed, without terminators.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);
        let mut lines = Vec::new();
        while let Some(offset) = self.pending[self.scanned..].iter().position(|b| *b == b'\n') {
            let end = self.scanned + offset;
            let line = self.pending.split_to(end + 1);
            lines.push(decode_line(&line[..end]));
            self.scanned = 0;
        }
        self.scanned = self.pending.len();
        lines
    }

    /// Flush the unterminated remainder once the stream has ended.
    pub fn finish(&mut self) -> Option<String> {
        self.scanned = 0;
        if self.pending.is_empty() {
            return None;
        }
        let rest = self.pending.split();
        Some(decode_line(&rest))
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
