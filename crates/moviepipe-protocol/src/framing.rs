//! Stream decoders for the two framing conventions on the worker channel.
//!
//! Requests are newline-delimited JSON text; responses are length-prefixed
//! binary frames:
//!
//! ```text
//! request:   {"action":"search","amount":3}\n
//! response:  57\n{"movies":[...57 bytes of JSON...]}
//! ```
//!
//! Both decoders accumulate raw bytes across reads, so a read boundary may
//! land anywhere: mid-length-line, mid-payload, or exactly between frames.

use crate::MAX_FRAME_SIZE;
use crate::error::{ProtocolError, ProtocolResult};

// A decimal length for a <=1 MB payload is 7 digits; anything much longer
// without a newline cannot be a valid length line.
const MAX_LENGTH_LINE: usize = 32;

/// Encodes a payload as a length-prefixed frame.
///
/// Returns the complete frame ready for transmission: the ASCII decimal
/// byte length of the payload, a newline, then the payload itself.
pub fn encode_frame(payload: &[u8]) -> Vec<u8> {
    let prefix = payload.len().to_string();
    let mut frame = Vec::with_capacity(prefix.len() + 1 + payload.len());
    frame.extend_from_slice(prefix.as_bytes());
    frame.push(b'\n');
    frame.extend_from_slice(payload);
    frame
}

/// Incremental decoder for length-prefixed response frames.
///
/// Each connection owns exactly one decoder; buffers are never shared.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: Vec<u8>,
}

impl FrameDecoder {
    /// Creates an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds newly received bytes and returns every payload that became
    /// complete, in arrival order. Trailing incomplete bytes stay buffered
    /// for the next call.
    pub fn feed(&mut self, bytes: &[u8]) -> ProtocolResult<Vec<Vec<u8>>> {
        self.buf.extend_from_slice(bytes);

        let mut payloads = Vec::new();
        while let Some(payload) = self.try_extract()? {
            payloads.push(payload);
        }
        Ok(payloads)
    }

    /// Number of bytes currently buffered.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    fn try_extract(&mut self) -> ProtocolResult<Option<Vec<u8>>> {
        let Some(newline) = self.buf.iter().position(|&b| b == b'\n') else {
            if self.buf.len() > MAX_LENGTH_LINE {
                return Err(ProtocolError::InvalidLength {
                    text: String::from_utf8_lossy(&self.buf[..MAX_LENGTH_LINE]).into_owned(),
                });
            }
            return Ok(None);
        };

        let text = String::from_utf8_lossy(&self.buf[..newline]);
        let len: usize =
            text.trim()
                .parse()
                .map_err(|_| ProtocolError::InvalidLength {
                    text: text.into_owned(),
                })?;

        if len > MAX_FRAME_SIZE {
            return Err(ProtocolError::FrameTooLarge {
                size: len,
                max: MAX_FRAME_SIZE,
            });
        }

        let frame_end = newline + 1 + len;
        if self.buf.len() < frame_end {
            // Payload not fully arrived yet.
            return Ok(None);
        }

        let payload = self.buf[newline + 1..frame_end].to_vec();
        self.buf.drain(..frame_end);
        Ok(Some(payload))
    }
}

/// Incremental decoder for newline-delimited request lines.
///
/// Complete lines are emitted in order; an incomplete trailing fragment is
/// held back until its terminator arrives. Empty and whitespace-only lines
/// are skipped, not emitted.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buf: Vec<u8>,
}

impl LineDecoder {
    /// Creates an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds newly received bytes and returns every complete, non-blank
    /// line, in arrival order.
    pub fn feed(&mut self, bytes: &[u8]) -> ProtocolResult<Vec<String>> {
        self.buf.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(newline) = self.buf.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buf.drain(..=newline).collect();
            let line = String::from_utf8(raw[..raw.len() - 1].to_vec())?;
            if !line.trim().is_empty() {
                lines.push(line);
            }
        }

        if self.buf.len() > MAX_FRAME_SIZE {
            return Err(ProtocolError::LineTooLong {
                max: MAX_FRAME_SIZE,
            });
        }

        Ok(lines)
    }

    /// Number of bytes currently buffered.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }
}
