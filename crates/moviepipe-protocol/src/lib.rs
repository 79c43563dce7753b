//! IPC framing and request/response types for the moviepipe worker channel.
//!
//! This crate defines the wire protocol between the gateway bridge and the
//! worker process over a local Unix socket.
//!
//! # Protocol Overview
//!
//! The two directions of the channel are framed differently, and the
//! asymmetry is load-bearing: the gateway bridge on the other side of the
//! socket depends on it, so both conventions are kept exactly as-is rather
//! than unified.
//!
//! - **Requests** (bridge → worker) are UTF-8 JSON objects terminated by
//!   `\n`. Decode with [`LineDecoder`].
//! - **Responses** (worker → bridge) are length-prefixed frames: the ASCII
//!   decimal byte length of the payload, `\n`, then exactly that many JSON
//!   bytes. Encode with [`encode_frame`], decode with [`FrameDecoder`].
//!
//! # Example
//!
//! ```rust
//! use moviepipe_protocol::{FrameDecoder, WorkerResponse, encode_frame};
//!
//! let payload = WorkerResponse::ok().to_payload().unwrap();
//! let frame = encode_frame(&payload);
//!
//! let mut decoder = FrameDecoder::new();
//! let decoded = decoder.feed(&frame).unwrap();
//! assert_eq!(decoded, vec![payload]);
//! ```

mod error;
mod framing;
mod types;

pub use error::{ProtocolError, ProtocolResult};
pub use framing::{FrameDecoder, LineDecoder, encode_frame};
pub use types::{MovieList, WorkerRequest, WorkerResponse};

/// Default number of movies returned when a request omits the amount.
pub const DEFAULT_AMOUNT: usize = 5;

/// Maximum size of a single frame payload or request line (1 MB).
pub const MAX_FRAME_SIZE: usize = 1024 * 1024;
