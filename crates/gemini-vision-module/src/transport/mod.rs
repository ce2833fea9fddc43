//! Transports carrying the module protocol.

pub mod framing;
pub mod stdio;

pub use stdio::StdioTransport;
