//! Cross-platform channel primitives for both native and WASM targets.

// For native targets, re-export smol's primitives
#[cfg(not(target_arch = "wasm32"))]
pub use smol::channel::{Receiver, Sender, unbounded};

// For WASM targets, use async-channel
#[cfg(target_arch = "wasm32")]
pub use async_channel::{Receiver, Sender, unbounded};
