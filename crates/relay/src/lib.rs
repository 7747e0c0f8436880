pub mod client;

pub use client::{RelayClient, RelayError};
