//! CLI command implementations.

pub mod drop;
pub mod encode;
pub mod inspect;
pub mod merge;
pub mod trim;

use anyhow::{bail, Context, Result};
use baggage_context::BaggageContext;

/// Decode a base64 baggage argument.
pub fn decode_arg(text: &str) -> Result<BaggageContext> {
    BaggageContext::decode_base64(text).with_context(|| format!("decoding baggage {text:?}"))
}

pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

pub fn hex_decode(text: &str) -> Result<Vec<u8>> {
    if text.len() % 2 != 0 {
        bail!("odd number of hex digits in {text:?}");
    }
    (0..text.len())
        .step_by(2)
        .map(|i| {
            text.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .with_context(|| format!("invalid hex digits in {text:?}"))
        })
        .collect()
}
