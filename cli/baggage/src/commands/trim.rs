//! `baggage trim`: bound the serialized size of a baggage.

use anyhow::Result;
use tracing::debug;

use super::decode_arg;

pub fn run(input: &str, max_bytes: usize) -> Result<()> {
    println!("{}", trimmed(input, max_bytes)?);
    Ok(())
}

pub fn trimmed(input: &str, max_bytes: usize) -> Result<String> {
    let mut ctx = decode_arg(input)?;
    let before = ctx.serialized_size();
    ctx.trim(max_bytes);
    debug!(before, after = ctx.serialized_size(), max_bytes, "trim");
    Ok(ctx.encode_base64())
}
