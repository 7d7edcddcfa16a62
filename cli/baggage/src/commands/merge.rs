//! `baggage merge`: join several baggages.

use anyhow::Result;
use baggage_context::BaggageContext;

use super::decode_arg;

pub fn run(inputs: &[String]) -> Result<()> {
    println!("{}", merged(inputs)?);
    Ok(())
}

/// Base64 of the merge of all `inputs`, in order.
pub fn merged(inputs: &[String]) -> Result<String> {
    let mut contexts = inputs
        .iter()
        .map(|text| decode_arg(text))
        .collect::<Result<Vec<_>>>()?;
    Ok(BaggageContext::merge_all(contexts.iter_mut()).encode_base64())
}
