//! `baggage encode`: build a single-bag baggage from hex payloads.

use anyhow::{Context, Result};
use baggage_context::BaggageContext;
use baggage_protocol::Writer;

use super::hex_decode;

pub fn run(bag: u64, payloads: &[String]) -> Result<()> {
    println!("{}", encoded(bag, payloads)?);
    Ok(())
}

pub fn encoded(bag: u64, payloads: &[String]) -> Result<String> {
    let mut writer = Writer::for_bag(bag);
    for payload in payloads {
        writer.write(hex_decode(payload)?);
    }
    let atoms = writer.finish().context("writing bag")?;
    Ok(BaggageContext::from_atoms(atoms).encode_base64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_single_bag() {
        // [F8 05] [00 07]
        assert_eq!(encoded(5, &["07".to_string()]).unwrap(), "AvgFAgAH");
    }

    #[test]
    fn encode_without_payloads_is_empty() {
        assert_eq!(encoded(5, &[]).unwrap(), "");
    }

    #[test]
    fn encode_rejects_bad_hex() {
        assert!(encoded(5, &["0g".to_string()]).is_err());
    }
}
