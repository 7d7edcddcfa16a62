//! `baggage drop`: remove a top-level bag.

use anyhow::Result;

use super::decode_arg;

pub fn run(input: &str, bag: u64) -> Result<()> {
    println!("{}", dropped(input, bag)?);
    Ok(())
}

pub fn dropped(input: &str, bag: u64) -> Result<String> {
    let mut ctx = decode_arg(input)?;
    ctx.drop_bag(bag);
    Ok(ctx.encode_base64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::encode::encoded;

    #[test]
    fn drop_one_of_two_bags() {
        let both = super::super::merge::merged(&[
            encoded(1, &["01".to_string()]).unwrap(),
            encoded(2, &["02".to_string()]).unwrap(),
        ])
        .unwrap();
        assert_eq!(dropped(&both, 1).unwrap(), encoded(2, &["02".to_string()]).unwrap());
        assert_eq!(dropped(&both, 3).unwrap(), both);
    }
}
