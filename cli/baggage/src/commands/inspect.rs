//! `baggage inspect`: print the bag tree of a baggage.

use std::fmt::Write as _;

use anyhow::Result;
use baggage_protocol::{header_index, header_key, header_level, is_keyed_header, Reader};
use serde::Serialize;
use tracing::debug;

use super::{decode_arg, hex_encode};
use crate::config::BaggageConfig;

#[derive(Debug, Serialize)]
pub struct BaggageView {
    pub size: usize,
    pub atoms: usize,
    pub overflowed: bool,
    /// Data atoms outside any bag.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<String>,
    pub bags: Vec<BagView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BagView {
    pub level: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub data: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bags: Vec<BagView>,
}

pub fn run(config: &BaggageConfig, input: &str, json: bool) -> Result<()> {
    let view = inspect(config, input)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render(&view));
    }
    Ok(())
}

pub fn inspect(config: &BaggageConfig, input: &str) -> Result<BaggageView> {
    let ctx = decode_arg(input)?;
    let atoms = ctx.atoms();
    let mut reader = Reader::read(atoms);

    let data = read_data(&mut reader);
    let bags = read_bags(&mut reader, config);
    reader.close();

    let error = reader.error().map(ToString::to_string);
    if let Some(error) = &error {
        debug!(%error, "baggage is not a well-formed bag tree");
    }
    Ok(BaggageView {
        size: ctx.serialized_size(),
        atoms: atoms.len(),
        overflowed: reader.overflowed(),
        data,
        bags,
        error,
    })
}

fn read_data(reader: &mut Reader<'_>) -> Vec<String> {
    let mut data = Vec::new();
    while let Some(payload) = reader.next_data() {
        data.push(hex_encode(payload));
    }
    data
}

fn read_bags(reader: &mut Reader<'_>, config: &BaggageConfig) -> Vec<BagView> {
    let mut bags = Vec::new();
    while let Some(header) = reader.enter() {
        let level = header_level(header).unwrap_or_default();
        let (index, key) = if is_keyed_header(header) {
            let key = header_key(header).unwrap_or_default();
            let key = match std::str::from_utf8(key) {
                Ok(text) => text.to_string(),
                Err(_) => hex_encode(key),
            };
            (None, Some(key))
        } else {
            (header_index(header).ok(), None)
        };
        let name = match (level, index) {
            (0, Some(index)) => config.bag_name(index).map(str::to_string),
            _ => None,
        };

        let data = read_data(reader);
        let children = read_bags(reader, config);
        reader.exit();
        bags.push(BagView {
            level,
            index,
            key,
            name,
            data,
            bags: children,
        });
    }
    bags
}

/// Indented text form of `view`.
pub fn render(view: &BaggageView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "baggage: {} bytes, {} atoms{}",
        view.size,
        view.atoms,
        if view.overflowed { ", trimmed" } else { "" }
    );
    for payload in &view.data {
        let _ = writeln!(out, "  data {payload}");
    }
    for bag in &view.bags {
        render_bag(&mut out, bag);
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "error: {error}");
    }
    out
}

fn render_bag(out: &mut String, bag: &BagView) {
    let indent = "  ".repeat(bag.level + 1);
    let label = match (&bag.index, &bag.key) {
        (Some(index), _) => format!("bag {index}"),
        (None, Some(key)) => format!("bag {key:?}"),
        (None, None) => "bag ?".to_string(),
    };
    match &bag.name {
        Some(name) => {
            let _ = writeln!(out, "{indent}{label} ({name})");
        }
        None => {
            let _ = writeln!(out, "{indent}{label}");
        }
    }
    for payload in &bag.data {
        let _ = writeln!(out, "{indent}  data {payload}");
    }
    for child in &bag.bags {
        render_bag(out, child);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::encode::encoded;

    /// Bag 5 holding bag 0 and bag 1, each with one fixed 64-bit id.
    const XTRACE: &str = "AvgFAvAACQCDmtStQTVGNwLwAQkAuXy7DmfwWJk=";

    fn config() -> BaggageConfig {
        BaggageConfig::from_str("[bags]\n5 = \"xtrace\"\n").unwrap()
    }

    #[test]
    fn inspect_nested_bags() {
        let view = inspect(&config(), XTRACE).unwrap();
        assert_eq!(view.size, 29);
        assert_eq!(view.atoms, 5);
        assert!(!view.overflowed);
        assert!(view.error.is_none());

        assert_eq!(view.bags.len(), 1);
        let xtrace = &view.bags[0];
        assert_eq!(xtrace.index, Some(5));
        assert_eq!(xtrace.name.as_deref(), Some("xtrace"));
        assert!(xtrace.data.is_empty());
        assert_eq!(xtrace.bags.len(), 2);
        assert_eq!(xtrace.bags[0].level, 1);
        assert_eq!(xtrace.bags[0].index, Some(0));
        assert_eq!(xtrace.bags[0].data, vec!["839ad4ad41354637".to_string()]);
        assert_eq!(xtrace.bags[1].index, Some(1));
        assert_eq!(xtrace.bags[1].name, None);
    }

    #[test]
    fn render_tree() {
        let view = inspect(&config(), XTRACE).unwrap();
        assert_eq!(
            render(&view),
            "baggage: 29 bytes, 5 atoms\n\
             \x20 bag 5 (xtrace)\n\
             \x20   bag 0\n\
             \x20     data 839ad4ad41354637\n\
             \x20   bag 1\n\
             \x20     data b97cbb0e67f05899\n"
        );
    }

    #[test]
    fn inspect_trimmed_baggage() {
        let view = inspect(&BaggageConfig::default(), "AvgFAA==").unwrap();
        assert!(view.overflowed);
        assert_eq!(view.bags.len(), 1);
        assert!(render(&view).starts_with("baggage: 4 bytes, 2 atoms, trimmed\n"));
    }

    #[test]
    fn inspect_reports_structural_errors() {
        // A level-1 header with no enclosing bag.
        let view = inspect(&BaggageConfig::default(), "AvAAAgAB").unwrap();
        assert!(view.bags.is_empty());
        assert!(view.error.is_some());
        assert!(render(&view).contains("error: "));
    }

    #[test]
    fn json_view() {
        let view = inspect(&config(), &encoded(5, &["07".to_string()]).unwrap()).unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["bags"][0]["index"], 5);
        assert_eq!(json["bags"][0]["name"], "xtrace");
        assert_eq!(json["bags"][0]["data"][0], "07");
        assert!(json.get("error").is_none());
    }
}
