//! Property tests for the bag-tree protocol.
//!
//! - lexicographic varints preserve (or, reversed, invert) numeric order
//! - a tree written with `Writer` reads back unchanged with `Reader`
//! - a reader that understands only some bags loses nothing on rewrite

use std::collections::BTreeMap;

use baggage_atoms::Atom;
use baggage_protocol::{
    drop_bag, header_index, header_key, is_keyed_header, lexvarint, OverflowMarkerBehavior,
    Reader, Writer,
};
use proptest::prelude::*;

/// Bag name; the derived order matches header order, indices before keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Name {
    Index(u64),
    Key(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
struct Node {
    data: Vec<Vec<u8>>,
    children: BTreeMap<Name, Node>,
}

fn arb_name(max_index: u64) -> impl Strategy<Value = Name> {
    prop_oneof![
        (0..max_index).prop_map(Name::Index),
        prop::collection::vec(any::<u8>(), 0..3).prop_map(Name::Key),
    ]
}

fn arb_payloads() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..4), 1..3)
}

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = arb_payloads().prop_map(|data| Node {
        data,
        children: BTreeMap::new(),
    });
    leaf.prop_recursive(3, 24, 4, |inner| {
        (arb_payloads(), prop::collection::btree_map(arb_name(6), inner, 0..4))
            .prop_map(|(data, children)| Node { data, children })
    })
}

fn arb_tree() -> impl Strategy<Value = BTreeMap<Name, Node>> {
    prop::collection::btree_map(arb_name(8), arb_node(), 0..5)
}

fn enter(w: &mut Writer, name: &Name) {
    match name {
        Name::Index(index) => w.enter(*index),
        Name::Key(key) => w.enter_key(key),
    }
}

fn write_node(w: &mut Writer, node: &Node) {
    for payload in &node.data {
        w.write(payload);
    }
    for (name, child) in &node.children {
        enter(w, name);
        write_node(w, child);
        w.exit();
    }
}

fn write_tree(tree: &BTreeMap<Name, Node>) -> Vec<Atom> {
    let mut w = Writer::new();
    for (name, node) in tree {
        enter(&mut w, name);
        write_node(&mut w, node);
        w.exit();
    }
    w.finish().expect("tree written in order")
}

fn read_children(r: &mut Reader<'_>) -> BTreeMap<Name, Node> {
    let mut children = BTreeMap::new();
    while let Some(header) = r.enter() {
        let name = if is_keyed_header(header) {
            Name::Key(header_key(header).expect("keyed header").to_vec())
        } else {
            Name::Index(header_index(header).expect("indexed header"))
        };
        let node = read_node(r);
        r.exit();
        children.insert(name, node);
    }
    children
}

fn read_node(r: &mut Reader<'_>) -> Node {
    let mut data = Vec::new();
    while let Some(payload) = r.next_data() {
        data.push(payload.to_vec());
    }
    Node {
        data,
        children: read_children(r),
    }
}

proptest! {
    #[test]
    fn unsigned_lex_varint_preserves_order(a in any::<u64>(), b in any::<u64>()) {
        let (ea, eb) = (lexvarint::encode_unsigned(a), lexvarint::encode_unsigned(b));
        prop_assert_eq!(a.cmp(&b), ea.cmp(&eb));
        prop_assert_eq!(lexvarint::decode_unsigned(&ea), Some((a, ea.len())));

        let (ra, rb) = (
            lexvarint::encode_unsigned_reverse(a),
            lexvarint::encode_unsigned_reverse(b),
        );
        prop_assert_eq!(b.cmp(&a), ra.cmp(&rb));
        prop_assert_eq!(lexvarint::decode_unsigned_reverse(&ra), Some((a, ra.len())));
    }

    #[test]
    fn signed_lex_varint_preserves_order(a in any::<i64>(), b in any::<i64>()) {
        let (ea, eb) = (lexvarint::encode_signed(a), lexvarint::encode_signed(b));
        prop_assert_eq!(a.cmp(&b), ea.cmp(&eb));
        prop_assert_eq!(lexvarint::decode_signed(&ea), Some((a, ea.len())));

        let (ra, rb) = (
            lexvarint::encode_signed_reverse(a),
            lexvarint::encode_signed_reverse(b),
        );
        prop_assert_eq!(b.cmp(&a), ra.cmp(&rb));
        prop_assert_eq!(lexvarint::decode_signed_reverse(&ra), Some((a, ra.len())));
    }

    #[test]
    fn writer_reader_round_trip(tree in arb_tree()) {
        let atoms = write_tree(&tree);
        let mut r = Reader::read(&atoms);
        let read = read_children(&mut r);
        r.close();
        prop_assert!(r.error().is_none());
        prop_assert!(r.skipped().is_empty());
        prop_assert_eq!(read, tree);
    }

    #[test]
    fn unread_baggage_is_skipped_whole(tree in arb_tree()) {
        let atoms = write_tree(&tree);
        let mut r = Reader::read(&atoms);
        r.close();
        prop_assert_eq!(r.skipped(), atoms.as_slice());
    }

    #[test]
    fn partial_reader_preserves_the_rest(tree in arb_tree()) {
        let atoms = write_tree(&tree);

        // Understand only the data of even-numbered bags and of keyed bags
        // whose key has an even length.
        let understands = |name: &Name| match name {
            Name::Index(index) => index % 2 == 0,
            Name::Key(key) => key.len() % 2 == 0,
        };
        let mut r = Reader::read(&atoms);
        let mut understood = BTreeMap::new();
        for name in tree.keys().filter(|name| understands(name)) {
            let entered = match name {
                Name::Index(index) => r.enter_indexed(*index),
                Name::Key(key) => r.enter_keyed(key),
            };
            prop_assert!(entered);
            let mut data = Vec::new();
            while let Some(payload) = r.next_data() {
                data.push(payload.to_vec());
            }
            r.exit();
            understood.insert(name.clone(), data);
        }
        r.close();
        prop_assert!(r.error().is_none());

        let mut w = Writer::new();
        w.add_unprocessed_atoms(r.skipped());
        for (name, data) in &understood {
            enter(&mut w, name);
            for payload in data {
                w.write(payload);
            }
            w.exit();
        }
        prop_assert_eq!(w.finish().unwrap(), atoms);
    }

    #[test]
    fn drop_removes_only_the_target(tree in arb_tree(), target in 0u64..8) {
        let atoms = write_tree(&tree);
        let dropped = drop_bag(&atoms, target, OverflowMarkerBehavior::DropMarker);

        let mut expected = tree.clone();
        expected.remove(&Name::Index(target));
        let mut r = Reader::read(&dropped);
        prop_assert_eq!(read_children(&mut r), expected);
        prop_assert!(r.error().is_none());
    }
}
