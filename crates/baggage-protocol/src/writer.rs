//! Building a flat atom sequence from nested bags.

use std::cmp::Ordering;

use baggage_atoms::{merge, Atom};
use tracing::debug;

use crate::encoding::{data_atom, indexed_header, keyed_header, MAX_LEVEL};
use crate::error::{ProtocolError, Result};

/// Writes bags depth-first, enforcing ascending sibling order.
///
/// Ordering violations latch the first error but never stop atoms from being
/// appended, so the malformed output can still be inspected.
#[derive(Debug, Default)]
pub struct Writer {
    /// Headers placed before the output when writing inside a single bag.
    base: Vec<Atom>,
    atoms: Vec<Atom>,
    unprocessed: Vec<Atom>,
    /// Header of the last sibling closed at the current level.
    prev: Atom,
    path: Vec<Atom>,
    depth: usize,
    /// Enters refused for exceeding the maximum level, still awaiting exit.
    rejected: usize,
    overflowed: bool,
    error: Option<ProtocolError>,
}

impl Writer {
    /// Writer for a whole baggage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer for the contents of top-level bag `bag_index`.
    ///
    /// The bag header is only emitted if something is written inside it.
    pub fn for_bag(bag_index: u64) -> Self {
        Writer {
            base: vec![indexed_header(0, bag_index)],
            depth: 1,
            ..Self::default()
        }
    }

    /// Open child bag `index` of the current bag.
    pub fn enter(&mut self, index: u64) {
        if self.check_depth() {
            self.push_header(indexed_header(self.depth, index));
        }
    }

    /// Open the child bag named `key` of the current bag.
    pub fn enter_key(&mut self, key: &[u8]) {
        if self.check_depth() {
            self.push_header(keyed_header(self.depth, key));
        }
    }

    fn check_depth(&mut self) -> bool {
        if self.rejected > 0 || self.depth > MAX_LEVEL {
            self.rejected += 1;
            self.fail(ProtocolError::LevelOverflow { level: self.depth });
            return false;
        }
        true
    }

    fn push_header(&mut self, header: Atom) {
        match self.prev.cmp(&header) {
            Ordering::Equal => self.fail(ProtocolError::DuplicateBag),
            Ordering::Greater => self.fail(ProtocolError::OutOfOrderBag),
            Ordering::Less => {}
        }
        self.atoms.push(header.clone());
        self.path.push(header);
        self.prev = Atom::default();
        self.depth += 1;
    }

    /// Close the current bag. A bag with nothing written inside is elided.
    pub fn exit(&mut self) {
        if self.rejected > 0 {
            self.rejected -= 1;
            return;
        }
        let Some(header) = self.path.pop() else {
            self.fail(ProtocolError::UnbalancedExit);
            return;
        };
        self.depth -= 1;
        if self.atoms.last() == Some(&header) {
            self.atoms.pop();
        }
        self.prev = header;
    }

    /// Append a data atom to the current bag.
    pub fn write(&mut self, payload: impl AsRef<[u8]>) {
        self.atoms.push(data_atom(payload.as_ref()));
    }

    /// Append data atoms in canonical order, for payloads whose order
    /// carries no meaning.
    pub fn write_sorted<I>(&mut self, payloads: I)
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut sorted: Vec<Atom> = payloads
            .into_iter()
            .map(|p| data_atom(p.as_ref()))
            .collect();
        sorted.sort();
        self.atoms.extend(sorted);
    }

    /// Record that data was dropped. Only the first call appends a marker.
    pub fn mark_overflow(&mut self) {
        if !self.overflowed {
            self.overflowed = true;
            self.atoms.push(Atom::trim_marker());
        }
    }

    /// Merge atoms a reader skipped back into the output.
    pub fn add_unprocessed_atoms(&mut self, atoms: &[Atom]) {
        self.unprocessed = merge(&self.unprocessed, atoms);
    }

    /// Nesting depth of the bag currently being written.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn error(&self) -> Option<&ProtocolError> {
        self.error.as_ref()
    }

    /// The atoms written so far, merged with any unprocessed atoms.
    ///
    /// Open bags that are still empty contribute their headers; call
    /// [`Writer::exit`] first to elide them.
    pub fn atoms(&self) -> Vec<Atom> {
        let body = merge(&self.atoms, &self.unprocessed);
        if body.is_empty() {
            return body;
        }
        let mut out = Vec::with_capacity(self.base.len() + body.len());
        out.extend_from_slice(&self.base);
        out.extend(body);
        out
    }

    /// Close any open bags and return the output, or the first error.
    pub fn finish(mut self) -> Result<Vec<Atom>> {
        self.rejected = 0;
        while !self.path.is_empty() {
            self.exit();
        }
        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(self.atoms()),
        }
    }

    fn fail(&mut self, error: ProtocolError) {
        if self.error.is_none() {
            debug!(%error, depth = self.depth, "baggage writer failed");
            self.error = Some(error);
        }
    }
}
