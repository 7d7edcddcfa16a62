//! Cursor-style traversal of a flat atom sequence as a bag tree.
//!
//! A [`Reader`] walks the sequence depth-first: callers enter child bags by
//! position, index or key, read data atoms from the current bag, and exit.
//! Every child bag the reader passes over without being asked to enter it is
//! collected, together with the headers leading to it, into the skipped
//! atoms. Merging the skipped atoms back into whatever the caller writes out
//! preserves bags it did not understand, byte for byte.
//!
//! The first error latches: from then on the reader behaves as if the
//! sequence were exhausted, so a caller can run a whole read script and check
//! [`Reader::error`] once at the end.

use std::cmp::Ordering;

use baggage_atoms::{merge, Atom};
use tracing::debug;

use crate::encoding::{header_level, indexed_header, is_data, is_header, keyed_header, MAX_LEVEL};
use crate::error::ProtocolError;
use crate::utils::{bag_range, find};

/// Depth-first reader over a bag tree.
#[derive(Debug)]
pub struct Reader<'a> {
    atoms: &'a [Atom],
    /// Position of the next unconsumed atom.
    pos: usize,
    /// Headers of the bags entered so far.
    path: Vec<&'a Atom>,
    /// Number of open levels; child headers of the current bag are at this level.
    depth: usize,
    skipped: Vec<Atom>,
    overflowed: bool,
    error: Option<ProtocolError>,
}

impl<'a> Reader<'a> {
    /// Read a whole baggage, starting above the outermost level.
    pub fn read(atoms: &'a [Atom]) -> Self {
        Reader {
            atoms,
            pos: 0,
            path: Vec::new(),
            depth: 0,
            skipped: Vec::new(),
            overflowed: false,
            error: None,
        }
    }

    /// Read only the contents of top-level bag `bag_index`.
    ///
    /// The reader starts inside the bag. Skipped atoms are relative to the
    /// bag and do not include its header. The overflow flag starts set if a
    /// trim marker precedes the bag.
    pub fn open(atoms: &'a [Atom], bag_index: u64) -> Self {
        let target = indexed_header(0, bag_index);
        let overflowed = find(atoms, 0, &target).overflowed;
        let contents = match bag_range(atoms, bag_index) {
            Some((start, end)) => &atoms[start + 1..end],
            None => &[],
        };
        Reader {
            depth: 1,
            overflowed,
            ..Reader::read(contents)
        }
    }

    /// Enter the next child bag of the current bag, whatever it is.
    ///
    /// Skips the current bag's remaining data atoms. Returns `None` when the
    /// current bag has no more children.
    pub fn enter(&mut self) -> Option<&'a Atom> {
        let (header, level) = self.next_header()?;
        match level.cmp(&self.depth) {
            Ordering::Less => None,
            Ordering::Equal => {
                self.descend(header);
                Some(header)
            }
            Ordering::Greater => {
                self.fail(ProtocolError::LevelJump {
                    depth: self.depth,
                    level,
                });
                None
            }
        }
    }

    /// Enter the child bag with `index`, skipping preceding siblings.
    pub fn enter_indexed(&mut self, index: u64) -> bool {
        if self.depth > MAX_LEVEL {
            return false;
        }
        self.enter_target(&indexed_header(self.depth, index))
    }

    /// Enter the child bag named `key`, skipping preceding siblings.
    pub fn enter_keyed(&mut self, key: &[u8]) -> bool {
        if self.depth > MAX_LEVEL {
            return false;
        }
        self.enter_target(&keyed_header(self.depth, key))
    }

    fn enter_target(&mut self, target: &Atom) -> bool {
        loop {
            let Some((header, level)) = self.next_header() else {
                return false;
            };
            if level < self.depth {
                return false;
            }
            if level > self.depth {
                self.skip_subtree(self.depth + 1);
                continue;
            }
            match header.cmp(target) {
                // Siblings are ordered, so the target may still follow.
                Ordering::Less => self.skip_subtree(self.depth + 1),
                Ordering::Equal => {
                    self.descend(header);
                    return true;
                }
                Ordering::Greater => return false,
            }
        }
    }

    /// Leave the current bag, skipping whatever of it remains.
    ///
    /// Remaining child bags are added to the skipped atoms; remaining data
    /// atoms are discarded, as the caller has taken ownership of this bag.
    pub fn exit(&mut self) {
        if self.path.is_empty() {
            self.fail(ProtocolError::UnbalancedExit);
            return;
        }
        while let Some((_, level)) = self.next_header() {
            if level < self.depth {
                break;
            }
            self.skip_subtree(self.depth);
        }
        self.path.pop();
        self.depth -= 1;
    }

    /// Payload of the next data atom in the current bag.
    ///
    /// Only the immediately next atom is considered; returns `None` at a
    /// header or at the end.
    pub fn next_data(&mut self) -> Option<&'a [u8]> {
        loop {
            let atom = self.peek()?;
            if atom.is_trim_marker() {
                self.overflowed = true;
                self.pos += 1;
                continue;
            }
            if !is_data(atom) {
                return None;
            }
            self.pos += 1;
            return Some(&atom[1..]);
        }
    }

    /// Exit all open bags and treat everything left as skipped.
    pub fn close(&mut self) {
        while !self.path.is_empty() {
            self.exit();
        }
        if self.next_header().is_some() {
            self.skipped.extend_from_slice(&self.atoms[self.pos..]);
            self.pos = self.atoms.len();
        }
    }

    /// Atoms passed over without being interpreted, in canonical order.
    pub fn skipped(&self) -> &[Atom] {
        &self.skipped
    }

    pub fn into_skipped(self) -> Vec<Atom> {
        self.skipped
    }

    /// True once a trim marker has been encountered.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// The first error encountered, if any.
    pub fn error(&self) -> Option<&ProtocolError> {
        self.error.as_ref()
    }

    /// Number of open levels: 0 above the outermost level.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Headers of the bags entered since the reader was created.
    pub fn current_path(&self) -> &[&'a Atom] {
        &self.path
    }

    fn peek(&self) -> Option<&'a Atom> {
        if self.error.is_some() {
            return None;
        }
        self.atoms.get(self.pos)
    }

    fn descend(&mut self, header: &'a Atom) {
        self.path.push(header);
        self.depth += 1;
        self.pos += 1;
    }

    fn fail(&mut self, error: ProtocolError) {
        if self.error.is_none() {
            debug!(%error, depth = self.depth, "baggage reader failed");
            self.error = Some(error);
        }
    }

    /// Advance past data atoms and trim markers to the next header, returning
    /// it with its level. The cursor is left on the header.
    fn next_header(&mut self) -> Option<(&'a Atom, usize)> {
        loop {
            let atom = self.peek()?;
            if atom.is_trim_marker() {
                self.overflowed = true;
            } else if is_header(atom) {
                return match header_level(atom) {
                    Ok(level) => Some((atom, level)),
                    Err(error) => {
                        self.fail(error);
                        None
                    }
                };
            }
            self.pos += 1;
        }
    }

    /// Skip the subtree whose header is under the cursor, stopping at the
    /// next header with a level below `bound`. The skipped atoms, prefixed by
    /// the current path, are merged into the skipped set.
    fn skip_subtree(&mut self, bound: usize) {
        let Some(header) = self.peek() else {
            return;
        };
        let mut run: Vec<Atom> = self.path.iter().map(|&h| h.clone()).collect();
        run.push(header.clone());
        self.pos += 1;

        while let Some(atom) = self.peek() {
            if atom.is_trim_marker() {
                // Consecutive markers collapse to the first.
                if !self.overflowed {
                    self.overflowed = true;
                    run.push(atom.clone());
                }
            } else if is_header(atom) {
                match header_level(atom) {
                    Ok(level) if level < bound => break,
                    Ok(_) => run.push(atom.clone()),
                    Err(error) => {
                        self.fail(error);
                        break;
                    }
                }
            } else {
                run.push(atom.clone());
            }
            self.pos += 1;
        }
        self.skipped = merge(&self.skipped, &run);
    }
}
