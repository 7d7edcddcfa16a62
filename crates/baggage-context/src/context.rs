//! The baggage value carried by an execution.

use baggage_atoms::{self as atoms, Atom};
use baggage_protocol::{drop_bag, Bag, OverflowMarkerBehavior, Reader, Writer};
use rand::RngCore;
use tracing::debug;

use crate::error::{ContextError, Result};

/// Baggage carried alongside one execution.
///
/// An empty context is the absent baggage. Contexts are not `Clone`: use
/// [`BaggageContext::branch`] at fork points so the component identifier is
/// not duplicated, and [`BaggageContext::merge_with`] at join points.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BaggageContext {
    atoms: Vec<Atom>,
    /// Identifier of the component this context belongs to, owned by at most
    /// one live context.
    component_id: Option<u32>,
}

impl BaggageContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_atoms(atoms: Vec<Atom>) -> Self {
        BaggageContext {
            atoms,
            component_id: None,
        }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn into_atoms(self) -> Vec<Atom> {
        self.atoms
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Independent copy for a forked execution. The copy has no component id.
    pub fn branch(&self) -> Self {
        Self::from_atoms(atoms::branch(&self.atoms))
    }

    /// Join `other` into a new context.
    ///
    /// The component id moves to the result: this context's id if it has
    /// one, otherwise `other`'s. The donor is left without an id.
    pub fn merge_with(&mut self, other: &mut Self) -> Self {
        let component_id = self
            .component_id
            .take()
            .or_else(|| other.component_id.take());
        BaggageContext {
            atoms: atoms::merge(&self.atoms, &other.atoms),
            component_id,
        }
    }

    /// Join any number of contexts, in order.
    pub fn merge_all<'a, I>(contexts: I) -> Self
    where
        I: IntoIterator<Item = &'a mut BaggageContext>,
    {
        contexts
            .into_iter()
            .fold(Self::new(), |mut acc, ctx| acc.merge_with(ctx))
    }

    /// This context's component id, drawn from `rng` on first request.
    pub fn component_id(&mut self, rng: &mut impl RngCore) -> u32 {
        *self.component_id.get_or_insert_with(|| rng.next_u32())
    }

    pub fn has_component_id(&self) -> bool {
        self.component_id.is_some()
    }

    pub fn serialized_size(&self) -> usize {
        atoms::serialized_size(&self.atoms)
    }

    /// Wire form of the atoms. The component id is not serialized.
    pub fn serialize(&self) -> Vec<u8> {
        atoms::serialize(&self.atoms)
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_atoms(atoms::deserialize(bytes)?))
    }

    pub fn encode_base64(&self) -> String {
        atoms::encode_base64(&self.atoms)
    }

    pub fn decode_base64(encoded: &str) -> Result<Self> {
        Ok(Self::from_atoms(atoms::decode_base64(encoded)?))
    }

    /// Drop atoms until the serialized form fits in `max_bytes`.
    pub fn trim(&mut self, max_bytes: usize) {
        self.atoms = atoms::trim(std::mem::take(&mut self.atoms), max_bytes);
    }

    /// Read top-level bag `bag_index` into `bag`.
    ///
    /// Everything inside the bag that `bag` did not consume is handed back
    /// to it as unprocessed atoms.
    pub fn read_bag(&self, bag_index: u64, bag: &mut impl Bag) -> Result<()> {
        let mut reader = Reader::open(&self.atoms, bag_index);
        bag.read(&mut reader);
        reader.close();
        let error = reader.error().cloned();
        bag.set_unprocessed_atoms(reader.into_skipped());
        match error {
            Some(error) => {
                debug!(%error, bag_index, "failed to read bag");
                Err(ContextError::Protocol(error))
            }
            None => Ok(()),
        }
    }

    /// Replace top-level bag `bag_index` with the contents of `bag`.
    ///
    /// The bag is written even if the writer reports an error.
    pub fn set(&mut self, bag_index: u64, bag: &impl Bag) -> Result<()> {
        let remaining = drop_bag(&self.atoms, bag_index, OverflowMarkerBehavior::DropMarker);
        let mut writer = Writer::for_bag(bag_index);
        bag.write(&mut writer);
        writer.add_unprocessed_atoms(bag.unprocessed_atoms());
        self.atoms = atoms::merge(&remaining, &writer.atoms());
        match writer.error() {
            Some(error) => {
                debug!(%error, bag_index, "bag written with errors");
                Err(ContextError::Protocol(error.clone()))
            }
            None => Ok(()),
        }
    }

    /// Remove top-level bag `bag_index`, leaving a trim marker behind if the
    /// bag carried one.
    pub fn drop_bag(&mut self, bag_index: u64) {
        self.atoms = drop_bag(&self.atoms, bag_index, OverflowMarkerBehavior::PushMarkerDown);
    }
}

impl From<Vec<Atom>> for BaggageContext {
    fn from(atoms: Vec<Atom>) -> Self {
        Self::from_atoms(atoms)
    }
}
