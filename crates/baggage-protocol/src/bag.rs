//! The contract between typed bag schemas and the protocol.

use baggage_atoms::Atom;

use crate::reader::Reader;
use crate::writer::Writer;

/// A typed view over the contents of one bag.
///
/// `read` is called with a reader positioned inside the bag and consumes the
/// child bags and data it understands. Whatever it leaves behind ends up in
/// the reader's skipped atoms, which the caller hands back through
/// [`Bag::set_unprocessed_atoms`] so that [`Bag::write`] can re-attach them
/// with [`Writer::add_unprocessed_atoms`].
pub trait Bag {
    fn read(&mut self, reader: &mut Reader<'_>);

    fn write(&self, writer: &mut Writer);

    fn unprocessed_atoms(&self) -> &[Atom];

    fn set_unprocessed_atoms(&mut self, atoms: Vec<Atom>);
}
