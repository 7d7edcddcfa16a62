//! Searching for and removing top-level bags without a full traversal.

use baggage_atoms::{merge, Atom};

use crate::encoding::{header_level, indexed_header, is_header};

/// Outcome of [`find`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Found {
    /// The target atom was found.
    pub exists: bool,
    /// A trim marker was crossed between the start position and `index`.
    pub overflowed: bool,
    /// Index of the match, or of the first atom sorting after the target.
    pub index: usize,
}

/// Scan forward from `start` for `target`, stopping at the first atom that
/// sorts after it.
pub fn find(atoms: &[Atom], start: usize, target: &Atom) -> Found {
    let mut overflowed = false;
    for (index, atom) in atoms.iter().enumerate().skip(start) {
        overflowed |= atom.is_trim_marker();
        match atom.cmp(target) {
            std::cmp::Ordering::Less => continue,
            std::cmp::Ordering::Equal => {
                return Found {
                    exists: true,
                    overflowed,
                    index,
                }
            }
            std::cmp::Ordering::Greater => {
                return Found {
                    exists: false,
                    overflowed,
                    index,
                }
            }
        }
    }
    Found {
        exists: false,
        overflowed,
        index: atoms.len().max(start),
    }
}

/// Range `[start, end)` covering the top-level bag `bag_index` and its
/// contents, if the bag exists.
pub(crate) fn bag_range(atoms: &[Atom], bag_index: u64) -> Option<(usize, usize)> {
    let target = indexed_header(0, bag_index);
    let header = find(atoms, 0, &target);
    if !header.exists {
        return None;
    }
    let end = find(atoms, header.index + 1, &target).index;
    Some((header.index, end))
}

/// What [`drop_bag`] does with trim markers inside the bag it removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowMarkerBehavior {
    /// Discard the markers along with the bag. Used when the bag is about to
    /// be rewritten, so the marker is not actually lost.
    #[default]
    DropMarker,
    /// Keep the headers leading to the first marker, and the marker itself.
    RetainMarkerPosition,
    /// Replace the markers with a single marker at the root.
    PushMarkerDown,
}

/// Remove the top-level bag `bag_index` and everything nested inside it.
pub fn drop_bag(atoms: &[Atom], bag_index: u64, overflow: OverflowMarkerBehavior) -> Vec<Atom> {
    let Some((start, end)) = bag_range(atoms, bag_index) else {
        return atoms.to_vec();
    };

    let mut kept = Vec::with_capacity(atoms.len() - (end - start));
    kept.extend_from_slice(&atoms[..start]);
    kept.extend_from_slice(&atoms[end..]);

    let dropped = &atoms[start..end];
    if !dropped.iter().any(Atom::is_trim_marker) {
        return kept;
    }
    match overflow {
        OverflowMarkerBehavior::DropMarker => kept,
        OverflowMarkerBehavior::RetainMarkerPosition => merge(&kept, &marker_path(dropped)),
        OverflowMarkerBehavior::PushMarkerDown => merge(&kept, &[Atom::trim_marker()]),
    }
}

/// Headers enclosing the first trim marker in `atoms`, followed by the marker.
fn marker_path(atoms: &[Atom]) -> Vec<Atom> {
    let mut path: Vec<Atom> = Vec::new();
    for atom in atoms {
        if atom.is_trim_marker() {
            path.push(Atom::trim_marker());
            return path;
        }
        if is_header(atom) {
            if let Ok(level) = header_level(atom) {
                path.truncate(level);
                path.push(atom.clone());
            }
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::data_atom;

    fn header(level: usize, index: u64) -> Atom {
        indexed_header(level, index)
    }

    fn data(payload: &[u8]) -> Atom {
        data_atom(payload)
    }

    fn concat(parts: &[&[Atom]]) -> Vec<Atom> {
        parts.iter().flat_map(|p| p.iter().cloned()).collect()
    }

    fn sample() -> Vec<Atom> {
        vec![
            header(0, 0),
            data(&[5]),
            header(0, 2),
            data(&[8]),
            Atom::trim_marker(),
            header(0, 4),
            data(&[8]),
        ]
    }

    #[test]
    fn find_reports_position_and_overflow() {
        let atoms = sample();
        let cases = [
            (0, 0, true, false, 0),
            (1, 0, false, false, 2),
            (0, 1, false, false, 2),
            (0, 2, true, false, 2),
            (3, 2, false, true, 5),
            (0, 3, false, true, 5),
            (0, 4, true, true, 5),
            (6, 4, false, false, 7),
            (0, 5, false, true, 7),
        ];
        for (start, index, exists, overflowed, at) in cases {
            let found = find(&atoms, start, &header(0, index));
            assert_eq!(
                found,
                Found {
                    exists,
                    overflowed,
                    index: at
                },
                "find from {start} for bag {index}"
            );
        }
    }

    #[test]
    fn find_past_end() {
        let found = find(&[], 3, &header(0, 0));
        assert!(!found.exists);
        assert_eq!(found.index, 3);
    }

    #[test]
    fn drop_removes_whole_bag() {
        let b0 = [header(0, 0), data(&[5])];
        let b1 = [header(0, 2), data(&[8]), Atom::trim_marker()];
        let b2 = [header(0, 4), data(&[8])];
        let baggage = concat(&[&b0, &b1, &b2]);
        let without = |index| drop_bag(&baggage, index, OverflowMarkerBehavior::DropMarker);

        assert_eq!(without(0), concat(&[&b1, &b2]));
        assert_eq!(without(1), baggage);
        assert_eq!(without(2), concat(&[&b0, &b2]));
        assert_eq!(without(3), baggage);
        assert_eq!(without(4), concat(&[&b0, &b1]));
    }

    #[test]
    fn drop_removes_nested_bags() {
        let baggage = vec![
            header(0, 1),
            data(&[1]),
            header(1, 0),
            data(&[2]),
            header(2, 9),
            data(&[3]),
            header(0, 2),
            data(&[4]),
        ];
        assert_eq!(
            drop_bag(&baggage, 1, OverflowMarkerBehavior::DropMarker),
            vec![header(0, 2), data(&[4])]
        );
    }

    #[test]
    fn drop_pushes_marker_to_root() {
        let baggage = vec![
            header(0, 2),
            data(&[8]),
            Atom::trim_marker(),
            header(0, 4),
            data(&[8]),
        ];
        assert_eq!(
            drop_bag(&baggage, 2, OverflowMarkerBehavior::PushMarkerDown),
            vec![Atom::trim_marker(), header(0, 4), data(&[8])]
        );
    }

    #[test]
    fn drop_retains_marker_position() {
        let baggage = vec![
            header(0, 2),
            data(&[8]),
            header(1, 3),
            data(&[9]),
            Atom::trim_marker(),
            header(0, 4),
            data(&[8]),
        ];
        assert_eq!(
            drop_bag(&baggage, 2, OverflowMarkerBehavior::RetainMarkerPosition),
            vec![
                header(0, 2),
                header(1, 3),
                Atom::trim_marker(),
                header(0, 4),
                data(&[8]),
            ]
        );
    }
}
