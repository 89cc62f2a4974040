//! C3 linearization of a resolved base list.
//!
//! The registry feeds this a cleaned base list (after substitution) and the
//! already-computed linearizations of each base. A `None` result means the
//! bases carry conflicting precedence constraints and the class definition
//! must be rejected.

use crate::types::ClassId;

/// Compute the ancestor ordering for a new class.
///
/// Standard C3: merge the linearizations of each base plus the base list
/// itself, headed by the new class. At each step the merge takes the first
/// candidate head that appears in no remaining tail; if no candidate
/// qualifies, the ordering is inconsistent.
///
/// Duplicate direct bases always fail the merge (the duplicate sits in its own
/// tail), which is the behavior embedders relying on host linearization
/// expect.
pub(crate) fn linearize<'a, F>(new: ClassId, bases: &[ClassId], mro_of: F) -> Option<Vec<ClassId>>
where
    F: Fn(ClassId) -> &'a [ClassId],
{
    if bases.is_empty() {
        return Some(vec![new]);
    }

    let mut sequences: Vec<Vec<ClassId>> = bases.iter().map(|&b| mro_of(b).to_vec()).collect();
    sequences.push(bases.to_vec());

    let mut result = vec![new];
    loop {
        sequences.retain(|seq| !seq.is_empty());
        if sequences.is_empty() {
            return Some(result);
        }

        // A head is a good candidate if it appears in no remaining tail
        let head = sequences
            .iter()
            .map(|seq| seq[0])
            .find(|&candidate| !sequences.iter().any(|seq| seq[1..].contains(&candidate)))?;

        result.push(head);
        for seq in &mut sequences {
            if seq.first() == Some(&head) {
                seq.remove(0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u32) -> ClassId {
        ClassId::new(n).unwrap()
    }

    /// Look up precomputed linearizations from a table of (class, mro) pairs.
    fn table<'a>(mros: &'a [(ClassId, Vec<ClassId>)]) -> impl Fn(ClassId) -> &'a [ClassId] + 'a {
        move |cls| {
            mros.iter()
                .find(|(c, _)| *c == cls)
                .map(|(_, mro)| mro.as_slice())
                .expect("test table covers all bases")
        }
    }

    #[test]
    fn test_no_bases_is_just_the_class() {
        fn no_mro(_: ClassId) -> &'static [ClassId] {
            unreachable!("no bases to look up")
        }
        let mro = linearize(id(1), &[], no_mro);
        assert_eq!(mro, Some(vec![id(1)]));
    }

    #[test]
    fn test_single_inheritance_chain() {
        // A = 1, B(A) = 2, C(B) = 3
        let mros = vec![(id(1), vec![id(1)]), (id(2), vec![id(2), id(1)])];
        let mro = linearize(id(3), &[id(2)], table(&mros));
        assert_eq!(mro, Some(vec![id(3), id(2), id(1)]));
    }

    #[test]
    fn test_diamond_keeps_declared_order() {
        // A = 1, B(A) = 2, C(A) = 3, D(B, C) = 4
        let mros = vec![
            (id(1), vec![id(1)]),
            (id(2), vec![id(2), id(1)]),
            (id(3), vec![id(3), id(1)]),
        ];
        let mro = linearize(id(4), &[id(2), id(3)], table(&mros));
        assert_eq!(mro, Some(vec![id(4), id(2), id(3), id(1)]));
    }

    #[test]
    fn test_conflicting_precedence_fails() {
        // A = 1, C(A) = 2, D(A, C) puts A before and after C
        let mros = vec![(id(1), vec![id(1)]), (id(2), vec![id(2), id(1)])];
        let mro = linearize(id(3), &[id(1), id(2)], table(&mros));
        assert_eq!(mro, None);
    }

    #[test]
    fn test_duplicate_direct_base_fails() {
        let mros = vec![(id(1), vec![id(1)])];
        let mro = linearize(id(2), &[id(1), id(1)], table(&mros));
        assert_eq!(mro, None);
    }
}
