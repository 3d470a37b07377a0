use crate::feature::AtomExpr;

/// Sentinel `label` used for an R-site atom (`*` outside of a query, or a
/// pseudo-atom later rewritten to an R-group by the extended-tail reader).
pub const R_SITE_LABEL: i32 = -1;

/// One atom as the main parser sees it, before any atoms/bonds are pushed
/// onto the external molecule. Kept distinct from whatever graph type the
/// caller supplies so that finalizers can still see the "empty" bond and
/// unresolved ring placeholder sentinels once parsing is done.
#[derive(Debug, Clone)]
pub struct AtomDesc {
    pub label: i32,
    pub isotope: u32,
    pub charge: i32,
    /// Explicit hydrogen count from a bracket atom; `-1` if not stated.
    pub hydrogens: i32,
    /// 0 = none, 1 = `@`, 2 = `@@`.
    pub chirality: u8,
    pub aromatic: bool,
    pub aam: u32,
    pub ignorable_aam: bool,
    pub brackets: bool,
    pub star_atom: bool,
    pub starts_polymer: bool,
    pub ends_polymer: bool,
    /// Index into `ParseState::polymer_repetitions`, or `-1`.
    pub polymer_index: i32,
    /// Index of the atom preceding this one along the spanning walk, or `-1`.
    pub parent: i32,
    /// Ordered neighbor indices; an unresolved ring opening is recorded as
    /// `-cycle` at the position it was encountered, and rewritten in place
    /// when the ring closes.
    pub neighbors: Vec<i32>,
    pub query: Option<AtomExpr>,
}

impl AtomDesc {
    pub fn new(label: i32, parent: i32) -> Self {
        Self {
            label,
            isotope: 0,
            charge: 0,
            hydrogens: -1,
            chirality: 0,
            aromatic: false,
            aam: 0,
            ignorable_aam: false,
            brackets: false,
            star_atom: false,
            starts_polymer: false,
            ends_polymer: false,
            polymer_index: -1,
            parent,
            neighbors: Vec::new(),
            query: None,
        }
    }

    pub const fn is_r_site(&self) -> bool {
        self.label == R_SITE_LABEL
    }

    /// Records an unresolved ring opening at the current neighbor position.
    pub fn pending(&mut self, cycle: u8) {
        self.neighbors.push(-i32::from(cycle));
    }

    /// Rewrites the first pending placeholder for `cycle` to the resolved
    /// neighbor index `end`, once that ring closes.
    pub fn closure(&mut self, cycle: u8, end: usize) {
        let marker = -i32::from(cycle);
        if let Some(slot) = self.neighbors.iter_mut().find(|n| **n == marker) {
            *slot = i32::try_from(end).expect("atom index fits in i32");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pending_pushes_negative_cycle() {
        let mut atom = AtomDesc::new(6, -1);

        atom.pending(1);

        assert_eq!(atom.neighbors, vec![-1]);
    }

    #[test]
    fn closure_rewrites_first_matching_placeholder() {
        let mut atom = AtomDesc::new(6, 0);
        atom.neighbors = vec![0, -1, 2];

        atom.closure(1, 5);

        assert_eq!(atom.neighbors, vec![0, 5, 2]);
    }

    #[test]
    fn closure_is_a_noop_without_a_matching_placeholder() {
        let mut atom = AtomDesc::new(6, 0);
        atom.neighbors = vec![0, 2];

        atom.closure(1, 5);

        assert_eq!(atom.neighbors, vec![0, 2]);
    }

    #[test]
    fn is_r_site() {
        assert!(AtomDesc::new(R_SITE_LABEL, -1).is_r_site());
        assert!(!AtomDesc::new(6, -1).is_r_site());
    }
}
