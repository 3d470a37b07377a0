use std::collections::HashMap;

use super::{Atom, Bond, CisTrans, Sgroup, Stereocenter};
use crate::sssr;

/// The external molecule graph this crate's loader builds into (§1 OUT OF
/// SCOPE / §6 Molecule contract): atoms and bonds in source order, plus the
/// stereocenter, cis/trans, and S-group stores the finalizers populate.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    pub stereocenters: HashMap<usize, Stereocenter>,
    pub cis_trans: HashMap<usize, CisTrans>,
    pub sgroups: Vec<Sgroup>,
    pub name: String,
}

impl Molecule {
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    /// Appends `bond` and records it on both endpoints' neighbor lists, in
    /// the order bonds are added (the ordering the stereo finalizer's
    /// pyramid construction relies on).
    pub fn add_bond(&mut self, bond: Bond) -> usize {
        let (beg, end) = (bond.beg, bond.end);
        let idx = self.bonds.len();
        self.bonds.push(bond);
        self.atoms[beg].neighbors.push(end);
        self.atoms[end].neighbors.push(beg);
        idx
    }

    pub fn degree(&self, atom: usize) -> usize {
        self.atoms[atom].degree()
    }

    /// Whether `atom` has a neighbor count a tetrahedral pyramid can be
    /// built from (§4.7 step 6). This is a structural check only — full
    /// substituent-distinctness analysis is out of scope.
    pub fn is_possible_stereocenter(&self, atom: usize) -> bool {
        matches!(self.degree(atom), 3 | 4)
    }

    pub fn find_edge(&self, a: usize, b: usize) -> Option<usize> {
        self.bonds
            .iter()
            .position(|bond| (bond.beg == a && bond.end == b) || (bond.beg == b && bond.end == a))
    }

    /// Indices of every bond incident to `atom`.
    pub fn bonds_of(&self, atom: usize) -> Vec<usize> {
        self.bonds
            .iter()
            .enumerate()
            .filter_map(|(i, bond)| (bond.beg == atom || bond.end == atom).then_some(i))
            .collect()
    }

    /// Computes the SSSR basis (§4.5 / [`crate::sssr`]) over the current
    /// bond set.
    pub fn sssr(&self) -> Vec<Ring> {
        let edges: Vec<(usize, usize)> = self.bonds.iter().map(|b| (b.beg, b.end)).collect();

        sssr::compute(self.atoms.len(), &edges)
            .into_iter()
            .map(|bonds| {
                let mut atoms: Vec<usize> = bonds
                    .iter()
                    .flat_map(|&b| [self.bonds[b].beg, self.bonds[b].end])
                    .collect();
                atoms.sort_unstable();
                atoms.dedup();
                Ring { atoms, bonds }
            })
            .collect()
    }

    /// Removes atom `idx`, dropping every bond touching it and shifting
    /// every other index above `idx` down by one so indices stay dense.
    /// Used by the extended-tail reader's `_AP<n>` handling (§4.4), which
    /// removes the attachment-point placeholder atom after transferring its
    /// marker onto the remaining neighbor(s).
    pub fn remove_atom(&mut self, idx: usize) -> Atom {
        let removed = self.atoms.remove(idx);

        self.bonds.retain(|bond| bond.beg != idx && bond.end != idx);
        for bond in &mut self.bonds {
            if bond.beg > idx {
                bond.beg -= 1;
            }
            if bond.end > idx {
                bond.end -= 1;
            }
        }

        for atom in &mut self.atoms {
            atom.neighbors.retain(|&n| n != idx);
            for n in &mut atom.neighbors {
                if *n > idx {
                    *n -= 1;
                }
            }
        }

        let shift = |n: usize| if n > idx { n - 1 } else { n };
        self.stereocenters = std::mem::take(&mut self.stereocenters)
            .into_iter()
            .filter(|(k, _)| *k != idx)
            .map(|(k, mut center)| {
                for slot in &mut center.pyramid {
                    *slot = slot.map(shift);
                }
                (shift(k), center)
            })
            .collect();

        removed
    }

    /// Appends a duplicate of the atoms/bonds named by `atoms`/`bonds`
    /// (indices into this molecule), returning the new atom and bond
    /// indices in the same relative order. Used by the polymer finalizer
    /// (§4.8) to expand a literal multiple group into `r` copies.
    pub fn append_fragment(&mut self, atoms: &[usize], bonds: &[usize]) -> (Vec<usize>, Vec<usize>) {
        let mut atom_map = HashMap::new();
        let mut new_atoms = Vec::with_capacity(atoms.len());

        for &old in atoms {
            let mut clone = self.atoms[old].clone();
            clone.neighbors.clear();
            let new_idx = self.add_atom(clone);
            atom_map.insert(old, new_idx);
            new_atoms.push(new_idx);
        }

        let mut new_bonds = Vec::with_capacity(bonds.len());
        for &old_bond in bonds {
            let mut clone = self.bonds[old_bond].clone();
            clone.beg = atom_map[&clone.beg];
            clone.end = atom_map[&clone.end];
            new_bonds.push(self.add_bond(clone));
        }

        (new_atoms, new_bonds)
    }
}

/// One ring in an SSSR basis: the atom and bond indices that make it up.
#[derive(Debug, Clone)]
pub struct Ring {
    pub atoms: Vec<usize>,
    pub bonds: Vec<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::bond::BondOrder;
    use pretty_assertions::assert_eq;

    fn triangle() -> Molecule {
        let mut mol = Molecule::default();
        for _ in 0..3 {
            mol.add_atom(Atom::new(Some(mendeleev::Element::C)));
        }
        mol.add_bond(Bond::new(0, 1, BondOrder::Single));
        mol.add_bond(Bond::new(1, 2, BondOrder::Single));
        mol.add_bond(Bond::new(2, 0, BondOrder::Single));
        mol
    }

    #[test]
    fn degree_counts_neighbors() {
        let mol = triangle();

        assert_eq!(mol.degree(0), 2);
    }

    #[test]
    fn sssr_finds_the_one_ring() {
        let mol = triangle();
        let rings = mol.sssr();

        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].atoms, vec![0, 1, 2]);
    }

    #[test]
    fn remove_atom_shifts_bond_indices_down() {
        let mut mol = triangle();

        mol.remove_atom(1);

        assert_eq!(mol.atoms.len(), 2);
        assert_eq!(mol.bonds.len(), 1);
        assert_eq!(mol.bonds[0].beg, 0);
        assert_eq!(mol.bonds[0].end, 1);
    }

    #[test]
    fn append_fragment_duplicates_atoms_and_bonds() {
        let mut mol = triangle();

        let (atoms, bonds) = mol.append_fragment(&[0, 1], &[0]);

        assert_eq!(atoms, vec![3, 4]);
        assert_eq!(bonds, vec![3]);
        assert_eq!(mol.atoms.len(), 5);
        assert_eq!(mol.bonds[3].beg, 3);
        assert_eq!(mol.bonds[3].end, 4);
    }
}
