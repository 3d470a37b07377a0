use crate::graph::{BondDir, BondOrder, CisTrans, LoadError, Molecule, Parity, StereoGroup, Stereocenter};
use crate::read::AtomDesc;

/// Builds a tetrahedral pyramid for every atom with `chirality != 0` and
/// registers it into `mol.stereocenters` (§4.7 steps 1-6).
///
/// `parsed_atoms` supplies `chirality` and `parent`, which are not carried
/// onto [`crate::graph::Atom`] once consumed here.
pub(crate) fn build_stereocenters(
    mol: &mut Molecule,
    parsed_atoms: &[AtomDesc],
    ignore_stereochemistry_errors: bool,
) -> Result<(), LoadError> {
    for (i, desc) in parsed_atoms.iter().enumerate() {
        if desc.chirality == 0 {
            continue;
        }

        match pyramid_for(mol, i, desc) {
            Ok(pyramid) => {
                mol.stereocenters.insert(
                    i,
                    Stereocenter {
                        pyramid,
                        parity: Parity::CounterClockwise,
                        group: StereoGroup::Abs,
                    },
                );
            }
            Err(err) if ignore_stereochemistry_errors => {
                let _ = err;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

/// Step 1: parent first, then an implicit-hydrogen slot if there are
/// exactly three real neighbors, then the rest in encounter order. Steps
/// 3-5: renormalize the pyramid so it represents an ABS parity, folding in
/// the raw `@`/`@@` reading.
fn pyramid_for(mol: &Molecule, atom: usize, desc: &AtomDesc) -> Result<[Option<usize>; 4], LoadError> {
    let neighbors = &mol.atoms[atom].neighbors;
    let count = neighbors.len();

    if !(3..=4).contains(&count) {
        return Err(LoadError::WrongNeighborCountForChirality(atom, count));
    }

    let mut slots: Vec<Option<usize>> = Vec::with_capacity(4);

    if desc.parent >= 0 {
        let parent = usize::try_from(desc.parent).expect("non-negative");
        slots.push(Some(parent));
    }

    if count == 3 {
        slots.push(None);
    }

    for &n in neighbors {
        if Some(n) == usize::try_from(desc.parent).ok() {
            continue;
        }
        slots.push(Some(n));
    }

    if slots.len() != 4 {
        return Err(LoadError::UnresolvedNeighborForChirality(atom));
    }

    let mut pyramid: [Option<usize>; 4] = [slots[0], slots[1], slots[2], slots[3]];

    if !pyramid.iter().any(Option::is_none) {
        pyramid.rotate_left(1);
    }

    if let Some(implicit_slot) = pyramid.iter().position(Option::is_none) {
        let mut parity_flips = 0;
        let mut cursor = implicit_slot;
        while cursor < 3 {
            pyramid.swap(cursor, cursor + 1);
            parity_flips += 1;
            cursor += 1;
        }
        if parity_flips % 2 == 1 {
            pyramid.swap(0, 1);
        }
    }

    if desc.chirality == 2 {
        pyramid.swap(0, 1);
    }

    if !mol.is_possible_stereocenter(atom) {
        return Err(LoadError::NotAPossibleStereocenter(atom));
    }

    Ok(pyramid)
}

/// Collects `/`/`\` bond directions in parse order and derives cis/trans
/// parity for the double bonds they flank (§4.7 "Cis/trans"). In query
/// mode every bond that gains a parity also gets `stereo_care` set.
pub(crate) fn assign_cis_trans(mol: &mut Molecule, query_mode: bool) {
    let double_bonds: Vec<usize> = mol
        .bonds
        .iter()
        .enumerate()
        .filter_map(|(i, b)| matches!(b.order, BondOrder::Double).then_some(i))
        .collect();

    for bond_idx in double_bonds {
        let (beg, end) = (mol.bonds[bond_idx].beg, mol.bonds[bond_idx].end);

        let Some(beg_dir) = directional_neighbor(mol, beg, end) else { continue };
        let Some(end_dir) = directional_neighbor(mol, end, beg) else { continue };

        let parity = if beg_dir == end_dir { CisTrans::Trans } else { CisTrans::Cis };
        mol.cis_trans.insert(bond_idx, parity);

        if query_mode {
            mol.bonds[bond_idx].stereo_care = true;
        }
    }
}

/// The directional (`/`/`\`) bond qualifier of the single bond from
/// `center` to one of its neighbors other than `other_end`, if any.
fn directional_neighbor(mol: &Molecule, center: usize, other_end: usize) -> Option<BondDir> {
    mol.bonds_of(center).into_iter().find_map(|bond_idx| {
        let bond = &mol.bonds[bond_idx];
        let neighbor = bond.other(center)?;
        if neighbor == other_end || bond.dir == BondDir::None {
            return None;
        }
        Some(bond.dir)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finalize::{build_molecule, fill_implicit_hydrogens, mark_aromatic_bonds};
    use crate::read::{parse, ParseMode};
    use pretty_assertions::assert_eq;

    fn load(input: &str) -> Molecule {
        let mut parsed = parse(input, ParseMode::molecule()).unwrap();
        mark_aromatic_bonds(&parsed.atoms, &mut parsed.bonds, ParseMode::molecule());
        fill_implicit_hydrogens(&mut parsed.atoms, &parsed.bonds);
        let mut mol = build_molecule(&parsed, false);
        build_stereocenters(&mut mol, &parsed.atoms, false).unwrap();
        assign_cis_trans(&mut mol, false);
        mol
    }

    #[test]
    fn chiral_atom_registers_a_stereocenter() {
        let mol = load("[C@H](N)(O)C");

        assert!(mol.stereocenters.contains_key(&0));
    }

    #[test]
    fn clockwise_chirality_swaps_the_first_two_slots() {
        let mol_ccw = load("[C@](F)(Cl)(Br)I");
        let mol_cw = load("[C@@](F)(Cl)(Br)I");

        let ccw = mol_ccw.stereocenters[&0].pyramid;
        let cw = mol_cw.stereocenters[&0].pyramid;

        assert_eq!(cw, [ccw[1], ccw[0], ccw[2], ccw[3]]);
    }

    #[test]
    fn double_bond_directions_yield_a_cis_trans_entry() {
        let mol = load(r"F/C=C/F");

        assert_eq!(mol.cis_trans.len(), 1);
        assert_eq!(*mol.cis_trans.values().next().unwrap(), CisTrans::Trans);
    }

    #[test]
    fn opposite_directions_are_cis() {
        let mol = load(r"F/C=C\F");

        assert_eq!(*mol.cis_trans.values().next().unwrap(), CisTrans::Cis);
    }
}
