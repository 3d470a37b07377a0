use crate::graph::{Atom, Bond, BondOrder, Bracket, LoadError, Molecule, Sgroup, SgroupKind};
use crate::read::AtomDesc;

/// Materializes each `polymer_repetitions` entry into an S-group (§4.8),
/// keyed by the `polymer_index`/`starts_polymer`/`ends_polymer` flags
/// `atoms` carried out of parsing. Runs last in the pipeline, after the
/// extended-tail block.
///
/// `atoms` is assumed to still correspond 1:1 with `mol.atoms` by index;
/// this does not hold if the extended-tail `_AP<n>` handling removed an
/// atom first (a combination not expected to occur in practice).
pub(crate) fn materialize_polymers(
    mol: &mut Molecule,
    atoms: &[AtomDesc],
    polymer_repetitions: &[u32],
    query_mode: bool,
) -> Result<(), LoadError> {
    for (i, &repetitions) in polymer_repetitions.iter().enumerate() {
        materialize_one(mol, atoms, i, repetitions, query_mode)?;
    }
    Ok(())
}

fn materialize_one(
    mol: &mut Molecule,
    atoms: &[AtomDesc],
    group_index: usize,
    repetitions: u32,
    query_mode: bool,
) -> Result<(), LoadError> {
    let marker = i32::try_from(group_index).expect("group index fits");
    let group_atoms: Vec<usize> =
        atoms.iter().enumerate().filter(|(_, a)| a.polymer_index == marker).map(|(idx, _)| idx).collect();

    let mut start = group_atoms
        .iter()
        .copied()
        .find(|&idx| atoms[idx].starts_polymer)
        .ok_or(LoadError::PolymerMissingStart(group_index))?;
    let mut end = group_atoms
        .iter()
        .copied()
        .find(|&idx| atoms[idx].ends_polymer)
        .ok_or(LoadError::PolymerMissingEnd(group_index))?;

    let in_group = |idx: usize| atoms.get(idx).is_some_and(|a| a.polymer_index == marker);

    let mut group_bonds = Vec::new();
    let mut start_bond = None;
    let mut end_bond = None;

    for (bidx, bond) in mol.bonds.iter().enumerate() {
        let (beg_in, end_in) = (in_group(bond.beg), in_group(bond.end));
        if !beg_in && !end_in {
            continue;
        }
        if beg_in && end_in {
            group_bonds.push(bidx);
        } else if bond.beg == start || bond.end == start {
            start_bond = Some(bidx);
        } else if bond.beg == end || bond.end == end {
            end_bond = Some(bidx);
        } else {
            return Err(LoadError::PolymerInternalBoundaryBond(group_index));
        }
    }

    if end_bond.is_none() && start_bond.is_some() {
        std::mem::swap(&mut start, &mut end);
        std::mem::swap(&mut start_bond, &mut end_bond);
    }

    let mut sgroup_atoms = group_atoms.clone();
    let mut sgroup_bonds = group_bonds.clone();

    if repetitions >= 2 {
        let mut prev_end = end;
        for _ in 0..(repetitions - 1) {
            let (new_atoms, new_bonds) = mol.append_fragment(&group_atoms, &group_bonds);
            let copy_start = new_atoms[group_atoms.iter().position(|&a| a == start).expect("start in group")];
            let copy_end = new_atoms[group_atoms.iter().position(|&a| a == end).expect("end in group")];

            sgroup_atoms.extend(new_atoms);
            sgroup_bonds.extend(new_bonds.iter().copied());

            let bridge = mol.add_bond(Bond::new(prev_end, copy_start, BondOrder::Single));
            sgroup_bonds.push(bridge);

            prev_end = copy_end;
        }

        if let Some(eb) = end_bond {
            let bond = &mut mol.bonds[eb];
            if bond.beg == end {
                bond.beg = prev_end;
            } else {
                bond.end = prev_end;
            }
        }
        end = prev_end;
    } else if repetitions == 0 {
        if start_bond.is_none() {
            let star = mol.add_atom(terminal_atom(query_mode));
            start_bond = Some(mol.add_bond(Bond::new(start, star, BondOrder::Single)));
        }
        if end_bond.is_none() {
            let star = mol.add_atom(terminal_atom(query_mode));
            end_bond = Some(mol.add_bond(Bond::new(end, star, BondOrder::Single)));
        }
    }

    mol.sgroups.push(Sgroup {
        kind: if repetitions == 0 { SgroupKind::RepeatingUnit } else { SgroupKind::MultipleGroup(repetitions) },
        atoms: sgroup_atoms,
        bonds: sgroup_bonds,
        start_bond,
        end_bond,
        brackets: [Bracket::default(), Bracket::default()],
    });

    Ok(())
}

/// A fresh dangling terminus: a `*` pseudo-atom for a plain molecule, an
/// unconstrained query node in query mode.
fn terminal_atom(query_mode: bool) -> Atom {
    let mut atom = Atom::new(None);
    if !query_mode {
        atom.pseudo_label = Some("*".to_string());
    }
    atom
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finalize::build_molecule;
    use crate::read::{parse, ParseMode};
    use pretty_assertions::assert_eq;

    fn build(input: &str) -> (Molecule, Vec<AtomDesc>, Vec<u32>) {
        let parsed = parse(input, ParseMode::molecule()).unwrap();
        let mol = build_molecule(&parsed, false);
        (mol, parsed.atoms, parsed.polymer_repetitions)
    }

    #[test]
    fn repeating_unit_gets_star_atoms_on_both_ends() {
        let (mut mol, atoms, reps) = build("C{-}CC{+n}");

        materialize_polymers(&mut mol, &atoms, &reps, false).unwrap();

        assert_eq!(mol.sgroups.len(), 1);
        assert_eq!(mol.sgroups[0].kind, SgroupKind::RepeatingUnit);
        assert_eq!(mol.atoms.len(), 5);
    }

    #[test]
    fn multiple_group_expands_into_extra_copies() {
        let (mut mol, atoms, reps) = build("C{-}CC{+nn3}");

        materialize_polymers(&mut mol, &atoms, &reps, false).unwrap();

        assert_eq!(mol.sgroups.len(), 1);
        assert_eq!(mol.sgroups[0].kind, SgroupKind::MultipleGroup(3));
        assert_eq!(mol.sgroups[0].atoms.len(), 9);
    }
}
