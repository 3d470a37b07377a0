use crate::feature::{element_from_atomic_number, organic_subset_targets};
use crate::read::{AtomDesc, BondDesc, BondOrder};

/// Fills implicit hydrogen counts under the organic-subset valence rule
/// (§4.6). Runs only for plain molecule (non-query) mode.
pub(crate) fn fill_implicit_hydrogens(atoms: &mut [AtomDesc], bonds: &[BondDesc]) {
    let degree = degree_counts(atoms.len(), bonds);
    let valence_sum = valence_sums(atoms.len(), bonds);

    for (i, atom) in atoms.iter_mut().enumerate() {
        if atom.hydrogens >= 0 {
            continue;
        }

        if atom.brackets {
            atom.hydrogens = 0;
            continue;
        }

        if atom.aromatic {
            atom.hydrogens = if atom.label == 6 && degree[i] < 3 { 1 } else { 0 };
            continue;
        }

        let targets = element_from_atomic_number(atom.label)
            .map(organic_subset_targets)
            .unwrap_or(&[]);
        let target = targets
            .iter()
            .find(|&&t| u32::from(t) >= valence_sum[i])
            .copied()
            .unwrap_or(0);

        atom.hydrogens = i32::from(target).saturating_sub(i32::try_from(valence_sum[i]).unwrap_or(0)).max(0);
    }
}

fn degree_counts(n_atoms: usize, bonds: &[BondDesc]) -> Vec<u32> {
    let mut degree = vec![0u32; n_atoms];
    for bond in bonds {
        let Some(end) = bond.end else { continue };
        degree[bond.beg] += 1;
        degree[end] += 1;
    }
    degree
}

/// Sum of bond orders touching each atom, for the organic-subset valence
/// rule. Aromatic bonds count as order 1, matching the Kekule-free
/// Daylight convention this notation assumes.
fn valence_sums(n_atoms: usize, bonds: &[BondDesc]) -> Vec<u32> {
    let mut sum = vec![0u32; n_atoms];
    for bond in bonds {
        let Some(end) = bond.end else { continue };
        let order = match bond.order {
            BondOrder::Single | BondOrder::Aromatic | BondOrder::Any | BondOrder::Empty => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        };
        sum[bond.beg] += order;
        sum[end] += order;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finalize::mark_aromatic_bonds;
    use crate::read::{parse, ParseMode};
    use pretty_assertions::assert_eq;

    fn finalized(input: &str) -> Vec<AtomDesc> {
        let mut parsed = parse(input, ParseMode::molecule()).unwrap();
        mark_aromatic_bonds(&parsed.atoms, &mut parsed.bonds, ParseMode::molecule());
        fill_implicit_hydrogens(&mut parsed.atoms, &parsed.bonds);
        parsed.atoms
    }

    #[test]
    fn benzene_carbons_get_one_implicit_hydrogen() {
        let atoms = finalized("c1ccccc1");

        assert!(atoms.iter().all(|a| a.hydrogens == 1));
    }

    #[test]
    fn pyridine_nitrogen_has_no_implicit_hydrogen() {
        let atoms = finalized("n1ccccc1");

        assert_eq!(atoms[0].hydrogens, 0);
        assert!(atoms[1..].iter().all(|a| a.hydrogens == 1));
    }

    #[test]
    fn methane_gets_four_implicit_hydrogens() {
        let atoms = finalized("C");

        assert_eq!(atoms[0].hydrogens, 4);
    }

    #[test]
    fn bracket_atom_with_no_h_token_gets_zero() {
        let atoms = finalized("[C](C)(C)(C)C");

        assert_eq!(atoms[0].hydrogens, 0);
    }

    #[test]
    fn explicit_bracket_h_count_is_kept() {
        let atoms = finalized("[CH3]C");

        assert_eq!(atoms[0].hydrogens, 3);
    }

    #[test]
    fn trivalent_nitrogen_in_ammonia_gets_three_hydrogens() {
        let atoms = finalized("N");

        assert_eq!(atoms[0].hydrogens, 3);
    }
}
