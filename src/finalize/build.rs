use crate::feature::element_from_atomic_number;
use crate::graph::{Atom, Bond, BondOrder as GraphBondOrder, Molecule};
use crate::read::{AtomDesc, BondDesc, BondOrder, Parsed};

/// Materializes the external molecule graph from a finalized [`Parsed`]
/// intermediate (aromatic marking and, for plain-molecule mode, implicit
/// hydrogens already applied). Atom and bond indices correspond 1:1 with
/// `parsed.atoms`/`parsed.bonds`. `parse()` never returns a bond with an
/// unresolved `end`, so every bond here is fully formed.
pub(crate) fn build_molecule(parsed: &Parsed, inside_rsmiles: bool) -> Molecule {
    let mut mol = Molecule::default();

    for atom in &parsed.atoms {
        mol.add_atom(build_atom(atom));
    }

    for bond in &parsed.bonds {
        let end = bond.end.expect("parse() leaves no unresolved ring bonds");
        mol.add_bond(build_bond(bond, end));
    }

    if !inside_rsmiles {
        for (i, atom) in parsed.atoms.iter().enumerate() {
            if atom.star_atom && atom.aam != 0 {
                mol.atoms[i].is_r_site = true;
                mol.atoms[i].r_group = Some(atom.aam);
            }
        }
    }

    mol
}

fn build_atom(desc: &AtomDesc) -> Atom {
    let element = if desc.is_r_site() || desc.label == 0 {
        None
    } else {
        element_from_atomic_number(desc.label)
    };

    let mut atom = Atom::new(element);
    atom.is_r_site = desc.is_r_site();
    atom.isotope = desc.isotope;
    atom.charge = desc.charge;
    atom.aromatic = desc.aromatic;
    atom.hydrogens = u8::try_from(desc.hydrogens.max(0)).unwrap_or(u8::MAX);
    atom.chirality = desc.chirality;
    atom.aam = desc.aam;
    atom.ignorable_aam = desc.ignorable_aam;
    atom.query = desc.query.clone();
    atom
}

fn build_bond(desc: &BondDesc, end: usize) -> Bond {
    let order = match desc.order {
        BondOrder::Single => GraphBondOrder::Single,
        BondOrder::Double => GraphBondOrder::Double,
        BondOrder::Triple => GraphBondOrder::Triple,
        BondOrder::Aromatic => GraphBondOrder::Aromatic,
        BondOrder::Any | BondOrder::Empty => GraphBondOrder::Any,
    };

    let mut bond = Bond::new(desc.beg, end, order);
    bond.dir = desc.dir;
    bond.topology = desc.topology;
    bond.query = desc.query.clone();
    bond
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::{parse, ParseMode};
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_one_atom_per_parsed_atom() {
        let parsed = parse("CCO", ParseMode::molecule()).unwrap();
        let mol = build_molecule(&parsed, false);

        assert_eq!(mol.atoms.len(), 3);
        assert_eq!(mol.bonds.len(), 2);
        assert_eq!(mol.atoms[2].element, Some(mendeleev::Element::O));
    }

    #[test]
    fn r_site_has_no_element() {
        let parsed = parse("*C", ParseMode::molecule()).unwrap();
        let mol = build_molecule(&parsed, false);

        assert!(mol.atoms[0].is_r_site);
        assert_eq!(mol.atoms[0].element, None);
    }
}
