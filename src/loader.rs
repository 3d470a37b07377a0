use crate::error::Error;
use crate::finalize::{assign_cis_trans, build_molecule, build_stereocenters, fill_implicit_hydrogens, materialize_polymers, mark_aromatic_bonds};
use crate::graph::Molecule;
use crate::read::{parse_with_options, read_tail, ParseError, ParseMode, Scanner};

/// Ambient configuration threaded immutably through one load call (§6).
/// Constructed once per call, mirroring how the teacher crate threads small
/// `Copy` value types through its reader functions rather than relying on
/// globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoaderOptions {
    /// Suppresses name-reading and R-site materialization from `*`-plus-
    /// atom-map atoms, for use when this loader sits inside an RSMILES
    /// reaction-component reader.
    pub inside_rsmiles: bool,
    /// Downgrades stereochemistry errors (wrong neighbor count, not a
    /// possible stereocenter, extended-tail block referencing a
    /// non-stereocenter) to silent no-ops instead of aborting the load.
    pub ignore_stereochemistry_errors: bool,
    /// Downgrades a ring-closure bond whose directional qualifier (`/`/`\`)
    /// disagrees between opening and closing to a silent acceptance of the
    /// opening's qualifier, instead of a `RingBondMismatch` error.
    pub ignore_closing_bond_direction_mismatch: bool,
}

/// Loads a plain molecule: no query primitives, implicit hydrogens filled
/// in under the organic-subset rule.
pub fn load_molecule(input: &str, options: LoaderOptions) -> Result<Molecule, Error> {
    load(input, ParseMode::molecule(), options)
}

/// Loads a query molecule: query-only primitives (`R`, `a`, `r`, `v`, `x`,
/// bare `X`, `:?`) are permitted, but the notation is still plain SMILES
/// syntax rather than full SMARTS.
pub fn load_query_molecule(input: &str, options: LoaderOptions) -> Result<Molecule, Error> {
    load(input, ParseMode::query_molecule(), options)
}

/// Loads in full SMARTS mode: `$(...)`, `#<n>`, implicit single-or-aromatic
/// bonds, and top-level component grouping are all enabled.
pub fn load_smarts(input: &str, options: LoaderOptions) -> Result<Molecule, Error> {
    load(input, ParseMode::smarts(), options)
}

fn load(input: &str, mode: ParseMode, options: LoaderOptions) -> Result<Molecule, Error> {
    let mut parsed = parse_with_options(input, mode, options.ignore_closing_bond_direction_mismatch)?;

    mark_aromatic_bonds(&parsed.atoms, &mut parsed.bonds, mode);
    if !mode.query {
        fill_implicit_hydrogens(&mut parsed.atoms, &parsed.bonds);
    }

    let mut mol = build_molecule(&parsed, options.inside_rsmiles);

    build_stereocenters(&mut mol, &parsed.atoms, options.ignore_stereochemistry_errors)?;
    assign_cis_trans(&mut mol, mode.query);

    let mut scanner = Scanner::new(&parsed.remainder);
    scanner.skip_whitespace();

    if scanner.peek() == Some(&'|') {
        scanner.pop();
        let tail = read_delimited_tail(&mut scanner)?;
        read_tail(&tail, &mut mol, options.ignore_stereochemistry_errors)?;
    }

    if !options.inside_rsmiles {
        scanner.skip_whitespace();
        if !scanner.is_done() {
            let mut name = String::new();
            scanner.read_line_into(&mut name);
            mol.name = name;
        }
    }

    materialize_polymers(&mut mol, &parsed.atoms, &parsed.polymer_repetitions, mode.query)?;

    Ok(mol)
}

fn read_delimited_tail(scanner: &mut Scanner) -> Result<String, Error> {
    let mut tail = String::new();

    loop {
        match scanner.pop() {
            None => return Err(Error::Parse(ParseError::MalformedTail)),
            Some('|') => break,
            Some(&c) => tail.push(c),
        }
    }

    Ok(tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{BondOrder, CisTrans, SgroupKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn benzene_loads_with_aromatic_bonds() {
        let mol = load_molecule("c1ccccc1", LoaderOptions::default()).unwrap();

        assert_eq!(mol.atoms.len(), 6);
        assert!(mol.bonds.iter().all(|b| b.order == BondOrder::Aromatic));
        assert!(mol.atoms.iter().all(|a| a.hydrogens == 1));
    }

    #[test]
    fn pyridine_nitrogen_keeps_its_lone_pair() {
        let mol = load_molecule("c1ccncc1", LoaderOptions::default()).unwrap();

        let nitrogen = mol.atoms.iter().find(|a| a.element == Some(mendeleev::Element::N)).unwrap();
        assert_eq!(nitrogen.hydrogens, 0);
    }

    #[test]
    fn two_digit_ring_closure_loads() {
        let mol = load_molecule("C%10CCCCCCCCC%10", LoaderOptions::default()).unwrap();

        assert_eq!(mol.atoms.len(), 10);
        assert_eq!(mol.bonds.len(), 10);
    }

    #[test]
    fn smarts_logical_atom_loads_as_a_query_atom() {
        let mol = load_smarts("[#6;!H0]", LoaderOptions::default()).unwrap();

        assert!(mol.atoms[0].query.is_some());
    }

    #[test]
    fn curly_smiles_repeating_unit_gets_an_sgroup() {
        let mol = load_molecule("C{-}CC{+n}", LoaderOptions::default()).unwrap();

        assert_eq!(mol.sgroups.len(), 1);
        assert_eq!(mol.sgroups[0].kind, SgroupKind::RepeatingUnit);
    }

    #[test]
    fn curly_smiles_multiple_group_expands() {
        let mol = load_molecule("C{-}CC{+nn3}", LoaderOptions::default()).unwrap();

        assert_eq!(mol.sgroups[0].kind, SgroupKind::MultipleGroup(3));
    }

    #[test]
    fn extended_tail_radical_block_sets_radicals() {
        let mol = load_molecule("[CH3].[CH3] |^1:0,1|", LoaderOptions::default()).unwrap();

        assert_eq!(mol.atoms[0].radical, crate::graph::Radical::Doublet);
        assert_eq!(mol.atoms[1].radical, crate::graph::Radical::Doublet);
    }

    #[test]
    fn extended_tail_attachment_point_removes_the_star() {
        let mol = load_molecule("CC*.* |$;;_AP1;$|", LoaderOptions::default()).unwrap();

        assert_eq!(mol.atoms.len(), 3);
    }

    #[test]
    fn trailing_text_after_the_molecule_becomes_the_name() {
        let mol = load_molecule("CCO ethanol", LoaderOptions::default()).unwrap();

        assert_eq!(mol.name, "ethanol");
    }

    #[test]
    fn inside_rsmiles_suppresses_name_reading() {
        let mol = load_molecule("CCO ethanol", LoaderOptions { inside_rsmiles: true, ..Default::default() }).unwrap();

        assert_eq!(mol.name, "");
    }

    #[test]
    fn cis_trans_double_bond_direction_is_assigned() {
        let mol = load_molecule(r"F/C=C/F", LoaderOptions::default()).unwrap();

        assert_eq!(*mol.cis_trans.values().next().unwrap(), CisTrans::Trans);
    }
}
