use crate::graph::{LoadError, Molecule, Parity, Radical, StereoGroup, Stereocenter};
use crate::read::scanner::Scanner;

/// Reads an ChemAxon-style extended-tail block (§4.4): the text strictly
/// between the `|...|` delimiters, which the caller has already stripped.
/// Runs on the already-built [`Molecule`], after stereocenters and cis/trans
/// have been assigned but before polymer finalization.
pub fn read_tail(input: &str, mol: &mut Molecule, ignore_stereochemistry_errors: bool) -> Result<(), LoadError> {
    let mut scanner = Scanner::new(input);

    while let Some(&c) = scanner.peek() {
        scanner.pop();

        match c {
            'w' => {
                expect_colon(&mut scanner)?;
                for idx in read_ids(&mut scanner) {
                    mark_any(mol, idx);
                }
            }
            'a' => {
                expect_colon(&mut scanner)?;
                for idx in read_ids(&mut scanner) {
                    set_group(mol, idx, StereoGroup::Abs, ignore_stereochemistry_errors)?;
                }
            }
            'o' => {
                let groupno = scanner.read_unsigned().ok_or(LoadError::MalformedTail)?;
                expect_colon(&mut scanner)?;
                for idx in read_ids(&mut scanner) {
                    set_group(mol, idx, StereoGroup::Or(groupno), ignore_stereochemistry_errors)?;
                }
            }
            '&' => {
                let groupno = scanner.read_unsigned().ok_or(LoadError::MalformedTail)?;
                expect_colon(&mut scanner)?;
                for idx in read_ids(&mut scanner) {
                    set_group(mol, idx, StereoGroup::And(groupno), ignore_stereochemistry_errors)?;
                }
            }
            '^' => {
                let digit = scanner.read_fixed_width(1).ok_or(LoadError::MalformedTail)?;
                let radical = match digit.as_str() {
                    "1" => Radical::Doublet,
                    "3" => Radical::Singlet,
                    "4" => Radical::Triplet,
                    other => {
                        let number: u32 = other.parse().map_err(|_| LoadError::MalformedTail)?;
                        return Err(LoadError::UnsupportedRadical(number));
                    }
                };
                expect_colon(&mut scanner)?;
                for idx in read_ids(&mut scanner) {
                    let atom = atom_mut(mol, idx)?;
                    atom.radical = radical;
                }
            }
            '$' => read_pseudo_labels(&mut scanner, mol)?,
            'h' => {
                let Some(&kind) = scanner.peek() else { return Err(LoadError::MalformedTail) };
                scanner.pop();
                let highlight_atom = match kind {
                    'a' => true,
                    'b' => false,
                    _ => return Err(LoadError::MalformedTail),
                };
                expect_colon(&mut scanner)?;
                for idx in read_ids(&mut scanner) {
                    let i = idx as usize;
                    if highlight_atom {
                        mol.atoms.get_mut(i).ok_or(LoadError::TailAtomOutOfRange(idx))?.highlighted = true;
                    } else {
                        mol.bonds.get_mut(i).ok_or(LoadError::TailAtomOutOfRange(idx))?.highlighted = true;
                    }
                }
            }
            _ => return Err(LoadError::MalformedTail),
        }
    }

    Ok(())
}

fn expect_colon(scanner: &mut Scanner) -> Result<(), LoadError> {
    if scanner.eat(':') {
        Ok(())
    } else {
        Err(LoadError::MalformedTail)
    }
}

/// Reads a comma-separated run of unsigned atom/bond indices; stops at the
/// first non-digit without consuming it.
fn read_ids(scanner: &mut Scanner) -> Vec<u32> {
    let mut ids = Vec::new();

    while matches!(scanner.peek(), Some(c) if c.is_ascii_digit()) {
        let Some(idx) = scanner.read_unsigned() else { break };
        ids.push(idx);

        if scanner.peek() == Some(&',') {
            scanner.pop();
        }
    }

    ids
}

fn atom_mut(mol: &mut Molecule, idx: u32) -> Result<&mut crate::graph::Atom, LoadError> {
    mol.atoms.get_mut(idx as usize).ok_or(LoadError::TailAtomOutOfRange(idx))
}

fn set_group(mol: &mut Molecule, idx: u32, group: StereoGroup, ignore: bool) -> Result<(), LoadError> {
    match mol.stereocenters.get_mut(&(idx as usize)) {
        Some(center) => {
            center.group = group;
            Ok(())
        }
        None if ignore => Ok(()),
        None => Err(LoadError::NotAStereocenter(idx)),
    }
}

/// `w:` always registers the atom as an ANY stereocenter, whether or not it
/// was already one; the pyramid is synthesized from its current neighbor
/// list since no `@`/`@@` reading produced one.
fn mark_any(mol: &mut Molecule, idx: u32) {
    let i = idx as usize;
    let Some(atom) = mol.atoms.get(i) else { return };

    let pyramid = mol.stereocenters.get(&i).map_or_else(
        || {
            let mut slots = [None; 4];
            for (slot, &n) in slots.iter_mut().zip(atom.neighbors.iter()) {
                *slot = Some(n);
            }
            slots
        },
        |center| center.pyramid,
    );

    mol.stereocenters.insert(
        i,
        Stereocenter {
            pyramid,
            parity: Parity::CounterClockwise,
            group: StereoGroup::Any,
        },
    );
}

/// Reads the `$label_0;label_1;...;label_{n-1}$` block, one label per atom
/// in index order. `_R<n>` rewrites the atom into an R-site; `_AP<n>`
/// transfers attachment point `n` onto the atom's neighbors and removes the
/// placeholder atom itself; anything else becomes a free-form pseudo-label.
///
/// Atom removals are deferred and replayed in descending original-index
/// order once every label has been read, since `Molecule::remove_atom`
/// shifts every higher index down by one: processing highest-first means
/// every index this loop still has to use is still valid when it gets there.
fn read_pseudo_labels(scanner: &mut Scanner, mol: &mut Molecule) -> Result<(), LoadError> {
    let vertex_count = mol.atoms.len();
    let mut attachment_points: Vec<usize> = Vec::new();

    for i in 0..vertex_count {
        let mut label = String::new();
        let terminator = loop {
            match scanner.peek().copied() {
                None => return Err(LoadError::MalformedTail),
                Some(c @ (';' | '$')) => {
                    scanner.pop();
                    break c;
                }
                Some(c) => {
                    scanner.pop();
                    label.push(c);
                }
            }
        };

        if terminator == '$' && i != vertex_count - 1 {
            return Err(LoadError::LabelCountMismatch);
        }
        if terminator == ';' && i == vertex_count - 1 {
            return Err(LoadError::LabelCountMismatch);
        }

        if label.is_empty() {
            continue;
        }

        if let Some(rnum) = label.strip_prefix("_R").and_then(|digits| digits.parse().ok()) {
            mol.atoms[i].is_r_site = true;
            mol.atoms[i].r_group = Some(rnum);
        } else if let Some(apnum) = label.strip_prefix("_AP").and_then(|digits| digits.parse::<u32>().ok()) {
            for &neighbor in &mol.atoms[i].neighbors.clone() {
                mol.atoms[neighbor].attachment_points.push(apnum);
            }
            attachment_points.push(i);
        } else {
            mol.atoms[i].pseudo_label = Some(label);
        }
    }

    attachment_points.sort_unstable_by(|a, b| b.cmp(a));
    for idx in attachment_points {
        mol.remove_atom(idx);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finalize::{assign_cis_trans, build_molecule, build_stereocenters, fill_implicit_hydrogens, mark_aromatic_bonds};
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
    fn radical_tail_sets_doublet_on_both_atoms() {
        let mut mol = load("[CH3].[CH3]");

        read_tail("^1:0,1", &mut mol, false).unwrap();

        assert_eq!(mol.atoms[0].radical, Radical::Doublet);
        assert_eq!(mol.atoms[1].radical, Radical::Doublet);
    }

    #[test]
    fn attachment_point_label_removes_the_star_and_tags_its_neighbor() {
        let mut mol = load("CC*.*");

        read_tail("$;;_AP1;$", &mut mol, false).unwrap();

        assert_eq!(mol.atoms.len(), 3);
        assert_eq!(mol.atoms[1].attachment_points, vec![1]);
    }

    #[test]
    fn or_group_requires_an_existing_stereocenter() {
        let mut mol = load("CC");

        let result = read_tail("o1:0", &mut mol, false);

        assert!(matches!(result, Err(LoadError::NotAStereocenter(0))));
    }

    #[test]
    fn ignore_flag_silences_missing_stereocenter_errors() {
        let mut mol = load("CC");

        read_tail("o1:0", &mut mol, true).unwrap();
    }

    #[test]
    fn highlight_block_marks_the_referenced_atom() {
        let mut mol = load("CC");

        read_tail("ha:0", &mut mol, false).unwrap();

        assert!(mol.atoms[0].highlighted);
    }
}
