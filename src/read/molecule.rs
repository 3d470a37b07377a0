use crate::feature::AtomExpr;
use crate::read::atom_desc::AtomDesc;
use crate::read::atom_expr::read_atom;
use crate::read::bond_desc::{BondDesc, BondDir, BondOrder, Topology};
use crate::read::bond_expr::{read_bond, BondQualifier};
use crate::read::curly::read_curly_braces;
use crate::read::error::ParseError;
use crate::read::missing_character::missing_character;
use crate::read::scanner::Scanner;
use crate::read::state::ParseState;
use crate::read::ParseMode;

/// The flat result of reading one SMILES/SMARTS string: atoms and bonds in
/// the order they were encountered, plus the polymer-repetition table the
/// curly-brace reader may have populated. Still "loose" atom/bond
/// descriptions — no external molecule graph has been built from these yet.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub atoms: Vec<AtomDesc>,
    pub bonds: Vec<BondDesc>,
    pub polymer_repetitions: Vec<u32>,
    /// Whatever text followed the molecule itself: an optional `|...|`
    /// extended-tail block, then an optional trailing name.
    pub remainder: String,
}

pub fn parse(input: &str, mode: ParseMode) -> Result<Parsed, ParseError> {
    parse_with_options(input, mode, false)
}

/// As [`parse`], but also accepts the loader's
/// `ignore_closing_bond_direction_mismatch` option (§6), which downgrades a
/// ring closure's bond-qualifier mismatch to a silent acceptance.
pub fn parse_with_options(
    input: &str,
    mode: ParseMode,
    ignore_closing_bond_direction_mismatch: bool,
) -> Result<Parsed, ParseError> {
    let mut scanner = Scanner::new(input);
    let mut atoms = Vec::new();
    let mut bonds = Vec::new();
    let mut state = ParseState::new();
    state.ignore_closing_bond_direction_mismatch = ignore_closing_bond_direction_mismatch;

    read_smiles(&mut scanner, mode, &mut atoms, &mut bonds, &mut state)?;

    if state.balance != 0 {
        return Err(ParseError::UnmatchedParen(scanner.cursor()));
    }

    if let Some(&number) = state.unclosed_cycles().first() {
        return Err(ParseError::UnclosedRing(number));
    }

    if state.inside_polymer {
        return Err(ParseError::UnclosedPolymer);
    }

    Ok(Parsed {
        atoms,
        bonds,
        polymer_repetitions: state.polymer_repetitions,
        remainder: scanner.remaining(),
    })
}

/// Parses the inner text of a `$(...)` recursive fragment down to the
/// query expression carried by its leading atom. Full substructure matching
/// against a molecule graph is owned by the external collaborator that
/// consumes this crate's output; this reader only preserves the fragment's
/// own atom-level constraint so it can be folded into the surrounding
/// expression tree as one AND'd leaf.
pub(crate) fn parse_query_fragment(input: &str) -> Result<AtomExpr, ParseError> {
    let parsed = parse(input, ParseMode::smarts())?;
    parsed
        .atoms
        .first()
        .and_then(|atom| atom.query.clone())
        .ok_or(ParseError::MalformedTail)
}

fn read_smiles(
    scanner: &mut Scanner,
    mode: ParseMode,
    atoms: &mut Vec<AtomDesc>,
    bonds: &mut Vec<BondDesc>,
    state: &mut ParseState,
) -> Result<(), ParseError> {
    loop {
        read_component(scanner, mode, atoms, bonds, state)?;

        if scanner.eat('.') {
            state.current_compno += 1;
            continue;
        }

        return Ok(());
    }
}

fn read_component(
    scanner: &mut Scanner,
    mode: ParseMode,
    atoms: &mut Vec<AtomDesc>,
    bonds: &mut Vec<BondDesc>,
    state: &mut ParseState,
) -> Result<(), ParseError> {
    let Some((mut atom, query)) = read_atom(scanner, mode, -1)? else {
        return Err(missing_character(scanner));
    };
    atom.query = query;

    let index = atoms.len();
    atoms.push(atom);
    state.atom_stack.push(index);

    read_curly_braces(scanner, state, atoms, index)?;

    read_body(scanner, mode, atoms, bonds, state)?;

    state.atom_stack.pop();
    Ok(())
}

/// Reads everything that can follow an atom already on top of the stack:
/// ring-closure digits (each with its own optional bond qualifier), nested
/// branches, and the chain continuation.
fn read_body(
    scanner: &mut Scanner,
    mode: ParseMode,
    atoms: &mut Vec<AtomDesc>,
    bonds: &mut Vec<BondDesc>,
    state: &mut ParseState,
) -> Result<(), ParseError> {
    loop {
        read_ring_closures(scanner, mode, atoms, bonds, state)?;

        match scanner.peek() {
            Some(&'(') => {
                scanner.pop();
                state.balance += 1;
                read_body(scanner, mode, atoms, bonds, state)?;
                if !scanner.eat(')') {
                    return Err(ParseError::UnmatchedParen(scanner.cursor()));
                }
                state.balance -= 1;
                continue;
            }
            Some(&')') | Some(&'.') | None => return Ok(()),
            Some(c) if c.is_whitespace() || *c == '|' => {
                let _ = c;
                return Ok(());
            }
            _ => {}
        }

        let current = *state.atom_stack.last().expect("atom on stack");
        let qualifier = read_bond(scanner, mode)?;

        let Some((mut next_atom, query)) =
            read_atom(scanner, mode, i32::try_from(current).unwrap_or(-1))?
        else {
            return Err(missing_character(scanner));
        };
        next_atom.query = query;

        if atoms[current].polymer_index >= 0 && !atoms[current].ends_polymer {
            next_atom.polymer_index = atoms[current].polymer_index;
        }

        let next_index = atoms.len();
        atoms.push(next_atom);
        atoms[current].neighbors.push(i32::try_from(next_index).expect("index fits"));
        push_bond(bonds, current, next_index, &qualifier);

        state.atom_stack.push(next_index);
        read_curly_braces(scanner, state, atoms, next_index)?;
        read_body(scanner, mode, atoms, bonds, state)?;
        state.atom_stack.pop();
    }
}

fn push_bond(bonds: &mut Vec<BondDesc>, beg: usize, end: usize, qualifier: &BondQualifier) {
    let mut bond = BondDesc::new(beg, qualifier.order, qualifier.dir);
    bond.end = Some(end);
    bond.topology = qualifier.topology;
    bond.query = qualifier.query.clone();
    bonds.push(bond);
}

fn read_ring_closures(
    scanner: &mut Scanner,
    mode: ParseMode,
    atoms: &mut [AtomDesc],
    bonds: &mut Vec<BondDesc>,
    state: &mut ParseState,
) -> Result<(), ParseError> {
    loop {
        let mut probe = scanner.clone();
        let qualifier = read_bond(&mut probe, mode)?;

        let number = match probe.peek().copied() {
            Some(c) if c.is_ascii_digit() => {
                probe.pop();
                u8::try_from(c.to_digit(10).expect("ascii digit")).expect("single digit fits")
            }
            Some('%') => {
                probe.pop();
                let digits = probe
                    .read_fixed_width(2)
                    .ok_or_else(|| ParseError::BadRingDigits(probe.cursor()))?;
                digits
                    .parse()
                    .map_err(|_| ParseError::BadRingDigits(probe.cursor()))?
            }
            _ => return Ok(()),
        };

        *scanner = probe;
        apply_ring_closure(number, &qualifier, atoms, bonds, state)?;
    }
}

fn apply_ring_closure(
    number: u8,
    qualifier: &BondQualifier,
    atoms: &mut [AtomDesc],
    bonds: &mut Vec<BondDesc>,
    state: &mut ParseState,
) -> Result<(), ParseError> {
    let current = *state.atom_stack.last().expect("atom on stack");

    match state.take_cycle(number) {
        Some(slot) => {
            if let Some(opening) = &slot.pending_bond {
                let closing = bond_signature(qualifier);
                if !signatures_compatible(opening, &closing) && !state.ignore_closing_bond_direction_mismatch {
                    return Err(ParseError::RingBondMismatch(number));
                }
            }

            atoms[current].closure(number, slot.atom);
            atoms[slot.atom].closure(number, current);

            let order = if qualifier.order == BondOrder::Empty {
                BondOrder::Empty
            } else {
                qualifier.order
            };
            let mut bond = BondDesc::new(slot.atom, order, qualifier.dir);
            bond.end = Some(current);
            bond.topology = Topology::Ring;
            bond.query = qualifier.query.clone();
            bonds.push(bond);
        }
        None => {
            atoms[current].pending(number);
            let signature = (qualifier.order != BondOrder::Empty
                || qualifier.dir != BondDir::None)
                .then(|| bond_signature(qualifier));
            state.open_cycle(number, current, signature);
        }
    }

    Ok(())
}

/// A normalized key used to compare a ring closure's two bond qualifiers for
/// compatibility. `/`/`\\` are folded together since the same physical bond
/// is written as each direction's mirror depending on which end it is read
/// from.
fn bond_signature(qualifier: &BondQualifier) -> String {
    let dir = match qualifier.dir {
        BondDir::None => "none",
        BondDir::Up | BondDir::Down => "dir",
    };
    format!("{:?}:{dir}", qualifier.order)
}

fn signatures_compatible(opening: &str, closing: &str) -> bool {
    opening == closing
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn benzene_ring_closes() {
        let parsed = parse("c1ccccc1", ParseMode::molecule()).unwrap();

        assert_eq!(parsed.atoms.len(), 6);
        assert_eq!(parsed.bonds.len(), 6);
        assert!(parsed.atoms.iter().all(|a| a.aromatic));
    }

    #[test]
    fn pyridine_nitrogen_is_aromatic() {
        let parsed = parse("c1ccncc1", ParseMode::molecule()).unwrap();

        assert!(parsed.atoms.iter().any(|a| a.label == 7 && a.aromatic));
    }

    #[test]
    fn two_digit_ring_closure() {
        let parsed = parse("C%10CCCCCCCCC%10", ParseMode::molecule()).unwrap();

        assert_eq!(parsed.atoms.len(), 10);
        assert_eq!(parsed.bonds.len(), 10);
    }

    #[test]
    fn unclosed_ring_is_an_error() {
        let result = parse("C1CC", ParseMode::molecule());

        assert_eq!(result.unwrap_err(), ParseError::UnclosedRing(1));
    }

    #[test]
    fn conflicting_explicit_ring_bond_orders_are_rejected() {
        let result = parse("C=1CCCCC-1", ParseMode::molecule());

        assert_eq!(result.unwrap_err(), ParseError::RingBondMismatch(1));
    }

    #[test]
    fn ignoring_closure_direction_mismatch_accepts_the_opening_qualifier() {
        let result = parse_with_options("C=1CCCCC-1", ParseMode::molecule(), true);

        assert!(result.is_ok());
    }

    #[test]
    fn branch_then_chain_continuation() {
        let parsed = parse("CC(=O)O", ParseMode::molecule()).unwrap();

        assert_eq!(parsed.atoms.len(), 4);
        assert_eq!(parsed.bonds.len(), 3);
    }

    #[test]
    fn dot_disconnected_components() {
        let parsed = parse("[Na+].[Cl-]", ParseMode::molecule()).unwrap();

        assert_eq!(parsed.atoms.len(), 2);
        assert_eq!(parsed.bonds.len(), 0);
    }

    #[test]
    fn smarts_logical_atom_query() {
        let parsed = parse("[#6;!H0]", ParseMode::smarts()).unwrap();

        assert!(parsed.atoms[0].query.is_some());
    }

    #[test]
    fn unmatched_paren_is_an_error() {
        let result = parse("CC(C", ParseMode::molecule());

        assert!(matches!(result, Err(ParseError::UnmatchedParen(_))));
    }
}
