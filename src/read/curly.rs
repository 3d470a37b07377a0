use crate::read::atom_desc::AtomDesc;
use crate::read::error::ParseError;
use crate::read::scanner::Scanner;
use crate::read::state::ParseState;

/// Consumes every `{...}` brace following the atom just pushed at
/// `atom_index`, then stamps `polymer_index` onto it if a polymer block is
/// currently open. Runs after every atom the main parser pushes, not only
/// atoms that actually carry braces (§4.1 CurlySMILES).
pub(crate) fn read_curly_braces(
    scanner: &mut Scanner,
    state: &mut ParseState,
    atoms: &mut [AtomDesc],
    atom_index: usize,
) -> Result<(), ParseError> {
    while scanner.peek() == Some(&'{') {
        handle_curly_brace(scanner, state, &mut atoms[atom_index])?;
    }

    if state.inside_polymer {
        let index = state.polymer_repetitions.len() - 1;
        atoms[atom_index].polymer_index = i32::try_from(index).expect("polymer table fits in i32");
    }

    Ok(())
}

fn handle_curly_brace(scanner: &mut Scanner, state: &mut ParseState, atom: &mut AtomDesc) -> Result<(), ParseError> {
    scanner.pop();

    let mut content = String::new();
    loop {
        match scanner.pop() {
            None => return Err(ParseError::UnclosedPolymer),
            Some('}') => break,
            Some(&c) => content.push(c),
        }
    }

    match parse_curly_content(&content)? {
        Some(CurlyMarker::PolymerStart) => {
            if state.inside_polymer {
                return Err(ParseError::MalformedPolymerBlock);
            }
            state.inside_polymer = true;
            atom.starts_polymer = true;
            state.polymer_repetitions.push(0);
        }
        Some(CurlyMarker::PolymerEnd(repetitions)) => {
            if !state.inside_polymer {
                return Err(ParseError::MalformedPolymerBlock);
            }
            state.inside_polymer = false;
            *state.polymer_repetitions.last_mut().expect("polymer block open") = repetitions;
            let index = state.polymer_repetitions.len() - 1;
            atom.polymer_index = i32::try_from(index).expect("polymer table fits in i32");
            atom.ends_polymer = true;
        }
        None => {}
    }

    Ok(())
}

enum CurlyMarker {
    PolymerStart,
    PolymerEnd(u32),
}

/// Parses the text between `{` and `}`: `-` starts a polymer block, `+n`
/// (optionally followed by `n<digits>`) ends one, anything else is ignored.
fn parse_curly_content(content: &str) -> Result<Option<CurlyMarker>, ParseError> {
    if content == "-" {
        return Ok(Some(CurlyMarker::PolymerStart));
    }

    let mut chars = content.chars();
    if chars.next() == Some('+') {
        match chars.next() {
            Some('r') => return Err(ParseError::RingRepeatingUnitUnsupported),
            Some('n') => {
                let rest = chars.as_str();
                let repetitions = rest
                    .strip_prefix('n')
                    .and_then(|digits| digits.parse().ok())
                    .unwrap_or(0);
                return Ok(Some(CurlyMarker::PolymerEnd(repetitions)));
            }
            _ => {}
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::{parse, ParseMode};
    use pretty_assertions::assert_eq;

    #[test]
    fn repeating_unit_sets_start_and_end_flags() {
        let parsed = parse("C{-}CC{+n}", ParseMode::molecule()).unwrap();

        assert!(parsed.atoms[0].starts_polymer);
        assert!(parsed.atoms[2].ends_polymer);
        assert_eq!(parsed.polymer_repetitions, vec![0]);
    }

    #[test]
    fn literal_multiple_group_records_its_count() {
        let parsed = parse("C{-}CC{+nn3}", ParseMode::molecule()).unwrap();

        assert_eq!(parsed.polymer_repetitions, vec![3]);
    }

    #[test]
    fn atoms_inside_the_block_get_the_same_polymer_index() {
        let parsed = parse("C{-}CC{+n}", ParseMode::molecule()).unwrap();

        assert!(parsed.atoms[0..3].iter().all(|a| a.polymer_index == 0));
    }

    #[test]
    fn nested_polymer_blocks_are_rejected() {
        let result = parse("C{-}C{-}C{+n}{+n}", ParseMode::molecule());

        assert!(matches!(result, Err(ParseError::MalformedPolymerBlock)));
    }

    #[test]
    fn unclosed_polymer_block_is_an_error() {
        let result = parse("C{-}CC", ParseMode::molecule());

        assert_eq!(result.unwrap_err(), ParseError::UnclosedPolymer);
    }
}
