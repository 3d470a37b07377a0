use crate::feature::{
    and_into, element_from_symbol, or_into, organic_subset_symbol, AtomExpr, AtomProp, Element, Expr,
};
use crate::read::atom_desc::{AtomDesc, R_SITE_LABEL};
use crate::read::error::ParseError;
use crate::read::missing_character::missing_character;
use crate::read::molecule;
use crate::read::scanner::Scanner;
use crate::read::ParseMode;

/// Reads one atom token: a bracket expression `[ ... ]`, an organic-subset
/// symbol, an aromatic organic-subset letter, or `*`. Returns `None` if the
/// scanner is not positioned at an atom token at all.
pub fn read_atom(
    scanner: &mut Scanner,
    mode: ParseMode,
    parent: i32,
) -> Result<Option<(AtomDesc, Option<AtomExpr>)>, ParseError> {
    if scanner.peek() == Some(&'[') {
        scanner.pop();
        let body = read_bracket_body(scanner)?;
        return parse_bracket_expr(&body, mode, parent).map(Some);
    }

    read_bare_atom(scanner, mode, parent)
}

fn read_bracket_body(scanner: &mut Scanner) -> Result<String, ParseError> {
    let mut depth = 0i32;
    let mut body = String::new();

    loop {
        match scanner.peek().copied() {
            None => return Err(ParseError::UnterminatedBracket),
            Some(']') if depth == 0 => {
                scanner.pop();
                return Ok(body);
            }
            Some(c) => {
                if c == '[' {
                    depth += 1;
                } else if c == ']' {
                    depth -= 1;
                }
                body.push(c);
                scanner.pop();
            }
        }
    }
}

fn read_bare_atom(
    scanner: &mut Scanner,
    mode: ParseMode,
    parent: i32,
) -> Result<Option<(AtomDesc, Option<AtomExpr>)>, ParseError> {
    let Some(&c) = scanner.peek() else {
        return Ok(None);
    };

    if c == '*' {
        scanner.pop();
        let mut atom = AtomDesc::new(R_SITE_LABEL, parent);
        atom.star_atom = true;
        let query = mode
            .query
            .then(|| Expr::Leaf(AtomProp::AtomNumber(1)).negate());
        return Ok(Some((atom, query)));
    }

    if c.is_ascii_uppercase() {
        let two: String = [c, *scanner.peek_second().unwrap_or(&' ')].iter().collect();
        let (symbol, width) = if organic_subset_symbol(&two).is_some() {
            (two, 2)
        } else {
            (c.to_string(), 1)
        };

        if let Some(element) = organic_subset_symbol(&symbol) {
            scanner.skip(width);
            let atom = AtomDesc::new(i32::from(element.atomic_number()), parent);
            let query = mode
                .query
                .then(|| Expr::Leaf(AtomProp::AtomNumber(u16::from(element.atomic_number()))));
            return Ok(Some((atom, query)));
        }
        return Ok(None);
    }

    if matches!(c, 'b' | 'c' | 'n' | 'o' | 'p' | 's') {
        scanner.pop();
        let element = organic_subset_symbol(&c.to_ascii_uppercase().to_string())
            .expect("organic aromatic letters are always valid elements");
        let mut atom = AtomDesc::new(i32::from(element.atomic_number()), parent);
        atom.aromatic = true;

        let query = mode.query.then(|| {
            Expr::Leaf(AtomProp::AtomNumber(u16::from(element.atomic_number())))
                .and(Expr::Leaf(AtomProp::Aromaticity(true)))
        });
        return Ok(Some((atom, query)));
    }

    Ok(None)
}

fn parse_bracket_expr(
    body: &str,
    mode: ParseMode,
    parent: i32,
) -> Result<(AtomDesc, Option<AtomExpr>), ParseError> {
    let mut atom = AtomDesc::new(0, parent);
    atom.brackets = true;

    let chars: Vec<char> = body.chars().collect();
    let mut first = true;
    let expr = parse_level(&chars, mode, &mut atom, &mut first)?;

    Ok((atom, expr))
}

/// Masks the contents of every `$(...)` run with a filler character so
/// logical-operator splitting does not see separators that belong to a
/// nested recursive fragment.
fn mask_fragments(chars: &[char]) -> Vec<char> {
    let mut masked = chars.to_vec();
    let mut i = 0;

    while i < masked.len() {
        if masked[i] == '$' && masked.get(i + 1) == Some(&'(') {
            let mut depth = 1;
            let mut j = i + 2;
            while j < masked.len() && depth > 0 {
                match masked[j] {
                    '(' => depth += 1,
                    ')' => depth -= 1,
                    _ => {}
                }
                if depth > 0 {
                    masked[j] = '\u{0}';
                }
                j += 1;
            }
            i = j;
        } else {
            i += 1;
        }
    }

    masked
}

fn split_top_level(chars: &[char], sep: char) -> Option<Vec<Vec<char>>> {
    let masked = mask_fragments(chars);
    if !masked.contains(&sep) {
        return None;
    }

    let mut parts = Vec::new();
    let mut start = 0;

    for (i, &c) in masked.iter().enumerate() {
        if c == sep {
            parts.push(chars[start..i].to_vec());
            start = i + 1;
        }
    }
    parts.push(chars[start..].to_vec());

    Some(parts)
}

fn parse_level(
    chars: &[char],
    mode: ParseMode,
    atom: &mut AtomDesc,
    first: &mut bool,
) -> Result<Option<AtomExpr>, ParseError> {
    if let Some(parts) = split_top_level(chars, ';') {
        return combine(parts, mode, atom, first, true);
    }
    if let Some(parts) = split_top_level(chars, ',') {
        return combine(parts, mode, atom, first, false);
    }
    if let Some(parts) = split_top_level(chars, '&') {
        return combine(parts, mode, atom, first, true);
    }

    let leaf: String = chars.iter().collect();
    scan_primitives(&leaf, mode, atom, first)
}

fn combine(
    parts: Vec<Vec<char>>,
    mode: ParseMode,
    atom: &mut AtomDesc,
    first: &mut bool,
    is_and: bool,
) -> Result<Option<AtomExpr>, ParseError> {
    let mut acc = None;

    for part in parts {
        let next = parse_level(&part, mode, atom, first)?;
        if let Some(next) = next {
            acc = Some(if is_and {
                and_into(acc, next)
            } else {
                or_into(acc, next)
            });
        }
    }

    Ok(acc)
}

fn scan_primitives(
    leaf: &str,
    mode: ParseMode,
    atom: &mut AtomDesc,
    first: &mut bool,
) -> Result<Option<AtomExpr>, ParseError> {
    let mut scanner = Scanner::new(leaf);
    let mut acc: Option<AtomExpr> = None;
    let mut negate = false;

    while let Some(&c) = scanner.peek() {
        if c == '!' {
            scanner.pop();
            negate = true;
            continue;
        }

        let was_first = *first;
        let produced = scan_one_primitive(&mut scanner, mode, atom, was_first)?;
        *first = false;

        if let Some(prop) = produced {
            let leaf_expr = if negate {
                Expr::Leaf(prop).negate()
            } else {
                Expr::Leaf(prop)
            };
            negate = false;
            acc = Some(and_into(acc, leaf_expr));
        }
    }

    Ok(mode.query.then_some(acc).flatten())
}

/// Tries to resolve the general-element primitive (SPEC_FULL §4.2:
/// "uppercase letter possibly + lowercase"): a two-letter symbol first,
/// falling back to one letter. `c` is the character still sitting under
/// `scanner.peek()`; on success the matched width has been consumed, on
/// failure the scanner is untouched.
fn try_general_element(scanner: &mut Scanner, c: char) -> Option<Element> {
    let two: String = [c, *scanner.peek_second().unwrap_or(&' ')].iter().collect();
    if let Some(element) = element_from_symbol(&two) {
        scanner.skip(2);
        return Some(element);
    }
    if let Some(element) = element_from_symbol(&c.to_string()) {
        scanner.skip(1);
        return Some(element);
    }
    None
}

#[allow(clippy::too_many_lines)]
fn scan_one_primitive(
    scanner: &mut Scanner,
    mode: ParseMode,
    atom: &mut AtomDesc,
    first: bool,
) -> Result<Option<AtomProp>, ParseError> {
    let c = *scanner.peek().expect("caller checked peek is Some");

    if c.is_ascii_digit() && first {
        let n = scanner.read_unsigned().expect("digit run");
        atom.isotope = n;
        return Ok(Some(AtomProp::Isotope(u16::try_from(n).unwrap_or(u16::MAX))));
    }

    match c {
        '*' => {
            scanner.pop();
            atom.label = R_SITE_LABEL;
            atom.star_atom = true;
            Ok(Some(AtomProp::AtomNumber(1)))
        }
        'H' => {
            scanner.pop();
            let two: String = ['H', *scanner.peek().unwrap_or(&' ')].iter().collect();
            if let Some(element) = element_from_symbol(&two) {
                scanner.skip(1);
                atom.label = i32::from(element.atomic_number());
                Ok(Some(AtomProp::AtomNumber(u16::from(element.atomic_number()))))
            } else if first {
                atom.label = i32::from(element_from_symbol("H").unwrap().atomic_number());
                Ok(Some(AtomProp::AtomNumber(1)))
            } else {
                let count = scanner.read_unsigned().unwrap_or(1);
                atom.hydrogens = i32::try_from(count).unwrap_or(0);
                Ok(Some(AtomProp::TotalHydrogens(u8::try_from(count).unwrap_or(u8::MAX))))
            }
        }
        'A' => {
            scanner.pop();
            let two: String = ['A', *scanner.peek().unwrap_or(&' ')].iter().collect();
            if let Some(element) = element_from_symbol(&two) {
                scanner.skip(1);
                atom.label = i32::from(element.atomic_number());
                Ok(Some(AtomProp::AtomNumber(u16::from(element.atomic_number()))))
            } else if mode.query {
                Ok(Some(AtomProp::Aromaticity(false)))
            } else {
                Err(ParseError::QueryOnlyPrimitive('A'))
            }
        }
        'R' => {
            scanner.pop();
            let two: String = ['R', *scanner.peek().unwrap_or(&' ')].iter().collect();
            if let Some(element) = element_from_symbol(&two) {
                scanner.skip(1);
                atom.label = i32::from(element.atomic_number());
                Ok(Some(AtomProp::AtomNumber(u16::from(element.atomic_number()))))
            } else if mode.query {
                match scanner.read_unsigned() {
                    Some(0) => Ok(Some(AtomProp::RingMembership(Some(0)))),
                    Some(n) => Ok(Some(AtomProp::RingMembership(Some(
                        u8::try_from(n).unwrap_or(u8::MAX),
                    )))),
                    None => Ok(Some(AtomProp::RingMembership(None))),
                }
            } else {
                Err(ParseError::QueryOnlyPrimitive('R'))
            }
        }
        'D' => {
            if let Some(element) = try_general_element(scanner, c) {
                atom.label = i32::from(element.atomic_number());
                return Ok(Some(AtomProp::AtomNumber(u16::from(element.atomic_number()))));
            }
            scanner.pop();
            if !mode.query {
                return Err(ParseError::QueryOnlyPrimitive('D'));
            }
            let n = scanner.read_unsigned().unwrap_or(1);
            Ok(Some(AtomProp::Substituents(u8::try_from(n).unwrap_or(u8::MAX))))
        }
        'X' => {
            scanner.pop();
            if scanner.peek() == Some(&'e') {
                scanner.pop();
                let element = element_from_symbol("Xe").expect("Xe is a real element");
                atom.label = i32::from(element.atomic_number());
                return Ok(Some(AtomProp::AtomNumber(u16::from(element.atomic_number()))));
            }
            if !mode.query {
                return Err(ParseError::QueryOnlyPrimitive('X'));
            }
            let n = scanner.read_unsigned().unwrap_or(1);
            Ok(Some(AtomProp::Connectivity(u8::try_from(n).unwrap_or(u8::MAX))))
        }
        '#' => {
            scanner.pop();
            if !mode.smarts {
                return Err(ParseError::SmartsOnlyPrimitive('#'));
            }
            let n = scanner
                .read_unsigned()
                .ok_or_else(|| missing_character(scanner))?;
            atom.label = i32::try_from(n).unwrap_or(0);
            Ok(Some(AtomProp::AtomNumber(u16::try_from(n).unwrap_or(u16::MAX))))
        }
        'b' | 'c' | 'n' | 'o' | 'p' | 's' => {
            scanner.pop();
            let element = organic_subset_symbol(&c.to_ascii_uppercase().to_string())
                .ok_or(ParseError::UnrecognizedLowercase(c))?;
            atom.label = i32::from(element.atomic_number());
            atom.aromatic = true;
            Ok(Some(AtomProp::Aromaticity(true)))
        }
        'a' => {
            scanner.pop();
            if !mode.query {
                return Err(ParseError::QueryOnlyPrimitive('a'));
            }
            Ok(Some(AtomProp::Aromaticity(true)))
        }
        'r' => {
            scanner.pop();
            if !mode.query {
                return Err(ParseError::QueryOnlyPrimitive('r'));
            }
            match scanner.read_unsigned() {
                Some(n) => Ok(Some(AtomProp::SmallestRingSize(u8::try_from(n).unwrap_or(u8::MAX)))),
                None => Ok(Some(AtomProp::RingBondCount(1, 100))),
            }
        }
        'v' => {
            scanner.pop();
            if !mode.query {
                return Err(ParseError::QueryOnlyPrimitive('v'));
            }
            let n = scanner.read_unsigned().unwrap_or(1);
            Ok(Some(AtomProp::TotalBondOrder(u8::try_from(n).unwrap_or(u8::MAX))))
        }
        'x' => {
            scanner.pop();
            if !mode.query {
                return Err(ParseError::QueryOnlyPrimitive('x'));
            }
            match scanner.read_unsigned() {
                Some(n) => Ok(Some(AtomProp::RingBondCount(
                    u8::try_from(n).unwrap_or(u8::MAX),
                    u8::try_from(n).unwrap_or(u8::MAX),
                ))),
                None => Ok(Some(AtomProp::RingBondCount(1, 100))),
            }
        }
        '@' => {
            scanner.pop();
            if scanner.peek() == Some(&'@') {
                scanner.pop();
                atom.chirality = 2;
            } else {
                atom.chirality = 1;
            }
            Ok(None)
        }
        '+' | '-' => {
            let charge = read_charge_primitive(scanner);
            atom.charge = charge;
            if mode.query {
                Ok(Some(AtomProp::Charge(i8::try_from(charge).unwrap_or(0))))
            } else {
                Ok(None)
            }
        }
        ':' => {
            scanner.pop();
            let ignorable = scanner.eat('?');
            let n = scanner
                .read_unsigned()
                .ok_or_else(|| missing_character(scanner))?;
            atom.aam = n;
            atom.ignorable_aam = ignorable;
            Ok(None)
        }
        '$' if scanner.peek_second() == Some(&'(') => {
            if !mode.smarts {
                return Err(ParseError::SmartsOnlyPrimitive('$'));
            }
            scanner.skip(2);
            let mut depth = 1;
            let mut inner = String::new();
            loop {
                match scanner.pop().copied() {
                    Some('(') => {
                        depth += 1;
                        inner.push('(');
                    }
                    Some(')') => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                        inner.push(')');
                    }
                    Some(ch) => inner.push(ch),
                    None => return Err(ParseError::UnterminatedBracket),
                }
            }
            let fragment = molecule::parse_query_fragment(&inner)?;
            Ok(Some(AtomProp::Fragment(Box::new(fragment))))
        }
        'h' => Err(ParseError::HCountPrimitiveUnsupported),
        c if c.is_ascii_uppercase() => {
            if let Some(element) = try_general_element(scanner, c) {
                atom.label = i32::from(element.atomic_number());
                Ok(Some(AtomProp::AtomNumber(u16::from(element.atomic_number()))))
            } else {
                Err(missing_character(scanner))
            }
        }
        _ => Err(missing_character(scanner)),
    }
}

fn read_charge_primitive(scanner: &mut Scanner) -> i32 {
    let sign = if scanner.eat('+') {
        1
    } else {
        scanner.pop();
        -1
    };

    if let Some(n) = scanner.read_unsigned() {
        return sign * i32::try_from(n).unwrap_or(0);
    }

    let repeat_char = if sign > 0 { '+' } else { '-' };
    let mut magnitude = 1;
    while scanner.eat(repeat_char) {
        magnitude += 1;
    }
    sign * magnitude
}
