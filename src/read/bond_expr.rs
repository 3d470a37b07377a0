use crate::feature::{and_into, or_into, BondExpr, BondProp, Expr};
use crate::read::bond_desc::{BondDir, BondOrder, Topology};
use crate::read::error::ParseError;
use crate::read::scanner::Scanner;
use crate::read::ParseMode;

/// The set of characters a bond-qualifier run may be built from (§4.1).
const BOND_CHARS: &[char] = &['-', '=', '#', ':', '/', '\\', '~', '@', '!', ';', ',', '&', '?'];

#[derive(Debug, Clone)]
pub struct BondQualifier {
    pub order: BondOrder,
    pub dir: BondDir,
    pub topology: Topology,
    pub query: Option<BondExpr>,
}

impl BondQualifier {
    fn empty() -> Self {
        Self {
            order: BondOrder::Empty,
            dir: BondDir::None,
            topology: Topology::Any,
            query: None,
        }
    }
}

/// Reads a (possibly empty) bond-qualifier run starting at the scanner's
/// current position. An empty run outside a query is "to be resolved
/// later"; inside a query it is an explicit single-or-aromatic OR leaf.
pub fn read_bond(scanner: &mut Scanner, mode: ParseMode) -> Result<BondQualifier, ParseError> {
    let mut run = String::new();

    while let Some(&c) = scanner.peek() {
        if BOND_CHARS.contains(&c) {
            run.push(c);
            scanner.pop();
        } else {
            break;
        }
    }

    if run.is_empty() {
        let mut empty = BondQualifier::empty();

        if mode.query {
            empty.query = Some(
                Expr::Leaf(BondProp::Order(1)).or(Expr::Leaf(BondProp::Aromatic)),
            );
        }

        return Ok(empty);
    }

    parse_bond_run(&run, mode)
}

fn parse_bond_run(run: &str, mode: ParseMode) -> Result<BondQualifier, ParseError> {
    if let Some(split) = split_top_level(run, ';') {
        return combine(split, mode, true);
    }
    if let Some(split) = split_top_level(run, ',') {
        return combine(split, mode, false);
    }
    if let Some(split) = split_top_level(run, '&') {
        return combine(split, mode, true);
    }

    scan_primitives(run, mode)
}

fn split_top_level(s: &str, sep: char) -> Option<Vec<&str>> {
    if !s.contains(sep) {
        return None;
    }
    Some(s.split(sep).collect())
}

fn combine(parts: Vec<&str>, mode: ParseMode, is_and: bool) -> Result<BondQualifier, ParseError> {
    let mut merged = BondQualifier::empty();
    let mut acc: Option<BondExpr> = None;

    for part in parts {
        let qualifier = parse_bond_run(part, mode)?;

        if qualifier.order != BondOrder::Empty {
            merged.order = qualifier.order;
        }
        if qualifier.dir != BondDir::None {
            merged.dir = qualifier.dir;
        }
        if qualifier.topology != Topology::Any {
            merged.topology = qualifier.topology;
        }

        if let Some(leaf) = qualifier.query {
            acc = Some(if is_and {
                and_into(acc, leaf)
            } else {
                or_into(acc, leaf)
            });
        }
    }

    merged.query = acc;
    Ok(merged)
}

fn scan_primitives(run: &str, mode: ParseMode) -> Result<BondQualifier, ParseError> {
    let mut result = BondQualifier::empty();
    let mut acc: Option<BondExpr> = None;
    let mut negate = false;

    for c in run.chars() {
        if c == '!' {
            negate = true;
            continue;
        }

        let leaf = match c {
            '-' => {
                result.order = BondOrder::Single;
                BondProp::Order(1)
            }
            '=' => {
                result.order = BondOrder::Double;
                BondProp::Order(2)
            }
            '#' => {
                result.order = BondOrder::Triple;
                BondProp::Order(3)
            }
            ':' => {
                result.order = BondOrder::Aromatic;
                BondProp::Aromatic
            }
            '/' => {
                result.order = BondOrder::Single;
                result.dir = BondDir::Up;
                continue;
            }
            '\\' => {
                result.order = BondOrder::Single;
                result.dir = BondDir::Down;
                continue;
            }
            '~' if mode.query => {
                result.order = BondOrder::Any;
                BondProp::Any
            }
            '@' if mode.query => {
                result.topology = Topology::Ring;
                BondProp::RingTopology
            }
            '~' | '@' => return Err(ParseError::QueryOnlyPrimitive(c)),
            _ => return Err(ParseError::UnrecognizedLowercase(c)),
        };

        let leaf = if negate {
            Expr::Leaf(leaf).negate()
        } else {
            Expr::Leaf(leaf)
        };
        negate = false;

        acc = Some(and_into(acc, leaf));
    }

    result.query = mode.query.then_some(acc).flatten();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single() {
        let mut scanner = Scanner::new("-*");
        let qualifier = read_bond(&mut scanner, ParseMode::molecule()).unwrap();

        assert_eq!(qualifier.order, BondOrder::Single);
        assert!(qualifier.query.is_none());
    }

    #[test]
    fn directional_up() {
        let mut scanner = Scanner::new("/*");
        let qualifier = read_bond(&mut scanner, ParseMode::molecule()).unwrap();

        assert_eq!(qualifier.order, BondOrder::Single);
        assert_eq!(qualifier.dir, BondDir::Up);
    }

    #[test]
    fn empty_outside_query_has_no_expr() {
        let mut scanner = Scanner::new("*");
        let qualifier = read_bond(&mut scanner, ParseMode::molecule()).unwrap();

        assert_eq!(qualifier.order, BondOrder::Empty);
        assert!(qualifier.query.is_none());
    }

    #[test]
    fn empty_inside_query_is_single_or_aromatic() {
        let mut scanner = Scanner::new("*");
        let qualifier = read_bond(&mut scanner, ParseMode::smarts()).unwrap();

        assert!(qualifier.query.is_some());
    }

    #[test]
    fn tilde_requires_query_mode() {
        let mut scanner = Scanner::new("~*");

        assert_eq!(
            read_bond(&mut scanner, ParseMode::molecule()),
            Err(ParseError::QueryOnlyPrimitive('~'))
        );
    }

    #[test]
    fn logical_or_combines_orders() {
        let mut scanner = Scanner::new("-,=*");
        let qualifier = read_bond(&mut scanner, ParseMode::smarts()).unwrap();

        assert!(qualifier.query.is_some());
    }
}
