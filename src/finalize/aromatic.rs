use crate::feature::{BondProp, Expr};
use crate::read::{AtomDesc, BondDesc, BondOrder, ParseMode};
use crate::sssr;

/// Resolves "empty" bond qualifiers against the SSSR basis of the parsed
/// atom/bond lists (§4.5): a cycle qualifies if every atom in it carries
/// the aromatic flag and every bond in it is AROMATIC or empty, in which
/// case its empty bonds are promoted to AROMATIC. Any empty bond left over
/// once every cycle has been considered becomes SINGLE.
///
/// Full SMARTS mode (`mode.smarts`) skips this pass entirely — a SMARTS
/// bond's query expression already encodes aromaticity explicitly. Plain
/// query-molecule mode (`mode.query && !mode.smarts`) still runs it, ANDing
/// a `BondProp::Aromatic` leaf onto any promoted bond's query expression.
pub(crate) fn mark_aromatic_bonds(atoms: &[AtomDesc], bonds: &mut [BondDesc], mode: ParseMode) {
    if !mode.smarts {
        let edges: Vec<(usize, usize)> = bonds
            .iter()
            .filter_map(|bond| bond.end.map(|end| (bond.beg, end)))
            .collect();
        let rings = sssr::compute(atoms.len(), &edges);

        for ring in rings {
            let qualifies = ring.iter().all(|&edge| {
                let (beg, end) = edges[edge];
                atoms[beg].aromatic
                    && atoms[end].aromatic
                    && matches!(bonds[edge].order, BondOrder::Aromatic | BondOrder::Empty)
            });

            if !qualifies {
                continue;
            }

            for &edge in &ring {
                if bonds[edge].order != BondOrder::Empty {
                    continue;
                }
                bonds[edge].order = BondOrder::Aromatic;
                if mode.query {
                    let aromatic = Expr::Leaf(BondProp::Aromatic);
                    bonds[edge].query = Some(match bonds[edge].query.take() {
                        Some(existing) => existing.and(aromatic),
                        None => aromatic,
                    });
                }
            }
        }
    }

    // Every empty qualifier must resolve to a concrete order before the
    // external molecule is built (`graph::BondOrder` has no `Empty`
    // variant): non-SMARTS empties fall back to SINGLE per §4.5; in full
    // SMARTS mode the real constraint lives in the bond's query expression
    // (a "single or aromatic" OR leaf), so ANY is the honest placeholder.
    for bond in bonds.iter_mut() {
        if bond.order == BondOrder::Empty {
            bond.order = if mode.smarts { BondOrder::Any } else { BondOrder::Single };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn benzene_bonds_all_become_aromatic() {
        let mut parsed = parse("c1ccccc1", ParseMode::molecule()).unwrap();

        mark_aromatic_bonds(&parsed.atoms, &mut parsed.bonds, ParseMode::molecule());

        assert!(parsed.bonds.iter().all(|b| b.order == BondOrder::Aromatic));
    }

    #[test]
    fn an_aliphatic_ring_does_not_get_marked_aromatic() {
        let mut parsed = parse("C1CCCCC1", ParseMode::molecule()).unwrap();

        mark_aromatic_bonds(&parsed.atoms, &mut parsed.bonds, ParseMode::molecule());

        assert!(parsed.bonds.iter().all(|b| b.order == BondOrder::Single));
    }

    #[test]
    fn pending_bond_closure_keeps_alternating_orders() {
        let mut parsed = parse("C=1C=CC=CC=1", ParseMode::molecule()).unwrap();

        mark_aromatic_bonds(&parsed.atoms, &mut parsed.bonds, ParseMode::molecule());

        assert!(parsed.bonds.iter().any(|b| b.order == BondOrder::Double));
        assert!(!parsed.bonds.iter().any(|b| b.order == BondOrder::Aromatic));
    }

    #[test]
    fn smarts_mode_skips_sssr_promotion_and_falls_back_to_any() {
        let mut parsed = parse("c1ccccc1", ParseMode::smarts()).unwrap();

        mark_aromatic_bonds(&parsed.atoms, &mut parsed.bonds, ParseMode::smarts());

        assert!(parsed.bonds.iter().all(|b| b.order == BondOrder::Any));
    }
}
