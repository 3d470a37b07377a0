/// A query property tested by an [`Expr::Leaf`].
///
/// `RingBondCount` and the smallest-ring-size primitives carry an inclusive
/// `(low, high)` range so that bare `r`/`x` (meaning "1..=100") and the
/// digited forms (`r5`, meaning an exact value) share one representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomProp {
    AtomNumber(u16),
    Isotope(u16),
    Charge(i8),
    Aromaticity(bool),
    /// `None` = member of at least one SSSR ring; `Some(n)` = member of
    /// exactly `n` SSSR rings (`R0` uses `Some(0)`).
    RingMembership(Option<u8>),
    RingBondCount(u8, u8),
    SmallestRingSize(u8),
    Connectivity(u8),
    Substituents(u8),
    TotalBondOrder(u8),
    /// Total hydrogen count (implicit + explicit), from a bracket `H<n>`
    /// primitive that is not the first token (which would instead mean
    /// "element is hydrogen").
    TotalHydrogens(u8),
    AtomAtomMap(u16),
    /// A recursive SMARTS fragment (`$(...)`), compiled as a whole
    /// sub-expression tree.
    Fragment(Box<AtomExpr>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BondProp {
    Order(u8),
    Aromatic,
    Any,
    RingTopology,
}

/// A tagged query-expression tree shared by atom and bond expressions.
/// Leaves carry a property; inner nodes combine children with AND/OR/NOT.
/// The logical splits that build these trees are left-associative during
/// parse accumulation, but the represented semantics are commutative, so
/// implementations are free to balance the tree differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr<P> {
    Leaf(P),
    And(Box<Expr<P>>, Box<Expr<P>>),
    Or(Box<Expr<P>>, Box<Expr<P>>),
    Not(Box<Expr<P>>),
}

impl<P> Expr<P> {
    pub fn and(self, other: Self) -> Self {
        Expr::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Self) -> Self {
        Expr::Or(Box::new(self), Box::new(other))
    }

    pub fn negate(self) -> Self {
        Expr::Not(Box::new(self))
    }
}

/// AND-combines `next` into an optional accumulator, returning `next`
/// unchanged if there was nothing to combine with yet. This is the
/// "implicit-and by concatenation" rule used by both primitive scanners.
pub fn and_into<P>(acc: Option<Expr<P>>, next: Expr<P>) -> Expr<P> {
    match acc {
        Some(existing) => existing.and(next),
        None => next,
    }
}

/// OR-combines `next` into an accumulator. The first child overwrites an
/// empty accumulator; later children OR in, matching the logical-split
/// semantics of §4.2/§4.3.
pub fn or_into<P>(acc: Option<Expr<P>>, next: Expr<P>) -> Expr<P> {
    match acc {
        Some(existing) => existing.or(next),
        None => next,
    }
}

pub type AtomExpr = Expr<AtomProp>;
pub type BondExpr = Expr<BondProp>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn and_into_empty_accumulator_returns_leaf() {
        let acc: Option<AtomExpr> = None;
        let leaf = Expr::Leaf(AtomProp::AtomNumber(6));

        assert_eq!(and_into(acc, leaf.clone()), leaf);
    }

    #[test]
    fn and_into_combines() {
        let acc = Some(Expr::Leaf(AtomProp::AtomNumber(6)));
        let leaf = Expr::Leaf(AtomProp::Aromaticity(true));

        assert_eq!(
            and_into(acc, leaf.clone()),
            Expr::Leaf(AtomProp::AtomNumber(6)).and(leaf)
        );
    }

    #[test]
    fn negate_wraps_in_not() {
        let leaf = Expr::Leaf(BondProp::Order(2));

        assert_eq!(leaf.clone().negate(), Expr::Not(Box::new(leaf)));
    }
}
