/// Which kind of CurlySMILES S-group §4.8 materialized: a repeating unit
/// (an open-ended, head-to-tail polymer) or a multiple group with a known
/// literal multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SgroupKind {
    RepeatingUnit,
    MultipleGroup(u32),
}

/// A placeholder bracket corner pair. This crate has no 2D-depiction layer
/// (§1 Non-goals), so brackets are allocated with default positions for
/// whatever external renderer lays the structure out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bracket {
    pub corner_a: (f64, f64),
    pub corner_b: (f64, f64),
}

/// A materialized repeating-unit or multiple-group S-group (§4.8).
#[derive(Debug, Clone)]
pub struct Sgroup {
    pub kind: SgroupKind,
    pub atoms: Vec<usize>,
    pub bonds: Vec<usize>,
    /// The bond touching `start`, once normalized so that a single
    /// dangling boundary bond is always `start_bond` rather than `end_bond`.
    pub start_bond: Option<usize>,
    pub end_bond: Option<usize>,
    pub brackets: [Bracket; 2],
}
