/// Tetrahedral parity of a registered [`Stereocenter`], after the
/// renormalization of §4.7 steps 3-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Clockwise,
    CounterClockwise,
}

/// Which stereo group a center belongs to, set either by the default ABS
/// registration (§4.7 step 6) or overridden by the extended-tail block
/// (§4.4: `a:`, `o<gid>:`, `&<gid>:`, `w:`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StereoGroup {
    Abs,
    Or(u32),
    And(u32),
    /// `w:` — an explicitly unspecified ("wiggly") stereocenter.
    Any,
}

/// A tetrahedral stereocenter: the four-slot neighbor pyramid built by
/// §4.7, plus its parity and group membership.
#[derive(Debug, Clone)]
pub struct Stereocenter {
    /// Neighbor atom indices in canonical pyramid order. `None` marks the
    /// slot taken by an implicit hydrogen rather than a real neighbor.
    pub pyramid: [Option<usize>; 4],
    pub parity: Parity,
    pub group: StereoGroup,
}

/// Cis/trans parity of a double bond, derived from the `/`/`\` annotations
/// of its surrounding single bonds (§4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CisTrans {
    Cis,
    Trans,
}
