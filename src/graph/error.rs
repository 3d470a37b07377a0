use thiserror::Error;

/// Failures raised by the post-parse semantic finalizers and the
/// extended-tail reader (§7's Semantic/Stereo/Ring-closure/Radical/
/// Pseudo-atom categories), as distinct from the scanner-driven
/// [`crate::read::ParseError`].
#[derive(Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("atom {0} is declared chiral but has {1} neighbors, not 3 or 4")]
    WrongNeighborCountForChirality(usize, usize),
    #[error("atom {0}'s neighbor list did not finish resolving before stereo finalization")]
    UnresolvedNeighborForChirality(usize),
    #[error("atom {0} is declared chiral but is not a possible stereocenter")]
    NotAPossibleStereocenter(usize),
    #[error("extended-tail block references atom {0}, which is not a stereocenter")]
    NotAStereocenter(u32),
    #[error("unsupported radical number: {0}")]
    UnsupportedRadical(u32),
    #[error("extended-tail block references atom {0}, which does not exist")]
    TailAtomOutOfRange(u32),
    #[error("pseudo-atom label count does not match atom count")]
    LabelCountMismatch,
    #[error("polymer block {0} has no starting atom")]
    PolymerMissingStart(usize),
    #[error("polymer block {0} has no ending atom")]
    PolymerMissingEnd(usize),
    #[error("polymer block {0} has a bond straddling the boundary that is neither start nor end")]
    PolymerInternalBoundaryBond(usize),
    #[error("malformed extended-tail block")]
    MalformedTail,
    #[error("malformed CurlySMILES block")]
    MalformedPolymerBlock,
}
