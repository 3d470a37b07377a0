use thiserror::Error;

/// Every failure the scanner-driven reader can raise while walking the
/// SMILES/SMARTS grammar (lexical/structural/semantic/mode errors).
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of input")]
    EndOfLine,
    #[error("unexpected character at {0}")]
    Character(usize),
    #[error("unclosed bracket atom expression")]
    UnterminatedBracket,
    #[error("'%' ring number must be followed by exactly two digits")]
    BadRingDigits(usize),
    #[error("')' without matching '('")]
    UnmatchedParen(usize),
    #[error("'(' is not valid here")]
    MisplacedParen(usize),
    #[error("cycle {0} not closed")]
    UnclosedRing(u8),
    #[error("polymer brace not closed")]
    UnclosedPolymer,
    #[error("two element labels for one atom")]
    DuplicateElement(usize),
    #[error("unrecognized lowercase symbol: {0}")]
    UnrecognizedLowercase(char),
    #[error("'h' specifier is not supported")]
    HCountPrimitiveUnsupported,
    #[error("'{0}' specifier is allowed only for query molecules")]
    QueryOnlyPrimitive(char),
    #[error("'{0}' is allowed only within SMARTS queries")]
    SmartsOnlyPrimitive(char),
    #[error("component grouping cannot nest inside SMARTS")]
    NestedComponentGroup,
    #[error("ring repeating units are not supported")]
    RingRepeatingUnitUnsupported,
    #[error("atom label block does not match atom count")]
    LabelCountMismatch,
    #[error("unsupported radical number: {0}")]
    UnsupportedRadical(u32),
    #[error("ring bond {0} closure does not match its opening bond")]
    RingBondMismatch(u8),
    #[error("extended-tail block references atom {0}, which does not exist")]
    TailAtomOutOfRange(u32),
    #[error("malformed extended-tail block")]
    MalformedTail,
    #[error("malformed CurlySMILES block")]
    MalformedPolymerBlock,
}
