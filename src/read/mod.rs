mod atom_desc;
mod atom_expr;
mod bond_desc;
mod bond_expr;
mod curly;
pub(crate) mod error;
mod missing_character;
mod molecule;
mod scanner;
mod state;
mod tail;

pub use atom_desc::{AtomDesc, R_SITE_LABEL};
pub use bond_desc::{BondDesc, BondDir, BondOrder, Topology};
pub use error::ParseError;
pub use molecule::{parse, parse_with_options, Parsed};
pub use scanner::Scanner;
pub use state::{ParseState, RingSlot};
pub use tail::read_tail;

/// Which dialect the reader is currently parsing in. Threaded by value
/// (mirroring how the teacher passes small `Copy` types like `Rnum` rather
/// than relying on globals) through every reader function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseMode {
    /// SMARTS enables `$(...)`, `#<n>`, implicit single-or-aromatic bonds,
    /// and top-level component grouping.
    pub smarts: bool,
    /// Query mode (SMARTS, or a plain query molecule) permits query-only
    /// primitives (`R`, `a`, `r`, `v`, `x`, bare `X`, `:?`) and builds
    /// `AtomExpr`/`BondExpr` trees alongside the `AtomDesc`/`BondDesc`.
    pub query: bool,
}

impl ParseMode {
    pub const fn molecule() -> Self {
        Self {
            smarts: false,
            query: false,
        }
    }

    pub const fn query_molecule() -> Self {
        Self {
            smarts: false,
            query: true,
        }
    }

    pub const fn smarts() -> Self {
        Self {
            smarts: true,
            query: true,
        }
    }
}
