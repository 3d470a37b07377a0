//! A loader for the [Simplified Molecular Line Input Line Entry System](https://en.wikipedia.org/wiki/Simplified_molecular-input_line-entry_system)
//! (SMILES) language and its SMARTS and CurlySMILES extensions. Based on
//! [OpenSMILES](http://opensmiles.org).
//!
//! [`load_molecule`] reads a plain SMILES string into a [`graph::Molecule`].
//! [`load_query_molecule`] and [`load_smarts`] additionally accept the
//! query-only primitives of [`feature::AtomExpr`]/[`feature::BondExpr`], the
//! latter in full SMARTS syntax. A molecule's stereocenters, cis/trans
//! parities, and CurlySMILES polymer S-groups are all resolved as part of
//! the load.

/// Atom/bond query-expression trees shared by query molecules and SMARTS.
pub mod feature;
/// Post-parse semantic passes: aromaticity, implicit hydrogens, stereo,
/// polymer S-groups.
mod finalize;
/// The external molecule graph this crate's loader builds into.
pub mod graph;
/// Reading SMILES/SMARTS/CurlySMILES text into atom/bond descriptions.
pub mod read;
/// SSSR (smallest set of smallest rings) over a generic edge list.
mod sssr;

mod error;
mod loader;

pub use error::Error;
pub use loader::{load_molecule, load_query_molecule, load_smarts, LoaderOptions};
pub use mendeleev::Element;
pub use mendeleev::Isotope;

mod doctests {
    #[cfg(doctest)]
    #[doc = include_str!("../README.md")]
    struct _ReadMe;
}
