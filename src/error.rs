use thiserror::Error;

use crate::graph::LoadError;
use crate::read::ParseError;

/// Every way [`crate::load_molecule`]/[`crate::load_query_molecule`]/
/// [`crate::load_smarts`] can fail: a lexical/structural failure while
/// scanning, or a semantic failure in one of the post-parse finalizers.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Load(#[from] LoadError),
}
