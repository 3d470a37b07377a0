//! The fixed post-parse pipeline (§2/§4.5-§4.8): once [`crate::read::parse`]
//! has produced a [`crate::read::Parsed`], these passes run in order —
//! aromatic marking and implicit-hydrogen inference on the intermediate,
//! then (after the external [`crate::graph::Molecule`] is built) stereo and
//! polymer finalization on the graph itself.

mod aromatic;
mod build;
mod hydrogen;
mod polymer;
mod stereo;

pub(crate) use aromatic::mark_aromatic_bonds;
pub(crate) use build::build_molecule;
pub(crate) use hydrogen::fill_implicit_hydrogens;
pub(crate) use polymer::materialize_polymers;
pub(crate) use stereo::{assign_cis_trans, build_stereocenters};
