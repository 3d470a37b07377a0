mod atom;
mod bond;
mod error;
mod molecule;
mod sgroup;
mod stereo;

pub use atom::{Atom, Radical};
pub use bond::{Bond, BondOrder};
pub use error::LoadError;
pub use molecule::{Molecule, Ring};
pub use sgroup::{Bracket, Sgroup, SgroupKind};
pub use stereo::{CisTrans, Parity, StereoGroup, Stereocenter};
