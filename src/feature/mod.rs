mod element_ext;
mod expr;

pub use element_ext::{
    element_from_atomic_number, element_from_symbol, organic_subset_symbol, organic_subset_targets,
};
pub use expr::{and_into, or_into, AtomExpr, AtomProp, BondExpr, BondProp, Expr};
pub use mendeleev::Element;
