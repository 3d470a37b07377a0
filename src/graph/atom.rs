use mendeleev::Element;

use crate::feature::AtomExpr;

/// Unpaired-electron state recorded by the extended-tail `^<k>:` block
/// (§4.4). `None` is the default for every atom built directly from the
/// main parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Radical {
    #[default]
    None,
    Doublet,
    Singlet,
    Triplet,
}

/// One atom in the external molecule graph, as materialized by
/// [`crate::load_molecule`]/[`crate::load_query_molecule`]/[`crate::load_smarts`]
/// from the parsed [`crate::read::AtomDesc`] list.
#[derive(Debug, Clone)]
pub struct Atom {
    /// `None` for a pure query atom with no element constraint, or for an
    /// R-site / removed attachment-point placeholder.
    pub element: Option<Element>,
    pub is_r_site: bool,
    /// R-group number, set by an `_R<n>` pseudo-atom label or (outside
    /// RSMILES mode) by the `*`-plus-atom-map convention (§9).
    pub r_group: Option<u32>,
    pub isotope: u32,
    pub charge: i32,
    pub aromatic: bool,
    pub hydrogens: u8,
    pub radical: Radical,
    /// 0 = none, 1 = `@`, 2 = `@@`; consumed by the stereo finalizer and
    /// left as parsed otherwise.
    pub chirality: u8,
    pub aam: u32,
    pub ignorable_aam: bool,
    pub query: Option<AtomExpr>,
    /// Free-form pseudo-atom label from an extended-tail `$...$` block.
    pub pseudo_label: Option<String>,
    /// Attachment-point numbers recorded when a neighboring `_AP<n>` atom
    /// was removed (§4.4).
    pub attachment_points: Vec<u32>,
    pub highlighted: bool,
    /// Adjacent atom indices, in the order bonds were added.
    pub neighbors: Vec<usize>,
}

impl Atom {
    pub fn new(element: Option<Element>) -> Self {
        Self {
            element,
            is_r_site: false,
            r_group: None,
            isotope: 0,
            charge: 0,
            aromatic: false,
            hydrogens: 0,
            radical: Radical::None,
            chirality: 0,
            aam: 0,
            ignorable_aam: false,
            query: None,
            pseudo_label: None,
            attachment_points: Vec::new(),
            highlighted: false,
            neighbors: Vec::new(),
        }
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}
