use mendeleev::Element;

/// Maps a one- or two-letter element symbol (as it appears inside a
/// bracket atom) to the periodic-table entry, case-sensitively.
pub fn element_from_symbol(symbol: &str) -> Option<Element> {
    Some(match symbol {
        "H" => Element::H,
        "He" => Element::He,
        "Li" => Element::Li,
        "Be" => Element::Be,
        "B" => Element::B,
        "C" => Element::C,
        "N" => Element::N,
        "O" => Element::O,
        "F" => Element::F,
        "Ne" => Element::Ne,
        "Na" => Element::Na,
        "Mg" => Element::Mg,
        "Al" => Element::Al,
        "Si" => Element::Si,
        "P" => Element::P,
        "S" => Element::S,
        "Cl" => Element::Cl,
        "Ar" => Element::Ar,
        "K" => Element::K,
        "Ca" => Element::Ca,
        "Sc" => Element::Sc,
        "Ti" => Element::Ti,
        "V" => Element::V,
        "Cr" => Element::Cr,
        "Mn" => Element::Mn,
        "Fe" => Element::Fe,
        "Co" => Element::Co,
        "Ni" => Element::Ni,
        "Cu" => Element::Cu,
        "Zn" => Element::Zn,
        "Ga" => Element::Ga,
        "Ge" => Element::Ge,
        "As" => Element::As,
        "Se" => Element::Se,
        "Br" => Element::Br,
        "Kr" => Element::Kr,
        "Rb" => Element::Rb,
        "Sr" => Element::Sr,
        "Y" => Element::Y,
        "Zr" => Element::Zr,
        "Nb" => Element::Nb,
        "Mo" => Element::Mo,
        "Tc" => Element::Tc,
        "Ru" => Element::Ru,
        "Rh" => Element::Rh,
        "Pd" => Element::Pd,
        "Ag" => Element::Ag,
        "Cd" => Element::Cd,
        "In" => Element::In,
        "Sn" => Element::Sn,
        "Sb" => Element::Sb,
        "Te" => Element::Te,
        "I" => Element::I,
        "Xe" => Element::Xe,
        "Cs" => Element::Cs,
        "Ba" => Element::Ba,
        "La" => Element::La,
        "Ce" => Element::Ce,
        "Pr" => Element::Pr,
        "Nd" => Element::Nd,
        "Pm" => Element::Pm,
        "Sm" => Element::Sm,
        "Eu" => Element::Eu,
        "Gd" => Element::Gd,
        "Tb" => Element::Tb,
        "Dy" => Element::Dy,
        "Ho" => Element::Ho,
        "Er" => Element::Er,
        "Tm" => Element::Tm,
        "Yb" => Element::Yb,
        "Lu" => Element::Lu,
        "Hf" => Element::Hf,
        "Ta" => Element::Ta,
        "W" => Element::W,
        "Re" => Element::Re,
        "Os" => Element::Os,
        "Ir" => Element::Ir,
        "Pt" => Element::Pt,
        "Au" => Element::Au,
        "Hg" => Element::Hg,
        "Tl" => Element::Tl,
        "Pb" => Element::Pb,
        "Bi" => Element::Bi,
        "Po" => Element::Po,
        "At" => Element::At,
        "Rn" => Element::Rn,
        "Fr" => Element::Fr,
        "Ra" => Element::Ra,
        "Ac" => Element::Ac,
        "Th" => Element::Th,
        "Pa" => Element::Pa,
        "U" => Element::U,
        "Np" => Element::Np,
        "Pu" => Element::Pu,
        "Am" => Element::Am,
        "Cm" => Element::Cm,
        "Bk" => Element::Bk,
        "Cf" => Element::Cf,
        "Es" => Element::Es,
        "Fm" => Element::Fm,
        "Md" => Element::Md,
        "No" => Element::No,
        "Lr" => Element::Lr,
        "Rf" => Element::Rf,
        "Db" => Element::Db,
        "Sg" => Element::Sg,
        "Bh" => Element::Bh,
        "Hs" => Element::Hs,
        "Mt" => Element::Mt,
        "Ds" => Element::Ds,
        "Rg" => Element::Rg,
        "Cn" => Element::Cn,
        "Nh" => Element::Nh,
        "Fl" => Element::Fl,
        "Mc" => Element::Mc,
        "Lv" => Element::Lv,
        "Ts" => Element::Ts,
        "Og" => Element::Og,
        _ => return None,
    })
}

/// The organic-subset elements recognized bare (outside brackets): the
/// single-letter set plus the two two-letter halogens `Cl`/`Br`.
pub fn organic_subset_symbol(symbol: &str) -> Option<Element> {
    match symbol {
        "B" | "C" | "N" | "O" | "P" | "S" | "F" | "Cl" | "Br" | "I" => element_from_symbol(symbol),
        _ => None,
    }
}

/// Atomic numbers 1..=118, in order, for reversing `AtomDesc.label` back to
/// an [`Element`] when materializing the external molecule graph.
static ELEMENTS_BY_NUMBER: [Element; 118] = [
    Element::H,
    Element::He,
    Element::Li,
    Element::Be,
    Element::B,
    Element::C,
    Element::N,
    Element::O,
    Element::F,
    Element::Ne,
    Element::Na,
    Element::Mg,
    Element::Al,
    Element::Si,
    Element::P,
    Element::S,
    Element::Cl,
    Element::Ar,
    Element::K,
    Element::Ca,
    Element::Sc,
    Element::Ti,
    Element::V,
    Element::Cr,
    Element::Mn,
    Element::Fe,
    Element::Co,
    Element::Ni,
    Element::Cu,
    Element::Zn,
    Element::Ga,
    Element::Ge,
    Element::As,
    Element::Se,
    Element::Br,
    Element::Kr,
    Element::Rb,
    Element::Sr,
    Element::Y,
    Element::Zr,
    Element::Nb,
    Element::Mo,
    Element::Tc,
    Element::Ru,
    Element::Rh,
    Element::Pd,
    Element::Ag,
    Element::Cd,
    Element::In,
    Element::Sn,
    Element::Sb,
    Element::Te,
    Element::I,
    Element::Xe,
    Element::Cs,
    Element::Ba,
    Element::La,
    Element::Ce,
    Element::Pr,
    Element::Nd,
    Element::Pm,
    Element::Sm,
    Element::Eu,
    Element::Gd,
    Element::Tb,
    Element::Dy,
    Element::Ho,
    Element::Er,
    Element::Tm,
    Element::Yb,
    Element::Lu,
    Element::Hf,
    Element::Ta,
    Element::W,
    Element::Re,
    Element::Os,
    Element::Ir,
    Element::Pt,
    Element::Au,
    Element::Hg,
    Element::Tl,
    Element::Pb,
    Element::Bi,
    Element::Po,
    Element::At,
    Element::Rn,
    Element::Fr,
    Element::Ra,
    Element::Ac,
    Element::Th,
    Element::Pa,
    Element::U,
    Element::Np,
    Element::Pu,
    Element::Am,
    Element::Cm,
    Element::Bk,
    Element::Cf,
    Element::Es,
    Element::Fm,
    Element::Md,
    Element::No,
    Element::Lr,
    Element::Rf,
    Element::Db,
    Element::Sg,
    Element::Bh,
    Element::Hs,
    Element::Mt,
    Element::Ds,
    Element::Rg,
    Element::Cn,
    Element::Nh,
    Element::Fl,
    Element::Mc,
    Element::Lv,
    Element::Ts,
    Element::Og,
];

/// Maps an atomic number back to its [`Element`], the inverse of
/// `element.atomic_number()`. Used when materializing the external
/// molecule graph from an `AtomDesc.label`.
pub fn element_from_atomic_number(number: i32) -> Option<Element> {
    u8::try_from(number)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| ELEMENTS_BY_NUMBER.get(usize::from(idx)))
        .copied()
}

static BORON_TARGET: [u8; 1] = [3];
static CARBON_TARGET: [u8; 1] = [4];
static NITROGEN_TARGET: [u8; 2] = [3, 5];
static OXYGEN_TARGET: [u8; 1] = [2];
static HALOGEN_TARGET: [u8; 1] = [1];
static PHOSPHOROUS_TARGET: [u8; 2] = [3, 5];
static SULFUR_TARGET: [u8; 3] = [2, 4, 6];
static EMPTY_TARGET: [u8; 0] = [];

/// The organic-subset valence targets (§4.6): the ascending list of "normal"
/// valences for an uncharged atom of `element`. The hydrogen/radical
/// finalizer picks the first target at or above the atom's current bond
/// order sum and fills the remainder with implicit hydrogens.
pub fn organic_subset_targets(element: Element) -> &'static [u8] {
    match element {
        Element::B => &BORON_TARGET,
        Element::C => &CARBON_TARGET,
        Element::N => &NITROGEN_TARGET,
        Element::O => &OXYGEN_TARGET,
        Element::F | Element::Cl | Element::Br | Element::I => &HALOGEN_TARGET,
        Element::P => &PHOSPHOROUS_TARGET,
        Element::S => &SULFUR_TARGET,
        _ => &EMPTY_TARGET,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn carbon_targets_four() {
        assert_eq!(organic_subset_targets(Element::C), &[4]);
    }

    #[test]
    fn nitrogen_targets_three_or_five() {
        assert_eq!(organic_subset_targets(Element::N), &[3, 5]);
    }

    #[test]
    fn noble_gas_has_no_targets() {
        assert_eq!(organic_subset_targets(Element::Ne), &[] as &[u8]);
    }

    #[test]
    fn organic_subset_symbol_accepts_two_letter_halogens() {
        assert!(organic_subset_symbol("Cl").is_some());
        assert!(organic_subset_symbol("Br").is_some());
        assert!(organic_subset_symbol("Si").is_none());
    }

    #[test]
    fn element_from_atomic_number_round_trips() {
        assert_eq!(element_from_atomic_number(6), Some(Element::C));
        assert_eq!(element_from_atomic_number(53), Some(Element::I));
        assert_eq!(element_from_atomic_number(0), None);
        assert_eq!(element_from_atomic_number(119), None);
    }
}
