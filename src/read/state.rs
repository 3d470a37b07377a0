/// A ring-closure slot: either empty, or "open at `atom`", optionally with a
/// bond-qualifier string captured at the opening that must be re-matched
/// (by exact string equality, with `/`/`\` normalized to `-`) on closure.
#[derive(Debug, Clone)]
pub struct RingSlot {
    pub atom: usize,
    pub pending_bond: Option<String>,
}

/// Parser-wide bookkeeping threaded through the main loop. Indexed ring
/// slots (0..=99) are a dense array rather than a hash map so that a
/// reopened slot behaves identically to a fresh one, per the "closed slot
/// may be reopened" invariant.
pub struct ParseState {
    pub atom_stack: Vec<usize>,
    pub cycles: [Option<RingSlot>; 100],
    pub polymer_repetitions: Vec<u32>,
    pub balance: i32,
    pub current_compno: u32,
    pub inside_smarts_component: bool,
    /// Set while a `{-}`...`{+...}` polymer block is open; every atom
    /// created in between is stamped with the current `polymer_repetitions`
    /// entry's index (§4.1 CurlySMILES).
    pub inside_polymer: bool,
    /// Downgrades a closing ring bond's qualifier mismatch against its
    /// opening to a silent acceptance instead of a `RingBondMismatch` error.
    pub ignore_closing_bond_direction_mismatch: bool,
}

impl ParseState {
    pub fn new() -> Self {
        Self {
            atom_stack: Vec::new(),
            cycles: std::array::from_fn(|_| None),
            polymer_repetitions: Vec::new(),
            balance: 0,
            current_compno: 0,
            inside_smarts_component: false,
            inside_polymer: false,
            ignore_closing_bond_direction_mismatch: false,
        }
    }

    pub fn open_cycle(&mut self, number: u8, atom: usize, pending_bond: Option<String>) {
        self.cycles[usize::from(number)] = Some(RingSlot { atom, pending_bond });
    }

    pub fn take_cycle(&mut self, number: u8) -> Option<RingSlot> {
        self.cycles[usize::from(number)].take()
    }

    /// Ring numbers still open at end of input; each is a "cycle n not
    /// closed" error.
    pub fn unclosed_cycles(&self) -> Vec<u8> {
        self.cycles
            .iter()
            .enumerate()
            .filter_map(|(n, slot)| slot.is_some().then(|| u8::try_from(n).expect("n < 100")))
            .collect()
    }
}

impl Default for ParseState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn open_then_take_round_trips() {
        let mut state = ParseState::new();

        state.open_cycle(1, 4, None);

        let slot = state.take_cycle(1).unwrap();
        assert_eq!(slot.atom, 4);
        assert!(state.cycles[1].is_none());
    }

    #[test]
    fn reopening_a_closed_slot_is_allowed() {
        let mut state = ParseState::new();

        state.open_cycle(2, 0, None);
        state.take_cycle(2);
        state.open_cycle(2, 9, Some("=".to_string()));

        let slot = state.cycles[2].as_ref().unwrap();
        assert_eq!(slot.atom, 9);
        assert_eq!(slot.pending_bond.as_deref(), Some("="));
    }

    #[test]
    fn unclosed_cycles_lists_open_slots() {
        let mut state = ParseState::new();

        state.open_cycle(3, 0, None);
        state.open_cycle(7, 1, None);

        assert_eq!(state.unclosed_cycles(), vec![3, 7]);
    }
}
