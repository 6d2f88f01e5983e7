//! The bundle segmenter (`spec.md` §4.5): after each decoded
//! instruction, reads its stop bit and class and advances the current
//! bundle class.

use crate::tables::instructions::InstClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundlePosition {
    Short,
    Head,
    Body,
    Tail,
}

/// Tracks the class of the bundle currently in progress;
/// `InstClass::None` means no bundle is in progress (the sentinel
/// `spec.md` §3 assigns it). Reset to `None` at the start of a session
/// and whenever a stop bit is observed.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundleState {
    class: InstClass,
}

impl BundleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.class = InstClass::None;
    }

    fn in_progress(&self) -> bool {
        self.class != InstClass::None
    }

    /// The class the next decode should dispatch on (`spec.md` §4.4's
    /// "dispatcher selects which classifier runs based on the current
    /// bundle class").
    pub fn current(&self) -> InstClass {
        self.class
    }

    /// Derive this instruction's bundle position (`spec.md` §3) and
    /// advance the bundle class (`spec.md` §4.5), given whether its
    /// stop bit was set and which class it belongs to.
    pub fn advance(&mut self, stop: bool, new_class: InstClass) -> BundlePosition {
        let position = match (self.in_progress(), stop) {
            (false, true) => BundlePosition::Short,
            (false, false) => BundlePosition::Head,
            (true, true) => BundlePosition::Tail,
            (true, false) => BundlePosition::Body,
        };

        self.class = if stop {
            InstClass::None
        } else {
            match self.class {
                InstClass::None => new_class,
                InstClass::Load if new_class == InstClass::Load => {
                    // Loads cannot chain: a second load demotes the
                    // bundle to Int.
                    InstClass::Int
                }
                other => other,
            }
        };

        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_stop_instruction_is_short() {
        let mut state = BundleState::new();
        assert_eq!(state.advance(true, InstClass::Int), BundlePosition::Short);
    }

    #[test]
    fn head_then_tail() {
        let mut state = BundleState::new();
        assert_eq!(state.advance(false, InstClass::Int), BundlePosition::Head);
        assert_eq!(state.advance(true, InstClass::Int), BundlePosition::Tail);
    }

    #[test]
    fn body_appears_only_mid_bundle() {
        let mut state = BundleState::new();
        assert_eq!(state.advance(false, InstClass::Int), BundlePosition::Head);
        assert_eq!(state.advance(false, InstClass::Int), BundlePosition::Body);
        assert_eq!(state.advance(true, InstClass::Int), BundlePosition::Tail);
    }

    #[test]
    fn load_load_demotes_to_int_on_third_decode() {
        let mut state = BundleState::new();
        state.advance(false, InstClass::Load); // bundle class -> Load
        state.advance(false, InstClass::Load); // second load demotes -> Int
        // A third instruction now sees an in-progress Int bundle;
        // nothing further to demote, but the transition already
        // happened per spec.md §8 "Load-load demotion".
        let position = state.advance(true, InstClass::Int);
        assert_eq!(position, BundlePosition::Tail);
    }

    #[test]
    fn new_bundle_starts_none_after_stop() {
        let mut state = BundleState::new();
        state.advance(true, InstClass::Load);
        assert_eq!(state.advance(true, InstClass::Branch), BundlePosition::Short);
    }

    #[test]
    fn reset_clears_in_progress_bundle() {
        let mut state = BundleState::new();
        state.advance(false, InstClass::Int);
        state.reset();
        assert_eq!(state.advance(true, InstClass::Int), BundlePosition::Short);
    }

    #[test]
    fn current_tracks_the_in_progress_class_for_dispatch() {
        let mut state = BundleState::new();
        assert_eq!(state.current(), InstClass::None);
        state.advance(false, InstClass::Branch);
        assert_eq!(state.current(), InstClass::Branch);
        state.advance(true, InstClass::Branch);
        assert_eq!(state.current(), InstClass::None);
    }
}
