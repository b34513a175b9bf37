//! Pointer interaction phases tracked by the app
//!
//! These are recorded for display only; no transition triggers a tile swap.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwipingState {
    #[default]
    NotSwiping,
    MouseDown,
    Swiping,
}

/// What happened to the pointer since the last transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeSignal {
    PointerDown,
    Swiping,
    Released,
}

impl SwipingState {
    pub fn transition(self, signal: SwipeSignal) -> Self {
        match (self, signal) {
            (_, SwipeSignal::PointerDown) => SwipingState::MouseDown,
            (SwipingState::MouseDown, SwipeSignal::Swiping) => SwipingState::Swiping,
            (_, SwipeSignal::Released) => SwipingState::NotSwiping,
            (state, _) => state,
        }
    }
}

impl fmt::Display for SwipingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SwipingState::NotSwiping => "NOT_SWIPING",
            SwipingState::MouseDown => "MOUSE_DOWN",
            SwipingState::Swiping => "SWIPING",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let state = SwipingState::default()
            .transition(SwipeSignal::PointerDown)
            .transition(SwipeSignal::Swiping);
        assert_eq!(state, SwipingState::Swiping);
        assert_eq!(state.transition(SwipeSignal::Released), SwipingState::NotSwiping);
    }

    #[test]
    fn test_ignored_signals_keep_state() {
        assert_eq!(
            SwipingState::NotSwiping.transition(SwipeSignal::Swiping),
            SwipingState::NotSwiping
        );
        assert_eq!(
            SwipingState::MouseDown.transition(SwipeSignal::Released),
            SwipingState::NotSwiping
        );
    }

    #[test]
    fn test_press_after_lost_release_starts_over() {
        // a release outside the terminal never arrives
        assert_eq!(
            SwipingState::Swiping.transition(SwipeSignal::PointerDown),
            SwipingState::MouseDown
        );
        assert_eq!(
            SwipingState::MouseDown.transition(SwipeSignal::PointerDown),
            SwipingState::MouseDown
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(SwipingState::MouseDown.to_string(), "MOUSE_DOWN");
    }
}
