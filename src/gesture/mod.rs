//! Swipe recognition over pointer input
//!
//! Modelled on the usual web swipe helpers: a pointer press starts tracking,
//! movement past `delta` cells turns into a swipe that reports every move,
//! and releasing a swipe reports it once more together with its direction.

pub mod state;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

pub use state::{SwipeSignal, SwipingState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    pub track_mouse: bool,
    pub track_touch: bool,
    /// Minimum distance in cells before a drag counts as a swipe
    pub delta: u16,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            track_mouse: true,
            track_touch: true,
            delta: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerInput {
    pub kind: PointerKind,
    pub phase: PointerPhase,
    pub x: u16,
    pub y: u16,
    pub at: Instant,
}

impl PointerInput {
    /// Translate a terminal mouse event. Only the left button takes part in
    /// gestures.
    pub fn from_mouse(event: MouseEvent, at: Instant) -> Option<Self> {
        let phase = match event.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerPhase::Down,
            MouseEventKind::Drag(MouseButton::Left) => PointerPhase::Move,
            MouseEventKind::Up(MouseButton::Left) => PointerPhase::Up,
            _ => return None,
        };
        Some(Self {
            kind: PointerKind::Mouse,
            phase,
            x: event.column,
            y: event.row,
            at,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    fn classify(delta_x: i32, delta_y: i32) -> Self {
        if delta_x.abs() > delta_y.abs() {
            if delta_x > 0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            }
        } else if delta_y > 0 {
            SwipeDirection::Down
        } else {
            SwipeDirection::Up
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeEventData {
    pub kind: PointerKind,
    pub initial: (u16, u16),
    /// Set on the first `Swiping` report of a gesture
    pub first: bool,
    pub delta_x: i32,
    pub delta_y: i32,
    pub abs_x: u32,
    pub abs_y: u32,
    /// Cells per millisecond
    pub velocity: f64,
    pub direction: SwipeDirection,
}

impl fmt::Display for SwipeEventData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} from ({}, {}) dx={} dy={} v={:.3}{}",
            self.direction,
            self.initial.0,
            self.initial.1,
            self.delta_x,
            self.delta_y,
            self.velocity,
            if self.first { " first" } else { "" },
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Swiping(SwipeEventData),
    Swiped(SwipeEventData),
    SwipedLeft(SwipeEventData),
    SwipedRight(SwipeEventData),
    SwipedUp(SwipeEventData),
    SwipedDown(SwipeEventData),
}

impl Gesture {
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Swiping(_) => "swiping",
            Gesture::Swiped(_) => "swiped",
            Gesture::SwipedLeft(_) => "left",
            Gesture::SwipedRight(_) => "right",
            Gesture::SwipedUp(_) => "up",
            Gesture::SwipedDown(_) => "down",
        }
    }

    pub fn data(&self) -> &SwipeEventData {
        match self {
            Gesture::Swiping(data)
            | Gesture::Swiped(data)
            | Gesture::SwipedLeft(data)
            | Gesture::SwipedRight(data)
            | Gesture::SwipedUp(data)
            | Gesture::SwipedDown(data) => data,
        }
    }

    fn directional(data: SwipeEventData) -> Self {
        match data.direction {
            SwipeDirection::Left => Gesture::SwipedLeft(data),
            SwipeDirection::Right => Gesture::SwipedRight(data),
            SwipeDirection::Up => Gesture::SwipedUp(data),
            SwipeDirection::Down => Gesture::SwipedDown(data),
        }
    }
}

#[derive(Debug, Clone)]
struct Tracking {
    kind: PointerKind,
    initial: (u16, u16),
    started: Instant,
    last: Option<SwipeEventData>,
}

/// Swipe recognizer attached to the root of the screen
#[derive(Debug, Clone, Default)]
pub struct Swipeable {
    config: SwipeConfig,
    tracking: Option<Tracking>,
}

impl Swipeable {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            tracking: None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    fn tracks(&self, kind: PointerKind) -> bool {
        match kind {
            PointerKind::Mouse => self.config.track_mouse,
            PointerKind::Touch => self.config.track_touch,
        }
    }

    /// Feed one pointer input, returning the gestures it completes
    pub fn handle(&mut self, input: PointerInput) -> Vec<Gesture> {
        if !self.tracks(input.kind) {
            return Vec::new();
        }

        match input.phase {
            PointerPhase::Down => {
                self.tracking = Some(Tracking {
                    kind: input.kind,
                    initial: (input.x, input.y),
                    started: input.at,
                    last: None,
                });
                Vec::new()
            }
            PointerPhase::Move => self.on_move(input).into_iter().collect(),
            PointerPhase::Up => self.on_up(input),
        }
    }

    fn on_move(&mut self, input: PointerInput) -> Option<Gesture> {
        let delta = u32::from(self.config.delta);
        let tracking = self.tracking.as_mut().filter(|t| t.kind == input.kind)?;

        let delta_x = i32::from(input.x) - i32::from(tracking.initial.0);
        let delta_y = i32::from(input.y) - i32::from(tracking.initial.1);
        let abs_x = delta_x.unsigned_abs();
        let abs_y = delta_y.unsigned_abs();

        let swiping = tracking.last.is_some();
        if !swiping && abs_x < delta && abs_y < delta {
            return None;
        }

        let elapsed_ms = input.at.saturating_duration_since(tracking.started).as_millis();
        let distance = f64::from(abs_x).hypot(f64::from(abs_y));
        let data = SwipeEventData {
            kind: input.kind,
            initial: tracking.initial,
            first: !swiping,
            delta_x,
            delta_y,
            abs_x,
            abs_y,
            velocity: distance / elapsed_ms.max(1) as f64,
            direction: SwipeDirection::classify(delta_x, delta_y),
        };
        tracking.last = Some(data);
        Some(Gesture::Swiping(data))
    }

    fn on_up(&mut self, input: PointerInput) -> Vec<Gesture> {
        match self.tracking.take() {
            Some(Tracking {
                kind,
                last: Some(data),
                ..
            }) if kind == input.kind => vec![Gesture::Swiped(data), Gesture::directional(data)],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct Pointer {
        start: Instant,
        kind: PointerKind,
    }

    impl Pointer {
        fn mouse() -> Self {
            Self {
                start: Instant::now(),
                kind: PointerKind::Mouse,
            }
        }

        fn touch() -> Self {
            Self {
                kind: PointerKind::Touch,
                ..Self::mouse()
            }
        }

        fn input(&self, phase: PointerPhase, x: u16, y: u16, ms: u64) -> PointerInput {
            PointerInput {
                kind: self.kind,
                phase,
                x,
                y,
                at: self.start + Duration::from_millis(ms),
            }
        }
    }

    #[test]
    fn test_small_moves_are_not_swipes() {
        let mut swipeable = Swipeable::new(SwipeConfig::default());
        let p = Pointer::mouse();

        assert!(swipeable.handle(p.input(PointerPhase::Down, 10, 10, 0)).is_empty());
        assert!(swipeable.handle(p.input(PointerPhase::Move, 11, 11, 10)).is_empty());
        assert!(swipeable.handle(p.input(PointerPhase::Up, 11, 11, 20)).is_empty());
        assert!(!swipeable.is_tracking());
    }

    #[test]
    fn test_swiping_reports_first_then_follow_ups() {
        let mut swipeable = Swipeable::new(SwipeConfig::default());
        let p = Pointer::mouse();

        swipeable.handle(p.input(PointerPhase::Down, 10, 10, 0));
        let first = swipeable.handle(p.input(PointerPhase::Move, 14, 11, 40));
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].name(), "swiping");
        let data = first[0].data();
        assert!(data.first);
        assert_eq!((data.delta_x, data.delta_y), (4, 1));
        assert_eq!(data.direction, SwipeDirection::Right);
        assert!(data.velocity > 0.0);

        // once swiping, moves back under the threshold still report
        let next = swipeable.handle(p.input(PointerPhase::Move, 10, 11, 60));
        assert_eq!(next.len(), 1);
        assert!(!next[0].data().first);
    }

    #[test]
    fn test_release_reports_swiped_and_direction() {
        let mut swipeable = Swipeable::new(SwipeConfig::default());
        let p = Pointer::mouse();

        swipeable.handle(p.input(PointerPhase::Down, 10, 10, 0));
        swipeable.handle(p.input(PointerPhase::Move, 10, 4, 30));
        let released = swipeable.handle(p.input(PointerPhase::Up, 10, 4, 50));

        let names: Vec<_> = released.iter().map(Gesture::name).collect();
        assert_eq!(names, vec!["swiped", "up"]);
        assert_eq!(released[1].data().direction, SwipeDirection::Up);
        assert!(!swipeable.is_tracking());
    }

    #[test]
    fn test_direction_classification() {
        assert_eq!(SwipeDirection::classify(-5, 2), SwipeDirection::Left);
        assert_eq!(SwipeDirection::classify(5, -2), SwipeDirection::Right);
        assert_eq!(SwipeDirection::classify(1, 3), SwipeDirection::Down);
        assert_eq!(SwipeDirection::classify(3, -3), SwipeDirection::Up);
    }

    #[test]
    fn test_untracked_source_is_ignored() {
        let mut swipeable = Swipeable::new(SwipeConfig {
            track_touch: false,
            ..SwipeConfig::default()
        });
        let p = Pointer::touch();

        swipeable.handle(p.input(PointerPhase::Down, 0, 0, 0));
        assert!(!swipeable.is_tracking());
        assert!(swipeable.handle(p.input(PointerPhase::Move, 9, 0, 10)).is_empty());
    }

    #[test]
    fn test_touch_swipe_when_tracked() {
        let mut swipeable = Swipeable::new(SwipeConfig::default());
        let p = Pointer::touch();

        swipeable.handle(p.input(PointerPhase::Down, 20, 5, 0));
        swipeable.handle(p.input(PointerPhase::Move, 12, 5, 10));
        let released = swipeable.handle(p.input(PointerPhase::Up, 12, 5, 20));
        assert_eq!(released.last().map(Gesture::name), Some("left"));
    }

    #[test]
    fn test_mouse_event_translation() {
        let at = Instant::now();
        let event = |kind| MouseEvent {
            kind,
            column: 3,
            row: 7,
            modifiers: crossterm::event::KeyModifiers::NONE,
        };

        let down = PointerInput::from_mouse(event(MouseEventKind::Down(MouseButton::Left)), at).unwrap();
        assert_eq!(down.phase, PointerPhase::Down);
        assert_eq!((down.x, down.y), (3, 7));
        assert_eq!(
            PointerInput::from_mouse(event(MouseEventKind::Drag(MouseButton::Left)), at).map(|p| p.phase),
            Some(PointerPhase::Move)
        );
        assert!(PointerInput::from_mouse(event(MouseEventKind::Down(MouseButton::Right)), at).is_none());
        assert!(PointerInput::from_mouse(event(MouseEventKind::ScrollDown), at).is_none());
    }
}
