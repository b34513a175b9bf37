use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

use crate::config::{AppConfig, TileSize};
use crate::gesture::{Gesture, PointerInput, PointerPhase, SwipeSignal, Swipeable, SwipingState};
use crate::grid::template::Cell;
use crate::grid::{Location, Matrix, MatrixError};

/// Status messages disappear after this long
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

/// Swap the values at two locations, returning a new matrix.
///
/// Both values are read from `tiles` before anything is written.
pub fn swap_tiles<T: Clone>(
    tiles: &Matrix<T>,
    old_location: Location,
    new_location: Location,
) -> Result<Matrix<T>, MatrixError> {
    let old_value = tiles.get(old_location)?.clone();
    let new_value = tiles.get(new_location)?.clone();
    let one_value_replaced = tiles.update(old_location, new_value)?;
    one_value_replaced.update(new_location, old_value)
}

pub struct App {
    pub popup: Popup,

    /// Grid state, replaced as a whole on every swap
    pub tiles: Matrix<Cell>,
    pub tile_size: TileSize,

    // Pointer tracking. Recorded for display only; gestures never move tiles.
    pub swiping_state: SwipingState,
    pub initial_swipe_location: Option<Location>,
    pub last_gesture: Option<String>,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    swipeable: Swipeable,
    grid_area: Rect,
}

impl App {
    pub fn new(tiles: Matrix<Cell>, config: &AppConfig) -> Self {
        Self {
            popup: Popup::None,
            tiles,
            tile_size: config.tile,
            swiping_state: SwipingState::default(),
            initial_swipe_location: None,
            last_gesture: None,
            status_message: None,
            status_message_time: None,
            swipeable: Swipeable::new(config.swipe),
            grid_area: Rect::default(),
        }
    }

    /// Set a status message (auto-clears after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    /// Remember where the grid was last drawn, for hit-testing pointer input
    pub fn set_grid_area(&mut self, area: Rect) {
        self.grid_area = area;
    }

    /// Exchange two tiles and install the result as the new grid state
    pub fn move_tile(
        &mut self,
        old_location: Location,
        new_location: Location,
    ) -> Result<(), MatrixError> {
        self.tiles = swap_tiles(&self.tiles, old_location, new_location)?;
        tracing::debug!(%old_location, %new_location, "Swapped tiles");
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.popup == Popup::Help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter
            ) {
                self.popup = Popup::None;
            }
            return;
        }

        match key.code {
            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,
            KeyCode::Esc => self.last_gesture = None,
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if let Some(input) = PointerInput::from_mouse(mouse, Instant::now()) {
            self.handle_pointer(input);
        }
    }

    /// Feed pointer input through the swipe recognizer and record what it saw
    pub fn handle_pointer(&mut self, input: PointerInput) {
        let tracked_before = self.swipeable.is_tracking();
        let gestures = self.swipeable.handle(input);

        match input.phase {
            PointerPhase::Down if self.swipeable.is_tracking() => {
                self.swiping_state = self.swiping_state.transition(SwipeSignal::PointerDown);
                self.initial_swipe_location = crate::ui::components::tile_at(
                    &self.tiles,
                    self.grid_area,
                    self.tile_size,
                    input.x,
                    input.y,
                );
                tracing::debug!(
                    location = ?self.initial_swipe_location,
                    "Pointer down at ({}, {})",
                    input.x,
                    input.y
                );
            }
            PointerPhase::Up if tracked_before => {
                self.swiping_state = self.swiping_state.transition(SwipeSignal::Released);
            }
            _ => {}
        }

        for gesture in &gestures {
            self.record_gesture(gesture);
        }
    }

    fn record_gesture(&mut self, gesture: &Gesture) {
        if let Gesture::Swiping(_) = gesture {
            self.swiping_state = self.swiping_state.transition(SwipeSignal::Swiping);
        }

        let data = gesture.data();
        tracing::info!(
            gesture = gesture.name(),
            delta_x = data.delta_x,
            delta_y = data.delta_y,
            velocity = data.velocity,
            first = data.first,
            "{}",
            data
        );
        self.last_gesture = Some(format!("{}: {}", gesture.name(), data));
    }

    /// Clear stale status messages
    pub fn tick(&mut self) {
        if let Some(set_at) = self.status_message_time {
            if set_at.elapsed() >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}
