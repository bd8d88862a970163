use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{MouseEvent, MouseEventKind};
use swipedeck_core::{AppConfig, Card, Deck};

use crate::carousel::{CarouselEngine, DragTracker, PaginationIndicator};
use crate::images::DeckImageCache;
use crate::theme::Theme;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal browsing mode
    Normal,
    /// Help overlay
    Help,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Runtime theme
    pub theme: Theme,
    /// The card deck (immutable for the session)
    pub deck: Deck,
    /// Carousel paging engine; owns the progress value
    pub engine: CarouselEngine,
    /// Pagination dot springs, derived from progress
    pub dots: PaginationIndicator,
    /// Card and avatar images
    pub images: DeckImageCache,
    /// Current application mode
    pub mode: Mode,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Transient status message
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    /// Viewport height in rows, updated on every draw
    pub viewport_height: u16,
    /// Active mouse drag, if any
    drag: Option<DragTracker>,
}

impl App {
    /// Create the app over a deck
    ///
    /// Fails when the deck cannot drive a carousel (it is validated again
    /// here because the engine is what actually refuses an empty mount).
    pub fn new(config: Arc<AppConfig>, theme: Theme, deck: Deck) -> swipedeck_core::Result<Self> {
        let carousel = config.carousel.clone();
        let engine = CarouselEngine::new(deck.len(), carousel.clone())?;
        let dots = PaginationIndicator::new(
            deck.len(),
            carousel.looping,
            carousel.dot_stiffness,
            carousel.dot_damping,
        );

        Ok(Self {
            config,
            theme,
            deck,
            engine,
            dots,
            images: DeckImageCache::new(None),
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            pending_key: None,
            viewport_height: 0,
            drag: None,
        })
    }

    /// Attach the disk-backed image cache (kept out of `new` so tests never
    /// touch the filesystem)
    pub fn init_image_cache(&mut self, data_dir: Option<&PathBuf>) {
        self.images = DeckImageCache::new(data_dir);
    }

    /// The card nearest to the current progress
    pub fn active_card(&self) -> &Card {
        let index = self.engine.current_index();
        self.deck.get(index).expect("engine index within deck")
    }

    /// Advance all animations by a frame delta
    pub fn advance(&mut self, dt: Duration) {
        if let Some(settlement) = self.engine.advance(dt) {
            if let Some(card) = self.deck.get(settlement.index) {
                self.set_status(format!(
                    "Card {}/{} ({})",
                    settlement.index + 1,
                    self.deck.len(),
                    card.owner.name
                ));
            }
        }

        self.dots.sync(self.engine.progress());
        self.dots.advance(dt);
    }

    /// Check if the next frame should run at animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.engine.needs_update() || self.dots.needs_update()
    }

    /// Swipe to the next card
    pub fn next_card(&mut self) {
        self.engine.page_next();
    }

    /// Swipe to the previous card
    pub fn prev_card(&mut self) {
        self.engine.page_prev();
    }

    /// Jump to the first card
    pub fn first_card(&mut self) {
        self.engine.go_to(0);
    }

    /// Jump to the last card
    pub fn last_card(&mut self) {
        self.engine.go_to(self.deck.len() - 1);
    }

    /// Toggle looping at the deck boundaries
    pub fn toggle_looping(&mut self) {
        let looping = !self.engine.looping();
        self.engine.set_looping(looping);
        self.dots.set_looping(looping);
        self.set_status(if looping {
            "Looping on"
        } else {
            "Looping off"
        });
    }

    /// Toggle the help overlay
    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            Mode::Normal => Mode::Help,
            Mode::Help => Mode::Normal,
        };
    }

    /// Leave any overlay mode
    pub fn exit_mode(&mut self) {
        self.mode = Mode::Normal;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Translate a mouse event into carousel gestures
    ///
    /// Press starts a gesture (cancelling any transition), drag feeds card
    /// deltas, release hands the engine the flick velocity.
    pub fn on_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::Down(_) => {
                self.engine.begin_gesture();
                self.drag = Some(DragTracker::new(
                    mouse.row,
                    self.viewport_height.max(1),
                    now,
                ));
            }
            MouseEventKind::Drag(_) => {
                if let Some(tracker) = self.drag.as_mut() {
                    let delta = tracker.update(mouse.row, now);
                    self.engine.gesture_delta(delta);
                }
            }
            MouseEventKind::Up(_) => {
                if let Some(tracker) = self.drag.take() {
                    let velocity = tracker.release_velocity(now);
                    self.engine.end_gesture(velocity);
                }
            }
            // Wheel input pages directly; it has no press/release phase
            MouseEventKind::ScrollDown => self.next_card(),
            MouseEventKind::ScrollUp => self.prev_card(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton};

    const FRAME: Duration = Duration::from_millis(16);

    fn app() -> App {
        App::new(
            Arc::new(AppConfig::default()),
            Theme::default(),
            Deck::builtin(),
        )
        .unwrap()
    }

    fn run_to_rest(app: &mut App) {
        for _ in 0..300 {
            app.advance(FRAME);
            if !app.needs_fast_update() {
                break;
            }
        }
    }

    fn mouse(kind: MouseEventKind, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: 10,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_two_swipes_then_wrap() {
        let mut app = app();

        // Two committed swipes land on card 2 of 3...
        app.next_card();
        run_to_rest(&mut app);
        app.next_card();
        run_to_rest(&mut app);
        assert_eq!(app.engine.progress(), 2.0);
        assert_eq!(app.active_card().owner.name, "Emma");
        assert_eq!(app.dots.active(), 2);

        // ...and a third wraps back to the first
        app.next_card();
        run_to_rest(&mut app);
        assert_eq!(app.engine.progress(), 0.0);
        assert_eq!(app.active_card().owner.name, "Sarah");
        assert_eq!(app.dots.active(), 0);
    }

    #[test]
    fn test_mouse_drag_swipes() {
        let mut app = app();
        app.viewport_height = 40;
        let start = Instant::now();

        app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 30), start);
        app.on_mouse(
            mouse(MouseEventKind::Drag(MouseButton::Left), 10),
            start + Duration::from_millis(80),
        );
        app.on_mouse(
            mouse(MouseEventKind::Up(MouseButton::Left), 10),
            start + Duration::from_millis(90),
        );

        run_to_rest(&mut app);
        assert_eq!(app.engine.progress(), 1.0);
        assert_eq!(app.dots.active(), 1);
    }

    #[test]
    fn test_settlement_updates_status() {
        let mut app = app();
        app.next_card();
        run_to_rest(&mut app);
        let status = app.status_message.clone().unwrap();
        assert!(status.contains("2/3"));
        assert!(status.contains("James"));
    }

    #[test]
    fn test_toggle_looping_stops_wrap() {
        let mut app = app();
        app.toggle_looping();
        assert!(!app.engine.looping());

        app.prev_card();
        run_to_rest(&mut app);
        // No wrap backward from the first card
        assert_eq!(app.engine.progress(), 0.0);
    }

    #[test]
    fn test_help_mode_round_trip() {
        let mut app = app();
        assert_eq!(app.mode, Mode::Normal);
        app.toggle_help();
        assert_eq!(app.mode, Mode::Help);
        app.exit_mode();
        assert_eq!(app.mode, Mode::Normal);
    }
}
