//! Application state machine.
//!
//! `App` owns all mutable state — the thought store, ritual, speech capture,
//! drag controller, and input mode — and is driven by the render loop: input
//! events are forwarded by the TUI layer, `tick` advances timers and drains
//! recognition events, and rendering reads state between updates.

use std::time::Duration;

use tracing::debug;

use mindsweep_types::ui::{EffectTimer, UiOptions};
use mindsweep_types::{Bounds, Point, Thought};

use crate::config::MindsweepConfig;
use crate::drag::{BubbleRegistry, DragController, DropOutcome, ZoneId, ZoneRegistry};
use crate::input::{DraftInput, InputMode};
use crate::ritual::{Ritual, RitualTick};
use crate::segment::segment;
use crate::speech::{CommandRecognizer, RecognitionBackend, SpeechCapture};
use crate::store::ThoughtStore;

const WELCOME_DURATION: Duration = Duration::from_secs(3);

/// Board assumed before the first frame publishes real layout.
const DEFAULT_BOARD: Bounds = Bounds::new(0, 3, 80, 20);
const DEFAULT_VIEWPORT: Bounds = Bounds::new(0, 0, 80, 24);

pub struct App {
    store: ThoughtStore,
    ritual: Ritual,
    speech: SpeechCapture,
    drag: DragController,
    zones: ZoneRegistry,
    bubbles: BubbleRegistry,
    input_mode: InputMode,
    quick_add: DraftInput,
    board: Bounds,
    viewport: Bounds,
    welcome: Option<EffectTimer>,
    ui_options: UiOptions,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(config: &MindsweepConfig) -> Self {
        let speech = config.speech();
        let languages = speech.languages;
        let backend: Option<Box<dyn RecognitionBackend>> = speech.command.map(|command| {
            Box::new(CommandRecognizer::new(command, languages)) as Box<dyn RecognitionBackend>
        });
        Self::with_backend(config, backend)
    }

    /// Build with an explicit (or absent) recognition capability.
    #[must_use]
    pub fn with_backend(
        config: &MindsweepConfig,
        backend: Option<Box<dyn RecognitionBackend>>,
    ) -> Self {
        Self {
            store: ThoughtStore::new(),
            ritual: Ritual::default(),
            speech: SpeechCapture::new(backend),
            drag: DragController::default(),
            zones: ZoneRegistry::default(),
            bubbles: BubbleRegistry::default(),
            input_mode: InputMode::Normal,
            quick_add: DraftInput::default(),
            board: DEFAULT_BOARD,
            viewport: DEFAULT_VIEWPORT,
            welcome: config
                .welcome_enabled()
                .then(|| EffectTimer::new(WELCOME_DURATION)),
            ui_options: config.ui_options(),
            should_quit: false,
        }
    }

    // === Read access for rendering ===

    #[must_use]
    pub fn thoughts(&self) -> &[Thought] {
        self.store.thoughts()
    }

    #[must_use]
    pub fn store(&self) -> &ThoughtStore {
        &self.store
    }

    #[must_use]
    pub fn ritual(&self) -> &Ritual {
        &self.ritual
    }

    #[must_use]
    pub fn speech(&self) -> &SpeechCapture {
        &self.speech
    }

    #[must_use]
    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    #[must_use]
    pub fn quick_add(&self) -> &DraftInput {
        &self.quick_add
    }

    #[must_use]
    pub fn welcome_active(&self) -> bool {
        self.welcome.is_some()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // === Layout published by the rendering layer each frame ===

    pub fn set_viewport(&mut self, viewport: Bounds) {
        self.viewport = viewport;
    }

    pub fn set_board(&mut self, board: Bounds) {
        self.board = board;
    }

    pub fn zones_mut(&mut self) -> &mut ZoneRegistry {
        &mut self.zones
    }

    pub fn bubbles_mut(&mut self) -> &mut BubbleRegistry {
        &mut self.bubbles
    }

    // === Commands ===

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn dismiss_welcome(&mut self) {
        self.welcome = None;
    }

    pub fn enter_quick_add(&mut self) {
        self.input_mode = InputMode::QuickAdd;
    }

    pub fn cancel_quick_add(&mut self) {
        self.quick_add.clear();
        self.input_mode = InputMode::Normal;
    }

    /// The quick-add draft, only while quick-add mode is active.
    pub fn quick_add_mut(&mut self) -> Option<&mut DraftInput> {
        (self.input_mode == InputMode::QuickAdd).then_some(&mut self.quick_add)
    }

    /// Segment the quick-add entry into thoughts and return to normal mode.
    pub fn submit_quick_add(&mut self) {
        let entry = self.quick_add.take_text();
        self.input_mode = InputMode::Normal;

        let thoughts = segment(&entry);
        if thoughts.is_empty() {
            return;
        }
        let added = self.store.add_thoughts(thoughts, self.board);
        debug!(added, "quick add");
    }

    pub fn toggle_listening(&mut self) {
        if self.speech.listening() {
            self.speech.stop();
            self.speech.reset();
        } else {
            self.speech.start();
        }
    }

    /// Ask for the clear-mind ritual. Ignored while a ritual cycle is already
    /// in flight (confirming or animating).
    pub fn request_clear_mind(&mut self) {
        if self.ritual.is_inactive() {
            self.store.set_ritual_active(true);
        }
    }

    pub fn confirm_clear(&mut self) {
        self.ritual.confirm(self.viewport);
    }

    pub fn cancel_clear(&mut self) {
        self.ritual.cancel();
        self.store.set_ritual_active(false);
    }

    // === Pointer events ===

    pub fn pointer_down(&mut self, point: Point) {
        if self.welcome.is_some() {
            self.welcome = None;
            return;
        }
        // The ritual overlay is modal; the board underneath is inert.
        if !self.ritual.is_inactive() {
            return;
        }

        let Some(hit) = self.bubbles.hit_test(point) else {
            return;
        };
        if point == hit.remove_cell {
            self.store.remove(hit.id);
            return;
        }
        if let Some(thought) = self.store.get(hit.id) {
            self.drag.begin(hit.id, point, thought.position);
        }
    }

    pub fn pointer_move(&mut self, point: Point) {
        self.drag.update(point, &self.zones);
    }

    pub fn pointer_up(&mut self, point: Point) {
        self.drag.update(point, &self.zones);
        self.finish_drag();
    }

    /// Terminals emit no pointer-leave; losing focus ends an active drag with
    /// normal resolution semantics.
    pub fn focus_lost(&mut self) {
        self.finish_drag();
    }

    fn finish_drag(&mut self) {
        let Some(DropOutcome { id, position, zone }) = self.drag.finish(&self.zones) else {
            return;
        };
        self.store.update_position(id, position);
        if let Some(zone) = zone {
            self.store.update_category(id, zone.category());
            debug!(thought = %id, zone = zone.label(), "drop");
        }
    }

    /// Zone the current drag highlights, if any.
    #[must_use]
    pub fn highlighted_zone(&self) -> Option<ZoneId> {
        self.drag.hover()
    }

    // === Frame tick ===

    pub fn tick(&mut self, delta: Duration) {
        if let Some(welcome) = self.welcome.as_mut() {
            welcome.advance(delta);
            if welcome.is_finished() {
                self.welcome = None;
            }
        }

        self.speech.pump();
        if let Some(new_text) = self.speech.take_new_final() {
            let thoughts = segment(&new_text);
            if !thoughts.is_empty() {
                let added = self.store.add_thoughts(thoughts, self.board);
                debug!(added, "thoughts from speech");
            }
        }

        if self.store.ritual_active() && self.ritual.is_inactive() {
            self.ritual.begin_confirm();
        }

        if self.ritual.tick(delta) == RitualTick::Completed {
            self.store.clear_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::App;
    use crate::config::{AppConfig, MindsweepConfig};
    use crate::drag::{BubbleEntry, ZoneId};
    use crate::ritual::ANIMATION_TOTAL;
    use crate::speech::{RecognitionBackend, RecognitionEvent, SpeechError};
    use mindsweep_types::{Bounds, Category, Point};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::sync::mpsc;

    /// Backend double that exposes its event sender.
    #[derive(Clone, Default)]
    struct FakeBackend {
        sender: Arc<Mutex<Option<mpsc::UnboundedSender<RecognitionEvent>>>>,
    }

    impl FakeBackend {
        fn send(&self, event: RecognitionEvent) {
            self.sender
                .lock()
                .expect("lock")
                .as_ref()
                .expect("started")
                .send(event)
                .expect("receiver alive");
        }
    }

    impl RecognitionBackend for FakeBackend {
        fn start(
            &mut self,
            events: mpsc::UnboundedSender<RecognitionEvent>,
        ) -> Result<(), SpeechError> {
            *self.sender.lock().expect("lock") = Some(events);
            Ok(())
        }

        fn stop(&mut self) {}
    }

    fn quiet_config() -> MindsweepConfig {
        // AppConfig::default() has welcome = false, which keeps the overlay
        // out of the way for tests.
        MindsweepConfig {
            app: Some(AppConfig::default()),
            speech: None,
        }
    }

    fn test_app() -> App {
        App::with_backend(&quiet_config(), None)
    }

    fn app_with_speech() -> (App, FakeBackend) {
        let backend = FakeBackend::default();
        let app = App::with_backend(&quiet_config(), Some(Box::new(backend.clone())));
        (app, backend)
    }

    /// Publish a two-zone layout and per-thought bubble geometry, mirroring
    /// what a frame does.
    fn publish_layout(app: &mut App) {
        app.set_viewport(Bounds::new(0, 0, 100, 40));
        app.set_board(Bounds::new(0, 4, 100, 34));
        app.zones_mut().publish(ZoneId::Keep, Bounds::new(0, 4, 50, 34));
        app.zones_mut()
            .publish(ZoneId::LetGo, Bounds::new(50, 4, 50, 34));

        app.bubbles_mut().clear();
        let entries: Vec<BubbleEntry> = app
            .thoughts()
            .iter()
            .map(|thought| BubbleEntry {
                id: thought.id,
                bounds: Bounds::new(thought.position.x, thought.position.y, 12, 3),
                remove_cell: Point::new(thought.position.x + 11, thought.position.y),
            })
            .collect();
        for entry in entries {
            app.bubbles_mut().publish(entry);
        }
    }

    fn quick_add(app: &mut App, text: &str) {
        app.enter_quick_add();
        let draft = app.quick_add_mut().expect("quick add active");
        for c in text.chars() {
            draft.enter_char(c);
        }
        app.submit_quick_add();
    }

    /// Add a thought and pin its random spawn to a known cell so pointer
    /// math is deterministic.
    fn add_thought_at(app: &mut App, text: &str, position: Point) -> mindsweep_types::ThoughtId {
        quick_add(app, text);
        let id = app.thoughts().last().expect("added").id;
        app.store.update_position(id, position);
        id
    }

    #[test]
    fn quick_add_segments_into_thoughts() {
        let mut app = test_app();
        quick_add(&mut app, "Call mom. I need to buy milk!");

        let texts: Vec<_> = app.thoughts().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["Call mom", "I need to buy milk"]);
        assert!(app
            .thoughts()
            .iter()
            .all(|t| t.category == Category::Unassigned));
    }

    #[test]
    fn quick_add_mut_is_gated_on_mode() {
        let mut app = test_app();
        assert!(app.quick_add_mut().is_none());
        app.enter_quick_add();
        assert!(app.quick_add_mut().is_some());
        app.cancel_quick_add();
        assert!(app.quick_add_mut().is_none());
        assert!(app.quick_add().is_empty());
    }

    #[test]
    fn finalized_speech_becomes_thoughts_on_tick() {
        let (mut app, backend) = app_with_speech();
        app.toggle_listening();
        assert!(app.speech().listening());

        backend.send(RecognitionEvent::Final("water the plants. stretch a bit.".to_string()));
        app.tick(Duration::from_millis(16));

        let texts: Vec<_> = app.thoughts().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["water the plants", "stretch a bit"]);

        // Same transcript is not consumed twice.
        app.tick(Duration::from_millis(16));
        assert_eq!(app.thoughts().len(), 2);
    }

    #[test]
    fn drop_in_keep_zone_assigns_category() {
        let mut app = test_app();
        let first = add_thought_at(&mut app, "buy milk", Point::new(20, 20));
        add_thought_at(&mut app, "old grudge", Point::new(60, 20));
        publish_layout(&mut app);

        app.pointer_down(Point::new(20, 20));
        assert!(app.drag().is_dragging());
        app.pointer_move(Point::new(10, 10));
        assert_eq!(app.highlighted_zone(), Some(ZoneId::Keep));
        app.pointer_up(Point::new(10, 10));

        assert_eq!(app.store().get(first).expect("kept").category, Category::Keep);
        assert_eq!(app.thoughts()[1].category, Category::Unassigned);
        assert_eq!(app.highlighted_zone(), None);
    }

    #[test]
    fn drop_outside_zones_leaves_category_unchanged() {
        let mut app = test_app();
        let id = add_thought_at(&mut app, "buy milk", Point::new(20, 20));
        publish_layout(&mut app);

        app.pointer_down(Point::new(20, 20));
        // Above the board, outside both zones.
        app.pointer_up(Point::new(20, 0));

        let thought = app.store().get(id).expect("present");
        assert_eq!(thought.category, Category::Unassigned);
        // The drag still moved the bubble.
        assert_eq!(thought.position, Point::new(20, 0));
    }

    #[test]
    fn remove_affordance_deletes_instead_of_dragging() {
        let mut app = test_app();
        add_thought_at(&mut app, "buy milk", Point::new(20, 20));
        publish_layout(&mut app);

        app.pointer_down(Point::new(31, 20));

        assert!(app.thoughts().is_empty());
        assert!(!app.drag().is_dragging());
    }

    #[test]
    fn ritual_cancel_keeps_thoughts() {
        let mut app = test_app();
        quick_add(&mut app, "buy milk");

        app.request_clear_mind();
        app.tick(Duration::from_millis(16));
        assert!(app.ritual().is_confirming());

        app.cancel_clear();
        assert!(app.ritual().is_inactive());
        assert!(!app.store().ritual_active());
        assert_eq!(app.thoughts().len(), 1);
    }

    #[test]
    fn full_ritual_cycle_clears_everything() {
        let mut app = test_app();
        for text in ["one thing", "two thing", "three thing"] {
            quick_add(&mut app, text);
        }

        app.request_clear_mind();
        app.tick(Duration::from_millis(16));
        assert!(app.ritual().is_confirming());

        app.confirm_clear();
        assert!(app.ritual().is_animating());
        assert!(!app.thoughts().is_empty());

        app.tick(ANIMATION_TOTAL + Duration::from_millis(16));
        assert!(app.thoughts().is_empty());
        assert!(!app.store().ritual_active());
        assert!(app.ritual().is_inactive());
    }

    #[test]
    fn clear_request_during_animation_is_ignored() {
        let mut app = test_app();
        quick_add(&mut app, "buy milk");

        app.request_clear_mind();
        app.tick(Duration::from_millis(16));
        app.confirm_clear();
        app.tick(Duration::from_millis(500));

        // Neither restarts nor cancels the running animation.
        app.request_clear_mind();
        assert!(app.ritual().is_animating());
        assert!(app.ritual().elapsed() >= Duration::from_millis(500));

        // Completion still happens exactly once, then the app idles empty.
        app.tick(ANIMATION_TOTAL);
        assert!(app.thoughts().is_empty());
        assert!(!app.store().ritual_active());
        app.tick(Duration::from_millis(16));
        assert!(app.ritual().is_inactive());
    }

    #[test]
    fn welcome_auto_dismisses_after_duration() {
        let config = MindsweepConfig::default();
        let mut app = App::with_backend(&config, None);
        assert!(app.welcome_active());

        app.tick(Duration::from_secs(2));
        assert!(app.welcome_active());
        app.tick(Duration::from_secs(2));
        assert!(!app.welcome_active());
    }

    #[test]
    fn pointer_dismisses_welcome_without_touching_bubbles() {
        let config = MindsweepConfig::default();
        let mut app = App::with_backend(&config, None);
        publish_layout(&mut app);

        app.pointer_down(Point::new(5, 5));
        assert!(!app.welcome_active());
        assert!(!app.drag().is_dragging());
    }
}
