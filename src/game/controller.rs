// SceneController
//
// Owns every piece of mutable game state: the configuration and its store,
// the current scene, the drag in progress, pending timers, the win
// sequence, the settings draft and the audio output. It is constructed
// once, load()-ed, and from then on only changed through its own methods.

use crate::audio::speech::count_phrase;
use crate::audio::AudioAdapter;
use crate::config::{ConfigStore, Configuration, KeyValueStore};
use crate::feeding::{FeedOutcome, SettleOutcome, FEED_SETTLE_DELAY};
use crate::input_system::UIState;
use crate::interaction::{DropRequest, InteractionController};
use crate::randomizer;
use crate::scene::Scene;
use crate::scheduler::{Scheduler, TimerEvent};
use crate::settings::SettingsForm;
use crate::win_sequence::{TickOutcome, WinSequence, COUNT_TICK_INTERVAL, REVEAL_DELAY};
use rand::Rng;
use std::time::Instant;

pub struct SceneController<S: KeyValueStore, A: AudioAdapter, R: Rng> {
    store: ConfigStore<S>,
    config: Configuration,
    pub(super) scene: Scene,
    generation: u64,
    pub(super) interaction: InteractionController,
    scheduler: Scheduler,
    win: WinSequence,
    pub(super) settings: Option<SettingsForm>,
    notice: Option<&'static str>,
    audio: A,
    rng: R,
}

impl<S: KeyValueStore, A: AudioAdapter, R: Rng> SceneController<S, A, R> {
    /// Creates a controller showing the default configuration
    ///
    /// Call [`load`](Self::load) before the first frame to pick up the
    /// saved configuration.
    pub fn new(store: ConfigStore<S>, audio: A, rng: R) -> Self {
        let config = Configuration::default();
        let scene = Scene::render(&config, 0);
        SceneController {
            store,
            config,
            scene,
            generation: 0,
            interaction: InteractionController::new(),
            scheduler: Scheduler::new(),
            win: WinSequence::new(),
            settings: None,
            notice: None,
            audio,
            rng,
        }
    }

    /// Restores the saved configuration and renders it
    ///
    /// Random mode rolls a fresh animal set; the roll is not saved.
    pub fn load(&mut self) {
        self.config = self.store.load();
        if self.config.is_random {
            randomizer::apply_random_config(&mut self.config, &mut self.rng);
        }
        self.render();
    }

    /// Clears the win display, re-rolls in random mode and renders again
    pub fn reset(&mut self) {
        if self.config.is_random {
            randomizer::apply_random_config(&mut self.config, &mut self.rng);
        }
        self.render();
        tracing::info!("Scene reset");
    }

    /// Replaces the scene; timers scheduled for the old one become stale
    fn render(&mut self) {
        self.generation += 1;
        self.interaction.cancel();
        self.win.reset();
        self.scene = Scene::render(&self.config, self.generation);
    }

    // === Settings ===

    pub fn open_settings(&mut self) {
        self.abort_gesture();
        self.settings = Some(SettingsForm::from_config(&self.config));
    }

    pub fn cancel_settings(&mut self) {
        self.settings = None;
    }

    /// Saves the settings draft, persists it and renders the new scene
    pub fn save_settings(&mut self) {
        let Some(form) = self.settings.take() else {
            return;
        };
        let result = form.save(&mut self.rng);
        if let Some(notice) = result.notice {
            tracing::info!("Settings corrected: {}", notice);
        }

        self.config = result.config;
        self.store.save(&self.config);
        self.notice = result.notice;
        self.render();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // === Feeding ===

    /// Runs a drop through the feeding state machine
    pub fn handle_drop(&mut self, request: DropRequest, now: Instant) {
        match self.scene.feed(request.target, request.item, now) {
            FeedOutcome::Fed { target, animal } => {
                self.audio.play_animal_cue(animal);
                self.scheduler.schedule(
                    now,
                    FEED_SETTLE_DELAY,
                    self.generation,
                    TimerEvent::FeedingSettled { target },
                );
            }
            FeedOutcome::Rejected(reason) => {
                tracing::debug!(
                    "Drop of item {} on target {} ignored: {:?}",
                    request.item,
                    request.target,
                    reason
                );
            }
        }
    }

    /// Drops whatever is being dragged and puts it back in the tray
    pub(super) fn abort_gesture(&mut self) {
        self.interaction.cancel();
        self.scene.clear_drop_candidates();
        for item in &mut self.scene.items {
            item.drag_active = false;
            item.touch_offset = None;
        }
    }

    // === Timers ===

    /// Fires due timers and advances animations; call once per frame
    pub fn update(&mut self, now: Instant) {
        for due in self.scheduler.drain_due(now) {
            if due.generation != self.scene.generation() {
                tracing::trace!("Dropping stale {:?} from scene {}", due.event, due.generation);
                continue;
            }
            self.on_timer(due.event, now);
        }
        self.win.update(now);
        self.audio.update();
    }

    fn on_timer(&mut self, event: TimerEvent, now: Instant) {
        match event {
            TimerEvent::FeedingSettled { target } => {
                if let SettleOutcome::AllFed { total } = self.scene.complete_feeding(target) {
                    self.win.start(total, self.scene.food);
                    self.schedule(now, COUNT_TICK_INTERVAL, TimerEvent::WinTick);
                }
            }
            TimerEvent::WinTick => match self.win.tick() {
                TickOutcome::Counted(count) => {
                    self.audio.speak(&count_phrase(count));
                    self.schedule(now, COUNT_TICK_INTERVAL, TimerEvent::WinTick);
                }
                TickOutcome::Finished(count) => {
                    self.audio.speak(&count_phrase(count));
                    self.schedule(now, REVEAL_DELAY, TimerEvent::WinReveal);
                }
                TickOutcome::Ignored => {}
            },
            TimerEvent::WinReveal => {
                if self.win.reveal(now) {
                    self.audio.play_fanfare();
                }
            }
        }
    }

    fn schedule(&mut self, now: Instant, delay: std::time::Duration, event: TimerEvent) {
        self.scheduler.schedule(now, delay, self.generation, event);
    }

    // === Accessors for rendering and input ===

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn win(&self) -> &WinSequence {
        &self.win
    }

    pub fn settings(&self) -> Option<&SettingsForm> {
        self.settings.as_ref()
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    /// Snapshot for choosing the input context
    pub fn ui_state(&self) -> UIState {
        UIState {
            settings_open: self.settings.is_some(),
            notice_active: self.notice.is_some(),
        }
    }

    #[cfg(test)]
    pub(crate) fn audio(&self) -> &A {
        &self.audio
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &ConfigStore<S> {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::config::{MemoryStore, STORAGE_KEY};
    use crate::win_sequence::{WinPhase, MARK_FADE_DURATION};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::time::Duration;

    type TestController = SceneController<MemoryStore, RecordingAudio, ChaCha8Rng>;

    fn controller_with(saved: Option<&str>) -> TestController {
        let backend = match saved {
            Some(json) => MemoryStore::with_entry(STORAGE_KEY, json),
            None => MemoryStore::new(),
        };
        let mut controller = SceneController::new(
            ConfigStore::new(backend),
            RecordingAudio::default(),
            ChaCha8Rng::seed_from_u64(42),
        );
        controller.load();
        controller
    }

    fn drop_food(controller: &mut TestController, target: usize, item: usize, now: Instant) {
        controller.handle_drop(DropRequest { target, item }, now);
    }

    /// Runs the clock forward in frame-sized steps
    fn run_for(controller: &mut TestController, start: Instant, span: Duration) -> Instant {
        let step = Duration::from_millis(16);
        let mut now = start;
        while now < start + span {
            now += step;
            controller.update(now);
        }
        now
    }

    #[test]
    fn test_bear_and_cat_with_donuts_scenario() {
        let mut controller =
            controller_with(Some(r#"{"activeAnimals":["bear","cat"],"isRandom":false,"foodType":"donut"}"#));
        assert_eq!(controller.scene().targets.len(), 2);
        assert_eq!(controller.scene().items.len(), 2);
        assert!(controller.scene().items.iter().all(|i| i.food.id == "donut"));

        let start = Instant::now();
        drop_food(&mut controller, 0, 0, start);
        drop_food(&mut controller, 1, 1, start);
        assert_eq!(controller.audio().cues, vec!["bear", "cat"]);

        let now = run_for(&mut controller, start, Duration::from_secs(5));
        controller.update(now + MARK_FADE_DURATION);

        let win = controller.win();
        assert_eq!(win.total(), 2);
        assert_eq!(win.phase(), WinPhase::Complete);
        assert!(win.message().contains('2'));
        assert_eq!(win.message(), "2 DONUT GIVEN!");
        assert_eq!(win.icons().len(), 2);
        assert!(win.mark().is_some());

        let audio = controller.audio();
        assert_eq!(audio.phrases, vec![count_phrase(1), count_phrase(2)]);
        assert_eq!(audio.fanfares, 1);
    }

    #[test]
    fn test_win_waits_for_settle_delay() {
        let mut controller = controller_with(None);
        let start = Instant::now();
        drop_food(&mut controller, 0, 0, start);

        controller.update(start + FEED_SETTLE_DELAY - Duration::from_millis(1));
        assert!(!controller.scene().targets[0].shows_happy());
        assert!(!controller.win().is_active());

        controller.update(start + FEED_SETTLE_DELAY);
        assert!(controller.scene().targets[0].shows_happy());
        assert_eq!(controller.win().phase(), WinPhase::Counting);
    }

    #[test]
    fn test_double_feed_has_no_extra_effect() {
        let mut controller = controller_with(Some(r#"{"activeAnimals":["bear","cat"]}"#));
        let start = Instant::now();
        drop_food(&mut controller, 0, 0, start);
        drop_food(&mut controller, 1, 0, start);
        drop_food(&mut controller, 0, 1, start);

        assert_eq!(controller.audio().cues, vec!["bear"]);
        assert_eq!(controller.pending_timers(), 1);
        assert!(!controller.scene().items[1].consumed);
        assert!(!controller.scene().targets[1].is_fed());

        run_for(&mut controller, start, Duration::from_secs(3));
        assert!(!controller.win().is_active());
    }

    #[test]
    fn test_win_triggers_once_per_render() {
        let mut controller = controller_with(Some(r#"{"activeAnimals":["bear","cat","dog"]}"#));
        let start = Instant::now();
        for i in 0..3 {
            drop_food(&mut controller, i, i, start);
        }
        let now = run_for(&mut controller, start, Duration::from_secs(6));
        assert_eq!(controller.win().counter(), 3);
        assert_eq!(controller.audio().phrases.len(), 3);
        assert_eq!(controller.audio().fanfares, 1);
        run_for(&mut controller, now, Duration::from_secs(3));
        assert_eq!(controller.audio().fanfares, 1);
    }

    #[test]
    fn test_stale_timers_do_not_touch_new_scene() {
        let mut controller = controller_with(Some(r#"{"activeAnimals":["bear"]}"#));
        let start = Instant::now();
        drop_food(&mut controller, 0, 0, start);

        // Reset before the settle timer fires
        controller.reset();
        assert_eq!(controller.pending_timers(), 1);

        run_for(&mut controller, start, Duration::from_secs(3));
        let scene = controller.scene();
        assert!(!scene.targets[0].is_fed());
        assert!(!scene.items[0].consumed);
        assert!(!controller.win().is_active());
    }

    #[test]
    fn test_reset_mid_count_up_stops_the_sequence() {
        let mut controller = controller_with(Some(r#"{"activeAnimals":["bear","cat"]}"#));
        let start = Instant::now();
        drop_food(&mut controller, 0, 0, start);
        drop_food(&mut controller, 1, 1, start);
        let now = run_for(&mut controller, start, Duration::from_millis(900));
        assert_eq!(controller.win().phase(), WinPhase::Counting);

        controller.reset();
        assert_eq!(controller.win().phase(), WinPhase::Idle);
        run_for(&mut controller, now, Duration::from_secs(4));
        assert_eq!(controller.win().phase(), WinPhase::Idle);
        assert_eq!(controller.audio().fanfares, 0);
    }

    #[test]
    fn test_reset_in_random_mode_rerolls() {
        let mut controller = controller_with(Some(r#"{"activeAnimals":["bear"],"isRandom":true}"#));
        let start = Instant::now();
        drop_food(&mut controller, 0, 0, start);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..20 {
            controller.reset();
            let scene = controller.scene();
            let count = controller.config().active_animals.len();
            assert!((1..=5).contains(&count));
            assert_eq!(scene.targets.len(), count);
            assert_eq!(scene.items.len(), count);
            assert!(scene.targets.iter().all(|t| !t.is_fed()));
            assert!(scene.items.iter().all(|i| !i.consumed));
            seen.insert(controller.config().active_animals.clone());
        }
        assert!(seen.len() > 1, "reset should draw new subsets");
    }

    #[test]
    fn test_reset_without_random_keeps_animals() {
        let mut controller = controller_with(Some(r#"{"activeAnimals":["lion","dog"]}"#));
        controller.reset();
        assert_eq!(controller.config().active_animals, vec!["lion", "dog"]);
    }

    #[test]
    fn test_random_load_does_not_persist_roll() {
        let saved = r#"{"activeAnimals":["bear"],"isRandom":true,"foodType":"donut"}"#;
        let controller = controller_with(Some(saved));
        assert_eq!(
            controller.store().backend().get(STORAGE_KEY).unwrap().as_deref(),
            Some(saved)
        );
    }

    #[test]
    fn test_save_settings_with_nothing_checked() {
        let mut controller = controller_with(Some(r#"{"activeAnimals":["cat"]}"#));
        controller.open_settings();
        controller.settings.as_mut().unwrap().toggle_animal(1);
        controller.save_settings();

        assert_eq!(controller.config().active_animals, vec!["bear"]);
        assert!(controller.notice().is_some());
        assert!(controller.settings().is_none());
        assert_eq!(controller.store().load().active_animals, vec!["bear"]);
        assert!(controller.ui_state().notice_active);

        controller.dismiss_notice();
        assert!(controller.notice().is_none());
    }

    #[test]
    fn test_save_settings_persists_and_rerenders() {
        let mut controller = controller_with(None);
        let start = Instant::now();
        drop_food(&mut controller, 0, 0, start);

        controller.open_settings();
        {
            let form = controller.settings.as_mut().unwrap();
            form.toggle_animal(2);
            form.toggle_animal(3);
            form.cycle_food(true);
        }
        controller.save_settings();

        let expected = Configuration {
            active_animals: vec!["bear".into(), "dog".into(), "lion".into()],
            is_random: false,
            food_type: "apple".into(),
        };
        assert_eq!(controller.config(), &expected);
        assert_eq!(controller.store().load(), expected);
        assert_eq!(controller.scene().targets.len(), 3);
        assert!(controller.scene().items.iter().all(|i| !i.consumed && i.food.id == "apple"));
        assert!(controller.notice().is_none());
    }

    #[test]
    fn test_cancel_settings_changes_nothing() {
        let mut controller = controller_with(None);
        controller.open_settings();
        controller.settings.as_mut().unwrap().toggle_random();
        controller.cancel_settings();
        assert_eq!(controller.config(), &Configuration::default());
        assert_eq!(controller.store().backend().get(STORAGE_KEY).unwrap(), None);
    }
}
