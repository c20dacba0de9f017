//! Hero "typing" effect: types a phrase out, holds it, deletes it and moves on
//! to the next phrase in the rotation.
//!
//! [`TypingMachine`] holds the pure transition logic. [`TypingAnimator`] drives
//! it with a [`Scheduler`] and renders into a [`TextSurface`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::config::{ConfigError, TypingSettings};
use crate::scheduler::{Scheduler, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingConfig {
    phrases: Vec<String>,
    typing_interval: Duration,
    deleting_interval: Duration,
    hold_at_full: Duration,
    hold_at_empty: Duration,
    start_delay: Duration,
    looping: bool,
    pause_on_first_interaction: bool,
    freeze_text: Option<String>,
}

impl TryFrom<TypingSettings> for TypingConfig {
    type Error = ConfigError;

    fn try_from(settings: TypingSettings) -> Result<Self, Self::Error> {
        if settings.phrases.is_empty() {
            return Err(ConfigError::NoPhrases);
        }
        if let Some(i) = settings.phrases.iter().position(|p| p.is_empty()) {
            return Err(ConfigError::EmptyPhrase(i));
        }
        let typing = Duration::from_millis(settings.typing_interval_ms);
        let deleting = Duration::from_millis(settings.deleting_interval_ms);
        if deleting > typing {
            return Err(ConfigError::DeletingSlowerThanTyping { typing, deleting });
        }
        Ok(Self {
            phrases: settings.phrases,
            typing_interval: typing,
            deleting_interval: deleting,
            hold_at_full: Duration::from_millis(settings.hold_at_full_ms),
            hold_at_empty: Duration::from_millis(settings.hold_at_empty_ms),
            start_delay: Duration::from_millis(settings.start_delay_ms),
            looping: settings.looping,
            pause_on_first_interaction: settings.pause_on_first_interaction,
            freeze_text: settings.freeze_text,
        })
    }
}

impl TypingConfig {
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn typing_interval(&self) -> Duration {
        self.typing_interval
    }

    pub fn deleting_interval(&self) -> Duration {
        self.deleting_interval
    }

    pub fn start_delay(&self) -> Duration {
        self.start_delay
    }

    pub fn looping(&self) -> bool {
        self.looping
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Typing,
    PausedAtFull,
    Deleting,
    /// Last phrase fully typed with looping disabled.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingState {
    pub phrase_index: usize,
    pub char_count: usize,
    pub mode: Mode,
}

impl Default for TypingState {
    fn default() -> Self {
        Self {
            phrase_index: 0,
            char_count: 0,
            mode: Mode::Typing,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypingMachine {
    config: TypingConfig,
    state: TypingState,
    next_delay: Option<Duration>,
}

impl TypingMachine {
    pub fn new(config: TypingConfig) -> Self {
        let next_delay = Some(config.start_delay);
        Self {
            config,
            state: TypingState::default(),
            next_delay,
        }
    }

    pub fn state(&self) -> TypingState {
        self.state
    }

    pub fn config(&self) -> &TypingConfig {
        &self.config
    }

    pub fn current_phrase(&self) -> &str {
        &self.config.phrases[self.state.phrase_index % self.config.phrases.len()]
    }

    fn phrase_len(&self) -> usize {
        self.current_phrase().chars().count()
    }

    /// Text currently shown: the first `char_count` characters of the phrase.
    pub fn display(&self) -> &str {
        let phrase = self.current_phrase();
        match phrase.char_indices().nth(self.state.char_count) {
            Some((end, _)) => &phrase[..end],
            None => phrase,
        }
    }

    fn is_last_phrase(&self) -> bool {
        self.state.phrase_index + 1 == self.config.phrases.len()
    }

    /// Delay the upcoming tick waits: the start delay before the first tick,
    /// afterwards whatever the last tick returned. Used when a paused chain is
    /// restarted.
    pub fn pending_delay(&self) -> Option<Duration> {
        self.next_delay
    }

    /// Applies one character edit and returns how long to wait before the next
    /// tick, or `None` once the run is over.
    pub fn tick(&mut self) -> Option<Duration> {
        self.next_delay = self.step();
        self.next_delay
    }

    fn step(&mut self) -> Option<Duration> {
        match self.state.mode {
            Mode::Done => None,
            Mode::Typing => {
                self.state.char_count = (self.state.char_count + 1).min(self.phrase_len());
                if self.state.char_count < self.phrase_len() {
                    return Some(self.config.typing_interval);
                }
                if !self.config.looping && self.is_last_phrase() {
                    self.state.mode = Mode::Done;
                    None
                } else {
                    self.state.mode = Mode::PausedAtFull;
                    Some(self.config.hold_at_full)
                }
            }
            Mode::PausedAtFull => {
                self.state.mode = Mode::Deleting;
                self.delete_one()
            }
            Mode::Deleting => self.delete_one(),
        }
    }

    fn delete_one(&mut self) -> Option<Duration> {
        self.state.char_count = self.state.char_count.saturating_sub(1);
        if self.state.char_count > 0 {
            return Some(self.config.deleting_interval);
        }
        self.state.phrase_index = (self.state.phrase_index + 1) % self.config.phrases.len();
        self.state.mode = Mode::Typing;
        Some(self.config.hold_at_empty)
    }
}

/// Where typed text is written.
pub trait TextSurface {
    /// Whether the target still exists on the page.
    fn is_attached(&self) -> bool;
    fn render(&self, text: &str);
}

struct Inner<T> {
    machine: Option<TypingMachine>,
    surface: T,
    pending: Option<TaskId>,
    paused: bool,
    frozen: bool,
    running: bool,
}

/// Runs a [`TypingMachine`] against a surface, one scheduled tick at a time.
pub struct TypingAnimator<S: Scheduler + Clone + 'static, T: TextSurface + 'static> {
    scheduler: S,
    inner: Rc<RefCell<Inner<T>>>,
}

impl<S: Scheduler + Clone + 'static, T: TextSurface + 'static> TypingAnimator<S, T> {
    pub fn new(scheduler: S, surface: T) -> Self {
        Self {
            scheduler,
            inner: Rc::new(RefCell::new(Inner {
                machine: None,
                surface,
                pending: None,
                paused: false,
                frozen: false,
                running: false,
            })),
        }
    }

    /// Starts a fresh run, replacing any chain that is already going.
    pub fn start(&self, config: TypingConfig) {
        self.cancel_pending();
        let delay = config.start_delay;
        {
            let mut inner = self.inner.borrow_mut();
            if !inner.surface.is_attached() {
                log::debug!("typing surface missing, animator not started");
                inner.running = false;
                return;
            }
            inner.machine = Some(TypingMachine::new(config));
            inner.paused = false;
            inner.frozen = false;
            inner.running = true;
        }
        Self::schedule_tick(&self.inner, &self.scheduler, delay);
    }

    /// Halts the animation, leaving the last rendered text in place.
    pub fn stop(&self) {
        self.cancel_pending();
        self.inner.borrow_mut().running = false;
    }

    pub fn pause(&self) {
        self.inner.borrow_mut().paused = true;
    }

    pub fn resume(&self) {
        let delay = {
            let mut inner = self.inner.borrow_mut();
            if inner.frozen || !inner.running || !inner.paused {
                return;
            }
            inner.paused = false;
            inner.machine.as_ref().and_then(TypingMachine::pending_delay)
        };
        self.cancel_pending();
        if let Some(delay) = delay {
            Self::schedule_tick(&self.inner, &self.scheduler, delay);
        }
    }

    /// Reports a user interaction. With `pause_on_first_interaction` the
    /// animation freezes for good, optionally showing the freeze text.
    pub fn notify_interaction(&self) {
        let mut inner = self.inner.borrow_mut();
        let Some(config) = inner.machine.as_ref().map(TypingMachine::config) else {
            return;
        };
        if !config.pause_on_first_interaction || inner.frozen {
            return;
        }
        let freeze_text = config.freeze_text.clone();
        inner.frozen = true;
        inner.paused = true;
        if let Some(text) = freeze_text {
            if inner.surface.is_attached() {
                inner.surface.render(&text);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        let inner = self.inner.borrow();
        inner.running && !inner.paused
    }

    pub fn state(&self) -> Option<TypingState> {
        self.inner.borrow().machine.as_ref().map(TypingMachine::state)
    }

    fn cancel_pending(&self) {
        let pending = self.inner.borrow_mut().pending.take();
        if let Some(id) = pending {
            self.scheduler.cancel(id);
        }
    }

    fn schedule_tick(inner: &Rc<RefCell<Inner<T>>>, scheduler: &S, delay: Duration) {
        let weak = Rc::downgrade(inner);
        let chain = scheduler.clone();
        let id = scheduler.schedule(delay, Box::new(move || Self::tick(weak, chain)));
        inner.borrow_mut().pending = Some(id);
    }

    fn tick(weak: Weak<RefCell<Inner<T>>>, scheduler: S) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let next = {
            let mut guard = inner.borrow_mut();
            let state = &mut *guard;
            state.pending = None;
            if !state.running || state.paused {
                return;
            }
            if !state.surface.is_attached() {
                log::debug!("typing surface detached, stopping animator");
                state.running = false;
                return;
            }
            let Some(machine) = state.machine.as_mut() else {
                return;
            };
            let next = machine.tick();
            state.surface.render(machine.display());
            if next.is_none() {
                state.running = false;
            }
            next
        };
        if let Some(delay) = next {
            Self::schedule_tick(&inner, &scheduler, delay);
        }
    }
}

impl<S: Scheduler + Clone + 'static, T: TextSurface + 'static> Drop for TypingAnimator<S, T> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use proptest::prelude::*;

    use super::*;
    use crate::scheduler::VirtualScheduler;

    #[derive(Clone, Default)]
    struct FakeSurface {
        attached: Rc<Cell<bool>>,
        frames: Rc<RefCell<Vec<String>>>,
    }

    impl FakeSurface {
        fn attached() -> Self {
            let surface = Self::default();
            surface.attached.set(true);
            surface
        }

        fn frames(&self) -> Vec<String> {
            self.frames.borrow().clone()
        }

        fn last(&self) -> Option<String> {
            self.frames.borrow().last().cloned()
        }
    }

    impl TextSurface for FakeSurface {
        fn is_attached(&self) -> bool {
            self.attached.get()
        }

        fn render(&self, text: &str) {
            self.frames.borrow_mut().push(text.to_string());
        }
    }

    fn config(phrases: &[&str], looping: bool) -> TypingConfig {
        let mut settings = TypingSettings::with_phrases(phrases.iter().copied());
        settings.typing_interval_ms = 10;
        settings.deleting_interval_ms = 5;
        settings.hold_at_full_ms = 100;
        settings.hold_at_empty_ms = 0;
        settings.start_delay_ms = 0;
        settings.looping = looping;
        TypingConfig::try_from(settings).unwrap()
    }

    #[test]
    fn test_defaults_delete_faster_than_typing() {
        let settings = TypingSettings::with_phrases(["hello"]);
        let config = TypingConfig::try_from(settings).unwrap();
        assert!(config.deleting_interval() <= config.typing_interval());
        assert_eq!(config.typing_interval(), Duration::from_millis(100));
        assert_eq!(config.deleting_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(
            TypingConfig::try_from(TypingSettings::default()),
            Err(ConfigError::NoPhrases)
        );
        assert_eq!(
            TypingConfig::try_from(TypingSettings::with_phrases(["a", ""])),
            Err(ConfigError::EmptyPhrase(1))
        );
        let mut slow_delete = TypingSettings::with_phrases(["a"]);
        slow_delete.deleting_interval_ms = 200;
        assert!(matches!(
            TypingConfig::try_from(slow_delete),
            Err(ConfigError::DeletingSlowerThanTyping { .. })
        ));
    }

    #[test]
    fn test_ab_c_scenario() {
        let mut machine = TypingMachine::new(config(&["AB", "C"], true));
        let mut seen = Vec::new();
        for _ in 0..8 {
            let delay = machine.tick().unwrap();
            seen.push((machine.display().to_string(), delay.as_millis()));
        }
        let expected: Vec<(String, u128)> = vec![
            ("A", 10),
            ("AB", 100),
            ("A", 5),
            ("", 0),
            ("C", 100),
            ("", 0),
            ("A", 10),
            ("AB", 100),
        ]
        .into_iter()
        .map(|(s, d)| (s.to_string(), d))
        .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_single_phrase_without_loop_types_once() {
        let mut machine = TypingMachine::new(config(&["Hi"], false));
        assert!(machine.tick().is_some());
        assert_eq!(machine.tick(), None);
        assert_eq!(machine.display(), "Hi");
        assert_eq!(machine.state().mode, Mode::Done);
        assert_eq!(machine.tick(), None);
        assert_eq!(machine.display(), "Hi");
    }

    #[test]
    fn test_non_loop_deletes_all_but_last() {
        let mut machine = TypingMachine::new(config(&["ab", "cd"], false));
        let mut frames = Vec::new();
        while machine.tick().is_some() {
            frames.push(machine.display().to_string());
        }
        frames.push(machine.display().to_string());
        assert_eq!(frames, vec!["a", "ab", "a", "", "c", "cd"]);
    }

    #[test]
    fn test_multibyte_phrases_are_sliced_by_char() {
        let mut machine = TypingMachine::new(config(&["héllo"], true));
        machine.tick();
        machine.tick();
        assert_eq!(machine.display(), "hé");
    }

    #[test]
    fn test_animator_renders_on_schedule() {
        let sched = VirtualScheduler::new();
        let surface = FakeSurface::attached();
        let animator = TypingAnimator::new(sched.clone(), surface.clone());
        animator.start(config(&["AB", "C"], true));

        sched.advance(Duration::ZERO);
        assert_eq!(surface.frames(), vec!["A"]);
        sched.advance(Duration::from_millis(10));
        assert_eq!(surface.last().as_deref(), Some("AB"));
        // holding at full
        sched.advance(Duration::from_millis(99));
        assert_eq!(surface.frames().len(), 2);
        sched.advance(Duration::from_millis(1));
        assert_eq!(surface.last().as_deref(), Some("A"));
        sched.advance(Duration::from_millis(5));
        assert_eq!(surface.frames(), vec!["A", "AB", "A", "", "C"]);
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn test_missing_surface_starts_nothing() {
        let sched = VirtualScheduler::new();
        let surface = FakeSurface::default();
        let animator = TypingAnimator::new(sched.clone(), surface.clone());
        animator.start(config(&["AB"], true));
        assert_eq!(sched.pending(), 0);
        assert!(!animator.is_running());
        assert!(surface.frames().is_empty());
    }

    #[test]
    fn test_restart_cancels_previous_chain() {
        let sched = VirtualScheduler::new();
        let surface = FakeSurface::attached();
        let animator = TypingAnimator::new(sched.clone(), surface.clone());
        animator.start(config(&["AB"], true));
        sched.advance(Duration::ZERO);
        animator.start(config(&["XY"], true));
        assert_eq!(sched.pending(), 1);
        sched.advance(Duration::ZERO);
        sched.advance(Duration::from_millis(10));
        assert_eq!(surface.frames(), vec!["A", "X", "XY"]);
    }

    #[test]
    fn test_stop_leaves_text_and_clears_timer() {
        let sched = VirtualScheduler::new();
        let surface = FakeSurface::attached();
        let animator = TypingAnimator::new(sched.clone(), surface.clone());
        animator.start(config(&["ABC"], true));
        sched.advance(Duration::from_millis(10));
        animator.stop();
        assert_eq!(sched.pending(), 0);
        sched.advance(Duration::from_secs(5));
        assert_eq!(surface.last().as_deref(), Some("AB"));
    }

    #[test]
    fn test_paused_tick_does_not_reschedule_until_resume() {
        let sched = VirtualScheduler::new();
        let surface = FakeSurface::attached();
        let animator = TypingAnimator::new(sched.clone(), surface.clone());
        animator.start(config(&["ABC"], true));
        sched.advance(Duration::ZERO);
        animator.pause();
        sched.advance(Duration::from_secs(1));
        assert_eq!(sched.pending(), 0);
        assert_eq!(surface.frames(), vec!["A"]);

        animator.resume();
        sched.advance(Duration::from_millis(10));
        assert_eq!(surface.frames(), vec!["A", "AB"]);
    }

    #[test]
    fn test_resume_at_empty_still_holds() {
        let sched = VirtualScheduler::new();
        let surface = FakeSurface::attached();
        let animator = TypingAnimator::new(sched.clone(), surface.clone());
        let mut settings = TypingSettings::with_phrases(["A", "C"]);
        settings.typing_interval_ms = 10;
        settings.deleting_interval_ms = 5;
        settings.hold_at_full_ms = 100;
        settings.hold_at_empty_ms = 500;
        settings.start_delay_ms = 0;
        animator.start(TypingConfig::try_from(settings).unwrap());

        sched.advance(Duration::ZERO);
        sched.advance(Duration::from_millis(100));
        assert_eq!(surface.frames(), vec!["A", ""]);

        animator.pause();
        animator.resume();
        sched.advance(Duration::from_millis(10));
        assert_eq!(surface.last().as_deref(), Some(""));
        sched.advance(Duration::from_millis(490));
        assert_eq!(surface.frames(), vec!["A", "", "C"]);
    }

    #[test]
    fn test_resume_before_first_tick_keeps_start_delay() {
        let sched = VirtualScheduler::new();
        let surface = FakeSurface::attached();
        let animator = TypingAnimator::new(sched.clone(), surface.clone());
        let mut settings = TypingSettings::with_phrases(["AB"]);
        settings.start_delay_ms = 1000;
        let config = TypingConfig::try_from(settings).unwrap();
        assert_eq!(
            TypingMachine::new(config.clone()).pending_delay(),
            Some(Duration::from_millis(1000))
        );
        animator.start(config);

        animator.pause();
        animator.resume();
        sched.advance(Duration::from_millis(999));
        assert!(surface.frames().is_empty());
        sched.advance(Duration::from_millis(1));
        assert_eq!(surface.frames(), vec!["A"]);
    }

    #[test]
    fn test_first_interaction_freezes_for_good() {
        let sched = VirtualScheduler::new();
        let surface = FakeSurface::attached();
        let animator = TypingAnimator::new(sched.clone(), surface.clone());
        let mut settings = TypingSettings::with_phrases(["ABC"]);
        settings.start_delay_ms = 0;
        settings.pause_on_first_interaction = true;
        settings.freeze_text = Some("Hello".to_string());
        animator.start(TypingConfig::try_from(settings).unwrap());
        sched.advance(Duration::ZERO);

        animator.notify_interaction();
        assert_eq!(surface.last().as_deref(), Some("Hello"));
        animator.resume();
        sched.advance(Duration::from_secs(10));
        assert_eq!(surface.frames(), vec!["A", "Hello"]);
        assert!(!animator.is_running());
    }

    #[test]
    fn test_interaction_ignored_without_flag() {
        let sched = VirtualScheduler::new();
        let surface = FakeSurface::attached();
        let animator = TypingAnimator::new(sched.clone(), surface.clone());
        animator.start(config(&["AB"], true));
        animator.notify_interaction();
        assert!(animator.is_running());
    }

    #[test]
    fn test_detached_surface_stops_chain() {
        let sched = VirtualScheduler::new();
        let surface = FakeSurface::attached();
        let animator = TypingAnimator::new(sched.clone(), surface.clone());
        animator.start(config(&["ABC"], true));
        sched.advance(Duration::ZERO);
        surface.attached.set(false);
        sched.advance(Duration::from_secs(1));
        assert_eq!(surface.frames(), vec!["A"]);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn test_drop_cancels_pending_tick() {
        let sched = VirtualScheduler::new();
        let surface = FakeSurface::attached();
        {
            let animator = TypingAnimator::new(sched.clone(), surface.clone());
            animator.start(config(&["ABC"], true));
        }
        assert_eq!(sched.pending(), 0);
    }

    proptest! {
        #[test]
        fn test_display_is_always_a_prefix(
            phrases in prop::collection::vec("[a-zé ]{1,8}", 1..5),
            ticks in 1usize..300,
        ) {
            let refs: Vec<&str> = phrases.iter().map(String::as_str).collect();
            let mut machine = TypingMachine::new(config(&refs, true));
            let mut last_len = 0;
            for _ in 0..ticks {
                let before = machine.state();
                machine.tick();
                let after = machine.state();
                let phrase = &phrases[after.phrase_index];
                prop_assert!(phrase.starts_with(machine.display()));
                let len = machine.display().chars().count();
                if after.mode == Mode::Deleting && before.mode != Mode::Typing {
                    prop_assert!(len < last_len);
                }
                last_len = len;
            }
        }

        #[test]
        fn test_round_robin_visits_every_phrase(
            phrases in prop::collection::vec("[a-z]{1,6}", 1..5),
            typing_ms in 1u64..200,
            deleting_ratio in 1u64..=100,
            hold_at_full_ms in 0u64..3000,
            hold_at_empty_ms in 0u64..1500,
        ) {
            let mut settings = TypingSettings::with_phrases(phrases.iter().map(String::as_str));
            settings.typing_interval_ms = typing_ms;
            settings.deleting_interval_ms = (typing_ms * deleting_ratio / 100).max(1);
            settings.hold_at_full_ms = hold_at_full_ms;
            settings.hold_at_empty_ms = hold_at_empty_ms;
            let config = TypingConfig::try_from(settings).unwrap();
            let allowed = [
                config.typing_interval(),
                config.deleting_interval(),
                Duration::from_millis(hold_at_full_ms),
                Duration::from_millis(hold_at_empty_ms),
            ];
            let mut machine = TypingMachine::new(config);
            let mut order = Vec::new();
            for _ in 0..200 {
                let delay = machine.tick();
                prop_assert!(delay.is_some_and(|d| allowed.contains(&d)));
                let state = machine.state();
                if state.mode == Mode::PausedAtFull {
                    order.push(state.phrase_index);
                }
            }
            prop_assert!(order.len() >= 2 * phrases.len());
            for (i, idx) in order.iter().enumerate() {
                prop_assert_eq!(*idx, i % phrases.len());
            }
        }
    }
}
