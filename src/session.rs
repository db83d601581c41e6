//! Run lifecycle around the simulation
//!
//! A session owns the current run and the injected high-score store. It ticks
//! the simulation, forwards events to a listener and reports the final score
//! exactly once when a run ends.

use crate::highscores::{HighScoreRecord, HighScoreStore, record_final_score};
use crate::sim::{Color, GameEvent, GameState, TickInput, Viewport, tick};
use crate::tuning::Tuning;

/// Presentation hooks (render/audio); every method defaults to a no-op
pub trait GameListener {
    fn on_color_changed(&mut self, _color: Color) {}
    fn on_match(&mut self, _color: Color) {}
    fn on_miss(&mut self) {}
    fn on_life_gained(&mut self) {}
    fn on_run_ended(&mut self, _final_score: u32) {}
}

/// Listener that ignores everything
impl GameListener for () {}

/// Feed events to a listener in order
pub fn dispatch<L: GameListener + ?Sized>(events: &[GameEvent], listener: &mut L) {
    for event in events {
        match *event {
            GameEvent::ColorChanged(color) => listener.on_color_changed(color),
            GameEvent::Match { color, .. } => listener.on_match(color),
            GameEvent::Miss { .. } => listener.on_miss(),
            GameEvent::LifeGained { .. } => listener.on_life_gained(),
            GameEvent::RunEnded { final_score } => listener.on_run_ended(final_score),
            GameEvent::OrbSpawned { .. } | GameEvent::OrbExpired { .. } => {}
        }
    }
}

/// One player's sequence of runs
pub struct Session<S: HighScoreStore> {
    state: GameState,
    store: S,
    tuning: Tuning,
    /// Set once the current run's score has been reported
    last_record: Option<HighScoreRecord>,
}

impl<S: HighScoreStore> Session<S> {
    pub fn new(store: S, seed: u64, viewport: Viewport) -> Self {
        Self::with_tuning(store, seed, viewport, Tuning::default())
    }

    pub fn with_tuning(store: S, seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        log::info!("Session started with seed {}", seed);
        Self {
            state: GameState::with_tuning(seed, viewport, tuning.clone()),
            store,
            tuning,
            last_record: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// High score to show on the menu
    pub fn menu_high_score(&self) -> u32 {
        self.store.read()
    }

    /// High-score outcome of the finished run, if it has ended
    pub fn last_record(&self) -> Option<HighScoreRecord> {
        self.last_record
    }

    /// Start a fresh run, keeping the viewport and tuning
    pub fn restart(&mut self, seed: u64) {
        let viewport = self.state.viewport;
        self.state = GameState::with_tuning(seed, viewport, self.tuning.clone());
        self.last_record = None;
        log::info!("Run restarted with seed {}", seed);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.state.set_viewport(viewport);
    }

    /// Advance one frame and return what happened
    pub fn tick(&mut self, input: &TickInput, dt_ms: f32) -> Vec<GameEvent> {
        tick(&mut self.state, input, dt_ms);
        let events = self.state.drain_events();

        for event in &events {
            if let GameEvent::RunEnded { final_score } = *event {
                self.report_run_end(final_score);
            }
        }
        events
    }

    /// Advance one frame and forward the events to `listener`
    pub fn tick_with<L: GameListener + ?Sized>(
        &mut self,
        input: &TickInput,
        dt_ms: f32,
        listener: &mut L,
    ) -> Vec<GameEvent> {
        let events = self.tick(input, dt_ms);
        dispatch(&events, listener);
        events
    }

    /// Clear the stored high score
    pub fn reset_high_score(&mut self) {
        if let Err(e) = self.store.reset() {
            log::warn!("Could not reset high score: {}", e);
            return;
        }
        // A finished run now shows the cleared value as its best
        if let Some(record) = self.last_record.as_mut() {
            record.best = 0;
        }
    }

    fn report_run_end(&mut self, final_score: u32) {
        if self.last_record.is_some() {
            return;
        }
        let record = match record_final_score(&mut self.store, final_score) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Could not save high score: {}", e);
                let previous = self.store.read();
                HighScoreRecord {
                    previous,
                    best: previous.max(final_score),
                    is_new_record: final_score > previous,
                }
            }
        };
        self.last_record = Some(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryStore;
    use crate::sim::Autopilot;

    #[derive(Default)]
    struct Recorder {
        changes: Vec<Color>,
        matches: usize,
        misses: usize,
        lives_gained: usize,
        ended: Vec<u32>,
    }

    impl GameListener for Recorder {
        fn on_color_changed(&mut self, color: Color) {
            self.changes.push(color);
        }
        fn on_match(&mut self, _color: Color) {
            self.matches += 1;
        }
        fn on_miss(&mut self) {
            self.misses += 1;
        }
        fn on_life_gained(&mut self) {
            self.lives_gained += 1;
        }
        fn on_run_ended(&mut self, final_score: u32) {
            self.ended.push(final_score);
        }
    }

    fn play_out<S: HighScoreStore>(session: &mut Session<S>, pilot: &mut Autopilot, rec: &mut Recorder) {
        for _ in 0..200_000 {
            let input = pilot.input(session.state());
            session.tick_with(&input, 16.0, rec);
            if session.state().is_over() {
                return;
            }
        }
        panic!("run never ended");
    }

    #[test]
    fn test_dispatch_maps_events() {
        let mut rec = Recorder::default();
        dispatch(
            &[
                GameEvent::ColorChanged(Color::Blue),
                GameEvent::OrbSpawned { id: 1, color: Color::Red },
                GameEvent::Match { color: Color::Blue, score: 1 },
                GameEvent::Miss { color: Color::Red, lives: 2 },
                GameEvent::LifeGained { lives: 3 },
                GameEvent::RunEnded { final_score: 9 },
            ],
            &mut rec,
        );
        assert_eq!(rec.changes, vec![Color::Blue]);
        assert_eq!(rec.matches, 1);
        assert_eq!(rec.misses, 1);
        assert_eq!(rec.lives_gained, 1);
        assert_eq!(rec.ended, vec![9]);
    }

    #[test]
    fn test_run_end_reported_once_and_stored() {
        let mut session = Session::new(MemoryStore::new(), 77, Viewport::default());
        let mut pilot = Autopilot::new(3, 0.3);
        let mut rec = Recorder::default();
        play_out(&mut session, &mut pilot, &mut rec);

        assert_eq!(rec.ended.len(), 1);
        let final_score = rec.ended[0];
        assert_eq!(final_score, session.state().score.score());
        assert_eq!(rec.matches as u32, final_score);

        let record = session.last_record().unwrap();
        assert_eq!(record.previous, 0);
        assert_eq!(record.is_new_record, final_score > 0);
        assert_eq!(session.menu_high_score(), final_score);

        // Ticking a finished run changes nothing
        assert!(session.tick(&TickInput::default(), 16.0).is_empty());
        assert_eq!(rec.ended.len(), 1);
    }

    #[test]
    fn test_lower_score_keeps_high_score() {
        let mut session = Session::new(MemoryStore::with_value(10_000), 5, Viewport::default());
        let mut pilot = Autopilot::new(5, 1.0);
        let mut rec = Recorder::default();
        play_out(&mut session, &mut pilot, &mut rec);

        let record = session.last_record().unwrap();
        assert!(!record.is_new_record);
        assert_eq!(record.best, 10_000);
        assert_eq!(session.menu_high_score(), 10_000);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut session = Session::new(MemoryStore::new(), 1, Viewport::default());
        let mut pilot = Autopilot::new(1, 1.0);
        let mut rec = Recorder::default();
        play_out(&mut session, &mut pilot, &mut rec);
        assert!(session.last_record().is_some());

        session.restart(2);
        assert!(!session.state().is_over());
        assert_eq!(session.state().score.lives(), 3);
        assert_eq!(session.state().score.score(), 0);
        assert!(session.state().orbs.is_empty());
        assert!(session.last_record().is_none());
    }

    #[test]
    fn test_reset_high_score() {
        let mut session = Session::new(MemoryStore::with_value(40), 1, Viewport::default());
        assert_eq!(session.menu_high_score(), 40);
        session.reset_high_score();
        assert_eq!(session.menu_high_score(), 0);
    }

    #[test]
    fn test_reset_after_run_clears_shown_best() {
        let mut session = Session::new(MemoryStore::with_value(1000), 5, Viewport::default());
        while !session.state().is_over() {
            session.tick(&TickInput::default(), 16.0);
        }
        assert_eq!(session.last_record().map(|r| r.best), Some(1000));
        session.reset_high_score();
        assert_eq!(session.last_record().map(|r| r.best), Some(0));
        assert_eq!(session.menu_high_score(), 0);
    }
}
