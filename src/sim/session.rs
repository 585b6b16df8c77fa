//! Session: per-frame orchestration of skier, obstacle field and score
//!
//! One `tick` per rendered frame. The field listens to the skier's move and
//! control events, so steering and advancing can grow the field as a side
//! effect. Everything runs on one thread; the field sits behind
//! `Rc<RefCell<_>>` because the skier's listeners share it with the session.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use super::geometry::{Position, Rect};
use super::obstacles::{Drawable, ObstacleField};
use super::skier::{Control, ControlEvent, MoveEvent, Skier, SkierState};
use crate::highscores::ScoreStore;
use crate::input::Command;
use crate::random::RandomSource;
use crate::settings::Settings;

/// A running game
#[derive(Debug)]
pub struct Session<R: RandomSource + 'static, S: ScoreStore> {
    skier: Skier,
    field: Rc<RefCell<ObstacleField<R>>>,
    store: S,
    /// Distance score minus crash penalties (can go negative)
    score: i64,
    /// Furthest downhill y reached
    lowest_y: i32,
    paused: bool,
    crash_penalty: i64,
    crashes: u32,
    ticks: u64,
}

impl<R: RandomSource + 'static, S: ScoreStore> Session<R, S> {
    /// Wire the field to the skier's events and scatter the opening obstacles
    pub fn new(settings: &Settings, rng: R, store: S) -> Self {
        let field = Rc::new(RefCell::new(ObstacleField::new(settings, rng)));
        let mut skier = Skier::new(settings.skier_speed, settings.diagonal_factor);

        let on_move = Rc::clone(&field);
        skier.on_move(move |event: &MoveEvent| {
            on_move.borrow_mut().react_to_move(event);
        });
        let on_control = Rc::clone(&field);
        skier.on_control(move |event: &ControlEvent| {
            on_control.borrow_mut().react_to_control(event);
        });

        field.borrow_mut().scatter_initial(skier.position);
        log::info!("Session started (best score {})", store.best_score());

        Self {
            skier,
            field,
            store,
            score: 0,
            lowest_y: 0,
            paused: false,
            crash_penalty: settings.crash_penalty,
            crashes: 0,
            ticks: 0,
        }
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn lowest_y(&self) -> i32 {
        self.lowest_y
    }

    pub fn best_score(&self) -> i64 {
        self.store.best_score()
    }

    pub fn crashes(&self) -> u32 {
        self.crashes
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn skier(&self) -> &Skier {
        &self.skier
    }

    pub fn skier_mut(&mut self) -> &mut Skier {
        &mut self.skier
    }

    pub fn field(&self) -> Ref<'_, ObstacleField<R>> {
        self.field.borrow()
    }

    pub fn field_mut(&self) -> RefMut<'_, ObstacleField<R>> {
        self.field.borrow_mut()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Advance one frame. Returns true when the skier crashed on this frame.
    pub fn tick(&mut self) -> bool {
        if self.paused {
            return false;
        }

        self.ticks += 1;
        self.skier.advance();
        let crashed = self.check_collision();
        self.add_score();
        crashed
    }

    /// Crash the skier on contact. The penalty is charged once per crash,
    /// not on every frame spent lying in the snow.
    fn check_collision(&mut self) -> bool {
        let colliding = self
            .field
            .borrow()
            .collides(self.skier.state, self.skier.position);
        if !colliding {
            return false;
        }

        let new_crash = self.skier.state != SkierState::Crashed;
        if new_crash {
            self.score -= self.crash_penalty;
            self.crashes += 1;
            log::debug!(
                "Crash #{} at {} (score {})",
                self.crashes,
                self.skier.position,
                self.score
            );
        }
        self.skier.state = SkierState::Crashed;
        new_crash
    }

    /// Score new downhill distance and record a new best
    fn add_score(&mut self) {
        let y = self.skier.position.y;
        if y > self.lowest_y {
            self.score += i64::from(y - self.lowest_y);
            self.lowest_y = y;
        }

        if self.score > self.store.best_score() {
            self.store.set_best_score(self.score);
        }
    }

    /// Steering input (ignored while paused)
    pub fn steer(&mut self, control: Control) {
        if !self.paused {
            self.skier.control(control);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    /// Start over: fresh skier, fresh field, zero score. Listeners and the
    /// best score survive.
    pub fn restart(&mut self) {
        self.skier.reset();
        {
            let mut field = self.field.borrow_mut();
            field.clear();
            field.scatter_initial(self.skier.position);
        }
        self.score = 0;
        self.lowest_y = 0;
        self.paused = false;
        self.crashes = 0;
        self.ticks = 0;
        log::info!("Session restarted");
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Steer(control) => self.steer(control),
            Command::Restart => self.restart(),
            Command::TogglePause => self.toggle_pause(),
        }
    }

    /// Apply a raw key code. Returns false for unmapped keys.
    pub fn handle_key(&mut self, code: u32) -> bool {
        match Command::from_key(code) {
            Some(command) => {
                self.apply(command);
                true
            }
            None => false,
        }
    }

    /// Cull the field around the skier and return what is still on screen
    pub fn visible(&mut self) -> Vec<Drawable> {
        self.field.borrow_mut().cull_and_collect(self.skier.position)
    }

    /// Debug view of every collision rectangle (skier first)
    pub fn collision_rects(&self) -> Vec<Rect> {
        self.field
            .borrow()
            .collision_rects(self.skier.state, self.skier.position)
    }

    pub fn skier_position(&self) -> Position {
        self.skier.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryScoreStore;
    use crate::input::{KEY_LEFT, KEY_PAUSE};
    use crate::random::{ScriptedRandom, SeededRandom};
    use crate::sim::ObstacleKind;
    use crate::sprites::{Footprint, SpriteCatalog};
    use proptest::prelude::*;

    fn session(seed: u64) -> Session<SeededRandom, MemoryScoreStore> {
        Session::new(&Settings::default(), SeededRandom::new(seed), MemoryScoreStore::new())
    }

    fn empty_session(seed: u64) -> Session<SeededRandom, MemoryScoreStore> {
        let s = session(seed);
        s.field_mut().clear();
        s
    }

    #[test]
    fn test_new_session_scatters() {
        let s = session(5);
        assert!((5..=7).contains(&s.field().len()));
        assert_eq!(s.score(), 0);
        assert_eq!(s.skier().state, SkierState::FacingRight);
    }

    #[test]
    fn test_score_tracks_lowest_y() {
        let mut s = empty_session(11);
        s.skier_mut().state = SkierState::StraightDown;
        for _ in 0..5 {
            s.tick();
        }
        assert_eq!(s.skier_position().y, 40);
        assert_eq!(s.score(), 40);
        assert_eq!(s.lowest_y(), 40);
        assert_eq!(s.best_score(), 40);

        // Climbing back up scores nothing
        s.skier_mut().state = SkierState::FacingRight;
        s.skier_mut().position = Position::new(0, 30);
        s.tick();
        assert_eq!(s.score(), 40);
        assert_eq!(s.lowest_y(), 40);
    }

    #[test]
    fn test_crash_penalty_charged_once() {
        let settings = Settings {
            sprites: SpriteCatalog::uniform(Footprint::new(20, 30)),
            ..Settings::default()
        };
        let mut s = Session::new(&settings, SeededRandom::new(2), MemoryScoreStore::new());
        s.field_mut().clear();
        s.field_mut().insert(ObstacleKind::Tree, Position::new(400, 250));

        assert!(s.tick());
        assert_eq!(s.skier().state, SkierState::Crashed);
        assert_eq!(s.score(), -150);

        for _ in 0..10 {
            assert!(!s.tick());
        }
        assert_eq!(s.score(), -150);
        assert_eq!(s.crashes(), 1);
        assert_eq!(s.store().writes(), 0);
    }

    #[test]
    fn test_best_score_only_written_when_beaten() {
        let mut store = MemoryScoreStore::new();
        store.set_best_score(100);
        let mut s = Session::new(&Settings::default(), SeededRandom::new(3), store);
        s.field_mut().clear();
        s.skier_mut().state = SkierState::StraightDown;
        for _ in 0..12 {
            s.tick();
        }
        // 96 < 100
        assert_eq!(s.best_score(), 100);
        s.tick();
        assert_eq!(s.best_score(), 104);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut s = empty_session(4);
        s.skier_mut().state = SkierState::StraightDown;
        assert!(s.handle_key(KEY_PAUSE));
        assert!(s.is_paused());

        s.tick();
        s.handle_key(KEY_LEFT);
        assert_eq!(s.skier_position(), Position::ZERO);
        assert_eq!(s.skier().state, SkierState::StraightDown);
        assert_eq!(s.ticks(), 0);

        s.apply(Command::TogglePause);
        s.tick();
        assert_eq!(s.skier_position().y, 8);
    }

    #[test]
    fn test_restart_resets_but_keeps_best() {
        let mut s = empty_session(8);
        s.skier_mut().state = SkierState::StraightDown;
        for _ in 0..10 {
            s.tick();
        }
        s.toggle_pause();
        s.apply(Command::Restart);

        assert_eq!(s.score(), 0);
        assert_eq!(s.lowest_y(), 0);
        assert!(!s.is_paused());
        assert_eq!(s.skier_position(), Position::ZERO);
        assert_eq!(s.skier().state, SkierState::FacingRight);
        assert!((5..=7).contains(&s.field().len()));
        assert_eq!(s.best_score(), 80);
    }

    #[test]
    fn test_move_listener_spawns_through_session() {
        // Constant 8: scatter lands one obstacle (the rest collide with it),
        // every spawn roll hits.
        let mut s = Session::new(
            &Settings::default(),
            ScriptedRandom::constant(8),
            MemoryScoreStore::new(),
        );
        assert_eq!(s.field().len(), 1);

        s.skier_mut().state = SkierState::StraightDown;
        s.tick();
        assert_eq!(s.field().len(), 2);
        let spawned = s.field().obstacles()[1];
        assert!(spawned.position.y >= s.skier_position().y + 500);
    }

    #[test]
    fn test_control_listener_spawns_through_session() {
        let mut s = Session::new(
            &Settings::default(),
            ScriptedRandom::constant(8),
            MemoryScoreStore::new(),
        );
        // Facing right: sidestep rolls a spawn past the right edge
        s.steer(Control::SteerRight);
        assert_eq!(s.field().len(), 2);
        let spawned = s.field().obstacles()[1];
        assert!(spawned.position.x >= s.skier_position().x + 800);
    }

    #[test]
    fn test_visible_and_debug_rects() {
        let mut s = session(21);
        let count = s.field().len();
        let drawn = s.visible();
        assert_eq!(drawn.len(), s.field().len());
        assert!(drawn.len() <= count);
        assert_eq!(s.collision_rects().len(), s.field().len() + 1);
    }

    proptest! {
        #[test]
        fn best_score_never_below_score(seed in any::<u64>(), moves in proptest::collection::vec(0u8..5, 1..80)) {
            let mut s = session(seed);
            for m in moves {
                match m {
                    0 => s.steer(Control::SteerLeft),
                    1 => s.steer(Control::SteerRight),
                    2 => s.steer(Control::ForceDown),
                    3 => s.steer(Control::SteerUp),
                    _ => {}
                }
                s.tick();
                s.visible();
                prop_assert!(s.best_score() >= s.score());
                prop_assert!(s.lowest_y() >= 0);
            }
        }
    }
}
