use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::game::{GameState, Sound};
use crate::input::InputTracker;
use crate::timer::{Interval, RandomInterval};

pub const TICK_RATE_MS: u64 = 16; // ~60 FPS
pub const ALIEN_FIRE_MS: u64 = 300;
pub const MYSTERY_SHIP_MS: std::ops::RangeInclusive<u64> = 4_000..=8_000;
const EXPLOSION_FLASH_MS: u64 = 120;

/// The frame loop around a [`GameState`]: input, timers, pause and audio cues.
pub struct App {
    pub should_quit: bool,
    pub paused: bool,
    pub game: GameState,
    input: InputTracker,
    alien_fire: Interval,
    mystery_ship: RandomInterval,
    timer_rng: StdRng,
    /// Wall clock of the previous tick, in ms.
    last_tick: u64,
    /// Game clock in ms; stands still while paused.
    game_time: u64,
    flash_until: u64,
    frame: u64,
    pub shots_fired: u32,
}

impl App {
    /// `releases` tells whether the terminal reports key releases.
    pub fn new(game: GameState, seed: u64, releases: bool) -> Self {
        let mut timer_rng = StdRng::seed_from_u64(seed.wrapping_add(1));
        let mystery_ship = RandomInterval::new(MYSTERY_SHIP_MS, 0, &mut timer_rng);
        Self {
            should_quit: false,
            paused: false,
            game,
            input: InputTracker::new(releases),
            alien_fire: Interval::new(ALIEN_FIRE_MS, 0),
            mystery_ship,
            timer_rng,
            last_tick: 0,
            game_time: 0,
            flash_until: 0,
            frame: 0,
            shots_fired: 0,
        }
    }

    /// One frame at wall-clock time `now` (ms since start).
    pub fn on_tick(&mut self, now: u64) {
        let delta = now.saturating_sub(self.last_tick);
        self.last_tick = now;
        if self.paused {
            return;
        }
        self.game_time += delta;
        self.frame += 1;
        let t = self.game_time;

        let input = self.input.snapshot(now);
        let was_running = self.game.is_running();
        if was_running {
            if self.alien_fire.poll(t) {
                self.game.fire_random_alien_laser();
            }
            if self.mystery_ship.poll(t, &mut self.timer_rng) {
                self.game.spawn_mystery_ship();
            }
        }

        self.game.update(&input, t);

        if !was_running && self.game.is_running() {
            self.alien_fire.restart(t);
            self.mystery_ship.rearm(t, &mut self.timer_rng);
        } else if was_running && !self.game.is_running() {
            self.input.clear();
        }

        for sound in self.game.drain_sounds() {
            self.play(sound, t);
        }
    }

    fn play(&mut self, sound: Sound, t: u64) {
        tracing::trace!(?sound, "sound cue");
        match sound {
            Sound::LaserFired => self.shots_fired += 1,
            Sound::Explosion => self.flash_until = t + EXPLOSION_FLASH_MS,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent, now: u64) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if key.kind == KeyEventKind::Press {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    if self.game.is_running() {
                        self.paused = !self.paused;
                        self.input.clear();
                    }
                    return;
                }
                _ => {}
            }
        }

        if !self.paused {
            self.input.key_event(key, now);
        }
    }

    /// True while an explosion flash should show.
    pub fn flashing(&self) -> bool {
        self.game_time < self.flash_until
    }

    /// Animation frame counter; advances only while unpaused.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ScreenConfig;
    use crate::scores::HighScore;
    use crossterm::event::KeyEventState;

    fn app() -> App {
        let game = GameState::with_seed(ScreenConfig::default(), HighScore::in_memory(0), 9)
            .unwrap();
        App::new(game, 9, false)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn aliens_fire_on_the_interval() {
        let mut app = app();
        for now in (16..300).step_by(16) {
            app.on_tick(now);
        }
        assert!(app.game.alien_lasers().is_empty());
        app.on_tick(304);
        assert_eq!(app.game.alien_lasers().len(), 1);
    }

    #[test]
    fn mystery_ship_arrives_when_due() {
        let mut app = app();
        let due = app.mystery_ship.next_at();
        assert!((4_000..=8_000).contains(&due));

        app.on_tick(due - 1);
        assert!(app.game.mystery_ship().is_none());
        app.on_tick(due);
        assert!(app.game.mystery_ship().is_some());
        assert!(app.mystery_ship.next_at() >= due + 4_000);
    }

    #[test]
    fn pause_stops_the_game_clock() {
        let mut app = app();
        app.on_tick(16);
        let formation = app.game.formation().clone();
        app.on_key(press(KeyCode::Char('p')), 20);
        for now in (32..5_000).step_by(16) {
            app.on_tick(now);
        }
        assert_eq!(app.game.formation(), &formation);
        assert!(app.game.alien_lasers().is_empty());

        app.on_key(press(KeyCode::Char('p')), 5_000);
        app.on_tick(5_016);
        assert_ne!(app.game.formation(), &formation);
    }

    #[test]
    fn fire_key_launches_a_laser() {
        let mut app = app();
        app.on_key(press(KeyCode::Char(' ')), 10);
        app.on_tick(16);
        assert_eq!(app.game.spaceship().lasers().len(), 1);
        assert_eq!(app.shots_fired, 1);
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        app.on_key(press(KeyCode::Char('q')), 0);
        assert!(app.should_quit);

        let mut app = self::app();
        let mut ctrl_c = press(KeyCode::Char('c'));
        ctrl_c.modifiers = KeyModifiers::CONTROL;
        app.on_key(ctrl_c, 0);
        assert!(app.should_quit);
    }
}
