use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{GameError, Result};
use crate::game::alien::MYSTERY_SHIP_POINTS;
use crate::game::laser::{self, Laser};
use crate::game::obstacle::{self, Obstacle};
use crate::game::{
    take_colliding, DrawItem, Formation, Input, MysteryShip, ScreenConfig, Sound, Spaceship,
    Sprite, SpriteSheet,
};
use crate::scores::HighScore;

pub const STARTING_LIVES: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Scalar state for the status bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    pub lives: u32,
    pub score: u32,
    pub highscore: u32,
    pub running: bool,
}

impl Hud {
    pub fn score_text(&self) -> String {
        format!("{:05}", self.score)
    }

    pub fn highscore_text(&self) -> String {
        format!("{:05}", self.highscore)
    }
}

/// Owns every entity and runs one frame of the game at a time.
pub struct GameState<R = StdRng> {
    screen: ScreenConfig,
    sprites: SpriteSheet,
    rng: R,
    spaceship: Spaceship,
    formation: Formation,
    obstacles: Vec<Obstacle>,
    alien_lasers: Vec<Laser>,
    mystery_ship: Option<MysteryShip>,
    // Fresh copies handed out on every reset.
    start_formation: Formation,
    start_obstacles: Vec<Obstacle>,
    lives: u32,
    score: u32,
    highscore: HighScore,
    status: GameStatus,
    sounds: Vec<Sound>,
}

impl GameState<StdRng> {
    /// Stock sprites with a deterministic random source.
    pub fn with_seed(screen: ScreenConfig, highscore: HighScore, seed: u64) -> Result<Self> {
        Self::new(
            screen,
            SpriteSheet::builtin(),
            highscore,
            StdRng::seed_from_u64(seed),
        )
    }
}

impl<R: Rng> GameState<R> {
    pub fn new(
        screen: ScreenConfig,
        sprites: SpriteSheet,
        highscore: HighScore,
        rng: R,
    ) -> Result<Self> {
        sprites.validate()?;
        let start_formation = Formation::create(&screen, &sprites)?;
        validate_geometry(&screen, &start_formation)?;
        let start_obstacles = obstacle::create_obstacles(&screen);
        let spaceship = Spaceship::new(screen, &sprites)?;

        tracing::info!(
            width = screen.screen_width,
            height = screen.screen_height,
            offset = screen.offset,
            highscore = highscore.value(),
            "starting game"
        );

        Ok(Self {
            screen,
            sprites,
            rng,
            spaceship,
            formation: start_formation.clone(),
            obstacles: start_obstacles.clone(),
            alien_lasers: Vec::new(),
            mystery_ship: None,
            start_formation,
            start_obstacles,
            lives: STARTING_LIVES,
            score: 0,
            highscore,
            status: GameStatus::Running,
            sounds: Vec::new(),
        })
    }

    /// One frame. While the game is over only the restart input is honoured.
    pub fn update(&mut self, input: &Input, now: u64) {
        if !self.is_running() {
            if input.restart {
                self.reset();
            }
            return;
        }

        if self.spaceship.update(input, now) {
            self.sounds.push(Sound::LaserFired);
        }
        self.move_aliens();
        laser::update_all(&mut self.alien_lasers);
        self.update_mystery_ship();
        self.check_for_collisions();
    }

    pub fn move_aliens(&mut self) {
        self.formation.advance(&self.screen);
    }

    /// A uniformly chosen alien drops a laser. Nothing happens with no aliens
    /// left or once the game is over.
    pub fn fire_random_alien_laser(&mut self) {
        if !self.is_running() {
            return;
        }
        let Some(shooter) = self.formation.pick_shooter(&mut self.rng) else {
            return;
        };
        let laser = Laser::alien(shooter.rect().center(), self.screen.screen_height);
        self.alien_lasers.push(laser);
    }

    /// Sends a mystery ship across from a random side, replacing any in flight.
    /// Ignored once the game is over.
    pub fn spawn_mystery_ship(&mut self) {
        if !self.is_running() {
            return;
        }
        match MysteryShip::spawn(&self.screen, &self.sprites, &mut self.rng) {
            Ok(ship) => {
                tracing::debug!(speed = ship.speed(), "mystery ship spawned");
                self.mystery_ship = Some(ship);
            }
            // The sheet was validated when the game was built.
            Err(e) => tracing::error!("cannot spawn mystery ship: {e}"),
        }
    }

    fn update_mystery_ship(&mut self) {
        if let Some(ship) = &mut self.mystery_ship {
            if !ship.update() {
                self.mystery_ship = None;
            }
        }
    }

    pub fn check_for_collisions(&mut self) {
        let mut lasers = std::mem::take(self.spaceship.lasers_mut());
        lasers.retain(|laser| !self.resolve_player_laser(laser));
        *self.spaceship.lasers_mut() = lasers;

        let mut lasers = std::mem::take(&mut self.alien_lasers);
        lasers.retain(|laser| !self.resolve_alien_laser(laser));
        self.alien_lasers = lasers;

        let ship_rect = self.spaceship.rect();
        let mut ship_touched = false;
        for alien in self.formation.aliens() {
            let rect = alien.rect();
            obstacle::erode_all(&mut self.obstacles, &rect);
            if rect.collides(&ship_rect) {
                ship_touched = true;
            }
        }
        if ship_touched {
            self.game_over();
        }
    }

    /// Returns true when the laser was used up. A laser hits everything it
    /// overlaps this frame: aliens, the mystery ship and obstacle blocks.
    fn resolve_player_laser(&mut self, laser: &Laser) -> bool {
        let rect = laser.rect();
        let mut consumed = false;

        // Every alien under the laser goes, not just the first.
        let hits = take_colliding(&rect, self.formation.aliens_mut());
        if !hits.is_empty() {
            self.sounds.push(Sound::Explosion);
            for alien in &hits {
                self.add_score(alien.kind().points());
            }
            consumed = true;
        }

        if self.mystery_ship.is_some_and(|ship| ship.rect().collides(&rect)) {
            self.mystery_ship = None;
            self.sounds.push(Sound::Explosion);
            self.add_score(MYSTERY_SHIP_POINTS);
            consumed = true;
        }

        if obstacle::erode_all(&mut self.obstacles, &rect) {
            consumed = true;
        }
        consumed
    }

    fn resolve_alien_laser(&mut self, laser: &Laser) -> bool {
        let rect = laser.rect();
        if rect.collides(&self.spaceship.rect()) {
            self.lose_life();
            return true;
        }
        obstacle::erode_all(&mut self.obstacles, &rect)
    }

    fn lose_life(&mut self) {
        if self.lives == 0 {
            return;
        }
        self.lives -= 1;
        tracing::debug!(lives = self.lives, "spaceship hit");
        if self.lives == 0 {
            self.game_over();
        }
    }

    fn add_score(&mut self, points: u32) {
        self.score += points;
        if self.highscore.submit(self.score) {
            tracing::debug!(highscore = self.score, "new highscore");
        }
    }

    fn game_over(&mut self) {
        if self.status == GameStatus::GameOver {
            return;
        }
        self.status = GameStatus::GameOver;
        tracing::info!(score = self.score, "We're under their control now!");
    }

    /// Fresh round. The highscore is kept.
    pub fn reset(&mut self) {
        self.status = GameStatus::Running;
        self.lives = STARTING_LIVES;
        self.score = 0;
        self.spaceship.reset();
        self.formation = self.start_formation.clone();
        self.obstacles = self.start_obstacles.clone();
        self.alien_lasers.clear();
        self.mystery_ship = None;
        self.sounds.clear();
        tracing::info!(highscore = self.highscore.value(), "game reset");
    }

    /// Everything to draw this frame, back to front.
    pub fn render_list(&self) -> Vec<DrawItem> {
        let mut items = vec![self.spaceship.draw_item()];
        items.extend(self.spaceship.lasers().iter().map(Sprite::draw_item));
        for obstacle in &self.obstacles {
            items.extend(obstacle.blocks().iter().map(Sprite::draw_item));
        }
        items.extend(self.formation.aliens().iter().map(Sprite::draw_item));
        items.extend(self.alien_lasers.iter().map(Sprite::draw_item));
        items.extend(self.mystery_ship.iter().map(Sprite::draw_item));
        items
    }

    pub fn hud(&self) -> Hud {
        Hud {
            lives: self.lives,
            score: self.score,
            highscore: self.highscore.value(),
            running: self.is_running(),
        }
    }

    /// Audio cues raised since the last call.
    pub fn drain_sounds(&mut self) -> Vec<Sound> {
        std::mem::take(&mut self.sounds)
    }

    pub fn screen(&self) -> &ScreenConfig {
        &self.screen
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn highscore(&self) -> u32 {
        self.highscore.value()
    }

    pub fn spaceship(&self) -> &Spaceship {
        &self.spaceship
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn alien_lasers(&self) -> &[Laser] {
        &self.alien_lasers
    }

    pub fn mystery_ship(&self) -> Option<&MysteryShip> {
        self.mystery_ship.as_ref()
    }
}

fn validate_geometry(screen: &ScreenConfig, formation: &Formation) -> Result<()> {
    if screen.offset < 0 || screen.screen_width <= screen.offset {
        return Err(GameError::InvalidGeometry {
            msg: format!(
                "offset {} must be non-negative and below the width {}",
                screen.offset, screen.screen_width
            ),
        });
    }
    let right_bound = screen.right_bound();
    if let Some(alien) = formation.aliens().iter().find(|a| a.rect().right() >= right_bound) {
        return Err(GameError::InvalidGeometry {
            msg: format!(
                "formation does not fit: alien right edge {} reaches {}",
                alien.rect().right(),
                right_bound
            ),
        });
    }
    if let Some(lowest) = formation.aliens().iter().map(|a| a.rect().bottom()).max() {
        if lowest >= screen.screen_height {
            return Err(GameError::InvalidGeometry {
                msg: format!(
                    "formation bottom {lowest} is below the screen height {}",
                    screen.screen_height
                ),
            });
        }
    }
    Ok(())
}
