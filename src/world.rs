use crate::audio::{Sound, SoundBoard};
use crate::config::GameConfig;
use crate::engine::input::InputState;
use crate::engine::{ImageHandle, Interval, Mirrored, Rect, Surface};
use crate::level::Level;
use crate::sprite::character::Character;
use crate::sprite::objects::{ThrowableObject, IMAGES_ROTATION, IMAGES_SPLASH};
use crate::sprite::status_bar::{StatusBar, StatusBarKind};
use crate::sprite::Drawable;
use std::rc::Rc;

// spawn point of a thrown bottle, relative to the character
const THROW_OFFSET_X: f64 = 25.0;
const THROW_OFFSET_Y: f64 = 100.0;
const COLLISION_FRAME_COLOR: &str = "blue";
const COLLISION_FRAME_WIDTH: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Running,
    Lost,
    Won,
}

/// TABLE
/// ┌───────────────────── World Update (one fixed step) ─────────────────────┐
/// │  character.update(input)     walk / jump / hurt / die                   │
/// │  enemies, clouds, coins      drift + animation                          │
/// │  throwables                  arc, enemy hits, splash when they land     │
/// │  camera_x                    follows the character                      │
/// │  physics cadence (100ms)     ┌─► enemy contact  -> damage, health bar   │
/// │                              ├─► SPACE held     -> spawn a bottle       │
/// │                              └─► pickups        -> coins / bottles      │
/// │  outcome                     lost / won, stops the theme once           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// One World per playthrough: a reload builds a new one, nothing is shared
pub struct World {
    level: Level,
    character: Character,
    health_bar: StatusBar,
    coin_bar: StatusBar,
    bottle_bar: StatusBar,
    camera_x: f64,
    physics: Interval,
    outcome: Outcome,
    total_coins: usize,
    total_bottles: usize,
    config: GameConfig,
    sounds: Rc<dyn SoundBoard>,
}

impl World {
    pub fn new(level: Level, config: GameConfig, sounds: Rc<dyn SoundBoard>) -> Self {
        let character = Character::new();
        let camera_x = config.camera_offset - character.x();
        World {
            total_coins: level.coins.len(),
            total_bottles: level.bottles.len(),
            level,
            character,
            health_bar: StatusBar::new(StatusBarKind::Health),
            coin_bar: StatusBar::new(StatusBarKind::Coins),
            bottle_bar: StatusBar::new(StatusBarKind::Bottles),
            camera_x,
            physics: Interval::new(config.physics_period),
            outcome: Outcome::Running,
            config,
            sounds,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn health_bar(&self) -> &StatusBar {
        &self.health_bar
    }

    pub fn coin_bar(&self) -> &StatusBar {
        &self.coin_bar
    }

    pub fn bottle_bar(&self) -> &StatusBar {
        &self.bottle_bar
    }

    pub fn camera_x(&self) -> f64 {
        self.camera_x
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    // ==================== Simulation ====================
    /// Advances everything by `dt` simulated milliseconds
    pub fn update(&mut self, dt: f64, input: &InputState) {
        let sounds = self.sounds.clone();
        let level_end_x = self.level.level_end_x();
        self.character
            .update(dt, input, level_end_x, sounds.as_ref());

        let character_x = self.character.x();
        for enemy in self.level.enemies.iter_mut() {
            enemy.update(dt, character_x);
        }
        for cloud in self.level.clouds.iter_mut() {
            cloud.update(dt);
        }
        for coin in self.level.coins.iter_mut() {
            coin.update(dt);
        }
        self.update_throwables(dt);

        self.camera_x = self.config.camera_offset - self.character.x();

        for _ in 0..self.physics.tick(dt) {
            self.run_physics(input);
        }
        self.check_outcome();
    }

    /// One tick of the 100ms cadence
    fn run_physics(&mut self, input: &InputState) {
        self.check_collisions();
        self.check_throw_objects(input);
        self.check_pickups();
    }

    /// Every living enemy touching the character hits it again, every tick
    fn check_collisions(&mut self) {
        for enemy in self.level.enemies.iter() {
            if enemy.is_dead() {
                continue;
            }
            if self.character.check_if_colliding(enemy) {
                self.character.get_hit(self.config.contact_damage);
                self.health_bar.set_percentage(self.character.lifepoints());
                log::info!("character hit, lifepoints left : {}", self.character.lifepoints());
            }
        }
    }

    /// One bottle per tick while SPACE is held, no cooldown
    fn check_throw_objects(&mut self, input: &InputState) {
        if input.space {
            let bottle = ThrowableObject::new(
                self.character.x() + THROW_OFFSET_X,
                self.character.y() + THROW_OFFSET_Y,
                self.character.facing(),
            );
            self.level.throwable_objects.push(bottle);
            self.sounds.play(Sound::FlyingBottle);
        }
    }

    fn check_pickups(&mut self) {
        for coin in self.level.coins.iter_mut() {
            if !coin.collected && self.character.check_if_colliding(coin) {
                coin.collected = true;
                self.character.coins += 1;
                self.sounds.play(Sound::PickCoin);
            }
        }
        for bottle in self.level.bottles.iter_mut() {
            if !bottle.collected && self.character.check_if_colliding(bottle) {
                bottle.collected = true;
                self.character.bottles += 1;
                self.sounds.play(Sound::PickBottle);
            }
        }
        self.coin_bar
            .set_percentage(share(self.character.coins as usize, self.total_coins));
        self.bottle_bar
            .set_percentage(share(self.character.bottles as usize, self.total_bottles));
    }

    /// Bottles are checked against enemies on every step, they only reach a
    /// chicken's height for the last few ticks of their arc
    fn update_throwables(&mut self, dt: f64) {
        let enemies = &mut self.level.enemies;
        for bottle in self.level.throwable_objects.iter_mut() {
            bottle.update(dt);
            if !bottle.is_flying() {
                continue;
            }
            let bounds = bottle.sprite().bounds();
            let target = enemies
                .iter_mut()
                .find(|enemy| !enemy.is_dead() && enemy.bounds().intersects(&bounds));
            if let Some(enemy) = target {
                bottle.smash();
                self.sounds.play(Sound::SmashingBottle);
                if enemy.take_bottle_hit() {
                    self.sounds.play(Sound::DyingBird);
                }
            } else if bottle.has_landed() {
                bottle.smash();
                self.sounds.play(Sound::SmashingBottle);
            }
        }
    }

    fn check_outcome(&mut self) {
        if self.outcome != Outcome::Running {
            return;
        }
        let boss_dead = self
            .level
            .enemies
            .iter()
            .any(|enemy| enemy.is_endboss() && enemy.is_dead());
        self.outcome = if self.character.is_dead() {
            Outcome::Lost
        } else if boss_dead {
            Outcome::Won
        } else {
            return;
        };
        log::info!("game over : {:?}", self.outcome);
        self.sounds.pause(Sound::Theme);
    }

    // ==================== Rendering ====================
    /// Paints the latest simulated state, never mutates it
    /// - world space (camera translated) back to front, then the HUD
    pub fn draw(&self, renderer: &dyn Surface) {
        renderer.clear(&Rect::new(
            0.0,
            0.0,
            self.config.canvas_width,
            self.config.canvas_height,
        ));

        renderer.translate(self.camera_x, 0.0);
        self.draw_all(renderer, &self.level.background_objects);
        self.draw_all(renderer, &self.level.clouds);
        self.draw_all(renderer, self.level.coins.iter().filter(|coin| !coin.collected));
        self.draw_all(renderer, self.level.bottles.iter().filter(|bottle| !bottle.collected));
        self.draw_all(renderer, &self.level.enemies);
        self.draw_all(
            renderer,
            self.level.throwable_objects.iter().filter(|bottle| !bottle.is_spent()),
        );
        self.draw_object(renderer, &self.character);
        renderer.translate(-self.camera_x, 0.0);

        self.draw_object(renderer, &self.health_bar);
        self.draw_object(renderer, &self.coin_bar);
        self.draw_object(renderer, &self.bottle_bar);
    }

    fn draw_all<'a, T: Drawable + 'a>(
        &self,
        renderer: &dyn Surface,
        objects: impl IntoIterator<Item = &'a T>,
    ) {
        for object in objects {
            self.draw_object(renderer, object);
        }
    }

    /// Mirrored objects are drawn at -x inside a flipped transform, the
    /// guard restores it before the next object
    fn draw_object(&self, renderer: &dyn Surface, object: &dyn Drawable) {
        let sprite = object.sprite();
        let mirrored = object
            .other_direction()
            .then(|| Mirrored::begin(renderer, sprite.width));
        let x = if mirrored.is_some() { -sprite.x } else { sprite.x };
        let destination = Rect::new(x, sprite.y, sprite.width, sprite.height);

        if let Some(image) = sprite.image() {
            renderer.draw_image(image, &destination);
        }
        if self.config.show_collision_frames && object.draws_collision_frame() {
            renderer.stroke_rect(&destination, COLLISION_FRAME_COLOR, COLLISION_FRAME_WIDTH);
        }
    }

    /// Starts decoding every image this world can show
    pub fn preload(&self, renderer: &dyn Surface) {
        let level = &self.level;
        let sprites = level
            .background_objects
            .iter()
            .map(|object| object.sprite())
            .chain(level.clouds.iter().map(|cloud| cloud.sprite()))
            .chain(level.enemies.iter().map(|enemy| enemy.sprite()))
            .chain(level.coins.iter().map(|coin| coin.sprite()))
            .chain(level.bottles.iter().map(|bottle| bottle.sprite()))
            .chain([
                self.character.sprite(),
                self.health_bar.sprite(),
                self.coin_bar.sprite(),
                self.bottle_bar.sprite(),
            ]);
        for sprite in sprites {
            for image in sprite.images() {
                renderer.preload(image);
            }
        }
        // bottles don't exist until thrown
        for path in IMAGES_ROTATION.iter().chain(IMAGES_SPLASH) {
            renderer.preload(&ImageHandle::new(path));
        }
    }
}

/// Collected share as a percentage, an empty level counts as full
fn share(collected: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    collected as f64 * 100.0 / total as f64
}
