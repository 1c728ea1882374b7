// TABLE:
// ┌──────────────────────────────────────────────────────────────────────────┐
// │                      Entity Layers                                       │
// ├───────────────────┬──────────────────────────────────────────────────────┤
// │ Layer             │ What it adds                                         │
// ├───────────────────┼──────────────────────────────────────────────────────┤
// │ Sprite            │ position, size, current image, image cache           │
// │ └── Movable       │ speed, facing, gravity, lifepoints, animation cycle  │
// │     ├── Character │ input driven state machine (state.rs)                │
// │     ├── Enemy     │ Chicken / Endboss (enemies.rs)                       │
// │     └── objects   │ ThrowableObject, Coin, Cloud (objects.rs)            │
// │ StatusBar         │ percentage bucketed HUD sprite (status_bar.rs)       │
// └───────────────────┴──────────────────────────────────────────────────────┘
// Composition instead of inheritance: every variant owns a Sprite or a
// Movable and exposes it through Drawable, which is all the world needs to
// paint it.
pub mod character;
pub mod enemies;
pub mod objects;
pub mod state;
pub mod status_bar;

use crate::engine::{ImageHandle, Interval, Rect, FRAME_SIZE};
use std::collections::HashMap;

// gravity runs at 25Hz, movement at the frame rate
pub const GRAVITY_PERIOD: f64 = 1000.0 / 25.0;
pub const MOVE_PERIOD: f64 = FRAME_SIZE;

/// What the world needs to paint an entity
pub trait Drawable {
    fn sprite(&self) -> &Sprite;

    fn other_direction(&self) -> bool {
        false
    }

    /// Actors that take part in collisions get a debug frame around them
    fn draws_collision_frame(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

// ==================== Sprite ====================
/// Visual entity: a rectangle in world space plus the images it can show
#[derive(Debug, Clone, Default)]
pub struct Sprite {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    image: Option<ImageHandle>,
    image_cache: HashMap<String, ImageHandle>,
}

impl Sprite {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Sprite {
            x,
            y,
            width,
            height,
            image: None,
            image_cache: HashMap::new(),
        }
    }

    /// Sets the single active image
    pub fn load_image(&mut self, path: &str) {
        self.image = Some(ImageHandle::new(path));
    }

    /// Reloading a path replaces its handle
    pub fn load_image_cache(&mut self, paths: &[&str]) {
        for path in paths {
            self.image_cache
                .insert((*path).to_string(), ImageHandle::new(path));
        }
    }

    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    pub fn cached(&self, path: &str) -> Option<&ImageHandle> {
        self.image_cache.get(path)
    }

    /// Switches to a cached image, caching it first if needed
    pub fn show(&mut self, path: &str) {
        let handle = self
            .image_cache
            .entry(path.to_string())
            .or_insert_with(|| ImageHandle::new(path))
            .clone();
        self.image = Some(handle);
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Current image and the whole cache, for preloading
    pub fn images(&self) -> impl Iterator<Item = &ImageHandle> {
        self.image.iter().chain(self.image_cache.values())
    }
}

impl Drawable for Sprite {
    fn sprite(&self) -> &Sprite {
        self
    }
}

// ==================== Animation ====================
/// Ordered frames advanced on a fixed period
#[derive(Debug, Clone)]
pub struct Animation {
    frames: &'static [&'static str],
    next: usize,
    timer: Interval,
    looping: bool,
    finished: bool,
}

impl Animation {
    fn new(frames: &'static [&'static str], period: f64, looping: bool) -> Self {
        Animation {
            frames,
            next: 0,
            timer: Interval::new(period),
            looping,
            finished: false,
        }
    }

    pub fn frames(&self) -> &'static [&'static str] {
        self.frames
    }

    /// A play-once run is finished when its last frame was shown for a full
    /// period
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Frame to show right now, moves the cursor past it
    fn show_next(&mut self) -> Option<&'static str> {
        if self.next >= self.frames.len() {
            if !self.looping {
                self.finished = true;
                return None;
            }
            if self.frames.is_empty() {
                return None;
            }
            self.next = 0;
        }
        let frame = self.frames[self.next];
        self.next += 1;
        Some(frame)
    }

    /// Latest frame shown while `dt` passed, None if nothing changed
    fn advance(&mut self, dt: f64) -> Option<&'static str> {
        let mut shown = None;
        for _ in 0..self.timer.tick(dt) {
            match self.show_next() {
                Some(frame) => shown = Some(frame),
                None => break,
            }
        }
        shown
    }
}

// ==================== Movable ====================
/// Sprite with motion
/// - `speed` is applied once per movement tick
/// - `speed_y` is the vertical velocity, positive is down (canvas space)
/// - gravity only applies when a ground line was given
#[derive(Debug, Clone)]
pub struct Movable {
    pub sprite: Sprite,
    pub speed: f64,
    pub other_direction: bool,
    pub speed_y: f64,
    pub acceleration: f64,
    pub lifepoints: f64,
    art_faces: Direction,
    ground: Option<f64>,
    drift: Option<Direction>,
    animation: Option<Animation>,
    move_timer: Interval,
    gravity_timer: Interval,
}

pub const MAX_LIFEPOINTS: f64 = 100.0;

impl Movable {
    /// `art_faces` is where the unmirrored artwork looks
    pub fn new(sprite: Sprite, art_faces: Direction) -> Self {
        Movable {
            sprite,
            speed: 0.0,
            other_direction: false,
            speed_y: 0.0,
            acceleration: 0.0,
            lifepoints: MAX_LIFEPOINTS,
            art_faces,
            ground: None,
            drift: None,
            animation: None,
            move_timer: Interval::new(MOVE_PERIOD),
            gravity_timer: Interval::new(GRAVITY_PERIOD),
        }
    }

    pub fn with_gravity(mut self, ground: f64, acceleration: f64) -> Self {
        self.ground = Some(ground);
        self.acceleration = acceleration;
        self
    }

    pub fn with_move_period(mut self, period: f64) -> Self {
        self.move_timer = Interval::new(period);
        self
    }

    pub fn bounds(&self) -> Rect {
        self.sprite.bounds()
    }

    pub fn check_if_colliding(&self, other: &Rect) -> bool {
        self.bounds().intersects(other)
    }

    // ---------- facing / movement ----------
    pub fn face(&mut self, direction: Direction) {
        self.other_direction = direction != self.art_faces;
    }

    pub fn facing(&self) -> Direction {
        match (self.art_faces, self.other_direction) {
            (facing, false) => facing,
            (Direction::Left, true) => Direction::Right,
            (Direction::Right, true) => Direction::Left,
        }
    }

    /// Keeps moving left by `speed` on every movement tick
    pub fn move_left(&mut self, speed: f64) {
        self.speed = speed;
        self.drift = Some(Direction::Left);
        self.face(Direction::Left);
    }

    pub fn move_right(&mut self, speed: f64) {
        self.speed = speed;
        self.drift = Some(Direction::Right);
        self.face(Direction::Right);
    }

    pub fn stop(&mut self) {
        self.drift = None;
    }

    /// One movement step, for input driven actors
    pub fn step_left(&mut self) {
        self.sprite.x -= self.speed;
        self.face(Direction::Left);
    }

    pub fn step_right(&mut self) {
        self.sprite.x += self.speed;
        self.face(Direction::Right);
    }

    // ---------- gravity ----------
    pub fn is_above_ground(&self) -> bool {
        match self.ground {
            Some(ground) => self.sprite.y < ground,
            None => false,
        }
    }

    /// Negative launch speed, canvas y grows downwards
    pub fn jump(&mut self, launch_speed: f64) {
        self.speed_y = launch_speed;
    }

    fn apply_gravity(&mut self) {
        let Some(ground) = self.ground else {
            return;
        };
        if self.is_above_ground() || self.speed_y < 0.0 {
            self.sprite.y += self.speed_y;
            self.speed_y += self.acceleration;
            if self.sprite.y >= ground {
                self.sprite.y = ground;
                self.speed_y = 0.0;
            }
        }
    }

    // ---------- damage ----------
    /// Lifepoints never drop below zero
    pub fn hit(&mut self, damage: f64) {
        self.lifepoints = (self.lifepoints - damage).max(0.0);
    }

    pub fn is_dead(&self) -> bool {
        self.lifepoints <= 0.0
    }

    // ---------- animation ----------
    /// Starts a looping cycle through `images`
    /// - the first frame shows immediately
    /// - asking for the cycle that is already playing keeps its position
    pub fn animate_movement(&mut self, images: &'static [&'static str], period: f64) {
        self.start_animation(images, period, true);
    }

    /// Runs `images` once and stays on the last frame
    pub fn play_once(&mut self, images: &'static [&'static str], period: f64) {
        self.start_animation(images, period, false);
    }

    pub fn is_playing(&self, images: &[&str]) -> bool {
        self.animation
            .as_ref()
            .map_or(false, |animation| animation.frames() == images)
    }

    pub fn animation_finished(&self) -> bool {
        self.animation
            .as_ref()
            .map_or(true, |animation| animation.is_finished())
    }

    fn start_animation(&mut self, images: &'static [&'static str], period: f64, looping: bool) {
        if self.is_playing(images) {
            return;
        }
        // every frame has to be in the cache before it can become current
        for path in images {
            if self.sprite.cached(path).is_none() {
                self.sprite.load_image_cache(&[*path]);
            }
        }
        let mut animation = Animation::new(images, period, looping);
        if let Some(frame) = animation.show_next() {
            self.sprite.show(frame);
        }
        self.animation = Some(animation);
    }

    /// Advances drift, gravity and animation by `dt` milliseconds
    pub fn update(&mut self, dt: f64) {
        let moves = self.move_timer.tick(dt);
        if let Some(direction) = self.drift {
            for _ in 0..moves {
                match direction {
                    Direction::Left => self.sprite.x -= self.speed,
                    Direction::Right => self.sprite.x += self.speed,
                }
            }
        }
        for _ in 0..self.gravity_timer.tick(dt) {
            self.apply_gravity();
        }
        if let Some(frame) = self.animation.as_mut().and_then(|a| a.advance(dt)) {
            self.sprite.show(frame);
        }
    }
}

impl Drawable for Movable {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn other_direction(&self) -> bool {
        self.other_direction
    }
}
