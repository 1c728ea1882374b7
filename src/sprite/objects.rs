use crate::sprite::{Direction, Drawable, Movable, Sprite};

// ==================== ThrowableObject ====================
const BOTTLE_WIDTH: f64 = 50.0;
const BOTTLE_HEIGHT: f64 = 60.0;
const THROW_SPEED: f64 = 10.0;
const THROW_LAUNCH: f64 = -30.0;
const THROW_GRAVITY: f64 = 2.5;
const THROW_MOVE_PERIOD: f64 = 25.0;
// where a thrown bottle hits the sand
const THROW_GROUND: f64 = 360.0;

pub const IMAGES_ROTATION: &[&str] = &[
    "img/6_salsa_bottle/bottle_rotation/1_bottle_rotation.png",
    "img/6_salsa_bottle/bottle_rotation/2_bottle_rotation.png",
    "img/6_salsa_bottle/bottle_rotation/3_bottle_rotation.png",
    "img/6_salsa_bottle/bottle_rotation/4_bottle_rotation.png",
];

pub const IMAGES_SPLASH: &[&str] = &[
    "img/6_salsa_bottle/bottle_rotation/bottle_splash/1_bottle_splash.png",
    "img/6_salsa_bottle/bottle_rotation/bottle_splash/2_bottle_splash.png",
    "img/6_salsa_bottle/bottle_rotation/bottle_splash/3_bottle_splash.png",
    "img/6_salsa_bottle/bottle_rotation/bottle_splash/4_bottle_splash.png",
    "img/6_salsa_bottle/bottle_rotation/bottle_splash/5_bottle_splash.png",
    "img/6_salsa_bottle/bottle_rotation/bottle_splash/6_bottle_splash.png",
];

/// A thrown salsa bottle
/// - flies in an arc until it lands or hits an enemy, then splashes
/// - stays in the level's collection afterwards
pub struct ThrowableObject {
    body: Movable,
    smashed: bool,
}

impl ThrowableObject {
    pub fn new(x: f64, y: f64, direction: Direction) -> Self {
        let mut sprite = Sprite::new(x, y, BOTTLE_WIDTH, BOTTLE_HEIGHT);
        sprite.load_image(IMAGES_ROTATION[0]);
        sprite.load_image_cache(IMAGES_ROTATION);
        sprite.load_image_cache(IMAGES_SPLASH);
        let mut body = Movable::new(sprite, Direction::Right)
            .with_gravity(THROW_GROUND, THROW_GRAVITY)
            .with_move_period(THROW_MOVE_PERIOD);
        match direction {
            Direction::Left => body.move_left(THROW_SPEED),
            Direction::Right => body.move_right(THROW_SPEED),
        }
        body.jump(THROW_LAUNCH);
        body.animate_movement(IMAGES_ROTATION, 50.0);
        ThrowableObject {
            body,
            smashed: false,
        }
    }

    pub fn x(&self) -> f64 {
        self.body.sprite.x
    }

    pub fn y(&self) -> f64 {
        self.body.sprite.y
    }

    pub fn is_flying(&self) -> bool {
        !self.smashed
    }

    pub fn update(&mut self, dt: f64) {
        self.body.update(dt);
    }

    /// Still in one piece but resting on the ground line
    pub fn has_landed(&self) -> bool {
        !self.smashed && !self.body.is_above_ground() && self.body.speed_y == 0.0
    }

    /// Splash played out, nothing left to draw
    pub fn is_spent(&self) -> bool {
        self.smashed && self.body.animation_finished()
    }

    pub fn smash(&mut self) {
        self.smashed = true;
        self.body.stop();
        self.body.play_once(IMAGES_SPLASH, 60.0);
    }
}

impl Drawable for ThrowableObject {
    fn sprite(&self) -> &Sprite {
        &self.body.sprite
    }

    fn other_direction(&self) -> bool {
        self.body.other_direction
    }

    fn draws_collision_frame(&self) -> bool {
        true
    }
}

// ==================== Collectibles ====================
const COIN_SIZE: f64 = 100.0;

const IMAGES_COIN: &[&str] = &["img/8_coin/coin_1.png", "img/8_coin/coin_2.png"];

pub struct Coin {
    body: Movable,
    pub collected: bool,
}

impl Coin {
    pub fn new(x: f64, y: f64) -> Self {
        let mut sprite = Sprite::new(x, y, COIN_SIZE, COIN_SIZE);
        sprite.load_image(IMAGES_COIN[0]);
        sprite.load_image_cache(IMAGES_COIN);
        let mut body = Movable::new(sprite, Direction::Right);
        body.animate_movement(IMAGES_COIN, 300.0);
        Coin {
            body,
            collected: false,
        }
    }

    pub fn update(&mut self, dt: f64) {
        self.body.update(dt);
    }
}

impl Drawable for Coin {
    fn sprite(&self) -> &Sprite {
        &self.body.sprite
    }
}

const BOTTLE_Y: f64 = 360.0;

const IMAGES_BOTTLE_ON_GROUND: &[&str] = &[
    "img/6_salsa_bottle/1_salsa_bottle_on_ground.png",
    "img/6_salsa_bottle/2_salsa_bottle_on_ground.png",
];

/// Salsa bottle lying in the sand
pub struct Bottle {
    sprite: Sprite,
    pub collected: bool,
}

impl Bottle {
    /// `variant` picks one of the two ground sprites
    pub fn new(x: f64, variant: usize) -> Self {
        let mut sprite = Sprite::new(x, BOTTLE_Y, 70.0, 70.0);
        sprite.load_image(IMAGES_BOTTLE_ON_GROUND[variant % IMAGES_BOTTLE_ON_GROUND.len()]);
        Bottle {
            sprite,
            collected: false,
        }
    }
}

impl Drawable for Bottle {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }
}

// ==================== Decoration ====================
pub struct BackgroundObject {
    sprite: Sprite,
}

impl BackgroundObject {
    pub const WIDTH: f64 = 720.0;
    pub const HEIGHT: f64 = 480.0;

    pub fn new(path: &str, x: f64) -> Self {
        let mut sprite = Sprite::new(x, 480.0 - Self::HEIGHT, Self::WIDTH, Self::HEIGHT);
        sprite.load_image(path);
        BackgroundObject { sprite }
    }
}

impl Drawable for BackgroundObject {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }
}

const CLOUD_SPEED: f64 = 0.15;

pub struct Cloud {
    body: Movable,
}

impl Cloud {
    pub fn new(path: &str, x: f64) -> Self {
        let mut sprite = Sprite::new(x, 20.0, 500.0, 250.0);
        sprite.load_image(path);
        let mut body = Movable::new(sprite, Direction::Left);
        body.move_left(CLOUD_SPEED);
        Cloud { body }
    }

    pub fn update(&mut self, dt: f64) {
        self.body.update(dt);
    }
}

impl Drawable for Cloud {
    fn sprite(&self) -> &Sprite {
        &self.body.sprite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thrown_bottle_arcs_forward_and_splashes() {
        let mut bottle = ThrowableObject::new(125.0, 280.0, Direction::Right);
        bottle.update(40.0);
        assert!(bottle.y() < 280.0);
        assert!(!bottle.has_landed());

        let mut ticks = 0;
        while !bottle.has_landed() && ticks < 200 {
            bottle.update(25.0);
            ticks += 1;
        }
        assert!(bottle.has_landed());
        assert!(bottle.x() > 125.0);
        assert_eq!(bottle.y(), THROW_GROUND);

        // no more horizontal travel once smashed
        bottle.smash();
        assert!(!bottle.is_flying());
        assert!(!bottle.has_landed());
        let x = bottle.x();
        bottle.update(500.0);
        assert_eq!(bottle.x(), x);
    }

    #[test]
    fn splash_is_spent_once_played_out() {
        let mut bottle = ThrowableObject::new(125.0, 280.0, Direction::Right);
        bottle.update(500.0);
        assert!(!bottle.is_spent());

        bottle.smash();
        bottle.update(60.0 * 3.0);
        assert!(!bottle.is_spent());
        bottle.update(60.0 * 3.0);
        assert!(bottle.is_spent());
        assert!(!bottle.is_flying());
    }

    #[test]
    fn bottle_thrown_left_is_mirrored() {
        let bottle = ThrowableObject::new(125.0, 280.0, Direction::Left);
        assert!(bottle.other_direction());
    }

    #[test]
    fn clouds_drift_left() {
        let mut cloud = Cloud::new("img/5_background/layers/4_clouds/1.png", 100.0);
        cloud.update(1000.0);
        assert!(cloud.sprite().x < 100.0);
    }
}
