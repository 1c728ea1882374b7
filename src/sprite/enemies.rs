use crate::engine::Rect;
use crate::sprite::{Direction, Drawable, Movable, Sprite};
use rand::Rng;

// ==================== Chicken ====================
const CHICKEN_Y: f64 = 340.0;
const CHICKEN_WIDTH: f64 = 60.0;
const CHICKEN_HEIGHT: f64 = 80.0;

const CHICKEN_IMAGES_WALKING: &[&str] = &[
    "img/3_enemies_chicken/chicken_normal/1_walk/1_w.png",
    "img/3_enemies_chicken/chicken_normal/1_walk/2_w.png",
    "img/3_enemies_chicken/chicken_normal/1_walk/3_w.png",
];

const CHICKEN_IMAGES_DEAD: &[&str] = &["img/3_enemies_chicken/chicken_normal/2_dead/dead.png"];

/// Ground enemy, walks left from the moment it exists
pub struct Chicken {
    body: Movable,
}

impl Chicken {
    /// Random spawn x in [200, 700) and speed in [0.15, 0.40)
    pub fn new(rng: &mut impl Rng) -> Self {
        let x = 200.0 + rng.gen::<f64>() * 500.0;
        let speed = 0.15 + rng.gen::<f64>() * 0.25;
        Self::at(x, speed)
    }

    pub fn at(x: f64, speed: f64) -> Self {
        let mut sprite = Sprite::new(x, CHICKEN_Y, CHICKEN_WIDTH, CHICKEN_HEIGHT);
        sprite.load_image(CHICKEN_IMAGES_WALKING[0]);
        sprite.load_image_cache(CHICKEN_IMAGES_WALKING);
        sprite.load_image_cache(CHICKEN_IMAGES_DEAD);
        let mut body = Movable::new(sprite, Direction::Left);
        body.lifepoints = 1.0;
        body.animate_movement(CHICKEN_IMAGES_WALKING, 200.0);
        body.move_left(speed);
        Chicken { body }
    }

    pub fn speed(&self) -> f64 {
        self.body.speed
    }

    fn die(&mut self) {
        self.body.lifepoints = 0.0;
        self.body.stop();
        self.body.play_once(CHICKEN_IMAGES_DEAD, 100.0);
    }
}

// ==================== Endboss ====================
const ENDBOSS_Y: f64 = 55.0;
const ENDBOSS_WIDTH: f64 = 250.0;
const ENDBOSS_HEIGHT: f64 = 400.0;
const ENDBOSS_HURT_DURATION: f64 = 1000.0;
const ALERT_DISTANCE: f64 = 500.0;
pub const BOTTLE_DAMAGE: f64 = 20.0;

const ENDBOSS_IMAGES_WALKING: &[&str] = &[
    "img/4_enemie_boss_chicken/1_walk/G1.png",
    "img/4_enemie_boss_chicken/1_walk/G2.png",
    "img/4_enemie_boss_chicken/1_walk/G3.png",
    "img/4_enemie_boss_chicken/1_walk/G4.png",
];

const ENDBOSS_IMAGES_ALERT: &[&str] = &[
    "img/4_enemie_boss_chicken/2_alert/G5.png",
    "img/4_enemie_boss_chicken/2_alert/G6.png",
    "img/4_enemie_boss_chicken/2_alert/G7.png",
    "img/4_enemie_boss_chicken/2_alert/G8.png",
    "img/4_enemie_boss_chicken/2_alert/G9.png",
    "img/4_enemie_boss_chicken/2_alert/G10.png",
    "img/4_enemie_boss_chicken/2_alert/G11.png",
    "img/4_enemie_boss_chicken/2_alert/G12.png",
];

const ENDBOSS_IMAGES_HURT: &[&str] = &[
    "img/4_enemie_boss_chicken/4_hurt/G21.png",
    "img/4_enemie_boss_chicken/4_hurt/G22.png",
    "img/4_enemie_boss_chicken/4_hurt/G23.png",
];

const ENDBOSS_IMAGES_DEAD: &[&str] = &[
    "img/4_enemie_boss_chicken/5_dead/G24.png",
    "img/4_enemie_boss_chicken/5_dead/G25.png",
    "img/4_enemie_boss_chicken/5_dead/G26.png",
];

/// Boss at the end of the level
/// - stands on its alert loop until the character gets close, then walks
///   left for good
pub struct Endboss {
    body: Movable,
    alerted: bool,
    clock: f64,
    last_hit: Option<f64>,
}

impl Endboss {
    /// Random spawn x in [2500, 2600) and speed in [1.5, 2.5)
    pub fn new(rng: &mut impl Rng) -> Self {
        let x = 2500.0 + rng.gen::<f64>() * 100.0;
        let speed = 1.5 + rng.gen::<f64>();
        Self::at(x, speed)
    }

    pub fn at(x: f64, speed: f64) -> Self {
        let mut sprite = Sprite::new(x, ENDBOSS_Y, ENDBOSS_WIDTH, ENDBOSS_HEIGHT);
        sprite.load_image(ENDBOSS_IMAGES_ALERT[0]);
        for images in [
            ENDBOSS_IMAGES_WALKING,
            ENDBOSS_IMAGES_ALERT,
            ENDBOSS_IMAGES_HURT,
            ENDBOSS_IMAGES_DEAD,
        ] {
            sprite.load_image_cache(images);
        }
        let mut body = Movable::new(sprite, Direction::Left);
        body.speed = speed;
        body.animate_movement(ENDBOSS_IMAGES_ALERT, 200.0);
        Endboss {
            body,
            alerted: false,
            clock: 0.0,
            last_hit: None,
        }
    }

    pub fn is_alerted(&self) -> bool {
        self.alerted
    }

    pub fn is_hurt(&self) -> bool {
        self.last_hit
            .map_or(false, |hit| self.clock - hit < ENDBOSS_HURT_DURATION)
    }

    fn update(&mut self, dt: f64, character_x: f64) {
        self.clock += dt;
        if !self.body.is_dead() {
            if !self.alerted && character_x + ALERT_DISTANCE >= self.body.sprite.x {
                self.alerted = true;
                self.body.move_left(self.body.speed);
            }
            let images = if self.is_hurt() {
                ENDBOSS_IMAGES_HURT
            } else if self.alerted {
                ENDBOSS_IMAGES_WALKING
            } else {
                ENDBOSS_IMAGES_ALERT
            };
            self.body.animate_movement(images, 200.0);
        }
        self.body.update(dt);
    }

    fn take_hit(&mut self, damage: f64) {
        self.body.hit(damage);
        self.last_hit = Some(self.clock);
        if self.body.is_dead() {
            self.body.stop();
            self.body.play_once(ENDBOSS_IMAGES_DEAD, 200.0);
        }
    }
}

// ==================== Enemy ====================
/// Everything the character can run into
pub enum Enemy {
    Chicken(Chicken),
    Endboss(Endboss),
}

impl From<Chicken> for Enemy {
    fn from(chicken: Chicken) -> Self {
        Enemy::Chicken(chicken)
    }
}

impl From<Endboss> for Enemy {
    fn from(endboss: Endboss) -> Self {
        Enemy::Endboss(endboss)
    }
}

impl Enemy {
    fn body(&self) -> &Movable {
        match self {
            Enemy::Chicken(chicken) => &chicken.body,
            Enemy::Endboss(endboss) => &endboss.body,
        }
    }

    pub fn x(&self) -> f64 {
        self.body().sprite.x
    }

    pub fn bounds(&self) -> Rect {
        self.body().bounds()
    }

    pub fn lifepoints(&self) -> f64 {
        self.body().lifepoints
    }

    pub fn is_dead(&self) -> bool {
        self.body().is_dead()
    }

    pub fn is_endboss(&self) -> bool {
        matches!(self, Enemy::Endboss(_))
    }

    pub fn update(&mut self, dt: f64, character_x: f64) {
        match self {
            Enemy::Chicken(chicken) => chicken.body.update(dt),
            Enemy::Endboss(endboss) => endboss.update(dt, character_x),
        }
    }

    /// A bottle landed on this enemy, returns true if that killed it
    /// - one bottle is enough for a chicken, the boss takes BOTTLE_DAMAGE
    pub fn take_bottle_hit(&mut self) -> bool {
        if self.is_dead() {
            return false;
        }
        match self {
            Enemy::Chicken(chicken) => chicken.die(),
            Enemy::Endboss(endboss) => endboss.take_hit(BOTTLE_DAMAGE),
        }
        self.is_dead()
    }
}

impl Drawable for Enemy {
    fn sprite(&self) -> &Sprite {
        &self.body().sprite
    }

    fn other_direction(&self) -> bool {
        self.body().other_direction
    }

    fn draws_collision_frame(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn chickens_spawn_inside_their_band() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let chicken = Chicken::new(&mut rng);
            let enemy = Enemy::from(chicken);
            assert!((200.0..700.0).contains(&enemy.x()));
            if let Enemy::Chicken(chicken) = &enemy {
                assert!((0.15..0.40).contains(&chicken.speed()));
            }
        }
    }

    #[test]
    fn chicken_walks_left_without_mirroring() {
        let mut enemy = Enemy::from(Chicken::at(500.0, 0.5));
        enemy.update(1000.0, 0.0);
        assert!(enemy.x() < 500.0);
        assert!(!enemy.other_direction());
    }

    #[test]
    fn bottle_kills_chicken_and_it_stops() {
        let mut enemy = Enemy::from(Chicken::at(500.0, 0.5));
        assert!(enemy.take_bottle_hit());
        let x = enemy.x();
        enemy.update(1000.0, 0.0);
        assert_eq!(enemy.x(), x);
        assert!(!enemy.take_bottle_hit());
    }

    #[test]
    fn endboss_waits_until_character_is_close() {
        let mut enemy = Enemy::from(Endboss::at(2500.0, 2.0));
        enemy.update(1000.0, 100.0);
        assert_eq!(enemy.x(), 2500.0);
        enemy.update(1000.0, 2100.0);
        assert!(enemy.x() < 2500.0);
        if let Enemy::Endboss(endboss) = &enemy {
            assert!(endboss.is_alerted());
        }
    }

    #[test]
    fn endboss_survives_four_bottles_not_five() {
        let mut enemy = Enemy::from(Endboss::at(2500.0, 2.0));
        for _ in 0..4 {
            assert!(!enemy.take_bottle_hit());
        }
        assert!(enemy.take_bottle_hit());
        assert!(enemy.is_dead());
    }
}
