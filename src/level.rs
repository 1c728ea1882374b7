use crate::sprite::enemies::{Chicken, Endboss, Enemy};
use crate::sprite::objects::{BackgroundObject, Bottle, Cloud, Coin, ThrowableObject};
use rand::Rng;

/// Backgrounds come in groups of four parallax layers, each group one
/// screen wide
pub const LAYERS_PER_SCREEN: usize = 4;
pub const SCREEN_WIDTH: f64 = 719.0;

/// Entity collections of one playthrough
/// - `throwable_objects` is the only collection that grows after
///   construction
/// - `level_end_x` is derived once from the background count and never
///   recomputed
pub struct Level {
    pub background_objects: Vec<BackgroundObject>,
    pub clouds: Vec<Cloud>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub bottles: Vec<Bottle>,
    pub throwable_objects: Vec<ThrowableObject>,
    level_end_x: f64,
}

impl Level {
    pub fn new(
        background_objects: Vec<BackgroundObject>,
        clouds: Vec<Cloud>,
        enemies: Vec<Enemy>,
        coins: Vec<Coin>,
        bottles: Vec<Bottle>,
    ) -> Self {
        let level_end_x = Self::end_x_for(background_objects.len());
        Level {
            background_objects,
            clouds,
            enemies,
            coins,
            bottles,
            throwable_objects: Vec::new(),
            level_end_x,
        }
    }

    /// `((count - 4) / 4) * 719`: the first screen is where the character
    /// starts, every further group of layers adds a screen of travel
    pub fn end_x_for(background_count: usize) -> f64 {
        let layers = LAYERS_PER_SCREEN as f64;
        ((background_count as f64 - layers) / layers) * SCREEN_WIDTH
    }

    pub fn level_end_x(&self) -> f64 {
        self.level_end_x
    }
}

// ==================== Level data ====================
const AIR: &str = "img/5_background/layers/air.png";
const THIRD_LAYER: [&str; 2] = [
    "img/5_background/layers/3_third_layer/1.png",
    "img/5_background/layers/3_third_layer/2.png",
];
const SECOND_LAYER: [&str; 2] = [
    "img/5_background/layers/2_second_layer/1.png",
    "img/5_background/layers/2_second_layer/2.png",
];
const FIRST_LAYER: [&str; 2] = [
    "img/5_background/layers/1_first_layer/1.png",
    "img/5_background/layers/1_first_layer/2.png",
];
const CLOUDS: [&str; 2] = [
    "img/5_background/layers/4_clouds/1.png",
    "img/5_background/layers/4_clouds/2.png",
];

const CHICKENS: usize = 5;
const COINS: [(f64, f64); 8] = [
    (400.0, 250.0),
    (500.0, 180.0),
    (600.0, 250.0),
    (1100.0, 150.0),
    (1200.0, 100.0),
    (1300.0, 150.0),
    (1800.0, 200.0),
    (2100.0, 200.0),
];
const BOTTLES: [f64; 6] = [350.0, 800.0, 1000.0, 1450.0, 1700.0, 2000.0];

/// Screens from x = -719 up to the boss arena, alternating the two artwork
/// variants so neighbouring screens line up
fn backgrounds(screens: i32) -> Vec<BackgroundObject> {
    (-1..screens - 1)
        .flat_map(|screen| {
            let x = screen as f64 * SCREEN_WIDTH;
            let variant = screen.rem_euclid(2) as usize;
            [
                BackgroundObject::new(AIR, x),
                BackgroundObject::new(THIRD_LAYER[variant], x),
                BackgroundObject::new(SECOND_LAYER[variant], x),
                BackgroundObject::new(FIRST_LAYER[variant], x),
            ]
        })
        .collect()
}

/// The one level of the game, enemies get fresh random spawns every call
pub fn level_1(rng: &mut impl Rng) -> Level {
    let background_objects = backgrounds(5);
    let clouds = (0..5)
        .map(|i| Cloud::new(CLOUDS[i % CLOUDS.len()], i as f64 * 700.0))
        .collect();
    let mut enemies: Vec<Enemy> = (0..CHICKENS)
        .map(|_| Chicken::new(rng).into())
        .collect();
    enemies.push(Endboss::new(rng).into());
    let coins = COINS.iter().map(|&(x, y)| Coin::new(x, y)).collect();
    let bottles = BOTTLES
        .iter()
        .enumerate()
        .map(|(i, &x)| Bottle::new(x, i))
        .collect();

    Level::new(background_objects, clouds, enemies, coins, bottles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn level_end_x_follows_background_count() {
        assert_relative_eq!(Level::end_x_for(4), 0.0);
        assert_relative_eq!(Level::end_x_for(8), 719.0);
        assert_relative_eq!(Level::end_x_for(20), 2876.0);
    }

    #[test]
    fn level_1_has_five_screens_and_a_boss() {
        let level = level_1(&mut StdRng::seed_from_u64(7));
        assert_eq!(level.background_objects.len(), 20);
        assert_relative_eq!(level.level_end_x(), 2876.0);
        assert_eq!(level.enemies.len(), CHICKENS + 1);
        assert_eq!(level.enemies.iter().filter(|e| e.is_endboss()).count(), 1);
        assert!(level.throwable_objects.is_empty());
    }

    #[test]
    fn level_end_x_is_fixed_at_construction() {
        let mut level = level_1(&mut StdRng::seed_from_u64(7));
        level.background_objects.truncate(4);
        assert_relative_eq!(level.level_end_x(), 2876.0);
    }
}
