use crate::sprite::{Drawable, Sprite};

/// Bucket sprites, ordered full (100) to empty (0)
const IMAGES_HEALTH: &[&str] = &[
    "img/7_statusbars/1_statusbar/2_statusbar_health/blue/100.png",
    "img/7_statusbars/1_statusbar/2_statusbar_health/blue/80.png",
    "img/7_statusbars/1_statusbar/2_statusbar_health/blue/60.png",
    "img/7_statusbars/1_statusbar/2_statusbar_health/blue/40.png",
    "img/7_statusbars/1_statusbar/2_statusbar_health/blue/20.png",
    "img/7_statusbars/1_statusbar/2_statusbar_health/blue/0.png",
];

const IMAGES_COINS: &[&str] = &[
    "img/7_statusbars/1_statusbar/1_statusbar_coin/blue/100.png",
    "img/7_statusbars/1_statusbar/1_statusbar_coin/blue/80.png",
    "img/7_statusbars/1_statusbar/1_statusbar_coin/blue/60.png",
    "img/7_statusbars/1_statusbar/1_statusbar_coin/blue/40.png",
    "img/7_statusbars/1_statusbar/1_statusbar_coin/blue/20.png",
    "img/7_statusbars/1_statusbar/1_statusbar_coin/blue/0.png",
];

const IMAGES_BOTTLES: &[&str] = &[
    "img/7_statusbars/1_statusbar/3_statusbar_bottle/blue/100.png",
    "img/7_statusbars/1_statusbar/3_statusbar_bottle/blue/80.png",
    "img/7_statusbars/1_statusbar/3_statusbar_bottle/blue/60.png",
    "img/7_statusbars/1_statusbar/3_statusbar_bottle/blue/40.png",
    "img/7_statusbars/1_statusbar/3_statusbar_bottle/blue/20.png",
    "img/7_statusbars/1_statusbar/3_statusbar_bottle/blue/0.png",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBarKind {
    Health,
    Coins,
    Bottles,
}

impl StatusBarKind {
    fn images(&self) -> &'static [&'static str] {
        match self {
            StatusBarKind::Health => IMAGES_HEALTH,
            StatusBarKind::Coins => IMAGES_COINS,
            StatusBarKind::Bottles => IMAGES_BOTTLES,
        }
    }

    /// HUD slot, stacked top left in screen space
    fn y(&self) -> f64 {
        match self {
            StatusBarKind::Health => 0.0,
            StatusBarKind::Coins => 45.0,
            StatusBarKind::Bottles => 90.0,
        }
    }

    fn starts_at(&self) -> f64 {
        match self {
            StatusBarKind::Health => 100.0,
            StatusBarKind::Coins | StatusBarKind::Bottles => 0.0,
        }
    }
}

/// HUD bar showing one of six sprites picked from a percentage
pub struct StatusBar {
    sprite: Sprite,
    kind: StatusBarKind,
    percentage: f64,
}

impl StatusBar {
    pub fn new(kind: StatusBarKind) -> Self {
        let mut sprite = Sprite::new(40.0, kind.y(), 200.0, 60.0);
        sprite.load_image_cache(kind.images());
        let mut bar = StatusBar {
            sprite,
            kind,
            percentage: 0.0,
        };
        bar.set_percentage(kind.starts_at());
        bar
    }

    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    pub fn set_percentage(&mut self, percentage: f64) {
        self.percentage = percentage;
        let path = self.kind.images()[Self::resolve_image_index(percentage)];
        self.sprite.show(path);
    }

    /// 100 -> 0, 80 -> 1, 60 -> 2, 40 -> 3, 20 -> 4, below 20 -> 5
    /// - anything outside 0..=100 lands in the nearest end bucket
    pub fn resolve_image_index(percentage: f64) -> usize {
        let percentage = percentage.clamp(0.0, 100.0);
        if percentage >= 100.0 {
            0
        } else if percentage >= 80.0 {
            1
        } else if percentage >= 60.0 {
            2
        } else if percentage >= 40.0 {
            3
        } else if percentage >= 20.0 {
            4
        } else {
            5
        }
    }
}

impl Drawable for StatusBar {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }
}
