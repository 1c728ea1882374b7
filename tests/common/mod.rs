#![allow(dead_code)]

use el_pollo_loco::audio::{Sound, SoundBoard};
use el_pollo_loco::config::GameConfig;
use el_pollo_loco::engine::input::InputState;
use el_pollo_loco::engine::{ImageHandle, Rect, Surface, FRAME_SIZE};
use el_pollo_loco::level::{Level, SCREEN_WIDTH};
use el_pollo_loco::sprite::enemies::Enemy;
use el_pollo_loco::sprite::objects::{BackgroundObject, Bottle, Cloud, Coin};
use el_pollo_loco::world::World;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// ==================== Recording surface ====================
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Clear,
    Translate(f64, f64),
    Scale(f64, f64),
    Save,
    Restore,
    Image(String, Rect),
    Stroke(Rect),
    Preload(String),
}

/// Surface that writes down every call instead of painting
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: RefCell<Vec<Op>>,
}

impl RecordingSurface {
    pub fn ops(&self) -> Vec<Op> {
        self.ops.borrow().clone()
    }

    pub fn images(&self) -> Vec<(String, Rect)> {
        self.ops
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::Image(path, rect) => Some((path.clone(), *rect)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, op: &Op) -> usize {
        self.ops.borrow().iter().filter(|o| *o == op).count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&self, _rect: &Rect) {
        self.ops.borrow_mut().push(Op::Clear);
    }

    fn translate(&self, x: f64, y: f64) {
        self.ops.borrow_mut().push(Op::Translate(x, y));
    }

    fn scale(&self, x: f64, y: f64) {
        self.ops.borrow_mut().push(Op::Scale(x, y));
    }

    fn save(&self) {
        self.ops.borrow_mut().push(Op::Save);
    }

    fn restore(&self) {
        self.ops.borrow_mut().push(Op::Restore);
    }

    fn draw_image(&self, image: &ImageHandle, destination: &Rect) {
        self.ops
            .borrow_mut()
            .push(Op::Image(image.path().to_string(), *destination));
    }

    fn stroke_rect(&self, rect: &Rect, _color: &str, _line_width: f64) {
        self.ops.borrow_mut().push(Op::Stroke(*rect));
    }

    fn preload(&self, image: &ImageHandle) {
        self.ops
            .borrow_mut()
            .push(Op::Preload(image.path().to_string()));
    }
}

// ==================== Recording sounds ====================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Play(Sound),
    Pause(Sound),
}

#[derive(Debug, Default)]
pub struct RecordingSounds {
    pub cues: RefCell<Vec<Cue>>,
    muted: Cell<bool>,
}

impl RecordingSounds {
    pub fn plays(&self, sound: Sound) -> usize {
        self.count(Cue::Play(sound))
    }

    pub fn pauses(&self, sound: Sound) -> usize {
        self.count(Cue::Pause(sound))
    }

    fn count(&self, cue: Cue) -> usize {
        self.cues.borrow().iter().filter(|c| **c == cue).count()
    }
}

impl SoundBoard for RecordingSounds {
    fn play(&self, sound: Sound) {
        self.cues.borrow_mut().push(Cue::Play(sound));
    }

    fn pause(&self, sound: Sound) {
        self.cues.borrow_mut().push(Cue::Pause(sound));
    }

    fn set_muted(&self, muted: bool) {
        self.muted.set(muted);
    }

    fn is_muted(&self) -> bool {
        self.muted.get()
    }
}

// ==================== Builders ====================
pub const AIR: &str = "img/5_background/layers/air.png";

/// Bare level, `screens` screens wide, with whatever entities a test needs
pub fn bare_level(
    screens: usize,
    enemies: Vec<Enemy>,
    coins: Vec<Coin>,
    bottles: Vec<Bottle>,
    clouds: Vec<Cloud>,
) -> Level {
    let backgrounds = (0..screens * 4)
        .map(|i| BackgroundObject::new(AIR, (i / 4) as f64 * SCREEN_WIDTH))
        .collect();
    Level::new(backgrounds, clouds, enemies, coins, bottles)
}

pub fn config() -> GameConfig {
    GameConfig {
        show_collision_frames: false,
        ..GameConfig::default()
    }
}

pub fn world_with(level: Level) -> (World, Rc<RecordingSounds>) {
    let sounds = Rc::new(RecordingSounds::default());
    let world = World::new(level, config(), sounds.clone());
    (world, sounds)
}

/// Steps the world like the game loop does, `ms` rounded to whole frames
pub fn run(world: &mut World, input: InputState, ms: f64) {
    let steps = (ms / FRAME_SIZE).round() as usize;
    for _ in 0..steps {
        world.update(FRAME_SIZE, &input);
    }
}

pub fn pressing(configure: impl FnOnce(&mut InputState)) -> InputState {
    let mut input = InputState::default();
    configure(&mut input);
    input
}
