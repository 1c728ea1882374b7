use crate::audio::SoundBoard;
use crate::config::GameConfig;
use crate::engine::input::InputState;
use crate::engine::{Game, Surface, FRAME_SIZE};
use crate::level;
use crate::world::World;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::rc::Rc;

/// TABLE
/// ┌───────────────────── Game Architecture Overview ────────────────────────┐
/// │                                                                         │
/// │    ┌─────────────┐          ┌─────────────┐          ┌─────────────┐    │
/// │    │   lib.rs    │  start   │  engine.rs  │  update  │  world.rs   │    │
/// │    │   App       ├─────────►│  GameLoop   ├─────────►│  World      │    │
/// │    │  (shell)    │          │  FrameClock │  draw    │             │    │
/// │    └──────┬──────┘          └──────▲──────┘          └─────────────┘    │
/// │           │ owns                   │ snapshot                           │
/// │    ┌──────┴──────┐          ┌──────┴──────┐                             │
/// │    │ SoundBoard  │          │ InputState  │◄── key / touch listeners    │
/// │    └─────────────┘          └─────────────┘                             │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
pub enum PolloLoco {
    /// Everything needed to build a world, nothing built yet
    Loading(Setup),

    /// A playthrough in progress
    Loaded(World),
}

/// What the shell hands to a new game
pub struct Setup {
    pub config: GameConfig,
    pub sounds: Rc<dyn SoundBoard>,
    /// fixed enemy spawns, random when None
    pub seed: Option<u64>,
}

impl PolloLoco {
    pub fn new(setup: Setup) -> Self {
        PolloLoco::Loading(setup)
    }

    pub fn world(&self) -> Option<&World> {
        match self {
            PolloLoco::Loaded(world) => Some(world),
            PolloLoco::Loading(_) => None,
        }
    }
}

#[async_trait(?Send)]
impl Game for PolloLoco {
    // returning a new Game means the Loading value is dropped by the loop,
    // initialize can't run twice on the same world
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            PolloLoco::Loading(setup) => {
                let mut rng = match setup.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                let level = level::level_1(&mut rng);
                let world = World::new(level, setup.config.clone(), setup.sounds.clone());
                Ok(Box::new(PolloLoco::Loaded(world)))
            }
            PolloLoco::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn update(&mut self, keystate: &InputState) {
        if let PolloLoco::Loaded(world) = self {
            world.update(FRAME_SIZE, keystate);
        }
    }

    fn draw(&self, renderer: &dyn Surface) {
        if let PolloLoco::Loaded(world) = self {
            world.draw(renderer);
        }
    }

    fn preload(&self, renderer: &dyn Surface) {
        if let PolloLoco::Loaded(world) = self {
            world.preload(renderer);
        }
    }
}
