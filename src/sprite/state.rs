/// Character states, resolved fresh on every tick from what the character
/// is doing right now
/// ELI5:
/// ┌──────────────── State Resolution (first match wins) ────────────────┐
/// │  lifepoints <= 0                     →  Dead      (plays once)      │
/// │  hit less than HURT_DURATION ago     →  Hurt                        │
/// │  above the ground                    →  Jumping                     │
/// │  moved on the last input tick        →  Walking                     │
/// │  no action for LONG_IDLE_AFTER       →  Sleeping  (snoring)         │
/// │  otherwise                           →  Idle                        │
/// └─────────────────────────────────────────────────────────────────────┘

// physics consts
pub const JUMP_SPEED: f64 = -30.0; // negative because top left is origin
pub const GRAVITY: f64 = 2.5;
pub const FLOOR: f64 = 180.0;
pub const WALKING_SPEED: f64 = 10.0;

// timing consts, in ms
pub const HURT_DURATION: f64 = 1000.0;
pub const LONG_IDLE_AFTER: f64 = 5000.0;

const IMAGES_IDLE: &[&str] = &[
    "img/2_character_pepe/1_idle/idle/I-1.png",
    "img/2_character_pepe/1_idle/idle/I-2.png",
    "img/2_character_pepe/1_idle/idle/I-3.png",
    "img/2_character_pepe/1_idle/idle/I-4.png",
    "img/2_character_pepe/1_idle/idle/I-5.png",
    "img/2_character_pepe/1_idle/idle/I-6.png",
    "img/2_character_pepe/1_idle/idle/I-7.png",
    "img/2_character_pepe/1_idle/idle/I-8.png",
    "img/2_character_pepe/1_idle/idle/I-9.png",
    "img/2_character_pepe/1_idle/idle/I-10.png",
];

const IMAGES_LONG_IDLE: &[&str] = &[
    "img/2_character_pepe/1_idle/long_idle/I-11.png",
    "img/2_character_pepe/1_idle/long_idle/I-12.png",
    "img/2_character_pepe/1_idle/long_idle/I-13.png",
    "img/2_character_pepe/1_idle/long_idle/I-14.png",
    "img/2_character_pepe/1_idle/long_idle/I-15.png",
    "img/2_character_pepe/1_idle/long_idle/I-16.png",
    "img/2_character_pepe/1_idle/long_idle/I-17.png",
    "img/2_character_pepe/1_idle/long_idle/I-18.png",
    "img/2_character_pepe/1_idle/long_idle/I-19.png",
    "img/2_character_pepe/1_idle/long_idle/I-20.png",
];

const IMAGES_WALKING: &[&str] = &[
    "img/2_character_pepe/2_walk/W-21.png",
    "img/2_character_pepe/2_walk/W-22.png",
    "img/2_character_pepe/2_walk/W-23.png",
    "img/2_character_pepe/2_walk/W-24.png",
    "img/2_character_pepe/2_walk/W-25.png",
    "img/2_character_pepe/2_walk/W-26.png",
];

const IMAGES_JUMPING: &[&str] = &[
    "img/2_character_pepe/3_jump/J-31.png",
    "img/2_character_pepe/3_jump/J-32.png",
    "img/2_character_pepe/3_jump/J-33.png",
    "img/2_character_pepe/3_jump/J-34.png",
    "img/2_character_pepe/3_jump/J-35.png",
    "img/2_character_pepe/3_jump/J-36.png",
    "img/2_character_pepe/3_jump/J-37.png",
    "img/2_character_pepe/3_jump/J-38.png",
    "img/2_character_pepe/3_jump/J-39.png",
];

const IMAGES_HURT: &[&str] = &[
    "img/2_character_pepe/4_hurt/H-41.png",
    "img/2_character_pepe/4_hurt/H-42.png",
    "img/2_character_pepe/4_hurt/H-43.png",
];

const IMAGES_DEAD: &[&str] = &[
    "img/2_character_pepe/5_dead/D-51.png",
    "img/2_character_pepe/5_dead/D-52.png",
    "img/2_character_pepe/5_dead/D-53.png",
    "img/2_character_pepe/5_dead/D-54.png",
    "img/2_character_pepe/5_dead/D-55.png",
    "img/2_character_pepe/5_dead/D-56.png",
    "img/2_character_pepe/5_dead/D-57.png",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterState {
    Idle,
    Sleeping,
    Walking,
    Jumping,
    Hurt,
    Dead,
}

/// Snapshot of the facts a state is chosen from
#[derive(Debug, Clone, Copy, Default)]
pub struct Conditions {
    pub dead: bool,
    pub hurt: bool,
    pub airborne: bool,
    pub walking: bool,
    pub idle_for: f64,
}

impl CharacterState {
    pub const ALL: [CharacterState; 6] = [
        CharacterState::Idle,
        CharacterState::Sleeping,
        CharacterState::Walking,
        CharacterState::Jumping,
        CharacterState::Hurt,
        CharacterState::Dead,
    ];

    pub fn resolve(conditions: &Conditions) -> Self {
        if conditions.dead {
            CharacterState::Dead
        } else if conditions.hurt {
            CharacterState::Hurt
        } else if conditions.airborne {
            CharacterState::Jumping
        } else if conditions.walking {
            CharacterState::Walking
        } else if conditions.idle_for >= LONG_IDLE_AFTER {
            CharacterState::Sleeping
        } else {
            CharacterState::Idle
        }
    }

    pub fn images(&self) -> &'static [&'static str] {
        match self {
            CharacterState::Idle => IMAGES_IDLE,
            CharacterState::Sleeping => IMAGES_LONG_IDLE,
            CharacterState::Walking => IMAGES_WALKING,
            CharacterState::Jumping => IMAGES_JUMPING,
            CharacterState::Hurt => IMAGES_HURT,
            CharacterState::Dead => IMAGES_DEAD,
        }
    }

    /// ms per animation frame
    pub fn frame_period(&self) -> f64 {
        match self {
            CharacterState::Idle | CharacterState::Sleeping => 200.0,
            CharacterState::Walking => 50.0,
            CharacterState::Jumping => 100.0,
            CharacterState::Hurt => 100.0,
            CharacterState::Dead => 150.0,
        }
    }

    /// The dying sequence is terminal
    pub fn loops(&self) -> bool {
        !matches!(self, CharacterState::Dead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_wins_over_everything() {
        let conditions = Conditions {
            dead: true,
            hurt: true,
            airborne: true,
            walking: true,
            idle_for: LONG_IDLE_AFTER,
        };
        assert_eq!(CharacterState::resolve(&conditions), CharacterState::Dead);
    }

    #[test]
    fn hurt_wins_over_movement() {
        let conditions = Conditions {
            hurt: true,
            airborne: true,
            walking: true,
            ..Conditions::default()
        };
        assert_eq!(CharacterState::resolve(&conditions), CharacterState::Hurt);
    }

    #[test]
    fn idle_turns_into_sleeping() {
        let mut conditions = Conditions::default();
        assert_eq!(CharacterState::resolve(&conditions), CharacterState::Idle);
        conditions.idle_for = LONG_IDLE_AFTER;
        assert_eq!(CharacterState::resolve(&conditions), CharacterState::Sleeping);
    }

    #[test]
    fn only_dying_is_terminal() {
        for state in CharacterState::ALL {
            assert_eq!(state.loops(), state != CharacterState::Dead);
            assert!(!state.images().is_empty());
        }
    }
}
