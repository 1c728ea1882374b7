use crate::audio::{Sound, SoundBoard};
use crate::engine::input::InputState;
use crate::engine::{Interval, Rect};
use crate::sprite::state::{
    CharacterState, Conditions, FLOOR, GRAVITY, HURT_DURATION, JUMP_SPEED, WALKING_SPEED,
};
use crate::sprite::{Direction, Drawable, Movable, Sprite, MAX_LIFEPOINTS, MOVE_PERIOD};

const START_X: f64 = 100.0;
const WIDTH: f64 = 100.0;
const HEIGHT: f64 = 250.0;

/// The player
/// - no back reference to the world: every update is handed the input,
///   the level bound and the sound board instead
/// - `clock` is the character's own simulated time, the hurt window and the
///   idle timer are measured against it
pub struct Character {
    body: Movable,
    state: CharacterState,
    clock: f64,
    last_action: f64,
    last_hit: Option<f64>,
    input_timer: Interval,
    walking: bool,
    was_up: bool,
    pub coins: u32,
    pub bottles: u32,
}

impl Character {
    pub fn new() -> Self {
        let mut sprite = Sprite::new(START_X, FLOOR, WIDTH, HEIGHT);
        sprite.load_image(CharacterState::Idle.images()[0]);
        for state in CharacterState::ALL {
            sprite.load_image_cache(state.images());
        }
        let mut body = Movable::new(sprite, Direction::Right).with_gravity(FLOOR, GRAVITY);
        body.speed = WALKING_SPEED;
        body.animate_movement(
            CharacterState::Idle.images(),
            CharacterState::Idle.frame_period(),
        );

        Character {
            body,
            state: CharacterState::Idle,
            clock: 0.0,
            last_action: 0.0,
            last_hit: None,
            input_timer: Interval::new(MOVE_PERIOD),
            walking: false,
            was_up: false,
            coins: 0,
            bottles: 0,
        }
    }

    // Law of Demeter: callers ask the character, not its body
    pub fn x(&self) -> f64 {
        self.body.sprite.x
    }

    pub fn y(&self) -> f64 {
        self.body.sprite.y
    }

    pub fn lifepoints(&self) -> f64 {
        self.body.lifepoints
    }

    pub fn state(&self) -> CharacterState {
        self.state
    }

    pub fn facing(&self) -> Direction {
        self.body.facing()
    }

    pub fn bounds(&self) -> Rect {
        self.body.bounds()
    }

    pub fn is_dead(&self) -> bool {
        self.body.is_dead()
    }

    pub fn is_hurt(&self) -> bool {
        self.last_hit
            .map_or(false, |hit| self.clock - hit < HURT_DURATION)
    }

    pub fn is_above_ground(&self) -> bool {
        self.body.is_above_ground()
    }

    /// Nonzero area overlap with anything drawable
    pub fn check_if_colliding(&self, other: &dyn Drawable) -> bool {
        self.body.check_if_colliding(&other.sprite().bounds())
    }

    /// `amount` is a fraction of max lifepoints
    /// - no invulnerability window, every call lands
    pub fn get_hit(&mut self, amount: f64) {
        self.body.hit(amount * MAX_LIFEPOINTS);
        self.last_hit = Some(self.clock);
        self.last_action = self.clock;
    }

    /// Input, physics, then state/animation, all on simulated time
    pub fn update(
        &mut self,
        dt: f64,
        input: &InputState,
        level_end_x: f64,
        sounds: &dyn SoundBoard,
    ) {
        self.clock += dt;
        let input_ticks = self.input_timer.tick(dt);
        if !self.is_dead() {
            for _ in 0..input_ticks {
                self.handle_input(input, level_end_x, sounds);
            }
        } else {
            self.walking = false;
        }
        self.body.update(dt);

        let next = CharacterState::resolve(&Conditions {
            dead: self.is_dead(),
            hurt: self.is_hurt(),
            airborne: self.is_above_ground(),
            walking: self.walking,
            idle_for: self.clock - self.last_action,
        });
        if next != self.state {
            self.enter(next, sounds);
        }
    }

    fn handle_input(&mut self, input: &InputState, level_end_x: f64, sounds: &dyn SoundBoard) {
        let mut walked = false;
        if input.right && self.body.sprite.x < level_end_x {
            self.body.step_right();
            self.body.sprite.x = self.body.sprite.x.min(level_end_x);
            walked = true;
        }
        if input.left && self.body.sprite.x > 0.0 {
            self.body.step_left();
            self.body.sprite.x = self.body.sprite.x.max(0.0);
            walked = true;
        }
        self.walking = walked;

        // jump on the press, holding UP does not bounce
        let up_pressed = input.up && !self.was_up;
        self.was_up = input.up;
        if up_pressed && !self.is_above_ground() {
            self.body.jump(JUMP_SPEED);
            sounds.play(Sound::Jumping);
            self.last_action = self.clock;
        }

        if walked || input.space {
            self.last_action = self.clock;
        }
    }

    fn enter(&mut self, next: CharacterState, sounds: &dyn SoundBoard) {
        match self.state {
            CharacterState::Walking => sounds.pause(Sound::Walking),
            CharacterState::Sleeping => sounds.pause(Sound::Snoring),
            _ => {}
        }
        match next {
            CharacterState::Walking => sounds.play(Sound::Walking),
            CharacterState::Sleeping => sounds.play(Sound::Snoring),
            CharacterState::Hurt => sounds.play(Sound::Hurting),
            _ => {}
        }
        if next.loops() {
            self.body.animate_movement(next.images(), next.frame_period());
        } else {
            self.body.play_once(next.images(), next.frame_period());
        }
        self.state = next;
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawable for Character {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Silent;
    use approx::assert_relative_eq;

    const END: f64 = 2876.0;

    fn run(character: &mut Character, input: InputState, ms: f64) {
        let sounds = Silent::default();
        let mut elapsed = 0.0;
        while elapsed < ms {
            character.update(MOVE_PERIOD, &input, END, &sounds);
            elapsed += MOVE_PERIOD;
        }
    }

    #[test]
    fn four_quarter_hits_empty_the_lifepoints() {
        let mut character = Character::new();
        for _ in 0..4 {
            character.get_hit(0.25);
        }
        assert_relative_eq!(character.lifepoints(), 0.0);
        character.get_hit(0.25);
        assert_relative_eq!(character.lifepoints(), 0.0);
        assert!(character.is_dead());
    }

    #[test]
    fn walking_right_moves_and_faces_right() {
        let mut character = Character::new();
        let input = InputState {
            right: true,
            ..InputState::default()
        };
        run(&mut character, input, MOVE_PERIOD * 10.0);
        assert!(character.x() > START_X);
        assert_eq!(character.state(), CharacterState::Walking);
        assert_eq!(character.facing(), Direction::Right);
    }

    #[test]
    fn walking_left_stops_at_zero_and_mirrors() {
        let mut character = Character::new();
        let input = InputState {
            left: true,
            ..InputState::default()
        };
        run(&mut character, input, 2000.0);
        assert_relative_eq!(character.x(), 0.0);
        assert!(character.other_direction());
    }

    #[test]
    fn walking_right_stops_at_level_end() {
        let mut character = Character::new();
        let input = InputState {
            right: true,
            ..InputState::default()
        };
        run(&mut character, input, 10_000.0);
        assert_relative_eq!(character.x(), END);
    }

    #[test]
    fn jump_leaves_and_returns_to_the_floor() {
        let mut character = Character::new();
        let up = InputState {
            up: true,
            ..InputState::default()
        };
        run(&mut character, up, 100.0);
        assert!(character.is_above_ground());
        assert_eq!(character.state(), CharacterState::Jumping);
        run(&mut character, InputState::default(), 3000.0);
        assert!(!character.is_above_ground());
        assert_relative_eq!(character.y(), FLOOR);
    }

    #[test]
    fn holding_up_jumps_only_once() {
        let mut character = Character::new();
        let up = InputState {
            up: true,
            ..InputState::default()
        };
        run(&mut character, up, 3000.0);
        assert!(!character.is_above_ground());
    }

    #[test]
    fn hurt_lasts_for_the_hurt_window() {
        let mut character = Character::new();
        character.get_hit(0.25);
        run(&mut character, InputState::default(), 100.0);
        assert_eq!(character.state(), CharacterState::Hurt);
        run(&mut character, InputState::default(), HURT_DURATION);
        assert_eq!(character.state(), CharacterState::Idle);
    }

    #[test]
    fn hurt_character_still_walks() {
        let mut character = Character::new();
        character.get_hit(0.25);
        let input = InputState {
            right: true,
            ..InputState::default()
        };
        run(&mut character, input, MOVE_PERIOD * 10.0);
        assert!(character.x() > START_X);
        assert_eq!(character.state(), CharacterState::Hurt);
        assert_eq!(character.facing(), Direction::Right);
    }

    #[test]
    fn dead_character_ignores_input() {
        let mut character = Character::new();
        character.get_hit(1.0);
        let input = InputState {
            right: true,
            ..InputState::default()
        };
        run(&mut character, input, 500.0);
        assert_relative_eq!(character.x(), START_X);
        assert_eq!(character.state(), CharacterState::Dead);
    }

    #[test]
    fn long_idle_falls_asleep() {
        let mut character = Character::new();
        run(&mut character, InputState::default(), 5100.0);
        assert_eq!(character.state(), CharacterState::Sleeping);
    }
}
