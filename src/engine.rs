use crate::browser;
use anyhow::{anyhow, Result};
// ELI5: web assembly is a single threaded environment, so Rc RefCell > Mutex
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use self::input::InputState;

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    fn update(&mut self, keystate: &InputState);
    fn draw(&self, renderer: &dyn Surface);
    /// Hands every image the game knows about to the renderer so decoding
    /// starts before the first frame needs it
    fn preload(&self, _renderer: &dyn Surface) {}
}

// length of a frame in milliseconds
pub const FRAME_SIZE: f64 = 1.0 / 60.0 * 1000.0;

// interval boundaries land on sums of FRAME_SIZE, which never add up exactly
const TIMER_EPSILON: f64 = 1e-6;

// ==================== Timing ====================
/// TABLE:
/// ┌───────────────────── One Display Frame ─────────────────────────┐
/// │  requestAnimationFrame(perf)                                    │
/// │      │                                                          │
/// │      ▼                                                          │
/// │  FrameClock::advance(perf) ──► N fixed steps of FRAME_SIZE      │
/// │      │                            │                             │
/// │      │                            └─► game.update(keystate) xN  │
/// │      ▼                                                          │
/// │  game.draw(renderer)  (reads state, never writes it)            │
/// └─────────────────────────────────────────────────────────────────┘
/// Every entity timer (animation, movement, gravity, the physics
/// cadence) is an Interval advanced inside update(), so there is exactly
/// one clock driving the simulation
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last_frame: f64,
    accumulated_delta: f64,
}

impl FrameClock {
    pub fn new(now: f64) -> Self {
        FrameClock {
            last_frame: now,
            accumulated_delta: 0.0,
        }
    }

    /// Returns how many fixed steps fit into the time since the last frame
    /// - leftover time is carried to the next frame
    pub fn advance(&mut self, now: f64) -> u32 {
        self.accumulated_delta += now - self.last_frame;
        self.last_frame = now;
        let mut steps = 0;
        while self.accumulated_delta + TIMER_EPSILON >= FRAME_SIZE {
            self.accumulated_delta -= FRAME_SIZE;
            steps += 1;
        }
        steps
    }
}

/// Fixed period timer driven by simulated time instead of setInterval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    period: f64,
    elapsed: f64,
}

impl Interval {
    pub fn new(period: f64) -> Self {
        Interval {
            // a zero period would never stop firing
            period: period.max(1.0),
            elapsed: 0.0,
        }
    }

    /// Number of times the interval fired while `dt` milliseconds passed
    pub fn tick(&mut self, dt: f64) -> u32 {
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed + TIMER_EPSILON >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

// ==================== Loop ====================
/// Shared on/off switch between the loop closure and whoever owns the loop
#[derive(Debug, Clone)]
pub struct LoopControl {
    running: Rc<Cell<bool>>,
}

impl LoopControl {
    pub fn new() -> Self {
        LoopControl {
            running: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn stop(&self) {
        self.running.set(false);
    }
}

impl Default for LoopControl {
    fn default() -> Self {
        Self::new()
    }
}

/// Body of a single animation frame, kept free of browser calls so it can
/// be driven from tests
/// - returns false once the loop was stopped, the caller must not
///   reschedule
pub fn run_frame(
    control: &LoopControl,
    clock: &mut FrameClock,
    now: f64,
    game: &mut dyn Game,
    keystate: &InputState,
    renderer: &dyn Surface,
) -> bool {
    if !control.is_running() {
        return false;
    }
    for _ in 0..clock.advance(now) {
        game.update(keystate);
    }
    game.draw(renderer);
    true
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

pub struct GameLoop;

/// Owner side of a running loop
/// - stop() cancels the pending frame and drops the self referencing
///   closure, after that nothing from this loop touches the canvas again
/// - dropping the handle stops the loop, so overwriting a stored handle
///   can never leave an orphaned loop painting the canvas
pub struct LoopHandle {
    control: LoopControl,
    frame_id: Rc<Cell<Option<i32>>>,
    closure: SharedLoopClosure,
}

impl LoopHandle {
    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }

    pub fn stop(&self) {
        self.control.stop();
        if let Some(id) = self.frame_id.take() {
            if let Err(err) = browser::cancel_animation_frame(id) {
                log::error!("{:#?}", err);
            }
        }
        // the closure owns a clone of its own Rc, dropping it breaks the cycle
        self.closure.borrow_mut().take();
    }
}

impl Drop for LoopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

impl GameLoop {
    pub async fn start(
        game: impl Game + 'static,
        input: Rc<RefCell<InputState>>,
    ) -> Result<LoopHandle> {
        let mut game = game.initialize().await?;
        let renderer = Renderer::new(browser::context()?);
        game.preload(&renderer);

        let control = LoopControl::new();
        let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let mut clock = FrameClock::new(browser::now()?);

        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        let loop_control = control.clone();
        let loop_frame_id = frame_id.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            let keystate = *input.borrow();
            if !run_frame(
                &loop_control,
                &mut clock,
                perf,
                game.as_mut(),
                &keystate,
                &renderer,
            ) {
                return;
            }
            if let Some(closure) = f.borrow().as_ref() {
                match browser::request_animation_frame(closure) {
                    Ok(id) => loop_frame_id.set(Some(id)),
                    Err(err) => log::error!("{:#?}", err),
                }
            }
        }));

        let id = browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;
        frame_id.set(Some(id));

        Ok(LoopHandle {
            control,
            frame_id,
            closure: g,
        })
    }
}

// ==================== Geometry ====================
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Axis aligned overlap with a nonzero area
    /// - touching edges share a line, not an area -> false
    pub fn intersects(&self, other: &Rect) -> bool {
        let overlap_width = self.right().min(other.right()) - self.x.max(other.x);
        let overlap_height = self.bottom().min(other.bottom()) - self.y.max(other.y);
        overlap_width > 0.0 && overlap_height > 0.0
    }
}

// ==================== Images ====================
/// Identity of an image inside an entity's image cache
/// - cheap to clone, the renderer resolves it into an actual element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle(Rc<str>);

impl ImageHandle {
    pub fn new(path: &str) -> Self {
        ImageHandle(Rc::from(path))
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

// ==================== Drawing ====================
/// Everything the world needs from a 2d canvas
pub trait Surface {
    fn clear(&self, rect: &Rect);
    fn translate(&self, x: f64, y: f64);
    fn scale(&self, x: f64, y: f64);
    fn save(&self);
    fn restore(&self);
    fn draw_image(&self, image: &ImageHandle, destination: &Rect);
    fn stroke_rect(&self, rect: &Rect, color: &str, line_width: f64);
    fn preload(&self, _image: &ImageHandle) {}
}

/// save() + flip around the sprite's width, restore() on drop
/// ELI5:
/// ┌──────────── Mirrored draw of a sprite at x ─────────────┐
/// │ translate(width, 0) ; scale(-1, 1)                      │
/// │ draw at -x  ──► lands on [x, x + width], flipped        │
/// │ restore()   ──► runs on every exit path (Drop)          │
/// └─────────────────────────────────────────────────────────┘
pub struct Mirrored<'a> {
    surface: &'a dyn Surface,
}

impl<'a> Mirrored<'a> {
    pub fn begin(surface: &'a dyn Surface, width: f64) -> Self {
        surface.save();
        surface.translate(width, 0.0);
        surface.scale(-1.0, 1.0);
        Mirrored { surface }
    }
}

impl Drop for Mirrored<'_> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
    images: RefCell<HashMap<ImageHandle, HtmlImageElement>>,
}

impl Renderer {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Renderer {
            context,
            images: RefCell::new(HashMap::new()),
        }
    }

    /// Creating the element and setting src starts decoding, we never wait
    /// on it
    fn image_element(&self, handle: &ImageHandle) -> Option<HtmlImageElement> {
        if let Some(image) = self.images.borrow().get(handle) {
            return Some(image.clone());
        }
        match browser::new_image() {
            Ok(image) => {
                image.set_src(handle.path());
                self.images
                    .borrow_mut()
                    .insert(handle.clone(), image.clone());
                Some(image)
            }
            Err(err) => {
                log::error!("{:#?}", err);
                None
            }
        }
    }
}

impl Surface for Renderer {
    fn clear(&self, rect: &Rect) {
        self.context
            .clear_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn translate(&self, x: f64, y: f64) {
        if let Err(err) = self.context.translate(x, y) {
            log::error!("translate failed : {:#?}", err);
        }
    }

    fn scale(&self, x: f64, y: f64) {
        if let Err(err) = self.context.scale(x, y) {
            log::error!("scale failed : {:#?}", err);
        }
    }

    fn save(&self) {
        self.context.save();
    }

    fn restore(&self) {
        self.context.restore();
    }

    fn draw_image(&self, image: &ImageHandle, destination: &Rect) {
        let Some(element) = self.image_element(image) else {
            return;
        };
        // still decoding or broken -> blank sprite this frame
        if !element.complete() || element.natural_width() == 0 {
            return;
        }
        let _ = self
            .context
            .draw_image_with_html_image_element_and_dw_and_dh(
                &element,
                destination.x,
                destination.y,
                destination.width,
                destination.height,
            );
    }

    fn stroke_rect(&self, rect: &Rect, color: &str, line_width: f64) {
        self.context.begin_path();
        self.context.set_line_width(line_width);
        self.context.set_stroke_style_str(color);
        self.context.rect(rect.x, rect.y, rect.width, rect.height);
        self.context.stroke();
    }

    fn preload(&self, image: &ImageHandle) {
        self.image_element(image);
    }
}

// ==================== Input ====================
pub mod input {
    /// Buttons the game reacts to, keyboard and touch both map onto these
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Button {
        Left,
        Right,
        Up,
        Down,
        Space,
        Enter,
    }

    impl Button {
        pub fn from_key_code(code: &str) -> Option<Self> {
            match code {
                "ArrowLeft" => Some(Button::Left),
                "ArrowRight" => Some(Button::Right),
                "ArrowUp" => Some(Button::Up),
                "ArrowDown" => Some(Button::Down),
                "Space" => Some(Button::Space),
                "Enter" | "NumpadEnter" => Some(Button::Enter),
                _ => None,
            }
        }
    }

    /// Flat button flags, overwritten by every key/touch event
    /// - no history, the world only ever reads a snapshot
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct InputState {
        pub left: bool,
        pub right: bool,
        pub up: bool,
        pub down: bool,
        pub space: bool,
        pub enter: bool,
    }

    impl InputState {
        pub fn set(&mut self, button: Button, pressed: bool) {
            *self.flag_mut(button) = pressed;
        }

        pub fn is_pressed(&self, button: Button) -> bool {
            match button {
                Button::Left => self.left,
                Button::Right => self.right,
                Button::Up => self.up,
                Button::Down => self.down,
                Button::Space => self.space,
                Button::Enter => self.enter,
            }
        }

        fn flag_mut(&mut self, button: Button) -> &mut bool {
            match button {
                Button::Left => &mut self.left,
                Button::Right => &mut self.right,
                Button::Up => &mut self.up,
                Button::Down => &mut self.down,
                Button::Space => &mut self.space,
                Button::Enter => &mut self.enter,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::input::{Button, InputState};
    use super::*;

    /// Handle as GameLoop::start leaves it, minus the browser side
    fn idle_handle(control: &LoopControl) -> LoopHandle {
        LoopHandle {
            control: control.clone(),
            frame_id: Rc::new(Cell::new(None)),
            closure: Rc::new(RefCell::new(None)),
        }
    }

    #[test]
    fn dropped_handle_stops_its_loop() {
        let control = LoopControl::new();
        let handle = idle_handle(&control);
        assert!(handle.is_running());
        drop(handle);
        assert!(!control.is_running());
    }

    #[test]
    fn replacing_a_stored_handle_stops_the_old_loop() {
        let first = LoopControl::new();
        let second = LoopControl::new();
        let running: RefCell<Option<LoopHandle>> = RefCell::new(Some(idle_handle(&first)));

        // two reloads in one turn both land here
        *running.borrow_mut() = Some(idle_handle(&second));
        assert!(!first.is_running());
        assert!(second.is_running());

        if let Some(handle) = running.borrow_mut().take() {
            handle.stop();
        }
        assert!(!second.is_running());
    }

    #[test]
    fn interval_fires_once_per_period() {
        let mut interval = Interval::new(100.0);
        assert_eq!(interval.tick(50.0), 0);
        assert_eq!(interval.tick(50.0), 1);
        assert_eq!(interval.tick(250.0), 2);
        assert_eq!(interval.tick(50.0), 1);
    }

    #[test]
    fn interval_survives_frame_size_rounding() {
        let mut interval = Interval::new(100.0);
        let fired: u32 = (0..30).map(|_| interval.tick(FRAME_SIZE)).sum();
        assert_eq!(fired, 5);
    }

    #[test]
    fn frame_clock_carries_leftover_time() {
        let mut clock = FrameClock::new(0.0);
        assert_eq!(clock.advance(10.0), 0);
        assert_eq!(clock.advance(20.0), 1);
        assert_eq!(clock.advance(20.0 + FRAME_SIZE * 3.0), 3);
    }

    #[test]
    fn touching_rectangles_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn overlapping_rectangles_intersect_both_ways() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.0, 9.0, 5.0, 5.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn zero_sized_rectangle_never_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let point = Rect::new(5.0, 5.0, 0.0, 0.0);
        assert!(!a.intersects(&point));
    }

    #[test]
    fn key_codes_map_to_buttons() {
        assert_eq!(Button::from_key_code("ArrowLeft"), Some(Button::Left));
        assert_eq!(Button::from_key_code("Space"), Some(Button::Space));
        assert_eq!(Button::from_key_code("KeyQ"), None);
    }

    #[test]
    fn input_flags_are_overwritten() {
        let mut input = InputState::default();
        input.set(Button::Right, true);
        assert!(input.is_pressed(Button::Right));
        input.set(Button::Right, false);
        assert!(!input.is_pressed(Button::Right));
        assert_eq!(input, InputState::default());
    }
}
