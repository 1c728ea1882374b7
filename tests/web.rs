//! Browser smoke tests, run with `wasm-pack test --headless --firefox`
#![cfg(target_arch = "wasm32")]

use el_pollo_loco::engine::{ImageHandle, Mirrored, Rect, Renderer, Surface};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

wasm_bindgen_test_configure!(run_in_browser);

fn context() -> CanvasRenderingContext2d {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(720);
    canvas.set_height(480);
    canvas
        .get_context("2d")
        .unwrap()
        .unwrap()
        .dyn_into::<CanvasRenderingContext2d>()
        .unwrap()
}

#[wasm_bindgen_test]
fn undecoded_images_are_skipped() {
    let renderer = Renderer::new(context());
    let image = ImageHandle::new("img/2_character_pepe/1_idle/idle/I-1.png");
    renderer.preload(&image);
    renderer.draw_image(&image, &Rect::new(0.0, 0.0, 100.0, 250.0));
}

#[wasm_bindgen_test]
fn mirrored_guard_leaves_the_transform_untouched() {
    let context = context();
    let renderer = Renderer::new(context.clone());
    {
        let _flip = Mirrored::begin(&renderer, 100.0);
        renderer.stroke_rect(&Rect::new(-10.0, 0.0, 100.0, 100.0), "blue", 5.0);
    }
    let transform = context.get_transform().unwrap();
    assert_eq!(transform.a(), 1.0);
    assert_eq!(transform.e(), 0.0);
}
