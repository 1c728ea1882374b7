mod common;

use common::*;
use el_pollo_loco::engine::input::InputState;
use el_pollo_loco::sprite::enemies::Chicken;
use log::{LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

// the logger is process wide, this file keeps a single test
static LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct Capture;

impl Log for Capture {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut lines) = LINES.lock() {
            lines.push(format!("{} {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: Capture = Capture;

#[test]
fn hits_and_the_outcome_go_through_the_log_facade() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Info);

    let level = bare_level(2, vec![Chicken::at(100.0, 0.0).into()], vec![], vec![], vec![]);
    let (mut world, _) = world_with(level);
    run(&mut world, InputState::default(), 1000.0);

    let lines = LINES.lock().unwrap();
    assert!(lines
        .iter()
        .any(|line| line == "INFO character hit, lifepoints left : 75"));
    assert_eq!(
        lines
            .iter()
            .filter(|line| line.as_str() == "INFO game over : Lost")
            .count(),
        1
    );
}
