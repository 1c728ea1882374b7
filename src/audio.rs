use crate::browser;
use anyhow::Result;
use std::cell::Cell;
use std::collections::HashMap;
use web_sys::HtmlAudioElement;

/// Every sound the core asks for, decoding and playback live behind
/// SoundBoard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Theme,
    DyingBird,
    FlyingBottle,
    SmashingBottle,
    PickCoin,
    PickBottle,
    Walking,
    Jumping,
    Hurting,
    Snoring,
}

impl Sound {
    pub const ALL: [Sound; 10] = [
        Sound::Theme,
        Sound::DyingBird,
        Sound::FlyingBottle,
        Sound::SmashingBottle,
        Sound::PickCoin,
        Sound::PickBottle,
        Sound::Walking,
        Sound::Jumping,
        Sound::Hurting,
        Sound::Snoring,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Sound::Theme => "audio/theme_song.mp3",
            Sound::DyingBird => "audio/dying_bird.mp3",
            Sound::FlyingBottle => "audio/flying_bottle.mp3",
            Sound::SmashingBottle => "audio/smashing_bottle.mp3",
            Sound::PickCoin => "audio/pick_coin.mp3",
            Sound::PickBottle => "audio/pick_bottle.mp3",
            Sound::Walking => "audio/walking.mp3",
            Sound::Jumping => "audio/jumping.mp3",
            Sound::Hurting => "audio/hurting.mp3",
            Sound::Snoring => "audio/snoring.mp3",
        }
    }

    /// Background and state sounds repeat until paused, effects play once
    pub fn loops(&self) -> bool {
        matches!(self, Sound::Theme | Sound::Walking | Sound::Snoring)
    }
}

/// Audio collaborator
/// - play/pause never fail from the core's point of view, a sound that
///   can't play just stays silent
pub trait SoundBoard {
    fn play(&self, sound: Sound);
    fn pause(&self, sound: Sound);
    fn set_muted(&self, muted: bool);
    fn is_muted(&self) -> bool;
}

/// Board that swallows everything, for headless runs
#[derive(Debug, Default)]
pub struct Silent {
    muted: Cell<bool>,
}

impl SoundBoard for Silent {
    fn play(&self, _sound: Sound) {}

    fn pause(&self, _sound: Sound) {}

    fn set_muted(&self, muted: bool) {
        self.muted.set(muted);
    }

    fn is_muted(&self) -> bool {
        self.muted.get()
    }
}

/// One <audio> element per Sound
pub struct WebSoundBoard {
    elements: HashMap<Sound, HtmlAudioElement>,
    muted: Cell<bool>,
}

impl WebSoundBoard {
    pub fn new(muted: bool) -> Result<Self> {
        let mut elements = HashMap::new();
        for sound in Sound::ALL {
            let element = browser::new_audio(sound.path())?;
            element.set_muted(muted);
            element.set_loop(sound.loops());
            elements.insert(sound, element);
        }
        Ok(WebSoundBoard {
            elements,
            muted: Cell::new(muted),
        })
    }
}

impl SoundBoard for WebSoundBoard {
    fn play(&self, sound: Sound) {
        if let Some(element) = self.elements.get(&sound) {
            // the returned promise rejects under autoplay rules, silence is fine
            let _ = element.play();
        }
    }

    fn pause(&self, sound: Sound) {
        if let Some(element) = self.elements.get(&sound) {
            let _ = element.pause();
        }
    }

    fn set_muted(&self, muted: bool) {
        self.muted.set(muted);
        for element in self.elements.values() {
            element.set_muted(muted);
        }
    }

    fn is_muted(&self) -> bool {
        self.muted.get()
    }
}
