use crate::browser;
use serde::{Deserialize, Serialize};

/// Tunables read from `config.json`, every field falls back to its default
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// cadence of the collision / throw checks in ms
    pub physics_period: f64,
    /// fraction of max lifepoints an enemy contact takes away
    pub contact_damage: f64,
    /// how far right of the left canvas edge the character is kept
    pub camera_offset: f64,
    pub show_collision_frames: bool,
    pub muted: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            canvas_width: 720.0,
            canvas_height: 480.0,
            physics_period: 100.0,
            contact_damage: 0.25,
            camera_offset: 100.0,
            show_collision_frames: cfg!(debug_assertions),
            muted: true,
        }
    }
}

impl GameConfig {
    const PATH: &'static str = "config.json";

    /// A missing or broken config file is not worth refusing to start over
    pub async fn fetch_or_default() -> Self {
        match browser::fetch_json::<GameConfig>(Self::PATH).await {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Using default config, could not load {} : {:#}", Self::PATH, err);
                GameConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "physics_period": 50.0, "muted": false }"#).unwrap();
        assert_eq!(config.physics_period, 50.0);
        assert!(!config.muted);
        assert_eq!(config.canvas_width, 720.0);
        assert_eq!(config.contact_damage, 0.25);
    }

    #[test]
    fn empty_json_is_the_default() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }
}
