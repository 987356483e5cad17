//! Game settings
//!
//! Read from an optional JSON file on the host; the firmware build uses the
//! defaults, which match the stock game.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::StepTuning;

/// How well the demo autopilot plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AutopilotLevel {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl AutopilotLevel {
    /// Chance per tick that a paddle reacts to the ball
    pub fn skill(&self) -> f64 {
        match self {
            AutopilotLevel::Easy => 0.35,
            AutopilotLevel::Normal => 0.6,
            AutopilotLevel::Hard => 0.9,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Driver ticks per second
    pub tick_hz: u32,
    /// Driver ticks per resolver step
    pub resolver_divisor: u32,
    /// Sleep between ticks on the host to run at `tick_hz`
    pub realtime: bool,

    // === Rules ===
    /// Points needed to win a match
    pub win_score: u8,
    /// Ceiling for the ball's speed on either axis
    pub max_ball_speed: i32,
    /// X speed after a goal
    pub restart_speed: i32,
    /// X speed gained per paddle return
    pub speed_increment: i32,

    // === Audio ===
    pub muted: bool,

    // === Host demo ===
    pub autopilot: AutopilotLevel,
    pub autopilot_seed: u64,
    /// Stop after this many ticks
    pub max_ticks: u64,
    /// Stop after this many finished matches
    pub matches: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_hz: TICK_HZ,
            resolver_divisor: RESOLVER_DIVISOR,
            realtime: false,

            win_score: WIN_SCORE,
            max_ball_speed: MAX_BALL_SPEED,
            restart_speed: RESTART_SPEED,
            speed_increment: SPEED_INCREMENT,

            muted: false,

            autopilot: AutopilotLevel::Normal,
            autopilot_seed: 0x5eed,
            max_ticks: 200_000,
            matches: 1,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read settings {}: {e}; using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Bad settings in {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Clamp values into ranges the game can run with
    pub fn sanitized(mut self) -> Self {
        self.tick_hz = self.tick_hz.max(1);
        self.resolver_divisor = self.resolver_divisor.max(1);
        // One scoreboard glyph per score
        self.win_score = self.win_score.clamp(1, 9);
        self.max_ball_speed = self.max_ball_speed.max(BALL_START_VELOCITY.y);
        self.restart_speed = self.restart_speed.clamp(1, self.max_ball_speed);
        self.speed_increment = self.speed_increment.max(0);
        self.matches = self.matches.max(1);
        self
    }

    pub fn step_tuning(&self) -> StepTuning {
        StepTuning {
            speed_increment: self.speed_increment,
            restart_speed: self.restart_speed,
            max_ball_speed: self.max_ball_speed,
        }
    }

    /// Wall-clock length of one tick
    pub fn tick_period(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.tick_hz.max(1)
    }
}
