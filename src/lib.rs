//! LCD Pong - two-player Pong for a 128x160 LCD, four switches and a buzzer
//!
//! Core modules:
//! - `sim`: Shapes, layers, game state and the motion/collision resolver
//! - `renderer`: Per-pixel compositing over a `Display` sink
//! - `driver`: Fixed-rate tick: input polling, resolver cadence, intro, win/restart
//! - `game`: Owns everything and provides the main-loop body
//! - `platform`: Switches, interrupt mask, demo autopilot
//! - `audio`: Buzzer tones

pub mod audio;
pub mod driver;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::IVec2;

    /// Display dimensions (portrait)
    pub const SCREEN_WIDTH: i32 = 128;
    pub const SCREEN_HEIGHT: i32 = 160;

    /// Field center; also where the ball is served from
    pub const FIELD_CENTER: IVec2 = IVec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2);
    /// Center of the field outline and the divider line
    pub const FIELD_OUTLINE_CENTER: IVec2 = IVec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2 - 3);
    pub const FIELD_OUTLINE_HALF: IVec2 = IVec2::new(SCREEN_WIDTH / 2 - 2, SCREEN_HEIGHT / 2 - 6);
    pub const CENTER_LINE_HALF: IVec2 = IVec2::new(61, 0);

    /// Paddle geometry
    pub const PADDLE_HALF: IVec2 = IVec2::new(15, 3);
    /// Horizontal reach of a paddle for contact tests (wider than the drawn paddle)
    pub const PADDLE_REACH: i32 = 18;
    pub const PADDLE_ONE_START: IVec2 = IVec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2 + 64);
    pub const PADDLE_TWO_START: IVec2 = IVec2::new(SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2 - 70);
    /// Pixels a paddle moves per accepted command
    pub const PADDLE_STEP: i32 = 5;
    /// Travel limits checked before a move is applied
    pub const PADDLE_ONE_MIN_X: i32 = 27;
    pub const PADDLE_TWO_MIN_X: i32 = 26;
    pub const PADDLE_MAX_X: i32 = 102;

    /// Ball defaults
    pub const BALL_RADIUS: i32 = 4;
    pub const BALL_START_VELOCITY: IVec2 = IVec2::new(5, 5);
    /// X speed after a goal
    pub const RESTART_SPEED: i32 = 5;
    /// X speed gained per paddle contact
    pub const SPEED_INCREMENT: i32 = 1;
    /// Default ceiling for the ball's speed on either axis
    pub const MAX_BALL_SPEED: i32 = 12;

    /// Ball y at or past which paddle one can return it
    pub const PADDLE_ONE_LINE: i32 = 134;
    /// Ball y at or before which paddle two can return it
    pub const PADDLE_TWO_LINE: i32 = 21;
    /// Exact ball y that scores for player one (ball got past paddle two)
    pub const GOAL_ONE_LINE: i32 = 20;
    /// Exact ball y that scores for player two (ball got past paddle one)
    pub const GOAL_TWO_LINE: i32 = 135;

    /// Buzzer periods
    pub const TONE_PADDLE_ONE: u16 = 600;
    pub const TONE_PADDLE_TWO: u16 = 500;

    pub const WIN_SCORE: u8 = 5;

    /// Nominal driver rate and resolver cadence
    pub const TICK_HZ: u32 = 15;
    pub const RESOLVER_DIVISOR: u32 = 20;

    /// Intro timeline, in driver ticks
    pub const INTRO_COUNT_3_UNTIL: u32 = 50;
    pub const INTRO_COUNT_2_UNTIL: u32 = 100;
    pub const INTRO_COUNT_1_UNTIL: u32 = 150;
    pub const INTRO_TEXT_UNTIL: u32 = 185;
    pub const INTRO_DONE_AT: u32 = 200;
}

/// Digit shown on the scoreboard for a score
#[inline]
pub fn score_char(score: u8) -> char {
    debug_assert!(score <= 9, "score {score} does not fit one glyph");
    char::from(b'0' + score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_char() {
        assert_eq!(score_char(0), '0');
        assert_eq!(score_char(5), '5');
    }

    #[test]
    fn test_stock_geometry() {
        use consts::*;
        use glam::IVec2;
        assert_eq!(FIELD_CENTER, IVec2::new(64, 80));
        assert_eq!(PADDLE_ONE_START, IVec2::new(64, 144));
        assert_eq!(PADDLE_TWO_START, IVec2::new(64, 10));
    }
}
