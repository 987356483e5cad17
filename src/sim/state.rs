//! Game state shared by the driver, the resolver and the main loop
//!
//! Nothing here is global; every holder gets it by reference.

use super::shape::Region;
use crate::renderer::Color;
use crate::score_char;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Gold; paddle near the bottom of the screen, scores at the top goal line
    One,
    /// Black; paddle near the top of the screen, scores at the bottom goal line
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Highlight used when this player's paddle returns the ball
    pub fn color(self) -> Color {
        match self {
            Player::One => Color::GOLD,
            Player::Two => Color::BLACK,
        }
    }

    /// Scoreboard label
    pub fn label(self) -> &'static str {
        match self {
            Player::One => "Player1:",
            Player::Two => "Player2:",
        }
    }

    /// Game-over banner name
    pub fn banner(self) -> &'static str {
        match self {
            Player::One => "Player1!",
            Player::Two => "Player2!",
        }
    }
}

/// Current phase of the program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Instructions and countdown; input ignored
    Intro { elapsed: u32 },
    /// Active gameplay
    Playing,
    /// Someone reached the win score; waiting for a press to restart
    GameOver { winner: Player },
}

/// Score counters plus the digits shown for them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoreboard {
    pub one: u8,
    pub two: u8,
    pub one_char: char,
    pub two_char: char,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            one: 0,
            two: 0,
            one_char: score_char(0),
            two_char: score_char(0),
        }
    }

    pub fn get(&self, player: Player) -> u8 {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
        }
    }

    pub fn glyph(&self, player: Player) -> char {
        match player {
            Player::One => self.one_char,
            Player::Two => self.two_char,
        }
    }

    /// Add a point and its digit
    pub fn award(&mut self, player: Player) {
        let (score, glyph) = match player {
            Player::One => (&mut self.one, &mut self.one_char),
            Player::Two => (&mut self.two, &mut self.two_char),
        };
        *score += 1;
        *glyph = score_char(*score);
    }

    /// Scores stop at the win threshold because play stops there
    pub fn debug_check(&self, win_score: u8) {
        debug_assert!(
            self.one <= win_score && self.two <= win_score,
            "score past the win threshold {win_score}: {self:?}"
        );
    }

    /// First player at or past `win_score`
    pub fn winner(&self, win_score: u8) -> Option<Player> {
        if self.one >= win_score {
            Some(Player::One)
        } else if self.two >= win_score {
            Some(Player::Two)
        } else {
            None
        }
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable game-wide state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    /// Ball held at center until a paddle moves (set at start and after goals)
    pub serve_pending: bool,
    pub scores: Scoreboard,
    pub bg_color: Color,
    /// Main loop has work to do
    pub redraw_pending: bool,
    /// Main loop must repaint every layer, not just the moving ones
    pub repaint_all: bool,
    /// Playable boundary, taken from the field outline once
    pub fence: Region,
    /// Last buzzer period requested (0 = silent)
    pub tone: u16,
}

impl GameState {
    pub fn new(fence: Region) -> Self {
        Self {
            phase: GamePhase::Intro { elapsed: 0 },
            serve_pending: true,
            scores: Scoreboard::new(),
            bg_color: Color::VIOLET,
            redraw_pending: true,
            repaint_all: true,
            fence,
            tone: 0,
        }
    }

    /// Back to a fresh match. The fence is kept; the intro is not replayed.
    pub fn reset(&mut self) {
        *self = Self {
            phase: GamePhase::Playing,
            ..Self::new(self.fence)
        };
    }

    /// Request a frame
    pub fn request_redraw(&mut self) {
        self.redraw_pending = true;
    }

    /// Request a frame that repaints everything
    pub fn request_repaint(&mut self) {
        self.redraw_pending = true;
        self.repaint_all = true;
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}
