//! Text overlays: scoreboard, intro screen, game-over banner

use glam::IVec2;

use super::{Color, Display};
use crate::consts::*;
use crate::sim::{Player, Scoreboard};

/// Where a player's label and digit go on the bottom strip
pub fn score_slots(player: Player) -> (IVec2, IVec2) {
    match player {
        Player::One => (IVec2::new(3, 152), IVec2::new(52, 152)),
        Player::Two => (IVec2::new(72, 152), IVec2::new(120, 152)),
    }
}

pub fn draw_scoreboard(scores: &Scoreboard, display: &mut impl Display) {
    for player in [Player::One, Player::Two] {
        let (label, digit) = score_slots(player);
        let fg = player.color();
        display.draw_text(label.x, label.y, player.label(), fg, Color::VIOLET);
        display.draw_char(digit.x, digit.y, scores.glyph(player), fg, Color::VIOLET);
    }
}

pub const INTRO_TITLE_POS: IVec2 = IVec2::new(SCREEN_WIDTH / 2 - 50, 30);
pub const INTRO_COUNTDOWN_POS: IVec2 = IVec2::new(SCREEN_WIDTH / 2 - 2, 110);

/// Control help lines and their colors
const INTRO_CONTROLS: [(i32, &str, Color); 4] = [
    (50, "S1: GOLD Left", Color::GOLD),
    (65, "S2: GOLD Right", Color::GOLD),
    (80, "S3: BLACK Left", Color::BLACK),
    (95, "S4: BLACK Right", Color::BLACK),
];

/// Countdown text for a point in the intro; `None` once it has been cleared
pub fn countdown(elapsed: u32) -> Option<&'static str> {
    match elapsed {
        t if t < INTRO_COUNT_3_UNTIL => Some("3"),
        t if t < INTRO_COUNT_2_UNTIL => Some("2"),
        t if t < INTRO_COUNT_1_UNTIL => Some("1"),
        t if t < INTRO_TEXT_UNTIL => Some("Begin!"),
        _ => None,
    }
}

/// Intro screen for the given tick count
pub fn draw_intro(elapsed: u32, display: &mut impl Display) {
    let Some(cue) = countdown(elapsed) else {
        return;
    };
    display.draw_text(
        INTRO_TITLE_POS.x,
        INTRO_TITLE_POS.y,
        "Welcome to Pong",
        Color::BLACK,
        Color::VIOLET,
    );
    for (y, line, fg) in INTRO_CONTROLS {
        display.draw_text(15, y, line, fg, Color::VIOLET);
    }
    display.draw_text(
        INTRO_COUNTDOWN_POS.x,
        INTRO_COUNTDOWN_POS.y,
        cue,
        Color::BLACK,
        Color::VIOLET,
    );
}

/// Three-line banner in the middle of a white screen
pub fn draw_game_over(winner: Player, display: &mut impl Display) {
    let x = SCREEN_WIDTH / 2;
    let y = SCREEN_HEIGHT / 2;
    for (dy, text) in [(0, "Game Over"), (10, "WINNER"), (20, winner.banner())] {
        display.draw_text(x, y + dy, text, Color::VIOLET, Color::WHITE);
    }
}
