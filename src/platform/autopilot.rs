//! Seeded demo player for the host build
//!
//! Stands in for the four switches. Each paddle chases the ball's x with a
//! per-tick chance of reacting, so matches are deterministic for a seed but
//! still end with someone missing.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Switch, SwitchSource, Switches};
use crate::consts::{PADDLE_STEP, TICK_HZ};
use crate::driver::{Direction, move_switch};
use crate::sim::{GamePhase, Player, World};

/// Ticks to sit on the game-over screen before pressing a switch
const RESTART_DELAY: u32 = 2 * TICK_HZ;

/// What the autopilot saw on its last look at the world
#[derive(Debug, Clone, Copy)]
struct View {
    phase: GamePhase,
    serve_pending: bool,
    ball_x: i32,
    paddle_x: [i32; 2],
}

pub struct Autopilot {
    rng: Pcg32,
    skill: f64,
    view: Option<View>,
    game_over_ticks: u32,
}

impl Autopilot {
    pub fn new(seed: u64, skill: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            skill: skill.clamp(0.0, 1.0),
            view: None,
            game_over_ticks: 0,
        }
    }

    /// Look at the world before the next switch sample
    pub fn observe(&mut self, world: &World) {
        let scene = &world.scene;
        self.view = Some(View {
            phase: world.state.phase,
            serve_pending: world.state.serve_pending,
            ball_x: scene.mover_layer(world.roles.ball).pos_next.x,
            paddle_x: [
                scene.mover_layer(world.roles.paddle_one).pos_next.x,
                scene.mover_layer(world.roles.paddle_two).pos_next.x,
            ],
        });
    }

    fn chase(&mut self, view: &View, player: Player) -> Option<Switch> {
        let idx = match player {
            Player::One => 0,
            Player::Two => 1,
        };
        if !self.rng.random_bool(self.skill) {
            return None;
        }
        let dx = view.ball_x - view.paddle_x[idx];
        if dx.abs() < PADDLE_STEP {
            return None;
        }
        let dir = if dx < 0 {
            Direction::Left
        } else {
            Direction::Right
        };
        Some(move_switch(player, dir))
    }

    fn playing(&mut self, view: &View) -> u8 {
        if view.serve_pending {
            // Ball and paddles all sit on the center column; nudge to serve
            let dir = if self.rng.random_bool(0.5) {
                Direction::Left
            } else {
                Direction::Right
            };
            return Switches::raw_with(&[move_switch(Player::One, dir)]);
        }

        let pressed: Vec<Switch> = [Player::One, Player::Two]
            .into_iter()
            .filter_map(|player| self.chase(view, player))
            .collect();
        Switches::raw_with(&pressed)
    }
}

impl SwitchSource for Autopilot {
    fn read_switches(&mut self) -> u8 {
        let Some(view) = self.view else {
            return Switches::RELEASED;
        };

        match view.phase {
            GamePhase::Intro { .. } => Switches::RELEASED,
            GamePhase::Playing => {
                self.game_over_ticks = 0;
                self.playing(&view)
            }
            GamePhase::GameOver { .. } => {
                self.game_over_ticks += 1;
                if self.game_over_ticks > RESTART_DELAY {
                    Switches::raw_with(&[Switch::S1])
                } else {
                    Switches::RELEASED
                }
            }
        }
    }
}
