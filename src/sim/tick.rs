//! Resolver step
//!
//! Advances every simulated moving layer by one step, applies the collision
//! rules and mutates the game state (scores, colors, tone, serve hold).

use glam::IVec2;

use super::collision::{LineHit, back_off, fence_exits, first_line_hit, reflect_axis, speed_up};
use super::layer::{MoverId, Roles, Scene};
use super::state::{GameState, Player};
use crate::consts::*;
use crate::renderer::Color;

/// Ball behavior knobs for a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTuning {
    /// X speed gained per paddle return
    pub speed_increment: i32,
    /// X speed after a goal
    pub restart_speed: i32,
    /// Ceiling for either velocity component
    pub max_ball_speed: i32,
}

impl Default for StepTuning {
    fn default() -> Self {
        Self {
            speed_increment: SPEED_INCREMENT,
            restart_speed: RESTART_SPEED,
            max_ball_speed: MAX_BALL_SPEED,
        }
    }
}

/// Something the step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// Reflected off the fence on an axis (0 = x, 1 = y)
    FenceBounce { mover: MoverId, axis: usize },
    /// Returned by a paddle
    PaddleReturn { mover: MoverId, player: Player },
    /// Scored; ball back at center
    Goal { mover: MoverId, scorer: Player },
}

/// Result of one resolver step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub events: Vec<SimEvent>,
    /// Some simulated layer got a new next position
    pub moved: bool,
    /// Last buzzer period requested during the step
    pub tone: Option<u16>,
}

impl StepOutcome {
    /// Anything visible changed: a position, a color, or a score
    pub fn needs_redraw(&self) -> bool {
        self.moved || !self.events.is_empty()
    }

    /// Scorer of the first goal in this step
    pub fn goal(&self) -> Option<Player> {
        self.events.iter().find_map(|e| match e {
            SimEvent::Goal { scorer, .. } => Some(*scorer),
            _ => None,
        })
    }
}

/// Advance every simulated mover by one step
///
/// While a serve is pending the ball is held where it is and nothing is
/// evaluated.
pub fn resolve_step(
    scene: &mut Scene,
    roles: &Roles,
    state: &mut GameState,
    tuning: &StepTuning,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    if state.serve_pending {
        return outcome;
    }

    for &mover in &roles.simulated {
        advance_mover(scene, roles, state, tuning, mover, &mut outcome);
    }

    for event in &outcome.events {
        log::debug!("step event: {event:?}");
    }
    outcome
}

fn advance_mover(
    scene: &mut Scene,
    roles: &Roles,
    state: &mut GameState,
    tuning: &StepTuning,
    mover: MoverId,
    outcome: &mut StepOutcome,
) {
    let layer_id = scene.mover(mover).layer;
    let next = scene.layer(layer_id).pos_next;
    let mut velocity = scene.mover(mover).velocity;
    let mut tentative = next + velocity;
    let bounds = scene.bounds_at(layer_id, tentative);

    let exits = fence_exits(&state.fence, &bounds);
    for axis in 0..2 {
        if exits[axis] {
            velocity = reflect_axis(velocity, axis);
            tentative = back_off(tentative, velocity, axis);
            outcome.tone = Some(0);
            outcome.events.push(SimEvent::FenceBounce { mover, axis });
        }
    }

    // A y bounce off the fence takes the whole y axis for this step
    let line_hit = if exits[1] {
        None
    } else {
        let paddle_one_x = scene.mover_layer(roles.paddle_one).pos_next.x;
        let paddle_two_x = scene.mover_layer(roles.paddle_two).pos_next.x;
        first_line_hit(next, paddle_one_x, paddle_two_x)
    };

    match line_hit {
        Some(LineHit::Return(player)) => {
            velocity = reflect_axis(velocity, 1);
            tentative = back_off(tentative, velocity, 1);
            velocity.x = speed_up(velocity.x, tuning.speed_increment, tuning.max_ball_speed);

            scene.mover_layer_mut(roles.paddle(player)).color = player.color();
            scene.mover_layer_mut(roles.paddle(player.opponent())).color = Color::WHITE;
            scene.layer_mut(layer_id).color = player.color();

            outcome.tone = Some(match player {
                Player::One => TONE_PADDLE_ONE,
                Player::Two => TONE_PADDLE_TWO,
            });
            outcome.events.push(SimEvent::PaddleReturn { mover, player });
        }
        Some(LineHit::Goal(scorer)) => {
            scene.mover_layer_mut(roles.paddle(scorer.opponent())).color = Color::RED;
            state.scores.award(scorer);

            tentative = FIELD_CENTER;
            velocity.x = tuning.restart_speed;
            state.serve_pending = true;
            scene.layer_mut(layer_id).pos_next = FIELD_CENTER;

            log::info!(
                "Goal for {scorer:?}: {} - {}",
                state.scores.one,
                state.scores.two
            );
            outcome.events.push(SimEvent::Goal { mover, scorer });
        }
        None => {}
    }

    debug_assert!(
        velocity.abs().max_element() <= tuning.max_ball_speed,
        "velocity {velocity} past the ceiling {}",
        tuning.max_ball_speed
    );
    scene.mover_mut(mover).velocity = velocity;

    if !state.serve_pending {
        scene.layer_mut(layer_id).pos_next = tentative;
    }
    if scene.layer(layer_id).pos_next != next {
        outcome.moved = true;
    }
    if let Some(tone) = outcome.tone {
        state.tone = tone;
    }
}
