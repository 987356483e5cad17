//! Collision rules for the rectangular field
//!
//! Rules are evaluated in a fixed precedence:
//! fence > paddle one > paddle two > goal one > goal two.
//!
//! The fence rule runs per axis. The four line rules all concern the y axis
//! and are mutually exclusive: the first that matches wins. A fence bounce on
//! y in the same step suppresses the line rules, so the ball never gets both
//! a wall bounce and a paddle return on one axis in a single step.

use glam::IVec2;

use super::shape::Region;
use super::state::Player;
use crate::consts::*;

/// Collision rules in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionRule {
    Fence,
    PaddleOne,
    PaddleTwo,
    GoalOne,
    GoalTwo,
}

/// Fixed evaluation order
pub const RULE_PRECEDENCE: [CollisionRule; 5] = [
    CollisionRule::Fence,
    CollisionRule::PaddleOne,
    CollisionRule::PaddleTwo,
    CollisionRule::GoalOne,
    CollisionRule::GoalTwo,
];

/// Outcome of the y-axis line rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineHit {
    /// The player's paddle returned the ball
    Return(Player),
    /// The player scored
    Goal(Player),
}

/// Which axes of `bounds` leave the fence
pub fn fence_exits(fence: &Region, bounds: &Region) -> [bool; 2] {
    [fence.exceeded_by(bounds, 0), fence.exceeded_by(bounds, 1)]
}

/// Ball within reach of a paddle horizontally
#[inline]
pub fn within_reach(ball_x: i32, paddle_x: i32) -> bool {
    (ball_x - paddle_x).abs() <= PADDLE_REACH
}

/// What `rule` does to a ball at `ball`, given the paddles' x positions
///
/// Only the line rules are answered here; the fence rule needs bounds.
pub fn line_rule(
    rule: CollisionRule,
    ball: IVec2,
    paddle_one_x: i32,
    paddle_two_x: i32,
) -> Option<LineHit> {
    match rule {
        CollisionRule::Fence => None,
        CollisionRule::PaddleOne => (ball.y >= PADDLE_ONE_LINE && within_reach(ball.x, paddle_one_x))
            .then_some(LineHit::Return(Player::One)),
        CollisionRule::PaddleTwo => (ball.y <= PADDLE_TWO_LINE && within_reach(ball.x, paddle_two_x))
            .then_some(LineHit::Return(Player::Two)),
        CollisionRule::GoalOne => (ball.y == GOAL_ONE_LINE).then_some(LineHit::Goal(Player::One)),
        CollisionRule::GoalTwo => (ball.y == GOAL_TWO_LINE).then_some(LineHit::Goal(Player::Two)),
    }
}

/// First line rule that fires, in precedence order
pub fn first_line_hit(ball: IVec2, paddle_one_x: i32, paddle_two_x: i32) -> Option<LineHit> {
    RULE_PRECEDENCE
        .iter()
        .find_map(|&rule| line_rule(rule, ball, paddle_one_x, paddle_two_x))
}

/// Negate one component
#[inline]
pub fn reflect_axis(velocity: IVec2, axis: usize) -> IVec2 {
    let mut v = velocity;
    v[axis] = -v[axis];
    v
}

/// Back a tentative position off a boundary using the reflected velocity
///
/// Steps twice the new velocity, undoing the step that crossed and taking one
/// more in the new direction.
#[inline]
pub fn back_off(tentative: IVec2, reflected: IVec2, axis: usize) -> IVec2 {
    let mut p = tentative;
    p[axis] += 2 * reflected[axis];
    p
}

/// Grow a speed component by `increment` in its direction of travel
pub fn speed_up(component: i32, increment: i32, max: i32) -> i32 {
    let magnitude = (component.abs() + increment).min(max.max(component.abs()));
    if component < 0 { -magnitude } else { magnitude }
}
