//! Periodic driver
//!
//! The body of the fixed-rate interrupt. Every tick it samples the switches
//! into a command queue; every N-th tick it steps the resolver and then
//! applies the queued paddle moves. It also runs the intro timeline and the
//! win/restart transitions.

use std::collections::VecDeque;

use crate::audio::{AudioManager, Buzzer, SoundEffect};
use crate::consts::*;
use crate::platform::{Switch, Switches};
use crate::renderer::{Color, hud};
use crate::settings::Settings;
use crate::sim::{GamePhase, Player, StepOutcome, StepTuning, World, resolve_step};

/// Horizontal paddle direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> i32 {
        match self {
            Direction::Left => -PADDLE_STEP,
            Direction::Right => PADDLE_STEP,
        }
    }
}

/// Work queued by the input poller for the next resolver step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MovePaddle { player: Player, dir: Direction },
    Restart,
}

/// Paddle move bound to a switch
pub fn switch_move(sw: Switch) -> (Player, Direction) {
    match sw {
        Switch::S1 => (Player::One, Direction::Left),
        Switch::S2 => (Player::One, Direction::Right),
        Switch::S3 => (Player::Two, Direction::Left),
        Switch::S4 => (Player::Two, Direction::Right),
    }
}

/// Switch bound to a paddle move
pub fn move_switch(player: Player, dir: Direction) -> Switch {
    match (player, dir) {
        (Player::One, Direction::Left) => Switch::S1,
        (Player::One, Direction::Right) => Switch::S2,
        (Player::Two, Direction::Left) => Switch::S3,
        (Player::Two, Direction::Right) => Switch::S4,
    }
}

/// Whether a paddle at `x` may take a step in `dir`
pub fn move_allowed(player: Player, dir: Direction, x: i32) -> bool {
    match (player, dir) {
        (Player::One, Direction::Left) => x >= PADDLE_ONE_MIN_X,
        (Player::Two, Direction::Left) => x >= PADDLE_TWO_MIN_X,
        (_, Direction::Right) => x <= PADDLE_MAX_X,
    }
}

/// Turns switch samples into commands
#[derive(Debug, Clone, Default)]
pub struct InputPoller {
    last: Switches,
}

impl InputPoller {
    /// Sample the switch register for the current phase
    ///
    /// Held switches repeat paddle moves while playing. After a match only a
    /// fresh press counts, so a switch still held from the last rally does
    /// not restart it.
    pub fn poll(&mut self, raw: u8, phase: GamePhase, queue: &mut VecDeque<Command>) {
        let now = Switches::from_raw(raw);
        match phase {
            GamePhase::Intro { .. } => {}
            GamePhase::Playing => {
                queue.extend(now.down().map(|sw| {
                    let (player, dir) = switch_move(sw);
                    Command::MovePaddle { player, dir }
                }));
            }
            GamePhase::GameOver { .. } => {
                if now.pressed_since(self.last) {
                    queue.push_back(Command::Restart);
                }
            }
        }
        self.last = now;
    }
}

/// Tick counter, command queue and the rules that run between steps
#[derive(Debug, Clone)]
pub struct Driver {
    divisor: u32,
    win_score: u8,
    tuning: StepTuning,
    count: u32,
    queue: VecDeque<Command>,
    poller: InputPoller,
}

impl Driver {
    pub fn new(settings: &Settings) -> Self {
        Self {
            divisor: settings.resolver_divisor.max(1),
            // One scoreboard glyph per score
            win_score: settings.win_score.clamp(1, 9),
            tuning: settings.step_tuning(),
            count: 0,
            queue: VecDeque::new(),
            poller: InputPoller::default(),
        }
    }

    /// Commands waiting for the next step
    pub fn pending(&self) -> &VecDeque<Command> {
        &self.queue
    }

    /// One periodic tick with the given switch sample
    ///
    /// Returns the resolver outcome on ticks where the resolver ran.
    pub fn tick<B: Buzzer>(
        &mut self,
        world: &mut World,
        audio: &mut AudioManager<B>,
        raw: u8,
    ) -> Option<StepOutcome> {
        self.poller.poll(raw, world.state.phase, &mut self.queue);

        match world.state.phase {
            GamePhase::Intro { elapsed } => {
                self.advance_intro(world, elapsed);
                None
            }
            GamePhase::GameOver { .. } => {
                if self.queue.iter().any(|c| *c == Command::Restart) {
                    self.restart(world, audio);
                } else {
                    self.queue.clear();
                }
                None
            }
            GamePhase::Playing => {
                self.count += 1;
                if self.count < self.divisor {
                    return None;
                }
                self.count = 0;
                Some(self.step(world, audio))
            }
        }
    }

    fn advance_intro(&mut self, world: &mut World, elapsed: u32) {
        let elapsed = elapsed + 1;
        if elapsed >= INTRO_DONE_AT {
            log::info!("Intro done, waiting for a serve");
            world.state.phase = GamePhase::Playing;
            world.state.request_repaint();
            return;
        }

        world.state.phase = GamePhase::Intro { elapsed };
        if hud::countdown(elapsed) != hud::countdown(elapsed - 1) {
            world.state.request_redraw();
        }
    }

    fn step<B: Buzzer>(&mut self, world: &mut World, audio: &mut AudioManager<B>) -> StepOutcome {
        let World {
            scene,
            roles,
            state,
        } = world;

        let outcome = resolve_step(scene, roles, state, &self.tuning);
        if let Some(effect) = outcome.events.iter().rev().find_map(SoundEffect::for_event) {
            audio.play(effect);
        }
        if outcome.needs_redraw() {
            state.request_redraw();
        }

        self.apply_moves(world);

        world.state.scores.debug_check(self.win_score);
        if let Some(winner) = world.state.scores.winner(self.win_score) {
            log::info!(
                "Game over, {winner:?} wins {} - {}",
                world.state.scores.one,
                world.state.scores.two
            );
            world.state.phase = GamePhase::GameOver { winner };
            world.state.bg_color = Color::WHITE;
            world.state.request_repaint();
            audio.play(SoundEffect::Silence);
        }
        outcome
    }

    /// Drain the queue, one move per paddle and direction
    fn apply_moves(&mut self, world: &mut World) {
        let mut seen: Vec<(Player, Direction)> = Vec::with_capacity(4);
        for command in self.queue.drain(..) {
            let Command::MovePaddle { player, dir } = command else {
                continue;
            };
            if seen.contains(&(player, dir)) {
                continue;
            }
            seen.push((player, dir));

            let paddle = world.scene.mover_layer_mut(world.roles.paddle(player));
            if move_allowed(player, dir, paddle.pos_next.x) {
                paddle.pos_next.x += dir.delta();
                world.state.serve_pending = false;
                world.state.request_redraw();
            }
        }
    }

    /// Start a fresh match without the intro
    pub fn restart<B: Buzzer>(&mut self, world: &mut World, audio: &mut AudioManager<B>) {
        log::info!("New match");
        world.reset();
        self.count = 0;
        self.queue.clear();
        audio.play(SoundEffect::Silence);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingBuzzer;
    use glam::IVec2;

    const IDLE: u8 = Switches::RELEASED;

    fn playing() -> (Driver, World, AudioManager<RecordingBuzzer>) {
        let mut world = World::new();
        world.state.phase = GamePhase::Playing;
        (
            Driver::new(&Settings::default()),
            world,
            AudioManager::new(RecordingBuzzer::new(), false),
        )
    }

    fn run(
        driver: &mut Driver,
        world: &mut World,
        audio: &mut AudioManager<RecordingBuzzer>,
        raw: u8,
        ticks: u32,
    ) -> Vec<StepOutcome> {
        (0..ticks)
            .filter_map(|_| driver.tick(world, audio, raw))
            .collect()
    }

    #[test]
    fn test_intro_ignores_input_and_ends_at_200() {
        let mut driver = Driver::new(&Settings::default());
        let mut world = World::new();
        let mut audio = AudioManager::new(RecordingBuzzer::new(), false);
        let s1 = Switches::raw_with(&[Switch::S1]);

        let steps = run(&mut driver, &mut world, &mut audio, s1, INTRO_DONE_AT - 1);
        assert!(steps.is_empty());
        assert_eq!(world.state.phase, GamePhase::Intro { elapsed: 199 });
        assert_eq!(world.scene.mover_layer(world.roles.paddle_one).pos_next, PADDLE_ONE_START);
        assert!(driver.pending().is_empty());

        world.state.repaint_all = false;
        driver.tick(&mut world, &mut audio, IDLE);
        assert_eq!(world.state.phase, GamePhase::Playing);
        assert!(world.state.repaint_all);
    }

    #[test]
    fn test_intro_redraws_on_countdown_change() {
        let mut driver = Driver::new(&Settings::default());
        let mut world = World::new();
        let mut audio = AudioManager::new(RecordingBuzzer::new(), false);
        world.state.redraw_pending = false;

        run(&mut driver, &mut world, &mut audio, IDLE, 10);
        assert!(!world.state.redraw_pending);
        run(&mut driver, &mut world, &mut audio, IDLE, INTRO_COUNT_3_UNTIL - 10);
        assert!(world.state.redraw_pending);
    }

    #[test]
    fn test_resolver_every_nth_tick() {
        let (mut driver, mut world, mut audio) = playing();
        world.state.serve_pending = false;
        assert_eq!(run(&mut driver, &mut world, &mut audio, IDLE, 19).len(), 0);
        let steps = run(&mut driver, &mut world, &mut audio, IDLE, 1);
        assert_eq!(steps.len(), 1);
        assert_eq!(
            world.scene.mover_layer(world.roles.ball).pos_next,
            FIELD_CENTER + IVec2::new(5, 5)
        );
    }

    #[test]
    fn test_serve_held_until_paddle_moves() {
        let (mut driver, mut world, mut audio) = playing();
        run(&mut driver, &mut world, &mut audio, IDLE, 40);
        assert_eq!(world.scene.mover_layer(world.roles.ball).pos_next, FIELD_CENTER);
        assert!(world.state.serve_pending);

        let s2 = Switches::raw_with(&[Switch::S2]);
        run(&mut driver, &mut world, &mut audio, s2, 20);
        assert!(!world.state.serve_pending);
        assert_eq!(
            world.scene.mover_layer(world.roles.paddle_one).pos_next.x,
            PADDLE_ONE_START.x + PADDLE_STEP
        );
        // Ball resumes on the following step
        run(&mut driver, &mut world, &mut audio, IDLE, 20);
        assert_eq!(
            world.scene.mover_layer(world.roles.ball).pos_next,
            FIELD_CENTER + IVec2::new(5, 5)
        );
    }

    #[test]
    fn test_held_switch_moves_once_per_step() {
        let (mut driver, mut world, mut audio) = playing();
        let s3 = Switches::raw_with(&[Switch::S3]);
        run(&mut driver, &mut world, &mut audio, s3, 20);
        assert_eq!(
            world.scene.mover_layer(world.roles.paddle_two).pos_next.x,
            PADDLE_TWO_START.x - PADDLE_STEP
        );
        assert!(driver.pending().is_empty());
    }

    #[test]
    fn test_tap_between_steps_is_kept() {
        let (mut driver, mut world, mut audio) = playing();
        let s4 = Switches::raw_with(&[Switch::S4]);
        driver.tick(&mut world, &mut audio, s4);
        run(&mut driver, &mut world, &mut audio, IDLE, 19);
        assert_eq!(
            world.scene.mover_layer(world.roles.paddle_two).pos_next.x,
            PADDLE_TWO_START.x + PADDLE_STEP
        );
    }

    #[test]
    fn test_paddle_travel_limits() {
        assert!(move_allowed(Player::One, Direction::Left, 27));
        assert!(!move_allowed(Player::One, Direction::Left, 26));
        assert!(move_allowed(Player::Two, Direction::Left, 26));
        assert!(!move_allowed(Player::Two, Direction::Left, 25));
        assert!(move_allowed(Player::One, Direction::Right, 102));
        assert!(!move_allowed(Player::Two, Direction::Right, 103));

        let (mut driver, mut world, mut audio) = playing();
        world.scene.mover_layer_mut(world.roles.paddle_one).pos_next.x = 22;
        let s1 = Switches::raw_with(&[Switch::S1]);
        run(&mut driver, &mut world, &mut audio, s1, 20);
        assert_eq!(world.scene.mover_layer(world.roles.paddle_one).pos_next.x, 22);
        assert!(world.state.serve_pending);
    }

    #[test]
    fn test_switch_bindings_round_trip() {
        for sw in Switch::ALL {
            let (player, dir) = switch_move(sw);
            assert_eq!(move_switch(player, dir), sw);
        }
    }

    #[test]
    fn test_win_enters_game_over() {
        let (mut driver, mut world, mut audio) = playing();
        for _ in 0..4 {
            world.state.scores.award(Player::One);
        }
        world.state.serve_pending = false;
        // Ball about to cross the top goal line, paddle two far away
        world.scene.mover_layer_mut(world.roles.ball).pos_next = IVec2::new(100, 20);
        world.scene.mover_layer_mut(world.roles.paddle_two).pos_next.x = 30;

        let steps = run(&mut driver, &mut world, &mut audio, IDLE, 20);
        assert_eq!(steps[0].goal(), Some(Player::One));
        assert_eq!(
            world.state.phase,
            GamePhase::GameOver {
                winner: Player::One
            }
        );
        assert_eq!(world.state.bg_color, Color::WHITE);
        assert!(world.state.repaint_all);
        assert_eq!(audio.buzzer().current(), 0);
    }

    #[test]
    fn test_win_score_past_one_glyph_stops_at_nine() {
        let settings = Settings {
            win_score: 12,
            ..Default::default()
        };
        let mut driver = Driver::new(&settings);
        let mut world = World::new();
        world.state.phase = GamePhase::Playing;
        let mut audio = AudioManager::new(RecordingBuzzer::new(), false);
        for _ in 0..8 {
            world.state.scores.award(Player::One);
        }
        world.state.serve_pending = false;
        world.scene.mover_layer_mut(world.roles.ball).pos_next = IVec2::new(100, 20);
        world.scene.mover_layer_mut(world.roles.paddle_two).pos_next.x = 30;

        run(&mut driver, &mut world, &mut audio, IDLE, 20);
        assert_eq!(world.state.scores.one, 9);
        assert_eq!(
            world.state.phase,
            GamePhase::GameOver {
                winner: Player::One
            }
        );
        // No more steps once the match is over
        assert!(run(&mut driver, &mut world, &mut audio, IDLE, 40).is_empty());
    }

    #[test]
    fn test_game_over_blocks_then_restarts_on_fresh_press() {
        let (mut driver, mut world, mut audio) = playing();
        world.state.phase = GamePhase::GameOver {
            winner: Player::Two,
        };
        world.state.scores.two = 5;
        let s1 = Switches::raw_with(&[Switch::S1]);

        // A switch held since the last rally does not count
        driver.poller.last = Switches::from_raw(s1);
        let steps = run(&mut driver, &mut world, &mut audio, s1, 40);
        assert!(steps.is_empty());
        assert!(matches!(world.state.phase, GamePhase::GameOver { .. }));
        assert_eq!(world.scene.mover_layer(world.roles.paddle_one).pos_next, PADDLE_ONE_START);

        driver.tick(&mut world, &mut audio, IDLE);
        driver.tick(&mut world, &mut audio, s1);
        assert_eq!(world.state.phase, GamePhase::Playing);
        assert_eq!(world.state.scores.two, 0);
        assert!(world.state.serve_pending);
        assert_eq!(world.state.bg_color, Color::VIOLET);
    }

    #[test]
    fn test_paddle_return_plays_tone() {
        let (mut driver, mut world, mut audio) = playing();
        world.state.serve_pending = false;
        world.scene.mover_layer_mut(world.roles.ball).pos_next = IVec2::new(64, 134);
        run(&mut driver, &mut world, &mut audio, IDLE, 20);
        assert_eq!(audio.buzzer().current(), TONE_PADDLE_ONE);
        assert_eq!(world.state.tone, TONE_PADDLE_ONE);
    }
}
