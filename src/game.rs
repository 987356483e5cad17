//! Top-level game: owns the world, the driver and the buzzer
//!
//! `tick` is the interrupt body and `frame` is the main-loop body. On the
//! firmware they run in different contexts; here `&mut self` keeps them from
//! ever overlapping.

use crate::audio::{AudioManager, Buzzer};
use crate::driver::Driver;
use crate::platform::{InterruptMask, SwitchSource, without_interrupts};
use crate::renderer::{Display, composite_movers, draw_all, hud};
use crate::settings::Settings;
use crate::sim::{GamePhase, StepOutcome, World};

pub struct Game<B: Buzzer> {
    world: World,
    driver: Driver,
    audio: AudioManager<B>,
}

impl<B: Buzzer> Game<B> {
    pub fn new(settings: Settings, buzzer: B) -> Self {
        let settings = settings.sanitized();
        let mut audio = AudioManager::new(buzzer, settings.muted);
        audio.set_period(0);
        log::info!(
            "LCD Pong: first to {}, resolver every {} ticks at {} Hz",
            settings.win_score,
            settings.resolver_divisor,
            settings.tick_hz
        );
        Self {
            world: World::new(),
            driver: Driver::new(&settings),
            audio,
        }
    }

    /// One periodic tick: sample the switches and run the driver
    pub fn tick(&mut self, switches: &mut impl SwitchSource) -> Option<StepOutcome> {
        let raw = switches.read_switches();
        self.driver.tick(&mut self.world, &mut self.audio, raw)
    }

    /// Main-loop body. Returns `false` when there was nothing to draw (the
    /// firmware sleeps until the next interrupt then).
    pub fn frame(&mut self, display: &mut impl Display, mask: &mut impl InterruptMask) -> bool {
        let World {
            scene,
            roles,
            state,
        } = &mut self.world;
        if !state.redraw_pending {
            return false;
        }
        state.redraw_pending = false;
        let bg = state.bg_color;

        if std::mem::take(&mut state.repaint_all) {
            without_interrupts(mask, || {
                scene.swap_positions(&roles.animated);
                scene.settle();
            });
            draw_all(scene, bg, display);
        } else if state.phase == GamePhase::Playing {
            composite_movers(scene, &roles.animated, bg, display, mask);
        }

        match state.phase {
            GamePhase::Intro { elapsed } => hud::draw_intro(elapsed, display),
            GamePhase::GameOver { winner } => hud::draw_game_over(winner, display),
            GamePhase::Playing => {}
        }
        hud::draw_scoreboard(&state.scores, display);
        true
    }

    /// Start a new match right away, skipping the intro
    pub fn reset_game(&mut self) {
        self.driver.restart(&mut self.world, &mut self.audio);
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.world.state.phase
    }

    pub fn audio(&self) -> &AudioManager<B> {
        &self.audio
    }

    /// Mute or unmute the buzzer
    pub fn set_muted(&mut self, muted: bool) {
        self.audio.set_muted(muted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingBuzzer;
    use crate::consts::*;
    use crate::platform::{CountingMask, ScriptedSwitches, Switch, Switches};
    use crate::renderer::{Color, FrameBuffer};
    use crate::sim::Player;
    use glam::IVec2;

    fn game() -> Game<RecordingBuzzer> {
        Game::new(Settings::default(), RecordingBuzzer::new())
    }

    fn panel() -> FrameBuffer {
        FrameBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    /// Run `ticks` ticks, drawing after each like the main loop would
    fn run(
        game: &mut Game<RecordingBuzzer>,
        input: &mut ScriptedSwitches,
        fb: &mut FrameBuffer,
        ticks: u32,
    ) {
        let mut mask = CountingMask::default();
        for _ in 0..ticks {
            game.tick(input);
            game.frame(fb, &mut mask);
        }
    }

    fn finish_intro(game: &mut Game<RecordingBuzzer>, fb: &mut FrameBuffer) {
        run(game, &mut ScriptedSwitches::released(), fb, INTRO_DONE_AT);
    }

    #[test]
    fn test_intro_screen_then_playfield() {
        let mut g = game();
        let mut fb = panel();
        let mut mask = CountingMask::default();
        assert!(g.frame(&mut fb, &mut mask));
        assert_eq!(fb.text_at(IVec2::new(14, 30)), Some("Welcome to Pong"));
        assert_eq!(fb.text_at(IVec2::new(62, 110)), Some("3"));
        assert_eq!(fb.text_at(IVec2::new(3, 152)), Some("Player1:"));
        // Nothing changed since
        assert!(!g.frame(&mut fb, &mut mask));

        finish_intro(&mut g, &mut fb);
        assert_eq!(g.phase(), GamePhase::Playing);
        assert_eq!(fb.text_at(IVec2::new(14, 30)), None);
        assert_eq!(fb.get(PADDLE_ONE_START), Some(Color::WHITE));
        assert_eq!(fb.get(FIELD_CENTER), Some(Color::WHITE));
        assert_eq!(fb.get(IVec2::new(30, 40)), Some(Color::VIOLET));
    }

    #[test]
    fn test_ball_waits_for_serve() {
        let mut g = game();
        let mut fb = panel();
        finish_intro(&mut g, &mut fb);

        run(&mut g, &mut ScriptedSwitches::released(), &mut fb, 60);
        let ball = g.world().roles.ball;
        assert_eq!(g.world().scene.mover_layer(ball).pos, FIELD_CENTER);

        let mut serve = ScriptedSwitches::hold(&[Switch::S1], 20);
        run(&mut g, &mut serve, &mut fb, 40);
        let paddle = g.world().roles.paddle_one;
        assert_eq!(
            g.world().scene.mover_layer(paddle).pos.x,
            PADDLE_ONE_START.x - PADDLE_STEP
        );
        assert_eq!(g.world().scene.mover_layer(ball).pos, FIELD_CENTER + IVec2::new(5, 5));
        assert_eq!(fb.get(FIELD_CENTER + IVec2::new(5, 5)), Some(Color::WHITE));
    }

    #[test]
    fn test_missed_ball_scores_and_recenters() {
        let mut g = game();
        let mut fb = panel();
        finish_intro(&mut g, &mut fb);
        // Paddle one steps left twice, then stays out of the ball's way
        let mut input = ScriptedSwitches::hold(&[Switch::S1], 40);
        let mut steps = 0;
        let mut goal = None;
        while goal.is_none() && steps < 100 {
            if let Some(outcome) = g.tick(&mut input) {
                steps += 1;
                goal = outcome.goal();
            }
            g.frame(&mut fb, &mut CountingMask::default());
        }
        assert_eq!(goal, Some(Player::Two));
        assert_eq!(g.world().state.scores.two, 1);
        assert_eq!(fb.text_at(IVec2::new(120, 152)), Some("1"));
        let ball = g.world().roles.ball;
        assert_eq!(g.world().scene.mover_layer(ball).pos, FIELD_CENTER);
        assert_eq!(g.world().scene.mover(ball).velocity.x, RESTART_SPEED);
        assert!(g.world().state.serve_pending);
        let paddle = g.world().roles.paddle_one;
        assert_eq!(g.world().scene.mover_layer(paddle).color, Color::RED);
    }

    #[test]
    fn test_game_over_banner_and_restart() {
        let mut g = game();
        let mut fb = panel();
        finish_intro(&mut g, &mut fb);
        for _ in 0..5 {
            g.world.state.scores.award(Player::One);
        }
        g.world.state.phase = GamePhase::GameOver {
            winner: Player::One,
        };
        g.world.state.bg_color = Color::WHITE;
        g.world.state.request_repaint();
        let mut mask = CountingMask::default();
        assert!(g.frame(&mut fb, &mut mask));
        assert_eq!(fb.text_at(IVec2::new(64, 100)), Some("Player1!"));
        assert_eq!(fb.get(IVec2::new(30, 40)), Some(Color::WHITE));

        let mut input = ScriptedSwitches::new([
            Switches::RELEASED,
            Switches::raw_with(&[Switch::S4]),
        ]);
        run(&mut g, &mut input, &mut fb, 2);
        assert_eq!(g.phase(), GamePhase::Playing);
        assert_eq!(g.world().state.scores.one, 0);
        assert_eq!(fb.get(IVec2::new(30, 40)), Some(Color::VIOLET));
        assert_eq!(fb.text_at(IVec2::new(52, 152)), Some("0"));
    }

    #[test]
    fn test_out_of_range_win_score_is_clamped() {
        let settings = Settings {
            win_score: 12,
            ..Default::default()
        };
        let mut g = Game::new(settings, RecordingBuzzer::new());
        let mut fb = panel();
        finish_intro(&mut g, &mut fb);
        for _ in 0..8 {
            g.world.state.scores.award(Player::One);
        }
        g.world.state.serve_pending = false;
        let (ball, paddle_two) = (g.world.roles.ball, g.world.roles.paddle_two);
        g.world.scene.mover_layer_mut(ball).pos_next = IVec2::new(100, 20);
        g.world.scene.mover_layer_mut(paddle_two).pos_next.x = 30;

        run(&mut g, &mut ScriptedSwitches::released(), &mut fb, 20);
        assert_eq!(
            g.phase(),
            GamePhase::GameOver {
                winner: Player::One
            }
        );
        assert_eq!(g.world().state.scores.one_char, '9');
        assert_eq!(fb.text_at(IVec2::new(52, 152)), Some("9"));
    }

    #[test]
    fn test_reset_game_skips_intro() {
        let mut g = game();
        g.reset_game();
        assert_eq!(g.phase(), GamePhase::Playing);
        assert!(g.world().state.serve_pending);
        assert_eq!(g.audio().buzzer().current(), 0);
    }

    #[test]
    fn test_frame_is_idempotent_without_changes() {
        let mut g = game();
        let mut fb = panel();
        finish_intro(&mut g, &mut fb);
        let before = fb.clone();
        g.world.state.request_redraw();
        assert!(g.frame(&mut fb, &mut CountingMask::default()));
        assert_eq!(before.pixels(), fb.pixels());
    }

    #[test]
    fn test_muted_buzzer_stays_silent() {
        let mut g = game();
        g.set_muted(true);
        let mut fb = panel();
        finish_intro(&mut g, &mut fb);
        g.world.state.serve_pending = false;
        let ball = g.world.roles.ball;
        g.world.scene.mover_layer_mut(ball).pos_next = IVec2::new(64, 134);
        run(&mut g, &mut ScriptedSwitches::released(), &mut fb, 20);
        assert_eq!(g.audio().period(), TONE_PADDLE_ONE);
        assert_eq!(g.audio().buzzer().current(), 0);
    }
}
