//! Buzzer feedback
//!
//! The piezo only knows a tone period; 0 silences it.

use crate::consts::{TONE_PADDLE_ONE, TONE_PADDLE_TWO};
use crate::sim::{Player, SimEvent};

/// Tone generator
pub trait Buzzer {
    /// Drive the buzzer with `period`; 0 means silence
    fn set_tone_period(&mut self, period: u16);
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hit a wall
    WallHit,
    /// Ball returned by a paddle
    PaddleHit(Player),
    /// Game start or restart
    Silence,
}

impl SoundEffect {
    pub fn period(self) -> u16 {
        match self {
            SoundEffect::WallHit | SoundEffect::Silence => 0,
            SoundEffect::PaddleHit(Player::One) => TONE_PADDLE_ONE,
            SoundEffect::PaddleHit(Player::Two) => TONE_PADDLE_TWO,
        }
    }

    /// Effect for a simulation event, if it makes a sound
    pub fn for_event(event: &SimEvent) -> Option<Self> {
        match *event {
            SimEvent::FenceBounce { .. } => Some(SoundEffect::WallHit),
            SimEvent::PaddleReturn { player, .. } => Some(SoundEffect::PaddleHit(player)),
            SimEvent::Goal { .. } => None,
        }
    }
}

/// Buzzer front end with a mute switch
pub struct AudioManager<B: Buzzer> {
    buzzer: B,
    muted: bool,
    period: u16,
}

impl<B: Buzzer> AudioManager<B> {
    pub fn new(buzzer: B, muted: bool) -> Self {
        Self {
            buzzer,
            muted,
            period: 0,
        }
    }

    /// Mute/unmute; muting silences immediately
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.buzzer.set_tone_period(0);
        }
    }

    /// Request a period; muted managers keep the buzzer silent
    pub fn set_period(&mut self, period: u16) {
        self.period = period;
        self.buzzer
            .set_tone_period(if self.muted { 0 } else { period });
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        self.set_period(effect.period());
    }

    /// Last requested period, muted or not
    pub fn period(&self) -> u16 {
        self.period
    }

    pub fn buzzer(&self) -> &B {
        &self.buzzer
    }
}

/// Host buzzer that keeps every period it was given
#[derive(Debug, Clone, Default)]
pub struct RecordingBuzzer {
    pub history: Vec<u16>,
}

impl RecordingBuzzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Period currently sounding
    pub fn current(&self) -> u16 {
        self.history.last().copied().unwrap_or(0)
    }
}

impl Buzzer for RecordingBuzzer {
    fn set_tone_period(&mut self, period: u16) {
        self.history.push(period);
    }
}
