//! Platform abstraction layer
//!
//! Handles the hardware seams the core consumes:
//! - Switch input (active-low bitmask)
//! - Masking the periodic interrupt around critical sections
//! - Host stand-ins for both, including a demo autopilot

pub mod autopilot;

use std::collections::VecDeque;

pub use autopilot::Autopilot;

/// One of the four push switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Switch {
    S1,
    S2,
    S3,
    S4,
}

impl Switch {
    pub const ALL: [Switch; 4] = [Switch::S1, Switch::S2, Switch::S3, Switch::S4];

    /// Bit in the switch register
    pub const fn bit(self) -> u8 {
        match self {
            Switch::S1 => 1 << 0,
            Switch::S2 => 1 << 1,
            Switch::S3 => 1 << 2,
            Switch::S4 => 1 << 3,
        }
    }
}

/// A sample of the switch register; a cleared bit means pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switches(u8);

impl Switches {
    /// Register value with nothing pressed
    pub const RELEASED: u8 = 0x0f;

    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Raw register value with the given switches held down
    pub fn raw_with(pressed: &[Switch]) -> u8 {
        pressed
            .iter()
            .fold(Self::RELEASED, |raw, sw| raw & !sw.bit())
    }

    pub fn is_down(self, sw: Switch) -> bool {
        self.0 & sw.bit() == 0
    }

    /// Some switch is down now that was up in `previous`
    pub fn pressed_since(self, previous: Switches) -> bool {
        Switch::ALL
            .iter()
            .any(|&sw| self.is_down(sw) && !previous.is_down(sw))
    }

    /// Switches currently down, in S1..S4 order
    pub fn down(self) -> impl Iterator<Item = Switch> {
        Switch::ALL.into_iter().filter(move |&sw| self.is_down(sw))
    }
}

impl Default for Switches {
    fn default() -> Self {
        Self(Self::RELEASED)
    }
}

/// Something that can be sampled for the switch register
pub trait SwitchSource {
    fn read_switches(&mut self) -> u8;
}

/// Replays a fixed sequence of samples, then reports `idle` forever
#[derive(Debug, Clone)]
pub struct ScriptedSwitches {
    samples: VecDeque<u8>,
    idle: u8,
}

impl ScriptedSwitches {
    pub fn new(samples: impl IntoIterator<Item = u8>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            idle: Switches::RELEASED,
        }
    }

    /// Nothing pressed, ever
    pub fn released() -> Self {
        Self::new([])
    }

    /// Hold `pressed` for `ticks` samples
    pub fn hold(pressed: &[Switch], ticks: usize) -> Self {
        Self::new(std::iter::repeat_n(Switches::raw_with(pressed), ticks))
    }
}

impl SwitchSource for ScriptedSwitches {
    fn read_switches(&mut self) -> u8 {
        self.samples.pop_front().unwrap_or(self.idle)
    }
}

/// Masks and unmasks the periodic interrupt
pub trait InterruptMask {
    fn mask(&mut self);
    fn unmask(&mut self);
}

/// Run `f` with the periodic interrupt masked
pub fn without_interrupts<M, R>(mask: &mut M, f: impl FnOnce() -> R) -> R
where
    M: InterruptMask + ?Sized,
{
    mask.mask();
    let result = f();
    mask.unmask();
    result
}

/// Hosts have no interrupt to mask
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMask;

impl InterruptMask for NoopMask {
    fn mask(&mut self) {}
    fn unmask(&mut self) {}
}

/// Mask that keeps count of critical sections
#[derive(Debug, Clone, Copy, Default)]
pub struct CountingMask {
    pub masked: bool,
    pub sections: u32,
}

impl InterruptMask for CountingMask {
    fn mask(&mut self) {
        debug_assert!(!self.masked, "critical sections do not nest");
        self.masked = true;
    }

    fn unmask(&mut self) {
        debug_assert!(self.masked, "unmask without mask");
        self.masked = false;
        self.sections += 1;
    }
}
