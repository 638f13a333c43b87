/// Animation state machine driving the fan's two degrees of freedom
use crate::assembly::FanAssembly;

/// Per-tick spin increment right after power-on, before any speed button
/// has been pressed. The speed buttons overwrite it with the Low/High
/// values, which are deliberately not the same number.
const POWER_ON_INCREMENT: f32 = 0.15;

/// Ticks per radian of oscillation phase
const OSCILLATION_PERIOD_DIVISOR: f64 = 200.0;

/// Selectable motor speeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanSpeed {
    Low,
    High,
}

impl FanSpeed {
    /// Spin-axis rotation applied per tick, in radians
    pub fn increment(self) -> f32 {
        match self {
            FanSpeed::Low => 0.2,
            FanSpeed::High => 0.4,
        }
    }
}

/// Owns the three state fields and the per-frame update rule. Input
/// handlers only ever call the event methods; `tick` is the sole writer of
/// scene transforms.
///
/// Every event is a total function over the state space, so there are no
/// error conditions anywhere in this type.
#[derive(Debug)]
pub struct FanController {
    power: bool,
    oscillation: bool,
    increment: f32,
    tick_count: u64,
}

impl FanController {
    pub fn new() -> Self {
        Self {
            power: false,
            oscillation: false,
            increment: POWER_ON_INCREMENT,
            tick_count: 0,
        }
    }

    /// The power button. Powering on re-enables oscillation and re-arms the
    /// power-on spin increment, overriding any earlier speed or oscillation
    /// selection; powering off also clears the oscillation flag.
    pub fn press_power(&mut self) {
        self.increment = POWER_ON_INCREMENT;
        if self.power {
            self.power = false;
            self.oscillation = false;
        } else {
            self.power = true;
            self.oscillation = true;
        }
    }

    /// Speed buttons are accepted at any time, including while powered off
    pub fn select_speed(&mut self, speed: FanSpeed) {
        self.increment = speed.increment();
    }

    /// Oscillation button, also accepted at any time. The flag only has a
    /// visible effect while the power is on.
    pub fn toggle_oscillation(&mut self) {
        self.oscillation = !self.oscillation;
    }

    pub fn is_powered(&self) -> bool {
        self.power
    }

    pub fn is_oscillating(&self) -> bool {
        self.oscillation
    }

    /// Current numeric spin increment in radians per tick
    pub fn spin_increment(&self) -> f32 {
        self.increment
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// One deterministic update, invoked once per rendered frame whether or
    /// not the motor is running. While powered off nothing moves and the
    /// last-applied rotations persist.
    pub fn tick(&mut self, fan: &mut FanAssembly) {
        if self.power {
            fan.scene
                .node_mut(fan.wing)
                .rotation
                .rotate(0.0, 0.0, -self.increment);
        }
        if self.power && self.oscillation {
            self.tick_count += 1;
            // Phase is computed in f64 so the counter can grow without
            // bound before precision loss would show up as a visible step.
            let yaw = (self.tick_count as f64 / OSCILLATION_PERIOD_DIVISOR).sin();
            fan.scene.node_mut(fan.head).rotation.y = yaw as f32;
        }
    }
}

impl Default for FanController {
    fn default() -> Self {
        Self::new()
    }
}
