//! Pulse-width servo control over an embedded-hal PWM channel.
//!
//! 50 Hz frame. The usable pulse window on the tested SG90-class servo
//! is roughly 780-2250 us end to end; requests outside it are clamped
//! rather than rejected so a sweep can just walk the full range.

use embedded_hal::pwm::SetDutyCycle;

pub const FRAME_HZ: u32 = 50;
pub const FRAME_US: u32 = 1_000_000 / FRAME_HZ;

pub const MIN_PULSE_US: u32 = 780;
pub const MAX_PULSE_US: u32 = 2_250;

pub struct Servo<P> {
    pwm: P,
}

impl<P: SetDutyCycle> Servo<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm }
    }

    /// Drive a pulse of `us` microseconds per frame, clamped to the
    /// servo's usable window.
    pub fn set_pulse_us(&mut self, us: u32) -> Result<(), P::Error> {
        let us = us.clamp(MIN_PULSE_US, MAX_PULSE_US);
        let duty = duty_for_pulse(us, self.pwm.max_duty_cycle());
        self.pwm.set_duty_cycle(duty)
    }

    /// 0 degrees maps to the minimum pulse, 180 to the maximum.
    pub fn set_angle(&mut self, degrees: u16) -> Result<(), P::Error> {
        self.set_pulse_us(pulse_for_angle(degrees))
    }

    pub fn release(self) -> P {
        self.pwm
    }
}

pub const fn pulse_for_angle(degrees: u16) -> u32 {
    let degrees = if degrees > 180 { 180 } else { degrees } as u32;
    MIN_PULSE_US + degrees * (MAX_PULSE_US - MIN_PULSE_US) / 180
}

// max_duty * us stays well under u32::MAX for any 16-bit duty range
pub const fn duty_for_pulse(us: u32, max_duty: u16) -> u16 {
    (us * max_duty as u32 / FRAME_US) as u16
}
