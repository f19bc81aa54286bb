//! Wall-clock samples and the sources that produce them.

use std::fmt;

use chrono::{Local, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub const fn as_str(self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reading of a 12-hour clock.
///
/// `hour` is the 0-11 field: noon and midnight read as `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSample {
    hour: u8,
    minute: u8,
    second: u8,
    meridiem: Meridiem,
}

impl TimeSample {
    /// Out-of-range fields wrap around (`hour % 12`, `minute % 60`, ...).
    pub const fn new(hour: u8, minute: u8, second: u8, meridiem: Meridiem) -> Self {
        Self {
            hour: hour % 12,
            minute: minute % 60,
            second: second % 60,
            meridiem,
        }
    }

    /// Converts a 24-hour reading.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        let (pm, hour12) = time.hour12();
        // chrono reports 1-12; the face works with 0-11.
        let hour = (hour12 % 12) as u8;
        let meridiem = if pm { Meridiem::Pm } else { Meridiem::Am };
        // Leap seconds surface as second 59 with extra nanoseconds, so this
        // stays in range.
        Self::new(hour, time.minute() as u8, time.second() as u8, meridiem)
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    pub const fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    /// Hour hand angle in degrees, clockwise from twelve.
    pub fn hour_angle(&self) -> f32 {
        (self.hour as f32 + self.minute as f32 / 60.0) * 360.0 / 12.0
    }

    /// Minute hand angle in degrees, clockwise from twelve.
    pub fn minute_angle(&self) -> f32 {
        (self.minute as f32 + self.second as f32 / 60.0) * 360.0 / 60.0
    }

    /// Second hand angle in whole degrees; the hand jumps once per second.
    pub fn second_angle(&self) -> i32 {
        self.second as i32 * 360 / 60
    }

    /// `HH:MM:SS` part of the digital readout.
    pub fn digits(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Digital readout, e.g. `01:02:03AM`.
impl fmt::Display for TimeSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.digits(), self.meridiem)
    }
}

/// Anything that can tell the current local time.
pub trait TimeSource {
    fn now(&self) -> TimeSample;
}

/// Local wall clock of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub const fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemClock {
    fn now(&self) -> TimeSample {
        TimeSample::from_time(&Local::now())
    }
}

/// A clock that is stuck at one reading.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub TimeSample);

impl TimeSource for FixedClock {
    fn now(&self) -> TimeSample {
        self.0
    }
}

impl<S: TimeSource + ?Sized> TimeSource for &S {
    fn now(&self) -> TimeSample {
        (**self).now()
    }
}
