use std::fmt;
use std::str::FromStr;

use chrono::Timelike;

/// A decimal digit, `0..=9`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digit(u8);

impl Digit {
    pub fn new(d: u8) -> Option<Self> {
        (d <= 9).then_some(Self(d))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Hours and minutes of a 24-hour clock, as the four digits shown on the face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HhMm {
    hour: u8,
    minute: u8,
}

impl HhMm {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Parse four ASCII digits, e.g. `"0930"`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let bytes = s.as_bytes();
        if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(format!("time must be four digits HHMM, got \"{s}\""));
        }
        let d = |i: usize| bytes[i] - b'0';
        Self::new(d(0) * 10 + d(1), d(2) * 10 + d(3))
            .ok_or_else(|| format!("time \"{s}\" is not a valid 24-hour time"))
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn digits(self) -> [Digit; 4] {
        [
            Digit(self.hour / 10),
            Digit(self.hour % 10),
            Digit(self.minute / 10),
            Digit(self.minute % 10),
        ]
    }

    pub fn from_time(t: &impl Timelike) -> Self {
        // chrono keeps hour < 24 and minute < 60
        Self {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
        }
    }
}

impl fmt::Display for HhMm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.hour, self.minute)
    }
}

impl FromStr for HhMm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Wall-clock time shown on the clock face.
pub trait ClockSource {
    fn now(&self) -> HhMm;
}

/// Local wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> HhMm {
        HhMm::from_time(&chrono::Local::now())
    }
}

/// A clock stuck at one time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub HhMm);

impl ClockSource for FixedClock {
    fn now(&self) -> HhMm {
        self.0
    }
}
