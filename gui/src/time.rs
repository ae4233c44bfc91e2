use chrono::{Local, NaiveTime, Timelike};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn as_str(self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

/// One read of the wall clock, taken at the start of a paint.
///
/// `hour` is on the 12-hour dial, so both midnight and noon are `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSample {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub am_pm: Meridiem,
}

impl TimeSample {
    pub fn new(hour: u32, minute: u32, second: u32, am_pm: Meridiem) -> Self {
        Self {
            hour: hour % 12,
            minute,
            second,
            am_pm,
        }
    }

    /// Digital face text, e.g. `09:05:03AM`.
    pub fn digital(&self) -> String {
        self.to_string()
    }
}

impl From<NaiveTime> for TimeSample {
    fn from(time: NaiveTime) -> Self {
        let am_pm = if time.hour() < 12 {
            Meridiem::Am
        } else {
            Meridiem::Pm
        };

        Self::new(time.hour(), time.minute(), time.second(), am_pm)
    }
}

impl fmt::Display for TimeSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}{}",
            self.hour,
            self.minute,
            self.second,
            self.am_pm.as_str()
        )
    }
}

pub trait TimeSource {
    fn now(&self) -> NaiveTime;

    fn sample(&self) -> TimeSample {
        TimeSample::from(self.now())
    }
}

/// Reads the host's local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl TimeSource for LocalClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Always reports the same time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

impl FixedClock {
    pub fn hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(FixedClock)
    }
}

impl TimeSource for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}
