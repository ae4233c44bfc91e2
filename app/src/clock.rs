use chrono::{Local, NaiveTime, Utc};
use chrono_tz::Tz;
use gui::TimeSource;

/// Wall clock in a fixed timezone, or the system's local zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZonedClock {
    timezone: Option<Tz>,
}

impl ZonedClock {
    pub fn new(timezone: Option<Tz>) -> Self {
        Self { timezone }
    }
}

impl TimeSource for ZonedClock {
    fn now(&self) -> NaiveTime {
        match self.timezone {
            Some(timezone) => Utc::now().with_timezone(&timezone).time(),
            None => Local::now().time(),
        }
    }
}
