use chrono::{Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    /// Before noon is morning, before 18:00 afternoon, otherwise evening.
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            DayPeriod::Morning
        } else if hour < 18 {
            DayPeriod::Afternoon
        } else {
            DayPeriod::Evening
        }
    }

    pub fn greeting(self) -> &'static str {
        match self {
            DayPeriod::Morning => "🌅 Good morning",
            DayPeriod::Afternoon => "🌤️ Good afternoon",
            DayPeriod::Evening => "🌙 Good evening",
        }
    }
}

pub fn greeting_for_hour(hour: u32) -> &'static str {
    DayPeriod::from_hour(hour).greeting()
}

/// Source of the current hour of day (0-23).
pub trait Clock: Send + Sync {
    fn hour(&self) -> u32;
    fn timezone(&self) -> Tz;
}

/// Wall clock in a fixed IANA time zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Clock for SystemClock {
    fn hour(&self) -> u32 {
        Utc::now().with_timezone(&self.tz).hour()
    }

    fn timezone(&self) -> Tz {
        self.tz
    }
}

/// Always reports the same hour. For tests and previews.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub hour: u32,
    pub tz: Tz,
}

impl Clock for FixedClock {
    fn hour(&self) -> u32 {
        self.hour
    }

    fn timezone(&self) -> Tz {
        self.tz
    }
}
