use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

/// Source of "now" for the engine.
///
/// Seasonal tagging, next-watering dates and recommendation expiry are the only
/// wall-clock reads in the engine; everything else is a pure function of its inputs.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    fn month(&self) -> u32 {
        self.today().month()
    }
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a single instant, for reproducible runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: NaiveDateTime,
}

impl FixedClock {
    pub fn new(instant: NaiveDateTime) -> Self {
        Self { instant }
    }

    /// Pin the clock to midnight of `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            instant: date.and_time(chrono::NaiveTime::MIN),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.instant
    }
}

/// Season bucket for a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Fall,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
