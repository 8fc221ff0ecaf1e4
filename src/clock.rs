use anyhow::{anyhow, Result};
use chrono::Utc;
use chrono_tz::Tz;

use crate::domain::Timestamp;

/// Source of submission timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Current time in a fixed reference timezone
pub struct SystemClock {
    timezone: Tz,
}

impl SystemClock {
    pub fn new(timezone: &str) -> Result<Self> {
        let timezone: Tz = timezone
            .parse()
            .map_err(|e| anyhow!("Unknown timezone {timezone:?}: {e}"))?;
        Ok(Self { timezone })
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now().with_timezone(&self.timezone).fixed_offset()
    }
}

/// Always returns the same instant
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
