//! Clock-face text
//!
//! Formatting follows the en-US two-digit conventions: 24-hour faces run
//! `00`–`23`, 12-hour faces run `01`–`12` with an AM/PM marker.

use chrono::{NaiveDateTime, Timelike};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn label(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }

    /// Single letter drawn on the icon (`A` or `P`)
    pub fn initial(self) -> char {
        match self {
            Self::Am => 'A',
            Self::Pm => 'P',
        }
    }
}

/// Formatted text for one clock reading
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockFace {
    pub hour: String,
    pub minute: String,
    /// Present only on 12-hour faces
    pub marker: Option<Meridiem>,
}

impl ClockFace {
    pub fn format<T: Timelike>(time: &T, hour12: bool) -> Self {
        let hour = time.hour();
        let (display_hour, marker) = if hour12 {
            let marker = if hour < 12 { Meridiem::Am } else { Meridiem::Pm };
            let h = match hour % 12 {
                0 => 12,
                h => h,
            };
            (h, Some(marker))
        } else {
            (hour, None)
        };

        Self {
            hour: format!("{display_hour:02}"),
            minute: format!("{:02}", time.minute()),
            marker,
        }
    }
}

impl fmt::Display for ClockFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.hour, self.minute)?;
        if let Some(marker) = self.marker {
            write!(f, " {}", marker.label())?;
        }
        Ok(())
    }
}

/// Icon title for a reading: the ISO calendar date
pub fn title_for(now: &NaiveDateTime) -> String {
    now.format("%Y-%m-%d").to_string()
}
