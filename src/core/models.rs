use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

/// A cue time in seconds. Ordered with `total_cmp` so timestamps can live in
/// sorted sets despite being floats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub f64);

impl Timestamp {
    pub fn as_secs_f64(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Timestamp {
    fn from(seconds: f64) -> Self {
        Timestamp(seconds)
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Timestamp {}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Timestamp {
    /// H:MM:SS, with milliseconds appended only when the time is fractional.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_millis = (self.0 * 1000.0).round() as u64;
        let hours = total_millis / 3_600_000;
        let minutes = total_millis / 60_000 % 60;
        let seconds = total_millis / 1000 % 60;
        let millis = total_millis % 1000;
        if millis == 0 {
            write!(f, "{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            write!(f, "{}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub identifier: Option<String>, // Optional cue identifier line
    pub start: Timestamp,
    pub end: Timestamp,
    pub settings: Option<String>, // Cue settings trailing the timing line (position, alignment, ...)
    pub text: String,             // Payload lines joined with '\n', markup included
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub styles: Vec<String>, // STYLE block bodies, in file order
    pub captions: Vec<Caption>,
}

impl Track {
    /// Appends a CSS rule as a new STYLE block, keeping any existing blocks.
    pub fn push_style(&mut self, rule: &str) {
        self.styles.push(rule.to_string());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn test_display_whole_seconds() {
        assert_eq!(Timestamp(0.0).to_string(), "0:00:00");
        assert_eq!(Timestamp(12.0).to_string(), "0:00:12");
        assert_eq!(Timestamp(3723.0).to_string(), "1:02:03");
    }

    #[test]
    fn test_display_fractional_seconds() {
        assert_eq!(Timestamp(47.5).to_string(), "0:00:47.500");
        assert_eq!(Timestamp(3600.025).to_string(), "1:00:00.025");
    }

    #[test]
    fn test_ordering_in_sets() {
        let mut set = BTreeSet::new();
        set.insert(Timestamp(47.5));
        set.insert(Timestamp(12.0));
        set.insert(Timestamp(12.0));

        let ordered: Vec<f64> = set.iter().map(|t| t.as_secs_f64()).collect();
        assert_eq!(ordered, vec![12.0, 47.5]);
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Timestamp(12.5)).unwrap();
        assert_eq!(json, "12.5");

        let back: Timestamp = serde_json::from_str("12.5").unwrap();
        assert_eq!(back, Timestamp(12.5));
    }
}
