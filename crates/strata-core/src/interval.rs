//! Half-open time intervals over epoch millis.

use std::fmt;

use serde::{Deserialize, Serialize};

/// `[start, end)` over epoch millis. `ETERNITY` covers every representable
/// instant and is the no-op restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    pub const ETERNITY: Interval = Interval {
        start: i64::MIN,
        end: i64::MAX,
    };

    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, t: i64) -> bool {
        t >= self.start && t < self.end
    }

    pub fn is_eternity(&self) -> bool {
        *self == Self::ETERNITY
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Intersection of two intervals; may be empty.
    pub fn overlap(&self, other: &Interval) -> Interval {
        Interval {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_open_contains() {
        let iv = Interval::new(10, 20);
        assert!(iv.contains(10));
        assert!(iv.contains(19));
        assert!(!iv.contains(20));
        assert!(!iv.contains(9));
    }

    #[test]
    fn eternity_contains_everything() {
        assert!(Interval::ETERNITY.contains(i64::MIN));
        assert!(Interval::ETERNITY.contains(0));
        assert!(Interval::ETERNITY.is_eternity());
        assert!(!Interval::new(0, 1).is_eternity());
    }

    #[test]
    fn serializes_as_start_and_end() {
        let json = serde_json::to_value(Interval::new(1, 5)).unwrap();
        assert_eq!(json["start"], 1);
        assert_eq!(json["end"], 5);
    }

    #[test]
    fn overlap_may_be_empty() {
        let a = Interval::new(0, 10);
        let b = Interval::new(20, 30);
        assert!(a.overlap(&b).is_empty());
        assert_eq!(a.overlap(&Interval::new(5, 30)), Interval::new(5, 10));
    }
}
