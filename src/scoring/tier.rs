use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter tier derived from a percentage score.
///
/// Thresholds are fixed policy, not configuration:
/// `>=80` A, `>=60` B, `>=40` C, below that D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    A,
    B,
    C,
    D,
}

impl Tier {
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= 80 {
            Tier::A
        } else if percentage >= 60 {
            Tier::B
        } else if percentage >= 40 {
            Tier::C
        } else {
            Tier::D
        }
    }

    /// All tiers, best first (for summary rendering)
    pub fn all() -> [Tier; 4] {
        [Tier::A, Tier::B, Tier::C, Tier::D]
    }

    pub fn letter(&self) -> &'static str {
        match self {
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tier::A => "strong fit",
            Tier::B => "good fit",
            Tier::C => "partial fit",
            Tier::D => "poor fit",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(Tier::from_percentage(100), Tier::A);
        assert_eq!(Tier::from_percentage(80), Tier::A);
        assert_eq!(Tier::from_percentage(79), Tier::B);
        assert_eq!(Tier::from_percentage(60), Tier::B);
        assert_eq!(Tier::from_percentage(59), Tier::C);
        assert_eq!(Tier::from_percentage(40), Tier::C);
        assert_eq!(Tier::from_percentage(39), Tier::D);
        assert_eq!(Tier::from_percentage(0), Tier::D);
    }

    #[test]
    fn test_tier_monotonic() {
        // Higher percentage never yields a worse tier
        let mut previous = Tier::D;
        for p in 0..=100u8 {
            let tier = Tier::from_percentage(p);
            assert!(tier <= previous, "tier regressed at {}%", p);
            previous = tier;
        }
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(Tier::A.to_string(), "A");
        assert_eq!(Tier::D.to_string(), "D");
    }
}
