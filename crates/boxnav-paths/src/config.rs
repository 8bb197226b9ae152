/// Which search runs over the box graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Algorithm {
    /// Two best-first expansions, one from each end, sharing a frontier.
    #[default]
    Bidirectional,
    /// Single-direction A* from the source box.
    Astar,
}

/// When the bidirectional search stops and joins its two halves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum MeetRule {
    /// Join at the first popped box the other direction has already
    /// reached. Fast, but the result is not guaranteed to be the cheapest.
    #[default]
    FirstMeeting,
    /// Keep the cheapest connection seen so far and stop once no frontier
    /// entry could beat it. The result costs the same as an A* path.
    Optimal,
}

/// Search settings for a [`PathFinder`](crate::PathFinder).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    /// Ignored by [`Algorithm::Astar`].
    pub meet: MeetRule,
}

impl SearchConfig {
    /// Bidirectional search with the optimal stopping rule.
    pub const OPTIMAL: Self = Self {
        algorithm: Algorithm::Bidirectional,
        meet: MeetRule::Optimal,
    };

    /// Single-direction A*.
    pub const ASTAR: Self = Self {
        algorithm: Algorithm::Astar,
        meet: MeetRule::FirstMeeting,
    };
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let json = serde_json::to_string(&SearchConfig::OPTIMAL).unwrap();
        assert_eq!(json, r#"{"algorithm":"bidirectional","meet":"optimal"}"#);
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SearchConfig::OPTIMAL);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let cfg: SearchConfig = serde_json::from_str(r#"{"algorithm":"astar"}"#).unwrap();
        assert_eq!(cfg.algorithm, Algorithm::Astar);
        assert_eq!(cfg.meet, MeetRule::FirstMeeting);
    }
}
