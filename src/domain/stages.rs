use std::fmt;

use serde::{Deserialize, Serialize};

/// Tournament round reached by a player, from group stage up to champion.
///
/// Labels outside the fixed vocabulary are preserved verbatim in `Other`
/// and rank below every known stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Stage {
    GroupStage,
    RoundOf128,
    RoundOf64,
    RoundOf32,
    RoundOf16,
    QuarterFinal,
    SemiFinal,
    Final,
    Champion,
    Other(String),
}

// Ordered from lowest to highest round: (label, points).
const STAGE_TABLE: [(&str, u32); 9] = [
    ("Fase de grupos", 2),
    ("64vos de final", 2),
    ("32vos de final", 4),
    ("16vos de final", 4),
    ("8vos de final", 8),
    ("4tos de final", 10),
    ("Semifinal", 20),
    ("Final", 40),
    ("Campeón", 50),
];

const KNOWN_STAGES: [Stage; 9] = [
    Stage::GroupStage,
    Stage::RoundOf128,
    Stage::RoundOf64,
    Stage::RoundOf32,
    Stage::RoundOf16,
    Stage::QuarterFinal,
    Stage::SemiFinal,
    Stage::Final,
    Stage::Champion,
];

impl Stage {
    pub fn parse(label: &str) -> Self {
        match table_position(label) {
            Some(idx) => KNOWN_STAGES[idx].clone(),
            None => Stage::Other(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self.position() {
            Some(idx) => STAGE_TABLE[idx].0,
            None => match self {
                Stage::Other(label) => label,
                _ => "",
            },
        }
    }

    /// Position in the total order; 0 for unknown labels, 1 for group stage, 9 for champion.
    pub fn rank(&self) -> u32 {
        self.position().map_or(0, |idx| idx as u32 + 1)
    }

    pub fn points(&self) -> u32 {
        self.position().map_or(0, |idx| STAGE_TABLE[idx].1)
    }

    pub fn is_known(&self) -> bool {
        self.position().is_some()
    }

    fn position(&self) -> Option<usize> {
        match self {
            Stage::GroupStage => Some(0),
            Stage::RoundOf128 => Some(1),
            Stage::RoundOf64 => Some(2),
            Stage::RoundOf32 => Some(3),
            Stage::RoundOf16 => Some(4),
            Stage::QuarterFinal => Some(5),
            Stage::SemiFinal => Some(6),
            Stage::Final => Some(7),
            Stage::Champion => Some(8),
            Stage::Other(_) => None,
        }
    }
}

fn table_position(label: &str) -> Option<usize> {
    STAGE_TABLE.iter().position(|(known, _)| *known == label)
}

/// Rank of a raw stage label. Unknown labels rank 0.
pub fn rank(label: &str) -> u32 {
    table_position(label).map_or(0, |idx| idx as u32 + 1)
}

/// Points awarded for a raw stage label. Unknown labels award 0.
pub fn points(label: &str) -> u32 {
    table_position(label).map_or(0, |idx| STAGE_TABLE[idx].1)
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Stage {
    fn from(label: String) -> Self {
        Stage::parse(&label)
    }
}

impl From<Stage> for String {
    fn from(stage: Stage) -> Self {
        stage.label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_table_matches_vocabulary() {
        let expected = [
            ("Fase de grupos", 2),
            ("64vos de final", 2),
            ("32vos de final", 4),
            ("16vos de final", 4),
            ("8vos de final", 8),
            ("4tos de final", 10),
            ("Semifinal", 20),
            ("Final", 40),
            ("Campeón", 50),
        ];

        for (label, pts) in expected {
            assert_eq!(points(label), pts, "points for {}", label);
            assert_eq!(Stage::parse(label).points(), pts);
        }
    }

    #[test]
    fn test_rank_is_strictly_increasing() {
        let ranks: Vec<u32> = STAGE_TABLE.iter().map(|(label, _)| rank(label)).collect();
        assert_eq!(ranks, (1..=9).collect::<Vec<u32>>());
        assert!(Stage::Champion.rank() > Stage::Final.rank());
        assert!(Stage::Final.rank() > Stage::SemiFinal.rank());
    }

    #[test]
    fn test_unknown_stage_is_lowest_and_worthless() {
        assert_eq!(rank("Repechaje"), 0);
        assert_eq!(points("Repechaje"), 0);

        let stage = Stage::parse("Repechaje");
        assert_eq!(stage, Stage::Other("Repechaje".to_string()));
        assert_eq!(stage.label(), "Repechaje");
        assert!(!stage.is_known());
    }

    #[test]
    fn test_label_round_trip_for_known_stages() {
        assert_eq!(Stage::parse("Campeón"), Stage::Champion);
        assert_eq!(Stage::QuarterFinal.to_string(), "4tos de final");
    }
}
