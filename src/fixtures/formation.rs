use crate::models::fixture::SlotRole;

/// Declared size category of a fixture. Anything unrecognized is treated
/// as a full-size game rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationSize {
    FiveASide,
    SevenASide,
    ElevenASide,
}

impl FormationSize {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "5" => FormationSize::FiveASide,
            "7" => FormationSize::SevenASide,
            _ => FormationSize::ElevenASide,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormationSize::FiveASide => "5",
            FormationSize::SevenASide => "7",
            FormationSize::ElevenASide => "11",
        }
    }
}

/// One entry of a formation layout. The same layout is materialized once
/// per team when a fixture is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotDefinition {
    pub code: &'static str,
    pub label: &'static str,
    pub role: SlotRole,
}

const fn player(code: &'static str, label: &'static str) -> SlotDefinition {
    SlotDefinition {
        code,
        label,
        role: SlotRole::Player,
    }
}

const FIVE_A_SIDE: &[SlotDefinition] = &[
    player("GK", "Goalkeeper"),
    player("LB", "Left back"),
    player("CB", "Centre back"),
    player("RB", "Right back"),
    player("CF", "Centre forward"),
    SlotDefinition {
        code: "BENCH",
        label: "Substitute",
        role: SlotRole::Bench,
    },
    SlotDefinition {
        code: "COACH",
        label: "Coach",
        role: SlotRole::Coach,
    },
];

const SEVEN_A_SIDE: &[SlotDefinition] = &[
    player("GK", "Goalkeeper"),
    player("LB", "Left back"),
    player("CB", "Centre back"),
    player("RB", "Right back"),
    player("CM", "Central midfield"),
    player("AMF", "Attacking midfield"),
    player("CF", "Centre forward"),
    SlotDefinition {
        code: "BENCH",
        label: "Substitute",
        role: SlotRole::Bench,
    },
    SlotDefinition {
        code: "COACH",
        label: "Coach",
        role: SlotRole::Coach,
    },
];

const ELEVEN_A_SIDE: &[SlotDefinition] = &[
    player("GK", "Goalkeeper"),
    player("LB", "Left back"),
    player("CB1", "Centre back 1"),
    player("CB2", "Centre back 2"),
    player("RB", "Right back"),
    player("CM1", "Central midfield 1"),
    player("CM2", "Central midfield 2"),
    player("AMF", "Attacking midfield"),
    player("LWF", "Left wing forward"),
    player("RWF", "Right wing forward"),
    player("CF", "Centre forward"),
    SlotDefinition {
        code: "BENCH",
        label: "Substitute",
        role: SlotRole::Bench,
    },
    SlotDefinition {
        code: "COACH",
        label: "Coach",
        role: SlotRole::Coach,
    },
];

/// Ordered slot layout for a size category, identical for both teams.
pub fn formation_layout(size: FormationSize) -> &'static [SlotDefinition] {
    match size {
        FormationSize::FiveASide => FIVE_A_SIDE,
        FormationSize::SevenASide => SEVEN_A_SIDE,
        FormationSize::ElevenASide => ELEVEN_A_SIDE,
    }
}
