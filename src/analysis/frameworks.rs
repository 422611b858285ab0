//! Pedagogical framework catalog offered alongside every analysis.
//! The analyzer only reports the catalog; it does not apply the frameworks.

use serde::{Serialize, Serializer};
use std::fmt;

/// Upper bound on how many frameworks a caller may select
pub const MAX_FRAMEWORK_SELECTION: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PedagogicalFramework {
    BloomsTaxonomy,
    Addie,
    Sam,
    Kirkpatrick,
    GagneNineEvents,
    MerrillPrinciples,
    KolbLearningCycle,
}

impl PedagogicalFramework {
    /// Catalog order as presented to callers
    pub const ALL: [PedagogicalFramework; 7] = [
        PedagogicalFramework::BloomsTaxonomy,
        PedagogicalFramework::Addie,
        PedagogicalFramework::Sam,
        PedagogicalFramework::Kirkpatrick,
        PedagogicalFramework::GagneNineEvents,
        PedagogicalFramework::MerrillPrinciples,
        PedagogicalFramework::KolbLearningCycle,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            PedagogicalFramework::BloomsTaxonomy => "Blooms Taxonomy",
            PedagogicalFramework::Addie => "ADDIE Model",
            PedagogicalFramework::Sam => "SAM Model",
            PedagogicalFramework::Kirkpatrick => "Kirkpatrick Model",
            PedagogicalFramework::GagneNineEvents => "Gagné's Nine Events",
            PedagogicalFramework::MerrillPrinciples => "Merrill's Principles",
            PedagogicalFramework::KolbLearningCycle => "Kolb's Learning Cycle",
        }
    }
}

impl fmt::Display for PedagogicalFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for PedagogicalFramework {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Pre-selected frameworks
pub const DEFAULT_FRAMEWORKS: [PedagogicalFramework; 2] = [
    PedagogicalFramework::BloomsTaxonomy,
    PedagogicalFramework::Addie,
];

/// Catalog snapshot served by the frameworks endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkCatalog {
    pub available_frameworks: Vec<PedagogicalFramework>,
    pub default_frameworks: Vec<PedagogicalFramework>,
    pub max_framework_selection: usize,
}

impl FrameworkCatalog {
    pub fn standard() -> Self {
        Self {
            available_frameworks: PedagogicalFramework::ALL.to_vec(),
            default_frameworks: DEFAULT_FRAMEWORKS.to_vec(),
            max_framework_selection: MAX_FRAMEWORK_SELECTION,
        }
    }
}
