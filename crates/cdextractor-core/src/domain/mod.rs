pub mod errors;

pub use errors::{ExtractError, ExtractErrorCategory, ExtractResult};

use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Ring,
    Pi,
}

impl InteractionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ring => "RING",
            Self::Pi => "PI",
        }
    }
}

impl Display for InteractionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// One row of the Cg-Cg ring-interaction table.
///
/// Values keep the report's text, uncertainty suffix included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RingInteraction {
    cg_cg: String,
    cg_i_perp: String,
    alpha: String,
}

impl RingInteraction {
    pub fn new(
        cg_cg: impl Into<String>,
        cg_i_perp: impl Into<String>,
        alpha: impl Into<String>,
    ) -> Self {
        Self {
            cg_cg: cg_cg.into(),
            cg_i_perp: cg_i_perp.into(),
            alpha: alpha.into(),
        }
    }

    pub fn cg_cg(&self) -> &str {
        &self.cg_cg
    }

    pub fn cg_i_perp(&self) -> &str {
        &self.cg_i_perp
    }

    pub fn alpha(&self) -> &str {
        &self.alpha
    }
}

impl Display for RingInteraction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{}", self.cg_cg, self.cg_i_perp, self.alpha)
    }
}

/// One row of the Y-X...Cg(Pi-Ring) table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PiInteraction {
    x_cg: String,
    x_perp: String,
    yx_cg: String,
}

impl PiInteraction {
    pub fn new(
        x_cg: impl Into<String>,
        x_perp: impl Into<String>,
        yx_cg: impl Into<String>,
    ) -> Self {
        Self {
            x_cg: x_cg.into(),
            x_perp: x_perp.into(),
            yx_cg: yx_cg.into(),
        }
    }

    pub fn x_cg(&self) -> &str {
        &self.x_cg
    }

    pub fn x_perp(&self) -> &str {
        &self.x_perp
    }

    pub fn yx_cg(&self) -> &str {
        &self.yx_cg
    }
}

impl Display for PiInteraction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{}", self.x_cg, self.x_perp, self.yx_cg)
    }
}

/// Result of one report parse: both tables in report order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedData {
    ring_interactions: Vec<RingInteraction>,
    pi_interactions: Vec<PiInteraction>,
}

impl ParsedData {
    pub fn new(
        ring_interactions: Vec<RingInteraction>,
        pi_interactions: Vec<PiInteraction>,
    ) -> Self {
        Self {
            ring_interactions,
            pi_interactions,
        }
    }

    pub fn ring_interactions(&self) -> &[RingInteraction] {
        &self.ring_interactions
    }

    pub fn pi_interactions(&self) -> &[PiInteraction] {
        &self.pi_interactions
    }

    pub fn is_empty(&self) -> bool {
        self.ring_interactions.is_empty() && self.pi_interactions.is_empty()
    }

    pub fn record_count(&self, kind: InteractionKind) -> usize {
        match kind {
            InteractionKind::Ring => self.ring_interactions.len(),
            InteractionKind::Pi => self.pi_interactions.len(),
        }
    }

    pub fn formatted_results(&self) -> String {
        crate::report::format_results(self)
    }
}
