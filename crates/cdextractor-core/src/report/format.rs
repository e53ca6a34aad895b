use crate::domain::ParsedData;
use std::fmt::Write as _;

pub const RING_TITLE: &str = "Analysis of Short Ring-Interactions with Cg-Cg Distances";
pub const RING_HEADER: &str = "Cg-Cg\tCgI_Perp\tAlpha";
pub const PI_TITLE: &str =
    "Analysis of Y-X...Cg(Pi-Ring) Interactions (X..Cg < 4.0 Ang. - Gamma <  30.0 Deg)";
pub const PI_HEADER: &str = "X..Cg\tX-Perp\tY-X..Cg";

/// Renders both tables as tab-separated text, values verbatim.
pub fn format_results(data: &ParsedData) -> String {
    let mut out = String::new();

    out.push_str(RING_TITLE);
    out.push('\n');
    out.push_str(RING_HEADER);
    out.push('\n');
    for ring in data.ring_interactions() {
        let _ = writeln!(out, "{ring}");
    }

    out.push_str("\n\n");

    out.push_str(PI_TITLE);
    out.push('\n');
    out.push_str(PI_HEADER);
    out.push('\n');
    for pi in data.pi_interactions() {
        let _ = writeln!(out, "{pi}");
    }

    out
}
