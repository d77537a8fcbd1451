use std::io::Write;

use csv::WriterBuilder;
use serde::{Deserialize, Serialize};

use crate::draw::Draw;
use crate::error::DrawResult;
use crate::schedule::Slot;
use crate::seed::SeedSource;

/// Per-slot view of a draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSummary {
    pub slot: Slot,
    pub size: usize,
    pub target: usize,
    pub members: Vec<String>,
}

/// Machine-readable summary of a draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawSummary {
    pub seed: u64,
    pub seed_source: SeedSource,
    pub people: Vec<String>,
    pub slots: Vec<SlotSummary>,
    pub deviation: usize,
    pub spread: usize,
    pub attempts: usize,
}

impl From<&Draw> for DrawSummary {
    fn from(draw: &Draw) -> Self {
        let assignment = &draw.assignment;
        let slots = assignment
            .slots
            .iter()
            .zip(&assignment.sizes)
            .zip(&assignment.targets)
            .map(|((&slot, &size), &target)| SlotSummary {
                slot,
                size,
                target,
                members: assignment.members(slot).into_iter().map(String::from).collect(),
            })
            .collect();

        DrawSummary {
            seed: draw.seed.value,
            seed_source: draw.seed.source,
            people: draw.people.clone(),
            slots,
            deviation: assignment.deviation(),
            spread: assignment.spread(),
            attempts: assignment.attempts,
        }
    }
}

pub fn to_json(draw: &Draw) -> DrawResult<String> {
    Ok(serde_json::to_string_pretty(&DrawSummary::from(draw))?)
}

/// Writes `slot,person` rows grouped by slot, members sorted by name.
pub fn write_csv<W: Write>(draw: &Draw, writer: W) -> DrawResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    wtr.write_record(["slot", "person"])?;
    for slot in &draw.assignment.slots {
        let label = slot.to_string();
        for member in draw.assignment.members(*slot) {
            wtr.write_record([label.as_str(), member])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(draw: &Draw) -> DrawResult<String> {
    let mut buf = Vec::new();
    write_csv(draw, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
