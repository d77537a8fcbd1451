use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::draw::Draw;
use crate::error::DrawResult;
use crate::seed::SeedSource;

const RULE_WIDTH: usize = 50;

/// "+1", "-2" or "ok" for a slot's size relative to its target
pub fn format_delta(size: usize, target: usize) -> String {
    if size == target {
        "ok".to_string()
    } else if size > target {
        format!("+{}", size - target)
    } else {
        format!("-{}", target - size)
    }
}

/// Listing of the people detected in the message, shown before the draw
pub fn render_participants(people: &[String]) -> String {
    Participants(people).to_string()
}

/// Full plain-text result, meant to be copied and pasted into a chat.
pub fn render_report(draw: &Draw, generated_at: DateTime<Utc>) -> String {
    Report { draw, generated_at }.to_string()
}

struct Participants<'a>(&'a [String]);

impl fmt::Display for Participants<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Participants detected ===")?;
        writeln!(f, "Total: {}\n", self.0.len())?;
        for person in self.0 {
            writeln!(f, " - {}", person)?;
        }
        Ok(())
    }
}

struct Report<'a> {
    draw: &'a Draw,
    generated_at: DateTime<Utc>,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let draw = self.draw;
        let assignment = &draw.assignment;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "MEAL GROUPS DRAW")?;
        writeln!(f, "{}", rule)?;
        match draw.seed.source {
            SeedSource::Manual => writeln!(f, "Seed: {} (manual)", draw.seed.value)?,
            SeedSource::Automatic => writeln!(
                f,
                "Seed: {} (automatic, reuse it to repeat this draw)",
                draw.seed.value
            )?,
        }
        writeln!(f, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f, "{}\n", rule)?;

        writeln!(f, "PARTICIPANTS: {}", draw.people.len())?;
        writeln!(f, "{}\n", draw.people.join(", "))?;

        writeln!(f, "GROUP SIZES:")?;
        for ((slot, &size), &target) in assignment
            .slots
            .iter()
            .zip(&assignment.sizes)
            .zip(&assignment.targets)
        {
            writeln!(
                f,
                "{:>10}: {} (target {}) {}",
                slot,
                size,
                target,
                format_delta(size, target)
            )?;
        }
        writeln!(f)?;

        writeln!(f, "ASSIGNMENTS:")?;
        writeln!(f, "{}", "-".repeat(30))?;
        for slot in &assignment.slots {
            writeln!(f, "\n{}:", slot.to_string().to_uppercase())?;
            for member in assignment.members(*slot) {
                writeln!(f, "  • {}", member)?;
            }
        }

        writeln!(f, "\n{}", rule)?;
        writeln!(
            f,
            "Stats: deviation={}, spread={}, attempts={}",
            assignment.deviation(),
            assignment.spread(),
            assignment.attempts
        )
    }
}

pub fn write_report_to_file<P: AsRef<Path>>(report: &str, path: P) -> DrawResult<()> {
    let mut file = File::create(path)?;
    file.write_all(report.as_bytes())?;
    Ok(())
}
