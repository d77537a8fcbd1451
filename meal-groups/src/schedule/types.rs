use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::scoring;

/// The two kinds of meal slot. Dinners are the ones kept small on ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotCategory {
    Lunch,
    Dinner,
}

impl SlotCategory {
    /// Recognizes a header word, English or Spanish, in any case.
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "lunch" | "comida" => Some(SlotCategory::Lunch),
            "dinner" | "cena" => Some(SlotCategory::Dinner),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlotCategory::Lunch => "Lunch",
            SlotCategory::Dinner => "Dinner",
        }
    }
}

/// A named capacity bucket such as "Lunch 9" or "Dinner 10"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slot {
    pub category: SlotCategory,
    pub day: u32,
}

impl Slot {
    pub const fn lunch(day: u32) -> Self {
        Slot { category: SlotCategory::Lunch, day }
    }

    pub const fn dinner(day: u32) -> Self {
        Slot { category: SlotCategory::Dinner, day }
    }

    pub fn is_lunch(&self) -> bool {
        self.category == SlotCategory::Lunch
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so width specifiers like {:>10} apply to the whole label
        f.pad(&format!("{} {}", self.category.label(), self.day))
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(word), Some(day), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(format!("expected \"<lunch|dinner> <day>\", got {:?}", s));
        };
        let category = SlotCategory::from_word(word)
            .ok_or_else(|| format!("unknown slot category: {}", word))?;
        let day = day
            .parse()
            .map_err(|_| format!("invalid day number: {}", day))?;
        Ok(Slot { category, day })
    }
}

impl TryFrom<String> for Slot {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Slot> for String {
    fn from(slot: Slot) -> Self {
        slot.to_string()
    }
}

/// Input to the assignment engine.
///
/// `options[i]` holds the indices into `slots` that `people[i]` may be
/// placed into, in ascending slot order.
#[derive(Debug, Clone, Default)]
pub struct AssignmentProblem {
    pub people: Vec<String>,
    pub slots: Vec<Slot>,
    pub options: Vec<Vec<usize>>,
}

impl AssignmentProblem {
    /// Builds a problem from per-person slot lists. Slots missing from
    /// `slots` are ignored; duplicates collapse.
    pub fn from_eligible(slots: Vec<Slot>, eligible: Vec<(String, Vec<Slot>)>) -> Self {
        let mut people = Vec::with_capacity(eligible.len());
        let mut options = Vec::with_capacity(eligible.len());
        for (person, allowed) in eligible {
            let mut indices: Vec<usize> = allowed
                .iter()
                .filter_map(|slot| slots.iter().position(|s| s == slot))
                .collect();
            indices.sort_unstable();
            indices.dedup();
            people.push(person);
            options.push(indices);
        }
        AssignmentProblem { people, slots, options }
    }

    /// Checks the shape of the problem: one option list per person and
    /// every option pointing at a known slot.
    pub fn validate(&self) -> Result<(), String> {
        if self.options.len() != self.people.len() {
            return Err(format!(
                "{} option lists for {} people",
                self.options.len(),
                self.people.len()
            ));
        }
        for (person, options) in self.people.iter().zip(&self.options) {
            if let Some(bad) = options.iter().find(|&&idx| idx >= self.slots.len()) {
                return Err(format!("{} has unknown slot index {}", person, bad));
            }
        }
        Ok(())
    }

    /// People whose option list is empty, in problem order
    pub fn unplaceable(&self) -> Vec<String> {
        self.people
            .iter()
            .zip(&self.options)
            .filter(|(_, options)| options.is_empty())
            .map(|(person, _)| person.clone())
            .collect()
    }
}

/// One person placed into one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub person: String,
    pub slot: Slot,
}

/// The outcome of a successful draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub slots: Vec<Slot>,
    /// One entry per person, in the order the problem listed them.
    pub placements: Vec<Placement>,
    /// Realized size per slot, aligned with `slots`.
    pub sizes: Vec<usize>,
    /// Target size per slot, aligned with `slots`.
    pub targets: Vec<usize>,
    /// Seed of the random stream, when the engine created it itself.
    pub seed: Option<u64>,
    /// Number of construction attempts actually run.
    pub attempts: usize,
    pub score: usize,
}

impl Assignment {
    pub fn slot_of(&self, person: &str) -> Option<Slot> {
        self.placements
            .iter()
            .find(|p| p.person == person)
            .map(|p| p.slot)
    }

    /// Members of a slot, sorted case-insensitively for display
    pub fn members(&self, slot: Slot) -> Vec<&str> {
        let mut members: Vec<&str> = self
            .placements
            .iter()
            .filter(|p| p.slot == slot)
            .map(|p| p.person.as_str())
            .collect();
        members.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
        members
    }

    pub fn deviation(&self) -> usize {
        scoring::deviation(&self.sizes, &self.targets)
    }

    pub fn spread(&self) -> usize {
        scoring::spread(&self.sizes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_display_and_parse() {
        assert_eq!(Slot::lunch(9).to_string(), "Lunch 9");
        assert_eq!(Slot::dinner(10).to_string(), "Dinner 10");
        assert_eq!(format!("{:>10}", Slot::lunch(9)), "   Lunch 9");
        assert_eq!("cena 11".parse::<Slot>(), Ok(Slot::dinner(11)));
        assert_eq!("Comida 12".parse::<Slot>(), Ok(Slot::lunch(12)));
        assert!("Breakfast 9".parse::<Slot>().is_err());
        assert!("Lunch".parse::<Slot>().is_err());
        assert!("Lunch nine".parse::<Slot>().is_err());
    }

    #[test]
    fn test_slot_serializes_as_label() {
        let json = serde_json::to_string(&Slot::dinner(9)).unwrap();
        assert_eq!(json, "\"Dinner 9\"");
        let back: Slot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Slot::dinner(9));
    }

    #[test]
    fn test_problem_from_eligible_ignores_unknown_slots() {
        let problem = AssignmentProblem::from_eligible(
            vec![Slot::lunch(9), Slot::dinner(9)],
            vec![
                ("Ana".to_string(), vec![Slot::dinner(9), Slot::lunch(9), Slot::dinner(9)]),
                ("Bea".to_string(), vec![Slot::lunch(30)]),
            ],
        );
        assert_eq!(problem.options, vec![vec![0, 1], vec![]]);
        assert_eq!(problem.unplaceable(), vec!["Bea".to_string()]);
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn test_problem_validate_rejects_bad_index() {
        let problem = AssignmentProblem {
            people: vec!["Ana".to_string()],
            slots: vec![Slot::lunch(9)],
            options: vec![vec![3]],
        };
        assert!(problem.validate().is_err());
    }

    #[test]
    fn test_members_sorted_case_insensitively() {
        let assignment = Assignment {
            slots: vec![Slot::lunch(9)],
            placements: vec![
                Placement { person: "carla".to_string(), slot: Slot::lunch(9) },
                Placement { person: "Bruno".to_string(), slot: Slot::lunch(9) },
                Placement { person: "ana".to_string(), slot: Slot::lunch(9) },
            ],
            sizes: vec![3],
            targets: vec![3],
            seed: None,
            attempts: 1,
            score: 0,
        };
        assert_eq!(assignment.members(Slot::lunch(9)), vec!["ana", "Bruno", "carla"]);
        assert_eq!(assignment.slot_of("Bruno"), Some(Slot::lunch(9)));
        assert_eq!(assignment.slot_of("Dora"), None);
    }
}
