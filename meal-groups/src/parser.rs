use std::sync::LazyLock;

use regex::Regex;

use crate::eligibility::{Grant, GrantFact};
use crate::schedule::{Slot, SlotCategory, SlotRegistry};

/// "TODO:", "Any:", "ALL:" ... opens the section of people free for any meal.
static ANY_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(todo|any|all|anyone)\s*:\s*$").expect("any-slot header regex")
});

/// "- Comida 9", "Dinner 10:", "• cena 11" ...
static SLOT_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*[-•*]?\s*(lunch|comida|dinner|cena)\s+(\d+)\s*:?\s*$")
        .expect("slot header regex")
});

/// What a single line of the message means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Blank,
    AnySlotHeader,
    SlotHeader(Slot),
    Name(String),
}

/// Collapses runs of whitespace and trims the ends.
pub fn normalize_name(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_bullet(c: char) -> bool {
    matches!(c, '-' | '•' | '*')
}

pub fn classify_line(raw: &str) -> Line {
    if raw.trim().is_empty() {
        return Line::Blank;
    }

    if ANY_HEADER_RE.is_match(raw) {
        return Line::AnySlotHeader;
    }

    if let Some(caps) = SLOT_HEADER_RE.captures(raw) {
        let category = SlotCategory::from_word(&caps[1]);
        let day = caps[2].parse::<u32>().ok();
        if let (Some(category), Some(day)) = (category, day) {
            return Line::SlotHeader(Slot { category, day });
        }
    }

    let trimmed = raw.trim();
    let without_bullet = trimmed.strip_prefix(is_bullet).unwrap_or(trimmed);
    let name = normalize_name(without_bullet);
    if name.is_empty() {
        // bullet-only line
        Line::Blank
    } else {
        Line::Name(name)
    }
}

/// Names collected from a message, per section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMessage {
    /// People listed in the any-slot section.
    pub any_slot: Vec<String>,
    /// People listed under each slot header, headers in first-appearance order.
    pub by_slot: Vec<(Slot, Vec<String>)>,
}

impl ParsedMessage {
    /// Flattens the sections into grant facts, any-slot section first.
    pub fn grant_facts(&self) -> Vec<GrantFact> {
        let any = self.any_slot.iter().map(|person| GrantFact {
            person: person.clone(),
            grant: Grant::AnySlot,
        });
        let specific = self.by_slot.iter().flat_map(|(slot, names)| {
            names.iter().map(move |person| GrantFact {
                person: person.clone(),
                grant: Grant::Specific(*slot),
            })
        });
        any.chain(specific).collect()
    }

    fn names_for(&mut self, slot: Slot) -> &mut Vec<String> {
        let idx = match self.by_slot.iter().position(|(s, _)| *s == slot) {
            Some(idx) => idx,
            None => {
                self.by_slot.push((slot, Vec::new()));
                self.by_slot.len() - 1
            }
        };
        &mut self.by_slot[idx].1
    }
}

#[derive(Debug, Clone, Copy)]
enum Section {
    None,
    AnySlot,
    Slot(Slot),
}

/// Splits a pasted message into sections.
///
/// Unknown meal headers are appended to `registry`. Lines before the first
/// header are dropped without complaint.
pub fn parse_message(text: &str, registry: &mut SlotRegistry) -> ParsedMessage {
    let mut parsed = ParsedMessage::default();
    let mut section = Section::None;

    for raw in text.lines() {
        match classify_line(raw) {
            Line::Blank => {}
            Line::AnySlotHeader => section = Section::AnySlot,
            Line::SlotHeader(slot) => {
                registry.register(slot);
                parsed.names_for(slot);
                section = Section::Slot(slot);
            }
            Line::Name(name) => match section {
                Section::AnySlot => parsed.any_slot.push(name),
                Section::Slot(slot) => parsed.names_for(slot).push(name),
                Section::None => {}
            },
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGE: &str = "\
Hi all, here is the list

TODO:
- Juan  Pérez
- María García
-

- Comida 9
- Ana López
- Carlos   Ruiz

- Cena 9
- Laura Martín
- Ana López

Dinner 12:
• Pablo
";

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line("   "), Line::Blank);
        assert_eq!(classify_line("TODO:"), Line::AnySlotHeader);
        assert_eq!(classify_line("  any : "), Line::AnySlotHeader);
        assert_eq!(classify_line("- Comida 9"), Line::SlotHeader(Slot::lunch(9)));
        assert_eq!(classify_line("CENA 10"), Line::SlotHeader(Slot::dinner(10)));
        assert_eq!(classify_line("* Lunch 11:"), Line::SlotHeader(Slot::lunch(11)));
        assert_eq!(classify_line("- "), Line::Blank);
        assert_eq!(classify_line("•"), Line::Blank);
        assert_eq!(classify_line("-  Ana   López "), Line::Name("Ana López".to_string()));
        assert_eq!(classify_line("Lunch with Ana"), Line::Name("Lunch with Ana".to_string()));
    }

    #[test]
    fn test_parse_message_sections() {
        let mut registry = SlotRegistry::canonical();
        let parsed = parse_message(MESSAGE, &mut registry);

        assert_eq!(parsed.any_slot, vec!["Juan Pérez", "María García"]);
        assert_eq!(
            parsed.by_slot,
            vec![
                (Slot::lunch(9), vec!["Ana López".to_string(), "Carlos Ruiz".to_string()]),
                (Slot::dinner(9), vec!["Laura Martín".to_string(), "Ana López".to_string()]),
                (Slot::dinner(12), vec!["Pablo".to_string()]),
            ]
        );
        assert_eq!(registry.slots().len(), 7);
        assert_eq!(registry.slots()[6], Slot::dinner(12));
    }

    #[test]
    fn test_repeated_header_appends() {
        let mut registry = SlotRegistry::canonical();
        let parsed = parse_message("- Cena 10\nAna\n- Comida 9\nBea\n- Cena 10\nCarl\n", &mut registry);
        assert_eq!(
            parsed.by_slot,
            vec![
                (Slot::dinner(10), vec!["Ana".to_string(), "Carl".to_string()]),
                (Slot::lunch(9), vec!["Bea".to_string()]),
            ]
        );
        assert_eq!(registry, SlotRegistry::canonical());
    }

    #[test]
    fn test_lines_outside_sections_are_dropped() {
        let mut registry = SlotRegistry::canonical();
        let parsed = parse_message("Ana\nBea\n", &mut registry);
        assert!(parsed.grant_facts().is_empty());
    }

    #[test]
    fn test_grant_facts() {
        let mut registry = SlotRegistry::canonical();
        let parsed = parse_message("TODO:\nAna\n- Cena 9\nBea\n", &mut registry);
        assert_eq!(
            parsed.grant_facts(),
            vec![
                GrantFact { person: "Ana".to_string(), grant: Grant::AnySlot },
                GrantFact { person: "Bea".to_string(), grant: Grant::Specific(Slot::dinner(9)) },
            ]
        );
    }
}
