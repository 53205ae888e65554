//! Card description parser
//!
//! Turns a human-authored multi-line card description into a typed
//! [`Card`] record. The format is deliberately forgiving: line one is the
//! name with an optional trailing mana cost, optional `Art:`/`Rarity:`
//! metadata lines may appear before the type line in any order, and the
//! body lines are interpreted per card type. Only a structurally hopeless
//! input (fewer than two non-blank lines, or nothing left to be the type
//! line) is an error; unrecognized body lines degrade silently.

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{RendererError, RendererResult};
use crate::symbols::parse_mana_string;
use crate::types::{
    BattleCard, Card, CardBase, Chapter, FrameColor, LoyaltyAbility, PlaneswalkerCard, Rarity,
    SagaCard, StandardCard,
};

static MANA_COST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s+((?:\{[^}]+\})+)$").unwrap());
static PT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([*\d+]+)/([*\d+]+)$").unwrap());
static LOYALTY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^Loyalty:\s*(\S+)$").unwrap());
static DEFENSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^Defense:\s*(\S+)$").unwrap());
static PW_ABILITY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([+-]?\d+):\s*(.+)$").unwrap());
static SAGA_CHAPTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((?:I{1,3}|IV|V|VI)(?:\s*,\s*(?:I{1,3}|IV|V|VI))*)\s*[—–-]\s*(.+)$").unwrap()
});
static ART_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^Art:\s*(\S+)$").unwrap());
static RARITY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^Rarity:\s*(.+)$").unwrap());

/// Exact sentinel line separating rules text from flavor text
const FLAVOR_SEPARATOR: &str = "---";

/// Parse a card description into a typed record.
///
/// Fails only on structurally invalid input; see the module docs for the
/// accepted grammar.
pub fn parse_card(text: &str) -> RendererResult<Card> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(RendererError::InvalidCard(
            "must have at least a name line and a type line".to_string(),
        ));
    }

    // Line 1: name, optionally followed by a run of brace groups.
    let (name, mana_cost) = match MANA_COST_RE.captures(lines[0]) {
        Some(cap) => (cap[1].trim().to_string(), Some(cap[2].to_string())),
        None => (lines[0].to_string(), None),
    };

    // Optional metadata lines before the type line, in any order. The
    // first line matching neither marker is the type line.
    let mut art_url = None;
    let mut rarity = None;
    let mut idx = 1;
    while idx < lines.len() {
        if let Some(cap) = ART_RE.captures(lines[idx]) {
            art_url = Some(cap[1].to_string());
            idx += 1;
        } else if let Some(cap) = RARITY_RE.captures(lines[idx]) {
            match Rarity::from_label(&cap[1]) {
                Some(value) => rarity = Some(value),
                None => warn!("ignoring unrecognized rarity {:?}", &cap[1]),
            }
            idx += 1;
        } else {
            break;
        }
    }
    let Some(&type_line) = lines.get(idx) else {
        return Err(RendererError::InvalidCard(
            "no type line after metadata lines".to_string(),
        ));
    };
    let body = &lines[idx + 1..];

    let lower_type = type_line.to_lowercase();
    let mut base = CardBase::new(name, type_line, derive_frame_color(mana_cost.as_deref(), type_line));
    base.mana_cost = mana_cost;
    base.is_legendary = lower_type.contains("legendary");
    base.art_url = art_url;
    if let Some(value) = rarity {
        base.rarity = value;
    }

    if lower_type.contains("planeswalker") {
        Ok(Card::Planeswalker(parse_planeswalker(base, body)))
    } else if lower_type.contains("saga") {
        Ok(Card::Saga(parse_saga(base, body)))
    } else if lower_type.contains("battle") {
        Ok(Card::Battle(parse_battle(base, body)))
    } else {
        Ok(Card::Standard(parse_standard(base, body)))
    }
}

/// Frame color is derived, never authored.
///
/// Vehicles and (costless) lands get dedicated frames; otherwise the
/// distinct basic-color letters found across the mana symbols decide
/// between colorless, a single color, and multicolor gold. A hybrid or
/// Phyrexian symbol contributes every color letter it contains.
fn derive_frame_color(mana_cost: Option<&str>, type_line: &str) -> FrameColor {
    let lower = type_line.to_lowercase();
    if lower.contains("vehicle") {
        return FrameColor::Vehicle;
    }
    if lower.contains("land") && mana_cost.is_none() {
        return FrameColor::Land;
    }

    const COLORS: [(char, FrameColor); 5] = [
        ('W', FrameColor::White),
        ('U', FrameColor::Blue),
        ('B', FrameColor::Black),
        ('R', FrameColor::Red),
        ('G', FrameColor::Green),
    ];
    let mut found = [false; 5];
    for symbol in parse_mana_string(mana_cost.unwrap_or("")) {
        let inner = symbol.to_uppercase();
        for (i, (letter, _)) in COLORS.iter().enumerate() {
            if inner.contains(*letter) {
                found[i] = true;
            }
        }
    }

    let distinct: Vec<FrameColor> = COLORS
        .iter()
        .zip(found)
        .filter(|(_, hit)| *hit)
        .map(|((_, color), _)| *color)
        .collect();
    match distinct.as_slice() {
        [] => FrameColor::Artifact,
        [single] => *single,
        _ => FrameColor::Multicolor,
    }
}

fn parse_standard(mut base: CardBase, body: &[&str]) -> StandardCard {
    let mut lines: Vec<&str> = body.to_vec();

    // Only a creature or vehicle can carry a P/T pair, and only as its
    // last rules line; "1/1" inside token-making prose must stay prose.
    let lower_type = base.type_line.to_lowercase();
    let statted = lower_type.contains("creature") || lower_type.contains("vehicle");

    let mut pt = None;
    if statted {
        pt = take_trailing_pt(&mut lines);
    }

    let (mut rules_lines, flavor_text) = split_rules_and_flavor(&lines);
    // Flavor lines may trail the P/T pair; retry against the rules tail
    // once they are out of the way.
    if statted && pt.is_none() {
        pt = take_trailing_pt(&mut rules_lines);
    }

    if !rules_lines.is_empty() {
        base.rules_text = Some(rules_lines.join("\n"));
    }
    base.flavor_text = flavor_text;

    let (power, toughness) = match pt {
        Some((p, t)) => (Some(p), Some(t)),
        None => (None, None),
    };
    StandardCard { base, power, toughness }
}

/// Pop the last line if it is a power/toughness pair
fn take_trailing_pt(lines: &mut Vec<&str>) -> Option<(String, String)> {
    let last = lines.last()?;
    let cap = PT_RE.captures(last)?;
    let pair = (cap[1].to_string(), cap[2].to_string());
    lines.pop();
    Some(pair)
}

/// An asterisk-wrapped line, with the wrapping stripped
fn strip_flavor_markers(line: &str) -> Option<&str> {
    line.strip_prefix('*')
        .and_then(|rest| rest.strip_suffix('*'))
}

/// Split body lines into rules lines and flavor text.
///
/// A `---` sentinel line wins; without one, a trailing run of lines each
/// wrapped in `*...*` becomes the flavor text with the asterisks
/// stripped. Asterisk-wrapped lines followed by plain rules lines are
/// reminder text and stay in the rules.
fn split_rules_and_flavor<'a>(lines: &[&'a str]) -> (Vec<&'a str>, Option<String>) {
    if let Some(sep) = lines.iter().position(|l| *l == FLAVOR_SEPARATOR) {
        let flavor = &lines[sep + 1..];
        let flavor_text = if flavor.is_empty() { None } else { Some(flavor.join("\n")) };
        return (lines[..sep].to_vec(), flavor_text);
    }

    let mut split = lines.len();
    while split > 0 && strip_flavor_markers(lines[split - 1]).is_some() {
        split -= 1;
    }
    if split < lines.len() {
        let flavor: Vec<&str> = lines[split..]
            .iter()
            .filter_map(|l| strip_flavor_markers(l))
            .collect();
        (lines[..split].to_vec(), Some(flavor.join("\n")))
    } else {
        (lines.to_vec(), None)
    }
}

fn parse_planeswalker(base: CardBase, body: &[&str]) -> PlaneswalkerCard {
    let mut abilities = Vec::new();
    let mut starting_loyalty = "0".to_string();

    for line in body {
        if let Some(cap) = LOYALTY_RE.captures(line) {
            starting_loyalty = cap[1].to_string();
        } else if let Some(cap) = PW_ABILITY_RE.captures(line) {
            abilities.push(LoyaltyAbility { cost: cap[1].to_string(), text: cap[2].to_string() });
        } else {
            // Static ability, empty cost
            abilities.push(LoyaltyAbility { cost: String::new(), text: line.to_string() });
        }
    }

    PlaneswalkerCard { base, starting_loyalty, abilities }
}

fn parse_saga(base: CardBase, body: &[&str]) -> SagaCard {
    let mut chapters = Vec::new();
    for line in body {
        if let Some(cap) = SAGA_CHAPTER_RE.captures(line) {
            let count = cap[1].split(',').count() as u32;
            chapters.push(Chapter { count, text: cap[2].trim().to_string() });
        }
        // Lines that do not match the chapter grammar are noise, not errors.
    }
    SagaCard { base, chapters }
}

fn parse_battle(mut base: CardBase, body: &[&str]) -> BattleCard {
    let mut defense = "0".to_string();
    let mut rules_lines = Vec::new();

    for line in body {
        if let Some(cap) = DEFENSE_RE.captures(line) {
            defense = cap[1].to_string();
        } else {
            rules_lines.push(*line);
        }
    }

    if !rules_lines.is_empty() {
        base.rules_text = Some(rules_lines.join("\n"));
    }
    BattleCard { base, defense }
}
