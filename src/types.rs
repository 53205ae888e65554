//! Type definitions for card rendering

use serde::{Deserialize, Serialize};

/// Rectangle with position and size
///
/// Layout tables store fractional coordinates (0.0-1.0 of the canvas);
/// renderers scale them to pixels before drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Scale a fractional rect to absolute pixel coordinates
    pub fn scaled(&self, canvas_width: f64, canvas_height: f64) -> Rect {
        Rect::new(
            self.x * canvas_width,
            self.y * canvas_height,
            self.width * canvas_width,
            self.height * canvas_height,
        )
    }
}

/// Color representation (components in 0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: &str) -> Result<Self, crate::error::RendererError> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(crate::error::RendererError::InvalidColor(hex.to_string()));
        }

        let parse = |s: &str| {
            u8::from_str_radix(s, 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|_| crate::error::RendererError::InvalidColor(hex.to_string()))
        };

        Ok(Self {
            r: parse(&hex[0..2])?,
            g: parse(&hex[2..4])?,
            b: parse(&hex[4..6])?,
        })
    }

    pub const fn black() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0 }
    }

    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0 }
    }
}

/// Token produced by the rich-text tokenizer
///
/// `Symbol` carries the brace-group contents verbatim (case and slashes
/// preserved, e.g. `G/P`); resolution to an image is a surface concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum RichToken {
    Text(String),
    Symbol(String),
}

/// Card rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
}

impl Rarity {
    /// Parse an authored rarity label, case-insensitively.
    ///
    /// Accepts both the short form (`mythic`) and the printed form
    /// (`Mythic Rare`). Returns `None` for unrecognized labels.
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.trim().to_lowercase();
        if lower.contains("mythic") {
            Some(Rarity::Mythic)
        } else if lower == "uncommon" {
            Some(Rarity::Uncommon)
        } else if lower == "common" {
            Some(Rarity::Common)
        } else if lower == "rare" {
            Some(Rarity::Rare)
        } else {
            None
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Mythic => "mythic",
        }
    }
}

/// Frame color classification, derived from mana cost and type line
///
/// Never authored directly. The one-letter code is the stable key used
/// for frame/crown/badge asset lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameColor {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "u")]
    Blue,
    #[serde(rename = "b")]
    Black,
    #[serde(rename = "r")]
    Red,
    #[serde(rename = "g")]
    Green,
    #[serde(rename = "m")]
    Multicolor,
    #[serde(rename = "a")]
    Artifact,
    #[serde(rename = "l")]
    Land,
    #[serde(rename = "v")]
    Vehicle,
}

impl FrameColor {
    pub fn code(&self) -> &'static str {
        match self {
            FrameColor::White => "w",
            FrameColor::Blue => "u",
            FrameColor::Black => "b",
            FrameColor::Red => "r",
            FrameColor::Green => "g",
            FrameColor::Multicolor => "m",
            FrameColor::Artifact => "a",
            FrameColor::Land => "l",
            FrameColor::Vehicle => "v",
        }
    }
}

/// Fields shared by every card variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardBase {
    pub name: String,
    pub mana_cost: Option<String>,
    pub type_line: String,
    pub rules_text: Option<String>,
    pub flavor_text: Option<String>,
    pub frame_color: FrameColor,
    pub rarity: Rarity,
    pub is_legendary: bool,
    pub art_url: Option<String>,
    pub artist: Option<String>,
    pub collector_number: Option<String>,
    pub set_code: Option<String>,
}

impl CardBase {
    pub fn new(name: impl Into<String>, type_line: impl Into<String>, frame_color: FrameColor) -> Self {
        Self {
            name: name.into(),
            mana_cost: None,
            type_line: type_line.into(),
            rules_text: None,
            flavor_text: None,
            frame_color,
            rarity: Rarity::Rare,
            is_legendary: false,
            art_url: None,
            artist: None,
            collector_number: None,
            set_code: None,
        }
    }
}

/// Standard card (creature, instant, sorcery, artifact, land, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardCard {
    #[serde(flatten)]
    pub base: CardBase,
    /// Display strings; `*` and `N+*` style values are never evaluated
    pub power: Option<String>,
    pub toughness: Option<String>,
}

/// One planeswalker ability; `cost` is `""` for static abilities,
/// otherwise a signed-integer string such as `+1` or `-2`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyAbility {
    pub cost: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaneswalkerCard {
    #[serde(flatten)]
    pub base: CardBase,
    pub starting_loyalty: String,
    /// Render order = declaration order
    pub abilities: Vec<LoyaltyAbility>,
}

/// One saga chapter; `count` is how many sequential chapter numerals
/// the entry spans ("I, II — ..." has count 2)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub count: u32,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SagaCard {
    #[serde(flatten)]
    pub base: CardBase,
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleCard {
    #[serde(flatten)]
    pub base: CardBase,
    pub defense: String,
}

/// A parsed card record, discriminated by card type
///
/// Exactly one variant per record; consumers match exhaustively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Card {
    Standard(StandardCard),
    Planeswalker(PlaneswalkerCard),
    Saga(SagaCard),
    Battle(BattleCard),
}

impl Card {
    /// Access the fields shared by all variants
    pub fn base(&self) -> &CardBase {
        match self {
            Card::Standard(c) => &c.base,
            Card::Planeswalker(c) => &c.base,
            Card::Saga(c) => &c.base,
            Card::Battle(c) => &c.base,
        }
    }
}
