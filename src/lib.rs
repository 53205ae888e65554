//! Trading-card image renderer
//!
//! Turns human-authored card descriptions into typed card records and lays
//! them out (art box, frame, mana row, auto-fit rules and flavor text) as
//! draw calls against an embedder-supplied graphics surface. Pixel work
//! (image decoding, compositing, rasterization, encoding) stays on the
//! surface side of the [`canvas::Canvas`] trait.

pub mod canvas;
pub mod error;
pub mod layout;
pub mod measure;
pub mod parser;
pub mod render;
pub mod symbols;
pub mod text_fit;
pub mod text_layout;
pub mod types;

pub use canvas::{AssetKind, Canvas, DrawOp, FrameStyle, RecordingCanvas};
pub use error::{RendererError, RendererResult};
pub use measure::{FontRegistry, HeuristicMeasurer, TextMeasurer};
pub use parser::parse_card;
pub use render::render_card;
pub use symbols::SymbolCache;
pub use types::{
    BattleCard, Card, CardBase, Chapter, FrameColor, LoyaltyAbility, PlaneswalkerCard, Rarity,
    SagaCard, StandardCard,
};

/// Parse a card description and render it in one step.
///
/// Returns the parsed record so callers can inspect what was drawn.
pub fn render_from_text<C: Canvas>(text: &str, canvas: &mut C) -> RendererResult<Card> {
    let card = parse_card(text)?;
    render::render_card(&card, canvas);
    Ok(card)
}
