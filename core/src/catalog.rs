use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Opaque identifier of one catalog entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(u16);

impl Symbol {
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u16 {
        self.0
    }
}

const FRUITS: [&str; 24] = [
    "🍎", "🍌", "🍇", "🍓", "🍒", "🍑", "🍍", "🥝", "🍉", "🍊", "🍋", "🍐", "🥭", "🍈", "🍏", "🥥",
    "🥑", "🥕", "🌽", "🥔", "🍠", "🫐", "🍅", "🍆",
];

/// Glyph shown for a face-down card.
pub const CARD_BACK: &str = "🎀";

/// Fixed set of symbols a deck is drawn from, with the glyph of each one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Catalog {
    glyphs: Vec<Cow<'static, str>>,
}

impl Catalog {
    pub fn fruits() -> Self {
        Self {
            glyphs: FRUITS.iter().map(|&glyph| Cow::Borrowed(glyph)).collect(),
        }
    }

    pub fn from_glyphs<I, S>(glyphs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let glyphs: Vec<Cow<'static, str>> = glyphs
            .into_iter()
            .map(|glyph| Cow::Owned(glyph.into()))
            .collect();

        if glyphs.is_empty() {
            return Err(GameError::InvalidConfiguration("catalog has no symbols"));
        }
        if glyphs.len() > usize::from(u16::MAX) {
            return Err(GameError::InvalidConfiguration("catalog has too many symbols"));
        }

        Ok(Self { glyphs })
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + use<> {
        let len = u16::try_from(self.glyphs.len()).unwrap_or(u16::MAX);
        (0..len).map(Symbol)
    }

    /// Glyph of `symbol`, or `"?"` for an id outside this catalog.
    pub fn glyph(&self, symbol: Symbol) -> &str {
        self.glyphs
            .get(usize::from(symbol.0))
            .map(|glyph| glyph.as_ref())
            .unwrap_or("?")
    }
}

impl TryFrom<Vec<String>> for Catalog {
    type Error = GameError;

    fn try_from(glyphs: Vec<String>) -> Result<Self> {
        Self::from_glyphs(glyphs)
    }
}

impl From<Catalog> for Vec<String> {
    fn from(catalog: Catalog) -> Self {
        catalog.glyphs.into_iter().map(Cow::into_owned).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::fruits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn fruits_cover_the_largest_preset() {
        let catalog = Catalog::fruits();

        assert_eq!(catalog.len(), 24);
        assert!(catalog.len() >= Difficulty::Hard.config().pairs_needed());
        assert_eq!(catalog.glyph(Symbol::new(0)), "🍎");
    }

    #[test]
    fn from_glyphs_rejects_empty_list() {
        let empty: [&str; 0] = [];

        assert_eq!(
            Catalog::from_glyphs(empty),
            Err(GameError::InvalidConfiguration("catalog has no symbols"))
        );
    }

    #[test]
    fn deserializing_checks_symbol_count() {
        let glyphs = vec!["x"; usize::from(u16::MAX) + 1];
        let json = serde_json::to_string(&glyphs).unwrap();

        assert!(serde_json::from_str::<Catalog>(&json).is_err());
        assert!(serde_json::from_str::<Catalog>("[]").is_err());

        let catalog: Catalog = serde_json::from_str(r#"["A","B","C"]"#).unwrap();
        assert_eq!(catalog.symbols().count(), 3);
        assert_eq!(serde_json::to_string(&catalog).unwrap(), r#"["A","B","C"]"#);
    }

    #[test]
    fn largest_catalog_keeps_every_symbol() {
        let catalog = Catalog::from_glyphs(vec!["x"; usize::from(u16::MAX)]).unwrap();

        assert_eq!(catalog.symbols().count(), catalog.len());
    }

    #[test]
    fn unknown_symbol_has_placeholder_glyph() {
        let catalog = Catalog::from_glyphs(["A", "B"]).unwrap();

        assert_eq!(catalog.symbols().count(), 2);
        assert_eq!(catalog.glyph(Symbol::new(1)), "B");
        assert_eq!(catalog.glyph(Symbol::new(9)), "?");
    }
}
