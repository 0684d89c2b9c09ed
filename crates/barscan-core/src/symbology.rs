//! Code formats and the ordered allow-list a scan is restricted to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A barcode / 2-D code format.
///
/// Names follow the zbar convention (`QRCODE`, `EAN13`, `I25`, ...), which is
/// also how they are printed and serialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Symbology {
    Codabar,
    Code128,
    Code39,
    Code93,
    Composite,
    Databar,
    DatabarExp,
    Ean13,
    Ean2,
    Ean5,
    Ean8,
    I25,
    Isbn10,
    Isbn13,
    Qrcode,
    Upca,
    Upce,
}

/// The allow-list every scan uses unless a caller builds its own set.
pub const DEFAULT_SYMBOLOGIES: [Symbology; 17] = [
    Symbology::Codabar,
    Symbology::Code128,
    Symbology::Code39,
    Symbology::Code93,
    Symbology::Composite,
    Symbology::Databar,
    Symbology::DatabarExp,
    Symbology::Ean13,
    Symbology::Ean2,
    Symbology::Ean5,
    Symbology::Ean8,
    Symbology::I25,
    Symbology::Isbn10,
    Symbology::Isbn13,
    Symbology::Qrcode,
    Symbology::Upca,
    Symbology::Upce,
];

impl Symbology {
    pub const fn name(self) -> &'static str {
        match self {
            Symbology::Codabar => "CODABAR",
            Symbology::Code128 => "CODE128",
            Symbology::Code39 => "CODE39",
            Symbology::Code93 => "CODE93",
            Symbology::Composite => "COMPOSITE",
            Symbology::Databar => "DATABAR",
            Symbology::DatabarExp => "DATABAR_EXP",
            Symbology::Ean13 => "EAN13",
            Symbology::Ean2 => "EAN2",
            Symbology::Ean5 => "EAN5",
            Symbology::Ean8 => "EAN8",
            Symbology::I25 => "I25",
            Symbology::Isbn10 => "ISBN10",
            Symbology::Isbn13 => "ISBN13",
            Symbology::Qrcode => "QRCODE",
            Symbology::Upca => "UPCA",
            Symbology::Upce => "UPCE",
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed, ordered set of allowed symbologies.
///
/// Insertion order is preserved and duplicates are dropped, so iteration is
/// deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbologySet {
    items: Vec<Symbology>,
}

impl SymbologySet {
    pub fn new(items: impl IntoIterator<Item = Symbology>) -> Self {
        let mut out: Vec<Symbology> = Vec::new();
        for sym in items {
            if !out.contains(&sym) {
                out.push(sym);
            }
        }
        Self { items: out }
    }

    pub fn contains(&self, symbology: Symbology) -> bool {
        self.items.contains(&symbology)
    }

    pub fn iter(&self) -> impl Iterator<Item = Symbology> + '_ {
        self.items.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for SymbologySet {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOLOGIES)
    }
}
