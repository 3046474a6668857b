//! Print job attributes.

use serde::Deserialize;
use std::num::NonZeroU32;

/// Two-sided printing configuration requested by the caller.
///
/// `Duplex` and `TwoSidedLongEdge` are aliases for the same physical
/// behaviour, as are `Tumble` and `TwoSidedShortEdge`; both spellings are
/// kept because callers use either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sides {
    OneSided,
    Duplex,
    TwoSidedLongEdge,
    Tumble,
    TwoSidedShortEdge,
}

/// Physical media sizes a print request may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaSize {
    A4,
    A5,
    Letter,
    Legal,
    /// DL envelope, the common windowed-letter envelope size.
    EnvelopeDl,
}

/// Printer input tray selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaTray {
    Top,
    Middle,
    Bottom,
    Manual,
    Envelope,
}

/// Attributes for one print request.
///
/// Immutable value object: built once per request, never shared between
/// requests. The printer name is the only required attribute; copies
/// default to 1 and sides default to the printer's own configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintProperties {
    printer: String,
    copies: NonZeroU32,
    media_size: Option<MediaSize>,
    media_tray: Option<MediaTray>,
    sides: Option<Sides>,
}

impl PrintProperties {
    pub fn new(printer: impl Into<String>) -> Self {
        Self {
            printer: printer.into(),
            copies: NonZeroU32::MIN,
            media_size: None,
            media_tray: None,
            sides: None,
        }
    }

    pub fn with_copies(mut self, copies: NonZeroU32) -> Self {
        self.copies = copies;
        self
    }

    pub fn with_media_size(mut self, size: MediaSize) -> Self {
        self.media_size = Some(size);
        self
    }

    pub fn with_media_tray(mut self, tray: MediaTray) -> Self {
        self.media_tray = Some(tray);
        self
    }

    pub fn with_sides(mut self, sides: Sides) -> Self {
        self.sides = Some(sides);
        self
    }

    pub fn printer(&self) -> &str {
        &self.printer
    }

    pub fn copies(&self) -> u32 {
        self.copies.get()
    }

    pub fn media_size(&self) -> Option<MediaSize> {
        self.media_size
    }

    pub fn media_tray(&self) -> Option<MediaTray> {
        self.media_tray
    }

    pub fn sides(&self) -> Option<Sides> {
        self.sides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let properties = PrintProperties::new("LaserA");
        assert_eq!(properties.printer(), "LaserA");
        assert_eq!(properties.copies(), 1);
        assert_eq!(properties.media_size(), None);
        assert_eq!(properties.media_tray(), None);
        assert_eq!(properties.sides(), None);
    }

    #[test]
    fn test_builder_sets_all_attributes() {
        let properties = PrintProperties::new("LaserA")
            .with_copies(NonZeroU32::new(3).unwrap())
            .with_media_size(MediaSize::A4)
            .with_media_tray(MediaTray::Manual)
            .with_sides(Sides::TwoSidedLongEdge);
        assert_eq!(properties.copies(), 3);
        assert_eq!(properties.media_size(), Some(MediaSize::A4));
        assert_eq!(properties.media_tray(), Some(MediaTray::Manual));
        assert_eq!(properties.sides(), Some(Sides::TwoSidedLongEdge));
    }

    #[test]
    fn test_sides_deserializes_kebab_case() {
        let sides: Sides = serde_json::from_str("\"two-sided-long-edge\"").unwrap();
        assert_eq!(sides, Sides::TwoSidedLongEdge);
    }
}
