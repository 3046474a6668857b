//! Keyed print attributes and the duplex mapping.

use docket_types::{MediaSize, MediaTray, PrintProperties, Sides};

/// The engine's duplex setting for a print job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplexMode {
    /// Leave duplexing to the printer's own default.
    Unknown,
    Off,
    LongEdge,
    ShortEdge,
}

/// Maps the caller's sides request to the engine's duplex setting.
///
/// Total and pure: every input, including "unspecified", maps to exactly
/// one output. The alias pairs collapse here: generic duplex means
/// long-edge binding, tumble means short-edge binding.
pub fn duplex_mode(sides: Option<Sides>) -> DuplexMode {
    match sides {
        None => DuplexMode::Unknown,
        Some(Sides::OneSided) => DuplexMode::Off,
        Some(Sides::Duplex | Sides::TwoSidedLongEdge) => DuplexMode::LongEdge,
        Some(Sides::Tumble | Sides::TwoSidedShortEdge) => DuplexMode::ShortEdge,
    }
}

/// One keyed attribute of a remote print request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintAttribute {
    /// Block until the engine has finished the job. Always sent as `true`
    /// so the copy count is accurate before the session is released.
    Wait(bool),
    CopyCount(u32),
    DuplexMode(DuplexMode),
    MediaSize(MediaSize),
    MediaTray(MediaTray),
}

/// Builds the attribute set for a print request.
///
/// `Wait`, `CopyCount` and `DuplexMode` are always present; media size
/// and tray are appended only when the caller asked for them.
pub fn print_attributes(properties: &PrintProperties) -> Vec<PrintAttribute> {
    let mut attributes = vec![
        PrintAttribute::Wait(true),
        PrintAttribute::CopyCount(properties.copies()),
        PrintAttribute::DuplexMode(duplex_mode(properties.sides())),
    ];
    if let Some(size) = properties.media_size() {
        attributes.push(PrintAttribute::MediaSize(size));
    }
    if let Some(tray) = properties.media_tray() {
        attributes.push(PrintAttribute::MediaTray(tray));
    }
    attributes
}
