//! Output format identifiers.
//!
//! Report generation only ever offers a fixed whitelist of formats,
//! regardless of what converters are registered: portable-document and
//! rich-text. Other formats an installation might register (e.g. for
//! bulk exports) are deliberately not offered through the report facade
//! to avoid ambiguous rendering.

/// Portable document format MIME type.
pub const PDF_TYPE: &str = "application/pdf";
/// Portable document format file extension.
pub const PDF_EXT: &str = "pdf";

/// Rich text format MIME type.
pub const RTF_TYPE: &str = "application/rtf";
/// Rich text format file extension.
pub const RTF_EXT: &str = "rtf";

/// The formats a report may be generated in.
pub const REPORT_TYPES: [&str; 2] = [PDF_TYPE, RTF_TYPE];

/// Returns the file extension for a whitelisted report MIME type.
pub fn extension(mime_type: &str) -> Option<&'static str> {
    match mime_type {
        PDF_TYPE => Some(PDF_EXT),
        RTF_TYPE => Some(RTF_EXT),
        _ => None,
    }
}

/// Checks whether a MIME type is on the report whitelist.
pub fn is_report_type(mime_type: &str) -> bool {
    REPORT_TYPES.contains(&mime_type)
}
