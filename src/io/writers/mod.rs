pub mod json;
pub mod markdown;
pub mod terminal;

pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
pub use terminal::TerminalWriter;

/// Placeholder for values that do not apply, e.g. ROI with no scenario cost.
pub(crate) const NOT_APPLICABLE: &str = "—";
