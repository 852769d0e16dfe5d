pub mod merge;
pub mod placeholder;
pub mod summary;

pub use merge::merge_targets;
pub use placeholder::{is_placeholder, placeholder_text, write_placeholder, PLACEHOLDER_MARKER};
pub use summary::{print_summary, summary_json};
