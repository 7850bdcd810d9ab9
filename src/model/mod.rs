pub mod occurrence;
pub mod selector;
pub mod span;

pub use occurrence::ClassOccurrence;
pub use selector::SelectorSet;
pub use span::Span;
