pub mod markup;
pub mod parser;
pub mod style;

pub use markup::MarkupIndexer;
pub use parser::{MarkupDialect, MarkupParser, StyleParser};
pub use style::StyleIndexer;
