mod completion;
mod definition;

pub use completion::CompletionHandler;
pub use definition::{class_token_at, DefinitionHandler};
