pub mod classref_config;
pub mod path_matcher;

pub use classref_config::{ClassAttributeConfig, ClassRefConfig, CONFIG_FILE_NAME};
pub use path_matcher::PathMatcher;
