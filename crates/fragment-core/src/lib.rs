// Fragment Core - shared components for the fragment tools

pub mod error;
pub mod fs;
pub mod logging;

// Re-export common types
pub use error::{ErrorKind, FragmentError, FragmentResult, IoResultExt};
