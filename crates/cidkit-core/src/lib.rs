pub mod config;
pub mod error;
pub mod types;

pub use error::{CidkitError, CidkitResult};
pub use types::mime_type_for_extension;
