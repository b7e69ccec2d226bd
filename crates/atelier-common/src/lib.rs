pub mod errors;
pub mod id;
pub mod types;

pub use errors::{AtelierError, ConfigError, ViewerError};
pub use id::{new_id, SessionId};
pub use types::Color;

pub type Result<T> = std::result::Result<T, AtelierError>;
