//! Filesystem abstraction for wp-composer
//!
//! Provides forward-slash path handling, atomic writes and the advisory
//! lock that serializes manifest updates across processes.

pub mod error;
pub mod io;
pub mod lock;
pub mod path;

pub use error::{Error, Result};
pub use lock::FileLock;
pub use path::NormalizedPath;
