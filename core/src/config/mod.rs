//! Config is split into:
//! - `types.rs` (data structures + defaults)
//! - `load.rs`  (IO: file lookup + env overrides)

pub mod load;
mod types;

pub use load::{load_default, load_from, ENV_BASE_URL, ENV_LOG, ENV_TIMEOUT_MS};
pub use types::*;
