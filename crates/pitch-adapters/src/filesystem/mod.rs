//! File writer adapters.

mod local;
mod memory;

pub use local::LocalWriter;
pub use memory::{MemoryWriter, StoredFile};
