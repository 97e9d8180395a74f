// Adapters layer: concrete PassLedger backends.

pub mod jsonl;
pub mod memory;

pub use jsonl::JsonlLedger;
pub use memory::MemoryLedger;
