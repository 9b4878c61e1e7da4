pub mod engine;
pub mod local;
pub mod memory;

pub use engine::*;
pub use local::LocalStorage;
pub use memory::MemoryStorage;
