//! Repository implementations for video records.

pub mod memory;
pub mod video;

pub use memory::MemoryVideoStore;
pub use video::VideoRepository;
