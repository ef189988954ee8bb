//! Byte-level table storage backends

mod file;
mod memory;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;
