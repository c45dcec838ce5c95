pub mod files;
pub mod io;

pub use files::{FsError, LocalFile, content_type_for, extension_of};
pub use io::atomic_write_str;
