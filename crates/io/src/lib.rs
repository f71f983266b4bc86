// File I/O operations

pub mod json;
pub mod native;

/// Native .heat format version
/// Increment when schema changes in a way that old versions can't read
pub const NATIVE_FORMAT_VERSION: u32 = 1;
