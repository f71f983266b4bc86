//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Codes
//!
//! | Code | Description                                   |
//! |------|-----------------------------------------------|
//! | 0    | Success                                       |
//! | 1    | General error (unspecified)                   |
//! | 2    | CLI usage error (bad args, bad date)          |
//! | 3    | Invalid format (rejected import payload)      |
//! | 4    | I/O error (cannot read or write a file)       |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant below
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unparseable dates, unknown years.
pub const EXIT_USAGE: u8 = 2;

/// Invalid format - an import payload was rejected. Nothing was
/// applied.
pub const EXIT_FORMAT: u8 = 3;

/// I/O error - a file could not be read or written.
pub const EXIT_IO: u8 = 4;
