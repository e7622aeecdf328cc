//! Process exit codes, taken from BSD `sysexits.h`.

/// Bad command line, including a worker count that is not a positive integer
pub const USAGE: i32 = 64;

/// Input file missing or not a regular file
pub const NOINPUT: i32 = 66;

/// Worker failure, worker panic or thread pool start failure
pub const SOFTWARE: i32 = 70;

/// Any other read or write failure
pub const IOERR: i32 = 74;

/// Invalid settings in a config file or `PARHUFF_*` variable
pub const CONFIG: i32 = 78;
