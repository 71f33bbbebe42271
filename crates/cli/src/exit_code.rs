//! Exit code definitions for the bup CLI
//!
//! The contract is intentionally flat: a run that completes exits 0 even
//! when individual files in a folder upload failed; only hard pre-flight
//! errors (missing profile, missing folder, unreadable config) and a
//! failed single-file upload exit 1.

/// Exit codes for the bup CLI application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Run completed (partial per-file failures included)
    Success = 0,

    /// Hard pre-flight error or single-file upload failure
    GeneralError = 1,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}
