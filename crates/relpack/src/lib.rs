//! relpack — manifest-driven release artifact assembler.
//!
//! One linear assemble-and-package pass per invocation:
//!
//! 1. Load and validate `zip_structure.json` from the project root.
//! 2. Copy the project tree into a disposable scratch workspace so that
//!    destructive filtering and testing never touch the original tree.
//! 3. Inside the scratch copy, delete source files not whitelisted by the
//!    clean-gate group, then run the external test suite; a failing test
//!    suite aborts the assembly.
//! 4. Resolve every manifest group against the scratch copy and write the
//!    selected files into a single ZIP archive with path remapping.
//!
//! The scratch workspace is removed on every exit path — success, test
//! failure, or mid-archive failure. The scratch root is threaded through the
//! stages as an explicit value; the process working directory is never
//! changed.
//!
//! Not a build system: no dependency graph, no incremental rebuilds, no
//! parallel execution.

pub mod assemble;
pub mod error;
pub mod exit_codes;
pub mod filter;
pub mod logging;
pub mod verify;
pub mod workspace;

pub use assemble::{run, AssembleReport};
pub use error::{EngineError, Result};
pub use exit_codes::ExitCode;
pub use workspace::ScratchWorkspace;
