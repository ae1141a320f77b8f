//! Test fixtures for the VeriLLM audit dashboard.
//!
//! Two standalone pieces, with no shared runtime:
//! - [`mock::MockLLMServer`], a stub inference endpoint for live
//!   request/response testing;
//! - [`FixtureGenerator`], a one-shot batch job that writes five
//!   self-consistent JSON documents (theme, receipt explorer, model
//!   lineage, privacy budget, export wizard) for static UI snapshots.

use std::io;
use std::path::{Path, PathBuf};

pub mod documents;
pub mod generator;
pub mod mock;
pub mod profile;

pub use generator::{FixtureGenerator, DEFAULT_OUTPUT_DIR, FIXTURE_FILES};
pub use profile::FixtureProfile;

/// Generate the canonical fixture set into `output_dir` with an
/// entropy-seeded generator.
///
/// # Errors
/// Returns the first I/O failure (directory creation or file write);
/// earlier files may already have been written.
pub fn generate_fixtures(output_dir: &Path) -> io::Result<Vec<PathBuf>> {
    FixtureGenerator::default().generate(output_dir)
}
