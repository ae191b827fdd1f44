//! Clone an OOMMF extension repository, copy its sources into the local
//! extensions tree, and record where they came from.

pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod extract;
pub mod fsops;
pub mod git;
pub mod provenance;
pub mod repo_ref;

pub use error::ExtractError;
pub use extract::{extract, ExtractMode, ExtractReport, ExtractRequest};
pub use git::{GitCli, Vcs};
pub use repo_ref::RepoRef;
