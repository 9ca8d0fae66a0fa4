//! # git-coauthor-scrub
//!
//! A CLI tool to remove `Co-authored-by: Cursor` trailers from every commit
//! message in a Git repository.
//!
//! This crate provides functionality to:
//! - Scan every commit reachable from any ref for the trailer
//! - Rewrite history with `git filter-branch`, dropping the trailer lines
//! - Prune backup refs, expire the reflog and garbage collect afterwards
//! - Re-scan the history to verify that no trailer survived
//!
//! ## Usage
//!
//! ```bash
//! # Run inside the repository to clean
//! git-coauthor-scrub
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface and main entry point
//! - [`git`] - Git command wrappers
//! - [`repo`] - Repository capabilities behind a testable trait
//! - [`scan`] - Trailer scan across all commits
//! - [`trailer`] - Commit message cleaning and the `--msg-filter` mode
//! - [`rewrite`] - Rewrite, cleanup and verification sequence
//! - [`prompt`] - User confirmation abstractions
//! - [`banner`] - Decorative CLI banner

pub mod banner;
pub mod cli;
pub mod git;
pub mod prompt;
pub mod repo;
pub mod rewrite;
pub mod scan;
pub mod trailer;
