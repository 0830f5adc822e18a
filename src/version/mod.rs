//! Ebuild version parsing and ordering
//!
//! A version flows one way through this module: an ebuild path is parsed
//! into a [`VersionString`], which splits its `PVR` into a [`VersionCore`]
//! (dotted numbers plus an optional letter) and a [`VersionSuffix`]
//! (`_alpha`/`_beta`/`_pre`/`_rc`/`_p` tokens plus `-rN`). Parsed versions
//! are collected per package in a [`VersionSet`].
//!
//! ```text
//! foo-1.2_rc1-r2.ebuild ──▶ VersionString ──▶ VersionSet
//!                              │                 (front/back/find)
//!                    ┌─────────┴─────────┐
//!                    ▼                   ▼
//!               VersionCore        VersionSuffix
//!                  1.2               _rc1 -r2
//! ```
//!
//! # Modules
//!
//! - [`number`]: unbounded numbers used by every numeric field
//! - [`plain`]: plain version part and its ordering
//! - [`suffix`]: suffix tokens, revision and their ordering
//! - [`string`]: whole version parsed from an ebuild filename
//! - [`set`]: sorted, de-duplicated versions of one package
//! - [`scanner`]: directory enumeration behind `assign`/`append`
//! - [`error`]: error type shared by the above

pub mod error;
pub mod number;
pub mod plain;
pub mod scanner;
pub mod set;
pub mod string;
pub mod suffix;

pub use error::VersionError;
pub use number::VersionNumber;
pub use plain::VersionCore;
pub use scanner::{EbuildSource, FsEbuildSource};
pub use set::VersionSet;
pub use string::VersionString;
pub use suffix::{SuffixKind, SuffixToken, VersionSuffix};
