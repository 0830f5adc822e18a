//! Portage tree helpers
//! - misc.rs: ebuild and package directory predicates
//! - find.rs: package lookup and newest-ebuild resolution across repositories

pub mod find;
pub mod misc;

pub use find::{FindError, ebuild_which, find_package_in, package_versions};
pub use misc::{is_ebuild, is_pkg_dir};
