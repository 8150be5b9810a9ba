//! ElasticFlow: cycle-level models of latency-insensitive valid/ready hardware units.

// # Tries to deny all lints (`rustc -W help`).
#![deny(absolute_paths_not_starting_with_crate)]
#![deny(anonymous_parameters)]
#![deny(explicit_outlives_requirements)]
#![deny(keyword_idents)]
#![deny(macro_use_extern_crate)]
#![deny(missing_debug_implementations)]
#![deny(non_ascii_idents)]
#![deny(rust_2018_idioms)]
#![deny(trivial_numeric_casts)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(unused_extern_crates)]
#![deny(unused_import_braces)]
//
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![deny(rustdoc::invalid_html_tags)]
#![deny(rustdoc::invalid_rust_codeblocks)]
#![deny(rustdoc::bare_urls)]
//
#![allow(clippy::needless_lifetimes)]
#![allow(clippy::type_complexity)]
#![allow(elided_lifetimes_in_paths)]

mod error;
mod interface;
mod module;
mod module_chain;
mod module_fsm;
mod registered;
mod signal;
pub mod utils;

pub use error::*;
pub use interface::*;
pub use module::*;
pub use module_chain::*;
pub use module_fsm::*;
pub use registered::*;
pub use signal::*;
pub use utils::*;

static_assertions::assert_not_impl_any!(Registered<bool>: From<bool>, Default);
static_assertions::assert_impl_all!(Array<bool, 3>: Signal);
static_assertions::assert_not_impl_any!(bool: Committed);
static_assertions::assert_not_impl_any!(u64: Committed);
static_assertions::assert_not_impl_any!(Array<bool, 3>: Committed);
static_assertions::assert_not_impl_any!((bool, bool): Committed);
