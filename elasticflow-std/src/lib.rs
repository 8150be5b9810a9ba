//! Standard library of elastic buffering and flow-control units.

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

use elasticflow::*;

mod buffer_skid;
pub mod credit;
mod delay;
mod demux;
pub mod fifo;
mod fork;
mod join;
mod memory;
mod mux;
mod selector;
pub mod sim;
pub mod stall_smoother;
mod transition;
mod unidir;
pub mod valid_ready;

pub use buffer_skid::*;
pub use credit::{CreditBuffer, CreditConfig, CreditState};
pub use delay::*;
pub use demux::*;
pub use fifo::{CircularFifo, Fifo, FifoConfig, FifoState};
pub use fork::*;
pub use join::*;
pub use memory::*;
pub use mux::*;
pub use selector::*;
pub use stall_smoother::{SmootherMode, StallSmoother, StallSmootherConfig, StallSmootherState};
pub use transition::*;
pub use unidir::*;
pub use valid_ready::*;
