//! Product picker core: catalog, persisted selection, and routine chat.

#![deny(warnings)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(dead_code)]
#![deny(non_camel_case_types)]
#![deny(unused_imports)]
#![deny(unused_variables)]
#![deny(unused_must_use)]
#![deny(non_snake_case)]
#![deny(non_upper_case_globals)]
#![deny(nonstandard_style)]
#![forbid(unsafe_op_in_unsafe_fn)]
// Clippy discipline
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::print_stdout)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::missing_const_for_fn)]
#![deny(clippy::unwrap_in_result)]
#![deny(clippy::module_inception)]
#![deny(clippy::redundant_clone)]
#![deny(clippy::shadow_unrelated)]
#![deny(clippy::too_many_arguments)]
#![deny(clippy::cognitive_complexity)]
#![deny(overflowing_literals)]
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::redundant_pub_crate,
        clippy::significant_drop_tightening
    )
)]

/// Application session object wiring every component together.
pub mod app;
/// Product catalog model and loaders.
pub mod catalog;
/// Chat transcript, remote backend and session.
#[allow(clippy::option_if_let_else)]
pub mod chat;
/// Runtime configuration.
pub mod config;
/// Top-level error type.
pub mod error;
/// Persisted product selection.
#[allow(clippy::option_if_let_else)]
pub mod selection;
/// HTTP host for the page assets.
#[allow(clippy::unused_async)]
pub mod server;
/// Entry helpers for the server binary.
pub mod start;
/// View models derived from catalog, selection and chat state.
pub mod view;

pub use app::{ConfiguredApp, Notice, PickerApp};
pub use config::PickerConfig;
pub use error::{PickerError, PickerResult};
