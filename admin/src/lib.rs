//! Console front end for the employee service.
//!
//! # Overview
//! `view` holds the screen logic (row selection, the add/edit form,
//! confirmation gates), `render` turns store state into text, and `app`
//! maps console commands onto both. `ReqwestTransport` performs the HTTP
//! round trips that `employee-core` describes.

pub mod app;
pub mod config;
pub mod render;
pub mod transport;
pub mod view;

pub use config::{Cli, Command};
pub use transport::ReqwestTransport;
pub use view::{Confirm, DeleteOutcome, EmployeeForm, FormError, ListView, SubmitError};
