//! API client core for the employee administration service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A host-supplied `Transport`
//! performs each round trip; `RemoteService` glues the two together and
//! `EmployeeStore` keeps the client-side collection in step with the service.
//!
//! # Design
//! - `EmployeeClient` is stateless and holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `EmployeeStore` is an owned value; hosts construct one and hand it to
//!   their views rather than reaching for a global.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod remote;
pub mod store;
pub mod transport;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::{EmployeeClient, DEFAULT_BASE_URL};
pub use error::{ApiError, ErrorPayload};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use remote::RemoteService;
pub use store::{EmployeeStore, LoadStatus, Operation, StoreState};
pub use transport::Transport;
pub use types::{
    Employee, EmployeeChanges, EmployeeId, EmployeeRecord, NewEmployee, Role, MASKED_PASSWORD,
};
