//! The I/O seam between the core and its host.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round trip.
///
/// A non-2xx response is still `Ok`; status interpretation belongs to
/// `EmployeeClient`. `Err` means no response was obtained at all and should
/// be `ApiError::Transport`. Implementations make a single attempt with no
/// retry and no timeout.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request).await
    }
}
