//! The remote service client: `EmployeeClient` plus a `Transport`.
//!
//! Every method is one request, one attempt. Errors are returned to the
//! caller untouched; nothing here records or retries them.

use tracing::debug;

use crate::client::EmployeeClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Employee, EmployeeId, EmployeeRecord};

#[derive(Debug, Clone)]
pub struct RemoteService<T> {
    client: EmployeeClient,
    transport: T,
}

impl<T: Transport> RemoteService<T> {
    pub fn new(client: EmployeeClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &EmployeeClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn list_all(&self) -> Result<Vec<Employee>, ApiError> {
        let response = self.send(self.client.build_list_all()).await?;
        self.client.parse_list_all(response)
    }

    pub async fn get(&self, id: EmployeeId) -> Result<Employee, ApiError> {
        let response = self.send(self.client.build_get(id)).await?;
        self.client.parse_get(response)
    }

    pub async fn create(&self, record: &EmployeeRecord) -> Result<Employee, ApiError> {
        let response = self.send(self.client.build_create(record)?).await?;
        self.client.parse_create(response)
    }

    pub async fn update(&self, id: EmployeeId, record: &EmployeeRecord) -> Result<Employee, ApiError> {
        let response = self.send(self.client.build_update(id, record)?).await?;
        self.client.parse_update(response)
    }

    pub async fn delete_one(&self, id: EmployeeId) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_one(id)).await?;
        self.client.parse_delete_one(response)
    }

    pub async fn delete_many(&self, ids: &[EmployeeId]) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_many(ids)?).await?;
        self.client.parse_delete_many(response)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request).await?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}
