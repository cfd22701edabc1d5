//! Client-side copy of the employee collection.
//!
//! # Design
//! `EmployeeStore` owns the collection, its load status and the last error,
//! and changes them only through its five operations. Updates are
//! pessimistic: the collection moves only after the service confirms a
//! request, so there is nothing to roll back on failure.
//!
//! State sits in a `tokio::sync::watch` channel. Every transition (pending,
//! succeeded, failed) is one `send_modify`, so subscribers see each step and
//! no lock is held across a network call. Operations take `&self`; when two
//! are in flight, each reconciles against the collection as it stands when
//! its own response arrives, and the later response wins.

use std::collections::HashSet;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::remote::RemoteService;
use crate::transport::Transport;
use crate::types::{Employee, EmployeeChanges, EmployeeId, EmployeeRecord, NewEmployee};

/// Load status of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

/// Store operations, as reported in `StoreState::pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchAll,
    Add,
    Edit,
    RemoveOne,
    RemoveMany,
}

/// Everything a view needs to render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub employees: Vec<Employee>,
    pub status: LoadStatus,
    pub error: Option<ApiError>,
    /// Operations issued but not yet resolved, in issue order.
    pub pending: Vec<Operation>,
}

impl StoreState {
    pub fn find(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EmployeeId) -> bool {
        self.find(id).is_some()
    }

    pub fn is_pending(&self, op: Operation) -> bool {
        self.pending.contains(&op)
    }

    fn resolve(&mut self, op: Operation) {
        if let Some(pos) = self.pending.iter().position(|p| *p == op) {
            self.pending.remove(pos);
        }
    }
}

pub struct EmployeeStore<T> {
    remote: RemoteService<T>,
    state: watch::Sender<StoreState>,
}

impl<T: Transport> EmployeeStore<T> {
    pub fn new(remote: RemoteService<T>) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self { remote, state }
    }

    pub fn remote(&self) -> &RemoteService<T> {
        &self.remote
    }

    /// A receiver that is notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Replace the collection with the service's full list.
    ///
    /// On failure the status becomes `Failed` and the previous collection is
    /// kept as it was.
    pub async fn fetch_all(&self) -> Result<(), ApiError> {
        self.state.send_modify(|s| {
            s.status = LoadStatus::Loading;
            s.error = None;
            s.pending.push(Operation::FetchAll);
        });
        match self.remote.list_all().await {
            Ok(employees) => {
                info!(count = employees.len(), "employees loaded");
                self.complete(Operation::FetchAll, |s| {
                    s.employees = employees;
                    s.status = LoadStatus::Loaded;
                });
                Ok(())
            }
            Err(err) => Err(self.fail(Operation::FetchAll, err)),
        }
    }

    /// Create an employee and append the service's record to the collection.
    pub async fn add(&self, input: NewEmployee) -> Result<Employee, ApiError> {
        self.begin(Operation::Add);
        let record = EmployeeRecord::from(input);
        match self.remote.create(&record).await {
            Ok(employee) => {
                info!(id = employee.id, "employee added");
                self.complete(Operation::Add, |s| {
                    match s.employees.iter().position(|e| e.id == employee.id) {
                        Some(index) => s.employees[index] = employee.clone(),
                        None => s.employees.push(employee.clone()),
                    }
                });
                Ok(employee)
            }
            Err(err) => Err(self.fail(Operation::Add, err)),
        }
    }

    /// Replace every field of `id`. An unchanged password goes out masked.
    ///
    /// If the updated record is not in the collection (a stale list), the
    /// collection is left alone and the server's record is still returned.
    pub async fn edit(&self, id: EmployeeId, changes: EmployeeChanges) -> Result<Employee, ApiError> {
        self.begin(Operation::Edit);
        let record = changes.into_record(id);
        match self.remote.update(id, &record).await {
            Ok(employee) => {
                let mut replaced = false;
                self.complete(Operation::Edit, |s| {
                    if let Some(existing) = s.employees.iter_mut().find(|e| e.id == employee.id) {
                        *existing = employee.clone();
                        replaced = true;
                    }
                });
                if replaced {
                    info!(id = employee.id, "employee updated");
                } else {
                    warn!(id = employee.id, "updated employee is not in the collection, left unchanged");
                }
                Ok(employee)
            }
            Err(err) => Err(self.fail(Operation::Edit, err)),
        }
    }

    pub async fn remove_one(&self, id: EmployeeId) -> Result<(), ApiError> {
        self.begin(Operation::RemoveOne);
        match self.remote.delete_one(id).await {
            Ok(()) => {
                info!(id, "employee deleted");
                self.complete(Operation::RemoveOne, |s| s.employees.retain(|e| e.id != id));
                Ok(())
            }
            Err(err) => Err(self.fail(Operation::RemoveOne, err)),
        }
    }

    /// Delete every id in `ids` with a single batch request.
    pub async fn remove_many(&self, ids: &[EmployeeId]) -> Result<(), ApiError> {
        self.begin(Operation::RemoveMany);
        match self.remote.delete_many(ids).await {
            Ok(()) => {
                info!(count = ids.len(), "employees batch deleted");
                let removed: HashSet<EmployeeId> = ids.iter().copied().collect();
                self.complete(Operation::RemoveMany, |s| {
                    s.employees.retain(|e| !removed.contains(&e.id))
                });
                Ok(())
            }
            Err(err) => Err(self.fail(Operation::RemoveMany, err)),
        }
    }

    fn begin(&self, op: Operation) {
        self.state.send_modify(|s| s.pending.push(op));
    }

    fn complete(&self, op: Operation, apply: impl FnOnce(&mut StoreState)) {
        self.state.send_modify(|s| {
            s.resolve(op);
            apply(s);
        });
    }

    fn fail(&self, op: Operation, err: ApiError) -> ApiError {
        warn!(?op, error = %err, "request failed");
        self.state.send_modify(|s| {
            s.resolve(op);
            if op == Operation::FetchAll {
                s.status = LoadStatus::Failed;
            }
            s.error = Some(err.clone());
        });
        err
    }
}
