//! Headless view-model for the list and form screens.
//!
//! # Design
//! Views hold only ephemeral state (checked rows, form field values) and talk
//! to an `EmployeeStore` they are handed; nothing here outlives a screen.
//! Destructive actions go through a `Confirm` gate before the store is
//! called at all.

use std::collections::BTreeSet;

use employee_core::{
    ApiError, Employee, EmployeeChanges, EmployeeId, EmployeeStore, LoadStatus, NewEmployee, Role,
    Transport,
};
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Page load: fetch only if nothing has been requested yet.
pub async fn load_if_needed<T: Transport>(store: &EmployeeStore<T>) -> Result<(), ApiError> {
    if store.snapshot().status == LoadStatus::NotLoaded {
        store.fetch_all().await?;
    }
    Ok(())
}

/// What happened to a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user said no at the confirmation step.
    Declined,
    /// Nothing was selected, so the batch action was unavailable.
    Disabled,
}

/// Row selection on the list screen.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    selected: BTreeSet<EmployeeId>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &BTreeSet<EmployeeId> {
        &self.selected
    }

    pub fn is_selected(&self, id: EmployeeId) -> bool {
        self.selected.contains(&id)
    }

    pub fn select(&mut self, id: EmployeeId) {
        self.selected.insert(id);
    }

    pub fn toggle(&mut self, id: EmployeeId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Select every row, or clear the selection if every row is already
    /// selected.
    pub fn toggle_all(&mut self, employees: &[Employee]) {
        let all_selected = employees.iter().all(|e| self.selected.contains(&e.id));
        if all_selected {
            self.selected.clear();
        } else {
            self.selected = employees.iter().map(|e| e.id).collect();
        }
    }

    pub fn batch_delete_enabled(&self) -> bool {
        !self.selected.is_empty()
    }

    pub async fn delete_one<T: Transport>(
        &mut self,
        store: &EmployeeStore<T>,
        id: EmployeeId,
        confirm: &mut impl Confirm,
    ) -> Result<DeleteOutcome, ApiError> {
        if !confirm.confirm("Are you sure you want to remove this employee?") {
            return Ok(DeleteOutcome::Declined);
        }
        store.remove_one(id).await?;
        self.selected.remove(&id);
        Ok(DeleteOutcome::Deleted)
    }

    /// Delete every selected row in one batch. The selection is cleared only
    /// when the batch succeeds.
    pub async fn delete_selected<T: Transport>(
        &mut self,
        store: &EmployeeStore<T>,
        confirm: &mut impl Confirm,
    ) -> Result<DeleteOutcome, ApiError> {
        if !self.batch_delete_enabled() {
            return Ok(DeleteOutcome::Disabled);
        }
        let prompt = format!(
            "Are you sure you want to delete {} employees?",
            self.selected.len()
        );
        if !confirm.confirm(&prompt) {
            return Ok(DeleteOutcome::Declined);
        }
        let ids: Vec<EmployeeId> = self.selected.iter().copied().collect();
        store.remove_many(&ids).await?;
        self.selected.clear();
        Ok(DeleteOutcome::Deleted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("email must contain '@'")]
    InvalidEmail,

    #[error("password must be at least 6 characters")]
    PasswordTooShort,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Field values of the add/edit screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub id: Option<EmployeeId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
}

impl EmployeeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fill from a stored record. The password field starts empty.
    pub fn for_existing(employee: &Employee) -> Self {
        Self {
            id: Some(employee.id),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            role: employee.role,
            password: String::new(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Input constraints only; the service does its own validation.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.first_name.trim().is_empty() {
            return Err(FormError::Required("first name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(FormError::Required("last name"));
        }
        if self.email.trim().is_empty() {
            return Err(FormError::Required("email"));
        }
        if !self.email.contains('@') {
            return Err(FormError::InvalidEmail);
        }
        match (self.is_edit(), self.password.chars().count()) {
            (false, 0) => Err(FormError::Required("password")),
            (_, n) if n > 0 && n < MIN_PASSWORD_LEN => Err(FormError::PasswordTooShort),
            _ => Ok(()),
        }
    }

    /// Create when the form has no id, edit otherwise.
    pub async fn submit<T: Transport>(&self, store: &EmployeeStore<T>) -> Result<Employee, SubmitError> {
        self.validate()?;
        let employee = match self.id {
            None => store.add(self.new_employee()).await?,
            Some(id) => store.edit(id, self.changes()).await?,
        };
        Ok(employee)
    }

    fn new_employee(&self) -> NewEmployee {
        NewEmployee {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role,
            password: self.password.clone(),
        }
    }

    fn changes(&self) -> EmployeeChanges {
        EmployeeChanges {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role,
            password: (!self.password.is_empty()).then(|| self.password.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use employee_core::testing::{employee, ScriptedTransport};
    use employee_core::{EmployeeClient, HttpMethod, RemoteService, MASKED_PASSWORD};

    use super::*;

    type Store = EmployeeStore<Arc<ScriptedTransport>>;

    async fn loaded(employees: &[Employee]) -> (Store, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new());
        let store = EmployeeStore::new(RemoteService::new(EmployeeClient::default(), transport.clone()));
        transport.push_json(200, &employees);
        store.fetch_all().await.unwrap();
        (store, transport)
    }

    fn yes() -> impl FnMut(&str) -> bool {
        |_: &str| true
    }

    fn no() -> impl FnMut(&str) -> bool {
        |_: &str| false
    }

    fn filled_form() -> EmployeeForm {
        EmployeeForm {
            id: None,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            role: Role::Admin,
            password: "engine1".to_string(),
        }
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut view = ListView::new();
        view.toggle(3);
        assert!(view.is_selected(3));
        assert!(view.batch_delete_enabled());
        view.toggle(3);
        assert!(!view.is_selected(3));
        assert!(!view.batch_delete_enabled());
    }

    #[test]
    fn toggle_all_selects_then_clears() {
        let rows = vec![employee(1, "Al", "A"), employee(2, "Bo", "B")];
        let mut view = ListView::new();
        view.toggle(1);
        view.toggle_all(&rows);
        assert_eq!(view.selected().len(), 2);
        view.toggle_all(&rows);
        assert!(view.selected().is_empty());
    }

    #[tokio::test]
    async fn declined_delete_never_reaches_the_store() {
        let (store, transport) = loaded(&[employee(1, "Al", "A")]).await;
        let mut view = ListView::new();
        let outcome = view.delete_one(&store, 1, &mut no()).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(transport.request_count(), 1);
        assert_eq!(store.snapshot().employees.len(), 1);
    }

    #[tokio::test]
    async fn delete_one_asks_first() {
        let (store, transport) = loaded(&[employee(1, "Al", "A"), employee(2, "Bo", "B")]).await;
        transport.push(204, "");
        let mut prompts = Vec::new();
        let mut view = ListView::new();
        view.toggle(1);

        let outcome = view
            .delete_one(&store, 1, &mut |p: &str| {
                prompts.push(p.to_string());
                true
            })
            .await
            .unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(prompts, vec!["Are you sure you want to remove this employee?"]);
        assert!(!view.is_selected(1));
        assert_eq!(store.snapshot().employees, vec![employee(2, "Bo", "B")]);
    }

    #[tokio::test]
    async fn batch_delete_disabled_without_selection() {
        let (store, transport) = loaded(&[employee(1, "Al", "A")]).await;
        let mut view = ListView::new();
        let outcome = view.delete_selected(&store, &mut yes()).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Disabled);
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn batch_delete_clears_selection_on_success() {
        let rows: Vec<Employee> = (1..=4).map(|id| employee(id, "E", "E")).collect();
        let (store, transport) = loaded(&rows).await;
        transport.push(204, "");
        let mut prompt = String::new();
        let mut view = ListView::new();
        view.toggle(2);
        view.toggle(4);

        let outcome = view
            .delete_selected(&store, &mut |p: &str| {
                prompt = p.to_string();
                true
            })
            .await
            .unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(prompt, "Are you sure you want to delete 2 employees?");
        assert!(view.selected().is_empty());
        let ids: Vec<_> = store.snapshot().employees.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(transport.requests()[1].body.as_deref(), Some("[2,4]"));
    }

    #[tokio::test]
    async fn batch_delete_failure_keeps_selection() {
        let (store, transport) = loaded(&[employee(1, "Al", "A"), employee(2, "Bo", "B")]).await;
        transport.push(500, "");
        let mut view = ListView::new();
        view.toggle_all(&store.snapshot().employees);

        let err = view.delete_selected(&store, &mut yes()).await.unwrap_err();

        assert_eq!(err.message(), "Failed to batch delete");
        assert_eq!(view.selected().len(), 2);
        assert!(store.snapshot().error.is_some());
    }

    #[tokio::test]
    async fn load_if_needed_fetches_once() {
        let (store, transport) = loaded(&[]).await;
        load_if_needed(&store).await.unwrap();
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn existing_record_leaves_password_blank() {
        let form = EmployeeForm::for_existing(&employee(5, "Bo", "B"));
        assert!(form.is_edit());
        assert_eq!(form.first_name, "Bo");
        assert!(form.password.is_empty());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn new_form_defaults_to_user_role() {
        let form = EmployeeForm::new();
        assert_eq!(form.role, Role::User);
        assert!(!form.is_edit());
    }

    #[test]
    fn create_requires_password() {
        let mut form = filled_form();
        form.password.clear();
        assert_eq!(form.validate(), Err(FormError::Required("password")));
        form.password = "abc".to_string();
        assert_eq!(form.validate(), Err(FormError::PasswordTooShort));
    }

    #[test]
    fn email_needs_at_sign() {
        let mut form = filled_form();
        form.email = "ada.example.com".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidEmail));
    }

    #[tokio::test]
    async fn invalid_form_is_not_submitted() {
        let (store, transport) = loaded(&[]).await;
        let mut form = filled_form();
        form.first_name = "  ".to_string();
        let err = form.submit(&store).await.unwrap_err();
        assert!(matches!(err, SubmitError::Form(FormError::Required("first name"))));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn submit_without_id_creates() {
        let (store, transport) = loaded(&[]).await;
        let created = Employee {
            id: 40,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            role: Role::Admin,
        };
        transport.push_json(201, &created);

        let returned = filled_form().submit(&store).await.unwrap();

        assert_eq!(returned, created);
        assert_eq!(store.snapshot().employees, vec![created]);
        let sent = &transport.requests()[1];
        assert_eq!(sent.method, HttpMethod::Post);
        assert!(sent.path.ends_with("/register"));
    }

    #[tokio::test]
    async fn submit_with_id_edits_with_masked_password() {
        let original = employee(5, "Bo", "B");
        let (store, transport) = loaded(&[original.clone()]).await;
        let mut form = EmployeeForm::for_existing(&original);
        form.last_name = "Builder".to_string();
        let mut updated = original.clone();
        updated.last_name = "Builder".to_string();
        transport.push_json(200, &updated);

        form.submit(&store).await.unwrap();

        let sent = &transport.requests()[1];
        assert_eq!(sent.method, HttpMethod::Put);
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["password"], MASKED_PASSWORD);
        assert_eq!(body["lastName"], "Builder");
        assert_eq!(store.snapshot().find(5), Some(&updated));
    }

    #[tokio::test]
    async fn server_rejection_surfaces_as_api_error() {
        let (store, transport) = loaded(&[]).await;
        transport.push(400, r#"{"email":"Email should be valid"}"#);
        let err = filled_form().submit(&store).await.unwrap_err();
        match err {
            SubmitError::Api(api) => assert_eq!(api.message(), "email: Email should be valid"),
            other => panic!("expected api error, got {other:?}"),
        }
    }
}
