//! Runs one console command against a store.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use employee_core::{EmployeeStore, Transport};
use tracing::debug;

use crate::config::{AddArgs, Command, EditArgs};
use crate::render::{render_employee, render_list};
use crate::view::{load_if_needed, Confirm, DeleteOutcome, EmployeeForm, ListView};

/// Reads a y/N answer from stdin, or answers yes without asking.
pub struct StdinConfirm {
    assume_yes: bool,
}

impl StdinConfirm {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

pub async fn run<T: Transport>(
    command: Command,
    store: &EmployeeStore<T>,
    confirm: &mut impl Confirm,
    out: &mut impl Write,
) -> Result<()> {
    debug!(?command, "running command");
    match command {
        Command::List => list(store, out).await,
        Command::Show { id } => {
            let employee = store.remote().get(id).await?;
            write!(out, "{}", render_employee(&employee))?;
            Ok(())
        }
        Command::Add(args) => add(store, args, out).await,
        Command::Edit(args) => edit(store, args, out).await,
        Command::Delete { id } => {
            load_if_needed(store).await?;
            let mut view = ListView::new();
            let outcome = view.delete_one(store, id, confirm).await?;
            report(out, outcome, &format!("Deleted employee #{id}"))
        }
        Command::DeleteBatch { ids } => {
            load_if_needed(store).await?;
            let mut view = ListView::new();
            for id in ids {
                view.select(id);
            }
            let count = view.selected().len();
            let outcome = view.delete_selected(store, confirm).await?;
            report(out, outcome, &format!("Deleted {count} employee(s)"))
        }
    }
}

async fn list<T: Transport>(store: &EmployeeStore<T>, out: &mut impl Write) -> Result<()> {
    let loaded = load_if_needed(store).await;
    write!(out, "{}", render_list(&store.snapshot(), &ListView::new()))?;
    loaded?;
    Ok(())
}

async fn add<T: Transport>(store: &EmployeeStore<T>, args: AddArgs, out: &mut impl Write) -> Result<()> {
    let form = EmployeeForm {
        id: None,
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        role: args.role,
        password: args.password,
    };
    let employee = form.submit(store).await?;
    writeln!(out, "Added employee #{}", employee.id)?;
    write!(out, "{}", render_employee(&employee))?;
    Ok(())
}

async fn edit<T: Transport>(store: &EmployeeStore<T>, args: EditArgs, out: &mut impl Write) -> Result<()> {
    load_if_needed(store).await?;
    let existing = match store.snapshot().find(args.id) {
        Some(employee) => employee.clone(),
        None => store
            .remote()
            .get(args.id)
            .await
            .with_context(|| format!("employee #{} not found", args.id))?,
    };

    let mut form = EmployeeForm::for_existing(&existing);
    if let Some(first_name) = args.first_name {
        form.first_name = first_name;
    }
    if let Some(last_name) = args.last_name {
        form.last_name = last_name;
    }
    if let Some(email) = args.email {
        form.email = email;
    }
    if let Some(role) = args.role {
        form.role = role;
    }
    if let Some(password) = args.password {
        form.password = password;
    }

    let employee = form.submit(store).await?;
    writeln!(out, "Updated employee #{}", employee.id)?;
    write!(out, "{}", render_employee(&employee))?;
    Ok(())
}

fn report(out: &mut impl Write, outcome: DeleteOutcome, done: &str) -> Result<()> {
    match outcome {
        DeleteOutcome::Deleted => writeln!(out, "{done}")?,
        DeleteOutcome::Declined => writeln!(out, "Cancelled")?,
        DeleteOutcome::Disabled => bail!("nothing selected"),
    }
    Ok(())
}
