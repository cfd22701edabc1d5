//! Plain-text rendering of store state.

use std::fmt::Write as _;

use employee_core::{Employee, LoadStatus, StoreState};

use crate::view::ListView;

/// Two-letter avatar initials, uppercased.
pub fn initials(employee: &Employee) -> String {
    employee
        .first_name
        .chars()
        .take(1)
        .chain(employee.last_name.chars().take(1))
        .flat_map(char::to_uppercase)
        .collect()
}

/// The list screen: error banner, status line, then one row per employee.
pub fn render_list(state: &StoreState, view: &ListView) -> String {
    let mut out = String::new();
    if let Some(err) = &state.error {
        let _ = writeln!(out, "Error: {}", err.message());
    }
    match state.status {
        LoadStatus::NotLoaded => {
            let _ = writeln!(out, "Not loaded.");
            return out;
        }
        LoadStatus::Loading => {
            let _ = writeln!(out, "Loading...");
            return out;
        }
        LoadStatus::Failed if state.employees.is_empty() => return out,
        _ => {}
    }
    if state.employees.is_empty() {
        let _ = writeln!(out, "No employees found.");
        return out;
    }

    let _ = writeln!(out, "    {:>5}  {:<2}  {:<28}  {:<32}  {}", "ID", "", "NAME", "EMAIL", "ROLE");
    for employee in &state.employees {
        let mark = if view.is_selected(employee.id) { "[x]" } else { "[ ]" };
        let name = format!("{} {}", employee.first_name, employee.last_name);
        let _ = writeln!(
            out,
            "{mark} {:>5}  {:<2}  {:<28}  {:<32}  {}",
            employee.id,
            initials(employee),
            name,
            employee.email,
            employee.role
        );
    }
    let _ = writeln!(out, "{} employee(s)", state.employees.len());
    out
}

/// A single record, one field per line.
pub fn render_employee(employee: &Employee) -> String {
    format!(
        "ID:         {}\nFirst name: {}\nLast name:  {}\nEmail:      {}\nRole:       {}\n",
        employee.id, employee.first_name, employee.last_name, employee.email, employee.role
    )
}
