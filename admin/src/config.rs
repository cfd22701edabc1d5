//! Command-line configuration.

use clap::{Args, Parser, Subcommand};
use employee_core::{EmployeeId, Role, DEFAULT_BASE_URL};

/// Employee administration console
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the employee service
    #[arg(long, env = "EMPLOYEE_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Skip confirmation prompts for deletes
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List all employees
    List,
    /// Show a single employee
    Show { id: EmployeeId },
    /// Register a new employee
    Add(AddArgs),
    /// Edit an employee; omitted fields keep their current value
    Edit(EditArgs),
    /// Delete one employee
    Delete { id: EmployeeId },
    /// Delete several employees in one request
    DeleteBatch {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<EmployeeId>,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AddArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value_t = Role::User)]
    pub role: Role,
    #[arg(long, env = "EMPLOYEE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EditArgs {
    pub id: EmployeeId,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub role: Option<Role>,
    /// New password; leave out to keep the current one
    #[arg(long)]
    pub password: Option<String>,
}
