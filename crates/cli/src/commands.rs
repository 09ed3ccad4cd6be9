// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Subcommands. Each one calls a single workspace operation and returns
//! the result as JSON; no business rules live here.

use atelier_api::{ApiError, ContractPatch, InvoicePatch, NewContract, NewInvoice, Workspace};
use atelier_domain::{
    ClientDetails, ContractStatus, DocumentKind, Invoice, InvoiceStatus,
    LineItemInput, NewPaymentMethod, ProfileUpdate, ScopeItemInput,
};
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use time::Date;
use time::macros::format_description;

/// Errors reported by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{resource} '{id}' not found")]
    Missing { resource: &'static str, id: String },

    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// A stable category name for logs and exit handling.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Api(err) => err.kind(),
            Self::Missing { .. } => "not_found",
            Self::Output(_) => "output",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show or edit the business profile
    #[command(subcommand)]
    Profile(ProfileAction),

    /// Manage clients
    #[command(subcommand)]
    Client(ClientAction),

    /// Manage invoices
    #[command(subcommand)]
    Invoice(InvoiceAction),

    /// Manage contracts
    #[command(subcommand)]
    Contract(ContractAction),
}

#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// Print the profile
    Show,
    /// Change profile fields
    Set(ProfileSetArgs),
    /// Register a payment method
    PaymentAdd(PaymentMethodArgs),
    /// Remove a payment method
    PaymentRm { id: String },
    /// Make a payment method the default
    PaymentDefault { id: String },
}

#[derive(Debug, Args)]
pub struct ProfileSetArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    tax_id: Option<String>,
    /// Invoice number template, e.g. `INV-{YY}{MM}{DD}-{####}`
    #[arg(long)]
    invoice_format: Option<String>,
    /// Contract number template
    #[arg(long)]
    contract_format: Option<String>,
    #[arg(long)]
    invoice_terms: Option<String>,
    #[arg(long)]
    contract_terms: Option<String>,
}

impl From<ProfileSetArgs> for ProfileUpdate {
    fn from(args: ProfileSetArgs) -> Self {
        Self {
            name: args.name,
            address: args.address,
            email: args.email,
            phone: args.phone,
            tax_id: args.tax_id,
            invoice_number_format: args.invoice_format,
            contract_number_format: args.contract_format,
            default_invoice_terms: args.invoice_terms,
            default_contract_terms: args.contract_terms,
        }
    }
}

#[derive(Debug, Args)]
pub struct PaymentMethodArgs {
    #[arg(long)]
    label: String,
    #[arg(long, default_value = "")]
    bank: String,
    #[arg(long, default_value = "")]
    account: String,
    #[arg(long, default_value = "")]
    holder: String,
    /// Make this the default payment method
    #[arg(long)]
    default: bool,
}

#[derive(Debug, Subcommand)]
pub enum ClientAction {
    /// Add a client
    Add(ClientAddArgs),
    /// List clients by name
    List,
    /// Show one client
    Show { id: String },
    /// Delete a client and unlink its draft documents
    Rm { id: String },
}

#[derive(Debug, Args)]
pub struct ClientAddArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    company: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    address: String,
    #[arg(long, default_value = "")]
    notes: String,
}

#[derive(Debug, Subcommand)]
pub enum InvoiceAction {
    /// Create a numbered draft invoice
    New(InvoiceNewArgs),
    /// Edit a draft invoice
    Edit(InvoiceEditArgs),
    /// List invoices, newest first
    List {
        #[arg(long)]
        client: Option<String>,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        status: Option<InvoiceStatus>,
    },
    /// Show one invoice with its effective due date
    Show { id: String },
    /// Mark a draft as sent
    Send { id: String },
    /// Mark a sent invoice as paid
    Pay { id: String },
    /// Cancel a draft or sent invoice
    Cancel { id: String },
    /// Delete a draft invoice
    Rm { id: String },
    /// Show the number the next invoice would get
    Preview,
    /// List sent invoices past their due date
    Overdue,
}

#[derive(Debug, Args)]
pub struct InvoiceNewArgs {
    #[arg(long)]
    client: Option<String>,
    #[arg(long)]
    project: Option<String>,
    /// Line item as NAME:QUANTITY:UNIT_PRICE (repeatable)
    #[arg(long = "item", value_parser = parse_line_item)]
    items: Vec<LineItemInput>,
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    adjustments: i64,
    /// Due date (YYYY-MM-DD); defaults to 30 days after creation
    #[arg(long, value_parser = parse_date)]
    due: Option<Date>,
    #[arg(long, default_value = "")]
    notes: String,
    #[arg(long)]
    payment_method: Option<String>,
}

#[derive(Debug, Args)]
pub struct InvoiceEditArgs {
    id: String,
    /// Replacement line items as NAME:QUANTITY:UNIT_PRICE (repeatable)
    #[arg(long = "item", value_parser = parse_line_item)]
    items: Vec<LineItemInput>,
    #[arg(long, allow_hyphen_values = true)]
    adjustments: Option<i64>,
    #[arg(long, value_parser = parse_date)]
    due: Option<Date>,
    #[arg(long)]
    notes: Option<String>,
    #[arg(long, conflicts_with = "clear_client")]
    client: Option<String>,
    /// Remove the client link
    #[arg(long)]
    clear_client: bool,
    #[arg(long)]
    project: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ContractAction {
    /// Create a numbered draft contract
    New(ContractNewArgs),
    /// Edit a draft contract
    Edit(ContractEditArgs),
    /// List contracts, newest first
    List {
        #[arg(long)]
        client: Option<String>,
        #[arg(long)]
        project: Option<String>,
        #[arg(long)]
        status: Option<ContractStatus>,
    },
    /// Show one contract
    Show { id: String },
    /// Mark a draft as sent
    Send { id: String },
    /// Mark a sent contract as signed
    Sign { id: String },
    /// Return a sent contract to draft
    Revert { id: String },
    /// Cancel a draft or sent contract
    Cancel { id: String },
    /// Delete a draft contract
    Rm { id: String },
    /// Show the number the next contract would get
    Preview,
}

#[derive(Debug, Args)]
pub struct ContractNewArgs {
    #[arg(long)]
    client: Option<String>,
    #[arg(long)]
    project: Option<String>,
    /// Scope item description (repeatable)
    #[arg(long = "scope")]
    scope: Vec<String>,
    /// Terms; defaults to the profile's contract terms
    #[arg(long)]
    terms: Option<String>,
    #[arg(long, default_value = "")]
    notes: String,
}

#[derive(Debug, Args)]
pub struct ContractEditArgs {
    id: String,
    /// Replacement scope items (repeatable)
    #[arg(long = "scope")]
    scope: Vec<String>,
    #[arg(long)]
    terms: Option<String>,
    #[arg(long)]
    notes: Option<String>,
    #[arg(long, conflicts_with = "clear_client")]
    client: Option<String>,
    #[arg(long)]
    clear_client: bool,
    #[arg(long)]
    project: Option<String>,
}

impl Command {
    /// Runs the command against `workspace` and returns its JSON output.
    ///
    /// # Errors
    ///
    /// Returns the workspace error, or `Missing` when a shown record does
    /// not exist.
    pub fn execute(self, workspace: &Workspace) -> Result<Value, CliError> {
        match self {
            Self::Profile(action) => action.execute(workspace),
            Self::Client(action) => action.execute(workspace),
            Self::Invoice(action) => action.execute(workspace),
            Self::Contract(action) => action.execute(workspace),
        }
    }
}

impl ProfileAction {
    fn execute(self, workspace: &Workspace) -> Result<Value, CliError> {
        let profile = workspace.profile();
        match self {
            Self::Show => render(&profile.get()?),
            Self::Set(args) => render(&profile.update(args.into())?),
            Self::PaymentAdd(args) => render(&profile.add_payment_method(NewPaymentMethod {
                label: args.label,
                bank_name: args.bank,
                account_number: args.account,
                account_holder: args.holder,
                is_default: args.default,
            })?),
            Self::PaymentRm { id } => render(&profile.remove_payment_method(&id)?),
            Self::PaymentDefault { id } => {
                profile.set_default_payment_method(&id)?;
                render(&profile.get()?)
            }
        }
    }
}

impl ClientAction {
    fn execute(self, workspace: &Workspace) -> Result<Value, CliError> {
        let clients = workspace.clients();
        match self {
            Self::Add(args) => render(&clients.create(ClientDetails {
                name: args.name,
                company: args.company,
                email: args.email,
                phone: args.phone,
                address: args.address,
                notes: args.notes,
            })?),
            Self::List => render(&clients.list()?),
            Self::Show { id } => {
                let client = clients.get(&id)?.ok_or(CliError::Missing {
                    resource: "Client",
                    id,
                })?;
                render(&client)
            }
            Self::Rm { id } => {
                clients.delete(&id)?;
                Ok(json!({ "deleted": id }))
            }
        }
    }
}

impl InvoiceAction {
    fn execute(self, workspace: &Workspace) -> Result<Value, CliError> {
        let invoices = workspace.invoices();
        let today = workspace.clock().today();
        match self {
            Self::New(args) => render(&invoices.create(NewInvoice {
                client_id: args.client,
                project_id: args.project,
                line_items: args.items,
                adjustments: args.adjustments,
                due_date: args.due,
                notes: args.notes,
                payment_method_id: args.payment_method,
            })?),
            Self::Edit(args) => {
                let client_id = if args.clear_client {
                    Some(None)
                } else {
                    args.client.map(Some)
                };
                let patch = InvoicePatch {
                    client_id,
                    project_id: args.project.map(Some),
                    line_items: (!args.items.is_empty()).then_some(args.items),
                    adjustments: args.adjustments,
                    due_date: args.due.map(Some),
                    notes: args.notes,
                };
                render(&invoices.update(&args.id, patch)?)
            }
            Self::List {
                client,
                project,
                status,
            } => {
                let mut found = match (&client, &project, status) {
                    (Some(client), _, _) => invoices.by_client(client)?,
                    (None, Some(project), _) => invoices.by_project(project)?,
                    (None, None, Some(status)) => invoices.by_status(status)?,
                    (None, None, None) => invoices.all()?,
                };
                found.retain(|invoice| {
                    project
                        .as_deref()
                        .is_none_or(|p| invoice.project_id.as_deref() == Some(p))
                        && status.is_none_or(|s| invoice.status == s)
                });
                render(&found)
            }
            Self::Show { id } => {
                let invoice = invoices.get(&id)?.ok_or(CliError::Missing {
                    resource: "Invoice",
                    id,
                })?;
                describe_invoice(&invoice, today)
            }
            Self::Send { id } => render(&invoices.mark_sent(&id)?),
            Self::Pay { id } => render(&invoices.mark_paid(&id)?),
            Self::Cancel { id } => render(&invoices.cancel(&id)?),
            Self::Rm { id } => {
                invoices.delete(&id)?;
                Ok(json!({ "deleted": id }))
            }
            Self::Preview => Ok(json!({
                "kind": DocumentKind::Invoice.as_str(),
                "next": workspace.sequences().preview(DocumentKind::Invoice)?,
            })),
            Self::Overdue => render(&invoices.overdue(today)?),
        }
    }
}

impl ContractAction {
    fn execute(self, workspace: &Workspace) -> Result<Value, CliError> {
        let contracts = workspace.contracts();
        match self {
            Self::New(args) => render(&contracts.create(NewContract {
                client_id: args.client,
                project_id: args.project,
                scope: scope_inputs(args.scope),
                terms: args.terms,
                notes: args.notes,
            })?),
            Self::Edit(args) => {
                let client_id = if args.clear_client {
                    Some(None)
                } else {
                    args.client.map(Some)
                };
                let patch = ContractPatch {
                    client_id,
                    project_id: args.project.map(Some),
                    scope: (!args.scope.is_empty()).then(|| scope_inputs(args.scope)),
                    terms: args.terms,
                    notes: args.notes,
                };
                render(&contracts.update(&args.id, patch)?)
            }
            Self::List {
                client,
                project,
                status,
            } => {
                let mut found = match (&client, &project, status) {
                    (Some(client), _, _) => contracts.by_client(client)?,
                    (None, Some(project), _) => contracts.by_project(project)?,
                    (None, None, Some(status)) => contracts.by_status(status)?,
                    (None, None, None) => contracts.all()?,
                };
                found.retain(|contract| {
                    project
                        .as_deref()
                        .is_none_or(|p| contract.project_id.as_deref() == Some(p))
                        && status.is_none_or(|s| contract.status == s)
                });
                render(&found)
            }
            Self::Show { id } => {
                let contract = contracts.get(&id)?.ok_or(CliError::Missing {
                    resource: "Contract",
                    id,
                })?;
                render(&contract)
            }
            Self::Send { id } => render(&contracts.mark_sent(&id)?),
            Self::Sign { id } => render(&contracts.mark_signed(&id)?),
            Self::Revert { id } => render(&contracts.revert_to_draft(&id)?),
            Self::Cancel { id } => render(&contracts.cancel(&id)?),
            Self::Rm { id } => {
                contracts.delete(&id)?;
                Ok(json!({ "deleted": id }))
            }
            Self::Preview => Ok(json!({
                "kind": DocumentKind::Contract.as_str(),
                "next": workspace.sequences().preview(DocumentKind::Contract)?,
            })),
        }
    }
}

fn render<T: Serialize>(value: &T) -> Result<Value, CliError> {
    Ok(serde_json::to_value(value)?)
}

/// The stored invoice plus its derived due date and overdue flag.
fn describe_invoice(invoice: &Invoice, today: Date) -> Result<Value, CliError> {
    let mut value = render(invoice)?;
    if let Some(fields) = value.as_object_mut() {
        fields.insert(
            String::from("effectiveDueDate"),
            json!(invoice.effective_due_date().to_string()),
        );
        fields.insert(
            String::from("overdue"),
            json!(invoice.is_overdue(today)),
        );
    }
    Ok(value)
}

fn scope_inputs(descriptions: Vec<String>) -> Vec<ScopeItemInput> {
    descriptions
        .into_iter()
        .map(|description| ScopeItemInput {
            id: None,
            description,
        })
        .collect()
}

/// Parses a `YYYY-MM-DD` date argument.
///
/// # Errors
///
/// Returns a message if the text is not a valid calendar date.
pub fn parse_date(value: &str) -> Result<Date, String> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|err| format!("invalid date '{value}': {err}"))
}

/// Parses a `NAME:QUANTITY:UNIT_PRICE` line item argument. The name may
/// itself contain colons.
///
/// # Errors
///
/// Returns a message if a part is missing or a number does not parse.
pub fn parse_line_item(value: &str) -> Result<LineItemInput, String> {
    let mut parts = value.rsplitn(3, ':');
    let (Some(price), Some(quantity), Some(name)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!(
            "expected NAME:QUANTITY:UNIT_PRICE, got '{value}'"
        ));
    };

    let quantity: u32 = quantity
        .trim()
        .parse()
        .map_err(|err| format!("invalid quantity '{quantity}': {err}"))?;
    let unit_price: i64 = price
        .trim()
        .parse()
        .map_err(|err| format!("invalid unit price '{price}': {err}"))?;

    Ok(LineItemInput {
        id: None,
        item_name: name.trim().to_string(),
        description: String::new(),
        quantity,
        unit_price,
    })
}
