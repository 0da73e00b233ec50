//! sparkreceipt CLI entry point.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use chrono::{Datelike, NaiveDate};
use clap::Parser;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sparkreceipt_client::cli::calendar::CalendarCommand;
use sparkreceipt_client::cli::categories::{CategoriesAction, CategoriesCommand};
use sparkreceipt_client::cli::clients::{ClientsAction, ClientsCommand};
use sparkreceipt_client::cli::events::{EventsAction, EventsCommand};
use sparkreceipt_client::cli::expenses::{ExpensesAction, ExpensesCommand};
use sparkreceipt_client::cli::income::{IncomeAction, IncomeCommand};
use sparkreceipt_client::cli::invoices::{InvoicesAction, InvoicesCommand};
use sparkreceipt_client::cli::payments::{PaymentsAction, PaymentsCommand};
use sparkreceipt_client::cli::profile::{ProfileAction, ProfileCommand};
use sparkreceipt_client::cli::reports::{ReportRange, ReportsAction, ReportsCommand};
use sparkreceipt_client::cli::{Cli, Commands, OutputFormat};
use sparkreceipt_client::output::{pretty, render};
use sparkreceipt_client::{Session, SparkReceiptClient};
use sparkreceipt_core::calendar::{events_on, CalendarMonth, GridOptions};
use sparkreceipt_core::functions::report_file_name;
use sparkreceipt_core::invoice::{overdue_invoices, subtotal, InvoiceDraft};
use sparkreceipt_core::records::{
    expenses_for_client, filter_clients, filter_expenses, filter_invoices, filter_receipts,
    find_category_by_name, find_client, invoices_for_client, BusinessProfilePatch,
    CalendarEventPatch, ClientFilter, ClientPatch, ExpenseFilter, ExpensePatch,
    IncomeEntryPatch, InvoiceFilter, NewBusinessProfile, NewCalendarEvent, NewClient,
    NewExpense, NewExpenseCategory, NewIncomeEntry, NewPayment,
};
use sparkreceipt_core::stats::{resolve_report_range, ReportFilter};

type AppSession = Session<SparkReceiptClient>;

/// Output settings shared by every command.
struct Printer {
    format: OutputFormat,
    quiet: bool,
    today: NaiveDate,
}

impl Printer {
    fn print<T, F>(&self, value: &T, pretty: F)
    where
        T: serde::Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        println!("{}", render(value, self.format, pretty));
    }

    /// Status notes go to stderr; stdout carries only command output.
    fn note(&self, message: impl std::fmt::Display) {
        let _ = self.write_note(&mut io::stderr().lock(), message);
    }

    fn write_note<W: Write>(
        &self,
        out: &mut W,
        message: impl std::fmt::Display,
    ) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(out, "{}", message)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "sparkreceipt=warn" } else { "sparkreceipt=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = SparkReceiptClient::new(cli.client_config()?)?;
    let mut session = Session::new(client);
    session.refresh().await.context("failed to load account data")?;

    let out = Printer {
        format: cli.format,
        quiet: cli.quiet,
        today: cli.today(),
    };

    match cli.command {
        Commands::Dashboard => {
            let stats = session.dashboard_stats(out.today);
            let month = session.monthly_summary(CalendarMonth::containing(out.today));
            let upcoming = session.upcoming_events(out.today, 5);
            let value = json!({ "stats": stats, "this_month": month, "upcoming_events": upcoming });
            out.print(&value, |_| pretty::format_dashboard(&stats, &month, &upcoming));
        }
        Commands::Calendar(cmd) => calendar(&session, cmd, &out)?,
        Commands::Clients(cmd) => clients(&mut session, cmd, &out).await?,
        Commands::Invoices(cmd) => invoices(&mut session, cmd, &out).await?,
        Commands::Expenses(cmd) => expenses(&mut session, cmd, &out).await?,
        Commands::Income(cmd) => income(&mut session, cmd, &out).await?,
        Commands::Events(cmd) => events(&mut session, cmd, &out).await?,
        Commands::Categories(cmd) => categories(&mut session, cmd, &out).await?,
        Commands::Payments(cmd) => payments(&mut session, cmd, &out).await?,
        Commands::Profile(cmd) => profile(&mut session, cmd, &out).await?,
        Commands::Scan {
            file,
            save,
            client_id,
            notes,
        } => scan(&mut session, file, save, client_id, notes, &out).await?,
        Commands::Reports(cmd) => reports(&session, cmd, &out).await?,
    }

    Ok(())
}

fn calendar(session: &AppSession, cmd: CalendarCommand, out: &Printer) -> anyhow::Result<()> {
    let month = match cmd.date {
        Some(date) => CalendarMonth::containing(date),
        None => CalendarMonth::new(
            cmd.year.unwrap_or(out.today.year()),
            cmd.month.unwrap_or(out.today.month()),
        )?,
    };
    let month = if cmd.previous {
        month.previous()
    } else if cmd.next {
        month.next()
    } else {
        month
    };
    let options = if cmd.include_paid {
        GridOptions::including_paid()
    } else {
        GridOptions::default()
    };
    let grid = session.month_grid(month, options)?;

    match cmd.date {
        Some(date) => out.print(grid.items_for(date), |items| pretty::format_day(date, items)),
        None => out.print(&grid, pretty::format_month_grid),
    }
    Ok(())
}

async fn clients(
    session: &mut AppSession,
    cmd: ClientsCommand,
    out: &Printer,
) -> anyhow::Result<()> {
    match cmd.action {
        ClientsAction::List { search, status } => {
            let filter = ClientFilter {
                search,
                payment_status: status.map(Into::into),
            };
            let list = filter_clients(session.clients(), &filter);
            out.print(&list, |l| pretty::format_clients(l));
        }
        ClientsAction::Add {
            name,
            email,
            phone,
            address,
            city,
            state,
            zip,
            event_date,
            event_type,
            venue,
            services,
            contract_amount,
            notes,
        } => {
            let contract_amount = contract_amount.unwrap_or_else(|| subtotal(&services));
            let new = NewClient {
                email,
                phone,
                address,
                city,
                state,
                zip,
                event_date,
                event_type,
                venue,
                notes,
                services_booked: services,
                contract_amount,
                balance_due: contract_amount,
                ..NewClient::new(name)
            };
            let client = session.add_client(new).await?;
            out.print(&client, |c| format!("Created:\n{}", pretty::format_client(c)));
        }
        ClientsAction::Get { id } => {
            let client = find_client(session.clients(), id)
                .ok_or_else(|| anyhow!("client {id} not found"))?;
            let invoices = invoices_for_client(session.invoices(), id);
            let expenses = expenses_for_client(session.expenses(), id);
            let value = json!({ "client": client, "invoices": invoices, "expenses": expenses });
            out.print(&value, |_| {
                pretty::format_client_detail(client, &invoices, &expenses, out.today)
            });
        }
        ClientsAction::Update {
            id,
            name,
            email,
            phone,
            event_date,
            event_type,
            venue,
            contract_amount,
            status,
            notes,
        } => {
            let mut patch = ClientPatch {
                name,
                email,
                phone,
                event_date,
                event_type,
                venue,
                payment_status: status.map(Into::into),
                notes,
                ..ClientPatch::default()
            };
            if let Some(contract_amount) = contract_amount {
                let client = find_client(session.clients(), id)
                    .ok_or_else(|| anyhow!("client {id} not found"))?;
                patch = patch.with_contract_amount(contract_amount, client);
            }
            if patch.is_empty() {
                bail!("nothing to update");
            }
            let client = session.update_client(id, patch).await?;
            out.print(&client, |c| format!("Updated:\n{}", pretty::format_client(c)));
        }
        ClientsAction::Delete { id } => {
            session.delete_client(id).await?;
            out.note(format!("Deleted client {}", id));
        }
    }
    Ok(())
}

async fn invoices(
    session: &mut AppSession,
    cmd: InvoicesCommand,
    out: &Printer,
) -> anyhow::Result<()> {
    match cmd.action {
        InvoicesAction::List {
            search,
            invoice_type,
            status,
        } => {
            let filter = InvoiceFilter {
                search,
                invoice_type: invoice_type.map(Into::into),
                status: status.map(Into::into),
            };
            let list = filter_invoices(session.invoices(), session.clients(), &filter);
            out.print(&list, |l| pretty::format_invoices(l, session.clients(), out.today));
        }
        InvoicesAction::Create {
            invoice_type,
            client_id,
            issue_date,
            due_date,
            lines,
            tax_rate,
            number,
            notes,
            terms,
        } => {
            let mut draft = InvoiceDraft::new(invoice_type.into(), issue_date.unwrap_or(out.today))
                .with_tax_rate(tax_rate)?;
            if let Some(id) = client_id {
                let client = find_client(session.clients(), id)
                    .ok_or_else(|| anyhow!("client {id} not found"))?;
                draft = draft.with_client(client);
            }
            if !lines.is_empty() {
                draft.line_items = lines;
            }
            if draft.line_items.is_empty() {
                bail!("an invoice needs at least one --line or a client with booked services");
            }
            draft.invoice_number = number;
            if let Some(due_date) = due_date {
                draft = draft.with_due_date(due_date);
            }
            if let Some(notes) = notes {
                draft = draft.with_notes(notes);
            }
            if let Some(terms) = terms {
                draft = draft.with_terms(terms);
            }

            let invoice = session.add_invoice(draft.into_new()).await?;
            let client_name = invoice
                .client_id
                .and_then(|id| find_client(session.clients(), id))
                .map(|c| c.name.as_str());
            out.print(&invoice, |i| {
                format!("Created:\n{}", pretty::format_invoice(i, client_name, out.today))
            });
        }
        InvoicesAction::Get { id } => {
            let invoice = session
                .invoices()
                .iter()
                .find(|i| i.id == id)
                .ok_or_else(|| anyhow!("invoice {id} not found"))?;
            let client_name = invoice
                .client_id
                .and_then(|cid| find_client(session.clients(), cid))
                .map(|c| c.name.as_str());
            out.print(invoice, |i| pretty::format_invoice(i, client_name, out.today));
        }
        InvoicesAction::Update {
            id,
            lines,
            due_date,
            tax_rate,
            notes,
        } => {
            let invoice = session
                .invoices()
                .iter()
                .find(|i| i.id == id)
                .ok_or_else(|| anyhow!("invoice {id} not found"))?;
            let mut draft = InvoiceDraft::from_invoice(invoice);
            if !lines.is_empty() {
                draft.line_items = lines;
            }
            if let Some(rate) = tax_rate {
                draft = draft.with_tax_rate(rate)?;
            }
            if due_date.is_some() {
                draft.due_date = due_date;
            }
            if notes.is_some() {
                draft.notes = notes;
            }

            let invoice = session.update_invoice(id, draft.into_patch()).await?;
            out.print(&invoice, |i| {
                format!("Updated:\n{}", pretty::format_invoice(i, None, out.today))
            });
        }
        InvoicesAction::Delete { id } => {
            session.delete_invoice(id).await?;
            out.note(format!("Deleted invoice {}", id));
        }
        InvoicesAction::Overdue => {
            let list = overdue_invoices(session.invoices(), out.today);
            out.print(&list, |l| pretty::format_invoices(l, session.clients(), out.today));
        }
    }
    Ok(())
}

async fn expenses(
    session: &mut AppSession,
    cmd: ExpensesCommand,
    out: &Printer,
) -> anyhow::Result<()> {
    match cmd.action {
        ExpensesAction::List {
            search,
            category,
            review_status,
            start,
            end,
            min_amount,
            max_amount,
            sort_by,
            ascending,
            receipts,
        } => {
            let filter = ExpenseFilter {
                search,
                category_name: category,
                review_status: review_status.map(Into::into),
                start,
                end,
                min_amount,
                max_amount,
                sort_by: sort_by.into(),
                ascending,
            };
            let list = if receipts {
                filter_receipts(session.expenses(), &filter)
            } else {
                filter_expenses(session.expenses(), &filter)
            };
            out.print(&list, |l| pretty::format_expenses(l));
        }
        ExpensesAction::Add {
            amount,
            date,
            merchant,
            category,
            tax,
            payment_method,
            client_id,
            notes,
            not_deductible,
        } => {
            let mut new = NewExpense::manual(amount, date.unwrap_or(out.today));
            if let Some(merchant) = merchant {
                new = new.with_merchant(merchant);
            }
            if let Some(name) = category {
                let category = find_category_by_name(session.categories(), &name)
                    .ok_or_else(|| anyhow!("unknown category {name:?}"))?;
                new = new.with_category(category);
            }
            if let Some(tax) = tax {
                new = new.with_tax(tax);
            }
            if payment_method.is_some() {
                new.payment_method = payment_method;
            }
            new.client_id = client_id;
            new.notes = notes;
            new.is_tax_deductible = !not_deductible;

            let expense = session.add_expense(new).await?;
            out.print(&expense, |e| format!("Created:\n{}", pretty::format_expense(e)));
        }
        ExpensesAction::Review { id, status } => {
            let expense = session.review_expense(id, status.into()).await?;
            out.print(&expense, |e| format!("Reviewed:\n{}", pretty::format_expense(e)));
        }
        ExpensesAction::Update {
            id,
            amount,
            date,
            merchant,
            category,
            notes,
        } => {
            let mut patch = ExpensePatch {
                total_amount: amount,
                transaction_date: date,
                merchant_name: merchant,
                notes,
                ..ExpensePatch::default()
            };
            if let Some(name) = category {
                let category = find_category_by_name(session.categories(), &name)
                    .ok_or_else(|| anyhow!("unknown category {name:?}"))?;
                patch.category_id = Some(category.id);
                patch.category_name = Some(category.name.clone());
                patch.irs_category = category.irs_category.clone();
            }
            if patch.is_empty() {
                bail!("nothing to update");
            }
            let expense = session.update_expense(id, patch).await?;
            out.print(&expense, |e| format!("Updated:\n{}", pretty::format_expense(e)));
        }
        ExpensesAction::Delete { id } => {
            session.delete_expense(id).await?;
            out.note(format!("Deleted expense {}", id));
        }
    }
    Ok(())
}

async fn income(session: &mut AppSession, cmd: IncomeCommand, out: &Printer) -> anyhow::Result<()> {
    match cmd.action {
        IncomeAction::List { start, end } => {
            let list: Vec<_> = session
                .income()
                .iter()
                .filter(|entry| {
                    start.is_none_or(|s| entry.income_date.is_some_and(|d| d >= s))
                        && end.is_none_or(|e| entry.income_date.is_some_and(|d| d <= e))
                })
                .collect();
            out.print(&list, |l| pretty::format_income(l));
        }
        IncomeAction::Add {
            amount,
            date,
            description,
            source,
            category,
            client_id,
            invoice_id,
            payment_method,
            notes,
            recurring,
        } => {
            let new = NewIncomeEntry {
                description,
                source_name: source,
                category,
                client_id,
                invoice_id,
                payment_method,
                notes,
                is_recurring: recurring,
                ..NewIncomeEntry::new(amount, date.unwrap_or(out.today))
            };
            let entry = session.add_income(new).await?;
            out.print(&entry, |e| format!("Created:\n{}", pretty::format_income_entry(e)));
        }
        IncomeAction::Update {
            id,
            amount,
            date,
            description,
            notes,
        } => {
            let patch = IncomeEntryPatch {
                amount,
                income_date: date,
                description,
                notes,
                ..IncomeEntryPatch::default()
            };
            if patch.is_empty() {
                bail!("nothing to update");
            }
            let entry = session.update_income(id, patch).await?;
            out.print(&entry, |e| format!("Updated:\n{}", pretty::format_income_entry(e)));
        }
        IncomeAction::Delete { id } => {
            session.delete_income(id).await?;
            out.note(format!("Deleted income entry {}", id));
        }
    }
    Ok(())
}

async fn events(session: &mut AppSession, cmd: EventsCommand, out: &Printer) -> anyhow::Result<()> {
    match cmd.action {
        EventsAction::List => {
            let list: Vec<_> = session.events().iter().collect();
            out.print(&list, |l| pretty::format_events(l));
        }
        EventsAction::Upcoming { limit } => {
            let list = session.upcoming_events(out.today, limit);
            out.print(&list, |l| pretty::format_events(l));
        }
        EventsAction::On { date } => {
            let list = events_on(session.events(), date);
            out.print(&list, |l| pretty::format_events(l));
        }
        EventsAction::Add {
            title,
            date,
            start_time,
            end_time,
            event_type,
            client_id,
            location,
            color,
            description,
            payment_due,
        } => {
            let mut new = NewCalendarEvent {
                description,
                start_time,
                end_time,
                event_type,
                client_id,
                location,
                is_payment_due: payment_due,
                ..NewCalendarEvent::new(title, date)
            };
            if let Some(color) = color {
                new = new.with_color(color);
            }
            let event = session.add_event(new).await?;
            out.print(&event, |e| format!("Created:\n{}", pretty::format_event(e)));
        }
        EventsAction::Update {
            id,
            title,
            date,
            start_time,
            end_time,
            location,
            color,
            status,
        } => {
            let patch = CalendarEventPatch {
                title,
                event_date: date,
                start_time,
                end_time,
                location,
                color,
                status: status.map(Into::into),
                ..CalendarEventPatch::default()
            };
            if patch.is_empty() {
                bail!("nothing to update");
            }
            let event = session.update_event(id, patch).await?;
            out.print(&event, |e| format!("Updated:\n{}", pretty::format_event(e)));
        }
        EventsAction::Delete { id } => {
            session.delete_event(id).await?;
            out.note(format!("Deleted event {}", id));
        }
    }
    Ok(())
}

async fn categories(
    session: &mut AppSession,
    cmd: CategoriesCommand,
    out: &Printer,
) -> anyhow::Result<()> {
    match cmd.action {
        CategoriesAction::List => {
            out.print(session.categories(), pretty::format_categories);
        }
        CategoriesAction::Add {
            name,
            color,
            icon,
            irs_category,
        } => {
            let mut new = NewExpenseCategory {
                color,
                icon,
                ..NewExpenseCategory::expense(name)
            };
            if let Some(irs) = irs_category {
                new = new.with_irs_category(irs);
            }
            let category = session.add_category(new).await?;
            out.print(&category, |c| format!("Created category {}", c.name));
        }
    }
    Ok(())
}

async fn payments(
    session: &mut AppSession,
    cmd: PaymentsCommand,
    out: &Printer,
) -> anyhow::Result<()> {
    match cmd.action {
        PaymentsAction::List { invoice_id } => {
            let list: Vec<_> = session
                .payments()
                .iter()
                .filter(|p| invoice_id.is_none_or(|id| p.invoice_id == Some(id)))
                .collect();
            out.print(&list, |l| pretty::format_payments(l));
        }
        PaymentsAction::Add {
            invoice_id,
            amount,
            date,
            method,
            reference,
            notes,
        } => {
            let invoice = session
                .invoices()
                .iter()
                .find(|i| i.id == invoice_id)
                .ok_or_else(|| anyhow!("invoice {invoice_id} not found"))?;
            let mut new = NewPayment::for_invoice(invoice, amount, date.unwrap_or(out.today));
            if let Some(method) = method {
                new = new.with_method(method);
            }
            new.reference = reference;
            new.notes = notes;

            let payment = session.add_payment(new).await?;
            let invoice = session.invoices().iter().find(|i| i.id == invoice_id);
            let value = json!({ "payment": payment, "invoice": invoice });
            out.print(&value, |_| {
                let mut text = format!("Recorded:\n{}", pretty::format_payments(&[&payment]));
                if let Some(invoice) = invoice {
                    text.push_str(&format!(
                        "\n{} is now {} with {} left",
                        invoice.invoice_number,
                        invoice.status.label(),
                        pretty::money(invoice.balance_due)
                    ));
                }
                text
            });
        }
    }
    Ok(())
}

async fn profile(
    session: &mut AppSession,
    cmd: ProfileCommand,
    out: &Printer,
) -> anyhow::Result<()> {
    match cmd.action {
        ProfileAction::Show => {
            out.print(&session.profile(), |p| match p {
                Some(profile) => pretty::format_profile(profile),
                None => "No business profile set.".to_string(),
            });
        }
        ProfileAction::Create { name, fields } => {
            let new = NewBusinessProfile {
                business_name: name,
                address: fields.address,
                city: fields.city,
                state: fields.state,
                zip: fields.zip,
                phone: fields.phone,
                email: fields.email,
                website: fields.website,
            };
            let profile = session.create_business_profile(new).await?;
            out.print(&profile, |p| format!("Created:\n{}", pretty::format_profile(p)));
        }
        ProfileAction::Update {
            name,
            fields,
            logo_url,
        } => {
            let patch = BusinessProfilePatch {
                business_name: name,
                address: fields.address,
                city: fields.city,
                state: fields.state,
                zip: fields.zip,
                phone: fields.phone,
                email: fields.email,
                website: fields.website,
                logo_url,
            };
            if patch.is_empty() {
                bail!("nothing to update");
            }
            let profile = session.update_business_profile(patch).await?;
            out.print(&profile, |p| format!("Updated:\n{}", pretty::format_profile(p)));
        }
    }
    Ok(())
}

async fn scan(
    session: &mut AppSession,
    file: PathBuf,
    save: bool,
    client_id: Option<uuid::Uuid>,
    notes: Option<String>,
    out: &Printer,
) -> anyhow::Result<()> {
    let image = tokio::fs::read(&file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow!("{} has no usable file name", file.display()))?;

    let mut draft = session
        .scan_receipt(session.store(), file_name, image, out.today)
        .await?;
    if client_id.is_some() {
        draft.client_id = client_id;
    }
    if notes.is_some() {
        draft.notes = notes;
    }

    if save {
        let expense = session.add_expense(draft).await?;
        out.print(&expense, |e| format!("Saved:\n{}", pretty::format_expense(e)));
    } else {
        out.print(&draft, pretty::format_expense_draft);
        if !out.quiet {
            eprintln!("Not saved. Run again with --save to keep it.");
        }
    }
    Ok(())
}

fn report_filter(range: ReportRange, today: NaiveDate) -> anyhow::Result<ReportFilter> {
    let resolved = resolve_report_range(range.period.into(), range.start, range.end, today)?;
    Ok(ReportFilter::new(resolved).with_categories(range.categories))
}

async fn reports(session: &AppSession, cmd: ReportsCommand, out: &Printer) -> anyhow::Result<()> {
    match cmd.action {
        ReportsAction::Show { range } => {
            let filter = report_filter(range, out.today)?;
            let report = session.report_data(&filter);
            out.print(&report, pretty::format_report);
        }
        ReportsAction::Export {
            range,
            report_format,
            output,
        } => {
            let filter = report_filter(range, out.today)?;
            let payload = session
                .generate_report(session.store(), report_format.into(), &filter)
                .await?;
            let path = output
                .unwrap_or_else(|| PathBuf::from(report_file_name(filter.range, payload.format())));
            tokio::fs::write(&path, payload.to_text())
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            out.note(format!("Wrote {}", path.display()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printer(quiet: bool) -> Printer {
        Printer {
            format: OutputFormat::Json,
            quiet,
            today: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        }
    }

    #[test]
    fn test_notes_use_their_own_stream() {
        let mut notes = Vec::new();
        printer(false)
            .write_note(&mut notes, "Deleted client 42")
            .unwrap();
        assert_eq!(String::from_utf8(notes).unwrap(), "Deleted client 42\n");
    }

    #[test]
    fn test_quiet_suppresses_notes() {
        let mut notes = Vec::new();
        printer(true).write_note(&mut notes, "Deleted client 42").unwrap();
        assert!(notes.is_empty());
    }
}
