//! Session cache mirroring the remote collections.
//!
//! Every mutation goes to the store first; the local copy changes only after
//! the store accepts it.

mod reports;
mod scan;

use chrono::NaiveDate;
use uuid::Uuid;

use sparkreceipt_core::calendar::{self, build_month_grid, CalendarMonth, GridOptions, MonthGrid};
use sparkreceipt_core::invoice::apply_payment;
use sparkreceipt_core::records::{
    validate_business_profile, validate_category, validate_client, validate_event,
    validate_expense, validate_income, validate_invoice, validate_payment, BusinessProfile,
    BusinessProfilePatch, CalendarEvent, CalendarEventPatch, Client, ClientPatch, Expense,
    ExpenseCategory, ExpensePatch, IncomeEntry, IncomeEntryPatch, Invoice, InvoicePatch,
    NewBusinessProfile, NewCalendarEvent, NewClient, NewExpense, NewExpenseCategory,
    NewIncomeEntry, NewInvoice, NewPayment, Payment, ReviewStatus,
};
use sparkreceipt_core::stats::{
    compute_dashboard_stats, monthly_summary, DashboardStats, MonthlySummary,
};
use sparkreceipt_core::storage::{Collection, Record, RecordStore, SelectQuery};

use crate::error::{ClientError, Result};

/// Everything loaded for the signed-in account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionData {
    pub profile: Option<BusinessProfile>,
    pub clients: Vec<Client>,
    pub invoices: Vec<Invoice>,
    pub expenses: Vec<Expense>,
    pub income: Vec<IncomeEntry>,
    pub events: Vec<CalendarEvent>,
    pub categories: Vec<ExpenseCategory>,
    pub payments: Vec<Payment>,
}

/// A record kept in one of the session's lists.
pub trait Cached: Record {
    fn list(data: &mut SessionData) -> &mut Vec<Self>;

    /// Where a newly created record goes. Newest first unless overridden.
    fn place(list: &mut Vec<Self>, record: Self) {
        list.insert(0, record);
    }
}

impl Cached for Client {
    fn list(data: &mut SessionData) -> &mut Vec<Self> {
        &mut data.clients
    }
}

impl Cached for Invoice {
    fn list(data: &mut SessionData) -> &mut Vec<Self> {
        &mut data.invoices
    }
}

impl Cached for Expense {
    fn list(data: &mut SessionData) -> &mut Vec<Self> {
        &mut data.expenses
    }
}

impl Cached for IncomeEntry {
    fn list(data: &mut SessionData) -> &mut Vec<Self> {
        &mut data.income
    }
}

impl Cached for Payment {
    fn list(data: &mut SessionData) -> &mut Vec<Self> {
        &mut data.payments
    }
}

impl Cached for CalendarEvent {
    fn list(data: &mut SessionData) -> &mut Vec<Self> {
        &mut data.events
    }

    fn place(list: &mut Vec<Self>, record: Self) {
        calendar::insert_sorted(list, record);
    }
}

impl Cached for ExpenseCategory {
    fn list(data: &mut SessionData) -> &mut Vec<Self> {
        &mut data.categories
    }

    fn place(list: &mut Vec<Self>, record: Self) {
        let index = list.partition_point(|c| c.name <= record.name);
        list.insert(index, record);
    }
}

/// Stateful view over a [`RecordStore`].
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    data: SessionData,
}

impl<S: RecordStore> Session<S> {
    /// An empty session; call [`Session::refresh`] to load it.
    pub fn new(store: S) -> Self {
        Self {
            store,
            data: SessionData::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn profile(&self) -> Option<&BusinessProfile> {
        self.data.profile.as_ref()
    }

    pub fn clients(&self) -> &[Client] {
        &self.data.clients
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.data.invoices
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.data.expenses
    }

    pub fn income(&self) -> &[IncomeEntry] {
        &self.data.income
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.data.events
    }

    pub fn categories(&self) -> &[ExpenseCategory] {
        &self.data.categories
    }

    pub fn payments(&self) -> &[Payment] {
        &self.data.payments
    }

    /// Loads every collection concurrently. On failure nothing is replaced.
    pub async fn refresh(&mut self) -> Result<()> {
        let store = &self.store;
        let profile_query = SelectQuery::new().limit(1);
        let clients_query = SelectQuery::all(Collection::Clients);
        let invoices_query = SelectQuery::all(Collection::Invoices);
        let expenses_query = SelectQuery::all(Collection::Expenses);
        let income_query = SelectQuery::all(Collection::IncomeEntries);
        let events_query = SelectQuery::all(Collection::Events);
        let categories_query = SelectQuery::all(Collection::ExpenseCategories);
        let payments_query = SelectQuery::all(Collection::Payments);

        let loaded = tokio::try_join!(
            store.select::<BusinessProfile>(&profile_query),
            store.select::<Client>(&clients_query),
            store.select::<Invoice>(&invoices_query),
            store.select::<Expense>(&expenses_query),
            store.select::<IncomeEntry>(&income_query),
            store.select::<CalendarEvent>(&events_query),
            store.select::<ExpenseCategory>(&categories_query),
            store.select::<Payment>(&payments_query),
        );

        let (profile, clients, invoices, expenses, income, events, categories, payments) =
            loaded.inspect_err(|e| tracing::error!(error = %e, "Failed to refresh session"))?;

        self.data = SessionData {
            profile: profile.into_iter().next(),
            clients,
            invoices,
            expenses,
            income,
            events,
            categories,
            payments,
        };

        tracing::debug!(
            clients = self.data.clients.len(),
            invoices = self.data.invoices.len(),
            expenses = self.data.expenses.len(),
            "Session refreshed"
        );
        Ok(())
    }

    async fn create<T: Cached>(&mut self, new: &T::New) -> Result<T> {
        let record: T = self.store.insert(new).await.inspect_err(|e| {
            tracing::error!(
                collection = %T::COLLECTION,
                error = %e,
                "Failed to create record"
            )
        })?;
        T::place(T::list(&mut self.data), record.clone());
        Ok(record)
    }

    async fn modify<T: Cached>(&mut self, id: Uuid, patch: &T::Patch) -> Result<T> {
        let record: T = self.store.update(id, patch).await.inspect_err(|e| {
            tracing::error!(
                collection = %T::COLLECTION,
                %id,
                error = %e,
                "Failed to update record"
            )
        })?;
        if let Some(cached) = T::list(&mut self.data).iter_mut().find(|r| r.id() == id) {
            *cached = record.clone();
        }
        Ok(record)
    }

    async fn remove<T: Cached>(&mut self, id: Uuid) -> Result<()> {
        self.store.delete::<T>(id).await.inspect_err(|e| {
            tracing::error!(
                collection = %T::COLLECTION,
                %id,
                error = %e,
                "Failed to delete record"
            )
        })?;
        T::list(&mut self.data).retain(|r| r.id() != id);
        Ok(())
    }

    // Business profile

    /// Creates the profile when the account has none yet.
    pub async fn create_business_profile(
        &mut self,
        new: NewBusinessProfile,
    ) -> Result<BusinessProfile> {
        validate_business_profile(&new)?;
        let profile: BusinessProfile = self.store.insert(&new).await.inspect_err(|e| {
            tracing::error!(
                collection = %Collection::BusinessProfile,
                error = %e,
                "Failed to create record"
            )
        })?;
        self.data.profile = Some(profile.clone());
        Ok(profile)
    }

    /// Updates the loaded profile.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when no profile has been loaded.
    pub async fn update_business_profile(
        &mut self,
        patch: BusinessProfilePatch,
    ) -> Result<BusinessProfile> {
        let id = self
            .data
            .profile
            .as_ref()
            .map(|p| p.id)
            .ok_or_else(|| ClientError::NotFound {
                resource: Collection::BusinessProfile.to_string(),
            })?;

        let profile: BusinessProfile = self.store.update(id, &patch).await.inspect_err(|e| {
            tracing::error!(
                collection = %Collection::BusinessProfile,
                %id,
                error = %e,
                "Failed to update record"
            )
        })?;
        self.data.profile = Some(profile.clone());
        Ok(profile)
    }

    // Clients

    pub async fn add_client(&mut self, new: NewClient) -> Result<Client> {
        validate_client(&new)?;
        self.create(&new).await
    }

    pub async fn update_client(&mut self, id: Uuid, patch: ClientPatch) -> Result<Client> {
        self.modify(id, &patch).await
    }

    pub async fn delete_client(&mut self, id: Uuid) -> Result<()> {
        self.remove::<Client>(id).await
    }

    // Invoices

    pub async fn add_invoice(&mut self, new: NewInvoice) -> Result<Invoice> {
        validate_invoice(&new)?;
        self.create(&new).await
    }

    pub async fn update_invoice(&mut self, id: Uuid, patch: InvoicePatch) -> Result<Invoice> {
        self.modify(id, &patch).await
    }

    pub async fn delete_invoice(&mut self, id: Uuid) -> Result<()> {
        self.remove::<Invoice>(id).await
    }

    // Expenses

    pub async fn add_expense(&mut self, new: NewExpense) -> Result<Expense> {
        validate_expense(&new)?;
        self.create(&new).await
    }

    pub async fn update_expense(&mut self, id: Uuid, patch: ExpensePatch) -> Result<Expense> {
        self.modify(id, &patch).await
    }

    /// Marks a scanned expense as approved, rejected or back to pending.
    pub async fn review_expense(&mut self, id: Uuid, status: ReviewStatus) -> Result<Expense> {
        self.modify(id, &ExpensePatch::review(status)).await
    }

    pub async fn delete_expense(&mut self, id: Uuid) -> Result<()> {
        self.remove::<Expense>(id).await
    }

    // Income

    pub async fn add_income(&mut self, new: NewIncomeEntry) -> Result<IncomeEntry> {
        validate_income(&new)?;
        self.create(&new).await
    }

    pub async fn update_income(
        &mut self,
        id: Uuid,
        patch: IncomeEntryPatch,
    ) -> Result<IncomeEntry> {
        self.modify(id, &patch).await
    }

    pub async fn delete_income(&mut self, id: Uuid) -> Result<()> {
        self.remove::<IncomeEntry>(id).await
    }

    // Events

    pub async fn add_event(&mut self, new: NewCalendarEvent) -> Result<CalendarEvent> {
        validate_event(&new)?;
        self.create(&new).await
    }

    pub async fn update_event(
        &mut self,
        id: Uuid,
        patch: CalendarEventPatch,
    ) -> Result<CalendarEvent> {
        self.modify(id, &patch).await
    }

    pub async fn delete_event(&mut self, id: Uuid) -> Result<()> {
        self.remove::<CalendarEvent>(id).await
    }

    // Categories

    pub async fn add_category(&mut self, new: NewExpenseCategory) -> Result<ExpenseCategory> {
        validate_category(&new)?;
        self.create(&new).await
    }

    // Payments

    /// Records a payment and, when it references a loaded invoice, updates
    /// that invoice's paid amount, balance and status.
    pub async fn add_payment(&mut self, new: NewPayment) -> Result<Payment> {
        validate_payment(&new)?;
        let payment: Payment = self.create(&new).await?;

        let invoice_patch = payment
            .invoice_id
            .and_then(|id| self.data.invoices.iter().find(|i| i.id == id))
            .map(|invoice| apply_payment(invoice, payment.amount).map(|p| (invoice.id, p)))
            .transpose()?;

        if let Some((invoice_id, patch)) = invoice_patch {
            self.update_invoice(invoice_id, patch).await?;
        }
        Ok(payment)
    }

    // Derived views

    pub fn dashboard_stats(&self, today: NaiveDate) -> DashboardStats {
        compute_dashboard_stats(
            &self.data.expenses,
            &self.data.income,
            &self.data.invoices,
            &self.data.events,
            today,
        )
    }

    /// Income and expense totals for one month.
    pub fn monthly_summary(&self, month: CalendarMonth) -> MonthlySummary {
        monthly_summary(
            &self.data.expenses,
            &self.data.income,
            month.year,
            month.month,
        )
    }

    pub fn month_grid(&self, month: CalendarMonth, options: GridOptions) -> Result<MonthGrid> {
        Ok(build_month_grid(
            month,
            &self.data.events,
            &self.data.invoices,
            options,
        )?)
    }

    pub fn upcoming_events(&self, today: NaiveDate, limit: usize) -> Vec<&CalendarEvent> {
        calendar::upcoming_events(&self.data.events, today, limit)
    }
}
