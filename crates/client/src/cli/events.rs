//! Calendar event CLI commands.

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};
use sparkreceipt_core::records::EventStatus as CoreEventStatus;
use uuid::Uuid;

/// Event management commands.
#[derive(Debug, Parser)]
pub struct EventsCommand {
    #[command(subcommand)]
    pub action: EventsAction,
}

/// CLI event status (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EventStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl From<EventStatus> for CoreEventStatus {
    fn from(s: EventStatus) -> Self {
        match s {
            EventStatus::Scheduled => CoreEventStatus::Scheduled,
            EventStatus::Completed => CoreEventStatus::Completed,
            EventStatus::Cancelled => CoreEventStatus::Cancelled,
        }
    }
}

/// Available event actions.
#[derive(Debug, Subcommand)]
pub enum EventsAction {
    /// List all events by date.
    List,
    /// Next events from today on.
    Upcoming {
        /// Maximum number of events.
        #[arg(long, default_value = "5")]
        limit: usize,
    },
    /// Events on one day.
    On {
        /// Day (YYYY-MM-DD).
        date: NaiveDate,
    },
    /// Create an event.
    Add {
        #[arg(long)]
        title: String,
        /// Event date (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,
        /// Start time (HH:MM:SS).
        #[arg(long)]
        start_time: Option<NaiveTime>,
        /// End time (HH:MM:SS).
        #[arg(long)]
        end_time: Option<NaiveTime>,
        #[arg(long)]
        event_type: Option<String>,
        #[arg(long)]
        client_id: Option<Uuid>,
        #[arg(long)]
        location: Option<String>,
        /// Hex color, e.g. #3B82F6.
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Flag the event as a payment due date.
        #[arg(long)]
        payment_due: bool,
    },
    /// Update an event.
    Update {
        /// Event ID.
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        start_time: Option<NaiveTime>,
        #[arg(long)]
        end_time: Option<NaiveTime>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long, value_enum)]
        status: Option<EventStatus>,
    },
    /// Delete event by ID.
    Delete {
        /// Event ID.
        id: Uuid,
    },
}
