pub mod accounts;
pub mod budgets;
pub mod dashboard;
pub mod goals;
pub mod inbox;
pub mod init;
pub mod report;
pub mod report_view;
pub mod sms;
pub mod txn;

use clap::{Parser, Subcommand};

use crate::mock;
use crate::settings::{load_settings, Settings};
use crate::store::Store;

/// Build the session store: settings plus freshly generated data.
/// There is no persistence layer, so every invocation starts from the
/// same seeded state.
pub(crate) fn open_store() -> (Settings, Store) {
    let settings = load_settings();
    let store = mock::seed(settings.months_of_history);
    (settings, store)
}

pub(crate) fn parse_month_opt(month: &Option<String>) -> (Option<i32>, Option<u32>) {
    if let Some(m) = month {
        let parts: Vec<&str> = m.split('-').collect();
        if parts.len() == 2 {
            let year = parts[0].parse().ok();
            let month = parts[1].parse().ok();
            return (year, month);
        }
    }
    (None, None)
}

#[derive(Parser)]
#[command(
    name = "kosh",
    about = "Personal finance tracker for the terminal with bank-SMS transaction detection."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set your name and preferences.
    Init {
        /// Display name used in greetings
        #[arg(long)]
        name: Option<String>,
        /// Months of history to generate (default: 6)
        #[arg(long)]
        months: Option<u32>,
    },
    /// Manage transactions.
    Txn {
        #[command(subcommand)]
        command: TxnCommands,
    },
    /// Inspect the SMS inbox and detect transactions.
    Sms {
        #[command(subcommand)]
        command: SmsCommands,
    },
    /// Show budget status for the current month.
    Budgets,
    /// Show savings goals and progress.
    Goals,
    /// Bank accounts, cards, loans, and debts.
    Accounts {
        #[command(subcommand)]
        command: AccountsCommands,
    },
    /// Generate reports.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Interactively browse transactions.
    Browse,
    /// Interactively work through the SMS inbox.
    Inbox,
}

#[derive(Subcommand)]
pub enum TxnCommands {
    /// Add a transaction.
    Add {
        /// Amount in rupees
        amount: f64,
        /// Type: expense or income
        #[arg(long = "type", default_value = "expense")]
        txn_type: String,
        /// Category name (e.g. Food, Bills, Salary)
        #[arg(long)]
        category: String,
        /// Short description
        #[arg(long)]
        description: String,
        /// Merchant or counterparty
        #[arg(long)]
        merchant: Option<String>,
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Free-form note
        #[arg(long)]
        note: Option<String>,
    },
    /// List transactions.
    List {
        /// Month filter: YYYY-MM
        #[arg(long)]
        month: Option<String>,
        /// Category filter
        #[arg(long)]
        category: Option<String>,
        /// Type filter: expense or income
        #[arg(long = "type")]
        txn_type: Option<String>,
        /// Text search on description, merchant, and note
        #[arg(long)]
        search: Option<String>,
        /// Sort key: date, amount, category
        #[arg(long, default_value = "date")]
        sort: String,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    /// Delete a transaction by ID.
    Delete {
        /// Transaction ID (shown in `kosh txn list`)
        id: u32,
    },
}

#[derive(Subcommand)]
pub enum SmsCommands {
    /// List inbox messages.
    List {
        /// Include processed messages
        #[arg(long)]
        all: bool,
    },
    /// Show one message in full, with its detection verdict.
    Show {
        /// Message ID
        id: u32,
    },
    /// Detect transactions in all unprocessed messages.
    Scan,
}

#[derive(Subcommand)]
pub enum AccountsCommands {
    /// List bank accounts.
    Banks,
    /// List credit cards.
    Cards,
    /// List loans with EMI schedules.
    Loans,
    /// List personal debts.
    Debts,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income, expense, and balance totals.
    Summary {
        /// Month filter: YYYY-MM
        #[arg(long)]
        month: Option<String>,
    },
    /// Expense breakdown by category.
    Categories {
        /// Month filter: YYYY-MM
        #[arg(long)]
        month: Option<String>,
    },
    /// Month-by-month cash flow.
    Cashflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_opt() {
        assert_eq!(
            parse_month_opt(&Some("2026-05".to_string())),
            (Some(2026), Some(5))
        );
        assert_eq!(parse_month_opt(&Some("garbage".to_string())), (None, None));
        assert_eq!(parse_month_opt(&None), (None, None));
    }

    #[test]
    fn test_cli_parses() {
        Cli::try_parse_from(["kosh", "txn", "list", "--month", "2026-05"]).unwrap();
        Cli::try_parse_from(["kosh", "sms", "scan"]).unwrap();
        Cli::try_parse_from(["kosh", "report", "summary"]).unwrap();
        Cli::try_parse_from(["kosh", "accounts", "loans"]).unwrap();
        Cli::try_parse_from(["kosh", "inbox"]).unwrap();
    }
}
