mod browser;
mod cli;
mod error;
mod fmt;
mod mock;
mod models;
mod reports;
mod settings;
mod sms;
mod store;
mod tui;

use clap::Parser;

use cli::{AccountsCommands, Cli, Commands, ReportCommands, SmsCommands, TxnCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None => cli::dashboard::run(),
        Some(Commands::Init { name, months }) => cli::init::run(name, months),
        Some(Commands::Txn { command }) => match command {
            TxnCommands::Add {
                amount,
                txn_type,
                category,
                description,
                merchant,
                date,
                note,
            } => cli::txn::add(
                amount,
                &txn_type,
                &category,
                &description,
                merchant.as_deref(),
                date.as_deref(),
                note.as_deref(),
            ),
            TxnCommands::List {
                month,
                category,
                txn_type,
                search,
                sort,
                desc,
            } => cli::txn::list(month, category, txn_type, search, &sort, desc),
            TxnCommands::Delete { id } => cli::txn::delete(id),
        },
        Some(Commands::Sms { command }) => match command {
            SmsCommands::List { all } => cli::sms::list(all),
            SmsCommands::Show { id } => cli::sms::show(id),
            SmsCommands::Scan => cli::sms::scan(),
        },
        Some(Commands::Budgets) => cli::budgets::status(),
        Some(Commands::Goals) => cli::goals::list(),
        Some(Commands::Accounts { command }) => match command {
            AccountsCommands::Banks => cli::accounts::banks(),
            AccountsCommands::Cards => cli::accounts::cards(),
            AccountsCommands::Loans => cli::accounts::loans(),
            AccountsCommands::Debts => cli::accounts::debts(),
        },
        Some(Commands::Report { command }) => match command {
            ReportCommands::Summary { month } => cli::report::summary(month),
            ReportCommands::Categories { month } => cli::report::categories(month),
            ReportCommands::Cashflow => cli::report::cashflow(),
        },
        Some(Commands::Browse) => {
            let (_, mut store) = cli::open_store();
            let mut browser = browser::TxnBrowser::new(&store.transactions);
            browser.run(&mut store).map_err(error::KoshError::from)
        }
        Some(Commands::Inbox) => {
            let (_, mut store) = cli::open_store();
            let mut inbox = cli::inbox::InboxScreen::new(&store.messages);
            inbox.run(&mut store).map_err(error::KoshError::from)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
