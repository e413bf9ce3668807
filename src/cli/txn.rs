use chrono::{Local, NaiveDate};
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::{KoshError, Result};
use crate::fmt::money;
use crate::models::{Category, TxnType};
use crate::reports::{self, SortKey, TxnFilter};
use crate::store::NewTransaction;

use super::{open_store, parse_month_opt};

#[allow(clippy::too_many_arguments)]
pub fn add(
    amount: f64,
    txn_type: &str,
    category: &str,
    description: &str,
    merchant: Option<&str>,
    date: Option<&str>,
    note: Option<&str>,
) -> Result<()> {
    let (_, mut store) = open_store();

    let txn_type = TxnType::parse(txn_type)?;
    let category = Category::parse(category)?;
    let date = match date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| KoshError::InvalidDate(d.to_string()))?
            .and_hms_opt(12, 0, 0)
            .ok_or_else(|| KoshError::InvalidDate(d.to_string()))?,
        None => Local::now().naive_local(),
    };

    let id = store.add_transaction(NewTransaction {
        amount,
        txn_type,
        category,
        description: description.to_string(),
        merchant: merchant.map(str::to_string),
        date,
        note: note.map(str::to_string),
    })?;

    let s = reports::summary(&store.transactions);
    println!(
        "Recorded {} #{id}: {} ({})",
        txn_type.label(),
        money(amount),
        category.label()
    );
    println!("Session balance: {}", money(s.balance));
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn list(
    month: Option<String>,
    category: Option<String>,
    txn_type: Option<String>,
    search: Option<String>,
    sort: &str,
    desc: bool,
) -> Result<()> {
    let (_, store) = open_store();

    let (year, month) = parse_month_opt(&month);
    let filter = TxnFilter {
        year,
        month,
        category: category.as_deref().map(Category::parse).transpose()?,
        txn_type: txn_type.as_deref().map(TxnType::parse).transpose()?,
        search,
    };
    let sort_key = match sort.to_lowercase().as_str() {
        "date" => SortKey::Date,
        "amount" => SortKey::Amount,
        "category" => SortKey::Category,
        other => {
            return Err(KoshError::Other(format!(
                "Invalid sort key: {other} (expected date, amount, or category)"
            )))
        }
    };

    let mut rows = reports::filter_transactions(&store.transactions, &filter);
    reports::sort_transactions(&mut rows, sort_key, desc);

    if rows.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Type", "Category", "Description", "Merchant", "Amount"]);
    let mut net = 0.0;
    for txn in &rows {
        let amount = match txn.txn_type {
            TxnType::Income => {
                net += txn.amount;
                money(txn.amount).green()
            }
            TxnType::Expense => {
                net -= txn.amount;
                money(txn.amount).red()
            }
        };
        let desc = if txn.auto_detected {
            format!("{} \u{2022}", txn.description)
        } else {
            txn.description.clone()
        };
        table.add_row(vec![
            Cell::new(txn.id),
            Cell::new(txn.date.format("%Y-%m-%d")),
            Cell::new(txn.txn_type.label()),
            Cell::new(txn.category.label()),
            Cell::new(desc),
            Cell::new(txn.merchant.as_deref().unwrap_or("")),
            Cell::new(amount),
        ]);
    }
    println!("Transactions ({} rows, \u{2022} = auto-detected)\n{table}", rows.len());
    println!("Net: {}", money(net));
    Ok(())
}

pub fn delete(id: u32) -> Result<()> {
    let (_, mut store) = open_store();

    if !store.delete_transaction(id) {
        return Err(KoshError::UnknownTransaction(id));
    }
    let s = reports::summary(&store.transactions);
    println!("Deleted transaction #{id}.");
    println!("Session balance: {}", money(s.balance));
    Ok(())
}
