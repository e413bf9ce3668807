use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::money;
use crate::reports::{self, TxnFilter};

use super::{open_store, parse_month_opt};

pub fn summary(month: Option<String>) -> Result<()> {
    let (_, store) = open_store();

    let (year, m) = parse_month_opt(&month);
    let filter = TxnFilter {
        year,
        month: m,
        ..Default::default()
    };
    let rows: Vec<_> = reports::filter_transactions(&store.transactions, &filter)
        .into_iter()
        .cloned()
        .collect();
    let s = reports::summary(&rows);

    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    table.add_row(vec![
        Cell::new("Income".green()),
        Cell::new(money(s.total_income)),
    ]);
    table.add_row(vec![
        Cell::new("Expenses".red()),
        Cell::new(money(s.total_expense)),
    ]);
    let balance_label = if s.balance >= 0.0 {
        "Balance".green().bold()
    } else {
        "Balance".red().bold()
    };
    table.add_row(vec![Cell::new(balance_label), Cell::new(money(s.balance))]);
    table.add_row(vec![Cell::new("Transactions"), Cell::new(s.txn_count)]);

    let scope = month.as_deref().unwrap_or("all time");
    println!("Summary \u{2014} {scope}\n{table}");
    Ok(())
}

pub fn categories(month: Option<String>) -> Result<()> {
    let (_, store) = open_store();

    let (year, m) = parse_month_opt(&month);
    let filter = TxnFilter {
        year,
        month: m,
        ..Default::default()
    };
    let rows: Vec<_> = reports::filter_transactions(&store.transactions, &filter)
        .into_iter()
        .cloned()
        .collect();
    let breakdown = reports::category_breakdown(&rows);

    if breakdown.is_empty() {
        println!("No expenses in the selected period.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount", "%", "Count"]);
    let mut total = 0.0;
    for item in &breakdown {
        total += item.total;
        table.add_row(vec![
            Cell::new(item.category.label()),
            Cell::new(money(item.total)),
            Cell::new(format!("{:.1}%", item.pct)),
            Cell::new(item.count),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(money(total)),
        Cell::new(""),
        Cell::new(""),
    ]);
    println!("Expenses by Category\n{table}");
    Ok(())
}

pub fn cashflow() -> Result<()> {
    let (_, store) = open_store();

    let months = reports::monthly_cashflow(&store.transactions);
    if months.is_empty() {
        println!("No transactions recorded.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Month", "Income", "Expenses", "Net", "Running"]);
    for m in &months {
        let net = if m.net >= 0.0 {
            money(m.net).green().to_string()
        } else {
            money(m.net).red().to_string()
        };
        table.add_row(vec![
            Cell::new(&m.month),
            Cell::new(money(m.income)),
            Cell::new(money(m.expense)),
            Cell::new(net),
            Cell::new(money(m.running)),
        ]);
    }
    println!("Monthly Cash Flow\n{table}");
    Ok(())
}
