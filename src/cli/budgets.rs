use chrono::{Datelike, Local};
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::money;
use crate::reports;

use super::open_store;

pub fn status() -> Result<()> {
    let (_, store) = open_store();

    let now = Local::now();
    let rows = reports::budget_status(&store.budgets, &store.transactions, now.year(), now.month());
    if rows.is_empty() {
        println!("No budgets set.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Limit", "Spent", "Used", "Status"]);
    let mut over_count = 0usize;
    for row in &rows {
        let status = if row.over {
            over_count += 1;
            "OVER".red().bold().to_string()
        } else if row.pct >= 80.0 {
            "close".yellow().to_string()
        } else {
            "ok".green().to_string()
        };
        table.add_row(vec![
            Cell::new(row.category.label()),
            Cell::new(money(row.limit)),
            Cell::new(money(row.spent)),
            Cell::new(format!("{:.0}%", row.pct)),
            Cell::new(status),
        ]);
    }
    println!("Budgets \u{2014} {}\n{table}", now.format("%B %Y"));
    if over_count > 0 {
        println!("{over_count} budget(s) over the limit.");
    }
    Ok(())
}
