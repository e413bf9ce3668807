use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::money;
use crate::models::DebtDirection;
use crate::reports::emi;

use super::open_store;

pub fn banks() -> Result<()> {
    let (_, store) = open_store();

    let mut table = Table::new();
    table.set_header(vec!["ID", "Account", "Number", "Balance"]);
    let mut total = 0.0;
    for acct in &store.bank_accounts {
        total += acct.balance;
        table.add_row(vec![
            Cell::new(acct.id),
            Cell::new(&acct.name),
            Cell::new(format!("xx{}", acct.last_four)),
            Cell::new(money(acct.balance)),
        ]);
    }
    println!("Bank Accounts\n{table}");
    println!("Total: {}", money(total));
    Ok(())
}

pub fn cards() -> Result<()> {
    let (_, store) = open_store();

    let mut table = Table::new();
    table.set_header(vec!["ID", "Card", "Issuer", "Number", "Limit", "Outstanding", "Due Day"]);
    for card in &store.cards {
        table.add_row(vec![
            Cell::new(card.id),
            Cell::new(&card.name),
            Cell::new(&card.issuer),
            Cell::new(format!("xx{}", card.last_four)),
            Cell::new(money(card.credit_limit)),
            Cell::new(money(card.outstanding)),
            Cell::new(card.due_day),
        ]);
    }
    println!("Credit Cards\n{table}");
    Ok(())
}

pub fn loans() -> Result<()> {
    let (_, store) = open_store();

    let mut table = Table::new();
    table.set_header(vec![
        "ID", "Loan", "Principal", "Rate", "Tenure", "Paid", "EMI", "Outstanding",
    ]);
    for loan in &store.loans {
        let sched = emi(loan);
        table.add_row(vec![
            Cell::new(loan.id),
            Cell::new(&loan.name),
            Cell::new(money(loan.principal)),
            Cell::new(format!("{:.1}%", loan.annual_rate_pct)),
            Cell::new(format!("{} mo", loan.tenure_months)),
            Cell::new(format!("{} mo", loan.months_paid)),
            Cell::new(money(sched.monthly_payment)),
            Cell::new(money(sched.outstanding)),
        ]);
    }
    println!("Loans\n{table}");
    Ok(())
}

pub fn debts() -> Result<()> {
    let (_, store) = open_store();

    if store.debts.is_empty() {
        println!("No debts recorded.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Counterparty", "Amount", "Direction", "Due", "Note"]);
    let mut net = 0.0;
    for debt in &store.debts {
        net += match debt.direction {
            DebtDirection::OwedToMe => debt.amount,
            DebtDirection::OwedByMe => -debt.amount,
        };
        table.add_row(vec![
            Cell::new(debt.id),
            Cell::new(&debt.counterparty),
            Cell::new(money(debt.amount)),
            Cell::new(debt.direction.label()),
            Cell::new(
                debt.due_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
            Cell::new(debt.note.as_deref().unwrap_or("")),
        ]);
    }
    println!("Debts\n{table}");
    println!("Net position: {}", money(net));
    Ok(())
}
