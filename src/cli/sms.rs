use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::{KoshError, Result};
use crate::fmt::money;
use crate::models::TxnType;
use crate::sms::classify;
use crate::store::ScanOutcome;

use super::open_store;

const PREVIEW_LEN: usize = 60;

fn preview(body: &str) -> String {
    if body.chars().count() <= PREVIEW_LEN {
        body.to_string()
    } else {
        let cut: String = body.chars().take(PREVIEW_LEN - 1).collect();
        format!("{cut}\u{2026}")
    }
}

pub fn list(all: bool) -> Result<()> {
    let (_, store) = open_store();

    let messages: Vec<_> = store
        .messages
        .iter()
        .filter(|m| all || !m.processed)
        .collect();
    if messages.is_empty() {
        println!("Inbox is empty.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Received", "Sender", "Message", "Verdict"]);
    for msg in &messages {
        let verdict = match classify(&msg.sender, &msg.body) {
            Some(d) => match d.txn_type {
                TxnType::Expense => format!("expense {}", money(d.amount)).red().to_string(),
                TxnType::Income => format!("income {}", money(d.amount)).green().to_string(),
            },
            None => "\u{2014}".to_string(),
        };
        table.add_row(vec![
            Cell::new(msg.id),
            Cell::new(msg.received_at.format("%Y-%m-%d %H:%M")),
            Cell::new(&msg.sender),
            Cell::new(preview(&msg.body)),
            Cell::new(verdict),
        ]);
    }
    let scope = if all { "all" } else { "unprocessed" };
    println!("SMS inbox ({scope}, {} messages)\n{table}", messages.len());
    Ok(())
}

pub fn show(id: u32) -> Result<()> {
    let (_, store) = open_store();

    let msg = store.message(id).ok_or(KoshError::UnknownMessage(id))?;
    println!("From:     {}", msg.sender);
    println!("Received: {}", msg.received_at.format("%Y-%m-%d %H:%M"));
    println!("Status:   {}", if msg.processed { "processed" } else { "unprocessed" });
    println!();
    println!("{}", textwrap::fill(&msg.body, 72));
    println!();

    match classify(&msg.sender, &msg.body) {
        Some(d) => {
            println!("Detected: {} of {} via {}", d.txn_type.label(), money(d.amount), d.bank);
            if let Some(merchant) = &d.merchant {
                println!("Merchant: {merchant}");
            }
        }
        None => println!("Not recognized as a bank transaction."),
    }
    Ok(())
}

pub fn scan() -> Result<()> {
    let (_, mut store) = open_store();

    let pending: Vec<u32> = store
        .messages
        .iter()
        .filter(|m| !m.processed)
        .map(|m| m.id)
        .collect();
    if pending.is_empty() {
        println!("No unprocessed messages.");
        return Ok(());
    }

    let mut recorded = 0usize;
    for msg_id in pending {
        match store.record_from_sms(msg_id)? {
            ScanOutcome::Recorded(txn_id) => {
                recorded += 1;
                // The transaction was just created, so the lookup cannot fail
                if let Some(txn) = store.transaction(txn_id) {
                    let amount = match txn.txn_type {
                        TxnType::Income => money(txn.amount).green().to_string(),
                        TxnType::Expense => money(txn.amount).red().to_string(),
                    };
                    println!(
                        "  #{msg_id} \u{2192} {} #{txn_id}: {} {}",
                        txn.txn_type.label(),
                        amount,
                        txn.merchant.as_deref().unwrap_or(""),
                    );
                }
            }
            ScanOutcome::NotATransaction => {
                println!("  #{msg_id} \u{2192} skipped (not a bank transaction)");
            }
            ScanOutcome::AlreadyProcessed => {}
        }
    }

    println!();
    println!(
        "Scan complete: {recorded} recorded, {} remaining in inbox.",
        store.unprocessed_count()
    );
    Ok(())
}
