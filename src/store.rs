use chrono::NaiveDateTime;

use crate::error::{KoshError, Result};
use crate::models::{
    BankAccount, Budget, Card, Category, Debt, Goal, Loan, SmsMessage, Transaction, TxnType,
};
use crate::sms;

/// Input for a user-entered transaction.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: f64,
    pub txn_type: TxnType,
    pub category: Category,
    pub description: String,
    pub merchant: Option<String>,
    pub date: NaiveDateTime,
    pub note: Option<String>,
}

/// Fields that `update_transaction` may change. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct TxnPatch {
    pub amount: Option<f64>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub merchant: Option<String>,
    pub note: Option<String>,
}

/// Result of processing a single inbox message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Recorded(u32),
    NotATransaction,
    AlreadyProcessed,
}

pub struct ScanSummary {
    pub recorded: usize,
    pub skipped: usize,
}

/// All application state. Seeded from the mock generator at startup and
/// mutated only through `&mut self`. Single-threaded; nothing survives the
/// process.
pub struct Store {
    next_id: u32,
    pub transactions: Vec<Transaction>,
    pub messages: Vec<SmsMessage>,
    pub bank_accounts: Vec<BankAccount>,
    pub cards: Vec<Card>,
    pub loans: Vec<Loan>,
    pub debts: Vec<Debt>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<Goal>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            transactions: Vec::new(),
            messages: Vec::new(),
            bank_accounts: Vec::new(),
            cards: Vec::new(),
            loans: Vec::new(),
            debts: Vec::new(),
            budgets: Vec::new(),
            goals: Vec::new(),
        }
    }

    pub fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn validate_amount(amount: f64) -> Result<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(KoshError::InvalidAmount(format!("{amount}")));
        }
        Ok(())
    }

    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<u32> {
        Self::validate_amount(new.amount)?;
        let id = self.next_id();
        self.transactions.push(Transaction {
            id,
            amount: new.amount,
            txn_type: new.txn_type,
            category: new.category,
            description: new.description,
            merchant: new.merchant,
            date: new.date,
            auto_detected: false,
            sms_id: None,
            bank: None,
            note: new.note,
        });
        Ok(id)
    }

    pub fn update_transaction(&mut self, id: u32, patch: TxnPatch) -> Result<()> {
        if let Some(amount) = patch.amount {
            Self::validate_amount(amount)?;
        }
        let txn = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(KoshError::UnknownTransaction(id))?;
        if let Some(amount) = patch.amount {
            txn.amount = amount;
        }
        if let Some(category) = patch.category {
            txn.category = category;
        }
        if let Some(description) = patch.description {
            txn.description = description;
        }
        if let Some(merchant) = patch.merchant {
            txn.merchant = Some(merchant);
        }
        if let Some(note) = patch.note {
            txn.note = Some(note);
        }
        Ok(())
    }

    /// Remove a transaction by id. Returns false (and changes nothing) when
    /// the id is absent.
    pub fn delete_transaction(&mut self, id: u32) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        self.transactions.len() < before
    }

    pub fn transaction(&self, id: u32) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn message(&self, id: u32) -> Option<&SmsMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Classify one inbox message and, on a positive verdict, derive a
    /// transaction carrying a back-reference to it. The message's processed
    /// flag flips exactly once; a second call is a no-op skip. A negative
    /// classification leaves the message untouched.
    pub fn record_from_sms(&mut self, sms_id: u32) -> Result<ScanOutcome> {
        let msg = self
            .messages
            .iter()
            .find(|m| m.id == sms_id)
            .ok_or(KoshError::UnknownMessage(sms_id))?;
        if msg.processed {
            return Ok(ScanOutcome::AlreadyProcessed);
        }

        let Some(det) = sms::classify(&msg.sender, &msg.body) else {
            return Ok(ScanOutcome::NotATransaction);
        };

        let date = msg.received_at;
        let description = det
            .merchant
            .clone()
            .unwrap_or_else(|| format!("{} {}", det.bank, det.txn_type.label()));

        let txn_id = self.next_id();
        self.transactions.push(Transaction {
            id: txn_id,
            amount: det.amount,
            txn_type: det.txn_type,
            category: Category::Other,
            description,
            merchant: det.merchant,
            date,
            auto_detected: true,
            sms_id: Some(sms_id),
            bank: Some(det.bank.to_string()),
            note: None,
        });

        let msg = self
            .messages
            .iter_mut()
            .find(|m| m.id == sms_id)
            .ok_or(KoshError::UnknownMessage(sms_id))?;
        msg.processed = true;
        msg.read = true;

        Ok(ScanOutcome::Recorded(txn_id))
    }

    /// Run the classifier over every unprocessed message, oldest id first.
    pub fn scan_inbox(&mut self) -> Result<ScanSummary> {
        let mut pending: Vec<u32> = self
            .messages
            .iter()
            .filter(|m| !m.processed)
            .map(|m| m.id)
            .collect();
        pending.sort_unstable();

        let mut recorded = 0usize;
        let mut skipped = 0usize;
        for id in pending {
            match self.record_from_sms(id)? {
                ScanOutcome::Recorded(_) => recorded += 1,
                ScanOutcome::NotATransaction => skipped += 1,
                ScanOutcome::AlreadyProcessed => {}
            }
        }
        Ok(ScanSummary { recorded, skipped })
    }

    pub fn unprocessed_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.processed).count()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn new_txn(amount: f64, txn_type: TxnType) -> NewTransaction {
        NewTransaction {
            amount,
            txn_type,
            category: Category::Food,
            description: "test".to_string(),
            merchant: None,
            date: dt(2026, 5, 2),
            note: None,
        }
    }

    fn push_msg(store: &mut Store, sender: &str, body: &str) -> u32 {
        let id = store.next_id();
        store.messages.push(SmsMessage {
            id,
            sender: sender.to_string(),
            body: body.to_string(),
            received_at: dt(2026, 5, 2),
            read: false,
            processed: false,
        });
        id
    }

    #[test]
    fn test_add_rejects_negative_amount() {
        let mut store = Store::new();
        assert!(store.add_transaction(new_txn(-1.0, TxnType::Expense)).is_err());
        assert!(store.add_transaction(new_txn(f64::NAN, TxnType::Expense)).is_err());
        assert!(store.transactions.is_empty());
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut store = Store::new();
        let a = store.add_transaction(new_txn(10.0, TxnType::Expense)).unwrap();
        let b = store.add_transaction(new_txn(20.0, TxnType::Income)).unwrap();
        assert!(store.delete_transaction(a));
        assert_eq!(store.transactions.len(), 1);
        assert_eq!(store.transactions[0].id, b);
        assert_eq!(store.transactions[0].amount, 20.0);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut store = Store::new();
        store.add_transaction(new_txn(10.0, TxnType::Expense)).unwrap();
        assert!(!store.delete_transaction(999));
        assert_eq!(store.transactions.len(), 1);
    }

    #[test]
    fn test_update_unknown_id() {
        let mut store = Store::new();
        let err = store.update_transaction(7, TxnPatch::default()).unwrap_err();
        assert!(err.to_string().contains("#7"));
    }

    #[test]
    fn test_update_patches_only_given_fields() {
        let mut store = Store::new();
        let id = store.add_transaction(new_txn(10.0, TxnType::Expense)).unwrap();
        store
            .update_transaction(
                id,
                TxnPatch {
                    amount: Some(15.5),
                    note: Some("lunch".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        let txn = store.transaction(id).unwrap();
        assert_eq!(txn.amount, 15.5);
        assert_eq!(txn.note.as_deref(), Some("lunch"));
        assert_eq!(txn.description, "test");
        assert_eq!(txn.category, Category::Food);
    }

    #[test]
    fn test_record_from_sms_sets_backreference_once() {
        let mut store = Store::new();
        let sms_id = push_msg(
            &mut store,
            "VM-HDFCBK",
            "INR 1,250.50 debited from a/c **3456 at Amazon on 02-May",
        );

        let outcome = store.record_from_sms(sms_id).unwrap();
        let ScanOutcome::Recorded(txn_id) = outcome else {
            panic!("expected a recorded transaction, got {outcome:?}");
        };

        let txn = store.transaction(txn_id).unwrap();
        assert_eq!(txn.sms_id, Some(sms_id));
        assert!(txn.auto_detected);
        assert_eq!(txn.txn_type, TxnType::Expense);
        assert_eq!(txn.amount, 1250.50);
        assert_eq!(txn.merchant.as_deref(), Some("Amazon"));
        assert_eq!(txn.bank.as_deref(), Some("HDFC Bank"));
        assert!(store.message(sms_id).unwrap().processed);

        // Second derivation attempt is a skip, not a duplicate.
        assert_eq!(
            store.record_from_sms(sms_id).unwrap(),
            ScanOutcome::AlreadyProcessed
        );
        assert_eq!(store.transactions.len(), 1);
    }

    #[test]
    fn test_record_from_sms_negative_leaves_message_unprocessed() {
        let mut store = Store::new();
        let sms_id = push_msg(&mut store, "AX-PROMO", "Mega sale! 50% off everything");
        assert_eq!(
            store.record_from_sms(sms_id).unwrap(),
            ScanOutcome::NotATransaction
        );
        assert!(!store.message(sms_id).unwrap().processed);
        assert!(store.transactions.is_empty());
    }

    #[test]
    fn test_scan_inbox_counts_and_skips_noise() {
        let mut store = Store::new();
        push_msg(&mut store, "VM-HDFCBK", "INR 99.00 spent at Zomato on 11-Jul");
        push_msg(&mut store, "VM-HDFCBK", "123456 is your OTP for login");
        push_msg(
            &mut store,
            "AD-SBIINB",
            "Rs. 52,000 credited to a/c **8821 from ACME PAYROLL on 01-Jun",
        );

        let summary = store.scan_inbox().unwrap();
        assert_eq!(summary.recorded, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(store.unprocessed_count(), 1);

        // Re-scan only re-attempts the noise message.
        let summary = store.scan_inbox().unwrap();
        assert_eq!(summary.recorded, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(store.transactions.len(), 2);
    }
}
