use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{KoshError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnType {
    Expense,
    Income,
}

impl TxnType {
    pub fn label(&self) -> &'static str {
        match self {
            TxnType::Expense => "expense",
            TxnType::Income => "income",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "expense" => Ok(TxnType::Expense),
            "income" => Ok(TxnType::Income),
            other => Err(KoshError::Other(format!(
                "Invalid type: {other} (expected expense or income)"
            ))),
        }
    }
}

/// Closed set of spending/income categories. Not user-extensible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Food,
    Shopping,
    Transport,
    Bills,
    Entertainment,
    Health,
    Education,
    Salary,
    Investment,
    Transfer,
    Other,
}

pub const ALL_CATEGORIES: &[Category] = &[
    Category::Food,
    Category::Shopping,
    Category::Transport,
    Category::Bills,
    Category::Entertainment,
    Category::Health,
    Category::Education,
    Category::Salary,
    Category::Investment,
    Category::Transfer,
    Category::Other,
];

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Shopping => "Shopping",
            Category::Transport => "Transport",
            Category::Bills => "Bills",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Salary => "Salary",
            Category::Investment => "Investment",
            Category::Transfer => "Transfer",
            Category::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        ALL_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| KoshError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: u32,
    /// Magnitude in rupees; direction is carried by `txn_type`.
    pub amount: f64,
    pub txn_type: TxnType,
    pub category: Category,
    pub description: String,
    pub merchant: Option<String>,
    pub date: NaiveDateTime,
    /// True when derived from an SMS rather than entered by hand.
    pub auto_detected: bool,
    /// Back-reference to the source message, if any.
    pub sms_id: Option<u32>,
    pub bank: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SmsMessage {
    pub id: u32,
    pub sender: String,
    pub body: String,
    pub received_at: NaiveDateTime,
    pub read: bool,
    /// Set exactly once, when a transaction is derived from this message.
    pub processed: bool,
}

#[derive(Debug, Clone)]
pub struct BankAccount {
    pub id: u32,
    pub name: String,
    pub last_four: String,
    pub balance: f64,
}

#[derive(Debug, Clone)]
pub struct Card {
    pub id: u32,
    pub name: String,
    pub issuer: String,
    pub last_four: String,
    pub credit_limit: f64,
    pub outstanding: f64,
    pub due_day: u32,
}

#[derive(Debug, Clone)]
pub struct Loan {
    pub id: u32,
    pub name: String,
    pub principal: f64,
    pub annual_rate_pct: f64,
    pub tenure_months: u32,
    pub months_paid: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebtDirection {
    OwedToMe,
    OwedByMe,
}

impl DebtDirection {
    pub fn label(&self) -> &'static str {
        match self {
            DebtDirection::OwedToMe => "owed to me",
            DebtDirection::OwedByMe => "owed by me",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Debt {
    pub id: u32,
    pub counterparty: String,
    pub amount: f64,
    pub direction: DebtDirection,
    pub due_date: Option<NaiveDate>,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Budget {
    pub category: Category,
    pub monthly_limit: f64,
}

#[derive(Debug, Clone)]
pub struct Goal {
    pub id: u32,
    pub name: String,
    pub target_amount: f64,
    pub saved_amount: f64,
    pub target_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_case_insensitive() {
        assert_eq!(Category::parse("food").unwrap(), Category::Food);
        assert_eq!(Category::parse("ENTERTAINMENT").unwrap(), Category::Entertainment);
        assert_eq!(Category::parse(" Bills ").unwrap(), Category::Bills);
    }

    #[test]
    fn test_category_parse_unknown() {
        let err = Category::parse("gadgets").unwrap_err();
        assert!(err.to_string().contains("gadgets"));
    }

    #[test]
    fn test_txn_type_parse() {
        assert_eq!(TxnType::parse("Income").unwrap(), TxnType::Income);
        assert!(TxnType::parse("transfer").is_err());
    }
}
