use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::TxnType;

/// What the classifier pulled out of a bank notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub bank: &'static str,
    pub txn_type: TxnType,
    pub amount: f64,
    pub merchant: Option<String>,
}

/// Static per-bank rule: sender substrings plus cue expressions for each
/// direction. Demo-grade: two banks, a handful of cues each.
struct BankPattern {
    bank: &'static str,
    senders: &'static [&'static str],
    expense_cues: Vec<Regex>,
    income_cues: Vec<Regex>,
}

fn compile(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|s| Regex::new(s).expect("static cue regex"))
        .collect()
}

static PATTERNS: Lazy<Vec<BankPattern>> = Lazy::new(|| {
    vec![
        BankPattern {
            bank: "HDFC Bank",
            senders: &["HDFCBK", "HDFC"],
            expense_cues: compile(&[
                r"(?i)\bdebited\b",
                r"(?i)\bspent\b",
                r"(?i)\bwithdrawn\b",
            ]),
            income_cues: compile(&[r"(?i)\bcredited\b", r"(?i)\bdeposited\b"]),
        },
        BankPattern {
            bank: "SBI",
            senders: &["SBIINB", "SBIPSG", "SBI"],
            expense_cues: compile(&[r"(?i)\bdebited\b", r"(?i)\bpurchase\b"]),
            income_cues: compile(&[r"(?i)\bcredited\b", r"(?i)\breceived\b"]),
        },
    ]
});

// Currency-prefixed number, thousands separators allowed.
static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:INR|Rs\.?|₹)\s*(?P<amt>[0-9][0-9,]*(?:\.[0-9]{1,2})?)")
        .expect("static amount regex")
});

// Counterparty phrases: "at <merchant> on ..." / "to <payee> Ref ..." for
// debits, "from <payer> ..." for credits. Cut at a date/reference clause,
// punctuation, or end of text.
static MERCHANT_DEBIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:at|to)\s+(?P<who>[A-Za-z][A-Za-z0-9&' _-]*?)(?:\s+on\s|\s+ref\b|\s+avl\b|[.;,]|$)")
        .expect("static merchant regex")
});

static MERCHANT_CREDIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bfrom\s+(?P<who>[A-Za-z][A-Za-z0-9&' _-]*?)(?:\s+on\s|\s+ref\b|[.;,]|$)")
        .expect("static merchant regex")
});

fn sender_matches(pattern: &BankPattern, sender: &str) -> bool {
    let sender_upper = sender.to_uppercase();
    pattern
        .senders
        .iter()
        .any(|s| sender_upper.contains(&s.to_uppercase()))
}

fn parse_amount(body: &str) -> Option<f64> {
    let caps = AMOUNT_RE.captures(body)?;
    caps["amt"].replace(',', "").parse().ok()
}

fn extract_merchant(body: &str, txn_type: TxnType) -> Option<String> {
    let re = match txn_type {
        TxnType::Expense => &*MERCHANT_DEBIT_RE,
        TxnType::Income => &*MERCHANT_CREDIT_RE,
    };
    let caps = re.captures(body)?;
    let who = caps["who"].trim();
    if who.is_empty() {
        None
    } else {
        Some(who.to_string())
    }
}

/// Decide whether a message is a bank transaction notification and, if so,
/// extract its amount, counterparty, and direction.
///
/// Pure function; a `None` is a normal negative result (unknown sender, no
/// cue matched, or no parseable amount), not an error.
pub fn classify(sender: &str, body: &str) -> Option<Detection> {
    for pattern in PATTERNS.iter() {
        if !sender_matches(pattern, sender) {
            continue;
        }

        let txn_type = if pattern.expense_cues.iter().any(|re| re.is_match(body)) {
            TxnType::Expense
        } else if pattern.income_cues.iter().any(|re| re.is_match(body)) {
            TxnType::Income
        } else {
            // Address matched but no transaction cue, try the next bank
            // (moot in practice since sender substrings disambiguate).
            continue;
        };

        let amount = parse_amount(body)?;
        return Some(Detection {
            bank: pattern.bank,
            txn_type,
            amount,
            merchant: extract_merchant(body, txn_type),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_sender_is_not_a_transaction() {
        assert_eq!(classify("AX-PROMO", "INR 500.00 debited at Amazon"), None);
        assert_eq!(classify("+919812345678", "you won a prize"), None);
    }

    #[test]
    fn test_known_sender_without_cue_is_not_a_transaction() {
        // OTP and balance messages share a bank sender but carry no cue.
        assert_eq!(
            classify("VM-HDFCBK", "123456 is your OTP for net banking login"),
            None
        );
        assert_eq!(
            classify("AD-SBIINB", "Your a/c balance as of today is Rs. 15,000.00"),
            None
        );
    }

    #[test]
    fn test_hdfc_debit_extracts_amount_and_merchant() {
        let det = classify(
            "VM-HDFCBK",
            "INR 1,250.50 debited from a/c **3456 at Amazon on 02-May. Avl bal INR 44,749.50",
        )
        .unwrap();
        assert_eq!(det.bank, "HDFC Bank");
        assert_eq!(det.txn_type, TxnType::Expense);
        assert_eq!(det.amount, 1250.50);
        assert_eq!(det.merchant.as_deref(), Some("Amazon"));
    }

    #[test]
    fn test_sbi_credit_extracts_payer() {
        let det = classify(
            "AD-SBIINB",
            "Rs. 52,000 credited to a/c **8821 from ACME PAYROLL on 01-Jun. Ref 99120",
        )
        .unwrap();
        assert_eq!(det.bank, "SBI");
        assert_eq!(det.txn_type, TxnType::Income);
        assert_eq!(det.amount, 52000.0);
        assert_eq!(det.merchant.as_deref(), Some("ACME PAYROLL"));
    }

    #[test]
    fn test_cue_without_amount_is_not_a_transaction() {
        assert_eq!(
            classify("VM-HDFCBK", "Your card was debited. Contact the branch."),
            None
        );
    }

    #[test]
    fn test_sender_match_is_case_insensitive() {
        let det = classify("vm-hdfcbk", "INR 99.00 spent at Zomato on 11-Jul").unwrap();
        assert_eq!(det.txn_type, TxnType::Expense);
        assert_eq!(det.amount, 99.0);
        assert_eq!(det.merchant.as_deref(), Some("Zomato"));
    }

    #[test]
    fn test_rupee_symbol_and_plain_rs_prefix() {
        let det = classify("HDFCBK", "₹450 withdrawn at ATM BKC on 09-Apr").unwrap();
        assert_eq!(det.amount, 450.0);
        let det = classify("SBIPSG", "Rs 2,100.25 debited for purchase at DMart").unwrap();
        assert_eq!(det.amount, 2100.25);
        assert_eq!(det.merchant.as_deref(), Some("DMart"));
    }

    #[test]
    fn test_merchant_absent_is_fine() {
        let det = classify("VM-HDFCBK", "INR 300.00 debited via UPI. Ref 4412").unwrap();
        assert_eq!(det.amount, 300.0);
        assert_eq!(det.merchant, None);
    }

    #[test]
    fn test_merchant_stops_before_reference_clause() {
        let det = classify(
            "AD-SBI",
            "Rs. 780.00 debited for purchase to Swiggy Ref No 112233",
        )
        .unwrap();
        assert_eq!(det.merchant.as_deref(), Some("Swiggy"));
    }
}
