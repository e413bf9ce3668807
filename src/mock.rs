use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

use crate::models::{
    BankAccount, Budget, Card, Category, Debt, DebtDirection, Goal, Loan, SmsMessage, TxnType,
};
use crate::store::{NewTransaction, Store};

/// Fixed monthly bills.
struct RecurringTxn {
    day: u32,
    description: &'static str,
    merchant: &'static str,
    category: Category,
    amount: f64,
}

const RECURRING: &[RecurringTxn] = &[
    RecurringTxn { day: 2, description: "Rent transfer", merchant: "Landlord", category: Category::Bills, amount: 18000.00 },
    RecurringTxn { day: 5, description: "Netflix subscription", merchant: "Netflix", category: Category::Entertainment, amount: 649.00 },
    RecurringTxn { day: 5, description: "Spotify subscription", merchant: "Spotify", category: Category::Entertainment, amount: 119.00 },
    RecurringTxn { day: 7, description: "Jio prepaid recharge", merchant: "Jio", category: Category::Bills, amount: 399.00 },
    RecurringTxn { day: 8, description: "Electricity bill", merchant: "BESCOM", category: Category::Bills, amount: 1450.00 },
    RecurringTxn { day: 10, description: "Mutual fund SIP", merchant: "Groww", category: Category::Investment, amount: 5000.00 },
];

/// One-off expenses rotated across months.
struct RotatingTxn {
    day: u32,
    description: &'static str,
    merchant: &'static str,
    category: Category,
    amount: f64,
}

const ROTATING: &[RotatingTxn] = &[
    RotatingTxn { day: 13, description: "Grocery run", merchant: "DMart", category: Category::Shopping, amount: 2340.50 },
    RotatingTxn { day: 15, description: "Cab to office", merchant: "Uber", category: Category::Transport, amount: 312.00 },
    RotatingTxn { day: 16, description: "Pharmacy", merchant: "Apollo Pharmacy", category: Category::Health, amount: 780.25 },
    RotatingTxn { day: 18, description: "Movie tickets", merchant: "BookMyShow", category: Category::Entertainment, amount: 650.00 },
    RotatingTxn { day: 19, description: "Online course", merchant: "Udemy", category: Category::Education, amount: 499.00 },
    RotatingTxn { day: 21, description: "Petrol", merchant: "Indian Oil", category: Category::Transport, amount: 1500.00 },
    RotatingTxn { day: 23, description: "Clothes", merchant: "Myntra", category: Category::Shopping, amount: 1899.00 },
    RotatingTxn { day: 26, description: "Hospital checkup", merchant: "Manipal Hospital", category: Category::Health, amount: 1200.00 },
    RotatingTxn { day: 27, description: "Metro card top-up", merchant: "BMRCL", category: Category::Transport, amount: 500.00 },
    RotatingTxn { day: 28, description: "Books", merchant: "Amazon", category: Category::Shopping, amount: 845.00 },
];

/// Food-delivery vendors rotated across months, two orders each.
const MEALS: &[(&str, &str)] = &[
    ("Swiggy", "Zomato"),
    ("Zomato", "Dominos"),
    ("Swiggy", "Dominos"),
];

const MEAL_AMOUNTS: &[(f64, f64)] = &[
    (420.00, 305.50),
    (512.25, 268.00),
    (388.00, 455.75),
    (295.50, 340.00),
    (475.00, 298.25),
    (362.75, 410.00),
];

fn clamp_day(year: i32, month: u32, day: u32) -> u32 {
    let last_day = NaiveDate::from_ymd_opt(year, month + 1, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap())
        .pred_opt()
        .unwrap()
        .day();
    day.min(last_day)
}

fn make_date(year: i32, month: u32, day: u32) -> NaiveDateTime {
    let d = clamp_day(year, month, day);
    NaiveDate::from_ymd_opt(year, month, d)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

/// Build `months` of transactions ending at the current month.
fn generate_transactions(months: u32) -> Vec<NewTransaction> {
    let today = Local::now().date_naive();
    let mut txns = Vec::new();

    for i in 0..months {
        // Count backwards: i=0 is the oldest month, i=months-1 is current
        let months_ago = months - 1 - i;
        let target = today - chrono::Months::new(months_ago);
        let year = target.year();
        let month = target.month();
        let idx = i as usize;

        // Salary on the 1st, with a small deterministic variation
        let vary = 1.0 + ((idx % 5) as f64 - 2.0) * 0.01;
        txns.push(NewTransaction {
            amount: (85000.0 * vary * 100.0).round() / 100.0,
            txn_type: TxnType::Income,
            category: Category::Salary,
            description: "Monthly salary".to_string(),
            merchant: Some("Acme Software Pvt Ltd".to_string()),
            date: make_date(year, month, 1),
            note: None,
        });

        for r in RECURRING {
            txns.push(NewTransaction {
                amount: r.amount,
                txn_type: TxnType::Expense,
                category: r.category,
                description: r.description.to_string(),
                merchant: Some(r.merchant.to_string()),
                date: make_date(year, month, r.day),
                note: None,
            });
        }

        // Two food orders per month, vendors rotating
        let (meal1, meal2) = MEALS[idx % MEALS.len()];
        let (amt1, amt2) = MEAL_AMOUNTS[idx % MEAL_AMOUNTS.len()];
        txns.push(NewTransaction {
            amount: amt1,
            txn_type: TxnType::Expense,
            category: Category::Food,
            description: format!("{meal1} order"),
            merchant: Some(meal1.to_string()),
            date: make_date(year, month, 12),
            note: None,
        });
        txns.push(NewTransaction {
            amount: amt2,
            txn_type: TxnType::Expense,
            category: Category::Food,
            description: format!("{meal2} order"),
            merchant: Some(meal2.to_string()),
            date: make_date(year, month, 22),
            note: None,
        });

        // Three rotating extras per month
        for j in 0..3usize {
            let pick = (idx * 3 + j) % ROTATING.len();
            let rot = &ROTATING[pick];
            txns.push(NewTransaction {
                amount: rot.amount,
                txn_type: TxnType::Expense,
                category: rot.category,
                description: rot.description.to_string(),
                merchant: Some(rot.merchant.to_string()),
                date: make_date(year, month, rot.day),
                note: None,
            });
        }

        // Savings-account interest on the last day of the month
        let interest = 210.0 + (idx % 4) as f64 * 15.0;
        txns.push(NewTransaction {
            amount: interest,
            txn_type: TxnType::Income,
            category: Category::Investment,
            description: "Savings interest".to_string(),
            merchant: None,
            date: make_date(year, month, 31),
            note: None,
        });
    }

    txns
}

struct SeedSms {
    sender: &'static str,
    body: &'static str,
    /// Days before today.
    days_ago: i64,
    read: bool,
}

const INBOX: &[SeedSms] = &[
    SeedSms {
        sender: "VM-HDFCBK",
        body: "INR 1,250.50 debited from a/c **3456 at Amazon on 02-May. Avl bal INR 45,230.10. Not you? Call 18002586161.",
        days_ago: 6,
        read: true,
    },
    SeedSms {
        sender: "AD-HDFCBK",
        body: "Rs.349.00 spent on HDFC Bank Card x7821 at Swiggy on 04-May. Avl limit Rs.1,24,500.",
        days_ago: 5,
        read: true,
    },
    SeedSms {
        sender: "BZ-SBIINB",
        body: "INR 4,500.00 debited from A/c X9912 for purchase at Reliance Digital. Ref 556721.",
        days_ago: 4,
        read: false,
    },
    SeedSms {
        sender: "VK-SBIPSG",
        body: "Dear customer, INR 12,000.00 credited to your A/c X9912 from Ravi Kumar. Ref UPI/512233.",
        days_ago: 3,
        read: false,
    },
    SeedSms {
        sender: "VM-HDFCBK",
        body: "INR 85,000.00 credited to a/c **3456 from Acme Software Pvt Ltd. Avl bal INR 1,30,230.10.",
        days_ago: 2,
        read: false,
    },
    SeedSms {
        sender: "AX-OTPSVC",
        body: "Your OTP for login is 482910. Valid for 10 minutes. Do not share it with anyone.",
        days_ago: 2,
        read: false,
    },
    SeedSms {
        sender: "TM-OFFERS",
        body: "MEGA SALE! Flat 60% off on fashion this weekend only. Shop now at example.in/sale",
        days_ago: 1,
        read: false,
    },
    SeedSms {
        sender: "BZ-SBIINB",
        body: "Your account statement for April is ready. Download it from the portal.",
        days_ago: 1,
        read: false,
    },
];

fn seed_inbox(store: &mut Store) {
    let now = Local::now().naive_local();
    for seed in INBOX {
        let id = store.next_id();
        store.messages.push(SmsMessage {
            id,
            sender: seed.sender.to_string(),
            body: seed.body.to_string(),
            received_at: now - chrono::Duration::days(seed.days_ago),
            read: seed.read,
            processed: false,
        });
    }
}

fn seed_records(store: &mut Store) {
    let today = Local::now().date_naive();

    let acct1 = store.next_id();
    store.bank_accounts.push(BankAccount {
        id: acct1,
        name: "HDFC Savings".to_string(),
        last_four: "3456".to_string(),
        balance: 130230.10,
    });
    let acct2 = store.next_id();
    store.bank_accounts.push(BankAccount {
        id: acct2,
        name: "SBI Salary".to_string(),
        last_four: "9912".to_string(),
        balance: 54780.00,
    });

    let card1 = store.next_id();
    store.cards.push(Card {
        id: card1,
        name: "Millennia".to_string(),
        issuer: "HDFC Bank".to_string(),
        last_four: "7821".to_string(),
        credit_limit: 150000.0,
        outstanding: 25500.0,
        due_day: 18,
    });
    let card2 = store.next_id();
    store.cards.push(Card {
        id: card2,
        name: "SimplyCLICK".to_string(),
        issuer: "SBI Card".to_string(),
        last_four: "0034".to_string(),
        credit_limit: 80000.0,
        outstanding: 6240.0,
        due_day: 5,
    });

    let loan1 = store.next_id();
    store.loans.push(Loan {
        id: loan1,
        name: "Two-wheeler loan".to_string(),
        principal: 100000.0,
        annual_rate_pct: 12.0,
        tenure_months: 12,
        months_paid: 4,
    });
    let loan2 = store.next_id();
    store.loans.push(Loan {
        id: loan2,
        name: "Home loan".to_string(),
        principal: 3500000.0,
        annual_rate_pct: 8.5,
        tenure_months: 240,
        months_paid: 36,
    });

    let debt1 = store.next_id();
    store.debts.push(Debt {
        id: debt1,
        counterparty: "Ravi".to_string(),
        amount: 5000.0,
        direction: DebtDirection::OwedToMe,
        due_date: today.checked_add_days(chrono::Days::new(20)),
        note: Some("Goa trip split".to_string()),
    });
    let debt2 = store.next_id();
    store.debts.push(Debt {
        id: debt2,
        counterparty: "Priya".to_string(),
        amount: 2200.0,
        direction: DebtDirection::OwedByMe,
        due_date: None,
        note: None,
    });

    store.budgets = vec![
        Budget { category: Category::Food, monthly_limit: 4000.0 },
        Budget { category: Category::Shopping, monthly_limit: 6000.0 },
        Budget { category: Category::Transport, monthly_limit: 3000.0 },
        Budget { category: Category::Bills, monthly_limit: 21000.0 },
        Budget { category: Category::Entertainment, monthly_limit: 2000.0 },
        Budget { category: Category::Health, monthly_limit: 2500.0 },
    ];

    let goal1 = store.next_id();
    store.goals.push(Goal {
        id: goal1,
        name: "Emergency fund".to_string(),
        target_amount: 300000.0,
        saved_amount: 120000.0,
        target_date: NaiveDate::from_ymd_opt(today.year() + 1, 3, 31),
    });
    let goal2 = store.next_id();
    store.goals.push(Goal {
        id: goal2,
        name: "Japan trip".to_string(),
        target_amount: 250000.0,
        saved_amount: 40000.0,
        target_date: NaiveDate::from_ymd_opt(today.year() + 1, 10, 1),
    });
    let goal3 = store.next_id();
    store.goals.push(Goal {
        id: goal3,
        name: "New laptop".to_string(),
        target_amount: 90000.0,
        saved_amount: 78000.0,
        target_date: None,
    });
}

/// Build a fully populated in-memory store with `months` of history.
/// Everything is regenerated from scratch on each call.
pub fn seed(months: u32) -> Store {
    let months = months.max(1);
    let mut store = Store::new();

    for txn in generate_transactions(months) {
        // Seed amounts are all valid, so this cannot fail
        let _ = store.add_transaction(txn);
    }
    seed_inbox(&mut store);
    seed_records(&mut store);

    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::summary;
    use crate::sms;

    #[test]
    fn test_generate_transactions_count() {
        let txns = generate_transactions(6);
        // 6 months x 13 per month (1 salary + 6 recurring + 2 meals + 3 rotating + 1 interest)
        assert_eq!(txns.len(), 6 * 13);
    }

    #[test]
    fn test_transactions_span_requested_months() {
        let txns = generate_transactions(6);
        let min = txns.iter().map(|t| t.date).min().unwrap();
        let max = txns.iter().map(|t| t.date).max().unwrap();
        let span = (max.year() - min.year()) * 12 + max.month() as i32 - min.month() as i32;
        assert!(span >= 5, "expected at least 5 months of span, got {span}");
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = seed(6);
        let b = seed(6);
        assert_eq!(a.transactions.len(), b.transactions.len());
        let sa = summary(&a.transactions);
        let sb = summary(&b.transactions);
        assert_eq!(sa.balance, sb.balance);
        assert_eq!(a.messages.len(), b.messages.len());
    }

    #[test]
    fn test_seed_populates_all_record_types() {
        let store = seed(6);
        assert_eq!(store.bank_accounts.len(), 2);
        assert_eq!(store.cards.len(), 2);
        assert_eq!(store.loans.len(), 2);
        assert_eq!(store.debts.len(), 2);
        assert_eq!(store.goals.len(), 3);
        assert!(!store.budgets.is_empty());
        assert!(!store.messages.is_empty());
    }

    #[test]
    fn test_seeded_ids_are_unique() {
        let store = seed(6);
        let mut ids: Vec<u32> = store.transactions.iter().map(|t| t.id).collect();
        ids.extend(store.messages.iter().map(|m| m.id));
        ids.extend(store.bank_accounts.iter().map(|a| a.id));
        ids.extend(store.goals.iter().map(|g| g.id));
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_inbox_has_detectable_and_noise_messages() {
        let store = seed(6);
        let detectable = store
            .messages
            .iter()
            .filter(|m| sms::classify(&m.sender, &m.body).is_some())
            .count();
        let noise = store.messages.len() - detectable;
        assert!(detectable >= 4, "expected several bank messages, got {detectable}");
        assert!(noise >= 2, "expected some non-transaction messages, got {noise}");
    }

    #[test]
    fn test_seed_income_exceeds_nothing_weird() {
        let store = seed(6);
        let s = summary(&store.transactions);
        assert!(s.total_income > 0.0);
        assert!(s.total_expense > 0.0);
        assert!(s.balance > 0.0, "seed data should be cash-positive");
    }

    #[test]
    fn test_seed_minimum_one_month() {
        let store = seed(0);
        assert!(!store.transactions.is_empty());
    }
}
