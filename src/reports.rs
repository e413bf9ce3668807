use std::collections::BTreeMap;

use chrono::Datelike;

use crate::models::{Budget, Category, Goal, Loan, Transaction, TxnType};

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

pub struct Summary {
    pub total_income: f64,
    pub total_expense: f64,
    /// Always income minus expense.
    pub balance: f64,
    pub txn_count: usize,
}

pub fn summary(txns: &[Transaction]) -> Summary {
    let total_income: f64 = txns
        .iter()
        .filter(|t| t.txn_type == TxnType::Income)
        .map(|t| t.amount)
        .sum();
    let total_expense: f64 = txns
        .iter()
        .filter(|t| t.txn_type == TxnType::Expense)
        .map(|t| t.amount)
        .sum();
    Summary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        txn_count: txns.len(),
    }
}

// ---------------------------------------------------------------------------
// Category breakdown (expenses)
// ---------------------------------------------------------------------------

pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
    pub count: usize,
    pub pct: f64,
}

/// Group expense amounts by category, largest first. Covers every category
/// that appears; group totals sum to the expense total.
pub fn category_breakdown(txns: &[Transaction]) -> Vec<CategoryTotal> {
    let mut by_category: BTreeMap<Category, (f64, usize)> = BTreeMap::new();
    for txn in txns.iter().filter(|t| t.txn_type == TxnType::Expense) {
        let entry = by_category.entry(txn.category).or_insert((0.0, 0));
        entry.0 += txn.amount;
        entry.1 += 1;
    }

    let total: f64 = by_category.values().map(|(t, _)| t).sum();
    let mut rows: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, (cat_total, count))| CategoryTotal {
            category,
            total: cat_total,
            count,
            pct: if total != 0.0 { cat_total / total * 100.0 } else { 0.0 },
        })
        .collect();
    rows.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));
    rows
}

// ---------------------------------------------------------------------------
// Monthly cash flow
// ---------------------------------------------------------------------------

pub struct MonthFlow {
    pub month: String,
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    pub running: f64,
}

pub fn monthly_cashflow(txns: &[Transaction]) -> Vec<MonthFlow> {
    let mut by_month: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for txn in txns {
        let key = format!("{:04}-{:02}", txn.date.year(), txn.date.month());
        let entry = by_month.entry(key).or_insert((0.0, 0.0));
        match txn.txn_type {
            TxnType::Income => entry.0 += txn.amount,
            TxnType::Expense => entry.1 += txn.amount,
        }
    }

    let mut months = Vec::new();
    let mut running = 0.0f64;
    for (month, (income, expense)) in by_month {
        let net = income - expense;
        running += net;
        months.push(MonthFlow {
            month,
            income,
            expense,
            net,
            running,
        });
    }
    months
}

// ---------------------------------------------------------------------------
// Budgets
// ---------------------------------------------------------------------------

pub struct BudgetStatus {
    pub category: Category,
    pub limit: f64,
    pub spent: f64,
    pub pct: f64,
    pub over: bool,
}

/// Spend vs monthly limit per budgeted category for one month. A zero-limit
/// budget reports 100% when there is any spending against it (avoids the
/// division blowing up), 0% otherwise.
pub fn budget_status(
    budgets: &[Budget],
    txns: &[Transaction],
    year: i32,
    month: u32,
) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|budget| {
            let spent: f64 = txns
                .iter()
                .filter(|t| {
                    t.txn_type == TxnType::Expense
                        && t.category == budget.category
                        && t.date.year() == year
                        && t.date.month() == month
                })
                .map(|t| t.amount)
                .sum();
            let pct = if budget.monthly_limit > 0.0 {
                spent / budget.monthly_limit * 100.0
            } else if spent > 0.0 {
                100.0
            } else {
                0.0
            };
            BudgetStatus {
                category: budget.category,
                limit: budget.monthly_limit,
                spent,
                pct,
                over: spent > budget.monthly_limit,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

/// Percent saved toward the target, clamped to 100.
pub fn goal_progress(goal: &Goal) -> f64 {
    if goal.target_amount <= 0.0 {
        return 100.0;
    }
    (goal.saved_amount / goal.target_amount * 100.0).min(100.0)
}

// ---------------------------------------------------------------------------
// Loans (standard amortization arithmetic)
// ---------------------------------------------------------------------------

pub struct EmiSchedule {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    /// Balance remaining after the payments already made.
    pub outstanding: f64,
}

pub fn emi(loan: &Loan) -> EmiSchedule {
    let n = loan.tenure_months as f64;
    let k = loan.months_paid.min(loan.tenure_months) as f64;
    let r = loan.annual_rate_pct / 12.0 / 100.0;

    let (monthly_payment, outstanding) = if r == 0.0 {
        let pay = loan.principal / n;
        (pay, loan.principal - pay * k)
    } else {
        let factor = (1.0 + r).powf(n);
        let pay = loan.principal * r * factor / (factor - 1.0);
        let grown = (1.0 + r).powf(k);
        let balance = loan.principal * grown - pay * (grown - 1.0) / r;
        (pay, balance)
    };

    let total_payment = monthly_payment * n;
    EmiSchedule {
        monthly_payment,
        total_payment,
        total_interest: total_payment - loan.principal,
        outstanding: outstanding.max(0.0),
    }
}

// ---------------------------------------------------------------------------
// Filtering and sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct TxnFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub category: Option<Category>,
    pub txn_type: Option<TxnType>,
    /// Case-insensitive match on description, merchant, or note.
    pub search: Option<String>,
}

impl TxnFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(year) = self.year {
            if txn.date.year() != year {
                return false;
            }
        }
        if let Some(month) = self.month {
            if txn.date.month() != month {
                return false;
            }
        }
        if let Some(category) = self.category {
            if txn.category != category {
                return false;
            }
        }
        if let Some(txn_type) = self.txn_type {
            if txn.txn_type != txn_type {
                return false;
            }
        }
        if let Some(q) = &self.search {
            let q = q.to_lowercase();
            let hit = txn.description.to_lowercase().contains(&q)
                || txn
                    .merchant
                    .as_deref()
                    .is_some_and(|m| m.to_lowercase().contains(&q))
                || txn
                    .note
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&q));
            if !hit {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Date,
    Amount,
    Category,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Amount => "amount",
            SortKey::Category => "category",
        }
    }

    pub fn next(&self) -> SortKey {
        match self {
            SortKey::Date => SortKey::Amount,
            SortKey::Amount => SortKey::Category,
            SortKey::Category => SortKey::Date,
        }
    }
}

pub fn filter_transactions<'a>(txns: &'a [Transaction], filter: &TxnFilter) -> Vec<&'a Transaction> {
    txns.iter().filter(|t| filter.matches(t)).collect()
}

pub fn sort_transactions(rows: &mut [&Transaction], key: SortKey, descending: bool) {
    match key {
        SortKey::Date => rows.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id))),
        SortKey::Amount => rows.sort_by(|a, b| {
            a.amount
                .partial_cmp(&b.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.id.cmp(&b.id))
        }),
        SortKey::Category => {
            rows.sort_by(|a, b| a.category.cmp(&b.category).then(a.date.cmp(&b.date)))
        }
    }
    if descending {
        rows.reverse();
    }
}
