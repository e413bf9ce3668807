use chrono::{Datelike, Local};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::fmt::money;
use crate::reports;
use crate::store::Store;
use crate::tui::{net_span, ReportView, ReportViewAction, FOOTER_STYLE, HEADER_STYLE};

const BOLD: Style = Style::new().add_modifier(Modifier::BOLD);
const HEADER_ROW_STYLE: Style = Style::new()
    .fg(Color::DarkGray)
    .add_modifier(Modifier::BOLD);

// ---------------------------------------------------------------------------
// Table-based report view (shared by all report types)
// ---------------------------------------------------------------------------

pub struct TableReportView {
    title: String,
    header: Row<'static>,
    rows: Vec<Row<'static>>,
    widths: Vec<Constraint>,
    offset: usize,
    visible_count: usize,
}

impl TableReportView {
    fn new(
        title: impl Into<String>,
        header: Row<'static>,
        rows: Vec<Row<'static>>,
        widths: Vec<Constraint>,
    ) -> Self {
        Self {
            title: title.into(),
            header,
            rows,
            widths,
            offset: 0,
            visible_count: 20,
        }
    }
}

impl ReportView for TableReportView {
    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [header_area, sep_area, content_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(format!(" {}", self.title)).style(HEADER_STYLE),
            header_area,
        );

        frame.render_widget(
            Paragraph::new("\u{2501}".repeat(area.width as usize)).style(FOOTER_STYLE),
            sep_area,
        );

        let header_overhead = 2u16;
        let visible = content_area.height.saturating_sub(header_overhead) as usize;
        self.visible_count = visible.max(1);

        let visible_rows: Vec<Row> = self
            .rows
            .iter()
            .skip(self.offset)
            .take(visible)
            .cloned()
            .collect();

        let table = Table::new(visible_rows, self.widths.clone())
            .header(self.header.clone())
            .column_spacing(2);
        frame.render_widget(table, content_area);

        let max = self.rows.len().saturating_sub(visible);
        let pos_info = if max > 0 {
            format!("  line {}/{}", self.offset + 1, self.rows.len())
        } else {
            String::new()
        };
        frame.render_widget(
            Paragraph::new(format!(" \u{2191}/\u{2193}=scroll  q/Esc=close{pos_info}"))
                .style(FOOTER_STYLE),
            footer_area,
        );
    }

    fn handle_key(&mut self, code: KeyCode) -> ReportViewAction {
        let page = self.visible_count;
        let max = self.rows.len().saturating_sub(page);
        match code {
            KeyCode::Char('q') | KeyCode::Esc => ReportViewAction::Close,
            KeyCode::Up | KeyCode::Char('k') => {
                self.offset = self.offset.saturating_sub(1);
                ReportViewAction::Continue
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.offset = (self.offset + 1).min(max);
                ReportViewAction::Continue
            }
            KeyCode::PageUp => {
                self.offset = self.offset.saturating_sub(page);
                ReportViewAction::Continue
            }
            KeyCode::PageDown => {
                self.offset = (self.offset + page).min(max);
                ReportViewAction::Continue
            }
            KeyCode::Home => {
                self.offset = 0;
                ReportViewAction::Continue
            }
            KeyCode::End => {
                self.offset = max;
                ReportViewAction::Continue
            }
            _ => ReportViewAction::Continue,
        }
    }
}

// ---------------------------------------------------------------------------
// Helper: create cells with consistent styling
// ---------------------------------------------------------------------------

fn money_cell(amount: f64) -> Cell<'static> {
    Cell::from(net_span(amount))
}

fn text_cell(s: impl Into<String>) -> Cell<'static> {
    Cell::from(s.into())
}

fn bold_cell(s: impl Into<String>) -> Cell<'static> {
    Cell::from(Span::styled(s.into(), BOLD))
}

fn blank_row(num_cols: usize) -> Row<'static> {
    Row::new(vec![Cell::from(""); num_cols])
}

// ---------------------------------------------------------------------------
// Report builders
// ---------------------------------------------------------------------------

pub fn build_summary(store: &Store) -> Box<dyn ReportView> {
    let s = reports::summary(&store.transactions);

    let widths = vec![Constraint::Fill(1), Constraint::Length(16)];
    let header = Row::new(["", "Amount"])
        .style(HEADER_ROW_STYLE)
        .bottom_margin(1);

    let rows = vec![
        Row::new([text_cell("Income"), money_cell(s.total_income)]),
        Row::new([text_cell("Expenses"), money_cell(-s.total_expense)]),
        blank_row(2),
        Row::new([bold_cell("Balance"), money_cell(s.balance)]),
        Row::new([
            text_cell("Transactions"),
            text_cell(s.txn_count.to_string()),
        ]),
    ];

    Box::new(TableReportView::new("Summary", header, rows, widths))
}

pub fn build_categories(store: &Store) -> Box<dyn ReportView> {
    let breakdown = reports::category_breakdown(&store.transactions);

    let widths = vec![
        Constraint::Fill(1),
        Constraint::Length(16),
        Constraint::Length(8),
        Constraint::Length(8),
    ];
    let header = Row::new(["Category", "Amount", "%", "Count"])
        .style(HEADER_ROW_STYLE)
        .bottom_margin(1);

    let mut rows = Vec::new();
    let mut total = 0.0;
    for item in &breakdown {
        total += item.total;
        rows.push(Row::new([
            text_cell(item.category.label()),
            money_cell(-item.total),
            text_cell(format!("{:.1}%", item.pct)),
            text_cell(item.count.to_string()),
        ]));
    }
    rows.push(blank_row(4));
    rows.push(Row::new([
        bold_cell("Total"),
        money_cell(-total),
        Cell::from(""),
        Cell::from(""),
    ]));

    Box::new(TableReportView::new(
        "Expenses by Category",
        header,
        rows,
        widths,
    ))
}

pub fn build_cashflow(store: &Store) -> Box<dyn ReportView> {
    let months = reports::monthly_cashflow(&store.transactions);

    let widths = vec![
        Constraint::Length(10),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
    ];
    let header = Row::new(["Month", "Income", "Expenses", "Net", "Running"])
        .style(HEADER_ROW_STYLE)
        .bottom_margin(1);

    let rows: Vec<Row<'static>> = months
        .iter()
        .map(|m| {
            Row::new([
                text_cell(m.month.clone()),
                money_cell(m.income),
                money_cell(-m.expense),
                money_cell(m.net),
                money_cell(m.running),
            ])
        })
        .collect();

    Box::new(TableReportView::new(
        "Monthly Cash Flow",
        header,
        rows,
        widths,
    ))
}

pub fn build_budgets(store: &Store) -> Box<dyn ReportView> {
    let now = Local::now();
    let statuses =
        reports::budget_status(&store.budgets, &store.transactions, now.year(), now.month());

    let widths = vec![
        Constraint::Fill(1),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(8),
        Constraint::Length(8),
    ];
    let header = Row::new(["Category", "Limit", "Spent", "Used", "Status"])
        .style(HEADER_ROW_STYLE)
        .bottom_margin(1);

    let over_style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
    let ok_style = Style::new().fg(Color::Rgb(80, 220, 100));

    let rows: Vec<Row<'static>> = statuses
        .iter()
        .map(|b| {
            let status = if b.over {
                Cell::from(Span::styled("OVER", over_style))
            } else {
                Cell::from(Span::styled("ok", ok_style))
            };
            Row::new([
                text_cell(b.category.label()),
                text_cell(money(b.limit)),
                text_cell(money(b.spent)),
                text_cell(format!("{:.0}%", b.pct)),
                status,
            ])
        })
        .collect();

    Box::new(TableReportView::new(
        format!("Budgets \u{2014} {}", now.format("%B %Y")),
        header,
        rows,
        widths,
    ))
}

pub fn build_goals(store: &Store) -> Box<dyn ReportView> {
    let widths = vec![
        Constraint::Fill(1),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(20),
        Constraint::Length(12),
    ];
    let header = Row::new(["Goal", "Target", "Saved", "Progress", "By"])
        .style(HEADER_ROW_STYLE)
        .bottom_margin(1);

    let rows: Vec<Row<'static>> = store
        .goals
        .iter()
        .map(|g| {
            let pct = reports::goal_progress(g);
            let filled = ((pct / 100.0) * 12.0).round() as usize;
            let bar = format!(
                "{}{} {:.0}%",
                "\u{2588}".repeat(filled.min(12)),
                "\u{2591}".repeat(12 - filled.min(12)),
                pct
            );
            Row::new([
                text_cell(g.name.clone()),
                text_cell(money(g.target_amount)),
                text_cell(money(g.saved_amount)),
                text_cell(bar),
                text_cell(
                    g.target_date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                ),
            ])
        })
        .collect();

    Box::new(TableReportView::new("Savings Goals", header, rows, widths))
}

pub fn build_loans(store: &Store) -> Box<dyn ReportView> {
    let widths = vec![
        Constraint::Fill(1),
        Constraint::Length(16),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(16),
        Constraint::Length(16),
    ];
    let header = Row::new(["Loan", "Principal", "Rate", "Paid", "EMI", "Outstanding"])
        .style(HEADER_ROW_STYLE)
        .bottom_margin(1);

    let rows: Vec<Row<'static>> = store
        .loans
        .iter()
        .map(|loan| {
            let sched = reports::emi(loan);
            Row::new([
                text_cell(loan.name.clone()),
                text_cell(money(loan.principal)),
                text_cell(format!("{:.1}%", loan.annual_rate_pct)),
                text_cell(format!("{}/{}", loan.months_paid, loan.tenure_months)),
                text_cell(money(sched.monthly_payment)),
                money_cell(-sched.outstanding),
            ])
        })
        .collect();

    Box::new(TableReportView::new("Loans", header, rows, widths))
}
