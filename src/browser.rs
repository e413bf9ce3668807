use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    DefaultTerminal, Frame,
};

use crate::error::{KoshError, Result};
use crate::fmt::money;
use crate::models::{Category, Transaction, ALL_CATEGORIES};
use crate::reports::SortKey;
use crate::store::{Store, TxnPatch};
use crate::tui::{self, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE};

const PAGE_SIZE: usize = 20;

/// Snapshot of one transaction for display. The browser works on these and
/// pushes edits back to the store by id.
#[derive(Debug, Clone)]
pub struct BrowseRow {
    pub id: u32,
    pub date: String,
    pub description: String,
    pub merchant: Option<String>,
    pub amount: f64,
    pub is_expense: bool,
    pub category: Category,
    pub auto_detected: bool,
}

impl BrowseRow {
    pub fn from_txn(txn: &Transaction) -> Self {
        Self {
            id: txn.id,
            date: txn.date.format("%Y-%m-%d").to_string(),
            description: txn.description.clone(),
            merchant: txn.merchant.clone(),
            amount: txn.amount,
            is_expense: txn.txn_type == crate::models::TxnType::Expense,
            category: txn.category,
            auto_detected: txn.auto_detected,
        }
    }

    fn signed(&self) -> f64 {
        if self.is_expense {
            -self.amount
        } else {
            self.amount
        }
    }
}

enum BrowseMode {
    Normal,
    Search(String),
    EditCategory { query: String, selection: usize },
    ConfirmDelete,
}

pub enum BrowseAction {
    Continue,
    Close,
    CommitEdit,
    Delete,
}

pub struct TxnBrowser {
    all_rows: Vec<BrowseRow>,
    rows: Vec<BrowseRow>,
    search: String,
    sort_key: SortKey,
    offset: usize,
    visible_count: usize,
    selected: usize,
    mode: BrowseMode,
    status_message: Option<String>,
    pending_category: Option<Category>,
    table_state: TableState,
}

impl TxnBrowser {
    pub fn new(txns: &[Transaction]) -> Self {
        let mut all_rows: Vec<BrowseRow> = txns.iter().map(BrowseRow::from_txn).collect();
        all_rows.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        let rows = all_rows.clone();
        Self {
            all_rows,
            rows,
            search: String::new(),
            sort_key: SortKey::Date,
            offset: 0,
            visible_count: PAGE_SIZE,
            selected: 0,
            mode: BrowseMode::Normal,
            status_message: None,
            pending_category: None,
            table_state: TableState::default(),
        }
    }

    pub fn run(&mut self, store: &mut Store) -> io::Result<()> {
        if self.rows.is_empty() {
            println!("No transactions found.");
            return Ok(());
        }

        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            ratatui::restore();
            hook(info);
        }));

        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal, store);
        ratatui::restore();
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal, store: &mut Store) -> io::Result<()> {
        loop {
            terminal.draw(|frame| self.draw_frame(frame))?;

            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) = event::read()?
            {
                if kind != KeyEventKind::Press {
                    continue;
                }

                if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
                    break;
                }

                match self.handle_key_event(code) {
                    BrowseAction::Close => break,
                    BrowseAction::Continue => {}
                    BrowseAction::CommitEdit => {
                        if let Err(e) = self.commit_edit(store) {
                            self.status_message = Some(format!("Edit failed: {e}"));
                        }
                    }
                    BrowseAction::Delete => {
                        if let Err(e) = self.delete_selected(store) {
                            self.status_message = Some(format!("Delete failed: {e}"));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Draw the browser into the given frame. Callable from an external event loop.
    pub fn draw_frame(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let narrow = area.width < 100;

        let edit_height: u16 = match &self.mode {
            BrowseMode::EditCategory { .. } => {
                let matches = self.filtered_categories().len();
                1 + matches.min(9) as u16
            }
            _ => 0,
        };

        let areas = Layout::vertical([
            Constraint::Length(1),           // title
            Constraint::Fill(1),             // table
            Constraint::Length(edit_height), // edit panel
            Constraint::Length(1),           // status
            Constraint::Length(1),           // keys
        ])
        .split(area);
        let title_area = areas[0];
        let table_area = areas[1];
        let edit_area = areas[2];
        let status_area = areas[3];
        let keys_area = areas[4];

        frame.render_widget(
            Paragraph::new("Transactions").style(HEADER_STYLE),
            title_area,
        );

        // Description column gets whatever is left after the fixed columns
        let (fixed_cols, num_cols): (u16, u16) = if narrow {
            (2 + 5 + 10 + 13 + 14, 6)
        } else {
            (2 + 5 + 10 + 13 + 14 + 18, 7)
        };
        let spacing = num_cols - 1;
        let desc_width = table_area.width.saturating_sub(fixed_cols + spacing) as usize;
        let desc_width = desc_width.max(10);

        let header_overhead = 2u16; // header row + bottom_margin
        let available_height = table_area.height.saturating_sub(header_overhead) as usize;
        let mut rendered_rows = Vec::new();
        let mut total_height = 0usize;
        let mut vis = 0usize;

        for row_data in self.rows.iter().skip(self.offset) {
            let (wrapped_desc, line_count) = tui::wrap_text(&row_data.description, desc_width);
            let h = line_count as usize;

            if total_height + h > available_height && vis > 0 {
                break;
            }

            let amt = tui::net_span(row_data.signed());
            let auto_cell = Cell::from(if row_data.auto_detected { "\u{25cf}" } else { "" });

            let cells: Vec<Cell> = if narrow {
                vec![
                    auto_cell,
                    Cell::from(row_data.id.to_string()),
                    Cell::from(row_data.date.clone()),
                    Cell::from(wrapped_desc),
                    Cell::from(amt),
                    Cell::from(row_data.category.label()),
                ]
            } else {
                let merchant = row_data.merchant.as_deref().unwrap_or("").to_string();
                vec![
                    auto_cell,
                    Cell::from(row_data.id.to_string()),
                    Cell::from(row_data.date.clone()),
                    Cell::from(wrapped_desc),
                    Cell::from(amt),
                    Cell::from(row_data.category.label()),
                    Cell::from(merchant),
                ]
            };

            rendered_rows.push(Row::new(cells).height(line_count));
            total_height += h;
            vis += 1;
        }

        self.visible_count = vis.max(1);

        let widths: Vec<Constraint> = if narrow {
            vec![
                Constraint::Length(2),
                Constraint::Length(5),
                Constraint::Length(10),
                Constraint::Fill(1),
                Constraint::Length(13),
                Constraint::Length(14),
            ]
        } else {
            vec![
                Constraint::Length(2),
                Constraint::Length(5),
                Constraint::Length(10),
                Constraint::Fill(1),
                Constraint::Length(13),
                Constraint::Length(14),
                Constraint::Length(18),
            ]
        };

        let header_cells: Vec<&str> = if narrow {
            vec!["", "ID", "Date", "Description", "Amount", "Category"]
        } else {
            vec!["", "ID", "Date", "Description", "Amount", "Category", "Merchant"]
        };

        self.table_state.select(Some(self.selected));
        let table = Table::new(rendered_rows, widths)
            .header(Row::new(header_cells).style(HEADER_STYLE).bottom_margin(1))
            .column_spacing(1)
            .row_highlight_style(SELECTED_STYLE);

        frame.render_stateful_widget(table, table_area, &mut self.table_state);

        if edit_height > 0 {
            let edit_lines: Vec<Line> = match &self.mode {
                BrowseMode::EditCategory { query, selection } => {
                    let matches = self.filtered_categories();
                    let mut lines = vec![Line::from(format!("  Category: {query}\u{2588}"))];
                    if !query.is_empty() && matches.is_empty() {
                        lines.push(Line::from(Span::styled(
                            "    (no matches)",
                            Style::default().fg(Color::DarkGray),
                        )));
                    } else {
                        for (i, (_, label)) in matches.iter().enumerate() {
                            let marker = if i == *selection { ">" } else { " " };
                            lines.push(Line::from(format!("  {marker} {label}")));
                        }
                    }
                    lines
                }
                _ => vec![],
            };
            frame.render_widget(Paragraph::new(edit_lines), edit_area);
        }

        // Status line
        let net: f64 = self.rows.iter().map(|r| r.signed()).sum();
        let end_row = (self.offset + self.visible_count).min(self.rows.len());
        let search = if self.search.is_empty() {
            String::new()
        } else {
            format!(" | filter: {}", self.search)
        };
        let status = if let Some(ref msg) = self.status_message {
            format!(
                "Rows {}-{} of {} | Net: {} | sort: {}{} | {}",
                self.offset + 1,
                end_row,
                self.rows.len(),
                money(net),
                self.sort_key.label(),
                search,
                msg,
            )
        } else {
            format!(
                "Rows {}-{} of {} | Net: {} | sort: {}{}",
                self.offset + 1,
                end_row,
                self.rows.len(),
                money(net),
                self.sort_key.label(),
                search,
            )
        };
        frame.render_widget(Paragraph::new(status).style(FOOTER_STYLE), status_area);

        let keys_widget = match &self.mode {
            BrowseMode::Normal => Paragraph::new(
                "\u{2191}/\u{2193}:select  e:category  d:delete  s:sort  /:search  n/\u{2192}:next  p/\u{2190}:prev  q:quit",
            )
            .style(FOOTER_STYLE),
            BrowseMode::Search(input) => Paragraph::new(format!("Search: {input}\u{2588}")),
            BrowseMode::EditCategory { .. } => {
                Paragraph::new("Type to filter, Enter=select, Esc=cancel").style(FOOTER_STYLE)
            }
            BrowseMode::ConfirmDelete => {
                Paragraph::new("Delete selected transaction? y/n").style(HEADER_STYLE)
            }
        };
        frame.render_widget(keys_widget, keys_area);
    }

    /// Handle a key event. Returns a BrowseAction indicating what the caller should do.
    pub fn handle_key_event(&mut self, code: KeyCode) -> BrowseAction {
        self.status_message = None;

        match &self.mode {
            BrowseMode::Normal => match code {
                KeyCode::Char('q') | KeyCode::Esc => return BrowseAction::Close,
                KeyCode::Down => {
                    if self.selected + 1 < self.visible_count.min(self.rows.len() - self.offset) {
                        self.selected += 1;
                    } else if self.offset + self.visible_count < self.rows.len() {
                        self.offset += 1;
                    }
                }
                KeyCode::Up => {
                    if self.selected > 0 {
                        self.selected -= 1;
                    } else if self.offset > 0 {
                        self.offset -= 1;
                    }
                }
                KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => {
                    self.scroll_down();
                    self.selected = 0;
                }
                KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => {
                    self.scroll_up();
                    self.selected = 0;
                }
                KeyCode::Home => {
                    self.offset = 0;
                    self.selected = 0;
                }
                KeyCode::End => {
                    self.scroll_to_end();
                    self.selected = 0;
                }
                KeyCode::Char('/') => {
                    self.mode = BrowseMode::Search(self.search.clone());
                }
                KeyCode::Char('s') => {
                    self.sort_key = self.sort_key.next();
                    self.apply_view();
                }
                KeyCode::Char('e') | KeyCode::Enter => {
                    self.mode = BrowseMode::EditCategory {
                        query: String::new(),
                        selection: 0,
                    };
                }
                KeyCode::Char('d') => {
                    if !self.rows.is_empty() {
                        self.mode = BrowseMode::ConfirmDelete;
                    }
                }
                _ => {}
            },
            BrowseMode::Search(_) => match code {
                KeyCode::Esc => self.mode = BrowseMode::Normal,
                KeyCode::Enter => self.submit_search(),
                KeyCode::Backspace => {
                    if let BrowseMode::Search(s) = &mut self.mode {
                        s.pop();
                    }
                }
                KeyCode::Char(c) => {
                    if let BrowseMode::Search(s) = &mut self.mode {
                        s.push(c);
                    }
                }
                _ => {}
            },
            BrowseMode::EditCategory { .. } => {
                return self.handle_edit_category_key(code);
            }
            BrowseMode::ConfirmDelete => match code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.mode = BrowseMode::Normal;
                    return BrowseAction::Delete;
                }
                _ => {
                    self.mode = BrowseMode::Normal;
                }
            },
        }
        BrowseAction::Continue
    }

    fn scroll_down(&mut self) {
        let new_offset = self.offset + self.visible_count;
        if new_offset < self.rows.len() {
            self.offset = new_offset;
        }
    }

    fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(self.visible_count);
    }

    fn scroll_to_end(&mut self) {
        self.offset = self.rows.len().saturating_sub(PAGE_SIZE);
    }

    /// Rebuild the visible rows from the full set: search filter, then sort.
    fn apply_view(&mut self) {
        let q = self.search.to_lowercase();
        self.rows = self
            .all_rows
            .iter()
            .filter(|r| {
                q.is_empty()
                    || r.description.to_lowercase().contains(&q)
                    || r.merchant
                        .as_deref()
                        .is_some_and(|m| m.to_lowercase().contains(&q))
                    || r.category.label().to_lowercase().contains(&q)
            })
            .cloned()
            .collect();
        match self.sort_key {
            SortKey::Date => self.rows.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id))),
            SortKey::Amount => self.rows.sort_by(|a, b| {
                b.amount
                    .partial_cmp(&a.amount)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.id.cmp(&b.id))
            }),
            SortKey::Category => self
                .rows
                .sort_by(|a, b| a.category.cmp(&b.category).then(a.date.cmp(&b.date))),
        }
        self.offset = 0;
        self.selected = 0;
    }

    fn submit_search(&mut self) {
        let mode = std::mem::replace(&mut self.mode, BrowseMode::Normal);
        if let BrowseMode::Search(input) = mode {
            self.search = input.trim().to_string();
            self.apply_view();
            if self.rows.is_empty() {
                self.status_message = Some(format!("No matches for '{}'", self.search));
                self.search.clear();
                self.apply_view();
            }
        }
    }

    fn filtered_categories(&self) -> Vec<(Category, &'static str)> {
        let query = match &self.mode {
            BrowseMode::EditCategory { query, .. } => query,
            _ => return vec![],
        };
        if query.is_empty() {
            return ALL_CATEGORIES.iter().map(|c| (*c, c.label())).take(9).collect();
        }
        let q = query.to_lowercase();
        ALL_CATEGORIES
            .iter()
            .filter(|c| c.label().to_lowercase().contains(&q))
            .map(|c| (*c, c.label()))
            .take(9)
            .collect()
    }

    fn handle_edit_category_key(&mut self, code: KeyCode) -> BrowseAction {
        match code {
            KeyCode::Char(c) => {
                if let BrowseMode::EditCategory { query, selection } = &mut self.mode {
                    query.push(c);
                    *selection = 0;
                }
            }
            KeyCode::Backspace => {
                if let BrowseMode::EditCategory { query, selection } = &mut self.mode {
                    query.pop();
                    *selection = 0;
                }
            }
            KeyCode::Up => {
                if let BrowseMode::EditCategory { selection, .. } = &mut self.mode {
                    *selection = selection.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                // Count before mutably borrowing self.mode
                let count = self.filtered_categories().len();
                if let BrowseMode::EditCategory { selection, .. } = &mut self.mode {
                    if count > 0 && *selection + 1 < count {
                        *selection += 1;
                    }
                }
            }
            KeyCode::Enter => {
                let matches = self.filtered_categories();
                if !matches.is_empty() {
                    let sel_idx = match &self.mode {
                        BrowseMode::EditCategory { selection, .. } => {
                            (*selection).min(matches.len() - 1)
                        }
                        _ => 0,
                    };
                    self.pending_category = Some(matches[sel_idx].0);
                    self.mode = BrowseMode::Normal;
                    return BrowseAction::CommitEdit;
                }
            }
            KeyCode::Esc => {
                self.mode = BrowseMode::Normal;
                self.pending_category = None;
            }
            _ => {}
        }
        BrowseAction::Continue
    }

    fn selected_id(&self) -> Option<u32> {
        self.rows.get(self.offset + self.selected).map(|r| r.id)
    }

    pub fn commit_edit(&mut self, store: &mut Store) -> Result<()> {
        let txn_id = self
            .selected_id()
            .ok_or_else(|| KoshError::Other("No row selected".into()))?;
        let category = match self.pending_category.take() {
            Some(c) => c,
            None => return Ok(()),
        };

        store.update_transaction(
            txn_id,
            TxnPatch {
                category: Some(category),
                ..Default::default()
            },
        )?;

        for row in self
            .all_rows
            .iter_mut()
            .chain(self.rows.iter_mut())
            .filter(|r| r.id == txn_id)
        {
            row.category = category;
        }
        self.status_message = Some(format!("Updated transaction #{txn_id}"));
        Ok(())
    }

    pub fn delete_selected(&mut self, store: &mut Store) -> Result<()> {
        let txn_id = self
            .selected_id()
            .ok_or_else(|| KoshError::Other("No row selected".into()))?;
        if !store.delete_transaction(txn_id) {
            return Err(KoshError::UnknownTransaction(txn_id));
        }
        self.all_rows.retain(|r| r.id != txn_id);
        self.rows.retain(|r| r.id != txn_id);
        if self.offset + self.selected >= self.rows.len() {
            if self.selected > 0 {
                self.selected -= 1;
            } else {
                self.offset = self.offset.saturating_sub(1);
            }
        }
        self.status_message = Some(format!("Deleted transaction #{txn_id}"));
        Ok(())
    }

    pub fn set_status(&mut self, msg: String) {
        self.status_message = Some(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TxnType;
    use crate::store::NewTransaction;
    use chrono::NaiveDate;

    fn seeded_store(n: usize) -> Store {
        let mut store = Store::new();
        for i in 0..n {
            let day = (i % 28) as u32 + 1;
            store
                .add_transaction(NewTransaction {
                    amount: 100.0 + i as f64,
                    txn_type: if i % 2 == 0 { TxnType::Expense } else { TxnType::Income },
                    category: if i % 3 == 0 { Category::Food } else { Category::Bills },
                    description: format!("Transaction {}", i + 1),
                    merchant: if i % 4 == 0 { Some("Zomato".to_string()) } else { None },
                    date: NaiveDate::from_ymd_opt(2026, 1, day)
                        .unwrap()
                        .and_hms_opt(12, 0, 0)
                        .unwrap(),
                    note: None,
                })
                .unwrap();
        }
        store
    }

    #[test]
    fn test_scroll_down() {
        let store = seeded_store(50);
        let mut browser = TxnBrowser::new(&store.transactions);
        assert_eq!(browser.offset, 0);

        browser.scroll_down();
        assert_eq!(browser.offset, PAGE_SIZE);

        browser.scroll_down();
        assert_eq!(browser.offset, PAGE_SIZE * 2);
    }

    #[test]
    fn test_scroll_down_stops_at_end() {
        let store = seeded_store(10);
        let mut browser = TxnBrowser::new(&store.transactions);
        browser.scroll_down(); // 10 < PAGE_SIZE, so offset stays
        assert_eq!(browser.offset, 0);
    }

    #[test]
    fn test_scroll_up() {
        let store = seeded_store(50);
        let mut browser = TxnBrowser::new(&store.transactions);
        browser.offset = PAGE_SIZE * 2;

        browser.scroll_up();
        assert_eq!(browser.offset, PAGE_SIZE);

        browser.scroll_up();
        assert_eq!(browser.offset, 0);

        browser.scroll_up(); // doesn't go negative
        assert_eq!(browser.offset, 0);
    }

    #[test]
    fn test_handle_key_returns_close_on_q() {
        let store = seeded_store(5);
        let mut browser = TxnBrowser::new(&store.transactions);
        let action = browser.handle_key_event(KeyCode::Char('q'));
        assert!(matches!(action, BrowseAction::Close));
    }

    #[test]
    fn test_selected_row_up_down() {
        let store = seeded_store(50);
        let mut browser = TxnBrowser::new(&store.transactions);
        assert_eq!(browser.selected, 0);

        browser.handle_key_event(KeyCode::Down);
        assert_eq!(browser.selected, 1);

        browser.handle_key_event(KeyCode::Up);
        assert_eq!(browser.selected, 0);

        // Can't go below 0
        browser.handle_key_event(KeyCode::Up);
        assert_eq!(browser.selected, 0);
    }

    #[test]
    fn test_search_filters_rows() {
        let store = seeded_store(20);
        let mut browser = TxnBrowser::new(&store.transactions);

        browser.mode = BrowseMode::Search("zomato".to_string());
        browser.submit_search();
        assert_eq!(browser.rows.len(), 5); // every 4th of 20 has merchant Zomato
        assert!(browser.rows.iter().all(|r| r.merchant.as_deref() == Some("Zomato")));
    }

    #[test]
    fn test_search_no_match_restores_all() {
        let store = seeded_store(10);
        let mut browser = TxnBrowser::new(&store.transactions);

        browser.mode = BrowseMode::Search("nothing-here".to_string());
        browser.submit_search();
        assert_eq!(browser.rows.len(), 10);
        assert!(browser.status_message.is_some());
    }

    #[test]
    fn test_sort_cycles_and_reorders() {
        let store = seeded_store(10);
        let mut browser = TxnBrowser::new(&store.transactions);
        assert_eq!(browser.sort_key, SortKey::Date);

        browser.handle_key_event(KeyCode::Char('s'));
        assert_eq!(browser.sort_key, SortKey::Amount);
        // Amount sort shows the largest first
        assert!(browser.rows[0].amount >= browser.rows[1].amount);

        browser.handle_key_event(KeyCode::Char('s'));
        assert_eq!(browser.sort_key, SortKey::Category);
        browser.handle_key_event(KeyCode::Char('s'));
        assert_eq!(browser.sort_key, SortKey::Date);
    }

    #[test]
    fn test_edit_category_filter_and_commit() {
        let mut store = seeded_store(5);
        let mut browser = TxnBrowser::new(&store.transactions);

        browser.handle_key_event(KeyCode::Char('e'));
        browser.handle_key_event(KeyCode::Char('t'));
        browser.handle_key_event(KeyCode::Char('r'));
        browser.handle_key_event(KeyCode::Char('a'));
        browser.handle_key_event(KeyCode::Char('n'));

        let matches = browser.filtered_categories();
        // "tran" matches Transport and Transfer
        assert_eq!(matches.len(), 2);

        let action = browser.handle_key_event(KeyCode::Enter);
        assert!(matches!(action, BrowseAction::CommitEdit));
        let txn_id = browser.selected_id().unwrap();
        browser.commit_edit(&mut store).unwrap();
        assert_eq!(store.transaction(txn_id).unwrap().category, Category::Transport);
    }

    #[test]
    fn test_esc_cancels_edit() {
        let store = seeded_store(5);
        let mut browser = TxnBrowser::new(&store.transactions);

        browser.handle_key_event(KeyCode::Char('e'));
        browser.handle_key_event(KeyCode::Esc);
        assert!(matches!(browser.mode, BrowseMode::Normal));
        assert!(browser.pending_category.is_none());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut store = seeded_store(5);
        let mut browser = TxnBrowser::new(&store.transactions);

        let action = browser.handle_key_event(KeyCode::Char('d'));
        assert!(matches!(action, BrowseAction::Continue));
        assert!(matches!(browser.mode, BrowseMode::ConfirmDelete));

        // 'n' cancels
        browser.handle_key_event(KeyCode::Char('n'));
        assert!(matches!(browser.mode, BrowseMode::Normal));
        assert_eq!(store.transactions.len(), 5);

        // 'd' then 'y' deletes exactly one
        browser.handle_key_event(KeyCode::Char('d'));
        let action = browser.handle_key_event(KeyCode::Char('y'));
        assert!(matches!(action, BrowseAction::Delete));
        browser.delete_selected(&mut store).unwrap();
        assert_eq!(store.transactions.len(), 4);
        assert_eq!(browser.rows.len(), 4);
    }
}
