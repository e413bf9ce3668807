use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::error::{KoshError, Result};
use crate::fmt::money;
use crate::models::{SmsMessage, TxnType};
use crate::sms::classify;
use crate::store::{ScanOutcome, Store};
use crate::tui::{self, FOOTER_STYLE, HEADER_STYLE, SELECTED_STYLE};

const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone)]
struct InboxRow {
    id: u32,
    received: String,
    sender: String,
    body: String,
    processed: bool,
    verdict: String,
}

impl InboxRow {
    fn from_msg(msg: &SmsMessage) -> Self {
        let verdict = match classify(&msg.sender, &msg.body) {
            Some(d) => {
                let what = match d.txn_type {
                    TxnType::Expense => "expense",
                    TxnType::Income => "income",
                };
                match &d.merchant {
                    Some(m) => format!("{what} {} ({m})", money(d.amount)),
                    None => format!("{what} {}", money(d.amount)),
                }
            }
            None => "\u{2014}".to_string(),
        };
        Self {
            id: msg.id,
            received: msg.received_at.format("%Y-%m-%d %H:%M").to_string(),
            sender: msg.sender.clone(),
            body: msg.body.clone(),
            processed: msg.processed,
            verdict,
        }
    }
}

pub enum InboxAction {
    Continue,
    Close,
    ProcessSelected,
    ScanAll,
}

pub struct InboxScreen {
    rows: Vec<InboxRow>,
    offset: usize,
    visible_count: usize,
    selected: usize,
    status_message: Option<String>,
    table_state: TableState,
}

impl InboxScreen {
    pub fn new(messages: &[SmsMessage]) -> Self {
        Self {
            rows: messages.iter().map(InboxRow::from_msg).collect(),
            offset: 0,
            visible_count: PAGE_SIZE,
            selected: 0,
            status_message: None,
            table_state: TableState::default(),
        }
    }

    pub fn run(&mut self, store: &mut Store) -> io::Result<()> {
        if self.rows.is_empty() {
            println!("Inbox is empty.");
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

    fn event_loop(
        &mut self,
        terminal: &mut ratatui::DefaultTerminal,
        store: &mut Store,
    ) -> io::Result<()> {
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
                    InboxAction::Close => break,
                    InboxAction::Continue => {}
                    InboxAction::ProcessSelected => {
                        if let Err(e) = self.process_selected(store) {
                            self.status_message = Some(format!("Process failed: {e}"));
                        }
                    }
                    InboxAction::ScanAll => {
                        if let Err(e) = self.scan_all(store) {
                            self.status_message = Some(format!("Scan failed: {e}"));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn draw_frame(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let areas = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Fill(1),   // table
            Constraint::Length(1), // status
            Constraint::Length(1), // keys
        ])
        .split(area);
        let title_area = areas[0];
        let table_area = areas[1];
        let status_area = areas[2];
        let keys_area = areas[3];

        frame.render_widget(Paragraph::new("SMS Inbox").style(HEADER_STYLE), title_area);

        // Message column gets the remaining width
        let fixed_cols: u16 = 2 + 16 + 12 + 26;
        let spacing = 4u16;
        let body_width = table_area.width.saturating_sub(fixed_cols + spacing) as usize;
        let body_width = body_width.max(16);

        let header_overhead = 2u16;
        let available_height = table_area.height.saturating_sub(header_overhead) as usize;
        let mut rendered_rows = Vec::new();
        let mut total_height = 0usize;
        let mut vis = 0usize;

        for row in self.rows.iter().skip(self.offset) {
            let (wrapped_body, line_count) = tui::wrap_text(&row.body, body_width);
            let h = line_count as usize;
            if total_height + h > available_height && vis > 0 {
                break;
            }

            rendered_rows.push(
                Row::new(vec![
                    Cell::from(if row.processed { "\u{2713}" } else { "" }),
                    Cell::from(row.received.clone()),
                    Cell::from(row.sender.clone()),
                    Cell::from(wrapped_body),
                    Cell::from(row.verdict.clone()),
                ])
                .height(line_count),
            );
            total_height += h;
            vis += 1;
        }
        self.visible_count = vis.max(1);

        let widths = vec![
            Constraint::Length(2),
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Fill(1),
            Constraint::Length(26),
        ];

        self.table_state.select(Some(self.selected));
        let table = Table::new(rendered_rows, widths)
            .header(
                Row::new(vec!["", "Received", "Sender", "Message", "Detection"])
                    .style(HEADER_STYLE)
                    .bottom_margin(1),
            )
            .column_spacing(1)
            .row_highlight_style(SELECTED_STYLE);
        frame.render_stateful_widget(table, table_area, &mut self.table_state);

        let unprocessed = self.rows.iter().filter(|r| !r.processed).count();
        let end_row = (self.offset + self.visible_count).min(self.rows.len());
        let status = if let Some(ref msg) = self.status_message {
            format!(
                "Rows {}-{} of {} | {} unprocessed | {}",
                self.offset + 1,
                end_row,
                self.rows.len(),
                unprocessed,
                msg,
            )
        } else {
            format!(
                "Rows {}-{} of {} | {} unprocessed",
                self.offset + 1,
                end_row,
                self.rows.len(),
                unprocessed,
            )
        };
        frame.render_widget(Paragraph::new(status).style(FOOTER_STYLE), status_area);

        frame.render_widget(
            Paragraph::new(
                "\u{2191}/\u{2193}:select  Enter:record transaction  a:scan all  q:quit",
            )
            .style(FOOTER_STYLE),
            keys_area,
        );
    }

    pub fn handle_key_event(&mut self, code: KeyCode) -> InboxAction {
        self.status_message = None;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => InboxAction::Close,
            KeyCode::Down => {
                if self.selected + 1 < self.visible_count.min(self.rows.len() - self.offset) {
                    self.selected += 1;
                } else if self.offset + self.visible_count < self.rows.len() {
                    self.offset += 1;
                }
                InboxAction::Continue
            }
            KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                } else if self.offset > 0 {
                    self.offset -= 1;
                }
                InboxAction::Continue
            }
            KeyCode::PageDown | KeyCode::Right => {
                let new_offset = self.offset + self.visible_count;
                if new_offset < self.rows.len() {
                    self.offset = new_offset;
                }
                self.selected = 0;
                InboxAction::Continue
            }
            KeyCode::PageUp | KeyCode::Left => {
                self.offset = self.offset.saturating_sub(self.visible_count);
                self.selected = 0;
                InboxAction::Continue
            }
            KeyCode::Enter => InboxAction::ProcessSelected,
            KeyCode::Char('a') => InboxAction::ScanAll,
            _ => InboxAction::Continue,
        }
    }

    fn selected_id(&self) -> Option<u32> {
        self.rows.get(self.offset + self.selected).map(|r| r.id)
    }

    pub fn process_selected(&mut self, store: &mut Store) -> Result<()> {
        let msg_id = self
            .selected_id()
            .ok_or_else(|| KoshError::Other("No message selected".into()))?;
        match store.record_from_sms(msg_id)? {
            ScanOutcome::Recorded(txn_id) => {
                self.refresh(store);
                self.status_message = Some(format!("Recorded transaction #{txn_id} from #{msg_id}"));
            }
            ScanOutcome::NotATransaction => {
                self.status_message = Some(format!("#{msg_id} is not a bank transaction"));
            }
            ScanOutcome::AlreadyProcessed => {
                self.status_message = Some(format!("#{msg_id} was already processed"));
            }
        }
        Ok(())
    }

    pub fn scan_all(&mut self, store: &mut Store) -> Result<()> {
        let result = store.scan_inbox()?;
        self.refresh(store);
        self.status_message = Some(format!(
            "Scan complete: {} recorded, {} skipped",
            result.recorded, result.skipped
        ));
        Ok(())
    }

    fn refresh(&mut self, store: &Store) {
        self.rows = store.messages.iter().map(InboxRow::from_msg).collect();
        if self.offset + self.selected >= self.rows.len() && !self.rows.is_empty() {
            self.offset = 0;
            self.selected = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock;

    #[test]
    fn test_handle_key_close_on_q() {
        let store = mock::seed(1);
        let mut screen = InboxScreen::new(&store.messages);
        assert!(matches!(screen.handle_key_event(KeyCode::Char('q')), InboxAction::Close));
    }

    #[test]
    fn test_process_selected_records_once() {
        let mut store = mock::seed(1);
        let mut screen = InboxScreen::new(&store.messages);
        let before = store.transactions.len();

        // First seeded message is a bank debit
        screen.process_selected(&mut store).unwrap();
        assert_eq!(store.transactions.len(), before + 1);

        // Processing the same message again is a no-op
        screen.process_selected(&mut store).unwrap();
        assert_eq!(store.transactions.len(), before + 1);
        assert!(screen.status_message.as_ref().unwrap().contains("already processed"));
    }

    #[test]
    fn test_scan_all_updates_rows() {
        let mut store = mock::seed(1);
        let mut screen = InboxScreen::new(&store.messages);
        screen.scan_all(&mut store).unwrap();
        assert_eq!(store.unprocessed_count(), screen.rows.iter().filter(|r| !r.processed).count());
        assert!(screen.rows.iter().any(|r| r.processed));
    }
}
