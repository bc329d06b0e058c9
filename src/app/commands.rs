//! Command handlers - business logic for processing UI events

use crate::app::workflow::{Step, SubmissionWorkflow};
use crate::app::AppState;
use crate::error::ErrorKind;
use crate::messages::ui_events::{InputMode, View};
use crate::messages::{ChainCommand, ChainResponse};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn switch_view(&mut self, view: View) -> Vec<ChainCommand> {
        self.input_mode = InputMode::Normal;
        if self.view == View::Submit && view != View::Submit {
            // A finished submission is not kept around
            if self.workflow.as_ref().is_some_and(|wf| wf.step() == Step::Success) {
                self.workflow = None;
            }
        }
        self.view = view;

        if view == View::Submit {
            return self.ensure_workflow();
        }
        Vec::new()
    }

    pub fn back(&mut self) -> Vec<ChainCommand> {
        match self.view {
            View::Submit => self.switch_view(View::Catalog),
            View::Catalog => Vec::new(),
        }
    }

    /// Start a workflow for the connected account if none is running
    fn ensure_workflow(&mut self) -> Vec<ChainCommand> {
        let Some(owner) = self.session.account() else {
            return Vec::new();
        };
        if self.workflow.is_some() {
            return Vec::new();
        }
        let (workflow, commands) = SubmissionWorkflow::start(owner, &mut self.ids);
        self.workflow = Some(workflow);
        commands
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Wallet
    // ========================

    pub fn connect_wallet(&mut self) -> Option<ChainCommand> {
        if self.session.is_connected() || self.session.is_connecting() {
            return None;
        }
        let id = self.ids.next_id();
        self.session.begin_connect(id);
        self.status_message = Some(String::from("Waiting for wallet…"));
        Some(ChainCommand::ConnectWallet { id })
    }

    /// Forget the account; the draft goes with it
    pub fn disconnect_wallet(&mut self) {
        if !self.session.is_connected() {
            return;
        }
        self.session.disconnect();
        self.workflow = None;
        self.input_mode = InputMode::Normal;
        self.status_message = Some(String::from("Wallet disconnected"));
    }

    // ========================
    // Catalog
    // ========================

    /// Load the current page and the statistics; no-op while a page is loading
    pub fn load_catalog(&mut self) -> Vec<ChainCommand> {
        let mut commands = Vec::new();
        if let Some(cmd) = self.load_page(self.catalog.offset) {
            commands.push(cmd);
        }
        if self.catalog.pending_stats_id.is_none() {
            let id = self.ids.next_id();
            self.catalog.pending_stats_id = Some(id);
            commands.push(ChainCommand::LoadStats { id });
        }
        commands
    }

    fn load_page(&mut self, offset: u64) -> Option<ChainCommand> {
        if self.catalog.is_loading() {
            return None;
        }
        let id = self.ids.next_id();
        self.catalog.pending_request_id = Some(id);
        Some(ChainCommand::LoadCatalog {
            id,
            offset,
            limit: self.catalog.page_size,
        })
    }

    pub fn next_page(&mut self) -> Option<ChainCommand> {
        if !self.catalog.has_next_page() {
            return None;
        }
        self.load_page(self.catalog.offset + self.catalog.page_size)
    }

    pub fn prev_page(&mut self) -> Option<ChainCommand> {
        if self.catalog.offset == 0 {
            return None;
        }
        self.load_page(self.catalog.offset.saturating_sub(self.catalog.page_size))
    }

    pub fn cycle_category(&mut self) {
        self.catalog.filter.cycle_category();
        self.catalog.selected = 0;
    }

    pub fn cycle_audience(&mut self) {
        self.catalog.filter.cycle_audience();
        self.catalog.selected = 0;
    }

    pub fn clear_filters(&mut self) {
        self.catalog.filter.clear();
        self.catalog.selected = 0;
    }

    pub fn select_next(&mut self) {
        let len = self.catalog.visible().len();
        if len > 0 {
            self.catalog.selected = (self.catalog.selected + 1) % len;
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.catalog.visible().len();
        if len > 0 {
            self.catalog.selected = self.catalog.selected.checked_sub(1).unwrap_or(len - 1);
        }
    }

    /// Re-issue the reads behind the current view
    pub fn refresh(&mut self) -> Vec<ChainCommand> {
        match self.view {
            View::Catalog => self.load_catalog(),
            View::Submit => match self.workflow.as_mut() {
                Some(wf) => wf.refresh(&mut self.ids),
                None => Vec::new(),
            },
        }
    }

    // ========================
    // Submission form
    // ========================

    pub fn next_field(&mut self) {
        if let Some(wf) = self.workflow.as_mut() {
            wf.focus_next();
            if !wf.focus().is_text() {
                self.input_mode = InputMode::Normal;
            }
        }
    }

    pub fn prev_field(&mut self) {
        if let Some(wf) = self.workflow.as_mut() {
            wf.focus_prev();
            if !wf.focus().is_text() {
                self.input_mode = InputMode::Normal;
            }
        }
    }

    /// Text fields enter editing mode; selectors step forward
    pub fn edit_field(&mut self) {
        let Some(wf) = self.workflow.as_mut() else {
            return;
        };
        if wf.step() == Step::Success {
            return;
        }
        if wf.focus().is_text() {
            wf.cursor_to_end();
            self.input_mode = InputMode::Editing;
        } else {
            wf.cycle_select(true);
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn cycle_select(&mut self, forward: bool) {
        if let Some(wf) = self.workflow.as_mut() {
            wf.cycle_select(forward);
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if let Some(wf) = self.workflow.as_mut() {
            wf.enter_char(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(wf) = self.workflow.as_mut() {
            wf.delete_char();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(wf) = self.workflow.as_mut() {
            wf.move_cursor_left();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(wf) = self.workflow.as_mut() {
            wf.move_cursor_right();
        }
    }

    pub fn approve(&mut self) -> Option<ChainCommand> {
        let cmd = self.workflow.as_mut()?.approve(&self.session, &mut self.ids);
        if cmd.is_some() {
            self.status_message = Some(String::from("Confirm the approval in your wallet"));
        }
        cmd
    }

    pub fn submit(&mut self) -> Option<ChainCommand> {
        self.input_mode = InputMode::Normal;
        let cmd = self.workflow.as_mut()?.submit(&self.session, &mut self.ids);
        if cmd.is_some() {
            self.status_message = Some(String::from("Confirm the submission in your wallet"));
        }
        cmd
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: ChainResponse) -> Vec<ChainCommand> {
        let id = response.id();
        let mut commands = Vec::new();

        match &response {
            ChainResponse::WalletConnected { account, chain_id, .. } if self.session.awaits(id) => {
                self.session.connected(*account, *chain_id);
                self.status_message = Some(format!("Connected {}", account.short()));
                if self.view == View::Submit {
                    commands.extend(self.ensure_workflow());
                }
                return commands;
            }
            ChainResponse::Failed { error, .. } if self.session.awaits(id) => {
                self.session.connect_failed();
                self.status_message = Some(format!("Wallet: {}", error));
                return commands;
            }
            ChainResponse::Catalog { offset, listings, .. } => {
                if self.catalog.pending_request_id == Some(id) {
                    self.catalog.pending_request_id = None;
                    self.catalog.offset = *offset;
                    self.catalog.listings = listings.clone();
                    self.catalog.selected = 0;
                }
                return commands;
            }
            ChainResponse::Stats { stats, .. } => {
                if self.catalog.pending_stats_id == Some(id) {
                    self.catalog.pending_stats_id = None;
                    self.catalog.stats = Some(*stats);
                }
                return commands;
            }
            ChainResponse::Failed { error, .. } if self.catalog.pending_request_id == Some(id) => {
                // Keep the previous page on screen
                self.catalog.pending_request_id = None;
                self.status_message = Some(format!("Catalog: {}", error));
                return commands;
            }
            ChainResponse::Failed { error, .. } if self.catalog.pending_stats_id == Some(id) => {
                self.catalog.pending_stats_id = None;
                self.status_message = Some(format!("Stats: {}", error));
                return commands;
            }
            _ => {}
        }

        if let Some(wf) = self.workflow.as_mut().filter(|wf| wf.tracks(id)) {
            let before = wf.step();
            if let Some(cmd) = wf.handle_response(&response, &mut self.ids) {
                commands.push(cmd);
            }
            self.status_message = match &response {
                ChainResponse::TxSent { tx_hash, .. } => Some(format!("Sent {}, waiting for receipt…", tx_hash)),
                ChainResponse::TxConfirmed { .. } if wf.step() == Step::Success && before != Step::Success => {
                    Some(String::from("Listing submitted"))
                }
                ChainResponse::TxConfirmed { .. } => Some(String::from("Approval confirmed")),
                ChainResponse::Failed { error, .. } => Some(match error.kind() {
                    ErrorKind::UserRejected => String::from("Request rejected in wallet"),
                    ErrorKind::Reverted => String::from("Transaction reverted"),
                    ErrorKind::Connectivity => error.to_string(),
                }),
                _ => self.status_message.take(),
            };
        }

        commands
    }
}
