//! App actor - message loop processing UI events and chain responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{ChainCommand, ChainResponse, RenderState, UiEvent};

/// App actor that processes UI events and chain responses
pub struct AppActor {
    state: AppState,
    chain_tx: mpsc::UnboundedSender<ChainCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        chain_tx: mpsc::UnboundedSender<ChainCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            chain_tx,
            render_tx,
        }
    }

    fn send(&self, commands: impl IntoIterator<Item = ChainCommand>) {
        for cmd in commands {
            let _ = self.chain_tx.send(cmd);
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut chain_rx: mpsc::UnboundedReceiver<ChainResponse>,
    ) {
        // Initial catalog load and render
        let initial = self.state.load_catalog();
        self.send(initial);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.chain_tx.send(ChainCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = chain_rx.recv() => {
                    tracing::debug!(id = response.id(), terminal = response.is_terminal(), "Chain response");
                    let follow_up = self.state.handle_response(response);
                    self.send(follow_up);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Views
            UiEvent::SwitchView(view) => {
                let commands = self.state.switch_view(view);
                self.send(commands);
            }
            UiEvent::Back => {
                let commands = self.state.back();
                self.send(commands);
            }

            // Wallet
            UiEvent::ConnectWallet => {
                let command = self.state.connect_wallet();
                self.send(command);
            }
            UiEvent::DisconnectWallet => self.state.disconnect_wallet(),

            // Catalog
            UiEvent::CycleCategory => self.state.cycle_category(),
            UiEvent::CycleAudience => self.state.cycle_audience(),
            UiEvent::ClearFilters => self.state.clear_filters(),
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SelectPrev => self.state.select_prev(),
            UiEvent::NextPage => {
                let command = self.state.next_page();
                self.send(command);
            }
            UiEvent::PrevPage => {
                let command = self.state.prev_page();
                self.send(command);
            }
            UiEvent::Refresh => {
                let commands = self.state.refresh();
                self.send(commands);
            }

            // Submission form
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),
            UiEvent::EditField => self.state.edit_field(),
            UiEvent::CycleNext => self.state.cycle_select(true),
            UiEvent::CyclePrev => self.state.cycle_select(false),
            UiEvent::Approve => {
                let command = self.state.approve();
                self.send(command);
            }
            UiEvent::Submit => {
                let command = self.state.submit();
                self.send(command);
            }

            // Input editing
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
