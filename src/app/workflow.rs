//! Submission workflow - form → approve → submit → success
//!
//! Pure state machine: operations return the chain commands to issue and
//! responses are folded back in by request id. Nothing here touches I/O.

use primitive_types::U256;

use crate::app::session::WalletSession;
use crate::app::state::RequestIds;
use crate::error::ChainError;
use crate::messages::{ChainCommand, ChainResponse};
use crate::models::{Address, DraftField, ListingPrices, SubmissionDraft, TxHash};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Form,
    Approve,
    Submit,
    Success,
}

/// Lifecycle of one wallet write
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WriteState {
    #[default]
    Idle,
    /// Sent to the wallet, waiting for the user to sign
    Requested { id: u64 },
    /// Broadcast, waiting for the receipt
    Pending { id: u64, tx_hash: TxHash },
}

impl WriteState {
    pub fn id(&self) -> Option<u64> {
        match self {
            WriteState::Idle => None,
            WriteState::Requested { id } | WriteState::Pending { id, .. } => Some(*id),
        }
    }

    pub fn is_busy(&self) -> bool {
        !matches!(self, WriteState::Idle)
    }

    pub fn tx_hash(&self) -> Option<TxHash> {
        match self {
            WriteState::Pending { tx_hash, .. } => Some(*tx_hash),
            _ => None,
        }
    }
}

/// The single action control under the form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Allowance or prices not resolved yet
    Unknown,
    Approve { busy: bool, enabled: bool },
    Submit { busy: bool, enabled: bool },
    Done,
}

/// A value read from the chain, with the id of the read in flight
#[derive(Clone, Copy, Debug, Default)]
struct Read<T> {
    value: Option<T>,
    pending: Option<u64>,
}

impl<T> Read<T> {
    fn issue(&mut self, id: u64) {
        self.value = None;
        self.pending = Some(id);
    }

    /// Store `value` if `id` is the read in flight
    fn resolve(&mut self, id: u64, value: T) -> bool {
        if self.pending != Some(id) {
            return false;
        }
        self.value = Some(value);
        self.pending = None;
        true
    }

    fn fail(&mut self, id: u64) -> bool {
        if self.pending != Some(id) {
            return false;
        }
        self.pending = None;
        true
    }

    fn is_idle_unknown(&self) -> bool {
        self.value.is_none() && self.pending.is_none()
    }
}

/// One submission in progress, owned by the connected account
#[derive(Clone, Debug)]
pub struct SubmissionWorkflow {
    step: Step,
    owner: Address,
    draft: SubmissionDraft,
    focus: DraftField,
    cursor: usize,

    prices: Read<ListingPrices>,
    allowance: Read<U256>,
    balance: Read<U256>,

    approve_write: WriteState,
    submit_write: WriteState,
    confirmed_tx: Option<TxHash>,
    last_error: Option<ChainError>,
}

impl SubmissionWorkflow {
    /// Enter `Form` with an empty draft and issue the three reads
    pub fn start(owner: Address, ids: &mut RequestIds) -> (Self, Vec<ChainCommand>) {
        let mut workflow = SubmissionWorkflow {
            step: Step::Form,
            owner,
            draft: SubmissionDraft::default(),
            focus: DraftField::Name,
            cursor: 0,
            prices: Read::default(),
            allowance: Read::default(),
            balance: Read::default(),
            approve_write: WriteState::Idle,
            submit_write: WriteState::Idle,
            confirmed_tx: None,
            last_error: None,
        };
        let commands = workflow.refresh(ids);
        tracing::info!(owner = %owner, "Submission workflow started");
        (workflow, commands)
    }

    /// Re-issue any read that is neither resolved nor in flight
    pub fn refresh(&mut self, ids: &mut RequestIds) -> Vec<ChainCommand> {
        let mut commands = Vec::new();
        if self.prices.is_idle_unknown() {
            let id = ids.next_id();
            self.prices.issue(id);
            commands.push(ChainCommand::LoadPrices { id });
        }
        if self.allowance.is_idle_unknown() {
            commands.push(self.load_allowance(ids));
        }
        if self.balance.is_idle_unknown() {
            let id = ids.next_id();
            self.balance.issue(id);
            commands.push(ChainCommand::LoadBalance { id, owner: self.owner });
        }
        commands
    }

    fn load_allowance(&mut self, ids: &mut RequestIds) -> ChainCommand {
        let id = ids.next_id();
        self.allowance.issue(id);
        ChainCommand::LoadAllowance { id, owner: self.owner }
    }

    // ========================
    // Accessors
    // ========================

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn draft(&self) -> &SubmissionDraft {
        &self.draft
    }

    pub fn focus(&self) -> DraftField {
        self.focus
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn prices(&self) -> Option<ListingPrices> {
        self.prices.value
    }

    pub fn allowance(&self) -> Option<U256> {
        self.allowance.value
    }

    pub fn balance(&self) -> Option<U256> {
        self.balance.value
    }

    pub fn last_error(&self) -> Option<&ChainError> {
        self.last_error.as_ref()
    }

    pub fn confirmed_tx(&self) -> Option<TxHash> {
        self.confirmed_tx
    }

    /// Hash of the write currently waiting for its receipt
    pub fn pending_tx(&self) -> Option<TxHash> {
        self.approve_write.tx_hash().or(self.submit_write.tx_hash())
    }

    /// `None` until both allowance and prices are known
    pub fn needs_approval(&self) -> Option<bool> {
        match (self.allowance.value, self.prices.value) {
            (Some(allowance), Some(prices)) => Some(allowance < prices.basic),
            _ => None,
        }
    }

    /// Balance below the basic fee; shown as a hint, never a block
    pub fn insufficient_balance(&self) -> bool {
        match (self.balance.value, self.prices.value) {
            (Some(balance), Some(prices)) => balance < prices.basic,
            _ => false,
        }
    }

    pub fn action(&self) -> Action {
        if self.step == Step::Success {
            return Action::Done;
        }
        if self.approve_write.is_busy() {
            return Action::Approve { busy: true, enabled: false };
        }
        if self.submit_write.is_busy() {
            return Action::Submit { busy: true, enabled: false };
        }
        match self.needs_approval() {
            None => Action::Unknown,
            Some(true) => Action::Approve { busy: false, enabled: true },
            Some(false) => Action::Submit { busy: false, enabled: self.draft.is_complete() },
        }
    }

    fn write_in_flight(&self) -> bool {
        self.approve_write.is_busy() || self.submit_write.is_busy()
    }

    // ========================
    // Writes
    // ========================

    /// Emit one `approve(store, basic)` write, or nothing if not allowed now
    pub fn approve(&mut self, session: &WalletSession, ids: &mut RequestIds) -> Option<ChainCommand> {
        let from = session.account()?;
        if self.step == Step::Success || self.write_in_flight() {
            return None;
        }
        if self.needs_approval() != Some(true) {
            return None;
        }
        let amount = self.prices.value?.basic;

        let id = ids.next_id();
        self.step = Step::Approve;
        self.approve_write = WriteState::Requested { id };
        self.last_error = None;
        tracing::info!(id, amount = %amount, "Requesting approval");
        Some(ChainCommand::Approve { id, from, amount })
    }

    /// Emit one `submitApp` write from a draft snapshot, or nothing if not allowed now
    pub fn submit(&mut self, session: &WalletSession, ids: &mut RequestIds) -> Option<ChainCommand> {
        let from = session.account()?;
        if self.step == Step::Success || self.write_in_flight() {
            return None;
        }
        if self.needs_approval() != Some(false) || !self.draft.is_complete() {
            return None;
        }

        let id = ids.next_id();
        self.step = Step::Submit;
        self.submit_write = WriteState::Requested { id };
        self.last_error = None;
        tracing::info!(id, name = %self.draft.name, "Submitting listing");
        Some(ChainCommand::SubmitApp { id, from, draft: self.draft.clone() })
    }

    // ========================
    // Response handling
    // ========================

    /// Whether `id` is a read or write this workflow is waiting on
    pub fn tracks(&self, id: u64) -> bool {
        [self.prices.pending, self.allowance.pending, self.balance.pending]
            .contains(&Some(id))
            || self.approve_write.id() == Some(id)
            || self.submit_write.id() == Some(id)
    }

    /// Fold a chain response in; may return a follow-up read
    pub fn handle_response(
        &mut self,
        response: &ChainResponse,
        ids: &mut RequestIds,
    ) -> Option<ChainCommand> {
        match response {
            ChainResponse::Prices { id, prices } => {
                self.prices.resolve(*id, *prices);
            }
            ChainResponse::Allowance { id, amount } => {
                self.allowance.resolve(*id, *amount);
            }
            ChainResponse::Balance { id, amount } => {
                self.balance.resolve(*id, *amount);
            }
            ChainResponse::TxSent { id, tx_hash } => {
                for write in [&mut self.approve_write, &mut self.submit_write] {
                    if write.id() == Some(*id) {
                        *write = WriteState::Pending { id: *id, tx_hash: *tx_hash };
                    }
                }
            }
            ChainResponse::TxConfirmed { id, tx_hash } => {
                if self.approve_write.id() == Some(*id) {
                    // Allowance is stale until re-read; the submit control waits for it
                    self.approve_write = WriteState::Idle;
                    return Some(self.load_allowance(ids));
                }
                if self.submit_write.id() == Some(*id) {
                    self.submit_write = WriteState::Idle;
                    self.step = Step::Success;
                    self.draft = SubmissionDraft::default();
                    self.cursor = 0;
                    self.confirmed_tx = Some(*tx_hash);
                    tracing::info!(id, tx_hash = %tx_hash, "Listing submitted");
                }
            }
            ChainResponse::Failed { id, error } => {
                if self.approve_write.id() == Some(*id) {
                    self.approve_write = WriteState::Idle;
                    self.last_error = Some(error.clone());
                } else if self.submit_write.id() == Some(*id) {
                    self.submit_write = WriteState::Idle;
                    self.last_error = Some(error.clone());
                } else if self.prices.fail(*id) || self.allowance.fail(*id) || self.balance.fail(*id) {
                    self.last_error = Some(error.clone());
                }
            }
            ChainResponse::WalletConnected { .. }
            | ChainResponse::Catalog { .. }
            | ChainResponse::Stats { .. } => {}
        }
        None
    }

    // ========================
    // Draft editing
    // ========================

    fn editable(&self) -> bool {
        self.step != Step::Success
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        self.cursor = self.draft.text(self.focus).len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
        self.cursor = self.draft.text(self.focus).len();
    }

    /// Cycle the focused selector; no-op on text fields
    pub fn cycle_select(&mut self, forward: bool) {
        if !self.editable() {
            return;
        }
        match self.focus {
            DraftField::Category => {
                let c = self.draft.category;
                self.draft.category = if forward { c.next() } else { c.prev() };
            }
            DraftField::Audience => {
                let a = self.draft.audience;
                self.draft.audience = if forward { a.next() } else { a.prev() };
            }
            _ => {}
        }
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.draft.text(self.focus);
        if self.cursor > 0 {
            self.cursor = input[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.draft.text(self.focus);
        if self.cursor < input.len() {
            self.cursor = input[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(input.len());
        }
    }

    pub fn cursor_to_end(&mut self) {
        self.cursor = self.draft.text(self.focus).len();
    }

    pub fn enter_char(&mut self, c: char) {
        if !self.editable() {
            return;
        }
        let cursor = self.cursor;
        if let Some(input) = self.draft.text_mut(self.focus) {
            if cursor <= input.len() {
                input.insert(cursor, c);
                self.cursor = cursor + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        if !self.editable() || self.cursor == 0 {
            return;
        }
        let cursor = self.cursor;
        if let Some(input) = self.draft.text_mut(self.focus) {
            let prev = input[..cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev);
            self.cursor = prev;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::B256;

    fn owner() -> Address {
        "0x00000000000000000000000000000000000000aa".parse().unwrap()
    }

    fn prices(basic: u64) -> ListingPrices {
        ListingPrices {
            basic: U256::from(basic),
            featured: U256::from(basic * 5),
            premium: U256::from(basic * 10),
        }
    }

    fn ids_of(commands: &[ChainCommand]) -> (u64, u64, u64) {
        let mut prices = 0;
        let mut allowance = 0;
        let mut balance = 0;
        for cmd in commands {
            match cmd {
                ChainCommand::LoadPrices { id } => prices = *id,
                ChainCommand::LoadAllowance { id, .. } => allowance = *id,
                ChainCommand::LoadBalance { id, .. } => balance = *id,
                other => panic!("unexpected {:?}", other),
            }
        }
        (prices, allowance, balance)
    }

    /// A workflow whose three reads resolved with the given values
    fn resolved(allowance: u64, basic: u64, ids: &mut RequestIds) -> SubmissionWorkflow {
        let (mut wf, commands) = SubmissionWorkflow::start(owner(), ids);
        let (p, a, b) = ids_of(&commands);
        wf.handle_response(&ChainResponse::Balance { id: b, amount: U256::from(100u64) }, ids);
        wf.handle_response(&ChainResponse::Allowance { id: a, amount: U256::from(allowance) }, ids);
        wf.handle_response(&ChainResponse::Prices { id: p, prices: prices(basic) }, ids);
        wf
    }

    fn fill_draft(wf: &mut SubmissionWorkflow) {
        for c in "My App".chars() {
            wf.enter_char(c);
        }
        wf.focus_next();
        wf.focus_next();
        for c in "https://myapp.com".chars() {
            wf.enter_char(c);
        }
    }

    #[test]
    fn test_start_issues_three_reads() {
        let mut ids = RequestIds::default();
        let (wf, commands) = SubmissionWorkflow::start(owner(), &mut ids);
        assert_eq!(commands.len(), 3);
        assert!(commands.iter().all(|c| match c {
            ChainCommand::LoadAllowance { owner: o, .. } | ChainCommand::LoadBalance { owner: o, .. } => *o == owner(),
            ChainCommand::LoadPrices { .. } => true,
            _ => false,
        }));
        assert_eq!(wf.step(), Step::Form);
        assert_eq!(wf.draft(), &SubmissionDraft::default());
        assert_eq!(wf.needs_approval(), None);
        assert_eq!(wf.action(), Action::Unknown);
    }

    #[test]
    fn test_unknown_allowance_disables_both_controls() {
        let mut ids = RequestIds::default();
        let session = WalletSession::with_account(owner());
        let (mut wf, commands) = SubmissionWorkflow::start(owner(), &mut ids);
        let (p, _, _) = ids_of(&commands);
        wf.handle_response(&ChainResponse::Prices { id: p, prices: prices(10) }, &mut ids);
        fill_draft(&mut wf);

        assert_eq!(wf.needs_approval(), None);
        assert_eq!(wf.approve(&session, &mut ids), None);
        assert_eq!(wf.submit(&session, &mut ids), None);
        assert_eq!(wf.step(), Step::Form);
    }

    #[test]
    fn test_approval_then_submit_after_fresh_read() {
        let mut ids = RequestIds::default();
        let session = WalletSession::with_account(owner());
        let mut wf = resolved(5, 10, &mut ids);
        fill_draft(&mut wf);

        assert_eq!(wf.needs_approval(), Some(true));
        assert_eq!(wf.action(), Action::Approve { busy: false, enabled: true });
        assert_eq!(wf.submit(&session, &mut ids), None);

        let approve_id = match wf.approve(&session, &mut ids) {
            Some(ChainCommand::Approve { id, from, amount }) => {
                assert_eq!(from, owner());
                assert_eq!(amount, U256::from(10u64));
                id
            }
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(wf.step(), Step::Approve);
        assert_eq!(wf.action(), Action::Approve { busy: true, enabled: false });

        let tx_hash = B256([9; 32]);
        wf.handle_response(&ChainResponse::TxSent { id: approve_id, tx_hash }, &mut ids);
        assert_eq!(wf.pending_tx(), Some(tx_hash));

        let refresh = wf.handle_response(&ChainResponse::TxConfirmed { id: approve_id, tx_hash }, &mut ids);
        let read_id = match refresh {
            Some(ChainCommand::LoadAllowance { id, owner: o }) => {
                assert_eq!(o, owner());
                id
            }
            other => panic!("unexpected {:?}", other),
        };
        // stale until the fresh read lands
        assert_eq!(wf.step(), Step::Approve);
        assert_eq!(wf.allowance(), None);
        assert_eq!(wf.action(), Action::Unknown);

        wf.handle_response(&ChainResponse::Allowance { id: read_id, amount: U256::from(10u64) }, &mut ids);
        assert_eq!(wf.needs_approval(), Some(false));
        assert_eq!(wf.action(), Action::Submit { busy: false, enabled: true });

        match wf.submit(&session, &mut ids) {
            Some(ChainCommand::SubmitApp { draft, .. }) => {
                assert_eq!(draft.name, "My App");
                assert_eq!(draft.url, "https://myapp.com");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(wf.step(), Step::Submit);
    }

    #[test]
    fn test_rapid_approve_emits_one_write() {
        let mut ids = RequestIds::default();
        let session = WalletSession::with_account(owner());
        let mut wf = resolved(0, 10, &mut ids);

        assert!(wf.approve(&session, &mut ids).is_some());
        assert_eq!(wf.approve(&session, &mut ids), None);
        assert_eq!(wf.submit(&session, &mut ids), None);
    }

    #[test]
    fn test_rapid_submit_emits_one_write() {
        let mut ids = RequestIds::default();
        let session = WalletSession::with_account(owner());
        let mut wf = resolved(10, 10, &mut ids);
        fill_draft(&mut wf);

        let id = wf.submit(&session, &mut ids).and_then(|c| c.id());
        assert!(id.is_some());
        assert_eq!(wf.submit(&session, &mut ids), None);

        wf.handle_response(&ChainResponse::TxSent { id: id.unwrap(), tx_hash: B256([1; 32]) }, &mut ids);
        assert_eq!(wf.submit(&session, &mut ids), None);
        assert_eq!(wf.action(), Action::Submit { busy: true, enabled: false });
    }

    #[test]
    fn test_blank_name_disables_submit() {
        let mut ids = RequestIds::default();
        let session = WalletSession::with_account(owner());
        let mut wf = resolved(50, 10, &mut ids);
        wf.focus_next();
        wf.focus_next();
        for c in "https://myapp.com".chars() {
            wf.enter_char(c);
        }

        assert_eq!(wf.action(), Action::Submit { busy: false, enabled: false });
        assert_eq!(wf.submit(&session, &mut ids), None);
        assert_eq!(wf.step(), Step::Form);
    }

    #[test]
    fn test_reverted_submit_keeps_draft() {
        let mut ids = RequestIds::default();
        let session = WalletSession::with_account(owner());
        let mut wf = resolved(10, 10, &mut ids);
        fill_draft(&mut wf);
        let before = wf.draft().clone();

        let id = wf.submit(&session, &mut ids).and_then(|c| c.id()).unwrap();
        let tx_hash = B256([3; 32]);
        wf.handle_response(&ChainResponse::TxSent { id, tx_hash }, &mut ids);
        wf.handle_response(
            &ChainResponse::Failed { id, error: ChainError::Reverted { tx_hash } },
            &mut ids,
        );

        assert_eq!(wf.step(), Step::Submit);
        assert_eq!(wf.draft(), &before);
        assert_eq!(wf.action(), Action::Submit { busy: false, enabled: true });
        assert_eq!(wf.last_error(), Some(&ChainError::Reverted { tx_hash }));

        // retry clears the error
        assert!(wf.submit(&session, &mut ids).is_some());
        assert_eq!(wf.last_error(), None);
    }

    #[test]
    fn test_rejected_approve_re_enables_control() {
        let mut ids = RequestIds::default();
        let session = WalletSession::with_account(owner());
        let mut wf = resolved(0, 10, &mut ids);

        let id = wf.approve(&session, &mut ids).and_then(|c| c.id()).unwrap();
        wf.handle_response(&ChainResponse::Failed { id, error: ChainError::UserRejected }, &mut ids);

        assert_eq!(wf.step(), Step::Approve);
        assert_eq!(wf.action(), Action::Approve { busy: false, enabled: true });
        assert!(wf.approve(&session, &mut ids).is_some());
    }

    #[test]
    fn test_success_discards_draft_and_locks() {
        let mut ids = RequestIds::default();
        let session = WalletSession::with_account(owner());
        let mut wf = resolved(10, 10, &mut ids);
        fill_draft(&mut wf);

        let id = wf.submit(&session, &mut ids).and_then(|c| c.id()).unwrap();
        let tx_hash = B256([4; 32]);
        wf.handle_response(&ChainResponse::TxConfirmed { id, tx_hash }, &mut ids);

        assert_eq!(wf.step(), Step::Success);
        assert_eq!(wf.draft(), &SubmissionDraft::default());
        assert_eq!(wf.confirmed_tx(), Some(tx_hash));
        assert_eq!(wf.action(), Action::Done);

        wf.enter_char('x');
        assert_eq!(wf.draft().name, "");
        assert_eq!(wf.submit(&session, &mut ids), None);
        assert_eq!(wf.approve(&session, &mut ids), None);
    }

    #[test]
    fn test_no_session_means_no_command() {
        let mut ids = RequestIds::default();
        let mut wf = resolved(0, 10, &mut ids);
        assert_eq!(wf.approve(&WalletSession::default(), &mut ids), None);
        assert_eq!(wf.step(), Step::Form);
    }

    #[test]
    fn test_stale_responses_are_ignored() {
        let mut ids = RequestIds::default();
        let (mut wf, commands) = SubmissionWorkflow::start(owner(), &mut ids);
        let (_, a, _) = ids_of(&commands);

        wf.handle_response(&ChainResponse::Allowance { id: a + 100, amount: U256::from(7u64) }, &mut ids);
        assert_eq!(wf.allowance(), None);
        wf.handle_response(&ChainResponse::TxConfirmed { id: 999, tx_hash: B256::default() }, &mut ids);
        assert_eq!(wf.step(), Step::Form);

        wf.handle_response(&ChainResponse::Allowance { id: a, amount: U256::from(7u64) }, &mut ids);
        assert_eq!(wf.allowance(), Some(U256::from(7u64)));
    }

    #[test]
    fn test_failed_read_can_be_refreshed() {
        let mut ids = RequestIds::default();
        let (mut wf, commands) = SubmissionWorkflow::start(owner(), &mut ids);
        let (p, _, _) = ids_of(&commands);

        assert!(wf.refresh(&mut ids).is_empty());
        wf.handle_response(
            &ChainResponse::Failed { id: p, error: ChainError::Transport("down".into()) },
            &mut ids,
        );
        assert!(wf.last_error().is_some());

        let again = wf.refresh(&mut ids);
        assert_eq!(again.len(), 1);
        assert!(matches!(again[0], ChainCommand::LoadPrices { .. }));
    }

    #[test]
    fn test_balance_hint() {
        let mut ids = RequestIds::default();
        let wf = resolved(0, 10, &mut ids);
        assert!(!wf.insufficient_balance());
        let wf = resolved(0, 1000, &mut ids);
        assert!(wf.insufficient_balance());
    }

    #[test]
    fn test_editing_is_char_boundary_safe() {
        let mut ids = RequestIds::default();
        let (mut wf, _) = SubmissionWorkflow::start(owner(), &mut ids);
        for c in "héllo".chars() {
            wf.enter_char(c);
        }
        wf.move_cursor_left();
        wf.move_cursor_left();
        wf.move_cursor_left();
        wf.move_cursor_left();
        assert_eq!(wf.cursor(), 1);
        wf.move_cursor_right();
        assert_eq!(wf.cursor(), 3);
        wf.delete_char();
        assert_eq!(wf.draft().name, "hllo");

        wf.focus_prev();
        assert_eq!(wf.focus(), DraftField::Audience);
        wf.cycle_select(true);
        assert_eq!(wf.draft().audience, crate::models::Audience::Humans);
        wf.enter_char('z');
        assert_eq!(wf.draft().audience, crate::models::Audience::Humans);
    }
}
