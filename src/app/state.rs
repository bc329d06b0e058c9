//! App state - pure data structure with no I/O logic

use crate::app::session::WalletSession;
use crate::app::workflow::SubmissionWorkflow;
use crate::catalog::{self, CatalogFilter, CatalogStats};
use crate::messages::render::{CatalogView, WorkflowView};
use crate::messages::ui_events::{InputMode, View};
use crate::messages::RenderState;
use crate::models::AppListing;

/// Monotonic request id source shared by every component
#[derive(Debug, Default)]
pub struct RequestIds {
    last: u64,
}

impl RequestIds {
    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        self.last += 1;
        self.last
    }
}

/// Loaded catalog page, filters and selection
#[derive(Debug)]
pub struct CatalogState {
    pub listings: Vec<AppListing>,
    pub filter: CatalogFilter,
    pub selected: usize,
    pub offset: u64,
    pub page_size: u64,
    pub stats: Option<CatalogStats>,
    pub pending_request_id: Option<u64>,
    pub pending_stats_id: Option<u64>,
}

impl CatalogState {
    pub fn new(page_size: u64) -> Self {
        CatalogState {
            listings: Vec::new(),
            filter: CatalogFilter::default(),
            selected: 0,
            offset: 0,
            page_size,
            stats: None,
            pending_request_id: None,
            pending_stats_id: None,
        }
    }

    /// Listings passing the active filters
    pub fn visible(&self) -> Vec<AppListing> {
        catalog::apply_filters(&self.listings, self.filter.category, self.filter.audience)
    }

    pub fn is_loading(&self) -> bool {
        self.pending_request_id.is_some()
    }

    /// A full page suggests more listings after it
    pub fn has_next_page(&self) -> bool {
        self.listings.len() as u64 == self.page_size
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub view: View,
    pub input_mode: InputMode,
    pub network: String,

    pub session: WalletSession,
    pub catalog: CatalogState,
    pub workflow: Option<SubmissionWorkflow>,
    pub ids: RequestIds,

    // Status bar and popups
    pub status_message: Option<String>,
    pub show_help: bool,
}

impl AppState {
    pub fn new(network: impl Into<String>, page_size: u64) -> Self {
        AppState {
            view: View::Catalog,
            input_mode: InputMode::Normal,
            network: network.into(),
            session: WalletSession::default(),
            catalog: CatalogState::new(page_size),
            workflow: None,
            ids: RequestIds::default(),
            status_message: None,
            show_help: false,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let catalog = CatalogView {
            listings: self.catalog.visible(),
            featured: catalog::featured(&self.catalog.listings),
            filter: self.catalog.filter,
            selected: self.catalog.selected,
            page: self.catalog.offset / self.catalog.page_size.max(1) + 1,
            has_next_page: self.catalog.has_next_page(),
            is_loading: self.catalog.is_loading(),
            stats: self.catalog.stats,
        };

        let workflow = self
            .workflow
            .as_ref()
            .filter(|_| self.session.is_connected())
            .map(|wf| WorkflowView {
                step: wf.step(),
                draft: wf.draft().clone(),
                focus: wf.focus(),
                cursor: wf.cursor(),
                prices: wf.prices(),
                allowance: wf.allowance(),
                balance: wf.balance(),
                insufficient_balance: wf.insufficient_balance(),
                action: wf.action(),
                pending_tx: wf.pending_tx(),
                confirmed_tx: wf.confirmed_tx(),
                last_error: wf.last_error().map(|e| e.to_string()),
            });

        RenderState {
            view: self.view,
            input_mode: self.input_mode,
            network: self.network.clone(),
            wallet_label: self.session.label(),
            wallet_connected: self.session.is_connected(),
            wallet_connecting: self.session.is_connecting(),
            catalog,
            workflow,
            status_message: self.status_message.clone(),
            show_help: self.show_help,
        }
    }
}
