//! Render state - data structure sent from App layer to UI for rendering

use primitive_types::U256;

use crate::app::workflow::{Action, Step};
use crate::catalog::{CatalogFilter, CatalogStats};
use crate::messages::ui_events::{InputMode, View};
use crate::models::{AppListing, DraftField, ListingPrices, SubmissionDraft, TxHash};

/// Catalog slice of the render state
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    /// Listings after the active filters, in source order
    pub listings: Vec<AppListing>,
    /// Featured subset of the whole loaded page
    pub featured: Vec<AppListing>,
    pub filter: CatalogFilter,
    pub selected: usize,
    pub page: u64,
    pub has_next_page: bool,
    pub is_loading: bool,
    pub stats: Option<CatalogStats>,
}

/// Submission workflow slice of the render state
#[derive(Debug, Clone)]
pub struct WorkflowView {
    pub step: Step,
    pub draft: SubmissionDraft,
    pub focus: DraftField,
    pub cursor: usize,
    pub prices: Option<ListingPrices>,
    pub allowance: Option<U256>,
    pub balance: Option<U256>,
    pub insufficient_balance: bool,
    pub action: Action,
    pub pending_tx: Option<TxHash>,
    pub confirmed_tx: Option<TxHash>,
    pub last_error: Option<String>,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub view: View,
    pub input_mode: InputMode,

    // Header
    pub network: String,
    pub wallet_label: String,
    pub wallet_connected: bool,
    pub wallet_connecting: bool,

    pub catalog: CatalogView,
    /// `None` while no wallet is connected: the submit view shows the connect prompt
    pub workflow: Option<WorkflowView>,

    // Status bar and popups
    pub status_message: Option<String>,
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            view: View::Catalog,
            input_mode: InputMode::Normal,
            network: String::new(),
            wallet_label: String::from("Not connected"),
            wallet_connected: false,
            wallet_connecting: false,
            catalog: CatalogView::default(),
            workflow: None,
            status_message: None,
            show_help: false,
        }
    }
}
