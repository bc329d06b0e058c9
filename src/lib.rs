//! # Agent App Store storefront
//!
//! A terminal storefront for the on-chain Agent App Store on Base.
//!
//! ## Features
//! - Browse approved listings with category and audience filters
//! - Featured apps and store statistics (apps listed, EMBER burned)
//! - Wallet connection through a JSON-RPC wallet endpoint
//! - Listing submission: EMBER approval, then `submitApp`, with receipt tracking
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Chain Layer (Tokio runtime)

pub mod app;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use catalog::{CatalogFilter, CatalogSource, CatalogStats};
pub use config::{Config, Network};
pub use error::{ChainError, ErrorKind};
pub use messages::{ChainCommand, ChainResponse, RenderState, UiEvent};
pub use models::{Address, AppListing, Audience, Category, ListingTier, SubmissionDraft};
pub use network::{ChainActor, StoreClient};
