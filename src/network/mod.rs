//! Chain layer - JSON-RPC transport, ABI codec and the typed store client
//!
//! The Chain actor receives contract/wallet commands and sends back responses.

pub mod abi;
pub mod actor;
pub mod client;
pub mod rpc;

pub use actor::ChainActor;
pub use client::{Contracts, StoreClient};
