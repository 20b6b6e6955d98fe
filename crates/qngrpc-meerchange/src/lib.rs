//! qngrpc-meerchange — cross-chain submission through the meerchange contract.
//!
//! A QNG export that has already been validated is described by a
//! [`CrossOp`]. [`MeerchangeBridge`] turns it into an `export4337` call on
//! the primary chain, signs it with the bundler's key and relays it,
//! returning the transaction hash. The hash proves submission only; callers
//! that care about inclusion poll for the receipt themselves.

pub mod bridge;
pub mod config;
pub mod contract;
pub mod op;

pub use bridge::{CrossChainBridge, MeerchangeBridge};
pub use config::MeerchangeConfig;
pub use op::CrossOp;
