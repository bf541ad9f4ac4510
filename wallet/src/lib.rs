//! Wallet service facade.
//!
//! Wires the account ledger, quota engine, and settlement bridge together
//! behind the typed request surface a transport layer (HTTP or otherwise)
//! dispatches onto. The transport itself lives outside this workspace.

pub mod config;
pub mod error;
pub mod service;

pub use config::WalletConfig;
pub use error::WalletError;
pub use service::WalletService;

/// Initialize logging from a wallet configuration.
pub fn init_logging(config: &WalletConfig) {
    aureus_utils::init_tracing(&config.log_level, config.log_format == "json");
}
