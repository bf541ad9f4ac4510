//! The wallet service — wiring and the request surface.

use std::fs;

use aureus_bridge::BridgeExporter;
use aureus_ledger::AccountLedger;
use aureus_quota::QuotaEngine;
use aureus_transactions::{SignedTransfer, SpendRecord, TransferRecord};
use aureus_types::PublicKey;

use crate::config::WalletConfig;
use crate::error::WalletError;

/// The wallet service: one account ledger and one quota engine, sharing a
/// data directory for the two hand-off files.
///
/// Each public method maps 1:1 onto a request-surface operation; the
/// transport layer on top only parses and dispatches.
pub struct WalletService {
    ledger: AccountLedger,
    quota: QuotaEngine,
}

impl WalletService {
    /// Build a service from configuration, creating the data directory.
    pub fn new(config: &WalletConfig) -> Result<Self, WalletError> {
        fs::create_dir_all(&config.data_dir).map_err(|e| WalletError::DataDir {
            path: config.data_dir.clone(),
            source: e,
        })?;
        let ledger = AccountLedger::new(BridgeExporter::new(config.bridge_path()));
        let quota = QuotaEngine::with_quota(config.quota_log_path(), config.daily_quota);
        tracing::info!(
            data_dir = %config.data_dir.display(),
            daily_quota = config.daily_quota,
            "wallet service ready"
        );
        Ok(Self { ledger, quota })
    }

    /// `register`: create the account (idempotent) with fresh keys.
    pub fn register(&self, username: &str) {
        self.ledger.create_account(username);
    }

    /// `balance`: the account's ledger balance (0 if unknown).
    pub fn balance(&self, username: &str) -> u64 {
        self.ledger.balance(username)
    }

    /// The account's public key, if registered.
    pub fn public_key(&self, username: &str) -> Option<PublicKey> {
        self.ledger.public_key(username)
    }

    /// The account's external address (hex public key), if registered.
    pub fn address(&self, username: &str) -> Option<String> {
        self.ledger.address(username)
    }

    /// Seed an account with balance.
    pub fn credit(&self, username: &str, amount: u64) -> Result<u64, WalletError> {
        Ok(self.ledger.credit(username, amount)?)
    }

    /// `send`: signed transfer from sender to recipient, exported to the
    /// settlement slot.
    pub fn send(
        &self,
        sender: &str,
        recipient: &str,
        amount: u64,
    ) -> Result<SignedTransfer, WalletError> {
        Ok(self.ledger.transfer(sender, recipient, amount)?)
    }

    /// `history`: all successful transfers, oldest first.
    pub fn history(&self) -> Vec<TransferRecord> {
        self.ledger.history()
    }

    /// `spend_token`: burn quota from the sender.
    pub fn spend_token(
        &self,
        sender: &str,
        recipient: &str,
        amount: u64,
    ) -> Result<(), WalletError> {
        Ok(self.quota.spend(sender, recipient, amount)?)
    }

    /// `token_balance`: quota remaining today.
    pub fn token_balance(&self, username: &str) -> u64 {
        self.quota.balance(username)
    }

    /// The ledger behind this service.
    pub fn ledger(&self) -> &AccountLedger {
        &self.ledger
    }

    /// The quota engine behind this service.
    pub fn quota(&self) -> &QuotaEngine {
        &self.quota
    }

    /// The quota spend log, oldest first.
    pub fn spend_log(&self) -> Vec<SpendRecord> {
        self.quota.spends()
    }
}
