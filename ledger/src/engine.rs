//! The account ledger engine.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use aureus_bridge::BridgeExporter;
use aureus_crypto::derive_address;
use aureus_transactions::{SignedTransfer, TransferRecord};
use aureus_types::{KeyPair, PublicKey};
use chrono::Utc;

use crate::error::LedgerError;

/// Mutable ledger state. Only ever touched under the engine lock.
#[derive(Default)]
struct LedgerState {
    balances: HashMap<String, u64>,
    keys: HashMap<String, KeyPair>,
    history: Vec<TransferRecord>,
}

/// The account ledger — owns balances and key custody, and orchestrates
/// signed transfers through the settlement bridge.
///
/// All public operations take `&self`; every check-then-mutate sequence
/// runs under a single ledger-wide lock. The bridge export runs after the
/// in-memory commit and outside the lock.
pub struct AccountLedger {
    state: Mutex<LedgerState>,
    exporter: BridgeExporter,
}

impl AccountLedger {
    pub fn new(exporter: BridgeExporter) -> Self {
        Self {
            state: Mutex::new(LedgerState::default()),
            exporter,
        }
    }

    /// The exporter this ledger hands finalized transfers to.
    pub fn exporter(&self) -> &BridgeExporter {
        &self.exporter
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().expect("ledger state lock poisoned")
    }

    /// Register an account, generating a fresh keypair for it.
    ///
    /// Idempotent: an existing balance is never reset and existing keys are
    /// never regenerated. An account that was credited into existence by a
    /// transfer (balance entry, no keys) gains its keypair here.
    pub fn create_account(&self, username: &str) {
        let mut state = self.state();
        if !state.balances.contains_key(username) {
            state.balances.insert(username.to_string(), 0);
        }
        if !state.keys.contains_key(username) {
            state
                .keys
                .insert(username.to_string(), aureus_crypto::generate_keypair());
            tracing::info!(account = username, "account registered");
        }
    }

    /// Current balance, or 0 for an unknown account.
    ///
    /// Reading never creates an account.
    pub fn balance(&self, username: &str) -> u64 {
        self.state().balances.get(username).copied().unwrap_or(0)
    }

    /// The account's public key, if it has one.
    pub fn public_key(&self, username: &str) -> Option<PublicKey> {
        self.state().keys.get(username).map(|kp| kp.public.clone())
    }

    /// The account's external address (hex public key), if it has keys.
    pub fn address(&self, username: &str) -> Option<String> {
        self.public_key(username).map(|pk| derive_address(&pk))
    }

    /// Seed an account with balance, creating its balance entry if unseen.
    ///
    /// This is the faucet-style entry point for balance introduced from
    /// outside the transfer flow. Returns the new balance.
    pub fn credit(&self, username: &str, amount: u64) -> Result<u64, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let mut state = self.state();
        let entry = state.balances.entry(username.to_string()).or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| LedgerError::BalanceOverflow(username.to_string()))?;
        Ok(*entry)
    }

    /// Transfer `amount` from `sender` to `recipient`.
    ///
    /// On success the debit and credit have been applied as a unit, a
    /// history record appended, and the signed transfer exported to the
    /// settlement slot. A failed export surfaces as [`LedgerError::Bridge`]
    /// with the ledger already mutated: there is no rollback, and callers
    /// must treat that variant as "possibly divergent from the settlement
    /// view", not as a rejection.
    pub fn transfer(
        &self,
        sender: &str,
        recipient: &str,
        amount: u64,
    ) -> Result<SignedTransfer, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let transfer = {
            let mut state = self.state();

            let available = *state
                .balances
                .get(sender)
                .ok_or_else(|| LedgerError::UnknownAccount(sender.to_string()))?;
            let keys = state
                .keys
                .get(sender)
                .ok_or_else(|| LedgerError::MissingKeyPair(sender.to_string()))?;
            if available < amount {
                return Err(LedgerError::InsufficientBalance {
                    needed: amount,
                    available,
                });
            }
            // The recipient's pre-credit balance must account for the debit
            // when an account transfers to itself.
            let recipient_balance = if sender == recipient {
                available - amount
            } else {
                state.balances.get(recipient).copied().unwrap_or(0)
            };
            let credited = recipient_balance
                .checked_add(amount)
                .ok_or_else(|| LedgerError::BalanceOverflow(recipient.to_string()))?;

            let transfer = SignedTransfer::sign(sender, recipient, amount, keys);

            // Commit point: both sides change together under the lock.
            state.balances.insert(sender.to_string(), available - amount);
            state.balances.insert(recipient.to_string(), credited);
            state.history.push(TransferRecord {
                sender: sender.to_string(),
                recipient: recipient.to_string(),
                amount,
                timestamp: Utc::now(),
            });
            transfer
        };

        if let Err(e) = self.exporter.export(&transfer) {
            tracing::error!(
                error = %e,
                sender,
                recipient,
                amount,
                "settlement export failed after ledger commit"
            );
            return Err(e.into());
        }
        tracing::info!(sender, recipient, amount, "transfer committed");
        Ok(transfer)
    }

    /// Snapshot of the transfer history, oldest first.
    pub fn history(&self) -> Vec<TransferRecord> {
        self.state().history.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ledger(dir: &TempDir) -> AccountLedger {
        AccountLedger::new(BridgeExporter::new(dir.path().join("dag_txn.json")))
    }

    #[test]
    fn unfunded_transfer_rejected_with_balances_untouched() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);
        ledger.create_account("alice");
        ledger.create_account("bob");

        let err = ledger.transfer("alice", "bob", 50).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientBalance {
                needed: 50,
                available: 0
            }
        ));
        assert_eq!(ledger.balance("alice"), 0);
        assert_eq!(ledger.balance("bob"), 0);
        assert!(ledger.exporter().last_exported().unwrap().is_none());
    }

    #[test]
    fn funded_transfer_moves_balance_and_exports() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);
        ledger.create_account("alice");
        ledger.create_account("bob");
        ledger.credit("alice", 100).unwrap();

        let transfer = ledger.transfer("alice", "bob", 40).unwrap();
        assert_eq!(ledger.balance("alice"), 60);
        assert_eq!(ledger.balance("bob"), 40);
        assert!(transfer.verify().is_ok());

        let slot = ledger.exporter().last_exported().unwrap().unwrap();
        assert_eq!(slot.sender, "alice");
        assert_eq!(slot.recipient, "bob");
        assert_eq!(slot.amount, 40);
    }

    #[test]
    fn create_account_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);
        ledger.create_account("alice");
        let key_before = ledger.public_key("alice").unwrap();
        ledger.credit("alice", 25).unwrap();

        ledger.create_account("alice");
        assert_eq!(ledger.public_key("alice").unwrap(), key_before);
        assert_eq!(ledger.balance("alice"), 25);
    }

    #[test]
    fn reading_a_balance_does_not_create_the_account() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);
        assert_eq!(ledger.balance("ghost"), 0);
        assert_eq!(ledger.public_key("ghost"), None);

        // Still unknown as a sender.
        ledger.credit("funder", 10).unwrap();
        assert!(matches!(
            ledger.transfer("ghost", "funder", 1).unwrap_err(),
            LedgerError::UnknownAccount(_)
        ));
    }

    #[test]
    fn recipient_created_by_transfer_has_no_keys_until_registered() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);
        ledger.create_account("alice");
        ledger.credit("alice", 50).unwrap();

        ledger.transfer("alice", "newcomer", 20).unwrap();
        assert_eq!(ledger.balance("newcomer"), 20);
        assert_eq!(ledger.public_key("newcomer"), None);

        // Without keys the newcomer cannot send...
        assert!(matches!(
            ledger.transfer("newcomer", "alice", 5).unwrap_err(),
            LedgerError::MissingKeyPair(_)
        ));

        // ...until registration backfills a keypair, preserving the balance.
        ledger.create_account("newcomer");
        assert_eq!(ledger.balance("newcomer"), 20);
        ledger.transfer("newcomer", "alice", 5).unwrap();
        assert_eq!(ledger.balance("newcomer"), 15);
    }

    #[test]
    fn zero_amount_rejected() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);
        ledger.create_account("alice");
        assert!(matches!(
            ledger.transfer("alice", "bob", 0).unwrap_err(),
            LedgerError::InvalidAmount
        ));
        assert!(matches!(
            ledger.credit("alice", 0).unwrap_err(),
            LedgerError::InvalidAmount
        ));
    }

    #[test]
    fn transfers_are_zero_sum() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);
        for name in ["a", "b", "c"] {
            ledger.create_account(name);
        }
        ledger.credit("a", 300).unwrap();

        ledger.transfer("a", "b", 120).unwrap();
        ledger.transfer("b", "c", 50).unwrap();
        ledger.transfer("c", "a", 10).unwrap();

        let total = ledger.balance("a") + ledger.balance("b") + ledger.balance("c");
        assert_eq!(total, 300);
    }

    #[test]
    fn history_records_each_transfer_in_order() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);
        ledger.create_account("alice");
        ledger.credit("alice", 100).unwrap();

        ledger.transfer("alice", "bob", 30).unwrap();
        ledger.transfer("alice", "carol", 20).unwrap();

        let history = ledger.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].recipient, "bob");
        assert_eq!(history[0].amount, 30);
        assert_eq!(history[1].recipient, "carol");
        assert_eq!(history[1].amount, 20);
    }

    #[test]
    fn failed_transfer_leaves_no_history() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);
        ledger.create_account("alice");
        let _ = ledger.transfer("alice", "bob", 5);
        assert!(ledger.history().is_empty());
    }

    #[test]
    fn export_failure_surfaces_but_ledger_stays_mutated() {
        let dir = TempDir::new().unwrap();
        let ledger = AccountLedger::new(BridgeExporter::new(
            dir.path().join("missing").join("dag_txn.json"),
        ));
        ledger.create_account("alice");
        ledger.credit("alice", 100).unwrap();

        let err = ledger.transfer("alice", "bob", 40).unwrap_err();
        assert!(matches!(err, LedgerError::Bridge(_)));
        // Commit-before-export: the in-memory state moved even though the
        // slot write failed.
        assert_eq!(ledger.balance("alice"), 60);
        assert_eq!(ledger.balance("bob"), 40);
    }

    #[test]
    fn address_is_hex_public_key() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);
        ledger.create_account("alice");
        let addr = ledger.address("alice").unwrap();
        assert_eq!(addr, ledger.public_key("alice").unwrap().to_hex());
        assert_eq!(ledger.address("ghost"), None);
    }
}
