use std::collections::HashMap;
use log::{debug, trace};
use crate::storage::{AccountAggregate, Storage};

/// Share of an account's total paid out as commission.
pub const COMMISSION_RATE: f64 = 0.10;

/// Derives commissions from a [`Storage`].
///
/// The aggregate snapshot is taken from storage the first time it is needed and
/// reused afterwards, so [`remove_highest_transaction`](Self::remove_highest_transaction)
/// and [`calculate_commissions`](Self::calculate_commissions) see the same data.
pub struct CommissionProcessor<'a, S: Storage + ?Sized> {
    storage: &'a S,
    snapshot: Option<Vec<AccountAggregate>>,
    highest_removed: bool,
}

impl<'a, S: Storage + ?Sized> CommissionProcessor<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        CommissionProcessor {
            storage,
            snapshot: None,
            highest_removed: false,
        }
    }

    /// Subtracts the highest transaction from the total of the account that owns it.
    ///
    /// Only the first call adjusts the snapshot; later calls return it unchanged.
    /// Without any transactions this is a no-op.
    pub fn remove_highest_transaction(&mut self) -> &[AccountAggregate] {
        let storage = self.storage;
        let snapshot = self.snapshot.get_or_insert_with(|| storage.aggregates());

        if self.highest_removed {
            trace!("Highest transaction already removed, returning adjusted snapshot");
            return snapshot;
        }
        self.highest_removed = true;

        if let Some(highest) = storage.highest_transaction() {
            if let Some(aggregate) = snapshot.iter_mut().find(|a| a.account_id == highest.account_id) {
                aggregate.total_amount -= highest.amount;
                debug!(
                    "Removed transaction {} ({}) from account {}, new total {}",
                    highest.transaction_id, highest.amount, highest.account_id, aggregate.total_amount
                );
            }
        }

        snapshot
    }

    /// Commission per account, computed from the current snapshot.
    pub fn calculate_commissions(&mut self) -> HashMap<String, f64> {
        let storage = self.storage;
        self.snapshot
            .get_or_insert_with(|| storage.aggregates())
            .iter()
            .map(|aggregate| (aggregate.account_id.clone(), aggregate.total_amount * COMMISSION_RATE))
            .collect()
    }
}
