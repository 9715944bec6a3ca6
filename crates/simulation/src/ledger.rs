//! Participant position accounting, independent of pool internals.
//!
//! The ledger records what a participant put into each of the four
//! directional sub-pools and the sub-pool totals at that moment. The
//! withdrawable value scales each deposit by its sub-pool's growth since
//! deposit — LP-share accounting applied independently per sub-pool. The
//! split itself never changes after deposit; only the pool's aggregate
//! long/short balances move as fees accrue.

use crate::pool::SubReserves;
use rust_decimal::Decimal;

/// A participant's recorded stake in the four directional sub-pools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionLedger {
    deposited: SubReserves,
    totals_at_deposit: SubReserves,
}

impl PositionLedger {
    pub(crate) fn from_deposit(deposited: SubReserves, totals_at_deposit: SubReserves) -> Self {
        Self {
            deposited,
            totals_at_deposit,
        }
    }

    /// Withdrawable token amounts `(token_a, token_b)` at the given pool
    /// state.
    ///
    /// Pure: calling it twice against the same state returns identical
    /// values, and a pool state untouched since deposit returns the
    /// deposit itself.
    #[must_use]
    pub fn withdrawable(&self, current: SubReserves) -> (Decimal, Decimal) {
        let amount_a = Self::grown(
            self.deposited.long_a,
            self.totals_at_deposit.long_a,
            current.long_a,
        ) + Self::grown(
            self.deposited.short_a,
            self.totals_at_deposit.short_a,
            current.short_a,
        );
        let amount_b = Self::grown(
            self.deposited.long_b,
            self.totals_at_deposit.long_b,
            current.long_b,
        ) + Self::grown(
            self.deposited.short_b,
            self.totals_at_deposit.short_b,
            current.short_b,
        );
        (amount_a, amount_b)
    }

    fn grown(deposited: Decimal, total_then: Decimal, total_now: Decimal) -> Decimal {
        if deposited.is_zero() || total_then.is_zero() {
            return Decimal::ZERO;
        }
        deposited * (total_now / total_then)
    }
}
