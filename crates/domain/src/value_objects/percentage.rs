use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percentage(pub Decimal);

impl Percentage {
    pub fn from_bps(bps: u32) -> Self {
        Self(Decimal::from(bps) / Decimal::from(10000))
    }

    /// The remaining share up to 100%.
    pub fn complement(&self) -> Self {
        Self(Decimal::ONE - self.0)
    }

    /// Applies the percentage to an amount.
    pub fn of(&self, amount: Decimal) -> Decimal {
        amount * self.0
    }
}
