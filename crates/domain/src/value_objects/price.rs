use crate::error::EngineError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A strictly positive price.
///
/// Construction validates positivity, so a `Price` in hand can be used as
/// a divisor or a swap target without re-checking. Deserialization goes
/// through the same validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price {
    value: Decimal,
}

impl Price {
    pub fn new(value: Decimal) -> Result<Self, EngineError> {
        if value <= Decimal::ZERO {
            return Err(EngineError::NonPositivePrice(value));
        }
        Ok(Self { value })
    }

    #[must_use]
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// This price expressed in units of `quote`, collapsing two USD
    /// observations into a single pair price.
    #[must_use]
    pub fn per(&self, quote: Price) -> Price {
        Price {
            value: self.value / quote.value,
        }
    }
}

impl TryFrom<Decimal> for Price {
    type Error = EngineError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.value
    }
}
