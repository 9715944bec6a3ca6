use super::decimal_sqrt;
use crate::error::EngineError;
use crate::token::TokenSide;
use rust_decimal::Decimal;

/// Calculates the output amount for a given input amount in a constant
/// product pool (x * y = k).
///
/// formula: dy = y * dx / (x + dx)
/// taking fee into account: dy = y * (dx * (1 - fee)) / (x + (dx * (1 - fee)))
///
/// The fee is deducted from the input before the curve is applied; returns
/// `(amount_out, fee_amount)` with the fee expressed in input-token units.
pub fn quote_out_amount(
    amount_in: Decimal,
    reserve_in: Decimal,
    reserve_out: Decimal,
    fee_rate: Decimal,
) -> Result<(Decimal, Decimal), EngineError> {
    if amount_in <= Decimal::ZERO {
        return Err(EngineError::NonPositiveAmount(amount_in));
    }
    if reserve_in <= Decimal::ZERO || reserve_out <= Decimal::ZERO {
        return Err(EngineError::ZeroReserve);
    }

    let fee = amount_in * fee_rate;
    let net_in = amount_in - fee;
    if net_in <= Decimal::ZERO {
        return Err(EngineError::NonPositiveAmount(net_in));
    }

    let amount_out = reserve_out * net_in / (reserve_in + net_in);
    if amount_out >= reserve_out {
        return Err(EngineError::InsufficientReserve {
            amount_in,
            reserve_out,
        });
    }

    Ok((amount_out, fee))
}

/// Spot price of the token held in `reserve_in`, expressed in units of the
/// other token: price = reserve_out / reserve_in.
pub fn spot_price(reserve_in: Decimal, reserve_out: Decimal) -> Result<Decimal, EngineError> {
    if reserve_in <= Decimal::ZERO || reserve_out <= Decimal::ZERO {
        return Err(EngineError::ZeroReserve);
    }
    Ok(reserve_out / reserve_in)
}

/// The constant product K.
pub fn invariant_k(reserve_a: Decimal, reserve_b: Decimal) -> Decimal {
    reserve_a * reserve_b
}

/// Sizes the synthetic trade that moves the pool's spot price of token A
/// (quoted in token B) onto `target`.
///
/// Closed-form inversion of the constant-product curve: selling token A
/// until `price = k / (reserve_a + dx)^2` gives `dx = sqrt(k / target) -
/// reserve_a`; selling token B gives `dy = sqrt(k * target) - reserve_b`.
/// Returns `None` when the pool already sits on the target price (or close
/// enough that the required input rounds away to nothing).
pub fn trade_to_target_price(
    reserve_a: Decimal,
    reserve_b: Decimal,
    target: Decimal,
) -> Result<Option<(TokenSide, Decimal)>, EngineError> {
    if target <= Decimal::ZERO {
        return Err(EngineError::NonPositivePrice(target));
    }
    let current = spot_price(reserve_a, reserve_b)?;
    let k = invariant_k(reserve_a, reserve_b);

    let (side, amount_in) = if target < current {
        (TokenSide::A, decimal_sqrt(k / target)? - reserve_a)
    } else {
        (TokenSide::B, decimal_sqrt(k * target)? - reserve_b)
    };

    if amount_in <= Decimal::ZERO {
        return Ok(None);
    }
    Ok(Some((side, amount_in)))
}
