//! Amount validation and the power-of-two decomposition used to lay out
//! split outputs across the mint's fixed set of denominations.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The mint supports denominations `2^i` for `0 <= i < DENOMINATION_COUNT`.
pub const DENOMINATION_COUNT: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(pub u64);

impl From<u64> for Amount {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl AsRef<u64> for Amount {
    fn as_ref(&self) -> &u64 {
        &self.0
    }
}

/// Any amount used in a request must be a positive integer below `2^32`.
/// `amount` is signed so that negative wire input (invalid, but
/// representable over JSON) is rejected rather than silently wrapped.
pub fn validate_amount(amount: i64) -> Result<u64, CoreError> {
    if amount > 0 && amount < 2_i64.pow(32) {
        Ok(amount as u64)
    } else {
        Err(CoreError::InvalidAmount(amount))
    }
}

/// The unique ascending list of distinct powers of two summing to `n`.
/// `n` must fit within the mint's `DENOMINATION_COUNT` denominations, i.e.
/// have no bit set at position `DENOMINATION_COUNT` or above.
pub fn decompose(n: u64) -> Result<Vec<u64>, CoreError> {
    if n >> DENOMINATION_COUNT != 0 {
        return Err(CoreError::InvalidDenomination(n));
    }

    Ok((0..DENOMINATION_COUNT)
        .filter(|i| (n >> i) & 1 == 1)
        .map(|i| 1u64 << i)
        .collect())
}
