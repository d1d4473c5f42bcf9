//! Dynamic pricing
//!
//! Sale price = MASP + platform fee + market adjustment, where the market
//! adjustment is a step function of available stock plus a small random
//! jitter. Uses rust_decimal for the arithmetic, stores as f64.
//!
//! | available | base adjustment |
//! |-----------|-----------------|
//! | 0..=20    | +2              |
//! | 21..=100  | 0               |
//! | > 100     | -1              |
//!
//! The random draw is separated from the calculation: [`Jitter::sample`]
//! consumes randomness, [`quote`] is a pure function of its inputs.

use rand::Rng;
use rust_decimal::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::error::{AppError, ErrorCode};

/// Fixed platform fee added on top of MASP (per unit)
pub const PLATFORM_FEE: f64 = 3.0;

/// Upper bound (inclusive) of the scarce stock tier
pub const SCARCE_STOCK_MAX: u32 = 20;

/// Upper bound (inclusive) of the moderate stock tier
pub const MODERATE_STOCK_MAX: u32 = 100;

/// Largest adjustment a quote can carry (scarce tier + bump)
const MAX_ADJUSTMENT: i64 = 3;

const DECIMAL_PLACES: u32 = 2;

/// Amount that cannot be represented as an exact money value
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PricingError {
    #[error("masp {0} cannot be priced")]
    InvalidMasp(f64),

    #[error("total for {qty} x {unit_price} is out of range")]
    TotalOutOfRange { unit_price: f64, qty: u32 },
}

pub type PricingResult<T> = Result<T, PricingError>;

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::InvalidMasp(masp) => {
                AppError::with_message(ErrorCode::ProductInvalidPrice, err.to_string())
                    .with_detail("masp", masp.to_string())
            }
            PricingError::TotalOutOfRange { qty, .. } => {
                AppError::with_message(ErrorCode::OrderInvalidQuantity, err.to_string())
                    .with_detail("qty", qty)
            }
        }
    }
}

#[inline]
fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
}

#[inline]
fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

#[inline]
fn to_f64(value: Decimal) -> Option<f64> {
    round2(value).to_f64()
}

/// Check that `masp` can go through [`quote`] for any stock and jitter
///
/// Sign is not checked here; callers that forbid negative MASP do so
/// themselves.
pub fn check_masp(masp: f64) -> PricingResult<()> {
    to_decimal(masp)
        .and_then(|m| m.checked_add(Decimal::from(MAX_ADJUSTMENT)))
        .and_then(|m| to_decimal(PLATFORM_FEE).and_then(|fee| m.checked_add(fee)))
        .map(|_| ())
        .ok_or(PricingError::InvalidMasp(masp))
}

/// Random component of the market adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jitter {
    /// No extra movement (3 out of 4 draws)
    #[default]
    Flat,
    /// +1 on top of the stock tier (1 out of 4 draws)
    Bump,
}

impl Jitter {
    /// Draw a jitter value: `Flat` with probability 3/4, `Bump` with 1/4
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_ratio(1, 4) {
            Jitter::Bump
        } else {
            Jitter::Flat
        }
    }

    fn amount(self) -> Decimal {
        match self {
            Jitter::Flat => Decimal::ZERO,
            Jitter::Bump => Decimal::ONE,
        }
    }
}

/// Buyer-facing hint derived from the sign of the market adjustment
///
/// Serialized as its advice text, which is what buyers see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    BuyNow,
    Wait,
    Stable,
}

impl Recommendation {
    fn from_adjustment(adjustment: Decimal) -> Self {
        if adjustment > Decimal::ZERO {
            Recommendation::BuyNow
        } else if adjustment < Decimal::ZERO {
            Recommendation::Wait
        } else {
            Recommendation::Stable
        }
    }

    /// Human-readable advice shown next to the price
    pub fn advice(&self) -> &'static str {
        match self {
            Recommendation::BuyNow => "Buy now - price expected to rise",
            Recommendation::Wait => "You may wait - price expected to drop",
            Recommendation::Stable => "Price stable",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.advice())
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.advice())
    }
}

impl<'de> Deserialize<'de> for Recommendation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        [
            Recommendation::BuyNow,
            Recommendation::Wait,
            Recommendation::Stable,
        ]
        .into_iter()
        .find(|r| r.advice() == text)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown recommendation: {text}")))
    }
}

/// Price breakdown for one unit of a product
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub masp: f64,
    pub platform_fee: f64,
    /// Stock tier + jitter, or the recomputed value after the floor clamp
    pub market_adjustment: f64,
    pub final_price: f64,
    pub recommendation: Recommendation,
}

/// Stock-tier part of the market adjustment (before jitter)
pub fn base_adjustment(available: u32) -> i32 {
    if available <= SCARCE_STOCK_MAX {
        2
    } else if available <= MODERATE_STOCK_MAX {
        0
    } else {
        -1
    }
}

/// Compute the sale price for one unit
///
/// The final price never drops below `masp + PLATFORM_FEE`; when the
/// adjustment would push it lower the price is clamped and the adjustment
/// recomputed from the clamped price so the breakdown stays consistent.
///
/// Fails when `masp` has no exact decimal form (NaN, infinite, or beyond
/// the decimal range), since the floor could not be honoured.
pub fn quote(masp: f64, available: u32, jitter: Jitter) -> PricingResult<PriceQuote> {
    let invalid = || PricingError::InvalidMasp(masp);
    let masp_d = to_decimal(masp).ok_or_else(invalid)?;
    let fee = to_decimal(PLATFORM_FEE).ok_or_else(invalid)?;

    let floor = masp_d.checked_add(fee).ok_or_else(invalid)?;
    let mut adjustment = Decimal::from(base_adjustment(available)) + jitter.amount();
    let mut final_price = round2(floor.checked_add(adjustment).ok_or_else(invalid)?);

    let min_allowed = round2(floor);
    if final_price < min_allowed {
        final_price = min_allowed;
        adjustment = round2(final_price - floor);
    }

    Ok(PriceQuote {
        masp,
        platform_fee: PLATFORM_FEE,
        market_adjustment: to_f64(adjustment).ok_or_else(invalid)?,
        final_price: to_f64(final_price).ok_or_else(invalid)?,
        recommendation: Recommendation::from_adjustment(adjustment),
    })
}

/// [`quote`] with a jitter drawn from `rng`
pub fn quote_with_rng<R: Rng + ?Sized>(
    masp: f64,
    available: u32,
    rng: &mut R,
) -> PricingResult<PriceQuote> {
    quote(masp, available, Jitter::sample(rng))
}
