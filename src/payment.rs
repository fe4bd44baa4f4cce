//! Coins accepted by the machine and change computation
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::CoffeeMakerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denomination {
    OneCent,
    TwoCents,
    FiveCents,
    TenCents,
    TwentyCents,
    FiftyCents,
    OneEuro,
    TwoEuros,
}

impl Denomination {
    /// Every accepted coin, in the order they are asked for
    pub const ALL: [Denomination; 8] = [
        Denomination::OneCent,
        Denomination::TwoCents,
        Denomination::FiveCents,
        Denomination::TenCents,
        Denomination::TwentyCents,
        Denomination::FiftyCents,
        Denomination::OneEuro,
        Denomination::TwoEuros,
    ];

    pub fn value(&self) -> Decimal {
        match self {
            Denomination::OneCent => dec!(0.01),
            Denomination::TwoCents => dec!(0.02),
            Denomination::FiveCents => dec!(0.05),
            Denomination::TenCents => dec!(0.10),
            Denomination::TwentyCents => dec!(0.20),
            Denomination::FiftyCents => dec!(0.50),
            Denomination::OneEuro => dec!(1),
            Denomination::TwoEuros => dec!(2),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Denomination::OneCent => "1 cent",
            Denomination::TwoCents => "2 cent",
            Denomination::FiveCents => "5 cent",
            Denomination::TenCents => "10 cent",
            Denomination::TwentyCents => "20 cent",
            Denomination::FiftyCents => "50 cent",
            Denomination::OneEuro => "1 euro",
            Denomination::TwoEuros => "2 euro",
        }
    }
}

/// Coins inserted for a single purchase
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payment {
    coins: Vec<(Denomination, u64)>,
}

impl Payment {
    pub fn new() -> Payment {
        Payment { coins: Vec::new() }
    }

    pub fn insert(&mut self, denomination: Denomination, count: u64) {
        match self
            .coins
            .iter_mut()
            .find(|(inserted, _)| *inserted == denomination)
        {
            Some((_, inserted_count)) => *inserted_count += count,
            None => self.coins.push((denomination, count)),
        }
    }

    /// Adds the coins of another round of payment
    pub fn merge(&mut self, other: Payment) {
        for (denomination, count) in other.coins {
            self.insert(denomination, count);
        }
    }

    pub fn total(&self) -> Decimal {
        self.coins
            .iter()
            .map(|(denomination, count)| denomination.value() * Decimal::from(*count))
            .sum()
    }
}

/// Change to give back, or the missing amount when the payment does not cover the price.
pub fn compute_change(
    price: Decimal,
    total_inserted: Decimal,
) -> Result<Decimal, CoffeeMakerError> {
    if total_inserted < price {
        return Err(CoffeeMakerError::InsufficientFunds {
            missing: price - total_inserted,
        });
    }
    Ok(total_inserted - price)
}
