use std::fmt;

use rust_decimal::Decimal;

#[derive(Debug)]
pub enum CoffeeMakerError {
    InputError(std::io::Error),
    InputClosed,
    TooManyInvalidAttempts,
    ConfigReaderError(String),
    InvalidConfiguration(String),
    IngredientNotInReservoir(String),
    NotEnoughIngredient { ingredient: String, drink: String },
    InsufficientFunds { missing: Decimal },
    PaymentNotCompleted,
}

impl fmt::Display for CoffeeMakerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoffeeMakerError::InputError(err) => write!(f, "could not read input: {}", err),
            CoffeeMakerError::InputClosed => write!(f, "input closed"),
            CoffeeMakerError::TooManyInvalidAttempts => write!(f, "too many invalid attempts"),
            CoffeeMakerError::ConfigReaderError(reason) => {
                write!(f, "could not read the configuration: {}", reason)
            }
            CoffeeMakerError::InvalidConfiguration(reason) => {
                write!(f, "invalid configuration: {}", reason)
            }
            CoffeeMakerError::IngredientNotInReservoir(ingredient) => {
                write!(f, "{} is not available in the reservoir", ingredient)
            }
            CoffeeMakerError::NotEnoughIngredient { ingredient, drink } => {
                write!(f, "insufficient {} to serve {}", ingredient, drink)
            }
            CoffeeMakerError::InsufficientFunds { missing } => {
                write!(f, "insufficient funds, missing €{:.2}", missing)
            }
            CoffeeMakerError::PaymentNotCompleted => write!(f, "payment not completed"),
        }
    }
}

impl std::error::Error for CoffeeMakerError {}

impl From<std::io::Error> for CoffeeMakerError {
    fn from(err: std::io::Error) -> Self {
        CoffeeMakerError::InputError(err)
    }
}

impl From<serde_json::Error> for CoffeeMakerError {
    fn from(err: serde_json::Error) -> Self {
        CoffeeMakerError::ConfigReaderError(err.to_string())
    }
}
