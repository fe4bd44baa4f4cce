//! Configuration parameters of the coffee machine

/// Times a prompt is repeated before giving up on the current question
pub const MAX_INPUT_ATTEMPTS: usize = 5;

/// Times the machine asks for more coins before cancelling the purchase
pub const MAX_PAYMENT_ROUNDS: usize = 5;

/// Initial capacity of the water container, in ml
pub const WATER_STORAGE: u64 = 2000;

/// Initial capacity of the milk container, in ml
pub const MILK_STORAGE: u64 = 1000;

/// Initial capacity of the coffee container, in grams
pub const COFFEE_STORAGE: u64 = 500;

/// Initial capacity of the sugar container, in grams
pub const SUGAR_STORAGE: u64 = 300;

/// Separator printed around the main menu title
pub const MENU_SEPARATOR: &str = "---------------------";
