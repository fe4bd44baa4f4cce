//! Money collected and drinks served since the machine was turned on
use rust_decimal::Decimal;

use crate::recipe::{Menu, Recipe};

#[derive(Debug, Clone)]
pub struct Ledger {
    pub money: Decimal,
    drinks_served: Vec<(String, u64)>,
}

impl Ledger {
    /// Starts with zero money and a zero count for every drink of the menu
    pub fn new(menu: &Menu) -> Ledger {
        Ledger {
            money: Decimal::ZERO,
            drinks_served: menu
                .recipes()
                .iter()
                .map(|recipe| (recipe.name.clone(), 0))
                .collect(),
        }
    }

    /// Records a served drink. Call once per successful fulfillment.
    pub fn update(&mut self, recipe: &Recipe) {
        self.money += recipe.cost;
        match self
            .drinks_served
            .iter_mut()
            .find(|(drink, _)| *drink == recipe.name)
        {
            Some((_, count)) => *count += 1,
            None => self.drinks_served.push((recipe.name.clone(), 1)),
        }
    }

    pub fn served(&self, drink: &str) -> u64 {
        self.drinks_served
            .iter()
            .find(|(name, _)| name == drink)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn drinks_served(&self) -> &[(String, u64)] {
        &self.drinks_served
    }
}
