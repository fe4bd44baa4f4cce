//! Dispenser of the coffee machine. Serves a recipe from the reservoir.
use log::{debug, info};

use crate::{errors::CoffeeMakerError, recipe::Recipe, reservoir::Reservoir};

/// Serves `recipe`, deducting every ingredient from the reservoir.
/// If any ingredient is missing or short, nothing is deducted.
pub fn fulfill_order(reservoir: &mut Reservoir, recipe: &Recipe) -> Result<(), CoffeeMakerError> {
    check_ingredients(reservoir, recipe)?;
    for (ingredient, quantity_required) in &recipe.ingredients {
        consume_ingredient(reservoir, ingredient, *quantity_required)?;
    }
    info!("[DISPENSER] Served {}", recipe.name);
    Ok(())
}

fn check_ingredients(reservoir: &Reservoir, recipe: &Recipe) -> Result<(), CoffeeMakerError> {
    for (ingredient, quantity_required) in &recipe.ingredients {
        let container = reservoir
            .get(ingredient)
            .ok_or_else(|| CoffeeMakerError::IngredientNotInReservoir(ingredient.clone()))?;
        if !container.has_at_least(*quantity_required) {
            info!(
                "[DISPENSER] Skipped {}, not enough {} ({} needed, {} left)",
                recipe.name, ingredient, quantity_required, container.remaining
            );
            return Err(CoffeeMakerError::NotEnoughIngredient {
                ingredient: ingredient.clone(),
                drink: recipe.name.clone(),
            });
        }
    }
    Ok(())
}

fn consume_ingredient(
    reservoir: &mut Reservoir,
    ingredient: &str,
    quantity_required: u64,
) -> Result<(), CoffeeMakerError> {
    let container = reservoir
        .get_mut(ingredient)
        .ok_or_else(|| CoffeeMakerError::IngredientNotInReservoir(ingredient.to_string()))?;
    debug!(
        "[DISPENSER] Uses {} of {}, there is {}",
        quantity_required, ingredient, container.remaining
    );
    container.consume(quantity_required);
    debug!(
        "[DISPENSER] Remains {} of {}, {} consumed so far",
        container.remaining, ingredient, container.consumed
    );
    Ok(())
}
