//! Machine configuration: the menu and the reservoir, built in or read from a JSON file.
use log::{debug, info};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::constants::{COFFEE_STORAGE, MILK_STORAGE, SUGAR_STORAGE, WATER_STORAGE};
use crate::container::Container;
use crate::errors::CoffeeMakerError;
use crate::recipe::{Menu, Recipe};
use crate::reservoir::Reservoir;

#[derive(Deserialize, Debug)]
struct JsonRecipe {
    name: String,
    ingredients: Map<String, Value>,
    cost: Decimal,
}

#[derive(Deserialize, Debug)]
struct JsonContainer {
    ingredient: String,
    capacity: u64,
    current_level: Option<u64>,
    unit: String,
}

#[derive(Deserialize)]
struct MachineConfiguration {
    menu: Vec<JsonRecipe>,
    reservoir: Vec<JsonContainer>,
}

/// Espresso, latte and cappuccino with full water, milk, coffee and sugar containers
pub fn default_machine() -> (Menu, Reservoir) {
    let menu = Menu::new(vec![
        Recipe::new("espresso", vec![("water", 50), ("coffee", 18)], dec!(1.50)),
        Recipe::new("latte", vec![("water", 200), ("milk", 150), ("coffee", 24)], dec!(2.50)),
        Recipe::new("cappuccino", vec![("water", 250), ("milk", 100), ("coffee", 24)], dec!(3.00)),
    ]);

    let mut reservoir = Reservoir::new();
    reservoir.add("water", Container::new(WATER_STORAGE, "ml"));
    reservoir.add("milk", Container::new(MILK_STORAGE, "ml"));
    reservoir.add("coffee", Container::new(COFFEE_STORAGE, "grams"));
    reservoir.add("sugar", Container::new(SUGAR_STORAGE, "grams"));

    (menu, reservoir)
}

pub fn read_machine_from_file<P: AsRef<Path>>(
    path: P,
) -> Result<(Menu, Reservoir), CoffeeMakerError> {
    let file = File::open(path.as_ref()).map_err(|err| {
        CoffeeMakerError::ConfigReaderError(format!("{}: {}", path.as_ref().display(), err))
    })?;
    let machine = read_machine(BufReader::new(file))?;
    info!("[CONFIG] Loaded machine from {}", path.as_ref().display());
    Ok(machine)
}

pub fn read_machine<R: Read>(reader: R) -> Result<(Menu, Reservoir), CoffeeMakerError> {
    let configuration: MachineConfiguration = serde_json::from_reader(reader)?;
    validate(&configuration)?;
    let menu = build_menu(configuration.menu)?;
    Ok((menu, build_reservoir(configuration.reservoir)))
}

fn validate(configuration: &MachineConfiguration) -> Result<(), CoffeeMakerError> {
    if configuration.menu.is_empty() {
        return Err(invalid("the menu has no drinks".to_string()));
    }

    let mut drinks = HashSet::new();
    for recipe in &configuration.menu {
        if !drinks.insert(recipe.name.as_str()) {
            return Err(invalid(format!("drink {} is repeated", recipe.name)));
        }
        if recipe.cost < Decimal::ZERO {
            return Err(invalid(format!("drink {} has a negative cost", recipe.name)));
        }
    }

    let mut ingredients = HashSet::new();
    for container in &configuration.reservoir {
        if !ingredients.insert(container.ingredient.as_str()) {
            return Err(invalid(format!(
                "ingredient {} is repeated",
                container.ingredient
            )));
        }
        if container.capacity == 0 {
            return Err(invalid(format!("{} has no capacity", container.ingredient)));
        }
        if container.current_level.unwrap_or(container.capacity) > container.capacity {
            return Err(invalid(format!(
                "{} is filled above its capacity",
                container.ingredient
            )));
        }
    }
    Ok(())
}

fn invalid(reason: String) -> CoffeeMakerError {
    CoffeeMakerError::InvalidConfiguration(reason)
}

fn build_menu(json_recipes: Vec<JsonRecipe>) -> Result<Menu, CoffeeMakerError> {
    let mut recipes = Vec::new();
    for recipe in json_recipes {
        debug!("[CONFIG] Drink {} costs {}", recipe.name, recipe.cost);
        let ingredients = get_quantities_from_recipe(&recipe)?;
        recipes.push(Recipe {
            name: recipe.name,
            ingredients,
            cost: recipe.cost,
        });
    }
    Ok(Menu::new(recipes))
}

/// Ingredients in the order they appear in the file. Quantities must be positive integers.
fn get_quantities_from_recipe(
    recipe: &JsonRecipe,
) -> Result<Vec<(String, u64)>, CoffeeMakerError> {
    let mut quantities = Vec::new();
    for (ingredient, quantity) in &recipe.ingredients {
        match quantity.as_u64() {
            Some(quantity) if quantity > 0 => quantities.push((ingredient.clone(), quantity)),
            _ => {
                return Err(invalid(format!(
                    "drink {} needs a positive quantity of {}",
                    recipe.name, ingredient
                )));
            }
        }
    }
    Ok(quantities)
}

fn build_reservoir(json_containers: Vec<JsonContainer>) -> Reservoir {
    let mut reservoir = Reservoir::new();
    for container in json_containers {
        let level = container.current_level.unwrap_or(container.capacity);
        reservoir.add(
            &container.ingredient,
            Container::with_level(container.capacity, level, &container.unit),
        );
    }
    reservoir
}
