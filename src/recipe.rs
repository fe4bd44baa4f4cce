//! Drinks offered by the machine
use rust_decimal::Decimal;

/// A drink with the ingredients it consumes (in the order they are dispensed) and its cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<(String, u64)>,
    pub cost: Decimal,
}

impl Recipe {
    pub fn new(name: &str, ingredients: Vec<(&str, u64)>, cost: Decimal) -> Recipe {
        Recipe {
            name: name.to_string(),
            ingredients: ingredients
                .into_iter()
                .map(|(ingredient, quantity)| (ingredient.to_string(), quantity))
                .collect(),
            cost,
        }
    }

    pub fn title(&self) -> String {
        title_case(&self.name)
    }
}

/// Catalog of recipes, in the order they are shown to the user.
#[derive(Debug, Clone)]
pub struct Menu {
    recipes: Vec<Recipe>,
}

impl Menu {
    pub fn new(recipes: Vec<Recipe>) -> Menu {
        Menu { recipes }
    }

    /// Looks up a drink by its 1-based position in the menu
    pub fn by_position(&self, position: usize) -> Option<&Recipe> {
        position.checked_sub(1).and_then(|index| self.recipes.get(index))
    }

    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.name == name)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Numbered list of drinks, one per line: `1. Espresso`
    pub fn options(&self) -> String {
        self.recipes
            .iter()
            .enumerate()
            .map(|(index, recipe)| format!("{}. {}", index + 1, recipe.title()))
            .collect::<Vec<String>>()
            .join("\n")
    }
}

/// Capitalizes the first letter of every word: `flat white` -> `Flat White`
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
