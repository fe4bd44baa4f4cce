//! Ingredient inventory of the machine
use crate::{container::Container, recipe::title_case};

/// Containers by ingredient, kept in the order they were configured so reports are stable.
#[derive(Debug, Clone, Default)]
pub struct Reservoir {
    containers: Vec<(String, Container)>,
}

impl Reservoir {
    pub fn new() -> Reservoir {
        Reservoir {
            containers: Vec::new(),
        }
    }

    pub fn add(&mut self, ingredient: &str, container: Container) {
        match self.get_mut(ingredient) {
            Some(existing) => *existing = container,
            None => self.containers.push((ingredient.to_string(), container)),
        }
    }

    pub fn get(&self, ingredient: &str) -> Option<&Container> {
        self.containers
            .iter()
            .find(|(name, _)| name == ingredient)
            .map(|(_, container)| container)
    }

    pub fn get_mut(&mut self, ingredient: &str) -> Option<&mut Container> {
        self.containers
            .iter_mut()
            .find(|(name, _)| name == ingredient)
            .map(|(_, container)| container)
    }

    pub fn level(&self, ingredient: &str) -> Option<u64> {
        self.get(ingredient).map(|container| container.remaining)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Container)> {
        self.containers
            .iter()
            .map(|(ingredient, container)| (ingredient, container))
    }

    /// Current levels, one ingredient per line: `Water: 1950/2000 ml`
    pub fn status(&self) -> String {
        self.iter()
            .map(|(ingredient, container)| {
                format!(
                    "{}: {}/{} {}",
                    title_case(ingredient),
                    container.remaining,
                    container.capacity,
                    container.unit
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
