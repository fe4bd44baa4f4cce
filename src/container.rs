/// An ingredient container of the reservoir. `remaining` never exceeds `capacity`.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub capacity: u64,
    pub remaining: u64,
    pub consumed: u64,
    pub unit: String,
}

impl Container {
    pub fn new(capacity: u64, unit: &str) -> Container {
        Container::with_level(capacity, capacity, unit)
    }

    pub fn with_level(capacity: u64, remaining: u64, unit: &str) -> Container {
        Container {
            capacity,
            remaining: remaining.min(capacity),
            consumed: 0,
            unit: unit.to_string(),
        }
    }

    pub fn has_at_least(&self, quantity: u64) -> bool {
        self.remaining >= quantity
    }

    /// Callers check `has_at_least` first; the level saturates at zero regardless.
    pub fn consume(&mut self, quantity: u64) {
        let taken = quantity.min(self.remaining);
        self.remaining -= taken;
        self.consumed += taken;
    }

    pub fn percentage(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.remaining as f64 * 100.0 / self.capacity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_a_full_container() {
        let container = Container::new(2000, "ml");
        assert_eq!(2000, container.remaining);
        assert_eq!(0, container.consumed);
        assert_eq!(100.0, container.percentage());
    }

    #[test]
    fn should_clamp_the_initial_level_to_the_capacity() {
        let container = Container::with_level(100, 500, "ml");
        assert_eq!(100, container.remaining);
    }

    #[test]
    fn should_consume_and_track_the_consumed_quantity() {
        let mut container = Container::new(2000, "ml");
        container.consume(50);
        assert_eq!(1950, container.remaining);
        assert_eq!(50, container.consumed);
        assert_eq!(97.5, container.percentage());
    }

    #[test]
    fn should_never_go_below_zero() {
        let mut container = Container::with_level(100, 10, "grams");
        assert_eq!(false, container.has_at_least(20));
        container.consume(20);
        assert_eq!(0, container.remaining);
        assert_eq!(10, container.consumed);
    }
}
