use crate::{ledger::Ledger, recipe::title_case, reservoir::Reservoir};

/// Machine report: reservoir levels, money collected and drinks served.
pub fn report(reservoir: &Reservoir, ledger: &Ledger) -> String {
    let mut report = String::from("===== MACHINE REPORT =====\n\nReservoir Levels: \n");
    add_levels_to_report(reservoir, &mut report);
    report.push_str(&format!("\nMoney in machine: €{:.2}\n", ledger.money));
    report.push_str("\nDrinks Served:\n");
    add_drinks_to_report(ledger, &mut report);
    report
}

fn add_levels_to_report(reservoir: &Reservoir, report: &mut String) {
    for (ingredient, container) in reservoir.iter() {
        report.push_str(&format!(
            "> {} : {}/{} {} ({:.1}%)\n",
            title_case(ingredient),
            container.remaining,
            container.capacity,
            container.unit,
            container.percentage()
        ));
    }
}

fn add_drinks_to_report(ledger: &Ledger, report: &mut String) {
    for (drink, count) in ledger.drinks_served() {
        report.push_str(&format!("{}: {}\n", title_case(drink), count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        container::Container,
        recipe::{Menu, Recipe},
    };
    use rust_decimal_macros::dec;

    #[test]
    fn should_render_levels_money_and_drinks() {
        let menu = Menu::new(vec![
            Recipe::new("espresso", vec![("water", 50)], dec!(1.5)),
            Recipe::new("latte", vec![("water", 200)], dec!(2.5)),
        ]);
        let mut reservoir = Reservoir::new();
        reservoir.add("water", Container::with_level(2000, 1950, "ml"));
        let mut ledger = Ledger::new(&menu);
        ledger.update(&menu.recipes()[0]);

        let expected = "===== MACHINE REPORT =====\n\n\
                        Reservoir Levels: \n\
                        > Water : 1950/2000 ml (97.5%)\n\
                        \nMoney in machine: €1.50\n\
                        \nDrinks Served:\n\
                        Espresso: 1\n\
                        Latte: 0\n";
        assert_eq!(expected, report(&reservoir, &ledger));
    }

    #[test]
    fn should_not_change_the_machine() {
        let menu = Menu::new(vec![Recipe::new("espresso", vec![], dec!(1.5))]);
        let mut reservoir = Reservoir::new();
        reservoir.add("milk", Container::new(1000, "ml"));
        let ledger = Ledger::new(&menu);
        let first = report(&reservoir, &ledger);
        assert_eq!(first, report(&reservoir, &ledger));
        assert_eq!(Some(1000), reservoir.level("milk"));
    }
}
