//! The coffee machine: main menu, purchase flow and shutdown report.
use std::io::{BufRead, Write};

use log::{debug, info, warn};
use rust_decimal::Decimal;

use crate::{
    constants::{MAX_INPUT_ATTEMPTS, MAX_PAYMENT_ROUNDS, MENU_SEPARATOR},
    dispenser::fulfill_order,
    errors::CoffeeMakerError,
    ledger::Ledger,
    payment::{compute_change, Denomination, Payment},
    prompt::Prompter,
    recipe::{Menu, Recipe},
    reservoir::Reservoir,
    statistics::report,
};

/// Steps of a purchase. The machine rests in `Idle` between purchases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineState {
    Idle,
    Selecting,
    PayingForDrink,
    Validating,
    Serving,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    CoffeeMenu,
    Reservoir,
    Off,
}

impl MenuOption {
    fn parse(answer: &str) -> Result<MenuOption, String> {
        match answer.to_lowercase().as_str() {
            "c" => Ok(MenuOption::CoffeeMenu),
            "r" => Ok(MenuOption::Reservoir),
            "o" => Ok(MenuOption::Off),
            _ => Err("Invalid input. Please, choose a valid option".to_string()),
        }
    }
}

pub struct CoffeeMaker {
    menu: Menu,
    reservoir: Reservoir,
    ledger: Ledger,
    state: MachineState,
    last_purchase: Vec<MachineState>,
}

impl CoffeeMaker {
    pub fn new(menu: Menu, reservoir: Reservoir) -> CoffeeMaker {
        let ledger = Ledger::new(&menu);
        CoffeeMaker {
            menu,
            reservoir,
            ledger,
            state: MachineState::Idle,
            last_purchase: Vec::new(),
        }
    }

    pub fn state(&self) -> MachineState {
        self.state
    }

    pub fn reservoir(&self) -> &Reservoir {
        &self.reservoir
    }

    /// States visited by the most recent purchase, from `Selecting` back to `Idle`
    pub fn last_purchase(&self) -> &[MachineState] {
        &self.last_purchase
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn report(&self) -> String {
        report(&self.reservoir, &self.ledger)
    }

    /// Serves the main menu until the machine is turned off or the input is closed,
    /// then prints the final report.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), CoffeeMakerError> {
        loop {
            let handled = match self.choose_option(prompter) {
                Ok(MenuOption::CoffeeMenu) => self.sell_drink(prompter),
                Ok(MenuOption::Reservoir) => {
                    prompter.say(&format!("Reservoir Status: {}", self.reservoir.status()))
                }
                Ok(MenuOption::Off) => break,
                Err(CoffeeMakerError::TooManyInvalidAttempts) => Ok(()),
                Err(err) => Err(err),
            };
            match handled {
                Ok(()) => {}
                Err(CoffeeMakerError::InputClosed) => {
                    info!("[MACHINE] No more input, turning off");
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        if self.state != MachineState::Idle {
            self.transition(MachineState::Idle);
        }
        prompter.say("Machine is turning off...")?;
        prompter.say(&self.report())?;
        Ok(())
    }

    fn choose_option<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<MenuOption, CoffeeMakerError> {
        prompter.say(MENU_SEPARATOR)?;
        prompter.say("What would you like today?")?;
        prompter.say(MENU_SEPARATOR)?;
        prompter.ask("\n[C]offee Menu\n[R]eservoir\n[O]ff\n", MenuOption::parse)
    }

    /// One purchase: selection, payment, validation and either serving or rejecting the drink.
    pub fn sell_drink<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<(), CoffeeMakerError> {
        self.transition(MachineState::Selecting);
        let recipe = match self.select_drink(prompter) {
            Ok(recipe) => recipe,
            Err(err) => return self.cancel(prompter, err),
        };

        self.transition(MachineState::PayingForDrink);
        let change = match pay_for(prompter, &recipe) {
            Ok(change) => change,
            Err(err) => return self.cancel(prompter, err),
        };
        prompter.say(&format!("Change: €{:.2}\nThank you! Enjoy!", change))?;

        self.transition(MachineState::Validating);
        match fulfill_order(&mut self.reservoir, &recipe) {
            Ok(()) => {
                self.transition(MachineState::Serving);
                self.ledger.update(&recipe);
                prompter.say(&format!("{} is served!", recipe.title()))?;
            }
            Err(err) => {
                self.transition(MachineState::Rejected);
                self.reject(prompter, &recipe, err)?;
            }
        }
        self.transition(MachineState::Idle);
        Ok(())
    }

    fn select_drink<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Recipe, CoffeeMakerError> {
        prompter.say(&format!("Drinks: \n{}", self.menu.options()))?;
        let menu = &self.menu;
        let recipe = prompter.ask("Select your drink: ", |answer| {
            let position = answer
                .parse::<usize>()
                .map_err(|_| "Invalid input. Please enter a valid number.".to_string())?;
            menu.by_position(position)
                .cloned()
                .ok_or_else(|| "Invalid choice. Please try again.".to_string())
        })?;
        prompter.say(&format!("The cost of {} is €{:.2}.", recipe.title(), recipe.cost))?;
        Ok(recipe)
    }

    /// Payment is kept when the drink cannot be made.
    fn reject<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
        recipe: &Recipe,
        err: CoffeeMakerError,
    ) -> Result<(), CoffeeMakerError> {
        match err {
            CoffeeMakerError::IngredientNotInReservoir(ingredient) => {
                prompter.say(&format!("Error: {} is not available in the reservoir.", ingredient))?;
            }
            CoffeeMakerError::NotEnoughIngredient { ingredient, .. } => {
                prompter.say(&format!("Insufficient {} to serve {}.", ingredient, recipe.title()))?;
            }
            other => return Err(other),
        }
        warn!(
            "[MACHINE] {} rejected after payment, the payment of €{:.2} is not refunded",
            recipe.name, recipe.cost
        );
        prompter.say("The payment is not refunded.")?;
        Ok(())
    }

    fn cancel<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
        err: CoffeeMakerError,
    ) -> Result<(), CoffeeMakerError> {
        self.transition(MachineState::Idle);
        match err {
            CoffeeMakerError::TooManyInvalidAttempts => {
                prompter.say("Too many invalid answers. The order is cancelled.")
            }
            CoffeeMakerError::PaymentNotCompleted => {
                prompter.say("The payment was not completed. The order is cancelled.")
            }
            other => Err(other),
        }
    }

    fn transition(&mut self, next: MachineState) {
        debug!("[MACHINE] {:?} -> {:?}", self.state, next);
        if next == MachineState::Selecting {
            self.last_purchase.clear();
        }
        self.last_purchase.push(next);
        self.state = next;
    }
}

/// Collects coins until they cover the cost of `recipe` and returns the change.
/// Coins of every round add up. When the payment is abandoned, the inserted coins are returned.
fn pay_for<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    recipe: &Recipe,
) -> Result<Decimal, CoffeeMakerError> {
    let mut payment = Payment::new();
    for _ in 0..MAX_PAYMENT_ROUNDS {
        match collect_payment(prompter) {
            Ok(inserted) => payment.merge(inserted),
            Err(err) => {
                return_coins(prompter, &payment)?;
                return Err(err);
            }
        }
        match compute_change(recipe.cost, payment.total()) {
            Ok(change) => {
                debug!("[MACHINE] Paid €{:.2} for {}", payment.total(), recipe.name);
                return Ok(change);
            }
            Err(CoffeeMakerError::InsufficientFunds { missing }) => {
                prompter.say(&format!(
                    "Insufficient funds. Inserted €{:.2}, missing €{:.2}. Please insert more coins.",
                    payment.total(),
                    missing
                ))?;
            }
            Err(err) => return Err(err),
        }
    }
    warn!("[MACHINE] {} not paid after {} rounds", recipe.name, MAX_PAYMENT_ROUNDS);
    return_coins(prompter, &payment)?;
    Err(CoffeeMakerError::PaymentNotCompleted)
}

fn return_coins<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    payment: &Payment,
) -> Result<(), CoffeeMakerError> {
    if payment.total() > Decimal::ZERO {
        prompter.say(&format!("Returning €{:.2}.", payment.total()))?;
    }
    Ok(())
}

/// Asks for the number of coins of every denomination. An invalid count restarts the whole set.
fn collect_payment<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Payment, CoffeeMakerError> {
    'attempts: for _ in 0..MAX_INPUT_ATTEMPTS {
        let mut payment = Payment::new();
        for denomination in Denomination::ALL {
            let answer = prompter.read_line(&format!(
                "Enter the number of -- {} -- coins: ",
                denomination.label()
            ))?;
            match answer.parse::<u64>() {
                Ok(count) => payment.insert(denomination, count),
                Err(_) => {
                    prompter.say("Invalid input. Please try again.")?;
                    continue 'attempts;
                }
            }
        }
        return Ok(payment);
    }
    Err(CoffeeMakerError::TooManyInvalidAttempts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config_reader::default_machine, container::Container};
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    /// Answers for the eight coin prompts, from 1 cent to 2 euro
    fn coins(counts: [u64; 8]) -> String {
        counts
            .iter()
            .map(|count| format!("{}\n", count))
            .collect()
    }

    fn run_session(machine: &mut CoffeeMaker, input: &str) -> String {
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        machine.run(&mut prompter).unwrap();
        String::from_utf8(prompter.into_output()).unwrap()
    }

    fn machine() -> CoffeeMaker {
        let (menu, reservoir) = default_machine();
        CoffeeMaker::new(menu, reservoir)
    }

    #[test]
    fn should_serve_an_espresso_and_give_change() {
        let mut machine = machine();
        let input = format!("c\n1\n{}o\n", coins([0, 0, 0, 0, 0, 0, 2, 0]));
        let output = run_session(&mut machine, &input);

        assert_eq!(true, output.contains("The cost of Espresso is €1.50."));
        assert_eq!(true, output.contains("Change: €0.50"));
        assert_eq!(true, output.contains("Espresso is served!"));
        assert_eq!(
            vec![
                MachineState::Selecting,
                MachineState::PayingForDrink,
                MachineState::Validating,
                MachineState::Serving,
                MachineState::Idle,
            ],
            machine.last_purchase()
        );
        assert_eq!(Some(1950), machine.reservoir().level("water"));
        assert_eq!(Some(482), machine.reservoir().level("coffee"));
        assert_eq!(dec!(1.5), machine.ledger().money);
        assert_eq!(1, machine.ledger().served("espresso"));
        assert_eq!(MachineState::Idle, machine.state());
    }

    #[test]
    fn should_reject_a_cappuccino_without_enough_milk() {
        let (menu, mut reservoir) = default_machine();
        reservoir.add("milk", Container::with_level(1000, 50, "ml"));
        let mut machine = CoffeeMaker::new(menu, reservoir);
        let input = format!("c\n3\n{}o\n", coins([0, 0, 0, 0, 0, 0, 0, 2]));
        let output = run_session(&mut machine, &input);

        assert_eq!(true, output.contains("Change: €1.00"));
        assert_eq!(true, output.contains("Insufficient milk to serve Cappuccino."));
        assert_eq!(true, output.contains("The payment is not refunded."));
        assert_eq!(
            vec![
                MachineState::Selecting,
                MachineState::PayingForDrink,
                MachineState::Validating,
                MachineState::Rejected,
                MachineState::Idle,
            ],
            machine.last_purchase()
        );
        assert_eq!(Some(50), machine.reservoir().level("milk"));
        assert_eq!(Some(2000), machine.reservoir().level("water"));
        assert_eq!(0, machine.ledger().served("cappuccino"));
        assert_eq!(Decimal::ZERO, machine.ledger().money);
    }

    #[test]
    fn should_ask_for_more_coins_until_the_price_is_covered() {
        let mut machine = machine();
        let input = format!(
            "c\n2\n{}{}o\n",
            coins([0, 0, 0, 0, 0, 0, 0, 1]),
            coins([0, 0, 0, 0, 0, 1, 0, 0])
        );
        let output = run_session(&mut machine, &input);

        assert_eq!(true, output.contains("Insufficient funds. Inserted €2.00, missing €0.50."));
        assert_eq!(true, output.contains("Change: €0.00"));
        assert_eq!(1, machine.ledger().served("latte"));
        assert_eq!(dec!(2.5), machine.ledger().money);
    }

    #[test]
    fn should_restart_the_coin_prompts_after_an_invalid_count() {
        let mut machine = machine();
        let input = format!("c\n1\n0\nabc\n{}o\n", coins([0, 0, 0, 0, 0, 3, 0, 0]));
        let output = run_session(&mut machine, &input);

        assert_eq!(true, output.contains("Invalid input. Please try again."));
        assert_eq!(true, output.contains("Change: €0.00"));
        assert_eq!(1, machine.ledger().served("espresso"));
    }

    #[test]
    fn should_return_the_coins_when_the_payment_is_never_completed() {
        let mut machine = machine();
        let rounds = coins([0, 0, 0, 0, 0, 1, 0, 0]).repeat(MAX_PAYMENT_ROUNDS);
        let input = format!("c\n3\n{}o\n", rounds);
        let output = run_session(&mut machine, &input);

        assert_eq!(true, output.contains("Returning €2.50."));
        assert_eq!(true, output.contains("The payment was not completed. The order is cancelled."));
        assert_eq!(false, output.contains("Too many invalid answers"));
        assert_eq!(Some(2000), machine.reservoir().level("water"));
        assert_eq!(Decimal::ZERO, machine.ledger().money);
    }

    #[test]
    fn should_cancel_the_order_after_too_many_invalid_drinks() {
        let mut machine = machine();
        let input = format!("c\n{}o\n", "9\n".repeat(MAX_INPUT_ATTEMPTS));
        let output = run_session(&mut machine, &input);

        assert_eq!(true, output.contains("Invalid choice. Please try again."));
        assert_eq!(true, output.contains("Too many invalid answers. The order is cancelled."));
        assert_eq!(Decimal::ZERO, machine.ledger().money);
        assert_eq!(vec![MachineState::Selecting, MachineState::Idle], machine.last_purchase());
    }

    #[test]
    fn should_tell_apart_non_numeric_drink_choices() {
        let mut machine = machine();
        let input = format!("c\nlatte\n1\n{}o\n", coins([0, 0, 0, 0, 0, 0, 0, 1]));
        let output = run_session(&mut machine, &input);

        assert_eq!(true, output.contains("Invalid input. Please enter a valid number."));
        assert_eq!(1, machine.ledger().served("espresso"));
    }

    #[test]
    fn should_show_the_reservoir_without_changing_it() {
        let mut machine = machine();
        let output = run_session(&mut machine, "x\nR\no\n");

        assert_eq!(true, output.contains("Invalid input. Please, choose a valid option"));
        assert_eq!(
            true,
            output.contains("Reservoir Status: Water: 2000/2000 ml\nMilk: 1000/1000 ml")
        );
        assert_eq!(Some(2000), machine.reservoir().level("water"));
    }

    #[test]
    fn should_print_the_final_report_when_turned_off() {
        let mut machine = machine();
        let output = run_session(&mut machine, "o\n");

        assert_eq!(true, output.contains("Machine is turning off..."));
        assert_eq!(true, output.contains("===== MACHINE REPORT ====="));
        assert_eq!(true, output.contains("Money in machine: €0.00"));
        assert_eq!(true, output.contains("Cappuccino: 0"));
    }

    #[test]
    fn should_turn_off_when_the_input_ends_mid_purchase() {
        let mut machine = machine();
        let output = run_session(&mut machine, "c\n1\n0\n0\n");

        assert_eq!(true, output.contains("===== MACHINE REPORT ====="));
        assert_eq!(Decimal::ZERO, machine.ledger().money);
        assert_eq!(MachineState::Idle, machine.state());
    }

    #[test]
    fn should_return_the_coins_when_the_input_ends_during_payment() {
        let mut machine = machine();
        let input = format!("c\n3\n{}0\n", coins([0, 0, 0, 0, 0, 0, 1, 0]));
        let output = run_session(&mut machine, &input);

        assert_eq!(true, output.contains("missing €2.00"));
        assert_eq!(true, output.contains("Returning €1.00."));
        assert_eq!(true, output.contains("===== MACHINE REPORT ====="));
        assert_eq!(Decimal::ZERO, machine.ledger().money);
    }

    #[test]
    fn should_return_the_coins_after_too_many_invalid_counts_in_a_later_round() {
        let mut machine = machine();
        let input = format!(
            "c\n3\n{}{}o\n",
            coins([0, 0, 0, 0, 0, 0, 0, 1]),
            "x\n".repeat(MAX_INPUT_ATTEMPTS)
        );
        let output = run_session(&mut machine, &input);

        assert_eq!(true, output.contains("Returning €2.00."));
        assert_eq!(true, output.contains("Too many invalid answers. The order is cancelled."));
        assert_eq!(Some(2000), machine.reservoir().level("water"));
    }

    #[test]
    fn should_add_up_the_revenue_of_every_drink_served() {
        let mut machine = machine();
        let mut input = String::new();
        for drink in ["1", "2", "3", "1"] {
            input.push_str(&format!("c\n{}\n{}", drink, coins([0, 0, 0, 0, 0, 0, 0, 2])));
        }
        input.push_str("o\n");
        run_session(&mut machine, &input);

        assert_eq!(dec!(8.5), machine.ledger().money);
        assert_eq!(2, machine.ledger().served("espresso"));
        assert_eq!(Some(2000 - 50 - 200 - 250 - 50), machine.reservoir().level("water"));
    }
}
