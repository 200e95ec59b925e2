use crate::core::manager::SubscriptionManager;
use crate::core::{LetterSink, MealId, SubscriberKey};
use crate::utils::error::{MealError, Result};
use rand::seq::SliceRandom;
use std::io::{BufRead, Write};

const GREETINGS: [&str; 5] = [
    "Hello there!",
    "Howdy, partner!",
    "Aloha!",
    "Ahoy there, Captain!",
    "Greetings, fellow sentient being!",
];

// ASCII art by Riitta Rasimus
const BANNER: &str = r#"                 (
                  )
             __..---..__
         ,-='  /  |  \  `=-.
        :--..___________..--;
         \.,_____________,./"#;

enum Lookup<T> {
    Found(T),
    Missed,
    Eof,
}

/// Menu-driven front end over a [`SubscriptionManager`].
///
/// Reads commands from any `BufRead` and writes the transcript to any
/// `Write`. End of input behaves like the finish command.
pub struct Console<'a, S, R, W>
where
    S: LetterSink,
    R: BufRead,
    W: Write,
{
    manager: &'a mut SubscriptionManager<S>,
    input: R,
    output: W,
    reminder_after: u32,
    show_greeting: bool,
}

impl<'a, S, R, W> Console<'a, S, R, W>
where
    S: LetterSink,
    R: BufRead,
    W: Write,
{
    pub fn new(manager: &'a mut SubscriptionManager<S>, input: R, output: W) -> Self {
        Self {
            manager,
            input,
            output,
            reminder_after: 2,
            show_greeting: true,
        }
    }

    pub fn with_reminder_after(mut self, reminder_after: u32) -> Self {
        self.reminder_after = reminder_after.max(1);
        self
    }

    pub fn with_greeting(mut self, show_greeting: bool) -> Self {
        self.show_greeting = show_greeting;
        self
    }

    pub fn run(&mut self) -> Result<()> {
        self.print_welcome()?;

        loop {
            self.print_menu()?;
            let Some(response) = self.read_line()? else {
                self.finish()?;
                break;
            };

            match response.trim() {
                "f" => {
                    self.finish()?;
                    break;
                }
                "m" => {
                    self.display_meals()?;
                    self.next_option()?;
                }
                "s" => {
                    self.display_subscribers()?;
                    self.next_option()?;
                }
                "a" => {
                    self.add_meals()?;
                    self.next_option()?;
                }
                "r" => {
                    self.remove_meals()?;
                    self.next_option()?;
                }
                other => {
                    tracing::debug!("Unknown menu command: {:?}", other);
                    writeln!(self.output)?;
                    writeln!(
                        self.output,
                        "'{}' is not valid. Please enter either m,s,a,r, or f",
                        other
                    )?;
                    writeln!(self.output)?;
                }
            }
        }

        self.output.flush()?;
        Ok(())
    }

    fn print_welcome(&mut self) -> Result<()> {
        writeln!(self.output)?;
        if self.show_greeting {
            let greeting = GREETINGS
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or(GREETINGS[0]);
            writeln!(self.output, "{}", greeting)?;
        }
        writeln!(self.output, "Welcome to {}!", self.manager.organization())?;
        writeln!(self.output)?;
        writeln!(self.output, "{}", BANNER)?;
        writeln!(self.output)?;
        writeln!(
            self.output,
            "Please select an option from the menu below by entering a letter:"
        )?;
        writeln!(self.output)?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "m - Display information about all the meals")?;
        writeln!(self.output, "s - Display information about all the subscribers")?;
        writeln!(self.output, "a - Add meals to a subscription")?;
        writeln!(self.output, "r - Remove meals from a subscription")?;
        writeln!(self.output, "f - Finish the program")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Bye for now!")?;
        Ok(())
    }

    fn next_option(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "---------------------------------------------")?;
        writeln!(self.output, "Please select another option: ")?;
        writeln!(self.output)?;
        Ok(())
    }

    fn display_meals(&mut self) -> Result<()> {
        writeln!(self.output)?;
        for meal in self.manager.meals() {
            writeln!(self.output, "{:<20}{}", meal.name(), meal.available())?;
        }
        Ok(())
    }

    fn display_subscribers(&mut self) -> Result<()> {
        writeln!(self.output)?;
        for subscriber in self.manager.subscribers() {
            writeln!(self.output, "{}", subscriber)?;
            writeln!(self.output)?;
        }
        Ok(())
    }

    fn add_meals(&mut self) -> Result<()> {
        let Some(key) = self.choose_subscriber()? else {
            return Ok(());
        };
        self.show_subscriber(&key)?;

        let Some(meal_id) = self.choose_meal()? else {
            return Ok(());
        };

        match self.manager.check_can_add(&key, &meal_id) {
            Ok(()) => {}
            Err(MealError::InsufficientInventory { meal, .. }) => {
                writeln!(self.output)?;
                writeln!(self.output, "No {} left!", meal)?;
                return Ok(());
            }
            Err(e @ MealError::SubscriptionLimitExceeded { .. }) => {
                writeln!(self.output)?;
                writeln!(self.output, "{}", e.user_friendly_message())?;
                writeln!(self.output, "{}", e.recovery_suggestion())?;
                return Ok(());
            }
            Err(e) => return Err(e),
        }

        let (meal_line, meal_name) = {
            let meal = self.manager.meal(&meal_id)?;
            (meal.to_string(), meal.name().to_string())
        };
        let first_name = self.manager.subscriber(&key)?.first_name().to_string();

        writeln!(self.output)?;
        writeln!(self.output, "{}", meal_line)?;
        writeln!(self.output)?;
        writeln!(
            self.output,
            "How many {} would {} like to add?",
            meal_name, first_name
        )?;

        loop {
            let Some(quantity) = self.read_quantity()? else {
                return Ok(());
            };

            match self.manager.add_meals(&key, &meal_id, quantity) {
                Ok(outcome) => {
                    writeln!(self.output)?;
                    writeln!(
                        self.output,
                        "{} {} successfully added to {}'s subscription!",
                        outcome.added, outcome.meal, outcome.subscriber
                    )?;
                    return Ok(());
                }
                Err(e @ MealError::InsufficientInventory { .. }) => {
                    writeln!(self.output, "{}", e)?;
                    writeln!(self.output, "{}", e.recovery_suggestion())?;
                }
                Err(e @ MealError::InvalidQuantity { .. }) => {
                    writeln!(self.output, "{}", e.user_friendly_message())?;
                    writeln!(self.output, "{}", e.recovery_suggestion())?;
                }
                Err(e) => return Err(e),
            }
            writeln!(self.output)?;
        }
    }

    fn remove_meals(&mut self) -> Result<()> {
        let Some(key) = self.choose_subscriber()? else {
            return Ok(());
        };

        let (first_name, has_subscriptions) = {
            let subscriber = self.manager.subscriber(&key)?;
            (
                subscriber.first_name().to_string(),
                !subscriber.subscriptions().is_empty(),
            )
        };

        writeln!(self.output)?;
        if !has_subscriptions {
            writeln!(
                self.output,
                "{} has no subscriptions to remove from!",
                first_name
            )?;
            return Ok(());
        }
        self.show_subscriber_info(&key)?;

        let (meal_id, subscription_line, meal_name) = loop {
            let Some(meal_id) = self.choose_meal()? else {
                return Ok(());
            };

            let subscriber = self.manager.subscriber(&key)?;
            if let Some(subscription) = subscriber.find_subscription(&meal_id) {
                let line = subscription.to_string();
                let name = subscription.meal_name().to_string();
                break (meal_id, line, name);
            }

            let not_subscribed = MealError::NotSubscribed {
                subscriber: first_name.clone(),
                meal: self.manager.meal(&meal_id)?.name().to_string(),
            };
            writeln!(self.output)?;
            writeln!(self.output, "{}", not_subscribed.user_friendly_message())?;
        };

        writeln!(self.output)?;
        writeln!(self.output, "{}", subscription_line)?;
        writeln!(self.output)?;
        writeln!(
            self.output,
            "How many {} would {} like to remove?",
            meal_name, first_name
        )?;

        loop {
            let Some(quantity) = self.read_quantity()? else {
                return Ok(());
            };

            match self.manager.remove_meals(&key, &meal_id, quantity) {
                Ok(outcome) => {
                    writeln!(self.output)?;
                    writeln!(self.output)?;
                    if outcome.subscription_closed {
                        writeln!(
                            self.output,
                            "Subscription successfully removed from {}'s account!",
                            outcome.subscriber
                        )?;
                    } else {
                        writeln!(
                            self.output,
                            "{} {} successfully removed from {}'s subscription!",
                            outcome.removed, outcome.meal, outcome.subscriber
                        )?;
                    }
                    return Ok(());
                }
                Err(e @ (MealError::RemovalExceedsHeld { .. } | MealError::InvalidQuantity { .. })) => {
                    writeln!(self.output)?;
                    writeln!(self.output, "{}", e.user_friendly_message())?;
                    writeln!(self.output, "{}", e.recovery_suggestion())?;
                }
                Err(e) => return Err(e),
            }
            writeln!(self.output)?;
        }
    }

    /// Prompts until a known subscriber is entered. After `reminder_after`
    /// misses the valid subscribers are listed.
    fn choose_subscriber(&mut self) -> Result<Option<SubscriberKey>> {
        let mut misses = 0;
        loop {
            writeln!(self.output)?;
            match self.prompt_subscriber()? {
                Lookup::Found(key) => return Ok(Some(key)),
                Lookup::Eof => return Ok(None),
                Lookup::Missed => {
                    misses += 1;
                    writeln!(self.output)?;
                    writeln!(self.output, "Subscriber not found!")?;
                    if misses >= self.reminder_after {
                        writeln!(self.output)?;
                        writeln!(self.output, "Reminder - here is a list of valid subscribers:")?;
                        self.display_subscribers()?;
                    }
                }
            }
        }
    }

    fn choose_meal(&mut self) -> Result<Option<MealId>> {
        let mut misses = 0;
        loop {
            writeln!(self.output)?;
            match self.prompt_meal()? {
                Lookup::Found(id) => return Ok(Some(id)),
                Lookup::Eof => return Ok(None),
                Lookup::Missed => {
                    misses += 1;
                    writeln!(self.output)?;
                    writeln!(self.output, "Meal not found!")?;
                    if misses >= self.reminder_after {
                        writeln!(self.output)?;
                        writeln!(self.output, "Reminder - here is a list of valid meals:")?;
                        self.display_meals()?;
                    }
                }
            }
        }
    }

    fn prompt_subscriber(&mut self) -> Result<Lookup<SubscriberKey>> {
        writeln!(
            self.output,
            "Please select a subscriber by entering their full name:"
        )?;
        let Some(input) = self.read_line()? else {
            return Ok(Lookup::Eof);
        };

        let Some(key) = SubscriberKey::parse_full_name(&input) else {
            return Ok(Lookup::Missed);
        };
        match self.manager.subscriber(&key) {
            Ok(subscriber) => Ok(Lookup::Found(subscriber.key().clone())),
            Err(MealError::SubscriberNotFound(_)) => Ok(Lookup::Missed),
            Err(e) => Err(e),
        }
    }

    fn prompt_meal(&mut self) -> Result<Lookup<MealId>> {
        writeln!(self.output, "Please select a meal by entering its name:")?;
        let Some(input) = self.read_line()? else {
            return Ok(Lookup::Eof);
        };

        match self.manager.meal(&MealId::new(&input)) {
            Ok(meal) => Ok(Lookup::Found(meal.id().clone())),
            Err(MealError::MealNotFound(_)) => Ok(Lookup::Missed),
            Err(e) => Err(e),
        }
    }

    /// Reads lines until one parses as an integer. Range checks are left to
    /// the manager.
    fn read_quantity(&mut self) -> Result<Option<i64>> {
        loop {
            let Some(input) = self.read_line()? else {
                return Ok(None);
            };
            match input.trim().parse::<i64>() {
                Ok(quantity) => return Ok(Some(quantity)),
                Err(_) => {
                    writeln!(self.output)?;
                    writeln!(self.output, "Invalid format, please enter an integer:")?;
                }
            }
        }
    }

    fn show_subscriber(&mut self, key: &SubscriberKey) -> Result<()> {
        writeln!(self.output)?;
        self.show_subscriber_info(key)
    }

    fn show_subscriber_info(&mut self, key: &SubscriberKey) -> Result<()> {
        let info = self.manager.subscriber(key)?.to_string();
        writeln!(self.output, "{}", info)?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(|c| c == '\r' || c == '\n').to_string()))
    }
}
