use std::cmp::Ordering;
use std::fmt;

/// Case-insensitive identity of a meal. Subscriptions refer to meals through
/// this key so the catalogue stays the single owner of stock levels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MealId(String);

impl MealId {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalogue item with a bounded number of portions left.
///
/// Ordering and equality only look at the lowercase name, so a probe built
/// with [`Meal::probe`] compares equal to the stocked meal it names.
#[derive(Debug, Clone)]
pub struct Meal {
    id: MealId,
    name: String,
    available: u32,
}

impl Meal {
    pub fn new(name: impl Into<String>, available: u32) -> Self {
        let name = name.into();
        Self {
            id: MealId::new(&name),
            name,
            available,
        }
    }

    pub fn probe(name: &str) -> Self {
        Self::new(name, 0)
    }

    pub fn id(&self) -> &MealId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn available(&self) -> u32 {
        self.available
    }

    pub(crate) fn take(&mut self, quantity: u32) {
        self.available -= quantity;
    }

    pub(crate) fn restock(&mut self, quantity: u32) {
        self.available += quantity;
    }
}

impl PartialEq for Meal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Meal {}

impl PartialOrd for Meal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Meal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} available", self.name, self.available)
    }
}

/// Sort key for subscribers: lowercase surname first, then lowercase first name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberKey {
    surname: String,
    first_name: String,
}

impl SubscriberKey {
    pub fn new(first_name: &str, surname: &str) -> Self {
        Self {
            surname: surname.trim().to_lowercase(),
            first_name: first_name.trim().to_lowercase(),
        }
    }

    /// Parses "First Surname". Anything other than exactly two names is rejected.
    pub fn parse_full_name(input: &str) -> Option<Self> {
        let mut parts = input.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(first), Some(surname), None) => Some(Self::new(first, surname)),
            _ => None,
        }
    }
}

impl fmt::Display for SubscriberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.surname)
    }
}

/// One meal held by a subscriber. Quantity is never zero once the
/// subscription has been stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    meal: MealId,
    meal_name: String,
    quantity: u32,
}

impl Subscription {
    pub fn new(meal: &Meal, quantity: u32) -> Self {
        Self {
            meal: meal.id().clone(),
            meal_name: meal.name().to_string(),
            quantity,
        }
    }

    pub fn meal(&self) -> &MealId {
        &self.meal
    }

    pub fn meal_name(&self) -> &str {
        &self.meal_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<20}{}", self.meal_name, self.quantity)
    }
}

#[derive(Debug, Clone)]
pub struct Subscriber {
    key: SubscriberKey,
    first_name: String,
    surname: String,
    subscriptions: Vec<Subscription>,
}

impl Subscriber {
    pub const MAX_SUBSCRIPTIONS: usize = 3;

    pub fn new(first_name: impl Into<String>, surname: impl Into<String>) -> Self {
        let first_name = first_name.into();
        let surname = surname.into();
        Self {
            key: SubscriberKey::new(&first_name, &surname),
            first_name,
            surname,
            subscriptions: Vec::new(),
        }
    }

    pub fn key(&self) -> &SubscriberKey {
        &self.key
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.surname)
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn find_subscription(&self, meal: &MealId) -> Option<&Subscription> {
        self.subscriptions.iter().find(|s| &s.meal == meal)
    }

    pub fn quantity_of(&self, meal: &MealId) -> u32 {
        self.find_subscription(meal).map_or(0, Subscription::quantity)
    }

    /// True when a new meal would push the subscriber past the cap.
    pub fn is_at_limit_for(&self, meal: &MealId) -> bool {
        self.subscriptions.len() >= Self::MAX_SUBSCRIPTIONS && self.find_subscription(meal).is_none()
    }

    /// Adds to an existing subscription or opens a new one. The caller checks
    /// the subscription cap first. Returns the quantity now held.
    pub(crate) fn upsert_subscription(&mut self, meal: &Meal, quantity: u32) -> u32 {
        if let Some(existing) = self.subscriptions.iter_mut().find(|s| &s.meal == meal.id()) {
            existing.quantity += quantity;
            return existing.quantity;
        }
        self.subscriptions.push(Subscription::new(meal, quantity));
        quantity
    }

    /// Removes `quantity` portions, dropping the subscription when it hits
    /// zero. Returns the quantity still held, or None if the meal is not held.
    pub(crate) fn reduce_subscription(&mut self, meal: &MealId, quantity: u32) -> Option<u32> {
        let index = self.subscriptions.iter().position(|s| &s.meal == meal)?;
        let subscription = &mut self.subscriptions[index];
        subscription.quantity = subscription.quantity.saturating_sub(quantity);
        let remaining = subscription.quantity;
        if remaining == 0 {
            self.subscriptions.remove(index);
        }
        Some(remaining)
    }
}

impl PartialEq for Subscriber {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Subscriber {}

impl PartialOrd for Subscriber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Subscriber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.full_name())?;
        if self.subscriptions.is_empty() {
            return write!(f, "No meals!");
        }
        let lines: Vec<String> = self.subscriptions.iter().map(ToString::to_string).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

/// Apology letter written when a request cannot be met from stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    pub recipient: String,
    pub meal: String,
    pub organization: String,
}

impl Letter {
    pub fn new(subscriber: &Subscriber, meal: &Meal, organization: &str) -> Self {
        Self {
            recipient: subscriber.full_name(),
            meal: meal.name().to_string(),
            organization: organization.to_string(),
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dear {},", self.recipient)?;
        writeln!(f)?;
        writeln!(
            f,
            "We regret to inform you that there was not enough {} left to fulfil your culinary cravings.",
            self.meal
        )?;
        writeln!(f, "Please accept our sincerest apologies at this most troubling of times.")?;
        writeln!(f)?;
        writeln!(f, "Yours gastronomically,")?;
        writeln!(f, "{}", self.organization)?;
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_identity_ignores_case_and_stock() {
        let stocked = Meal::new("Pizza", 7);
        assert_eq!(stocked, Meal::probe("pIZZA"));
        assert_eq!(stocked.id().as_str(), "pizza");
        assert!(Meal::new("apple pie", 1) < Meal::new("Banana Bread", 1));
    }

    #[test]
    fn test_subscriber_orders_by_surname_then_first_name() {
        let lee_ann = Subscriber::new("Ann", "Lee");
        let kim_bo = Subscriber::new("Bo", "Kim");
        let lee_al = Subscriber::new("al", "LEE");

        assert!(kim_bo < lee_ann);
        assert!(lee_al < lee_ann);
        assert_eq!(lee_ann, Subscriber::new("ANN", "lee"));
    }

    #[test]
    fn test_parse_full_name() {
        assert_eq!(
            SubscriberKey::parse_full_name("  ann   LEE "),
            Some(SubscriberKey::new("Ann", "Lee"))
        );
        assert_eq!(SubscriberKey::parse_full_name("Ann"), None);
        assert_eq!(SubscriberKey::parse_full_name("Ann Marie Lee"), None);
    }

    #[test]
    fn test_upsert_and_reduce_subscription() {
        let pizza = Meal::new("Pizza", 10);
        let mut ann = Subscriber::new("Ann", "Lee");

        assert_eq!(ann.upsert_subscription(&pizza, 2), 2);
        assert_eq!(ann.upsert_subscription(&pizza, 3), 5);
        assert_eq!(ann.subscriptions().len(), 1);

        assert_eq!(ann.reduce_subscription(pizza.id(), 4), Some(1));
        assert_eq!(ann.reduce_subscription(pizza.id(), 1), Some(0));
        assert!(ann.subscriptions().is_empty());
        assert_eq!(ann.reduce_subscription(pizza.id(), 1), None);
    }

    #[test]
    fn test_limit_only_applies_to_new_meals() {
        let mut ann = Subscriber::new("Ann", "Lee");
        for name in ["Pizza", "Soup", "Curry"] {
            ann.upsert_subscription(&Meal::new(name, 5), 1);
        }

        assert!(ann.is_at_limit_for(Meal::probe("Pie").id()));
        assert!(!ann.is_at_limit_for(Meal::probe("soup").id()));
    }

    #[test]
    fn test_display_formats() {
        let pizza = Meal::new("Pizza", 2);
        let mut ann = Subscriber::new("Ann", "Lee");
        assert_eq!(ann.to_string(), "Ann Lee:\nNo meals!");

        ann.upsert_subscription(&pizza, 2);
        assert_eq!(ann.to_string(), format!("Ann Lee:\nPizza{}2", " ".repeat(15)));
        assert_eq!(pizza.to_string(), "Pizza: 2 available");
    }

    #[test]
    fn test_letter_layout() {
        let letter = Letter::new(
            &Subscriber::new("Bo", "Kim"),
            &Meal::new("Soup", 0),
            "Fred's Frozen Food Factory",
        );

        let expected = "Dear Bo Kim,\n\
\n\
We regret to inform you that there was not enough Soup left to fulfil your culinary cravings.\n\
Please accept our sincerest apologies at this most troubling of times.\n\
\n\
Yours gastronomically,\n\
Fred's Frozen Food Factory\n\
\n";
        assert_eq!(letter.to_string(), expected);
    }
}
