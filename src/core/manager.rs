use crate::core::search::binary_search_by;
use crate::core::seed::SeedData;
use crate::core::sorted_list::SortedList;
use crate::domain::model::{Letter, Meal, MealId, Subscriber, SubscriberKey};
use crate::domain::ports::LetterSink;
use crate::utils::error::{MealError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub subscriber: String,
    pub meal: String,
    pub added: u32,
    pub now_held: u32,
    pub remaining_stock: u32,
    pub new_subscription: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub subscriber: String,
    pub meal: String,
    pub removed: u32,
    pub now_held: u32,
    pub remaining_stock: u32,
    pub subscription_closed: bool,
}

/// Application state: the seeded subscribers and meals plus the letter sink.
///
/// Every workflow call validates first and mutates last, so a failed call
/// leaves stock and subscriptions untouched. For any meal, stock plus the
/// quantities held by all subscribers stays equal to the seeded stock.
pub struct SubscriptionManager<S: LetterSink> {
    subscribers: SortedList<Subscriber>,
    meals: SortedList<Meal>,
    letters: S,
    organization: String,
    letters_written: usize,
}

impl<S: LetterSink> SubscriptionManager<S> {
    pub fn new(seed: SeedData, letters: S, organization: impl Into<String>) -> Self {
        Self {
            subscribers: seed.subscribers,
            meals: seed.meals,
            letters,
            organization: organization.into(),
            letters_written: 0,
        }
    }

    pub fn subscribers(&self) -> &SortedList<Subscriber> {
        &self.subscribers
    }

    pub fn meals(&self) -> &SortedList<Meal> {
        &self.meals
    }

    pub fn letters(&self) -> &S {
        &self.letters
    }

    pub fn letters_written(&self) -> usize {
        self.letters_written
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn subscriber(&self, key: &SubscriberKey) -> Result<&Subscriber> {
        let index = self.subscriber_index(key)?;
        Ok(&self.subscribers.as_slice()[index])
    }

    pub fn meal(&self, id: &MealId) -> Result<&Meal> {
        let index = self.meal_index(id)?;
        Ok(&self.meals.as_slice()[index])
    }

    /// Total quantity of a meal held across all subscribers.
    pub fn allocated(&self, id: &MealId) -> u32 {
        self.subscribers.iter().map(|s| s.quantity_of(id)).sum()
    }

    /// Checks that don't depend on a quantity: the meal is not sold out and
    /// the subscriber has room for it. A sold-out meal produces a letter.
    pub fn check_can_add(&mut self, key: &SubscriberKey, id: &MealId) -> Result<()> {
        let subscriber_index = self.subscriber_index(key)?;
        let meal_index = self.meal_index(id)?;
        self.check_stock_and_limit(subscriber_index, meal_index, 0)
    }

    /// Adds `requested` portions of a meal to a subscription, opening the
    /// subscription if needed. Adding zero is accepted and changes nothing.
    pub fn add_meals(&mut self, key: &SubscriberKey, id: &MealId, requested: i64) -> Result<AddOutcome> {
        let subscriber_index = self.subscriber_index(key)?;
        let meal_index = self.meal_index(id)?;
        self.check_stock_and_limit(subscriber_index, meal_index, requested)?;

        let available = self.meals.as_slice()[meal_index].available();
        if requested > i64::from(available) {
            let meal = self.meals.as_slice()[meal_index].name().to_string();
            tracing::warn!(
                "⚠️ Not enough {} for {}: requested {}, available {}",
                meal,
                key,
                requested,
                available
            );
            self.write_letter(subscriber_index, meal_index)?;
            return Err(MealError::InsufficientInventory {
                meal,
                requested,
                available,
            });
        }
        let quantity = u32::try_from(requested).map_err(|_| MealError::InvalidQuantity {
            value: requested,
            max: available,
        })?;

        let (meals, subscribers) = (&mut self.meals, &mut self.subscribers);
        let meal = meals
            .get_mut(meal_index)
            .ok_or_else(|| MealError::MealNotFound(id.to_string()))?;
        let subscriber = subscribers
            .get_mut(subscriber_index)
            .ok_or_else(|| MealError::SubscriberNotFound(key.to_string()))?;

        let new_subscription = quantity > 0 && subscriber.find_subscription(meal.id()).is_none();
        let now_held = if quantity > 0 {
            meal.take(quantity);
            subscriber.upsert_subscription(meal, quantity)
        } else {
            subscriber.quantity_of(meal.id())
        };

        tracing::info!(
            "✅ Added {} {} to {} (now holds {}, {} left)",
            quantity,
            meal.name(),
            subscriber.full_name(),
            now_held,
            meal.available()
        );

        Ok(AddOutcome {
            subscriber: subscriber.first_name().to_string(),
            meal: meal.name().to_string(),
            added: quantity,
            now_held,
            remaining_stock: meal.available(),
            new_subscription,
        })
    }

    /// Returns `quantity` portions of a held meal to stock. A subscription
    /// that reaches zero is removed. Removing zero is accepted and changes
    /// nothing.
    pub fn remove_meals(&mut self, key: &SubscriberKey, id: &MealId, quantity: i64) -> Result<RemoveOutcome> {
        let subscriber_index = self.subscriber_index(key)?;
        let meal_index = self.meal_index(id)?;

        let (meals, subscribers) = (&mut self.meals, &mut self.subscribers);
        let meal = meals
            .get_mut(meal_index)
            .ok_or_else(|| MealError::MealNotFound(id.to_string()))?;
        let subscriber = subscribers
            .get_mut(subscriber_index)
            .ok_or_else(|| MealError::SubscriberNotFound(key.to_string()))?;

        let held = match subscriber.find_subscription(meal.id()) {
            Some(subscription) => subscription.quantity(),
            None => {
                return Err(MealError::NotSubscribed {
                    subscriber: subscriber.first_name().to_string(),
                    meal: meal.name().to_string(),
                })
            }
        };
        if quantity < 0 {
            return Err(MealError::InvalidQuantity {
                value: quantity,
                max: held,
            });
        }
        if quantity > i64::from(held) {
            return Err(MealError::RemovalExceedsHeld {
                meal: meal.name().to_string(),
                requested: quantity,
                held,
            });
        }
        let quantity = u32::try_from(quantity).map_err(|_| MealError::InvalidQuantity {
            value: quantity,
            max: held,
        })?;

        let now_held = if quantity > 0 {
            meal.restock(quantity);
            subscriber.reduce_subscription(meal.id(), quantity).unwrap_or(0)
        } else {
            held
        };

        tracing::info!(
            "✅ Removed {} {} from {} (now holds {}, {} left)",
            quantity,
            meal.name(),
            subscriber.full_name(),
            now_held,
            meal.available()
        );

        Ok(RemoveOutcome {
            subscriber: subscriber.first_name().to_string(),
            meal: meal.name().to_string(),
            removed: quantity,
            now_held,
            remaining_stock: meal.available(),
            subscription_closed: now_held == 0,
        })
    }

    /// Flushes the letter sink and hands it back.
    pub fn shutdown(mut self) -> Result<S> {
        self.letters.flush()?;
        tracing::info!("📨 {} letter(s) written this session", self.letters_written);
        Ok(self.letters)
    }

    fn subscriber_index(&self, key: &SubscriberKey) -> Result<usize> {
        let found = binary_search_by(&self.subscribers, |s| s.key().cmp(key));
        tracing::debug!("Subscriber lookup '{}': {:?}", key, found);
        found.ok_or_else(|| MealError::SubscriberNotFound(key.to_string()))
    }

    fn meal_index(&self, id: &MealId) -> Result<usize> {
        let found = binary_search_by(&self.meals, |m| m.id().cmp(id));
        tracing::debug!("Meal lookup '{}': {:?}", id, found);
        found.ok_or_else(|| MealError::MealNotFound(id.to_string()))
    }

    fn check_stock_and_limit(&mut self, subscriber_index: usize, meal_index: usize, requested: i64) -> Result<()> {
        let meal = &self.meals.as_slice()[meal_index];
        let subscriber = &self.subscribers.as_slice()[subscriber_index];

        if meal.available() == 0 {
            let meal_name = meal.name().to_string();
            tracing::warn!("⚠️ No {} left for {}", meal_name, subscriber.full_name());
            self.write_letter(subscriber_index, meal_index)?;
            return Err(MealError::InsufficientInventory {
                meal: meal_name,
                requested,
                available: 0,
            });
        }

        if subscriber.is_at_limit_for(meal.id()) {
            tracing::warn!(
                "⚠️ {} already holds {} subscriptions, refusing {}",
                subscriber.full_name(),
                Subscriber::MAX_SUBSCRIPTIONS,
                meal.name()
            );
            return Err(MealError::SubscriptionLimitExceeded {
                subscriber: subscriber.first_name().to_string(),
                limit: Subscriber::MAX_SUBSCRIPTIONS,
            });
        }

        if requested < 0 {
            return Err(MealError::InvalidQuantity {
                value: requested,
                max: meal.available(),
            });
        }

        Ok(())
    }

    fn write_letter(&mut self, subscriber_index: usize, meal_index: usize) -> Result<()> {
        let letter = Letter::new(
            &self.subscribers.as_slice()[subscriber_index],
            &self.meals.as_slice()[meal_index],
            &self.organization,
        );
        self.letters.write_letter(&letter)?;
        self.letters_written += 1;
        tracing::info!("📨 Apology letter written to {} about {}", letter.recipient, letter.meal);
        Ok(())
    }
}
