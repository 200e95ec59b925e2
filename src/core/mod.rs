pub mod manager;
pub mod search;
pub mod seed;
pub mod sorted_list;

pub use crate::domain::model::{Letter, Meal, MealId, Subscriber, SubscriberKey, Subscription};
pub use crate::domain::ports::{ConfigProvider, LetterSink};
pub use crate::utils::error::Result;
