pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{letters::FileLetterSink, toml_config::TomlConfig};
pub use crate::core::manager::{AddOutcome, RemoveOutcome, SubscriptionManager};
pub use crate::core::{seed::SeedData, sorted_list::SortedList};
pub use crate::domain::model::{Letter, Meal, MealId, Subscriber, SubscriberKey, Subscription};
pub use crate::domain::ports::{ConfigProvider, LetterSink};
pub use crate::utils::error::{MealError, Result};
