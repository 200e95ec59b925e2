use thiserror::Error;

#[derive(Error, Debug)]
pub enum MealError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Seed data error on line {line}: {message}")]
    SeedParseError { line: usize, message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Subscriber not found: {0}")]
    SubscriberNotFound(String),

    #[error("Meal not found: {0}")]
    MealNotFound(String),

    #[error("Invalid quantity {value}: expected a number between 0 - {max}")]
    InvalidQuantity { value: i64, max: u32 },

    #[error("There is not enough {meal} left to add {requested} to this subscription ({available} available)")]
    InsufficientInventory {
        meal: String,
        requested: i64,
        available: u32,
    },

    #[error("{subscriber} has reached the maximum number of meal subscriptions ({limit})")]
    SubscriptionLimitExceeded { subscriber: String, limit: usize },

    #[error("Cannot remove {requested} {meal}: only {held} held")]
    RemovalExceedsHeld {
        meal: String,
        requested: i64,
        held: u32,
    },

    #[error("{subscriber} is not subscribed to {meal}")]
    NotSubscribed { subscriber: String, meal: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Seed,
    Configuration,
    Lookup,
    Input,
    Inventory,
    Subscription,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MealError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MealError::IoError(_) => ErrorCategory::Io,
            MealError::SeedParseError { .. } => ErrorCategory::Seed,
            MealError::ConfigValidationError { .. }
            | MealError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            MealError::SubscriberNotFound(_) | MealError::MealNotFound(_) => ErrorCategory::Lookup,
            MealError::InvalidQuantity { .. } => ErrorCategory::Input,
            MealError::InsufficientInventory { .. } => ErrorCategory::Inventory,
            MealError::SubscriptionLimitExceeded { .. }
            | MealError::RemovalExceedsHeld { .. }
            | MealError::NotSubscribed { .. } => ErrorCategory::Subscription,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup | ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Inventory | ErrorCategory::Subscription => ErrorSeverity::Medium,
            ErrorCategory::Seed | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// Recoverable errors are handled by re-prompting inside the console.
    pub fn is_recoverable(&self) -> bool {
        self.severity() <= ErrorSeverity::Medium
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MealError::IoError(_) => {
                "Check that the seed and letters files are readable and writable".to_string()
            }
            MealError::SeedParseError { line, .. } => format!(
                "Fix line {} of the seed file: counts and quantities must be integers, subscribers need a first name and a surname",
                line
            ),
            MealError::ConfigValidationError { field, .. }
            | MealError::InvalidConfigValueError { field, .. } => {
                format!("Correct the '{}' setting and try again", field)
            }
            MealError::SubscriberNotFound(_) => {
                "Enter the subscriber's first name and surname separated by a space".to_string()
            }
            MealError::MealNotFound(_) => "Choose a meal from the meal list".to_string(),
            MealError::InvalidQuantity { max, .. } => {
                format!("Please enter a number between 0 - {}", max)
            }
            MealError::InsufficientInventory { available, .. } => {
                format!("Please enter a number between 0 - {}", available)
            }
            MealError::SubscriptionLimitExceeded { .. } => {
                "To delete one, remove all meals of that type".to_string()
            }
            MealError::RemovalExceedsHeld { held, .. } => {
                format!("Please enter a number between 0 - {}", held)
            }
            MealError::NotSubscribed { .. } => {
                "Choose one of the meals listed in the subscription".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MealError::IoError(e) => format!("A file could not be read or written: {}", e),
            MealError::SeedParseError { line, message } => {
                format!("The seed data is malformed (line {}): {}", line, message)
            }
            MealError::SubscriberNotFound(_) => "Subscriber not found!".to_string(),
            MealError::MealNotFound(_) => "Meal not found!".to_string(),
            MealError::InvalidQuantity { value, .. } if *value < 0 => {
                format!("{} is a negative number!", value)
            }
            MealError::RemovalExceedsHeld { .. } => {
                "You are trying to remove too many meals!".to_string()
            }
            MealError::SubscriptionLimitExceeded { subscriber, limit } => format!(
                "{} has reached the maximum number of meal subscriptions ({})!",
                subscriber, limit
            ),
            MealError::NotSubscribed { subscriber, meal } => {
                format!("{} is not subscribed to {}!", subscriber, meal)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MealError>;
