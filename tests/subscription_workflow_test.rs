use anyhow::Result;
use meal_subscriptions::{
    FileLetterSink, MealError, MealId, SeedData, Subscriber, SubscriberKey, SubscriptionManager,
};
use std::fs;
use tempfile::TempDir;

const SEED: &str = "2\nAnn Lee\nBo Kim\n2\nPizza\n2\nSoup\n0\n";

fn manager_in(temp_dir: &TempDir, seed: &str) -> Result<SubscriptionManager<FileLetterSink>> {
    let seed_path = temp_dir.path().join("input_data.txt");
    fs::write(&seed_path, seed)?;

    let seed = SeedData::from_file(&seed_path)?;
    let letters = FileLetterSink::open(temp_dir.path().join("letters.txt"), false)?;
    Ok(SubscriptionManager::new(seed, letters, "Fred's Frozen Food Factory"))
}

/// 完整情境：加入、缺貨寫信、移除
#[test]
fn test_pizza_and_soup_scenario() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut manager = manager_in(&temp_dir, SEED)?;
    let ann = SubscriberKey::new("Ann", "Lee");
    let bo = SubscriberKey::new("Bo", "Kim");
    let pizza = MealId::new("Pizza");
    let soup = MealId::new("Soup");

    manager.add_meals(&ann, &pizza, 2)?;
    assert_eq!(manager.subscriber(&ann)?.quantity_of(&pizza), 2);
    assert_eq!(manager.meal(&pizza)?.available(), 0);

    let err = manager.add_meals(&bo, &soup, 1).unwrap_err();
    assert!(matches!(err, MealError::InsufficientInventory { .. }));
    assert!(manager.subscriber(&bo)?.subscriptions().is_empty());

    let outcome = manager.remove_meals(&ann, &pizza, 2)?;
    assert!(outcome.subscription_closed);
    assert!(manager.subscriber(&ann)?.subscriptions().is_empty());
    assert_eq!(manager.meal(&pizza)?.available(), 2);

    let letters = manager.shutdown()?;
    let content = fs::read_to_string(letters.path())?;
    assert_eq!(content.matches("Dear ").count(), 1);
    assert!(content.starts_with("Dear Bo Kim,\n\nWe regret to inform you that there was not enough Soup left"));
    assert!(content.ends_with("Yours gastronomically,\nFred's Frozen Food Factory\n\n"));

    Ok(())
}

#[test]
fn test_fourth_meal_is_refused_but_existing_meal_grows() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut manager = manager_in(
        &temp_dir,
        "1\nAnn Lee\n4\nPizza\n5\nSoup\n5\nCurry\n5\nPie\n5\n",
    )?;
    let ann = SubscriberKey::new("ann", "lee");

    for meal in ["Pizza", "Soup", "Curry"] {
        manager.add_meals(&ann, &MealId::new(meal), 1)?;
    }

    let pie = MealId::new("Pie");
    let err = manager.add_meals(&ann, &pie, 1).unwrap_err();
    assert!(matches!(err, MealError::SubscriptionLimitExceeded { .. }));
    assert_eq!(manager.meal(&pie)?.available(), 5);
    assert_eq!(manager.subscriber(&ann)?.subscriptions().len(), Subscriber::MAX_SUBSCRIPTIONS);
    assert_eq!(manager.letters_written(), 0);

    let outcome = manager.add_meals(&ann, &MealId::new("CURRY"), 4)?;
    assert_eq!(outcome.now_held, 5);
    assert_eq!(outcome.remaining_stock, 0);

    Ok(())
}

#[test]
fn test_stock_conservation_over_many_operations() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut manager = manager_in(
        &temp_dir,
        "3\nAnn Lee\nBo Kim\nCy Ng\n3\nPizza\n6\nSoup\n4\nCurry\n1\n",
    )?;

    let people = [
        SubscriberKey::new("Ann", "Lee"),
        SubscriberKey::new("Bo", "Kim"),
        SubscriberKey::new("Cy", "Ng"),
    ];
    let meals = [
        (MealId::new("Pizza"), 6),
        (MealId::new("Soup"), 4),
        (MealId::new("Curry"), 1),
    ];

    for step in 0..90usize {
        let who = &people[step % 3];
        let (meal, _) = &meals[(step / 3) % 3];
        let amount = (step % 5) as i64 - 1;

        let _ = if step % 4 == 3 {
            manager.remove_meals(who, meal, amount).map(|_| ())
        } else {
            manager.add_meals(who, meal, amount).map(|_| ())
        };

        for (id, seeded) in &meals {
            assert_eq!(manager.meal(id)?.available() + manager.allocated(id), *seeded);
        }
        for subscriber in manager.subscribers() {
            assert!(subscriber.subscriptions().len() <= Subscriber::MAX_SUBSCRIPTIONS);
            assert!(subscriber.subscriptions().iter().all(|s| s.quantity() > 0));
        }
    }

    Ok(())
}

#[test]
fn test_malformed_seed_is_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let seed_path = temp_dir.path().join("input_data.txt");
    fs::write(&seed_path, "2\nAnn Lee\nBo Kim\n1\nPizza\nlots\n")?;

    let err = SeedData::from_file(&seed_path).unwrap_err();
    assert!(matches!(err, MealError::SeedParseError { line: 6, .. }));
    assert!(!err.is_recoverable());

    Ok(())
}
