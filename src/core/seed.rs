use crate::core::sorted_list::SortedList;
use crate::domain::model::{Meal, Subscriber};
use crate::utils::error::{MealError, Result};
use std::path::Path;
use std::str::{FromStr, Lines};

/// Subscribers and meals read from the seed file, already sorted.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub subscribers: SortedList<Subscriber>,
    pub meals: SortedList<Meal>,
}

impl SeedData {
    /// 從檔案載入初始資料
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let seed: SeedData = content.parse()?;
        tracing::info!(
            "📥 Loaded {} subscribers and {} meals from {}",
            seed.subscribers.len(),
            seed.meals.len(),
            path.as_ref().display()
        );
        Ok(seed)
    }
}

impl FromStr for SeedData {
    type Err = MealError;

    /// Format:
    ///
    /// ```text
    /// <subscriber count>
    /// <first name> <surname>      (subscriber count times)
    /// <meal count>
    /// <meal name>
    /// <available quantity>       (meal count times)
    /// ```
    fn from_str(content: &str) -> Result<Self> {
        let mut reader = SeedReader::new(content);
        let mut seed = SeedData::default();

        let subscriber_count: usize = reader.next_number("subscriber count")?;
        for _ in 0..subscriber_count {
            let (line, text) = reader.next_line("subscriber name")?;
            let mut names = text.split_whitespace();
            let subscriber = match (names.next(), names.next(), names.next()) {
                (Some(first), Some(surname), None) => Subscriber::new(first, surname),
                _ => {
                    return Err(MealError::SeedParseError {
                        line,
                        message: format!("expected '<first name> <surname>', found '{}'", text),
                    })
                }
            };
            if seed.subscribers.iter().any(|s| s == &subscriber) {
                return Err(MealError::SeedParseError {
                    line,
                    message: format!("duplicate subscriber '{}'", subscriber.full_name()),
                });
            }
            seed.subscribers.insert(subscriber);
        }

        let meal_count: usize = reader.next_number("meal count")?;
        for _ in 0..meal_count {
            let (line, name) = reader.next_line("meal name")?;
            if name.is_empty() {
                return Err(MealError::SeedParseError {
                    line,
                    message: "meal name cannot be empty".to_string(),
                });
            }
            let available: u32 = reader.next_number("available quantity")?;
            let meal = Meal::new(name, available);
            if seed.meals.iter().any(|m| m == &meal) {
                return Err(MealError::SeedParseError {
                    line,
                    message: format!("duplicate meal '{}'", name),
                });
            }
            seed.meals.insert(meal);
        }

        tracing::debug!(
            "Parsed seed data: {} subscribers, {} meals",
            seed.subscribers.len(),
            seed.meals.len()
        );
        Ok(seed)
    }
}

struct SeedReader<'a> {
    lines: Lines<'a>,
    line_number: usize,
}

impl<'a> SeedReader<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            lines: content.lines(),
            line_number: 0,
        }
    }

    fn next_line(&mut self, what: &str) -> Result<(usize, &'a str)> {
        self.line_number += 1;
        match self.lines.next() {
            Some(text) => Ok((self.line_number, text.trim())),
            None => Err(MealError::SeedParseError {
                line: self.line_number,
                message: format!("unexpected end of data, expected {}", what),
            }),
        }
    }

    fn next_number<N: FromStr>(&mut self, what: &str) -> Result<N> {
        let (line, text) = self.next_line(what)?;
        text.parse().map_err(|_| MealError::SeedParseError {
            line,
            message: format!("expected {} as a non-negative integer, found '{}'", what, text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SEED: &str = "3\nAnn Lee\nBo Kim\nCy Adams\n2\nSoup\n0\nPizza\n2\n";

    #[test]
    fn test_parse_seed_sorts_entities() {
        let seed: SeedData = SEED.parse().unwrap();

        let names: Vec<String> = seed.subscribers.iter().map(Subscriber::full_name).collect();
        assert_eq!(names, vec!["Cy Adams", "Bo Kim", "Ann Lee"]);

        let meals: Vec<(&str, u32)> = seed.meals.iter().map(|m| (m.name(), m.available())).collect();
        assert_eq!(meals, vec![("Pizza", 2), ("Soup", 0)]);
    }

    #[test]
    fn test_parse_tolerates_crlf_and_trailing_spaces() {
        let seed: SeedData = "1\r\nAnn Lee \r\n1\r\nChilli Con Carne\r\n 5\r\n".parse().unwrap();
        assert_eq!(seed.subscribers.len(), 1);
        assert_eq!(seed.meals.get(0).unwrap().name(), "Chilli Con Carne");
        assert_eq!(seed.meals.get(0).unwrap().available(), 5);
    }

    #[test]
    fn test_parse_rejects_bad_count() {
        let err = "two\nAnn Lee\n".parse::<SeedData>().unwrap_err();
        assert!(matches!(err, MealError::SeedParseError { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_single_name() {
        let err = "1\nAnn\n0\n".parse::<SeedData>().unwrap_err();
        assert!(matches!(err, MealError::SeedParseError { line: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_negative_quantity() {
        let err = "0\n1\nSoup\n-4\n".parse::<SeedData>().unwrap_err();
        assert!(matches!(err, MealError::SeedParseError { line: 4, .. }));
    }

    #[test]
    fn test_parse_rejects_truncated_data() {
        let err = "2\nAnn Lee\n".parse::<SeedData>().unwrap_err();
        assert!(matches!(err, MealError::SeedParseError { line: 3, .. }));
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        let err = "2\nAnn Lee\nann LEE\n0\n".parse::<SeedData>().unwrap_err();
        assert!(matches!(err, MealError::SeedParseError { line: 3, .. }));

        let err = "0\n2\nSoup\n1\nsoup\n2\n".parse::<SeedData>().unwrap_err();
        assert!(matches!(err, MealError::SeedParseError { line: 5, .. }));
    }

    #[test]
    fn test_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(SEED.as_bytes()).unwrap();

        let seed = SeedData::from_file(temp_file.path()).unwrap();
        assert_eq!(seed.subscribers.len(), 3);
        assert_eq!(seed.meals.len(), 2);
    }

    #[test]
    fn test_from_missing_file() {
        let err = SeedData::from_file("/definitely/not/here/input_data.txt").unwrap_err();
        assert!(matches!(err, MealError::IoError(_)));
    }
}
