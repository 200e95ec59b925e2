use crate::core::ConfigProvider;
use crate::utils::error::{MealError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ORGANIZATION: &str = "Fred's Frozen Food Factory";
pub const DEFAULT_REMINDER_AFTER: u32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub seed: SeedConfig,
    pub letters: LettersConfig,
    pub console: Option<ConsoleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LettersConfig {
    pub path: String,
    pub append: Option<bool>,
    pub organization: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub reminder_after: Option<u32>,
    pub greeting: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MealError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MealError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SEED_FILE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MealError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("seed.path", &self.seed.path)?;
        validate_path("letters.path", &self.letters.path)?;

        if let Some(organization) = &self.letters.organization {
            validate_non_empty_string("letters.organization", organization)?;
        }

        validate_range("console.reminder_after", self.reminder_after(), 1, 10)?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn seed_path(&self) -> &str {
        &self.seed.path
    }

    fn letters_path(&self) -> &str {
        &self.letters.path
    }

    fn append_letters(&self) -> bool {
        self.letters.append.unwrap_or(false)
    }

    fn organization(&self) -> &str {
        self.letters
            .organization
            .as_deref()
            .unwrap_or(DEFAULT_ORGANIZATION)
    }

    fn reminder_after(&self) -> u32 {
        self.console
            .as_ref()
            .and_then(|c| c.reminder_after)
            .unwrap_or(DEFAULT_REMINDER_AFTER)
    }

    fn show_greeting(&self) -> bool {
        self.console
            .as_ref()
            .and_then(|c| c.greeting)
            .unwrap_or(true)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let toml_content = r#"
[seed]
path = "input_data.txt"

[letters]
path = "letters.txt"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.seed_path(), "input_data.txt");
        assert_eq!(config.letters_path(), "letters.txt");
        assert!(!config.append_letters());
        assert_eq!(config.organization(), DEFAULT_ORGANIZATION);
        assert_eq!(config.reminder_after(), 2);
        assert!(config.show_greeting());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[seed]
path = "data/seed.txt"

[letters]
path = "out/letters.txt"
append = true
organization = "Soup Kitchen Ltd"

[console]
reminder_after = 3
greeting = false
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.append_letters());
        assert_eq!(config.organization(), "Soup Kitchen Ltd");
        assert_eq!(config.reminder_after(), 3);
        assert!(!config.show_greeting());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MEAL_TEST_SEED_FILE", "/tmp/seed-from-env.txt");

        let toml_content = r#"
[seed]
path = "${MEAL_TEST_SEED_FILE}"

[letters]
path = "letters.txt"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.seed.path, "/tmp/seed-from-env.txt");

        std::env::remove_var("MEAL_TEST_SEED_FILE");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[seed]
path = ""

[letters]
path = "letters.txt"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[seed]
path = "input_data.txt"

[letters]
path = "letters.txt"
organization = "  "

[console]
reminder_after = 0
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_section_is_a_parse_error() {
        let err = TomlConfig::from_toml_str("[seed]\npath = \"x\"\n").unwrap_err();
        assert!(matches!(err, MealError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[seed]
path = "from-file.txt"

[letters]
path = "letters.txt"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.seed.path, "from-file.txt");
    }
}
