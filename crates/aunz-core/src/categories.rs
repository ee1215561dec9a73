use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A product category the ranking engine can score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// English search keyword used against resale marketplaces.
    pub keyword: String,
    /// Search term on the sourcing marketplace (Chinese).
    pub localized: String,
    /// Human-readable English category name.
    pub english: String,
}

impl CategoryConfig {
    #[must_use]
    pub fn new(keyword: &str, localized: &str, english: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            localized: localized.to_string(),
            english: english.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesFile {
    pub categories: Vec<CategoryConfig>,
}

impl CategoriesFile {
    /// Looks up a category by its keyword, ignoring case.
    #[must_use]
    pub fn find(&self, keyword: &str) -> Option<&CategoryConfig> {
        self.categories
            .iter()
            .find(|c| c.keyword.eq_ignore_ascii_case(keyword.trim()))
    }

    #[must_use]
    pub fn keywords(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.keyword.clone()).collect()
    }
}

/// The default category catalog used when no categories file is configured.
#[must_use]
pub fn builtin_categories() -> CategoriesFile {
    CategoriesFile {
        categories: vec![
            CategoryConfig::new("bluetooth earbuds", "蓝牙耳机", "wireless earbuds"),
            CategoryConfig::new("power bank", "充电宝", "power bank"),
            CategoryConfig::new("smart watch", "智能手表", "smart watch"),
            CategoryConfig::new("sunglasses sport", "太阳镜", "sunglasses"),
            CategoryConfig::new("solar garden light", "太阳能灯", "solar light"),
            CategoryConfig::new("yoga mat", "瑜伽垫", "yoga mat"),
            CategoryConfig::new("phone case", "手机壳", "phone case"),
            CategoryConfig::new("LED strip light", "LED灯", "LED light"),
            CategoryConfig::new("backpack", "背包", "backpack"),
            CategoryConfig::new("storage organizer", "收纳盒", "storage box"),
        ],
    }
}

/// Load and validate the category catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_categories(path: &Path) -> Result<CategoriesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let categories_file: CategoriesFile =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::FileParse {
            path: path.display().to_string(),
            source: e,
        })?;

    validate_categories(&categories_file)?;

    Ok(categories_file)
}

fn validate_categories(categories_file: &CategoriesFile) -> Result<(), ConfigError> {
    if categories_file.categories.is_empty() {
        return Err(ConfigError::Validation(
            "category catalog must list at least one category".to_string(),
        ));
    }

    let mut seen_keywords = HashSet::new();

    for category in &categories_file.categories {
        if category.keyword.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category keyword must be non-empty".to_string(),
            ));
        }

        if category.localized.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' has an empty localized term",
                category.keyword
            )));
        }

        if !seen_keywords.insert(category.keyword.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category keyword: '{}'",
                category.keyword
            )));
        }
    }

    Ok(())
}
