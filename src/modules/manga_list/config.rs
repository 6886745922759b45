use std::env;

use crate::shared::application::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::read_u32;

/// Tunables for the manga list module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MangaListSettings {
    pub default_page_size: u32,
    pub max_page_size: u32,
    /// Translation language tried first when resolving a display title
    pub preferred_language: String,
}

impl Default for MangaListSettings {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            preferred_language: "en".to_string(),
        }
    }
}

impl MangaListSettings {
    /// Reads `MANGA_LIST_DEFAULT_PAGE_SIZE`, `MANGA_LIST_MAX_PAGE_SIZE` and
    /// `MANGA_LIST_PREFERRED_LANGUAGE`, falling back to the defaults.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let max_page_size = read_u32("MANGA_LIST_MAX_PAGE_SIZE")?.unwrap_or(defaults.max_page_size);
        let default_page_size =
            read_u32("MANGA_LIST_DEFAULT_PAGE_SIZE")?.unwrap_or(defaults.default_page_size);
        let preferred_language = env::var("MANGA_LIST_PREFERRED_LANGUAGE")
            .ok()
            .map(|lang| lang.trim().to_lowercase())
            .filter(|lang| !lang.is_empty())
            .unwrap_or(defaults.preferred_language);

        let settings = Self {
            default_page_size,
            max_page_size,
            preferred_language,
        };
        settings.validate()?;

        Ok(settings)
    }

    fn validate(&self) -> AppResult<()> {
        if self.max_page_size == 0 || self.default_page_size == 0 {
            return Err(AppError::ConfigurationError(
                "Page sizes must be greater than zero".to_string(),
            ));
        }
        if self.default_page_size > self.max_page_size {
            return Err(AppError::ConfigurationError(format!(
                "Default page size {} exceeds max page size {}",
                self.default_page_size, self.max_page_size
            )));
        }
        Ok(())
    }
}
