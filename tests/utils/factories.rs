/// Test data factories using builder pattern
///
/// Provides convenient methods to create test data with sensible defaults
use manga_lists::modules::manga_list::{
    CreateMangaListData, MangaListStatus, MangaSummary, MangaTranslation,
};
use uuid::Uuid;

pub struct MangaListFactory {
    owner_id: Option<Uuid>,
    name: String,
    cover: String,
    mood: String,
    description: Option<String>,
    status: Option<MangaListStatus>,
    is_default: Option<bool>,
}

impl Default for MangaListFactory {
    fn default() -> Self {
        Self {
            owner_id: None,
            name: "Test List".to_string(),
            cover: "https://example.com/cover.jpg".to_string(),
            mood: "relaxed".to_string(),
            description: None,
            status: None,
            is_default: None,
        }
    }
}

impl MangaListFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn public() -> Self {
        Self::default().with_status(MangaListStatus::Public)
    }

    pub fn with_owner(mut self, owner_id: Uuid) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_mood(mut self, mood: &str) -> Self {
        self.mood = mood.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_status(mut self, status: MangaListStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = Some(true);
        self
    }

    pub fn build(self) -> CreateMangaListData {
        CreateMangaListData {
            owner_id: self.owner_id,
            name: self.name,
            cover: self.cover,
            mood: self.mood,
            description: self.description,
            status: self.status,
            is_default: self.is_default,
        }
    }
}

pub struct MangaFactory {
    id: Uuid,
    cover: Option<String>,
    external_ref: Option<String>,
    translations: Vec<MangaTranslation>,
}

impl Default for MangaFactory {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            cover: None,
            external_ref: None,
            translations: Vec::new(),
        }
    }
}

impl MangaFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog manga with a single English title
    pub fn titled(title: &str) -> Self {
        Self::default().with_translation("en", title)
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_cover(mut self, cover: &str) -> Self {
        self.cover = Some(cover.to_string());
        self
    }

    pub fn with_translation(mut self, language: &str, name: &str) -> Self {
        self.translations.push(MangaTranslation {
            language: language.to_string(),
            name: name.to_string(),
            description: None,
        });
        self
    }

    pub fn build(self) -> MangaSummary {
        MangaSummary {
            id: self.id,
            cover: self.cover,
            external_ref: self.external_ref,
            translations: self.translations,
        }
    }
}
