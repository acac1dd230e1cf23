//! DTOs for catalog_sea adapter.

#[derive(Debug, Clone)]
pub struct GameCreate {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

impl GameCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

#[derive(Debug, Clone)]
pub struct StepCreate {
    pub game_id: i64,
    pub step_number: i32,
    pub title: String,
    pub description: Option<String>,
    pub url_pattern: Option<String>,
    pub estimated_duration_minutes: i32,
    pub requires_validation: bool,
    pub is_active: bool,
}

impl StepCreate {
    pub fn new(game_id: i64, step_number: i32, title: impl Into<String>) -> Self {
        Self {
            game_id,
            step_number,
            title: title.into(),
            description: None,
            url_pattern: None,
            estimated_duration_minutes: 1,
            requires_validation: false,
            is_active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_url_pattern(mut self, url_pattern: impl Into<String>) -> Self {
        self.url_pattern = Some(url_pattern.into());
        self
    }

    pub fn with_duration(mut self, minutes: i32) -> Self {
        self.estimated_duration_minutes = minutes;
        self
    }

    pub fn requiring_validation(mut self) -> Self {
        self.requires_validation = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}
