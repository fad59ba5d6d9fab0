use serde::{Deserialize, Serialize};

/// User card shown on the profile screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
    pub age: String,
    pub gender: String,
    pub health_history: Vec<String>,
}

impl Default for UserInfo {
    fn default() -> Self {
        Self {
            name: "John Doe".into(),
            email: "johndoe@email.com".into(),
            age: "30".into(),
            gender: "Male".into(),
            health_history: vec!["Cough".into()],
        }
    }
}

/// Free-text fields editable on the profile screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    Email,
    Age,
    Gender,
}

impl UserInfo {
    pub fn set_field(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::Name => self.name = value,
            ProfileField::Email => self.email = value,
            ProfileField::Age => self.age = value,
            ProfileField::Gender => self.gender = value,
        }
    }
}
