use serde::{Deserialize, Serialize};

/// An entry from the application directory. Read-only once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Application {
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_description_defaults_to_empty() {
        let app: Application = serde_json::from_str(r#"{"id":"auth","name":"Auth Service"}"#).unwrap();
        assert_eq!(app.description, "");
    }
}
