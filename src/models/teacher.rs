use serde::Serialize;

/// A teacher account created on first login.
#[derive(Debug, Clone, Serialize)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subjects: Vec<String>, // ⇔ teachers.subjects (TEXT, JSON array)
    pub created_at: String,
}

impl Teacher {
    /// Derive the login e-mail from a display name: "Ada Lovelace" → "adalovelace@temp.com".
    pub fn email_for(name: &str) -> String {
        let compact: String = name
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        format!("{}@temp.com", compact)
    }

    pub fn teaches(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }
}

/// The principal every roster / session command runs as.
#[derive(Debug, Clone)]
pub struct ActiveContext {
    pub teacher: Teacher,
    pub subject: String,
}
