use chrono::{NaiveDateTime, Utc};
use diesel::{Insertable, Queryable};
use serde_derive::Deserialize;
use uuid::Uuid;

use crate::schema::notes;
use crate::utils;

/// The persisted note row. Immutable once created; the only mutation path
/// is deletion (self-expiry, explicit delete, or the cleanup sweep).
#[derive(Clone, Debug, Queryable, Insertable)]
#[diesel(table_name = notes)]
pub struct Note {
    pub id: String,
    pub content: String,
    pub expire_after_read: bool,
    pub password: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Note {
    /// A note without a password is open to anyone holding its id.
    pub fn password_matches(&self, supplied: Option<&str>) -> bool {
        match (&self.password, supplied) {
            (None, _) => true,
            (Some(stored), Some(given)) => utils::secrets_match(stored, given),
            (Some(_), None) => false,
        }
    }
}

fn default_expire() -> bool {
    true
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewNote {
    pub content: String,
    #[serde(default = "default_expire")]
    pub expire_after_read: bool,
    #[serde(default)]
    pub password: Option<String>,
}

impl NewNote {
    pub fn into_insertable(self) -> Note {
        Note {
            id: Uuid::new_v4().to_string(),
            content: self.content,
            expire_after_read: self.expire_after_read,
            password: self.password,
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(password: Option<&str>) -> Note {
        NewNote {
            content: "content".to_string(),
            expire_after_read: true,
            password: password.map(str::to_string),
        }
        .into_insertable()
    }

    #[test]
    fn insertable_gets_fresh_unique_ids() {
        let a = note(None);
        let b = note(None);
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn open_note_accepts_any_password() {
        let n = note(None);
        assert!(n.password_matches(None));
        assert!(n.password_matches(Some("anything")));
    }

    #[test]
    fn protected_note_requires_exact_password() {
        let n = note(Some("pw"));
        assert!(n.password_matches(Some("pw")));
        assert!(!n.password_matches(Some("wrong")));
        assert!(!n.password_matches(None));
    }

    #[test]
    fn expire_after_read_defaults_to_true() {
        let parsed: NewNote = serde_json::from_str(r#"{"content": "hi"}"#).unwrap();
        assert!(parsed.expire_after_read);
        assert!(parsed.password.is_none());
    }
}
