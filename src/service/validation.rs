//! Field-level rules for write payloads.

use crate::error::AppError;
use crate::model::{AudioMetadata, AudiobookMetadata, PodcastMetadata, SongMetadata};

/// Length bounds for a text column, counted in characters.
#[derive(Clone, Copy, Debug)]
pub struct TextRule {
    pub min_length: usize,
    pub max_length: usize,
}

pub const SHORT_TEXT: TextRule = TextRule {
    min_length: 1,
    max_length: 100,
};

pub const LONG_TEXT: TextRule = TextRule {
    min_length: 1,
    max_length: 1000,
};

pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

fn text(col: &str, v: &str, rule: TextRule) -> Result<(), AppError> {
    let len = v.chars().count();
    if len < rule.min_length {
        return Err(AppError::Validation(format!(
            "{} must be at least {} characters",
            col, rule.min_length
        )));
    }
    if len > rule.max_length {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            col, rule.max_length
        )));
    }
    Ok(())
}

fn positive(col: &str, v: i32) -> Result<(), AppError> {
    if v <= 0 {
        return Err(AppError::Validation(format!("{} must be greater than 0", col)));
    }
    Ok(())
}

impl Validate for SongMetadata {
    fn validate(&self) -> Result<(), AppError> {
        positive("id", self.id)?;
        text("name", &self.name, SHORT_TEXT)?;
        positive("duration", self.duration)
    }
}

impl Validate for PodcastMetadata {
    fn validate(&self) -> Result<(), AppError> {
        positive("id", self.id)?;
        text("name", &self.name, SHORT_TEXT)?;
        positive("duration", self.duration)?;
        text("host", &self.host, SHORT_TEXT)?;
        if let Some(p) = &self.participants {
            text("participants", p, LONG_TEXT)?;
        }
        Ok(())
    }
}

impl Validate for AudiobookMetadata {
    fn validate(&self) -> Result<(), AppError> {
        positive("id", self.id)?;
        text("title", &self.title, SHORT_TEXT)?;
        text("author", &self.author, SHORT_TEXT)?;
        text("narrator", &self.narrator, SHORT_TEXT)?;
        positive("duration", self.duration)
    }
}

impl Validate for AudioMetadata {
    fn validate(&self) -> Result<(), AppError> {
        match self {
            AudioMetadata::Song(m) => m.validate(),
            AudioMetadata::Podcast(m) => m.validate(),
            AudioMetadata::Audiobook(m) => m.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(name: &str, duration: i32) -> SongMetadata {
        SongMetadata {
            id: 1,
            name: name.into(),
            duration,
        }
    }

    #[test]
    fn name_bounds() {
        assert!(song("A", 1).validate().is_ok());
        assert!(song(&"x".repeat(100), 1).validate().is_ok());
        assert!(song("", 1).validate().is_err());
        assert!(song(&"x".repeat(101), 1).validate().is_err());
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        // 100 two-byte characters
        assert!(song(&"é".repeat(100), 1).validate().is_ok());
    }

    #[test]
    fn duration_and_id_must_be_positive() {
        assert!(song("A", 0).validate().is_err());
        assert!(song("A", -5).validate().is_err());
        let mut s = song("A", 10);
        s.id = 0;
        let err = s.validate().unwrap_err();
        assert_eq!(err.to_string(), "validation: id must be greater than 0");
    }

    #[test]
    fn participants_is_optional_but_bounded() {
        let mut p = PodcastMetadata {
            id: 1,
            name: "show".into(),
            duration: 30,
            host: "host".into(),
            participants: None,
        };
        assert!(p.validate().is_ok());
        p.participants = Some("x".repeat(1000));
        assert!(p.validate().is_ok());
        p.participants = Some("x".repeat(1001));
        assert!(p.validate().is_err());
        p.participants = Some(String::new());
        assert!(p.validate().is_err());
    }

    #[test]
    fn audiobook_requires_all_people() {
        let b = AudiobookMetadata {
            id: 2,
            title: "t".into(),
            author: "a".into(),
            narrator: "".into(),
            duration: 10,
        };
        let err = b.validate().unwrap_err();
        assert!(err.to_string().contains("narrator"));
    }
}
