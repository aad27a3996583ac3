//! Authoritative request rules, checked by the API before any store access.
//!
//! Each check reports every failing field at once, in declaration order.

use crate::api::{BoardDraft, BoardPayload, CardDraft, CardPayload, CommentPayload, NewComment};
use crate::models::Category;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const CATEGORY_REQUIRED: &str =
    "Valid category is required (celebration, thank_you, or inspiration)";
pub const IMAGE_REQUIRED: &str = "Image URL is required";
pub const GIF_REQUIRED: &str = "GIF URL is required";
pub const AUTHOR_REQUIRED: &str = "Author name is required";
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// Returns the value when it is present and not blank.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn require(value: Option<String>, message: &'static str, errors: &mut Vec<String>) -> String {
    present(value).unwrap_or_else(|| {
        errors.push(message.to_string());
        String::new()
    })
}

impl BoardPayload {
    pub fn validate(self) -> Result<BoardDraft, Vec<String>> {
        let mut errors = Vec::new();

        let title = require(self.title, TITLE_REQUIRED, &mut errors);
        let description = require(self.description, DESCRIPTION_REQUIRED, &mut errors);
        let category = self.category.and_then(|c| c.parse::<Category>().ok());
        if category.is_none() {
            errors.push(CATEGORY_REQUIRED.to_string());
        }
        let image = require(self.image, IMAGE_REQUIRED, &mut errors);
        let author = require(self.author, AUTHOR_REQUIRED, &mut errors);

        match category {
            Some(category) if errors.is_empty() => Ok(BoardDraft {
                title,
                description,
                category,
                image,
                author,
            }),
            _ => Err(errors),
        }
    }
}

impl CardPayload {
    pub fn validate(self) -> Result<CardDraft, Vec<String>> {
        let mut errors = Vec::new();

        let title = require(self.title, TITLE_REQUIRED, &mut errors);
        let description = require(self.description, DESCRIPTION_REQUIRED, &mut errors);
        let gif = require(self.gif, GIF_REQUIRED, &mut errors);
        let author = require(self.author, AUTHOR_REQUIRED, &mut errors);

        if errors.is_empty() {
            Ok(CardDraft {
                title,
                description,
                gif,
                author,
            })
        } else {
            Err(errors)
        }
    }
}

impl CommentPayload {
    /// A blank author is stored as null.
    pub fn validate(self) -> Result<NewComment, Vec<String>> {
        let mut errors = Vec::new();
        let message = require(self.message, MESSAGE_REQUIRED, &mut errors);

        if errors.is_empty() {
            Ok(NewComment {
                message,
                author: present(self.author),
            })
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_board() -> BoardPayload {
        BoardPayload {
            title: Some("Team wins".into()),
            description: Some("Everything we shipped this week".into()),
            category: Some("celebration".into()),
            image: Some("https://example.com/party.png".into()),
            author: Some("Ada".into()),
        }
    }

    #[test]
    fn complete_board_validates() {
        let draft = full_board().validate().unwrap();
        assert_eq!(draft.category, Category::Celebration);
        assert_eq!(draft.title, "Team wins");
    }

    #[test]
    fn empty_board_reports_every_field_in_order() {
        let errors = BoardPayload::default().validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                TITLE_REQUIRED,
                DESCRIPTION_REQUIRED,
                CATEGORY_REQUIRED,
                IMAGE_REQUIRED,
                AUTHOR_REQUIRED,
            ]
        );
    }

    #[test]
    fn blank_strings_count_as_missing() {
        let payload = BoardPayload {
            title: Some("   ".into()),
            author: Some("\t".into()),
            ..full_board()
        };
        assert_eq!(
            payload.validate().unwrap_err(),
            vec![TITLE_REQUIRED, AUTHOR_REQUIRED]
        );
    }

    #[test]
    fn non_string_fields_count_as_missing() {
        let payload: BoardPayload = serde_json::from_str(
            r#"{"title":5,"description":"d","category":["celebration"],"image":"i","author":null}"#,
        )
        .unwrap();
        assert_eq!(
            payload.validate().unwrap_err(),
            vec![TITLE_REQUIRED, CATEGORY_REQUIRED, AUTHOR_REQUIRED]
        );
    }

    #[test]
    fn unknown_category_is_rejected() {
        let payload = BoardPayload {
            category: Some("birthday".into()),
            ..full_board()
        };
        assert_eq!(payload.validate().unwrap_err(), vec![CATEGORY_REQUIRED]);
    }

    #[test]
    fn card_requires_all_four_fields() {
        let errors = CardPayload {
            title: Some("Thanks".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors, vec![DESCRIPTION_REQUIRED, GIF_REQUIRED, AUTHOR_REQUIRED]);
    }

    #[test]
    fn comment_author_is_optional_and_blank_becomes_none() {
        let comment = CommentPayload {
            message: Some("Well deserved".into()),
            author: Some("  ".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(comment.author, None);

        let errors = CommentPayload::default().validate().unwrap_err();
        assert_eq!(errors, vec![MESSAGE_REQUIRED]);
    }
}
