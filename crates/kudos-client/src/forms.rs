//! Pre-submit checks for the create/edit forms. These are stricter than the
//! server rules (minimum lengths, image URL shape) and fill in defaults for
//! optional fields, so a form that passes here also passes the server.

use std::sync::LazyLock;

use regex::Regex;

use kudos_types::api::{BoardDraft, CardDraft, NewComment};
use kudos_types::models::Category;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const TITLE_TOO_SHORT: &str = "Title must be at least 3 characters";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const DESCRIPTION_TOO_SHORT: &str = "Description must be at least 10 characters";
pub const INVALID_IMAGE_URL: &str =
    "Please enter a valid image URL (ending with png, jpg, jpeg, gif, or webp)";
pub const COMMENT_MESSAGE_REQUIRED: &str = "Comment message is required.";

pub const MIN_TITLE_CHARS: usize = 3;
pub const MIN_DESCRIPTION_CHARS: usize = 10;

pub const DEFAULT_AUTHOR: &str = "Anonymous";
pub const DEFAULT_CARD_GIF: &str = "https://media.giphy.com/media/l0MYt5jPR6QX5pnqM/giphy.gif";

static IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://.*\.(?:png|jpg|jpeg|gif|webp)").expect("image url regex")
});

/// Unsplash placeholder used when a board is submitted without an image.
pub fn default_board_image(category: Category) -> String {
    format!("https://source.unsplash.com/random/300x200/?{category}")
}

pub fn is_image_url(url: &str) -> bool {
    IMAGE_URL.is_match(url)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Image,
    Gif,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors(pub Vec<FieldError>);

impl FormErrors {
    fn push(&mut self, field: Field, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn check_title(title: &str, errors: &mut FormErrors) {
    if title.trim().is_empty() {
        errors.push(Field::Title, TITLE_REQUIRED);
    } else if title.chars().count() < MIN_TITLE_CHARS {
        errors.push(Field::Title, TITLE_TOO_SHORT);
    }
}

fn check_description(description: &str, errors: &mut FormErrors) {
    if description.trim().is_empty() {
        errors.push(Field::Description, DESCRIPTION_REQUIRED);
    } else if description.chars().count() < MIN_DESCRIPTION_CHARS {
        errors.push(Field::Description, DESCRIPTION_TOO_SHORT);
    }
}

/// Empty is allowed (a default is substituted); anything else must look
/// like an image URL.
fn check_optional_image(url: &str, field: Field, errors: &mut FormErrors) {
    if !url.is_empty() && !is_image_url(url) {
        errors.push(field, INVALID_IMAGE_URL);
    }
}

fn or_default(value: String, default: impl FnOnce() -> String) -> String {
    if value.trim().is_empty() { default() } else { value }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardForm {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub image: String,
    pub author: String,
}

impl Default for BoardForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: Category::Celebration,
            image: String::new(),
            author: String::new(),
        }
    }
}

impl BoardForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        check_title(&self.title, &mut errors);
        check_description(&self.description, &mut errors);
        check_optional_image(&self.image, Field::Image, &mut errors);
        errors.into_result()
    }

    /// Validates, then fills in the default image and author.
    pub fn submit(self) -> Result<BoardDraft, FormErrors> {
        self.validate()?;
        let category = self.category;
        Ok(BoardDraft {
            title: self.title,
            description: self.description,
            category,
            image: or_default(self.image, || default_board_image(category)),
            author: or_default(self.author, || DEFAULT_AUTHOR.to_string()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardForm {
    pub title: String,
    pub description: String,
    pub gif: String,
    pub author: String,
}

impl CardForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        check_title(&self.title, &mut errors);
        check_description(&self.description, &mut errors);
        check_optional_image(&self.gif, Field::Gif, &mut errors);
        errors.into_result()
    }

    pub fn submit(self) -> Result<CardDraft, FormErrors> {
        self.validate()?;
        Ok(CardDraft {
            title: self.title,
            description: self.description,
            gif: or_default(self.gif, || DEFAULT_CARD_GIF.to_string()),
            author: or_default(self.author, || DEFAULT_AUTHOR.to_string()),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentForm {
    pub message: String,
    pub author: String,
}

impl CommentForm {
    pub fn submit(self) -> Result<NewComment, FormErrors> {
        if self.message.trim().is_empty() {
            let mut errors = FormErrors::default();
            errors.push(Field::Message, COMMENT_MESSAGE_REQUIRED);
            return Err(errors);
        }

        let author = self.author.trim();
        Ok(NewComment {
            message: self.message,
            author: (!author.is_empty()).then(|| author.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kudos_types::api::{BoardPayload, CardPayload, CommentPayload};

    fn board_form() -> BoardForm {
        BoardForm {
            title: "Sprint heroes".into(),
            description: "Everyone who carried the sprint".into(),
            category: Category::ThankYou,
            image: String::new(),
            author: String::new(),
        }
    }

    fn card_form() -> CardForm {
        CardForm {
            title: "Thank you".into(),
            description: "For staying late to fix the build".into(),
            gif: String::new(),
            author: "  ".into(),
        }
    }

    #[test]
    fn image_url_shape() {
        assert!(is_image_url("https://example.com/cat.PNG"));
        assert!(is_image_url("http://cdn.example.com/a/b.webp?size=2"));
        assert!(!is_image_url("ftp://example.com/cat.png"));
        assert!(!is_image_url("https://example.com/page.html"));
    }

    #[test]
    fn short_fields_are_rejected_with_specific_messages() {
        let form = BoardForm {
            title: "Hi".into(),
            description: "Too short".into(),
            image: "not a url".into(),
            ..board_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(Field::Title), Some(TITLE_TOO_SHORT));
        assert_eq!(errors.get(Field::Description), Some(DESCRIPTION_TOO_SHORT));
        assert_eq!(errors.get(Field::Image), Some(INVALID_IMAGE_URL));
    }

    #[test]
    fn blank_fields_are_required() {
        let errors = CardForm::default().validate().unwrap_err();
        assert_eq!(errors.get(Field::Title), Some(TITLE_REQUIRED));
        assert_eq!(errors.get(Field::Description), Some(DESCRIPTION_REQUIRED));
        assert_eq!(errors.get(Field::Gif), None);
    }

    #[test]
    fn board_submit_fills_defaults() {
        let draft = board_form().submit().unwrap();
        assert_eq!(draft.image, "https://source.unsplash.com/random/300x200/?thank_you");
        assert_eq!(draft.author, DEFAULT_AUTHOR);
    }

    #[test]
    fn card_submit_fills_defaults() {
        let draft = card_form().submit().unwrap();
        assert_eq!(draft.gif, DEFAULT_CARD_GIF);
        assert_eq!(draft.author, DEFAULT_AUTHOR);
    }

    #[test]
    fn comment_author_is_trimmed_to_none() {
        let comment = CommentForm {
            message: "Great job".into(),
            author: "   ".into(),
        }
        .submit()
        .unwrap();
        assert_eq!(comment.author, None);

        let errors = CommentForm::default().submit().unwrap_err();
        assert_eq!(errors.get(Field::Message), Some(COMMENT_MESSAGE_REQUIRED));
    }

    // Submitted drafts go over the wire as JSON; the server decodes them into
    // payloads and applies its own rules.

    #[test]
    fn submitted_board_passes_server_rules() {
        let draft = board_form().submit().unwrap();
        let payload: BoardPayload =
            serde_json::from_value(serde_json::to_value(&draft).unwrap()).unwrap();
        assert_eq!(payload.validate().unwrap(), draft);
    }

    #[test]
    fn submitted_card_passes_server_rules() {
        let draft = card_form().submit().unwrap();
        let payload: CardPayload =
            serde_json::from_value(serde_json::to_value(&draft).unwrap()).unwrap();
        assert_eq!(payload.validate().unwrap(), draft);
    }

    #[test]
    fn submitted_comment_passes_server_rules() {
        let comment = CommentForm {
            message: "Nice".into(),
            author: " Kai ".into(),
        }
        .submit()
        .unwrap();
        let payload: CommentPayload =
            serde_json::from_value(serde_json::to_value(&comment).unwrap()).unwrap();
        assert_eq!(payload.validate().unwrap(), comment);
    }
}
