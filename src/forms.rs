//! Form validation and normalization for the two modal flows.
use crate::model::{ContactMethod, InterestAlertRequest, ValidatedStoryInput, Venue};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("required field '{0}' is missing")]
    MissingRequiredField(&'static str),
}

/// Raw field values of the story submission modal. Mirrors the controlled
/// inputs of the form; `validate` is only run when the visitor submits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    pub title: String,
    pub teaser: String,
    pub contact_method: String,
    pub name: String,
    pub open_to_sharing: bool,
    pub venue: Option<Venue>,
}

impl SubmissionForm {
    /// Trim and normalize the fields. Title and teaser are required; the
    /// first missing one is reported and nothing is submitted.
    pub fn validate(&self) -> Result<ValidatedStoryInput, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::MissingRequiredField("title"));
        }
        let teaser = self.teaser.trim();
        if teaser.is_empty() {
            return Err(FormError::MissingRequiredField("teaser"));
        }

        Ok(ValidatedStoryInput {
            title: title.to_string(),
            teaser: teaser.to_string(),
            contact_method: optional(&self.contact_method),
            name: optional(&self.name),
            open_to_sharing: self.open_to_sharing,
            venue: self.venue,
        })
    }
}

/// Raw field values of the alert-signup modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertForm {
    pub contact_method: Option<ContactMethod>,
    pub contact: String,
}

impl AlertForm {
    pub fn validate(&self) -> Result<InterestAlertRequest, FormError> {
        let contact_method = self
            .contact_method
            .ok_or(FormError::MissingRequiredField("contact method"))?;
        let contact = self.contact.trim();
        if contact.is_empty() {
            return Err(FormError::MissingRequiredField("contact"));
        }

        Ok(InterestAlertRequest {
            contact_method,
            contact: contact.to_string(),
        })
    }
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Cap text at `max` characters, the way the page's inputs cap typing.
/// Operates on chars so multi-byte text never splits mid-codepoint.
pub fn clamp_chars(input: &str, max: usize) -> String {
    if input.chars().count() <= max {
        input.to_string()
    } else {
        input.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_trims_title_and_teaser() {
        let form = SubmissionForm {
            title: "  Hello  ".into(),
            teaser: " World ".into(),
            ..Default::default()
        };
        let input = form.validate().unwrap();
        assert_eq!(input.title, "Hello");
        assert_eq!(input.teaser, "World");
    }

    #[test]
    fn submission_requires_title() {
        let form = SubmissionForm {
            title: "   ".into(),
            teaser: "fine".into(),
            ..Default::default()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            FormError::MissingRequiredField("title")
        );
    }

    #[test]
    fn submission_requires_teaser() {
        let form = SubmissionForm {
            title: "fine".into(),
            teaser: "".into(),
            ..Default::default()
        };
        assert_eq!(
            form.validate().unwrap_err(),
            FormError::MissingRequiredField("teaser")
        );
    }

    #[test]
    fn submission_empty_optionals_become_none() {
        let form = SubmissionForm {
            title: "T".into(),
            teaser: "S".into(),
            contact_method: "  ".into(),
            name: " Maria ".into(),
            ..Default::default()
        };
        let input = form.validate().unwrap();
        assert_eq!(input.contact_method, None);
        assert_eq!(input.name.as_deref(), Some("Maria"));
    }

    #[test]
    fn alert_requires_contact_method_regardless_of_contact() {
        let form = AlertForm {
            contact_method: None,
            contact: "me@example.com".into(),
        };
        assert_eq!(
            form.validate().unwrap_err(),
            FormError::MissingRequiredField("contact method")
        );
    }

    #[test]
    fn alert_requires_nonempty_contact() {
        let form = AlertForm {
            contact_method: Some(ContactMethod::Text),
            contact: "   ".into(),
        };
        assert_eq!(
            form.validate().unwrap_err(),
            FormError::MissingRequiredField("contact")
        );
    }

    #[test]
    fn alert_trims_contact() {
        let form = AlertForm {
            contact_method: Some(ContactMethod::Email),
            contact: " me@example.com ".into(),
        };
        let req = form.validate().unwrap();
        assert_eq!(req.contact, "me@example.com");
        assert_eq!(req.contact_method, ContactMethod::Email);
    }

    #[test]
    fn clamp_chars_respects_char_boundaries() {
        assert_eq!(clamp_chars("hello", 10), "hello");
        assert_eq!(clamp_chars("hello", 3), "hel");
        assert_eq!(clamp_chars("héllo", 2), "hé");
    }
}
