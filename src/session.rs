//! Page-level controller: command dispatch, modal prompt state machine,
//! list rendering, and transient notices.
//!
//! The session consumes one input line at a time. At most one modal is open
//! at any moment; the single `prompt` field makes a second simultaneous
//! modal unrepresentable. Every transition runs to completion before the
//! next line is read.
use crate::forms::{clamp_chars, AlertForm, FormError, SubmissionForm};
use crate::model::{ContactMethod, Story, Venue, TEASER_MAX_CHARS, TITLE_MAX_CHARS};
use crate::notify::AlertSink;
use crate::store::StoryStore;
use tracing::warn;

// Toast copy, kept verbatim from the page.
const NOTICE_SUBMIT_MISSING: &str =
    "Please fill in required fields: title and teaser are required to submit your story.";
const NOTICE_SUBMIT_OK: &str = "Story submitted! Thank you for sharing your neighborhood story.";
const NOTICE_ALERT_MISSING: &str =
    "Please fill in all fields: we need your contact method and details to send you alerts.";
const NOTICE_ALERT_OK: &str =
    "You're all set! We'll let you know when this story gathering is ready.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmissionField {
    Title,
    Teaser,
    ContactMethod,
    Name,
    OpenToSharing,
    Venue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlertField {
    ContactMethod,
    Contact,
}

/// Modal state: closed, or one open form scoped to its draft.
enum Prompt {
    Idle,
    Submission {
        form: SubmissionForm,
        field: SubmissionField,
    },
    Alert {
        story_id: i64,
        form: AlertForm,
        field: AlertField,
    },
}

/// Output of one input line: lines to print, plus a quit signal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Reply {
    fn say(line: impl Into<String>) -> Self {
        Reply {
            lines: vec![line.into()],
            quit: false,
        }
    }

    fn lines(lines: Vec<String>) -> Self {
        Reply { lines, quit: false }
    }

    fn quit() -> Self {
        Reply {
            lines: vec!["Goodbye!".into()],
            quit: true,
        }
    }
}

pub struct Session {
    store: StoryStore,
    prompt: Prompt,
    sink: Box<dyn AlertSink>,
}

impl Session {
    pub fn new(store: StoryStore, sink: Box<dyn AlertSink>) -> Self {
        Self {
            store,
            prompt: Prompt::Idle,
            sink,
        }
    }

    pub fn store(&self) -> &StoryStore {
        &self.store
    }

    /// Feed one line of visitor input through the controller.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        match std::mem::replace(&mut self.prompt, Prompt::Idle) {
            Prompt::Idle => self.handle_command(line),
            Prompt::Submission { form, field } => self.handle_submission_input(form, field, line),
            Prompt::Alert {
                story_id,
                form,
                field,
            } => self.handle_alert_input(story_id, form, field, line),
        }
    }

    fn handle_command(&mut self, line: &str) -> Reply {
        let trimmed = line.trim();
        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (trimmed, ""),
        };

        match command {
            "" => Reply::default(),
            "help" => Reply::lines(help_text()),
            "list" => Reply::lines(self.render_list()),
            "submit" => self.open_submission(),
            "hear" => self.hear(rest),
            "dump" => self.dump(),
            "quit" | "exit" => Reply::quit(),
            other => {
                warn!(command = other, "unknown command");
                Reply::say("Unknown command. Type 'help' to see what you can do.")
            }
        }
    }

    fn open_submission(&mut self) -> Reply {
        self.prompt = Prompt::Submission {
            form: SubmissionForm::default(),
            field: SubmissionField::Title,
        };
        Reply::lines(vec![
            "Share your story! (type 'cancel' at any point to close the form)".into(),
            submission_prompt(SubmissionField::Title),
        ])
    }

    /// Interest flow: the counter bump always happens first; the alert
    /// signup that follows is optional and never touches the story.
    fn hear(&mut self, arg: &str) -> Reply {
        let Ok(id) = arg.parse::<i64>() else {
            return Reply::say("Usage: hear <story id>");
        };
        let Some(story) = self.store.increment_interest(id) else {
            // Unknown id: leave the list untouched, open nothing.
            return Reply::say(format!("No story #{id} on the page."));
        };

        let mut lines = vec![format!(
            "You're in! {} neighbor{} now want to hear \"{}\".",
            story.interest_count,
            if story.interest_count == 1 { "" } else { "s" },
            story.title
        )];
        if story.is_forming_event() {
            lines.push("This story gathering is forming!".into());
        }
        lines.push("Get story alerts: we'll let you know when this gathering is happening!".into());
        lines.push("(answer the prompts, or type 'maybe later' to skip)".into());
        lines.push(alert_method_prompt());

        self.prompt = Prompt::Alert {
            story_id: id,
            form: AlertForm::default(),
            field: AlertField::ContactMethod,
        };
        Reply::lines(lines)
    }

    fn handle_submission_input(
        &mut self,
        mut form: SubmissionForm,
        field: SubmissionField,
        line: &str,
    ) -> Reply {
        if line.trim().eq_ignore_ascii_case("cancel") {
            return Reply::say("No worries, the form was closed and your draft discarded.");
        }

        let next = match field {
            SubmissionField::Title => {
                form.title = clamp_chars(line, TITLE_MAX_CHARS);
                Some(SubmissionField::Teaser)
            }
            SubmissionField::Teaser => {
                form.teaser = clamp_chars(line, TEASER_MAX_CHARS);
                Some(SubmissionField::ContactMethod)
            }
            SubmissionField::ContactMethod => {
                form.contact_method = line.to_string();
                Some(SubmissionField::Name)
            }
            SubmissionField::Name => {
                form.name = line.to_string();
                Some(SubmissionField::OpenToSharing)
            }
            SubmissionField::OpenToSharing => {
                form.open_to_sharing = matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes");
                Some(SubmissionField::Venue)
            }
            SubmissionField::Venue => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    form.venue = None;
                    None
                } else if let Some(venue) = Venue::parse(trimmed) {
                    form.venue = Some(venue);
                    None
                } else {
                    // Preset venues only; stay on this field.
                    let retry = format!(
                        "That's not one of the preset venues. {}",
                        submission_prompt(SubmissionField::Venue)
                    );
                    self.prompt = Prompt::Submission {
                        form,
                        field: SubmissionField::Venue,
                    };
                    return Reply::say(retry);
                }
            }
        };

        match next {
            Some(next_field) => {
                let prompt = submission_prompt(next_field);
                self.prompt = Prompt::Submission {
                    form,
                    field: next_field,
                };
                Reply::say(prompt)
            }
            None => self.finish_submission(form),
        }
    }

    fn finish_submission(&mut self, form: SubmissionForm) -> Reply {
        match form.validate() {
            Ok(input) => {
                let story = self.store.add_story(input);
                Reply::lines(vec![
                    NOTICE_SUBMIT_OK.into(),
                    format!("\"{}\" is live at the top of the list.", story.title),
                ])
            }
            Err(FormError::MissingRequiredField(missing)) => {
                // The modal stays open; jump back to the first missing
                // required field with everything else retained.
                let field = if missing == "title" {
                    SubmissionField::Title
                } else {
                    SubmissionField::Teaser
                };
                let prompt = submission_prompt(field);
                self.prompt = Prompt::Submission { form, field };
                Reply::lines(vec![NOTICE_SUBMIT_MISSING.into(), prompt])
            }
        }
    }

    fn handle_alert_input(
        &mut self,
        story_id: i64,
        mut form: AlertForm,
        field: AlertField,
        line: &str,
    ) -> Reply {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("maybe later") || trimmed.eq_ignore_ascii_case("cancel") {
            // Valid terminal transition; partial input is discarded.
            return Reply::say("Maybe later it is. We won't bug you about this one.");
        }

        match field {
            AlertField::ContactMethod => {
                if trimmed.is_empty() {
                    // Left unselected; validation will catch it on submit.
                    self.prompt = Prompt::Alert {
                        story_id,
                        form: form.clone(),
                        field: AlertField::Contact,
                    };
                    return Reply::say(alert_contact_prompt(form.contact_method));
                }
                match ContactMethod::parse(trimmed) {
                    Some(method) => {
                        form.contact_method = Some(method);
                        self.prompt = Prompt::Alert {
                            story_id,
                            form: form.clone(),
                            field: AlertField::Contact,
                        };
                        Reply::say(alert_contact_prompt(form.contact_method))
                    }
                    None => {
                        self.prompt = Prompt::Alert {
                            story_id,
                            form,
                            field: AlertField::ContactMethod,
                        };
                        Reply::say("Please choose 'email' or 'text' (or 'maybe later').")
                    }
                }
            }
            AlertField::Contact => {
                form.contact = line.to_string();
                match form.validate() {
                    Ok(request) => {
                        self.sink.alert_requested(story_id, &request);
                        Reply::say(NOTICE_ALERT_OK)
                    }
                    Err(FormError::MissingRequiredField(missing)) => {
                        let field = if missing == "contact method" {
                            AlertField::ContactMethod
                        } else {
                            AlertField::Contact
                        };
                        let prompt = match field {
                            AlertField::ContactMethod => alert_method_prompt(),
                            AlertField::Contact => alert_contact_prompt(form.contact_method),
                        };
                        self.prompt = Prompt::Alert {
                            story_id,
                            form,
                            field,
                        };
                        Reply::lines(vec![NOTICE_ALERT_MISSING.into(), prompt])
                    }
                }
            }
        }
    }

    fn render_list(&self) -> Vec<String> {
        let snapshot = self.store.snapshot();
        if snapshot.is_empty() {
            return vec!["No stories yet. Be the first: type 'submit'.".into()];
        }

        let mut lines = vec!["Recent stories:".into()];
        for story in snapshot.iter() {
            lines.push(render_story_line(story));
            lines.push(format!("     {}", story.teaser));
            if let Some(venue) = story.venue {
                lines.push(format!("     told at {}", venue.label()));
            }
        }
        lines.push("Type 'hear <id>' if you want to hear one of these told live.".into());
        lines
    }

    fn dump(&self) -> Reply {
        let snapshot = self.store.snapshot();
        match serde_json::to_string_pretty(snapshot.as_slice()) {
            Ok(json) => Reply::lines(json.lines().map(str::to_string).collect()),
            Err(err) => {
                warn!(?err, "failed to serialize story list");
                Reply::say("Could not serialize the story list.")
            }
        }
    }
}

fn render_story_line(story: &Story) -> String {
    let marker = if story.is_forming_event() {
        "  << event forming!"
    } else {
        ""
    };
    let credit = match &story.name {
        Some(name) => format!(" (shared by {name})"),
        None => String::new(),
    };
    format!(
        "  #{} {}{} [{} interested]{}",
        story.id, story.title, credit, story.interest_count, marker
    )
}

fn submission_prompt(field: SubmissionField) -> String {
    match field {
        SubmissionField::Title => "Story title (required):".into(),
        SubmissionField::Teaser => "One-line teaser (required):".into(),
        SubmissionField::ContactMethod => {
            "Contact method (email, phone, or however we can reach you; optional):".into()
        }
        SubmissionField::Name => "Your name (optional, used as the credit line):".into(),
        SubmissionField::OpenToSharing => {
            "Open to sharing this story live if others are interested? (y/n)".into()
        }
        SubmissionField::Venue => {
            let options = Venue::ALL
                .iter()
                .map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            format!("Venue, if you have one in mind ({options}; blank to skip):")
        }
    }
}

fn alert_method_prompt() -> String {
    "How should we contact you? (email/text)".into()
}

fn alert_contact_prompt(method: Option<ContactMethod>) -> String {
    match method {
        Some(ContactMethod::Email) => "Email address:".into(),
        Some(ContactMethod::Text) => "Phone number:".into(),
        None => "Contact info:".into(),
    }
}

fn help_text() -> Vec<String> {
    vec![
        "Commands:".into(),
        "  list         show the stories on the page".into(),
        "  submit       share a story of your own".into(),
        "  hear <id>    say you want to hear a story told live".into(),
        "  dump         print the story list as JSON".into(),
        "  quit         leave the page".into(),
    ]
}
