//! The story store: ordered story list behind copy-on-write snapshots.
//!
//! Every mutation replaces the backing `Arc<Vec<Story>>` with a fresh
//! version, so a snapshot taken before a transition keeps observing the
//! state it was taken from. There is a single writer (the session loop);
//! no locking is needed.
use crate::model::{Story, ValidatedStoryInput};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Clone, Default)]
pub struct StoryStore {
    stories: Arc<Vec<Story>>,
}

impl StoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with pre-built stories (ids are taken as given).
    pub fn with_stories(stories: Vec<Story>) -> Self {
        Self {
            stories: Arc::new(stories),
        }
    }

    /// Cheap shared view of the current list, newest first.
    pub fn snapshot(&self) -> Arc<Vec<Story>> {
        Arc::clone(&self.stories)
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Story> {
        self.stories.iter().find(|s| s.id == id)
    }

    /// Insert a validated submission at the front of the list and return the
    /// created story. The new id is `max(existing ids) + 1`; duplicates of
    /// title or teaser are allowed.
    #[instrument(skip_all)]
    pub fn add_story(&mut self, input: ValidatedStoryInput) -> Story {
        let next_id = self.stories.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let story = Story {
            id: next_id,
            title: input.title,
            teaser: input.teaser,
            contact_method: input.contact_method,
            name: input.name,
            open_to_sharing: input.open_to_sharing,
            venue: input.venue,
            interest_count: 0,
            created_at: Utc::now(),
        };

        let mut next = Vec::with_capacity(self.stories.len() + 1);
        next.push(story.clone());
        next.extend(self.stories.iter().cloned());
        self.stories = Arc::new(next);

        info!(id = story.id, title = %story.title, "story added");
        story
    }

    /// Bump one story's interest counter by exactly 1, leaving every other
    /// story untouched. Unknown ids are a silent no-op.
    #[instrument(skip_all)]
    pub fn increment_interest(&mut self, id: i64) -> Option<Story> {
        if !self.stories.iter().any(|s| s.id == id) {
            return None;
        }

        let next: Vec<Story> = self
            .stories
            .iter()
            .map(|s| {
                if s.id == id {
                    let mut bumped = s.clone();
                    bumped.interest_count += 1;
                    bumped
                } else {
                    s.clone()
                }
            })
            .collect();
        self.stories = Arc::new(next);

        let updated = self.get(id).cloned();
        if let Some(story) = &updated {
            info!(id, interest_count = story.interest_count, "interest registered");
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Venue;

    fn input(title: &str, teaser: &str) -> ValidatedStoryInput {
        ValidatedStoryInput {
            title: title.into(),
            teaser: teaser.into(),
            contact_method: None,
            name: None,
            open_to_sharing: false,
            venue: None,
        }
    }

    fn seeded(counts: &[u32]) -> StoryStore {
        let stories = counts
            .iter()
            .enumerate()
            .map(|(i, &c)| Story {
                id: i as i64 + 1,
                title: format!("story {}", i + 1),
                teaser: "teaser".into(),
                contact_method: None,
                name: None,
                open_to_sharing: false,
                venue: None,
                interest_count: c,
                created_at: Utc::now(),
            })
            .collect();
        StoryStore::with_stories(stories)
    }

    #[test]
    fn add_story_assigns_max_plus_one_and_prepends() {
        let mut store = seeded(&[0, 0, 0]);
        let story = store.add_story(input("New", "Something new"));
        assert_eq!(story.id, 4);
        assert_eq!(story.interest_count, 0);

        let snap = store.snapshot();
        assert_eq!(snap.len(), 4);
        assert_eq!(snap[0].id, 4);
        assert_eq!(snap[0].title, "New");
    }

    #[test]
    fn add_story_into_empty_store_starts_at_one() {
        let mut store = StoryStore::new();
        let story = store.add_story(input("First", "t"));
        assert_eq!(story.id, 1);
    }

    #[test]
    fn add_story_skips_past_id_gaps() {
        let mut stories = seeded(&[0]).snapshot().as_ref().clone();
        stories[0].id = 9;
        let mut store = StoryStore::with_stories(stories);
        let story = store.add_story(input("Next", "t"));
        assert_eq!(story.id, 10);
    }

    #[test]
    fn duplicate_titles_are_allowed() {
        let mut store = StoryStore::new();
        store.add_story(input("Same", "t"));
        let second = store.add_story(input("Same", "t"));
        assert_eq!(second.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn add_story_carries_optional_fields() {
        let mut store = StoryStore::new();
        let story = store.add_story(ValidatedStoryInput {
            title: "T".into(),
            teaser: "S".into(),
            contact_method: Some("my@email".into()),
            name: Some("Maria".into()),
            open_to_sharing: true,
            venue: Some(Venue::MoragaSteps),
        });
        assert_eq!(story.contact_method.as_deref(), Some("my@email"));
        assert_eq!(story.name.as_deref(), Some("Maria"));
        assert!(story.open_to_sharing);
        assert_eq!(story.venue, Some(Venue::MoragaSteps));
    }

    #[test]
    fn increment_interest_bumps_exactly_one_story() {
        let mut store = seeded(&[7, 2, 5]);
        let updated = store.increment_interest(2).unwrap();
        assert_eq!(updated.interest_count, 3);

        let snap = store.snapshot();
        let counts: Vec<u32> = snap.iter().map(|s| s.interest_count).collect();
        assert_eq!(counts, vec![7, 3, 5]);
        assert_eq!(snap[0].title, "story 1");
    }

    #[test]
    fn increment_interest_unknown_id_is_noop() {
        let mut store = seeded(&[1, 1]);
        assert!(store.increment_interest(42).is_none());
        let counts: Vec<u32> = store.snapshot().iter().map(|s| s.interest_count).collect();
        assert_eq!(counts, vec![1, 1]);
    }

    #[test]
    fn snapshots_are_copy_on_write() {
        let mut store = seeded(&[0]);
        let before = store.snapshot();
        store.add_story(input("New", "t"));
        store.increment_interest(1);

        assert_eq!(before.len(), 1);
        assert_eq!(before[0].interest_count, 0);
        assert_eq!(store.snapshot().len(), 2);
        assert_eq!(store.get(1).unwrap().interest_count, 1);
    }
}
