//! Activity list rendering
//!
//! Turns the backend's activity map into display-ready cards. Pure, so every
//! front-end renders the same thing from the same fetch.

use crate::api::ActivityMap;

/// One participant line of a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub email: String,
    /// Whether an unregister control is shown next to the email
    pub removable: bool,
}

/// Display model of a single activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub spots_left: i64,
    pub participants: Vec<ParticipantRow>,
}

impl ActivityCard {
    pub fn availability(&self) -> String {
        format!("{} spots left", self.spots_left)
    }

    pub fn has_participants(&self) -> bool {
        !self.participants.is_empty()
    }
}

/// The full rendered list, replacing whatever was shown before
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityListing {
    pub cards: Vec<ActivityCard>,
}

impl ActivityListing {
    /// Choices for the signup form's activity selector
    pub fn activity_names(&self) -> impl Iterator<Item = &str> {
        self.cards.iter().map(|card| card.name.as_str())
    }

    pub fn card(&self, name: &str) -> Option<&ActivityCard> {
        self.cards.iter().find(|card| card.name == name)
    }

    /// Number of unregister controls across all cards
    pub fn removable_count(&self) -> usize {
        self.cards
            .iter()
            .flat_map(|card| &card.participants)
            .filter(|row| row.removable)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Render every activity exactly once, in server order.
///
/// Unregister controls appear only when `session_active`.
pub fn render_activities(activities: &ActivityMap, session_active: bool) -> ActivityListing {
    let cards = activities
        .iter()
        .map(|(name, details)| ActivityCard {
            name: name.clone(),
            description: details.description.clone(),
            schedule: details.schedule.clone(),
            max_participants: details.max_participants,
            spots_left: details.spots_left(),
            participants: details
                .participants
                .iter()
                .map(|email| ParticipantRow {
                    email: email.clone(),
                    removable: session_active,
                })
                .collect(),
        })
        .collect();

    ActivityListing { cards }
}
