use log::{info, warn};

use crate::models::Event;

use super::state::{CreateEventState, ViewState};
use super::RevlineApp;

impl RevlineApp {
    pub(super) fn handle_events_loaded(&mut self, result: Result<Vec<Event>, anyhow::Error>) {
        self.events.loading = false;
        match result {
            Ok(mut events) => {
                events.sort_by(|a, b| {
                    (a.event_date.as_str(), a.event_time.as_str())
                        .cmp(&(b.event_date.as_str(), b.event_time.as_str()))
                });
                self.events.events = events;
            }
            Err(err) => {
                self.events.error = Some(err.to_string());
            }
        }
    }

    pub(super) fn handle_event_created(&mut self, result: Result<Event, anyhow::Error>) {
        self.create_event.submitting = false;
        match result {
            Ok(mut event) => {
                info!("created event {}", event.id);
                if event.user.is_none() {
                    event.user = self.session.user().map(|u| u.summary());
                }
                self.events.events.insert(0, event);
                self.create_event = CreateEventState::default();
                self.show_create_event = false;
                self.view = ViewState::Events;
                self.info_banner = Some("Event created".into());
            }
            Err(err) => {
                self.create_event.error = Some(err.to_string());
            }
        }
    }

    pub(super) fn handle_event_joined(
        &mut self,
        event_id: String,
        result: Result<(), anyhow::Error>,
    ) {
        self.events.pending.remove(&event_id);
        if let Err(err) = result {
            warn!("join failed for event {event_id}: {err:#}");
            if let Some(event) = self.events.events.iter_mut().find(|e| e.id == event_id) {
                revert_join(event);
            }
            self.events.error = Some(err.to_string());
        }
    }

    pub(super) fn handle_event_left(
        &mut self,
        event_id: String,
        result: Result<(), anyhow::Error>,
    ) {
        self.events.pending.remove(&event_id);
        if let Err(err) = result {
            warn!("leave failed for event {event_id}: {err:#}");
            if let Some(event) = self.events.events.iter_mut().find(|e| e.id == event_id) {
                revert_leave(event);
            }
            self.events.error = Some(err.to_string());
        }
    }
}

pub(super) fn apply_join(event: &mut Event) {
    event.user_joined = true;
    event.participants_count += 1;
}

pub(super) fn revert_join(event: &mut Event) {
    event.user_joined = false;
    event.participants_count = event.participants_count.saturating_sub(1);
}

pub(super) fn apply_leave(event: &mut Event) {
    event.user_joined = false;
    event.participants_count = event.participants_count.saturating_sub(1);
}

pub(super) fn revert_leave(event: &mut Event) {
    event.user_joined = true;
    event.participants_count += 1;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::models::EventType;

    use super::*;

    fn event(count: u32, joined: bool) -> Event {
        Event {
            id: "e1".into(),
            user_id: "u1".into(),
            user: None,
            title: "Sunday cars and coffee".into(),
            description: "bring anything".into(),
            event_date: "2024-06-02".into(),
            event_time: "09:00".into(),
            location: "Old mill lot".into(),
            event_type: EventType::CarMeet,
            max_participants: None,
            participants: vec![],
            participants_count: count,
            user_joined: joined,
            images: vec![],
            created_at: "2024-05-01T00:00:00Z".into(),
            updated_at: None,
        }
    }

    #[test]
    fn join_rollback_restores_the_event() {
        let mut e = event(3, false);
        apply_join(&mut e);
        assert_eq!(e.participants_count, 4);
        assert!(e.user_joined);
        revert_join(&mut e);
        assert_eq!(e.participants_count, 3);
        assert!(!e.user_joined);
    }

    #[test]
    fn leave_rollback_restores_the_event() {
        let mut e = event(3, true);
        apply_leave(&mut e);
        assert_eq!(e.participants_count, 2);
        assert!(!e.user_joined);
        revert_leave(&mut e);
        assert_eq!(e.participants_count, 3);
        assert!(e.user_joined);
    }

    #[test]
    fn leave_saturates_at_zero() {
        let mut e = event(0, true);
        apply_leave(&mut e);
        assert_eq!(e.participants_count, 0);
    }
}
