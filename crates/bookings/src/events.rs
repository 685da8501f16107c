//! Event management — draft/publish/cancel lifecycle for bookable events.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Event lifecycle status. Cancelled is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
}

/// A bookable event hosted by a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteEvent {
    pub id: Uuid,
    pub site_id: Uuid,
    pub title: String,
    pub description: String,
    pub venue: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub capacity: u32,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event manager backed by DashMap.
pub struct EventManager {
    events: DashMap<Uuid, SiteEvent>,
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EventManager {
    pub fn new() -> Self {
        Self {
            events: DashMap::new(),
        }
    }

    /// Create a draft event. The end time must follow the start time.
    #[allow(clippy::too_many_arguments)]
    pub fn create_event(
        &self,
        site_id: Uuid,
        title: impl Into<String>,
        description: impl Into<String>,
        venue: impl Into<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        capacity: u32,
    ) -> anyhow::Result<SiteEvent> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(anyhow::anyhow!("Event title must not be empty"));
        }
        if ends_at <= starts_at {
            return Err(anyhow::anyhow!("Event must end after it starts"));
        }

        let now = Utc::now();
        let event = SiteEvent {
            id: Uuid::new_v4(),
            site_id,
            title: title.clone(),
            description: description.into(),
            venue: venue.into(),
            starts_at,
            ends_at,
            capacity,
            status: EventStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        info!(event_id = %event.id, site_id = %site_id, title = %title, "Event drafted");
        self.events.insert(event.id, event.clone());
        Ok(event)
    }

    pub fn get_event(&self, id: Uuid) -> Option<SiteEvent> {
        self.events.get(&id).map(|e| e.value().clone())
    }

    /// All events for a site, soonest first.
    pub fn list_for_site(&self, site_id: Uuid) -> Vec<SiteEvent> {
        let mut events: Vec<_> = self
            .events
            .iter()
            .filter(|e| e.value().site_id == site_id)
            .map(|e| e.value().clone())
            .collect();
        events.sort_by(|a, b| a.starts_at.cmp(&b.starts_at));
        events
    }

    /// Published events for a site that have not yet started.
    pub fn upcoming_for_site(&self, site_id: Uuid) -> Vec<SiteEvent> {
        let now = Utc::now();
        let mut events: Vec<_> = self
            .events
            .iter()
            .filter(|e| {
                let ev = e.value();
                ev.site_id == site_id
                    && ev.status == EventStatus::Published
                    && ev.starts_at > now
            })
            .map(|e| e.value().clone())
            .collect();
        events.sort_by(|a, b| a.starts_at.cmp(&b.starts_at));
        events
    }

    /// Publish a draft. Requires a future start time and nonzero capacity.
    pub fn publish(&self, id: Uuid) -> anyhow::Result<SiteEvent> {
        let mut entry = self
            .events
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("Event not found: {id}"))?;
        if entry.status != EventStatus::Draft {
            return Err(anyhow::anyhow!(
                "Only draft events can be published, event is {:?}",
                entry.status
            ));
        }
        if entry.starts_at <= Utc::now() {
            return Err(anyhow::anyhow!("Cannot publish an event in the past"));
        }
        if entry.capacity == 0 {
            return Err(anyhow::anyhow!("Cannot publish an event with no capacity"));
        }
        entry.status = EventStatus::Published;
        entry.updated_at = Utc::now();
        info!(event_id = %id, "Event published");
        Ok(entry.clone())
    }

    /// Cancel an event. Terminal: a cancelled event never leaves that state.
    pub fn cancel(&self, id: Uuid) -> anyhow::Result<SiteEvent> {
        let mut entry = self
            .events
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("Event not found: {id}"))?;
        if entry.status == EventStatus::Cancelled {
            return Err(anyhow::anyhow!("Event is already cancelled"));
        }
        entry.status = EventStatus::Cancelled;
        entry.updated_at = Utc::now();
        info!(event_id = %id, "Event cancelled");
        Ok(entry.clone())
    }

    /// Move an event to new times. Cancelled events cannot be rescheduled.
    pub fn reschedule(
        &self,
        id: Uuid,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> anyhow::Result<SiteEvent> {
        if ends_at <= starts_at {
            return Err(anyhow::anyhow!("Event must end after it starts"));
        }
        let mut entry = self
            .events
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("Event not found: {id}"))?;
        if entry.status == EventStatus::Cancelled {
            return Err(anyhow::anyhow!("Cancelled events cannot be rescheduled"));
        }
        entry.starts_at = starts_at;
        entry.ends_at = ends_at;
        entry.updated_at = Utc::now();
        info!(event_id = %id, "Event rescheduled");
        Ok(entry.clone())
    }

    pub fn delete_event(&self, id: Uuid) -> bool {
        let removed = self.events.remove(&id).is_some();
        if removed {
            info!(event_id = %id, "Event deleted");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn draft(mgr: &EventManager, site: Uuid, days_out: i64, capacity: u32) -> SiteEvent {
        let starts = Utc::now() + Duration::days(days_out);
        mgr.create_event(
            site,
            "Tasting Night",
            "An evening tasting",
            "Main Hall",
            starts,
            starts + Duration::hours(3),
            capacity,
        )
        .unwrap()
    }

    #[test]
    fn test_create_validates_times() {
        let mgr = EventManager::new();
        let starts = Utc::now() + Duration::days(1);
        let result = mgr.create_event(
            Uuid::new_v4(),
            "Backwards",
            "",
            "",
            starts,
            starts - Duration::hours(1),
            10,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_publish_lifecycle() {
        let mgr = EventManager::new();
        let site = Uuid::new_v4();
        let event = draft(&mgr, site, 7, 40);

        let published = mgr.publish(event.id).unwrap();
        assert_eq!(published.status, EventStatus::Published);

        // Publishing twice fails.
        assert!(mgr.publish(event.id).is_err());

        assert_eq!(mgr.upcoming_for_site(site).len(), 1);
    }

    #[test]
    fn test_publish_requires_capacity_and_future_start() {
        let mgr = EventManager::new();
        let site = Uuid::new_v4();

        let empty = draft(&mgr, site, 7, 0);
        assert!(mgr.publish(empty.id).is_err());

        let past = draft(&mgr, site, -1, 10);
        assert!(mgr.publish(past.id).is_err());
    }

    #[test]
    fn test_cancel_is_terminal() {
        let mgr = EventManager::new();
        let event = draft(&mgr, Uuid::new_v4(), 7, 10);

        mgr.cancel(event.id).unwrap();
        assert!(mgr.cancel(event.id).is_err());
        let later = Utc::now() + Duration::days(14);
        assert!(mgr
            .reschedule(event.id, later, later + Duration::hours(2))
            .is_err());
    }

    #[test]
    fn test_list_sorted_by_start() {
        let mgr = EventManager::new();
        let site = Uuid::new_v4();
        draft(&mgr, site, 14, 10);
        draft(&mgr, site, 7, 10);

        let listed = mgr.list_for_site(site);
        assert_eq!(listed.len(), 2);
        assert!(listed[0].starts_at < listed[1].starts_at);
    }
}
