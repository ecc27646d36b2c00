//! Notification group resource: groups bundle channels (by id) and scope
//! them to monitors or services, under `/api/v0/notification-groups`.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;

/// Which alert severities a group is notified about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    All,
    Critical,
}

/// Monitor scope entry of a notification group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationGroupMonitor {
    pub id: String,
    pub skip_default: bool,
}

/// Service scope entry of a notification group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationGroupService {
    pub name: String,
}

/// A notification group as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationGroup {
    pub id: String,
    pub name: String,
    pub notification_level: NotificationLevel,
    #[serde(default)]
    pub child_notification_group_ids: Vec<String>,
    #[serde(default)]
    pub child_channel_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub monitors: Vec<NotificationGroupMonitor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<NotificationGroupService>,
}

/// A group creation/update request; the id is server-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotificationGroup {
    pub name: String,
    pub notification_level: NotificationLevel,
    #[serde(default)]
    pub child_notification_group_ids: Vec<String>,
    #[serde(default)]
    pub child_channel_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub monitors: Vec<NotificationGroupMonitor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<NotificationGroupService>,
}

/// List envelope of `GET /api/v0/notification-groups`.
#[derive(Deserialize)]
struct ListNotificationGroupsResponse {
    #[serde(rename = "notificationGroups")]
    notification_groups: Vec<NotificationGroup>,
}

impl Client {
    /// Fetches all notification groups of the organization.
    pub async fn list_notification_groups(&self) -> Result<Vec<NotificationGroup>> {
        let response: ListNotificationGroupsResponse =
            self.get_json("/api/v0/notification-groups").await?;
        Ok(response.notification_groups)
    }

    /// Creates a notification group. The server assigns the id.
    pub async fn create_notification_group(
        &self,
        group: &NewNotificationGroup,
    ) -> Result<NotificationGroup> {
        self.post_json("/api/v0/notification-groups", group).await
    }

    /// Replaces the definition of an existing group.
    pub async fn update_notification_group(
        &self,
        group_id: &str,
        group: &NewNotificationGroup,
    ) -> Result<NotificationGroup> {
        self.put_json(&format!("/api/v0/notification-groups/{group_id}"), group)
            .await
    }

    /// Deletes a group by id. The server echoes the deleted record back.
    pub async fn delete_notification_group(&self, group_id: &str) -> Result<NotificationGroup> {
        self.delete_json(&format!("/api/v0/notification-groups/{group_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn group_decodes_with_absent_scopes_defaulting_to_empty() {
        let group: NotificationGroup = serde_json::from_value(json!({
            "id": "gAbCdEf",
            "name": "on-call",
            "notificationLevel": "critical",
            "childNotificationGroupIds": [],
            "childChannelIds": ["abcdefabc"],
        }))
        .unwrap();

        assert_eq!(group.notification_level, NotificationLevel::Critical);
        assert_eq!(group.child_channel_ids, ["abcdefabc"]);
        assert!(group.monitors.is_empty());
        assert!(group.services.is_empty());
    }

    #[test]
    fn new_group_encoding_omits_empty_scopes() {
        let encoded = serde_json::to_value(NewNotificationGroup {
            name: "on-call".to_string(),
            notification_level: NotificationLevel::All,
            child_notification_group_ids: vec![],
            child_channel_ids: vec!["abcdefabc".to_string()],
            monitors: vec![],
            services: vec![],
        })
        .unwrap();

        assert_eq!(
            encoded,
            json!({
                "name": "on-call",
                "notificationLevel": "all",
                "childNotificationGroupIds": [],
                "childChannelIds": ["abcdefabc"],
            })
        );
    }

    #[test]
    fn monitor_scope_round_trips_skip_default() {
        let monitor: NotificationGroupMonitor =
            serde_json::from_value(json!({"id": "mon1", "skipDefault": true})).unwrap();
        assert!(monitor.skip_default);
        assert_eq!(
            serde_json::to_value(&monitor).unwrap(),
            json!({"id": "mon1", "skipDefault": true})
        );
    }
}
