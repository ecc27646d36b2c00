//! Notification channel resource: the tagged channel model and the
//! list/create/delete operations under `/api/v0/channels`.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Result;

/// Per-severity custom message text attached to a Slack channel.
///
/// Fields absent on the wire decode to the empty string; an all-empty
/// value is omitted entirely when encoding a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentions {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ok: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub warning: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub critical: String,
}

impl Mentions {
    /// True when no severity has custom text.
    pub fn is_empty(&self) -> bool {
        self.ok.is_empty() && self.warning.is_empty() && self.critical.is_empty()
    }
}

/// Variant payload of a channel, discriminated by the wire `type` field.
///
/// Exactly one variant is active per channel; wire fields irrelevant to
/// the active variant are omitted by the server and never surface here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelValue {
    Email {
        emails: Vec<String>,
        user_ids: Vec<String>,
        events: Vec<String>,
    },
    Slack {
        url: String,
        mentions: Mentions,
        enabled_graph_image: bool,
        events: Vec<String>,
    },
    Webhook {
        url: String,
        events: Vec<String>,
    },
    Line,
    /// A channel type this client does not know yet. The raw tag is kept
    /// so the record still round-trips through its name and type; variant
    /// fields are dropped.
    Unknown { channel_type: String },
}

impl ChannelValue {
    /// Wire value of the `type` discriminator.
    pub fn channel_type(&self) -> &str {
        match self {
            ChannelValue::Email { .. } => "email",
            ChannelValue::Slack { .. } => "slack",
            ChannelValue::Webhook { .. } => "webhook",
            ChannelValue::Line => "line",
            ChannelValue::Unknown { channel_type } => channel_type,
        }
    }

    /// Destination URL of a slack or webhook channel, empty for the rest.
    pub fn url(&self) -> &str {
        match self {
            ChannelValue::Slack { url, .. } | ChannelValue::Webhook { url, .. } => url,
            _ => "",
        }
    }

    /// Event names this channel is notified about, empty when the variant
    /// carries none.
    pub fn events(&self) -> &[String] {
        match self {
            ChannelValue::Email { events, .. }
            | ChannelValue::Slack { events, .. }
            | ChannelValue::Webhook { events, .. } => events,
            _ => &[],
        }
    }

    /// Recipient addresses of an email channel, empty for other variants.
    pub fn emails(&self) -> &[String] {
        match self {
            ChannelValue::Email { emails, .. } => emails,
            _ => &[],
        }
    }

    /// Recipient user ids of an email channel, empty for other variants.
    pub fn user_ids(&self) -> &[String] {
        match self {
            ChannelValue::Email { user_ids, .. } => user_ids,
            _ => &[],
        }
    }
}

/// A configured notification channel as returned by the server.
///
/// Immutable value object; the id is server-assigned and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ChannelWire", into = "ChannelWire")]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub value: ChannelValue,
}

impl Channel {
    /// Wire value of the `type` discriminator.
    pub fn channel_type(&self) -> &str {
        self.value.channel_type()
    }
}

/// A channel registration request: everything a [`Channel`] has except
/// the server-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ChannelWire", into = "ChannelWire")]
pub struct NewChannel {
    pub name: String,
    pub value: ChannelValue,
}

/// Flat wire shape shared by every variant. All variant fields are
/// optional here; the `type` dispatch into [`ChannelValue`] happens in
/// exactly one place each way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    channel_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    emails: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    events: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mentions: Option<Mentions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enabled_graph_image: Option<bool>,
}

impl ChannelValue {
    /// Per-variant field extraction. Absent fields take their zero value;
    /// an unrecognized tag falls back to [`ChannelValue::Unknown`] instead
    /// of failing, so lists containing newer server-side channel types
    /// still decode.
    fn from_wire(wire: ChannelWire) -> Self {
        match wire.channel_type.as_str() {
            "email" => ChannelValue::Email {
                emails: wire.emails.unwrap_or_default(),
                user_ids: wire.user_ids.unwrap_or_default(),
                events: wire.events.unwrap_or_default(),
            },
            "slack" => ChannelValue::Slack {
                url: wire.url.unwrap_or_default(),
                mentions: wire.mentions.unwrap_or_default(),
                enabled_graph_image: wire.enabled_graph_image.unwrap_or_default(),
                events: wire.events.unwrap_or_default(),
            },
            "webhook" => ChannelValue::Webhook {
                url: wire.url.unwrap_or_default(),
                events: wire.events.unwrap_or_default(),
            },
            "line" => ChannelValue::Line,
            _ => ChannelValue::Unknown {
                channel_type: wire.channel_type,
            },
        }
    }

    /// Emits only the fields meaningful to the active variant. An
    /// all-empty `mentions` is left off the wire.
    fn into_wire(self, id: Option<String>, name: String) -> ChannelWire {
        let channel_type = self.channel_type().to_string();
        let mut wire = ChannelWire {
            id,
            name,
            channel_type,
            ..ChannelWire::default()
        };
        match self {
            ChannelValue::Email {
                emails,
                user_ids,
                events,
            } => {
                wire.emails = Some(emails);
                wire.user_ids = Some(user_ids);
                wire.events = Some(events);
            }
            ChannelValue::Slack {
                url,
                mentions,
                enabled_graph_image,
                events,
            } => {
                wire.url = Some(url);
                if !mentions.is_empty() {
                    wire.mentions = Some(mentions);
                }
                wire.enabled_graph_image = Some(enabled_graph_image);
                wire.events = Some(events);
            }
            ChannelValue::Webhook { url, events } => {
                wire.url = Some(url);
                wire.events = Some(events);
            }
            ChannelValue::Line | ChannelValue::Unknown { .. } => {}
        }
        wire
    }
}

impl From<ChannelWire> for Channel {
    fn from(wire: ChannelWire) -> Self {
        Channel {
            id: wire.id.clone().unwrap_or_default(),
            name: wire.name.clone(),
            value: ChannelValue::from_wire(wire),
        }
    }
}

impl From<Channel> for ChannelWire {
    fn from(channel: Channel) -> Self {
        channel.value.into_wire(Some(channel.id), channel.name)
    }
}

impl From<ChannelWire> for NewChannel {
    fn from(wire: ChannelWire) -> Self {
        NewChannel {
            name: wire.name.clone(),
            value: ChannelValue::from_wire(wire),
        }
    }
}

impl From<NewChannel> for ChannelWire {
    fn from(channel: NewChannel) -> Self {
        channel.value.into_wire(None, channel.name)
    }
}

/// List envelope of `GET /api/v0/channels`.
#[derive(Deserialize)]
struct ListChannelsResponse {
    channels: Vec<Channel>,
}

impl Client {
    /// Fetches all notification channels of the organization.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Decode`] if any element of the list fails
    /// to decode; there is no partial result.
    pub async fn list_channels(&self) -> Result<Vec<Channel>> {
        let response: ListChannelsResponse = self.get_json("/api/v0/channels").await?;
        Ok(response.channels)
    }

    /// Registers a new notification channel. The server assigns the id.
    pub async fn create_channel(&self, channel: &NewChannel) -> Result<Channel> {
        self.post_json("/api/v0/channels", channel).await
    }

    /// Deletes a channel by id. The server echoes the deleted record back.
    pub async fn delete_channel(&self, channel_id: &str) -> Result<Channel> {
        self.delete_json(&format!("/api/v0/channels/{channel_id}"))
            .await
    }
}
