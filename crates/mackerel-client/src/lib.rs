//! Typed client for the Mackerel monitoring service's REST API (v0).
//!
//! Covers the notification channel resource (email, Slack, webhook, LINE)
//! and the notification groups that reference channels by id. Each call is
//! a single authenticated HTTP round trip; responses decode into explicit
//! sum types rather than bags of optional fields.
//!
//! ```rust,no_run
//! use mackerel_client::{ChannelValue, Client, Mentions, NewChannel};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mackerel_client::Error> {
//!     let client = Client::new("your-api-key")?;
//!
//!     let channel = client
//!         .create_channel(&NewChannel {
//!             name: "ops alerts".to_string(),
//!             value: ChannelValue::Slack {
//!                 url: "https://hooks.slack.com/services/T0/B0/XXXX".to_string(),
//!                 mentions: Mentions::default(),
//!                 enabled_graph_image: true,
//!                 events: vec!["alert".to_string()],
//!             },
//!         })
//!         .await?;
//!
//!     println!("created channel {}", channel.id);
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod client;
pub mod error;
pub mod notification_group;

pub use channel::{Channel, ChannelValue, Mentions, NewChannel};
pub use client::Client;
pub use error::{Error, Result};
pub use notification_group::{
    NewNotificationGroup, NotificationGroup, NotificationGroupMonitor, NotificationGroupService,
    NotificationLevel,
};
