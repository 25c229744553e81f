pub mod address;
pub mod block;
pub mod notification;
pub mod transaction;
pub mod types;
pub mod webhook;

pub use address::{Address, Balance};
pub use block::Block;
pub use notification::{Notification, NotificationType};
pub use transaction::{Input, Output, Transaction};
pub use types::Network;
pub use webhook::{Webhook, WebhookEvent, WebhookEventType};
