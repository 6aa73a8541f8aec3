//! Wire models outside the order aggregate

pub mod notification;

pub use notification::{Notification, NotificationKind};
