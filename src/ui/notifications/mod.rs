// SPDX-License-Identifier: MPL-2.0
//! Toast notifications.
//!
//! Gallery load failures, download results and comment posting report back
//! through short-lived toasts: 3 s for success and info, 5 s for warnings,
//! manual dismissal for errors. At most three are visible at once.
//!
//! ```ignore
//! manager.push(Notification::success("notification-download-success").with_arg("name", name));
//! let overlay = Toast::view_overlay(&manager, &i18n).map(Message::Notification);
//! ```

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage, MAX_VISIBLE};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
