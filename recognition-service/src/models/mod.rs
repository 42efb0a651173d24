pub mod employee_of_month;
pub mod notification;
pub mod security_key;
pub mod shoutout;
pub mod user;

pub use employee_of_month::EmployeeOfMonth;
pub use notification::Notification;
pub use security_key::SecurityKey;
pub use shoutout::{ShoutOut, ShoutOutComment, ShoutOutReaction, ShoutOutTag};
pub use user::{User, UserSummary};
