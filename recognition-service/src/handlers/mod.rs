pub mod admin;
pub mod auth;
pub mod employee_of_month;
pub mod health;
pub mod notifications;
pub mod security_keys;
pub mod shoutouts;
pub mod stats;
pub mod users;

pub use admin::{
    dashboard_summary, delete_admin, delete_employee, list_admins, list_employees,
    suspend_employee,
};
pub use auth::{login, logout, refresh, register};
pub use employee_of_month::{announce, history, latest};
pub use health::{health_check, liveness_check, readiness_check};
pub use notifications::{create_notification, list_notifications};
pub use security_keys::{create_security_key, delete_security_key, list_security_keys};
pub use shoutouts::{
    add_comment, create_shoutout, delete_shoutout, get_feed, list_comments, moderation_list,
    my_shoutouts, react_to_shoutout, report_shoutout, reported_list, update_shoutout,
};
pub use stats::{daily_activity, leaderboard, most_liked, my_stats};
pub use users::{department_colleagues, get_current_user, update_profile};
