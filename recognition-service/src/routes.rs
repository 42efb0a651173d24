//! Route configuration
//!
//! Centralized route setup; each domain manages its own routes.

use crate::handlers;
use crate::metrics;
use crate::middleware::JwtAuthMiddleware;
use actix_web::web;

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Prometheus metrics endpoint
        .route("/metrics", web::get().to(metrics::metrics_handler))
        // API routes
        .service(
            web::scope("/api/v1")
                .route("/health", web::get().to(handlers::health_check))
                .route("/health/ready", web::get().to(handlers::readiness_check))
                .route("/health/live", web::get().to(handlers::liveness_check))
                // Modular route configuration
                .configure(routes::auth::configure)
                .configure(routes::users::configure)
                .configure(routes::admin::configure)
                .configure(routes::security_keys::configure)
                .configure(routes::shoutouts::configure)
                .configure(routes::notifications::configure)
                .configure(routes::employee_of_month::configure)
                .configure(routes::stats::configure),
        );
}

// Sub-modules for each domain
mod routes {
    use super::*;

    pub mod auth {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/auth")
                    .route("/register", web::post().to(handlers::register))
                    .route("/login", web::post().to(handlers::login))
                    .route("/refresh", web::post().to(handlers::refresh))
                    .route("/logout", web::post().to(handlers::logout)),
            );
        }
    }

    pub mod users {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/users")
                    .wrap(JwtAuthMiddleware)
                    .route("/me", web::get().to(handlers::get_current_user))
                    .route("/me", web::patch().to(handlers::update_profile))
                    .route(
                        "/department",
                        web::get().to(handlers::department_colleagues),
                    ),
            );
        }
    }

    pub mod admin {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/admin")
                    .wrap(JwtAuthMiddleware)
                    .route("/employees", web::get().to(handlers::list_employees))
                    .route(
                        "/employees/{id}",
                        web::delete().to(handlers::delete_employee),
                    )
                    .route(
                        "/employees/{id}/suspend",
                        web::patch().to(handlers::suspend_employee),
                    )
                    .route("/admins", web::get().to(handlers::list_admins))
                    .route("/admins/{id}", web::delete().to(handlers::delete_admin))
                    .route("/dashboard", web::get().to(handlers::dashboard_summary)),
            );
        }
    }

    pub mod security_keys {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/security-keys")
                    .wrap(JwtAuthMiddleware)
                    .route("", web::post().to(handlers::create_security_key))
                    .route("", web::get().to(handlers::list_security_keys))
                    .route("/{id}", web::delete().to(handlers::delete_security_key)),
            );
        }
    }

    pub mod shoutouts {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            // Literal segments registered before {id} captures
            cfg.service(
                web::scope("/shoutouts")
                    .wrap(JwtAuthMiddleware)
                    .route("", web::post().to(handlers::create_shoutout))
                    .route("/feed", web::get().to(handlers::get_feed))
                    .route("/mine", web::get().to(handlers::my_shoutouts))
                    .route("/moderation", web::get().to(handlers::moderation_list))
                    .route("/reported", web::get().to(handlers::reported_list))
                    .route("/{id}", web::put().to(handlers::update_shoutout))
                    .route("/{id}", web::delete().to(handlers::delete_shoutout))
                    .route("/{id}/react", web::post().to(handlers::react_to_shoutout))
                    .route("/{id}/comments", web::post().to(handlers::add_comment))
                    .route("/{id}/comments", web::get().to(handlers::list_comments))
                    .route("/{id}/report", web::put().to(handlers::report_shoutout)),
            );
        }
    }

    pub mod notifications {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/notifications")
                    .wrap(JwtAuthMiddleware)
                    .route("", web::post().to(handlers::create_notification))
                    .route("", web::get().to(handlers::list_notifications)),
            );
        }
    }

    pub mod employee_of_month {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/employee-of-month")
                    .wrap(JwtAuthMiddleware)
                    .route("", web::get().to(handlers::latest))
                    .route("", web::post().to(handlers::announce))
                    .route("/history", web::get().to(handlers::history)),
            );
        }
    }

    pub mod stats {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/stats")
                    .wrap(JwtAuthMiddleware)
                    .route("/me", web::get().to(handlers::my_stats))
                    .route("/leaderboard", web::get().to(handlers::leaderboard))
                    .route("/daily-activity", web::get().to(handlers::daily_activity))
                    .route("/most-liked", web::get().to(handlers::most_liked)),
            );
        }
    }
}
