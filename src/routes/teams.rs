use actix_web::web;

use crate::handlers::{notifications, teams};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/teams")
            .route("", web::post().to(teams::create_team))
            .route("/{id}", web::get().to(teams::get_team))
            .route("/{id}/roster", web::post().to(teams::add_roster_entry))
            .route("/{id}/roster", web::get().to(teams::get_roster))
            .route(
                "/{id}/notifications",
                web::get().to(notifications::get_notifications),
            ),
    );
}
