use actix_web::web;

use crate::handlers::carpools;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/carpools")
            .route("/{id}", web::get().to(carpools::get_carpool))
            .route("/{id}/requests", web::post().to(carpools::request_ride))
            .route(
                "/{id}/requests/{rider_id}",
                web::delete().to(carpools::cancel_ride),
            )
            .route("/{id}/route", web::post().to(carpools::compute_route))
            .route("/{id}/schedule", web::get().to(carpools::get_schedule))
            .route("/{id}/start", web::post().to(carpools::start_pickups))
            .route("/{id}/complete", web::post().to(carpools::complete_trip)),
    );
}
