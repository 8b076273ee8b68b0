use actix_web::web;

use crate::handlers::{carpools, events};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/events")
            .route("", web::post().to(events::create_event))
            .route("", web::get().to(events::get_events))
            .route("/{id}", web::get().to(events::get_event))
            .route("/{id}/suggestions", web::get().to(events::get_suggestions))
            .route("/{id}/duties", web::post().to(events::create_duty))
            .route("/{id}/duties", web::get().to(events::get_duties))
            .route("/{id}/carpools", web::post().to(carpools::offer_ride))
            .route(
                "/{id}/carpools",
                web::get().to(carpools::get_carpools_for_event),
            ),
    )
    .service(web::scope("/duties").route("/{id}/claim", web::post().to(events::claim_duty)));
}
