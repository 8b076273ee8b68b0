use actix_web::web;

use crate::handlers::notifications;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notifications").route("/{id}/read", web::post().to(notifications::mark_read)),
    );
}
