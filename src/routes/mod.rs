use actix_web::web;

pub mod carpools;
pub mod events;
pub mod notifications;
pub mod teams;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(teams::configure)
            .configure(events::configure)
            .configure(carpools::configure)
            .configure(notifications::configure),
    );
}
