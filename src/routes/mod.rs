use actix_web::web;

pub mod backend_health;
pub mod booking;
pub mod fixtures;
pub mod results;
pub mod stats;

use crate::middleware::admin::AdminMiddleware;
use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // Public read surface
    cfg.service(fixtures::list_fixtures)
        .service(fixtures::get_fixture)
        .service(results::get_results)
        .service(stats::get_player_stats);

    // Booking routes (require authentication)
    cfg.service(
        web::scope("/booking")
            .wrap(AuthMiddleware)
            .service(booking::book_slot)
            .service(booking::unbook_slot),
    );

    // Admin routes (require admin role)
    cfg.service(
        web::scope("/admin")
            .wrap(AdminMiddleware)
            .service(fixtures::create_fixture)
            .service(fixtures::delete_fixture)
            .service(results::submit_results),
    );
}
