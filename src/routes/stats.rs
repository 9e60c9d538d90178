use actix_web::{get, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::handlers::stats::player_stats_handler;
use crate::models::stats::PlayerStatsQuery;

/// Career totals per player, goals-first (paginated)
#[get("/players/stats")]
async fn get_player_stats(
    query: web::Query<PlayerStatsQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    player_stats_handler::get_player_stats(query, pool).await
}
