pub mod player_stats_handler;
