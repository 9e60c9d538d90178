pub mod fixture_queries;
