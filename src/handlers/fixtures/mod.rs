pub mod booking_handler;
pub mod fixture_handler;
