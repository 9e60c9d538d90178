pub mod results_handler;
