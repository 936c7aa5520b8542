pub mod args;
pub mod display;
pub mod handlers;
