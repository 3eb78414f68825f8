pub mod account;
pub mod booking;
pub mod event;
pub mod health;
pub mod review;
