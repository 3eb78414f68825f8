pub mod account;
pub mod association;
pub mod booking;
pub mod event;
pub mod event_state;
pub mod review;
