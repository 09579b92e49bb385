pub mod booking;
pub mod response;
pub mod user;
