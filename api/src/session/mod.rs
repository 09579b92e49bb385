pub mod gate;
pub mod in_flight;
pub mod role;
pub mod store;
