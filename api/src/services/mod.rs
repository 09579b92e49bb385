pub mod redis_service;
pub mod session_fairing;
pub mod user_service;
