pub mod carpool;
pub mod duty;
pub mod event;
pub mod notification;
pub mod team;

// Re-export all repositories for easy importing
pub use carpool::CarpoolRepository;
pub use duty::DutyRepository;
pub use event::{EventRepository, NewEvent};
pub use notification::NotificationRepository;
pub use team::TeamRepository;
