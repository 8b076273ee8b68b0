pub mod carpools;
pub mod events;
pub mod notifications;
pub mod shared;
pub mod teams;
