pub mod assignment;
pub mod lifecycle;
pub mod notifier;
pub mod pickup_plan;
pub mod schedule;

pub use lifecycle::LifecycleService;
pub use notifier::Notifier;
