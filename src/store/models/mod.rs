pub mod carpool;
pub mod duty;
pub mod event;
pub mod location;
pub mod notification;
pub mod team;

pub use carpool::{
    Carpool, Passenger, PassengerStatus, RideRequestInput, RoutePlan, TripState,
};
pub use duty::{Duty, DutyClaimInput, DutyInput, DutyKind};
pub use event::{Event, EventInput, EventKind, RecurrenceInput, RecurrenceTag};
pub use location::{Coordinates, Location};
pub use notification::{Notification, NotificationInput, NotificationKind};
pub use team::{RosterEntry, RosterEntryInput, Team, TeamInput};
