use std::sync::Arc;

use actix_web::{App, web};
use async_trait::async_trait;
use chrono::NaiveDate;
use fake::Fake;
use fake::faker::name::en::Name;
use uuid::Uuid;

use teampool_be::ports::geocoding::{GeocodeError, GeocodingPort};
use teampool_be::ports::routing::{RouteRequest, RouteResponse, RoutingError, RoutingPort};
use teampool_be::store::init_store;
use teampool_be::store::models::*;
use teampool_be::store::repositories::*;
use teampool_be::{AppState, LifecycleService, Notifier};

/// Seconds per leg produced by the in-order fake solver.
pub const FAKE_LEG_SECS: u32 = 300;

/// Routing fake: visits pickups in the order given, five minutes per leg.
pub struct InOrderRouting;

#[async_trait]
impl RoutingPort for InOrderRouting {
    async fn optimize(&self, request: &RouteRequest) -> Result<RouteResponse, RoutingError> {
        if request.pickups.is_empty() {
            return Err(RoutingError::EmptyRequest);
        }
        let legs = request.pickups.len() + 1;
        Ok(RouteResponse {
            stop_order: request.pickups.iter().map(|p| p.id).collect(),
            leg_duration_secs: vec![FAKE_LEG_SECS; legs],
            total_duration_secs: FAKE_LEG_SECS * legs as u32,
            total_distance_m: 1500.0 * legs as f64,
        })
    }
}

/// Routing fake that always fails like an unreachable service.
pub struct UnreachableRouting;

#[async_trait]
impl RoutingPort for UnreachableRouting {
    async fn optimize(&self, _request: &RouteRequest) -> Result<RouteResponse, RoutingError> {
        Err(RoutingError::Rejected("connection refused".to_string()))
    }
}

/// Geocoding fake resolving every query to a fixed venue.
pub struct FixedGeocoder;

#[async_trait]
impl GeocodingPort for FixedGeocoder {
    async fn resolve(&self, query: &str) -> Result<Location, GeocodeError> {
        Ok(Location {
            name: query.to_string(),
            address: Some(format!("{}, Springfield", query)),
            coordinates: Some(Coordinates {
                lat: 47.61,
                lng: -122.33,
            }),
            place_id: Some("test-place".to_string()),
        })
    }
}

/// Geocoding fake that never finds anything, for unresolved-venue paths.
pub struct UnresolvedGeocoder;

#[async_trait]
impl GeocodingPort for UnresolvedGeocoder {
    async fn resolve(&self, query: &str) -> Result<Location, GeocodeError> {
        Err(GeocodeError::NoMatch(query.to_string()))
    }
}

/// Wired repositories and app state over a fresh in-memory store.
pub struct TestContext {
    pub teams: TeamRepository,
    pub events: EventRepository,
    pub carpools: CarpoolRepository,
    pub duties: DutyRepository,
    pub notifications: NotificationRepository,
    pub app_state: web::Data<AppState>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_ports(Arc::new(InOrderRouting), Arc::new(FixedGeocoder))
    }

    pub fn with_ports(
        routing: Arc<dyn RoutingPort>,
        geocoding: Arc<dyn GeocodingPort>,
    ) -> Self {
        let store = init_store();
        let teams = TeamRepository::new(store.clone());
        let events = EventRepository::new(store.clone());
        let carpools = CarpoolRepository::new(store.clone());
        let duties = DutyRepository::new(store.clone());
        let notifications = NotificationRepository::new(store.clone());

        let notifier = Notifier::new(notifications.clone());
        let lifecycle_service = LifecycleService::new(
            carpools.clone(),
            events.clone(),
            teams.clone(),
            notifier.clone(),
            routing,
        );

        let app_state = web::Data::new(AppState {
            lifecycle_service,
            notifier,
            geocoding,
        });

        Self {
            teams,
            events,
            carpools,
            duties,
            notifications,
            app_state,
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.app_state.clone())
            .app_data(web::Data::new(self.teams.clone()))
            .app_data(web::Data::new(self.events.clone()))
            .app_data(web::Data::new(self.carpools.clone()))
            .app_data(web::Data::new(self.duties.clone()))
            .app_data(web::Data::new(self.notifications.clone()))
            .configure(teampool_be::routes::configure)
    }
}

pub async fn create_test_team(ctx: &TestContext) -> Team {
    ctx.teams
        .create_team(TeamInput {
            name: "Lightning FC U12".to_string(),
            coach_name: Name().fake(),
        })
        .await
        .expect("team created")
}

pub async fn create_roster_entry(
    ctx: &TestContext,
    team_id: Uuid,
    can_drive: bool,
    seats: u32,
    home: Option<Coordinates>,
) -> RosterEntry {
    ctx.teams
        .add_roster_entry(RosterEntryInput {
            team_id,
            player_name: Name().fake(),
            jersey_number: Some((1u16..30).fake()),
            parent_name: Name().fake(),
            phone: None,
            can_drive,
            seats,
            home_coordinates: home,
        })
        .await
        .expect("roster entry created")
}

pub fn home(lat: f64) -> Option<Coordinates> {
    Some(Coordinates { lat, lng: -122.30 })
}

/// Game at a resolved venue with a 9:15 AM arrival deadline.
pub async fn create_test_event(ctx: &TestContext, team_id: Uuid, needs_volunteers: bool) -> Event {
    let events = ctx
        .events
        .create_events(
            NewEvent {
                team_id,
                kind: EventKind::Game,
                title: "vs Thunder United".to_string(),
                start_time: chrono::NaiveTime::from_hms_opt(10, 0, 0).expect("valid time"),
                arrive_by: chrono::NaiveTime::from_hms_opt(9, 15, 0).expect("valid time"),
                location: Location {
                    name: "North Park Field 3".to_string(),
                    address: Some("1 North Park Way".to_string()),
                    coordinates: Some(Coordinates {
                        lat: 47.70,
                        lng: -122.20,
                    }),
                    place_id: Some("field-3".to_string()),
                },
                needs_volunteers,
                recurrence: None,
            },
            vec![NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date")],
        )
        .await
        .expect("event created");
    events.into_iter().next().expect("one event")
}

/// Event whose venue never resolved; routing against it must be refused.
pub async fn create_unresolved_event(ctx: &TestContext, team_id: Uuid) -> Event {
    let events = ctx
        .events
        .create_events(
            NewEvent {
                team_id,
                kind: EventKind::Practice,
                title: "Team Practice".to_string(),
                start_time: chrono::NaiveTime::from_hms_opt(17, 30, 0).expect("valid time"),
                arrive_by: chrono::NaiveTime::from_hms_opt(17, 30, 0).expect("valid time"),
                location: Location::unresolved("Somewhere new"),
                needs_volunteers: false,
                recurrence: None,
            },
            vec![NaiveDate::from_ymd_opt(2025, 1, 17).expect("valid date")],
        )
        .await
        .expect("event created");
    events.into_iter().next().expect("one event")
}

/// Parse an `ApiResponse { success: true, data }` body into `T`.
pub fn read_data<T: serde::de::DeserializeOwned>(body: &[u8]) -> T {
    let value: serde_json::Value = serde_json::from_slice(body).expect("valid JSON body");
    assert_eq!(
        value["success"], true,
        "expected a success envelope, got: {}",
        value
    );
    serde_json::from_value(value["data"].clone()).expect("data matches expected shape")
}

/// Assert an error envelope and return its message.
pub fn read_error(body: &[u8]) -> String {
    let value: serde_json::Value = serde_json::from_slice(body).expect("valid JSON body");
    assert_eq!(
        value["success"], false,
        "expected an error envelope, got: {}",
        value
    );
    value["message"]
        .as_str()
        .expect("error message present")
        .to_string()
}
