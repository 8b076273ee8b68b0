pub mod geocoding;
pub mod nominatim;
pub mod osrm;
pub mod routing;

pub use geocoding::{GeocodeError, GeocodingPort};
pub use nominatim::NominatimClient;
pub use osrm::OsrmRoutingClient;
pub use routing::{Pickup, RouteRequest, RouteResponse, RoutingError, RoutingPort};
