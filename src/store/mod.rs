use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

pub mod models;
pub mod repositories;

use models::{Carpool, Duty, Event, Notification, RosterEntry, Team};

/// In-process data store shared by the repositories.
///
/// Persistence is a collaborator concern, not part of this core; the
/// repository layer is the contract and this store is its backing. Each
/// carpool lives behind its own mutex so every trip is an independently
/// serialized unit: capacity checks, plan application and lifecycle
/// transitions for one trip never race each other, while unrelated trips
/// proceed in parallel.
pub struct Store {
    pub(crate) teams: RwLock<HashMap<Uuid, Team>>,
    pub(crate) roster: RwLock<HashMap<Uuid, RosterEntry>>,
    pub(crate) events: RwLock<HashMap<Uuid, Event>>,
    pub(crate) carpools: RwLock<HashMap<Uuid, Arc<Mutex<Carpool>>>>,
    pub(crate) duties: RwLock<HashMap<Uuid, Duty>>,
    pub(crate) notifications: RwLock<HashMap<Uuid, Notification>>,
}

impl Store {
    fn new() -> Self {
        Self {
            teams: RwLock::new(HashMap::new()),
            roster: RwLock::new(HashMap::new()),
            events: RwLock::new(HashMap::new()),
            carpools: RwLock::new(HashMap::new()),
            duties: RwLock::new(HashMap::new()),
            notifications: RwLock::new(HashMap::new()),
        }
    }
}

pub fn init_store() -> Arc<Store> {
    Arc::new(Store::new())
}
