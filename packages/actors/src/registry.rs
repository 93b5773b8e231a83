//! Actor registry for discovering the supervisor without threading its
//! reference through every call site.

use std::sync::RwLock;

use ractor::ActorRef;

use crate::messages::SupervisorMessage;

/// Global actor registry.
pub struct ActorRegistry {
    supervisor: RwLock<Option<ActorRef<SupervisorMessage>>>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self {
            supervisor: RwLock::new(None),
        }
    }

    pub fn register_supervisor(&self, supervisor: ActorRef<SupervisorMessage>) {
        if let Ok(mut slot) = self.supervisor.write() {
            *slot = Some(supervisor);
        }
    }

    pub fn get_supervisor(&self) -> Option<ActorRef<SupervisorMessage>> {
        self.supervisor.read().ok().and_then(|s| s.clone())
    }
}

impl Default for ActorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: std::sync::LazyLock<ActorRegistry> = std::sync::LazyLock::new(ActorRegistry::new);

/// Get the global actor registry.
pub fn global_registry() -> &'static ActorRegistry {
    &REGISTRY
}
