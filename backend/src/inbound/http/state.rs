//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` so they depend only
//! on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ModelsCommand, ModelsQuery, PeopleCommand, PeopleQuery};

/// Parameter object bundling the port implementations for [`HttpState`].
#[derive(Clone)]
pub struct HttpStatePorts {
    pub people: Arc<dyn PeopleQuery>,
    pub people_commands: Arc<dyn PeopleCommand>,
    pub models: Arc<dyn ModelsQuery>,
    pub models_commands: Arc<dyn ModelsCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub people: Arc<dyn PeopleQuery>,
    pub people_commands: Arc<dyn PeopleCommand>,
    pub models: Arc<dyn ModelsQuery>,
    pub models_commands: Arc<dyn ModelsCommand>,
}

impl HttpState {
    /// Construct state from the port bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            people,
            people_commands,
            models,
            models_commands,
        } = ports;
        Self {
            people,
            people_commands,
            models,
            models_commands,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
