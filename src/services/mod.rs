//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod event;
pub mod extraction;
pub mod organization;
pub mod template;
pub mod text;

// Re-export commonly used services
pub use auth::{AuthService, AuthUser, Claims};
pub use event::EventService;
pub use extraction::{extract, Extraction};
pub use organization::OrganizationService;
pub use template::TemplateService;
pub use text::{HttpTextAnalyzer, TextAnalyzer};

use std::sync::Arc;

use crate::config::settings::Settings;
use crate::store::DocumentStore;
use crate::utils::errors::Result;

/// Service factory wiring all services from explicit dependencies
#[derive(Clone)]
pub struct ServiceFactory {
    pub event_service: EventService,
    pub template_service: TemplateService,
    pub organization_service: OrganizationService,
    pub auth_service: AuthService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        store: Arc<dyn DocumentStore>,
        analyzer: Arc<dyn TextAnalyzer>,
        settings: Settings,
    ) -> Result<Self> {
        let organization_service = OrganizationService::new(Arc::clone(&store));
        let event_service = EventService::new(
            Arc::clone(&store),
            analyzer,
            organization_service.clone(),
            settings.clone(),
        );
        let template_service = TemplateService::new(Arc::clone(&store));
        let auth_service = AuthService::new(&settings);

        Ok(Self {
            event_service,
            template_service,
            organization_service,
            auth_service,
        })
    }
}
