//! Registry mapping route paths to page constructors.

use std::collections::HashMap;
use std::sync::Arc;

use super::{
    CatalogPage, DashboardPage, Page, RequestFormPage, RequestHistoryPage, ReviewQueuePage,
    UsersPage,
};
use crate::domain::{
    CATALOG_ROUTE, DASHBOARD_ROUTE, REQUEST_FORM_ROUTE, REQUEST_HISTORY_ROUTE, REVIEW_QUEUE_ROUTE,
    USERS_ROUTE,
};

/// Builds a fresh page instance.
pub type PageConstructor = fn() -> Arc<dyn Page>;

fn build<P>() -> Arc<dyn Page>
where
    P: Page + Default + 'static,
{
    Arc::new(P::default())
}

/// Statically known pages, keyed by route path.
///
/// The registry says which pages exist; the role's navigation entries say
/// which of them a user may reach.
#[derive(Clone, Default)]
pub struct PageRegistry {
    constructors: HashMap<&'static str, PageConstructor>,
}

impl PageRegistry {
    /// Registry with no pages.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding every page of the application.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry
            .register(REQUEST_FORM_ROUTE, build::<RequestFormPage>)
            .register(REQUEST_HISTORY_ROUTE, build::<RequestHistoryPage>)
            .register(REVIEW_QUEUE_ROUTE, build::<ReviewQueuePage>)
            .register(CATALOG_ROUTE, build::<CatalogPage>)
            .register(USERS_ROUTE, build::<UsersPage>)
            .register(DASHBOARD_ROUTE, build::<DashboardPage>);
        registry
    }

    /// Register `constructor` for `route_path`, replacing any earlier one.
    pub fn register(&mut self, route_path: &'static str, constructor: PageConstructor) -> &mut Self {
        self.constructors.insert(route_path, constructor);
        self
    }

    /// Build the page registered for `route_path`.
    pub fn construct(&self, route_path: &str) -> Option<Arc<dyn Page>> {
        self.constructors.get(route_path).map(|constructor| constructor())
    }

    /// Whether a page exists for `route_path`.
    pub fn contains(&self, route_path: &str) -> bool {
        self.constructors.contains_key(route_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoleCode, resolve_navigation};
    use rstest::rstest;

    #[rstest]
    #[case(RoleCode::Citizen)]
    #[case(RoleCode::Analyst)]
    #[case(RoleCode::Manager)]
    fn every_granted_entry_has_a_page(#[case] role: RoleCode) {
        let registry = PageRegistry::standard();
        for entry in resolve_navigation(role) {
            assert!(
                registry.contains(entry.route_path()),
                "missing page for {}",
                entry.route_path()
            );
        }
    }

    #[rstest]
    fn unknown_paths_have_no_page() {
        let registry = PageRegistry::standard();
        assert!(registry.construct("/rota-inexistente").is_none());
        assert!(PageRegistry::empty().construct(REQUEST_FORM_ROUTE).is_none());
    }

    #[rstest]
    fn constructed_page_carries_its_title() {
        let page = PageRegistry::standard()
            .construct(REVIEW_QUEUE_ROUTE)
            .expect("registered");
        assert_eq!(page.title(), "Fila de Análise");
    }
}
