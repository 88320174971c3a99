//! Role-to-navigation resolution.
//!
//! Each role maps to a fixed, hand-authored list of menu entries. The order
//! of a list is the menu order and the order in which routes are registered.

use super::RoleCode;

/// One reachable authenticated page: menu label plus route path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavigationEntry {
    label: &'static str,
    route_path: &'static str,
}

impl NavigationEntry {
    const fn new(label: &'static str, route_path: &'static str) -> Self {
        Self { label, route_path }
    }

    /// Menu label.
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Route path, always starting with `/`.
    pub const fn route_path(&self) -> &'static str {
        self.route_path
    }
}

/// Citizen request form.
pub const REQUEST_FORM_ROUTE: &str = "/Tela2Funcionario";
/// Citizen request history.
pub const REQUEST_HISTORY_ROUTE: &str = "/Tela3Funcionario";
/// Analyst review queue.
pub const REVIEW_QUEUE_ROUTE: &str = "/TelaSolicitacoes";
/// Medication catalog management.
pub const CATALOG_ROUTE: &str = "/TelaCadastroMedicamento";
/// User and role management.
pub const USERS_ROUTE: &str = "/TelaUsuarios";
/// Request dashboard.
pub const DASHBOARD_ROUTE: &str = "/TelaDashboard";

const CITIZEN_MENU: &[NavigationEntry] = &[
    NavigationEntry::new("Solicitar", REQUEST_FORM_ROUTE),
    NavigationEntry::new("Acompanhar", REQUEST_HISTORY_ROUTE),
];

const ANALYST_MENU: &[NavigationEntry] = &[
    NavigationEntry::new("Fila de Análise", REVIEW_QUEUE_ROUTE),
    NavigationEntry::new("Medicamentos", CATALOG_ROUTE),
];

const MANAGER_MENU: &[NavigationEntry] = &[
    NavigationEntry::new("Painel", DASHBOARD_ROUTE),
    NavigationEntry::new("Fila de Análise", REVIEW_QUEUE_ROUTE),
    NavigationEntry::new("Medicamentos", CATALOG_ROUTE),
    NavigationEntry::new("Usuários", USERS_ROUTE),
];

/// Resolve the navigation entries granted to `role`.
///
/// Pure and total: [`RoleCode::Unset`] yields an empty list.
///
/// # Examples
/// ```
/// use frontend::domain::{RoleCode, resolve_navigation};
///
/// let entries = resolve_navigation(RoleCode::Citizen);
/// assert_eq!(entries[0].route_path(), "/Tela2Funcionario");
/// assert!(resolve_navigation(RoleCode::Unset).is_empty());
/// ```
pub fn resolve_navigation(role: RoleCode) -> Vec<NavigationEntry> {
    let table = match role {
        RoleCode::Citizen => CITIZEN_MENU,
        RoleCode::Analyst => ANALYST_MENU,
        RoleCode::Manager => MANAGER_MENU,
        RoleCode::Unset => &[],
    };
    table.to_vec()
}
