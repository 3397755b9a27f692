//! Route gating: which views exist and which chrome they get.

use core::str::FromStr;

/// A console view.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Register,
    Dashboard,
    Products,
    /// Stock movement log.
    Inventory,
    Suppliers,
    Categories,
    Users,
    Settings,
}

impl View {
    /// Where a successful login lands.
    pub const LANDING: View = View::Dashboard;

    pub const ALL: [View; 9] = [
        View::Login,
        View::Register,
        View::Dashboard,
        View::Products,
        View::Inventory,
        View::Suppliers,
        View::Categories,
        View::Users,
        View::Settings,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            View::Login => "/login",
            View::Register => "/register",
            View::Dashboard => "/dashboard",
            View::Products => "/products",
            View::Inventory => "/inventory",
            View::Suppliers => "/suppliers",
            View::Categories => "/categories",
            View::Users => "/users",
            View::Settings => "/settings",
        }
    }

    /// Parse a request path. A trailing slash is tolerated (`/dashboard/`).
    pub fn from_path(path: &str) -> Option<View> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => return None,
            p => p,
        };
        View::ALL.into_iter().find(|v| v.path() == normalized)
    }

    /// Login and registration are rendered bare, whatever the session state.
    pub fn is_auth_page(&self) -> bool {
        matches!(self, View::Login | View::Register)
    }
}

impl core::fmt::Display for View {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::from_path(s).ok_or_else(|| format!("unknown view: {s}"))
    }
}

/// Chrome to render around a view.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Layout {
    pub header: bool,
    pub sidebar: bool,
}

impl Layout {
    pub const BARE: Layout = Layout {
        header: false,
        sidebar: false,
    };

    pub const FULL: Layout = Layout {
        header: true,
        sidebar: true,
    };
}

/// Decide the chrome for `view` given the session's authenticated flag.
pub fn layout(is_authenticated: bool, view: View) -> Layout {
    if view.is_auth_page() || !is_authenticated {
        Layout::BARE
    } else {
        Layout::FULL
    }
}

/// Sidebar entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub view: View,
}

/// Sidebar navigation, in display order.
pub const SIDEBAR: [NavItem; 6] = [
    NavItem {
        label: "Panel",
        view: View::Dashboard,
    },
    NavItem {
        label: "Productos",
        view: View::Products,
    },
    NavItem {
        label: "Movimientos",
        view: View::Inventory,
    },
    NavItem {
        label: "Proveedores",
        view: View::Suppliers,
    },
    NavItem {
        label: "Usuarios",
        view: View::Users,
    },
    NavItem {
        label: "Configuraciones",
        view: View::Settings,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_pages_never_get_chrome() {
        for authenticated in [true, false] {
            assert_eq!(layout(authenticated, View::Login), Layout::BARE);
            assert_eq!(layout(authenticated, View::Register), Layout::BARE);
        }
    }

    #[test]
    fn chrome_requires_authentication() {
        for view in View::ALL.into_iter().filter(|v| !v.is_auth_page()) {
            assert_eq!(layout(true, view), Layout::FULL, "{view}");
            assert_eq!(layout(false, view), Layout::BARE, "{view}");
        }
    }

    #[test]
    fn paths_round_trip() {
        for view in View::ALL {
            assert_eq!(View::from_path(view.path()), Some(view));
        }
        assert_eq!(View::from_path("/dashboard/"), Some(View::Dashboard));
        assert_eq!(View::from_path("/"), None);
        assert_eq!(View::from_path("/nope"), None);
        assert!("/reports".parse::<View>().is_err());
    }

    #[test]
    fn sidebar_only_lists_chrome_views() {
        assert!(SIDEBAR.iter().all(|item| !item.view.is_auth_page()));
        assert_eq!(SIDEBAR[0].view, View::LANDING);
    }
}
