// Navigation collaborator - Quick actions resolve to opaque routes
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub route: &'static str,
}

pub const QUICK_ACTIONS: [QuickAction; 5] = [
    QuickAction {
        id: "new-transaction",
        label: "New Transaction",
        icon: "plus-circle",
        route: "/transactions/new",
    },
    QuickAction {
        id: "upload-document",
        label: "Upload Document",
        icon: "upload",
        route: "/documents/upload",
    },
    QuickAction {
        id: "review-approvals",
        label: "Review Approvals",
        icon: "check-circle",
        route: "/approvals",
    },
    QuickAction {
        id: "generate-report",
        label: "Generate Report",
        icon: "bar-chart",
        route: "/reports",
    },
    QuickAction {
        id: "export-data",
        label: "Export Data",
        icon: "download",
        route: "/reports/export",
    },
];

pub fn find_action(id: &str) -> Option<&'static QuickAction> {
    QUICK_ACTIONS.iter().find(|a| a.id == id)
}

pub trait Navigator: Send + Sync {
    /// Request navigation to `route`. Returns the route that was requested.
    fn navigate(&self, route: &str) -> String;
}

/// Records navigation requests in the log; the hosting shell performs them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, route: &str) -> String {
        tracing::info!(route, "Navigation requested");
        route.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_action() {
        assert_eq!(find_action("export-data").map(|a| a.route), Some("/reports/export"));
        assert!(find_action("delete-everything").is_none());
    }

    #[test]
    fn test_action_ids_are_unique() {
        for (i, a) in QUICK_ACTIONS.iter().enumerate() {
            assert!(QUICK_ACTIONS[i + 1..].iter().all(|b| b.id != a.id));
        }
    }

    #[test]
    fn test_logging_navigator_echoes_route() {
        assert_eq!(LoggingNavigator.navigate("/reports"), "/reports");
    }
}
