//! Route registry and lookup.
//!
//! # Responsibilities
//! - Declare the catalog REST routes and their order
//! - Build the route table once, before the first lookup
//! - Look up the matching route for a request or return an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan over eleven routes; order is the tie-break
//! - The table is versioned under `v1/`; changing a verb or path is a
//!   breaking wire change

use std::fmt;
use std::sync::LazyLock;

use crate::routing::matcher::{HttpMethod, MatchResult, RouteDefinition, RouteTable};

/// Identity of a declared catalog route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Config,
    ListNamespaces,
    CreateNamespace,
    LoadNamespace,
    DropNamespace,
    UpdateNamespace,
    ListTables,
    CreateTable,
    LoadTable,
    UpdateTable,
    DropTable,
}

static ROUTES: LazyLock<RouteTable<Route>> = LazyLock::new(|| {
    RouteTable::parse(Route::ALL.iter().map(|r| (*r, r.method(), r.pattern())))
        .expect("declared route patterns are well-formed")
});

impl Route {
    /// Every route, in match order.
    pub const ALL: [Route; 11] = [
        Route::Config,
        Route::ListNamespaces,
        Route::CreateNamespace,
        Route::LoadNamespace,
        Route::DropNamespace,
        Route::UpdateNamespace,
        Route::ListTables,
        Route::CreateTable,
        Route::LoadTable,
        Route::UpdateTable,
        Route::DropTable,
    ];

    pub fn method(&self) -> HttpMethod {
        match self {
            Route::Config
            | Route::ListNamespaces
            | Route::LoadNamespace
            | Route::ListTables
            | Route::LoadTable => HttpMethod::Get,
            Route::CreateNamespace
            | Route::UpdateNamespace
            | Route::CreateTable
            | Route::UpdateTable => HttpMethod::Post,
            Route::DropNamespace | Route::DropTable => HttpMethod::Delete,
        }
    }

    pub fn pattern(&self) -> &'static str {
        match self {
            Route::Config => "v1/config",
            Route::ListNamespaces | Route::CreateNamespace => "v1/namespaces",
            Route::LoadNamespace | Route::DropNamespace => "v1/namespaces/{namespace}",
            Route::UpdateNamespace => "v1/namespaces/{namespace}/properties",
            Route::ListTables | Route::CreateTable => "v1/namespaces/{namespace}/tables",
            Route::LoadTable | Route::UpdateTable | Route::DropTable => {
                "v1/namespaces/{namespace}/tables/{table}"
            }
        }
    }

    /// Routes served only when the catalog manages namespaces.
    pub fn requires_namespace_support(&self) -> bool {
        matches!(
            self,
            Route::ListNamespaces
                | Route::CreateNamespace
                | Route::LoadNamespace
                | Route::DropNamespace
                | Route::UpdateNamespace
        )
    }

    /// Stable upper-case name used in logs and metric labels.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Config => "CONFIG",
            Route::ListNamespaces => "LIST_NAMESPACES",
            Route::CreateNamespace => "CREATE_NAMESPACE",
            Route::LoadNamespace => "LOAD_NAMESPACE",
            Route::DropNamespace => "DROP_NAMESPACE",
            Route::UpdateNamespace => "UPDATE_NAMESPACE",
            Route::ListTables => "LIST_TABLES",
            Route::CreateTable => "CREATE_TABLE",
            Route::LoadTable => "LOAD_TABLE",
            Route::UpdateTable => "UPDATE_TABLE",
            Route::DropTable => "DROP_TABLE",
        }
    }

    /// The parsed definition of this route.
    pub fn definition(&self) -> &'static RouteDefinition<Route> {
        // ROUTES is built from ALL in order, so the index is the position in ALL.
        &ROUTES.routes()[*self as usize]
    }

    /// Match a request against the declared routes.
    pub fn from_request(method: HttpMethod, path: &str) -> Option<MatchResult<Route>> {
        ROUTES.find(method, path)
    }

    /// The shared route table.
    pub fn table() -> &'static RouteTable<Route> {
        &ROUTES
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
