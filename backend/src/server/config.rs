//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use backend::domain::{DisplayName, Username};
use backend::outbound::persistence::DbPool;

/// Administrator account seeded into the user store at startup.
pub struct AdminSeed {
    pub(crate) username: Username,
    pub(crate) display_name: DisplayName,
    pub(crate) password: String,
}

impl AdminSeed {
    /// Assemble a seed from validated components.
    #[must_use]
    pub fn new(username: Username, display_name: DisplayName, password: String) -> Self {
        Self {
            username,
            display_name,
            password,
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) admin_seed: Option<AdminSeed>,
}

impl ServerConfig {
    /// Construct a server configuration using application preferences.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            admin_seed: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without one, the server runs on in-memory stores and loses state on
    /// restart; useful for local development and tests.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Seed an administrator account if its username is absent at startup.
    #[must_use]
    pub fn with_admin_seed(mut self, seed: AdminSeed) -> Self {
        self.admin_seed = Some(seed);
        self
    }
}
