use anyhow::Result;
use database_layer::DatabasePool;
use pharmacy_service::PharmacyService;

/// Main PharmaOps server state
#[derive(Clone)]
pub struct PharmaOpsServer {
    /// Server configuration
    pub config: ServerConfig,
    /// Shared database pool
    pub db: DatabasePool,
    /// Pharmacy operations service
    pub pharmacy: PharmacyService,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server name
    pub name: String,
    /// Socket address to bind
    pub bind_addr: String,
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self {
            name: "PharmaOps Engine".to_string(),
            bind_addr: std::env::var("PHARMAOPS_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "PharmaOps Engine".to_string(),
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

impl PharmaOpsServer {
    /// Create a new server instance from the environment
    ///
    /// Fails fast when `DATABASE_URL` is missing or the pool cannot connect.
    pub async fn new() -> Result<Self> {
        let config = ServerConfig::from_env();
        let db = DatabasePool::from_env().await?;
        let pharmacy = PharmacyService::new(db.clone());
        Ok(Self {
            config,
            db,
            pharmacy,
        })
    }

    /// Create a server instance over a provided pool (useful for testing)
    pub fn new_with_pool(db: DatabasePool) -> Self {
        let pharmacy = PharmacyService::new(db.clone());
        Self {
            config: ServerConfig::default(),
            db,
            pharmacy,
        }
    }
}

impl std::fmt::Debug for PharmaOpsServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PharmaOpsServer")
            .field("config", &self.config)
            .finish()
    }
}
