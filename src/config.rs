use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    /// Fixed seed for menu selection; entropy when unset.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub planner: PlannerConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);
        let planner = PlannerConfig {
            seed: std::env::var("PLANNER_SEED")
                .ok()
                .and_then(|v| v.parse::<u64>().ok()),
        };
        Ok(Self {
            database_url,
            db_max_connections,
            planner,
        })
    }
}
