use anyhow::{bail, Context, Result};
use std::ops::RangeInclusive;

/// Work factors bcrypt accepts
const BCRYPT_COSTS: RangeInclusive<u32> = 4..=31;

#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub starter_rating: i32,
    pub k_factor: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            starter_rating: 1200,
            k_factor: 32.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub database_path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: "pingpong_ladder.db".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClockSettings {
    pub timezone: String,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            timezone: "Europe/Berlin".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub bcrypt_cost: u32,
    /// Bearer token for admin endpoints; admin routes are closed when unset
    pub admin_token: Option<String>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            admin_token: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub recent_matches: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { recent_matches: 5 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub storage: StorageSettings,
    pub clock: ClockSettings,
    pub auth: AuthSettings,
    pub server: ServerSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Overlays values from `lookup` on top of the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(path) = lookup("DATABASE_PATH") {
            config.storage.database_path = path;
        }
        if let Some(tz) = lookup("LADDER_TIMEZONE") {
            config.clock.timezone = tz;
        }
        if let Some(k) = lookup("LADDER_K_FACTOR") {
            config.rating.k_factor = parse_var("LADDER_K_FACTOR", &k)?;
        }
        if let Some(rating) = lookup("LADDER_STARTER_RATING") {
            config.rating.starter_rating = parse_var("LADDER_STARTER_RATING", &rating)?;
        }
        if let Some(cost) = lookup("LADDER_BCRYPT_COST") {
            let cost: u32 = parse_var("LADDER_BCRYPT_COST", &cost)?;
            if !BCRYPT_COSTS.contains(&cost) {
                bail!("Invalid value for LADDER_BCRYPT_COST: {cost} is outside 4..=31");
            }
            config.auth.bcrypt_cost = cost;
        }
        if let Some(token) = lookup("LADDER_ADMIN_TOKEN").filter(|t| !t.is_empty()) {
            config.auth.admin_token = Some(token);
        }

        Ok(config)
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid value for {key}: {raw:?}"))
}
