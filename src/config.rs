use argon2::Params;
use serde::Deserialize;

/// Argon2id cost settings for password hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            memory_kib: env_u32("PASSWORD_HASH_MEMORY_KIB").unwrap_or(defaults.memory_kib),
            iterations: env_u32("PASSWORD_HASH_ITERATIONS").unwrap_or(defaults.iterations),
            parallelism: env_u32("PASSWORD_HASH_PARALLELISM").unwrap_or(defaults.parallelism),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub hashing: HashingConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let hashing = HashingConfig::from_env();
        Ok(Self {
            database_url,
            hashing,
        })
    }
}

fn env_u32(key: &str) -> Option<u32> {
    std::env::var(key).ok().and_then(|v| v.trim().parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_defaults_follow_argon2() {
        let cfg = HashingConfig::default();
        assert_eq!(cfg.memory_kib, 19 * 1024);
        assert_eq!(cfg.iterations, 2);
        assert_eq!(cfg.parallelism, 1);
    }

    #[test]
    fn unparsable_env_values_are_ignored() {
        assert_eq!(env_u32("SNIPPETBOX_TEST_SURELY_UNSET_VAR"), None);
    }
}
