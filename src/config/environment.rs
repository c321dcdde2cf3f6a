//! Configuración de variables de entorno
//!
//! Este módulo lee la configuración del servicio desde el entorno
//! (opcionalmente cargado desde `.env` con dotenvy).

use std::env;

use anyhow::{Context, Result};

const DEFAULT_DATABASE_URL: &str = "sqlite://vehicles.db";
const TEST_DATABASE_URL: &str = "sqlite::memory:";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub cors_origins: Vec<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 5000,
            host: "127.0.0.1".to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            cors_origins: Vec::new(),
        }
    }
}

impl EnvironmentConfig {
    /// Construir la configuración a partir de las variables de entorno
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Configuración para tests: base de datos en memoria
    pub fn for_tests() -> Self {
        Self {
            environment: "test".to_string(),
            database_url: TEST_DATABASE_URL.to_string(),
            ..Self::default()
        }
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let environment = lookup("ENVIRONMENT").unwrap_or(defaults.environment);

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid number, got '{}'", raw))?,
            None => defaults.port,
        };

        let host = lookup("HOST").unwrap_or(defaults.host);

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            if environment == "test" {
                TEST_DATABASE_URL.to_string()
            } else {
                defaults.database_url
            }
        });

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            environment,
            port,
            host,
            database_url,
            cors_origins,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo test
    pub fn is_test(&self) -> bool {
        self.environment == "test"
    }

    /// Nivel de logging: DEBUG en desarrollo, WARN en tests, INFO en el resto
    pub fn log_level(&self) -> tracing::Level {
        if self.is_development() {
            tracing::Level::DEBUG
        } else if self.is_test() {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.is_development());
        assert_eq!(config.port, 5000);
        assert_eq!(config.database_url, "sqlite://vehicles.db");
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.server_url(), "127.0.0.1:5000");
    }

    #[test]
    fn test_environment_uses_in_memory_database() {
        let config =
            EnvironmentConfig::from_lookup(lookup_from(&[("ENVIRONMENT", "test")])).unwrap();
        assert!(config.is_test());
        assert_eq!(config.database_url, "sqlite::memory:");
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("HOST", "0.0.0.0"),
            ("DATABASE_URL", "sqlite:///tmp/fleet.db"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
        ]))
        .unwrap();
        assert_eq!(config.server_url(), "0.0.0.0:8080");
        assert_eq!(config.database_url, "sqlite:///tmp/fleet.db");
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_log_level_follows_environment() {
        assert_eq!(EnvironmentConfig::default().log_level(), tracing::Level::DEBUG);
        assert_eq!(EnvironmentConfig::for_tests().log_level(), tracing::Level::WARN);

        let production =
            EnvironmentConfig::from_lookup(lookup_from(&[("ENVIRONMENT", "production")]))
                .unwrap();
        assert_eq!(production.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = EnvironmentConfig::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert!(result.is_err());
    }
}
