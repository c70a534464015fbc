//! Extension pour intégrer la configuration Navidrome dans hrconfig
//!
//! Les paramètres sont lus sous `sources.navidrome` dans la configuration,
//! puis dans les variables d'environnement `NAVIDROME_BASE_URL`,
//! `NAVIDROME_USERNAME` et `NAVIDROME_PASSWORD`.

use crate::client::NavidromeClient;
use crate::error::{NavidromeError, Result as NavidromeResult};
use anyhow::{anyhow, Result};
use hrconfig::Config;
use serde_yaml::Value;

const BASE_URL_PATH: &[&str] = &["sources", "navidrome", "base_url"];
const USERNAME_PATH: &[&str] = &["sources", "navidrome", "username"];
const PASSWORD_PATH: &[&str] = &["sources", "navidrome", "password"];

pub const ENV_BASE_URL: &str = "NAVIDROME_BASE_URL";
pub const ENV_USERNAME: &str = "NAVIDROME_USERNAME";
pub const ENV_PASSWORD: &str = "NAVIDROME_PASSWORD";

/// Paramètres de connexion à Navidrome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavidromeCredentials {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

/// Trait d'extension pour gérer la configuration Navidrome dans hrconfig
///
/// # Exemple
///
/// ```rust,ignore
/// use hrconfig::get_config;
/// use hrnavidrome::NavidromeConfigExt;
///
/// let config = get_config();
/// let credentials = config.get_navidrome_credentials()?;
/// println!("Navidrome user: {}", credentials.username);
/// ```
pub trait NavidromeConfigExt {
    /// URL du serveur Navidrome
    fn get_navidrome_base_url(&self) -> Result<String>;

    fn set_navidrome_base_url(&self, url: &str) -> Result<()>;

    fn get_navidrome_username(&self) -> Result<String>;

    fn set_navidrome_username(&self, username: &str) -> Result<()>;

    /// Mot de passe en clair, déchiffré s'il est stocké sous la forme `encrypted:...`
    fn get_navidrome_password(&self) -> Result<String>;

    /// Stocke le mot de passe tel quel (utiliser `hrconfig::encryption::encrypt_password`
    /// pour le stocker chiffré)
    fn set_navidrome_password(&self, password: &str) -> Result<()>;

    /// Récupère les trois paramètres, erreur si l'un manque
    fn get_navidrome_credentials(&self) -> Result<NavidromeCredentials>;
}

fn lookup<F>(config: &Config, path: &[&str], env_name: &str, env: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    config
        .get_string(path)
        .or_else(|| env(env_name).filter(|v| !v.trim().is_empty()))
        .ok_or_else(|| anyhow!("{} not configured (config or {})", path.join("."), env_name))
}

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn credentials_with_env<F>(config: &Config, env: F) -> Result<NavidromeCredentials>
where
    F: Fn(&str) -> Option<String>,
{
    let base_url = lookup(config, BASE_URL_PATH, ENV_BASE_URL, &env)?;
    let username = lookup(config, USERNAME_PATH, ENV_USERNAME, &env)?;
    let password = lookup(config, PASSWORD_PATH, ENV_PASSWORD, &env)?;
    let password = hrconfig::encryption::get_password(&password)
        .map_err(|e| anyhow!("Failed to decrypt Navidrome password: {}", e))?;

    Ok(NavidromeCredentials {
        base_url,
        username,
        password,
    })
}

impl NavidromeConfigExt for Config {
    fn get_navidrome_base_url(&self) -> Result<String> {
        lookup(self, BASE_URL_PATH, ENV_BASE_URL, process_env)
    }

    fn set_navidrome_base_url(&self, url: &str) -> Result<()> {
        self.set_value(BASE_URL_PATH, Value::String(url.to_string()))
    }

    fn get_navidrome_username(&self) -> Result<String> {
        lookup(self, USERNAME_PATH, ENV_USERNAME, process_env)
    }

    fn set_navidrome_username(&self, username: &str) -> Result<()> {
        self.set_value(USERNAME_PATH, Value::String(username.to_string()))
    }

    fn get_navidrome_password(&self) -> Result<String> {
        let password = lookup(self, PASSWORD_PATH, ENV_PASSWORD, process_env)?;
        hrconfig::encryption::get_password(&password)
            .map_err(|e| anyhow!("Failed to decrypt Navidrome password: {}", e))
    }

    fn set_navidrome_password(&self, password: &str) -> Result<()> {
        self.set_value(PASSWORD_PATH, Value::String(password.to_string()))
    }

    fn get_navidrome_credentials(&self) -> Result<NavidromeCredentials> {
        credentials_with_env(self, process_env)
    }
}

impl NavidromeClient {
    /// Client configuré depuis `sources.navidrome` ou l'environnement
    pub fn from_config(config: &Config) -> NavidromeResult<Self> {
        let credentials = config
            .get_navidrome_credentials()
            .map_err(|e| NavidromeError::configuration(e.to_string()))?;
        Self::from_credentials(credentials)
    }

    pub fn from_credentials(credentials: NavidromeCredentials) -> NavidromeResult<Self> {
        NavidromeClient::builder()
            .base_url(credentials.base_url)
            .username(credentials.username)
            .password(credentials.password)
            .build()
    }
}
