use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slidecraft", about = "AI slide deck generator")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub ai: AiConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret for bearer tokens. Falls back to the
    /// TOKEN_SECRET env var; a random secret is generated (with a warning)
    /// when neither is set, invalidating tokens across restarts.
    pub token_secret: Option<String>,
    pub token_ttl_hours: u64,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AiConfig {
    /// Falls back to the GEMINI_API_KEY env var.
    pub gemini_api_key: Option<String>,
    /// Falls back to the OPENROUTER_API_KEY env var.
    pub openrouter_api_key: Option<String>,
    pub gemini_model: String,
    pub openrouter_model: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: None,
            token_ttl_hours: 24,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            openrouter_api_key: None,
            gemini_model: "gemini-2.0-flash-exp".to_string(),
            openrouter_model: "deepseek/deepseek-chat".to_string(),
        }
    }
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = Self::data_dir(cli);
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| data_dir.join("config.toml"));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };

        // CLI overrides
        if let Some(ref host) = cli.host {
            config.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }

        // Secrets not in the file come from the environment
        if config.auth.token_secret.is_none() {
            config.auth.token_secret = env_nonempty("TOKEN_SECRET");
        }
        if config.ai.gemini_api_key.is_none() {
            config.ai.gemini_api_key = env_nonempty("GEMINI_API_KEY");
        }
        if config.ai.openrouter_api_key.is_none() {
            config.ai.openrouter_api_key = env_nonempty("OPENROUTER_API_KEY");
        }

        // Resolve paths relative to data dir
        if config.database.path.is_none() {
            config.database.path = Some(data_dir.join("slidecraft.db"));
        }

        Ok(config)
    }

    pub fn data_dir(cli: &Cli) -> PathBuf {
        cli.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .expect("Could not determine home directory")
                .join(".slidecraft")
        })
    }

    pub fn db_path(&self) -> &PathBuf {
        self.database.path.as_ref().unwrap()
    }

    /// Signing secret for bearer tokens. Generates a random one when
    /// unconfigured, so issued tokens die with the process.
    pub fn token_secret(&self) -> String {
        match &self.auth.token_secret {
            Some(secret) => secret.clone(),
            None => {
                tracing::warn!(
                    "No token secret configured — generating a random one (tokens invalid after restart)"
                );
                let bytes: [u8; 32] = rand::random();
                hex::encode(bytes)
            }
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
