use serde::{Deserialize, Serialize};

use std::{env, fs, path::Path};

const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const EXAMPLE_CONFIG_PATH: &str = "config.example.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the relay sends from.
    pub sender: String,
    /// Site owner receiving every notification.
    pub operator_address: String,
    pub smtp_relay: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_pass: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Name used in email copy ("Thanks for reaching out to ...").
    #[serde(default = "default_site_name")]
    pub site_name: String,
}

const fn default_smtp_port() -> u16 {
    465
}

const fn default_port() -> u16 {
    8080
}

fn default_site_name() -> String {
    "Portfolio".to_string()
}

fn required_var(name: &str) -> Result<String, String> {
    env::var(name).map_err(|_| format!("{name} environment variable is required"))
}

fn load_from_env() -> Result<Config, Box<dyn std::error::Error>> {
    let smtp_port = match env::var("SMTP_PORT") {
        Ok(v) => v
            .parse::<u16>()
            .map_err(|e| format!("Failed to parse SMTP_PORT: {e}"))?,
        Err(_) => default_smtp_port(),
    };

    let port = match env::var("PORT") {
        Ok(v) => v
            .parse::<u16>()
            .map_err(|e| format!("Failed to parse PORT: {e}"))?,
        Err(_) => default_port(),
    };

    Ok(Config {
        sender: required_var("SENDER")?,
        operator_address: required_var("OPERATOR_ADDRESS")?,
        smtp_relay: required_var("SMTP_RELAY")?,
        smtp_port,
        smtp_username: required_var("SMTP_USERNAME")?,
        smtp_pass: required_var("SMTP_PASSWORD")?,
        port,
        site_name: env::var("SITE_NAME").unwrap_or_else(|_| default_site_name()),
    })
}

fn load_from_file(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(Into::into)
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path =
        env::var("CONTACT_RELAY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    // Try env path
    if Path::new(&config_path).exists() {
        return load_from_file(&config_path);
    }

    // Fallback to config.yaml
    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to '{}'",
            config_path,
            DEFAULT_CONFIG_PATH
        );
        return load_from_file(DEFAULT_CONFIG_PATH);
    }

    // Fallback to config.example.yaml
    if Path::new(EXAMPLE_CONFIG_PATH).exists() {
        tracing::warn!(
            "Config file '{}' and '{}' not found, falling back to '{}'\
             \n This file should not be used and should be replaced with actual data",
            config_path,
            DEFAULT_CONFIG_PATH,
            EXAMPLE_CONFIG_PATH
        );
        return load_from_file(EXAMPLE_CONFIG_PATH);
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Successfully loaded configuration from environment variables");
            Ok(config)
        }
        Err(e) => Err(format!(
            "Config file not found and environment variables are incomplete. \
             Tried: '{config_path}', '{DEFAULT_CONFIG_PATH}', '{EXAMPLE_CONFIG_PATH}', \
             and environment variables. Error: {e}"
        )
        .into()),
    }
}
