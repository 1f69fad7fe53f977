use anyhow::{anyhow, Context, Result};
use shared::database::DatabaseConfig;

use crate::storage::CloudinaryConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cloudinary: CloudinaryConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Cloudinary folder every upload is placed in
    pub folder: String,
    /// Largest request body accepted on `/upload`
    pub body_limit_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            folder: "inschrijvingen".to_string(),
            body_limit_bytes: 100 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| anyhow!("{} is not set", key));

        let body_limit_mb: usize = lookup("UPLOAD_BODY_LIMIT_MB")
            .unwrap_or_else(|| "100".to_string())
            .parse()
            .context("UPLOAD_BODY_LIMIT_MB must be a whole number of megabytes")?;
        let body_limit_bytes = body_limit_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow!("UPLOAD_BODY_LIMIT_MB is too large: {}", body_limit_mb))?;

        Ok(Self {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: lookup("SERVER_PORT")
                    .unwrap_or_else(|| "3000".to_string())
                    .parse()
                    .context("SERVER_PORT must be a valid port")?,
            },
            database: DatabaseConfig::from_lookup(&lookup)?,
            cloudinary: CloudinaryConfig {
                cloud_name: required("CLOUDINARY_CLOUD_NAME")?,
                api_key: required("CLOUDINARY_API_KEY")?,
                api_secret: required("CLOUDINARY_API_SECRET")?,
                api_base: lookup("CLOUDINARY_API_BASE")
                    .unwrap_or_else(|| "https://api.cloudinary.com/v1_1".to_string()),
                resource_type: lookup("CLOUDINARY_RESOURCE_TYPE")
                    .unwrap_or_else(|| "auto".to_string()),
            },
            upload: UploadConfig {
                folder: lookup("UPLOAD_FOLDER").unwrap_or_else(|| UploadConfig::default().folder),
                body_limit_bytes,
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
