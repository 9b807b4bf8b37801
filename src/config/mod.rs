mod app_config;

pub use app_config::{
    AccountConfig, AppConfig, AuthConfig, LogFormat, LoggingConfig, PaginationConfig,
    ServerConfig, StorageSettings,
};
