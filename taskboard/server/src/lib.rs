pub mod config {
    use serde::Deserialize;

    #[derive(Deserialize, Debug, Clone)]
    pub struct Config {
        pub db_url: String,
        /// Database name joined onto `db_url` when the URI does not carry one.
        #[serde(default)]
        pub db_name: Option<String>,
        pub secret_key: String,
        #[serde(default = "default_ip")]
        pub ip: String,
        #[serde(default = "default_port")]
        pub port: u16,
    }

    impl Config {
        /// Loads configuration from environment variables.
        pub fn from_env() -> anyhow::Result<Self> {
            let settings = ::config::Config::builder()
                .add_source(::config::Environment::default())
                .build()?;

            Self::from_settings(settings)
        }

        pub fn from_settings(settings: ::config::Config) -> anyhow::Result<Self> {
            let config: Config = settings.try_deserialize()?;
            Ok(config)
        }

        /// Connection URI handed to SeaORM.
        pub fn database_url(&self) -> String {
            match self.db_name.as_deref().filter(|name| !name.is_empty()) {
                Some(name) => format!("{}/{}", self.db_url.trim_end_matches('/'), name),
                None => self.db_url.clone(),
            }
        }

        pub fn bind_address(&self) -> String {
            format!("{}:{}", self.ip, self.port)
        }
    }

    fn default_ip() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

}

pub mod auth;
pub mod category;
pub mod entities;
pub mod flash;
pub mod task;
pub mod user;
pub mod web;
