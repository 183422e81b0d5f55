use std::env;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults_when_env_unset() {
        env::remove_var("HOST");
        env::remove_var("PORT");
        let config = ServerConfig::from_env();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }

    #[test]
    #[serial]
    fn test_reads_host_and_port() {
        env::set_var("HOST", "127.0.0.1");
        env::set_var("PORT", "9090");
        let config = ServerConfig::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9090);
        env::remove_var("HOST");
        env::remove_var("PORT");
    }

    #[test]
    #[serial]
    fn test_invalid_port_falls_back() {
        env::set_var("PORT", "not-a-port");
        let config = ServerConfig::from_env();
        assert_eq!(config.port, 8080);
        env::remove_var("PORT");
    }
}
