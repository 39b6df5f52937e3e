use crate::{env::EnvManager, error::ConfigError};
use model::execution::connection::Connection;

/// Reads `<PREFIX>_DB_IP`, `<PREFIX>_DB_PORT`, `<PREFIX>_DB_USER`,
/// `<PREFIX>_DB_PASS` and `<PREFIX>_DBNAME`.
///
/// The port is also accepted as `<PREFIX>_DB_CONFIG`, the name older
/// deployments use.
pub fn connection_from_env(
    env: &EnvManager,
    name: &str,
    prefix: &str,
) -> Result<Connection, ConfigError> {
    let host = env.require(&format!("{prefix}_DB_IP"))?;
    let port_keys = [format!("{prefix}_DB_PORT"), format!("{prefix}_DB_CONFIG")];
    let (port_key, port_raw) =
        env.require_any(&[port_keys[0].as_str(), port_keys[1].as_str()])?;
    let port = port_raw
        .trim()
        .parse::<u16>()
        .map_err(|err| ConfigError::InvalidValue {
            key: port_key.to_string(),
            value: port_raw.to_string(),
            reason: err.to_string(),
        })?;

    Ok(Connection {
        name: name.to_string(),
        host: host.to_string(),
        port,
        user: env.require(&format!("{prefix}_DB_USER"))?.to_string(),
        password: env.require(&format!("{prefix}_DB_PASS"))?.to_string(),
        database: env.require(&format!("{prefix}_DBNAME"))?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::tests::full_env;

    #[test]
    fn test_legacy_port_name() {
        let vars = full_env()
            .into_iter()
            .filter(|(k, _)| *k != "TARGET_DB_PORT")
            .chain([("TARGET_DB_CONFIG", "3310")]);
        let conn = connection_from_env(&EnvManager::from_vars(vars), "target", "TARGET").unwrap();
        assert_eq!(conn.port, 3310);
        assert_eq!(conn.name, "target");
    }

    #[test]
    fn test_port_out_of_range() {
        let vars = full_env()
            .into_iter()
            .filter(|(k, _)| *k != "SOURCE_DB_PORT")
            .chain([("SOURCE_DB_PORT", "70000")]);
        let err = connection_from_env(&EnvManager::from_vars(vars), "source", "SOURCE").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "SOURCE_DB_PORT"));
    }

    #[test]
    fn test_missing_password() {
        let vars = full_env().into_iter().filter(|(k, _)| *k != "SOURCE_DB_PASS");
        let err = connection_from_env(&EnvManager::from_vars(vars), "source", "SOURCE").unwrap_err();
        assert_eq!(err.to_string(), "Missing environment variable: SOURCE_DB_PASS");
    }
}
