use std::net::IpAddr;

use anyhow::{Context, Result};
use products_hr::Department;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_SUMMARY_DEPARTMENTS: &str = "Field,Packing";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub summary_departments: Vec<Department>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            cors_allowed_origins: split_list(DEFAULT_CORS_ORIGIN),
            summary_departments: parse_departments(DEFAULT_SUMMARY_DEPARTMENTS),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let host = match std::env::var("EVAL_HOST") {
            Ok(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .with_context(|| format!("invalid EVAL_HOST {raw:?}"))?,
            Err(_) => defaults.host,
        };
        let port = match std::env::var("EVAL_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid EVAL_PORT {raw:?}"))?,
            Err(_) => defaults.port,
        };

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| split_list(&raw))
            .unwrap_or(defaults.cors_allowed_origins);

        let summary_departments = std::env::var("SUMMARY_DEPARTMENTS")
            .map(|raw| parse_departments(&raw))
            .unwrap_or(defaults.summary_departments);

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            summary_departments,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

fn parse_departments(raw: &str) -> Vec<Department> {
    split_list(raw)
        .into_iter()
        .map(Department::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_skip_blank_entries() {
        assert_eq!(
            split_list(" http://a.test, ,http://b.test "),
            vec!["http://a.test", "http://b.test"]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn default_tiles_are_field_and_packing() {
        let config = AppConfig::default();
        assert_eq!(
            config.summary_departments,
            vec![Department::Field, Department::Packing]
        );
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn unknown_departments_are_kept() {
        assert_eq!(
            parse_departments("Office,Lab"),
            vec![Department::Office, Department::Other("Lab".into())]
        );
    }
}
