use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use reqwest::Url;

use crate::config::Config;
use crate::domain::{DEFAULT_DATABASE, DEFAULT_URL, Domain, QueryConfig};
use crate::error::{OdooSearchError, Result};
use crate::ports::RpcTransport;
use crate::services::SearchService;
use crate::transport::HttpTransport;

#[derive(Parser, Debug)]
#[command(name = "odoo-search")]
#[command(about = "Query an Odoo model over XML-RPC and print the records as JSON")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        value_name = "URL",
        help = "Base URL of Odoo instance [default: http://localhost:8069]"
    )]
    pub url: Option<String>,

    #[arg(
        short,
        long,
        value_name = "DATABASE",
        help = "Name of Odoo database to query [default: odoo]"
    )]
    pub database: Option<String>,

    #[arg(short, long, value_name = "USERNAME", help = "Odoo username")]
    pub username: Option<String>,

    #[arg(short, long, value_name = "PASSWORD", help = "Password for the given username")]
    pub password: Option<String>,

    #[arg(short, long, value_name = "OBJECT", help = "Object to query, e.g. \"res.partner\"")]
    pub object: Option<String>,

    #[arg(
        short,
        long,
        value_name = "DOMAINS",
        help = "JSON-encoded list of Odoo domains to apply. If unspecified, all records are returned"
    )]
    pub query: Option<String>,

    #[arg(
        short,
        long,
        value_name = "FIELD1[,...]",
        help = "Comma-separated list of fields to return. If unspecified, all fields are returned"
    )]
    pub fields: Option<String>,

    #[arg(short, long, help = "Log requests to stderr")]
    pub verbose: bool,
}

/// Splits on runs of commas, swallowing whitespace around each run.
///
/// `"name , email"` and `"name,,email"` both yield `["name", "email"]`.
/// Leading or trailing separators leave an empty piece at that end.
pub fn split_list(value: &str) -> Vec<String> {
    let parts: Vec<&str> = value.split(',').collect();
    let last = parts.len() - 1;

    parts
        .iter()
        .enumerate()
        // "" between two commas is part of one separator run
        .filter(|&(i, part)| !part.is_empty() || i == 0 || i == last)
        .map(|(i, part)| {
            let mut part = *part;
            if i > 0 {
                part = part.trim_start();
            }
            if i < last {
                part = part.trim_end();
            }
            part.to_string()
        })
        .collect()
}

impl Cli {
    /// Settings for `resolve`. When the config file fails to load, a missing
    /// required argument is reported instead of the config error; `env` is
    /// what the environment alone provides.
    pub fn settings(&self, loaded: Result<Config>, env: &Config) -> Result<Config> {
        loaded.or_else(|err| {
            if self.username.is_none() && env.username.is_none() {
                Err(OdooSearchError::MissingArgument("username"))
            } else if self.object.is_none() {
                Err(OdooSearchError::MissingArgument("object"))
            } else {
                Err(err)
            }
        })
    }

    /// Merges flags over the file/env settings and validates the result.
    pub fn resolve(self, config: Config) -> Result<QueryConfig> {
        let username = self
            .username
            .or(config.username)
            .ok_or(OdooSearchError::MissingArgument("username"))?;
        let object = self
            .object
            .ok_or(OdooSearchError::MissingArgument("object"))?;

        let raw_url = self
            .url
            .or(config.url)
            .unwrap_or_else(|| DEFAULT_URL.to_string());
        let url = Url::parse(&raw_url)
            .map_err(|e| OdooSearchError::InvalidUrl(format!("{raw_url}: {e}")))?;

        let domain = match self.query.as_deref() {
            Some(query) => Domain::parse(&split_list(query))?,
            None => Domain::match_all(),
        };

        Ok(QueryConfig {
            url,
            database: self
                .database
                .or(config.database)
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            username,
            password: self.password.or(config.password),
            object,
            domain,
            fields: self.fields.as_deref().map(split_list),
        })
    }
}

/// Runs the query and writes the records to `out` as a single JSON line.
pub async fn execute<T: RpcTransport, W: Write>(
    service: &SearchService<T>,
    config: &QueryConfig,
    out: &mut W,
) -> Result<()> {
    let records = service.run(config).await?;
    serde_json::to_writer(&mut *out, &records)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

pub async fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings(Config::load(), &Config::from_env())?;
    let config = cli.resolve(settings)?;
    let transport = HttpTransport::new(config.url.clone())?;
    let service = SearchService::new(Arc::new(transport));

    let stdout = std::io::stdout();
    execute(&service, &config, &mut stdout.lock()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn strings(parts: &[&str]) -> Vec<String> {
        parts.iter().map(ToString::to_string).collect()
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("odoo-search").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_split_list_trims_around_separators() {
        assert_eq!(split_list("name,email"), strings(&["name", "email"]));
        assert_eq!(split_list("name , email"), strings(&["name", "email"]));
        assert_eq!(split_list("name,,, email"), strings(&["name", "email"]));
        assert_eq!(split_list(" name"), strings(&[" name"]));
        assert_eq!(split_list("name"), strings(&["name"]));
    }

    #[test]
    fn test_split_list_edges() {
        assert_eq!(split_list(""), strings(&[""]));
        assert_eq!(split_list(",name"), strings(&["", "name"]));
        assert_eq!(split_list("name,"), strings(&["name", ""]));
        assert_eq!(split_list(",,name"), strings(&["", "name"]));
        assert_eq!(split_list("a , , b"), strings(&["a", "", "b"]));
    }

    #[test]
    fn test_defaults() {
        let config = cli(&["-u", "admin", "-o", "res.partner"])
            .resolve(Config::default())
            .unwrap();
        assert_eq!(config.url.as_str(), "http://localhost:8069/");
        assert_eq!(config.database, "odoo");
        assert_eq!(config.username, "admin");
        assert_eq!(config.password, None);
        assert_eq!(config.object, "res.partner");
        assert!(config.domain.is_match_all());
        assert_eq!(config.fields, None);
    }

    #[test]
    fn test_missing_username() {
        let err = cli(&["-o", "res.partner"])
            .resolve(Config::default())
            .unwrap_err();
        assert!(matches!(err, OdooSearchError::MissingArgument("username")));
    }

    #[test]
    fn test_missing_object() {
        let err = cli(&["-u", "admin"]).resolve(Config::default()).unwrap_err();
        assert!(matches!(err, OdooSearchError::MissingArgument("object")));
    }

    #[test]
    fn test_username_from_config() {
        let config = cli(&["-o", "res.users"])
            .resolve(Config {
                username: Some("bot".into()),
                ..Config::default()
            })
            .unwrap();
        assert_eq!(config.username, "bot");
    }

    fn broken_file() -> Result<Config> {
        Err(OdooSearchError::Config("config.toml: TOML parse error".into()))
    }

    #[test]
    fn test_broken_config_does_not_hide_missing_username() {
        let err = cli(&["-o", "res.partner"])
            .settings(broken_file(), &Config::default())
            .unwrap_err();
        assert!(matches!(err, OdooSearchError::MissingArgument("username")));
    }

    #[test]
    fn test_broken_config_does_not_hide_missing_object() {
        let err = cli(&["-u", "admin"])
            .settings(broken_file(), &Config::default())
            .unwrap_err();
        assert!(matches!(err, OdooSearchError::MissingArgument("object")));
    }

    #[test]
    fn test_broken_config_reported_when_arguments_present() {
        let env = Config {
            username: Some("bot".into()),
            ..Config::default()
        };
        let err = cli(&["-o", "res.partner"])
            .settings(broken_file(), &env)
            .unwrap_err();
        assert!(matches!(err, OdooSearchError::Config(_)));
    }

    #[test]
    fn test_loaded_settings_pass_through() {
        let loaded = Config {
            username: Some("file-user".into()),
            ..Config::default()
        };
        let settings = cli(&[])
            .settings(Ok(loaded.clone()), &Config::default())
            .unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_flags_override_config() {
        let settings = Config {
            url: Some("https://file.example.com".into()),
            database: Some("file-db".into()),
            username: Some("file-user".into()),
            password: Some("file-pass".into()),
        };
        let config = cli(&[
            "--url",
            "https://flag.example.com",
            "-d",
            "flag-db",
            "-u",
            "flag-user",
            "-p",
            "flag-pass",
            "-o",
            "res.partner",
        ])
        .resolve(settings)
        .unwrap();

        assert_eq!(config.url.as_str(), "https://flag.example.com/");
        assert_eq!(config.database, "flag-db");
        assert_eq!(config.username, "flag-user");
        assert_eq!(config.password(), "flag-pass");
    }

    #[test]
    fn test_query_and_fields() {
        let config = cli(&[
            "-u",
            "admin",
            "-o",
            "res.partner",
            "-q",
            r#"[["foo","=","bar"], ["active", "=", true]]"#,
            "-f",
            "name, email",
        ])
        .resolve(Config::default())
        .unwrap();

        assert_eq!(
            config.domain.clauses(),
            &[json!(["foo", "=", "bar"]), json!(["active", "=", true])]
        );
        assert_eq!(config.fields, Some(strings(&["name", "email"])));
    }

    #[test]
    fn test_malformed_query() {
        let err = cli(&["-u", "admin", "-o", "res.partner", "-q", "[[\"foo\""])
            .resolve(Config::default())
            .unwrap_err();
        assert!(matches!(err, OdooSearchError::InvalidQuery(_)));
    }

    #[test]
    fn test_invalid_url() {
        let err = cli(&["--url", "not a url", "-u", "admin", "-o", "res.partner"])
            .resolve(Config::default())
            .unwrap_err();
        assert!(matches!(err, OdooSearchError::InvalidUrl(_)));
    }
}
