//! Command-line interface parsing for roamy
//!
//! Flags either seed the first screen (initial filters, a location to open)
//! or switch to a one-shot headless action (`--create`).

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::{Category, FilterCriteria, NewLocation};

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// The category filter names no known category
    #[error("Invalid category: '{0}'. Valid categories: museum, monument, park, restaurant, attraction, other")]
    InvalidCategory(String),

    /// `--location` and initial filters both ask for the first screen
    #[error("--location cannot be combined with --country, --city, --category or --search")]
    ConflictingStart,

    /// The `--create` file could not be read
    #[error("Failed to read {path}: {source}")]
    ReadPayload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The `--create` file is not a valid location
    #[error("Invalid location payload in {path}: {source}")]
    ParsePayload {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Roamy - discover travel destinations from the terminal
#[derive(Parser, Debug)]
#[command(name = "roamy")]
#[command(about = "Browse, filter and map travel destinations")]
#[command(version)]
pub struct Cli {
    /// Base URL of the locations API
    #[arg(long, value_name = "URL", env = "ROAMY_API_URL")]
    pub api_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start filtered to this country
    #[arg(long)]
    pub country: Option<String>,

    /// Start filtered to this city
    #[arg(long)]
    pub city: Option<String>,

    /// Start filtered to this category
    ///
    /// Valid categories: museum, monument, park, restaurant, attraction, other
    #[arg(long)]
    pub category: Option<String>,

    /// Start with this search term
    #[arg(long)]
    pub search: Option<String>,

    /// Open the detail screen for a location id
    #[arg(long, value_name = "ID")]
    pub location: Option<u64>,

    /// Submit a new location from a JSON file, print the result and exit
    #[arg(long, value_name = "FILE")]
    pub create: Option<PathBuf>,
}

/// What the application does on start
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StartupAction {
    /// Home screen with the default unfiltered listing
    #[default]
    Home,
    /// Home screen with these filters applied
    Filtered(FilterCriteria),
    /// Detail screen for one location
    Detail(u64),
    /// POST the payload and exit without a UI
    Create(NewLocation),
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub action: StartupAction,
}

/// Validates a category argument against the known categories
pub fn parse_category_arg(s: &str) -> Result<Category, CliError> {
    let category = Category::parse(s);
    if matches!(category, Category::Other(_)) && !s.trim().eq_ignore_ascii_case("other") {
        return Err(CliError::InvalidCategory(s.to_string()));
    }
    Ok(category)
}

/// Reads a `NewLocation` from a JSON file
pub fn read_new_location(path: &Path) -> Result<NewLocation, CliError> {
    let content = fs::read_to_string(path).map_err(|source| CliError::ReadPayload {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::ParsePayload {
        path: path.to_path_buf(),
        source,
    })
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// `--create` wins over everything else since it never starts the UI.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if let Some(path) = &cli.create {
            return Ok(Self {
                action: StartupAction::Create(read_new_location(path)?),
            });
        }

        let mut criteria = FilterCriteria::new();
        if let Some(country) = &cli.country {
            criteria = criteria.with_country(country.as_str());
        }
        if let Some(city) = &cli.city {
            criteria = criteria.with_city(city.as_str());
        }
        if let Some(category) = &cli.category {
            criteria = criteria.with_category(parse_category_arg(category)?.as_str());
        }
        if let Some(search) = &cli.search {
            criteria = criteria.with_search(search.as_str());
        }

        let action = match (cli.location, criteria.is_unfiltered()) {
            (Some(_), false) => return Err(CliError::ConflictingStart),
            (Some(id), true) => StartupAction::Detail(id),
            (None, true) => StartupAction::Home,
            (None, false) => StartupAction::Filtered(criteria),
        };
        Ok(Self { action })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category_arg_accepts_known_names() {
        assert_eq!(parse_category_arg("park").unwrap(), Category::Park);
        assert_eq!(parse_category_arg("MUSEUM").unwrap(), Category::Museum);
        assert_eq!(parse_category_arg("other").unwrap().as_str(), "other");
    }

    #[test]
    fn test_parse_category_arg_invalid() {
        let err = parse_category_arg("beach").unwrap_err();
        assert!(err.to_string().contains("Invalid category"));
        assert!(err.to_string().contains("beach"));
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["roamy"]);
        assert!(cli.country.is_none());
        assert!(cli.location.is_none());
        assert!(cli.create.is_none());
    }

    #[test]
    fn test_startup_config_default_is_home() {
        let cli = Cli::parse_from(["roamy"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.action, StartupAction::Home);
    }

    #[test]
    fn test_startup_config_with_filters() {
        let cli = Cli::parse_from(["roamy", "--country", "India", "--category", "Monument"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(
            config.action,
            StartupAction::Filtered(
                FilterCriteria::new()
                    .with_country("India")
                    .with_category("monument")
            )
        );
    }

    #[test]
    fn test_empty_filter_values_mean_home() {
        let cli = Cli::parse_from(["roamy", "--country", " ", "--search", ""]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.action, StartupAction::Home);
    }

    #[test]
    fn test_search_keeps_surrounding_spaces() {
        let cli = Cli::parse_from(["roamy", "--search", " fort"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(
            config.action,
            StartupAction::Filtered(FilterCriteria::new().with_search(" fort"))
        );
    }

    #[test]
    fn test_startup_config_location() {
        let cli = Cli::parse_from(["roamy", "--location", "7"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.action, StartupAction::Detail(7));
    }

    #[test]
    fn test_location_with_filters_conflicts() {
        let cli = Cli::parse_from(["roamy", "--location", "7", "--city", "Agra"]);
        assert!(matches!(
            StartupConfig::from_cli(&cli),
            Err(CliError::ConflictingStart)
        ));
    }

    #[test]
    fn test_invalid_category_fails() {
        let cli = Cli::parse_from(["roamy", "--category", "beach"]);
        assert!(StartupConfig::from_cli(&cli).is_err());
    }

    #[test]
    fn test_create_reads_payload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("new.json");
        fs::write(
            &path,
            r#"{
                "name": "Lodhi Garden", "description": "Park", "category": "park",
                "city": "Delhi", "country": "India",
                "coordinates": {"latitude": 28.59, "longitude": 77.21}
            }"#,
        )
        .unwrap();

        let cli = Cli::parse_from(["roamy", "--create", path.to_str().unwrap(), "--city", "x"]);
        let config = StartupConfig::from_cli(&cli).unwrap();

        match config.action {
            StartupAction::Create(new_location) => assert_eq!(new_location.name, "Lodhi Garden"),
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn test_create_with_missing_file_fails() {
        let cli = Cli::parse_from(["roamy", "--create", "/nonexistent/roamy/new.json"]);
        assert!(matches!(
            StartupConfig::from_cli(&cli),
            Err(CliError::ReadPayload { .. })
        ));
    }

    #[test]
    fn test_create_with_bad_json_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let cli = Cli::parse_from(["roamy", "--create", path.to_str().unwrap()]);
        assert!(matches!(
            StartupConfig::from_cli(&cli),
            Err(CliError::ParsePayload { .. })
        ));
    }
}
