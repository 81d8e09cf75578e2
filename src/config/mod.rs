//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::domain::decor::{DEFAULT_FALLBACK_HEIGHT, DEFAULT_FOLD_MARGIN};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "foglio";
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_PROFILE_BASE_URL: &str = "https://github.com/";

/// Command-line arguments for the Foglio binary.
#[derive(Debug, Parser)]
#[command(name = "foglio", version, about = "Foglio blog post page renderer")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "FOGLIO_CONFIG_FILE", value_name = "PATH", global = true)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render a post document into a complete page.
    Render(Box<RenderArgs>),
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub overrides: RenderOverrides,

    /// Path to the post document JSON produced by the content pipeline.
    #[arg(value_name = "DOCUMENT", value_hint = ValueHint::FilePath)]
    pub document: PathBuf,

    /// Write the rendered page here instead of standard output.
    #[arg(long, short = 'o', value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Measured document height of the hosting rendering context, in pixels.
    /// Without it the configured fallback height is assumed.
    #[arg(long = "viewport-height", value_name = "PIXELS")]
    pub viewport_height: Option<u32>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderOverrides {
    /// Override the site base URL.
    #[arg(long = "site-url", value_name = "URL")]
    pub site_url: Option<String>,

    /// Override the fold margin below which backdrop markers are culled.
    #[arg(long = "fold-margin", value_name = "PIXELS")]
    pub fold_margin: Option<u32>,

    /// Override the document height assumed without a rendering context.
    #[arg(long = "fallback-height", value_name = "PIXELS")]
    pub fallback_height: Option<u32>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub site: SiteSettings,
    pub decor: DecorSettings,
    pub logging: LoggingSettings,
}

/// Site-level metadata shared by every rendered page.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub title: String,
    pub description: String,
    /// Site base URL without a trailing slash; slugs are appended verbatim.
    pub url: String,
    pub language: String,
    pub keywords: Vec<String>,
    /// Site-wide Twitter handle for `twitter:site`, including the `@`.
    pub twitter_site: Option<String>,
    /// Base for author profile links, with a trailing slash.
    pub profile_base_url: String,
    pub author: SiteAuthor,
}

#[derive(Debug, Clone, Default)]
pub struct SiteAuthor {
    pub name: String,
    pub url: String,
}

/// Decorative backdrop tuning.
#[derive(Debug, Clone)]
pub struct DecorSettings {
    pub fold_margin: u32,
    pub fallback_height: u32,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("FOGLIO").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match &cli.command {
        Command::Render(args) => raw.apply_render_overrides(&args.overrides),
    }

    Settings::from_raw(raw)
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    site: RawSiteSettings,
    decor: RawDecorSettings,
    logging: RawLoggingSettings,
}

impl RawSettings {
    fn apply_render_overrides(&mut self, overrides: &RenderOverrides) {
        if let Some(url) = overrides.site_url.as_ref() {
            self.site.url = Some(url.clone());
        }
        if let Some(margin) = overrides.fold_margin {
            self.decor.fold_margin = Some(margin);
        }
        if let Some(height) = overrides.fallback_height {
            self.decor.fallback_height = Some(height);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            site,
            decor,
            logging,
        } = raw;

        let site = build_site_settings(site)?;
        let decor = build_decor_settings(decor);
        let logging = build_logging_settings(logging)?;

        Ok(Self {
            site,
            decor,
            logging,
        })
    }
}

fn build_site_settings(site: RawSiteSettings) -> Result<SiteSettings, LoadError> {
    let url = site
        .url
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| LoadError::invalid("site.url", "must be configured"))?;
    validate_site_url(url)?;
    let url = url.trim_end_matches('/').to_string();

    let twitter_site = site.twitter_site.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    });

    let mut profile_base_url = site
        .profile_base_url
        .unwrap_or_else(|| DEFAULT_PROFILE_BASE_URL.to_string());
    if !profile_base_url.ends_with('/') {
        profile_base_url.push('/');
    }

    Ok(SiteSettings {
        title: site.title.unwrap_or_default(),
        description: site.description.unwrap_or_default(),
        url,
        language: site
            .language
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        keywords: site.keywords.unwrap_or_default(),
        twitter_site,
        profile_base_url,
        author: SiteAuthor {
            name: site.author.name.unwrap_or_default(),
            url: site.author.url.unwrap_or_default(),
        },
    })
}

fn validate_site_url(value: &str) -> Result<(), LoadError> {
    match url::Url::parse(value) {
        Ok(parsed) => {
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(LoadError::invalid(
                    "site.url",
                    format!(
                        "scheme `{}` not supported, must be http or https",
                        parsed.scheme()
                    ),
                ));
            }
            if parsed.host_str().is_none() {
                return Err(LoadError::invalid("site.url", "URL must have a valid host"));
            }
            Ok(())
        }
        Err(err) => Err(LoadError::invalid("site.url", format!("invalid URL: {err}"))),
    }
}

fn build_decor_settings(decor: RawDecorSettings) -> DecorSettings {
    DecorSettings {
        fold_margin: decor.fold_margin.unwrap_or(DEFAULT_FOLD_MARGIN),
        fallback_height: decor.fallback_height.unwrap_or(DEFAULT_FALLBACK_HEIGHT),
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSiteSettings {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    language: Option<String>,
    keywords: Option<Vec<String>>,
    twitter_site: Option<String>,
    profile_base_url: Option<String>,
    author: RawSiteAuthor,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSiteAuthor {
    name: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDecorSettings {
    fold_margin: Option<u32>,
    fallback_height: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}
