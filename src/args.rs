use crate::config::AuditConfig;
use crate::controller::audit::date_filter::parse_date_arg;
use crate::error::AuditError;
use chrono::NaiveDate;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[must_use]
pub fn args_checks() -> Args {
    Args::parse()
}

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about = "Flag Golf Genius rounds with incomplete hole-by-hole scoring", long_about = None)]
pub struct Args {
    /// TOML file with any of the audit settings (api_key, base_url, page_size, ...)
    #[arg(long, value_name = "CONFIG_TOML", value_parser = check_readable_file)]
    pub config_toml: Option<PathBuf>,
    /// Golf Genius api key; falls back to the config file, then GOLF_GENIUS_API_KEY
    #[arg(short = 'k', long, value_name = "API_KEY")]
    pub api_key: Option<String>,
    #[arg(long, value_name = "BASE_URL")]
    pub base_url: Option<String>,
    /// Season id to audit. Without it the available seasons are listed.
    #[arg(short = 's', long, value_name = "SEASON_ID")]
    pub season: Option<String>,
    /// First day of the range (YYYY-MM-DD, MM/DD/YYYY or DD/MM/YYYY)
    #[arg(long, value_name = "START_DATE", value_parser = parse_date_value)]
    pub start: Option<NaiveDate>,
    /// Last day of the range, inclusive
    #[arg(long, value_name = "END_DATE", value_parser = parse_date_value)]
    pub end: Option<NaiveDate>,
    #[arg(long, value_name = "PAGE_SIZE")]
    pub page_size: Option<usize>,
    /// List seasons and exit
    #[arg(long)]
    pub list_seasons: bool,
    /// Also list rounds that passed the check
    #[arg(long)]
    pub include_ok: bool,
}

impl Args {
    /// Defaults, then the TOML file, then the environment, then these flags.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the config file can't be read or the result fails
    /// validation
    pub fn audit_config(&self) -> Result<AuditConfig, AuditError> {
        let mut config = match &self.config_toml {
            Some(path) => AuditConfig::from_toml_file(path)?,
            None => AuditConfig::default(),
        };
        if let Some(api_key) = &self.api_key {
            config.api_key.clone_from(api_key);
        }
        let mut config = config.with_env_api_key();
        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Will return `Err` if only one end of the range was given
    pub fn date_range(&self) -> Result<(NaiveDate, NaiveDate), AuditError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(AuditError::InvalidDate(
                "both --start and --end are required to run an audit".into(),
            )),
        }
    }
}

/// # Errors
///
/// Will return `Err` if the file is not readable
pub fn check_readable_file(file: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The config file '{file}' is not readable."));
    }
    Ok(path)
}

/// # Errors
///
/// Will return `Err` if the text is not a recognised date
pub fn parse_date_value(text: &str) -> Result<NaiveDate, String> {
    parse_date_arg(text).map_err(|e| e.to_string())
}
