use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// File picked up from the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "form_filler.toml";

/// Chromium launch options.
pub struct BrowserConfig {
    pub headless: bool,
    /// Start with a maximized window instead of a fixed viewport.
    pub maximize: bool,
    /// Hide the usual automation markers (`navigator.webdriver`, blink flag).
    pub stealth: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub chrome_path: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            maximize: true,
            stealth: true,
            viewport_width: 1920,
            viewport_height: 1080,
            chrome_path: None,
        }
    }
}

pub struct BrowserBuilder {
    config: BrowserConfig,
}

impl BrowserBuilder {
    pub fn new() -> Self {
        Self {
            config: BrowserConfig::default(),
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn maximize(mut self, maximize: bool) -> Self {
        self.config.maximize = maximize;
        self
    }

    pub fn stealth(mut self, stealth: bool) -> Self {
        self.config.stealth = stealth;
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self
    }

    pub fn chrome_path(mut self, path: impl Into<String>) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    pub fn build_config(self) -> BrowserConfig {
        self.config
    }
}

impl Default for BrowserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ── Filler configuration ────────────────────────────────────────────

/// Everything a run reads: browser options, pacing, data pools and policies.
///
/// Every field has a default, so a partial TOML file (or none at all) is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FillerConfig {
    pub browser: BrowserSettings,
    pub delays: Delays,
    pub data: DataConfig,
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    pub headless: bool,
    pub maximize: bool,
    pub stealth: bool,
    pub wait_timeout_secs: u64,
    /// Window size when not maximized.
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub chrome_path: Option<String>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: false,
            maximize: true,
            stealth: true,
            wait_timeout_secs: 10,
            viewport_width: 1920,
            viewport_height: 1080,
            chrome_path: None,
        }
    }
}

/// Pacing between page interactions, in milliseconds. Zero disables a pause.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Delays {
    pub between_fields: u64,
    pub after_click: u64,
    pub page_load: u64,
    pub before_submit: u64,
    pub after_submit: u64,
    /// How long the browser stays open after a completed run.
    pub close_grace: u64,
    /// How long the browser stays open for inspection after an aborted run.
    pub fatal_grace: u64,
}

impl Delays {
    /// No pacing at all; ordering of interactions is unchanged.
    pub fn none() -> Self {
        Self {
            between_fields: 0,
            after_click: 0,
            page_load: 0,
            before_submit: 0,
            after_submit: 0,
            close_grace: 0,
            fatal_grace: 0,
        }
    }
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            between_fields: 500,
            after_click: 300,
            page_load: 2000,
            before_submit: 2000,
            after_submit: 3000,
            close_grace: 5000,
            fatal_grace: 10_000,
        }
    }
}

/// Pools and ranges consumed by the value synthesizers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub first_names: Vec<String>,
    pub last_names: Vec<String>,
    pub email_domains: Vec<String>,
    pub email_prefix: String,
    pub phone_min: u64,
    pub phone_max: u64,
    /// Prepended verbatim, e.g. a country code like "+91".
    pub phone_prefix: String,
    pub age_min: u32,
    pub age_max: u32,
    pub random_words: Vec<String>,
    pub short_text_prefixes: Vec<String>,
    pub short_text_suffixes: Vec<String>,
    pub date_range_years: u32,
    /// Days added past today at the end of the date window.
    pub date_start_offset_days: i64,
    pub time_start_hour: u32,
    pub time_end_hour: u32,
    pub time_minutes: Vec<u32>,
    pub datetime_range_years: u32,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            first_names: strings(&[
                "Raj", "Priya", "Amit", "Sneha", "Rahul", "Anita", "Vikram", "Kavita", "Arjun",
                "Pooja", "Suresh", "Meera", "Kiran", "Sunita", "Ravi", "Deepa", "Manoj", "Shilpa",
                "Rohit", "Neha", "Vishal", "Nikhil", "Ritu", "Sandeep", "Kavya", "Anjali",
                "Pankaj", "Suman", "Akshay", "Divya", "Priyanka", "Sachin",
            ]),
            last_names: strings(&[
                "Kumar", "Sharma", "Patel", "Singh", "Verma", "Desai", "Malhotra", "Reddy",
                "Gupta", "Agarwal", "Jain", "Bansal", "Chopra", "Mehta", "Shah", "Pandey",
                "Tiwari", "Mishra", "Yadav", "Joshi", "Nair", "Iyer", "Menon", "Krishnan",
                "Raman", "Srinivasan", "Venkatesh", "Raghavan", "Subramanian",
            ]),
            email_domains: strings(&[
                "gmail.com",
                "yahoo.com",
                "hotmail.com",
                "outlook.com",
                "example.com",
                "test.com",
                "demo.com",
            ]),
            email_prefix: "user".into(),
            phone_min: 6_000_000_000,
            phone_max: 9_999_999_999,
            phone_prefix: String::new(),
            age_min: 18,
            age_max: 60,
            random_words: strings(&[
                "This", "is", "a", "detailed", "response", "to", "the", "question", "providing",
                "comprehensive", "information", "that", "covers", "all", "aspects", "of",
                "query", "Thank", "you", "for", "this", "opportunity", "I", "would", "like",
                "express", "my", "thoughts", "on", "matter", "in", "detail", "an", "automated",
                "testing", "purposes", "The", "system", "working", "as", "expected", "and",
                "functionality", "has", "been", "verified", "successfully", "appreciate",
                "provide", "feedback", "share", "experience", "with", "platform", "It", "very",
                "helpful", "informative", "look", "forward", "future", "interactions",
                "opportunities", "contribute",
            ]),
            short_text_prefixes: strings(&[
                "Response", "Answer", "Reply", "Comment", "Feedback", "Input", "Data", "Info",
                "Note", "Update",
            ]),
            short_text_suffixes: strings(&[
                "123", "456", "789", "ABC", "XYZ", "Test", "Demo", "Sample", "Random", "Auto",
            ]),
            date_range_years: 5,
            date_start_offset_days: 0,
            time_start_hour: 9,
            time_end_hour: 18,
            time_minutes: vec![0, 15, 30, 45],
            datetime_range_years: 2,
        }
    }
}

/// Selection and error-isolation policies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub checkbox_min_select: usize,
    pub checkbox_max_select: usize,
    /// The first dropdown option is usually a "Choose" placeholder.
    pub skip_first_option: bool,
    /// Random scale answers; otherwise always the middle option.
    pub linear_scale_random: bool,
    pub auto_submit: bool,
    pub continue_on_error: bool,
    pub screenshot_on_error: bool,
    pub screenshot_dir: PathBuf,
    pub verbose: bool,
    /// Localized submit captions accepted besides anything containing "submit".
    pub submit_captions: Vec<String>,
    pub seed: Option<u64>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            checkbox_min_select: 1,
            checkbox_max_select: 3,
            skip_first_option: true,
            linear_scale_random: true,
            auto_submit: true,
            continue_on_error: true,
            screenshot_on_error: false,
            screenshot_dir: PathBuf::from("."),
            verbose: true,
            submit_captions: strings(&["सबमिट करें"]),
            seed: None,
        }
    }
}

impl FillerConfig {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] when present, or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {
                warn!("Config file {DEFAULT_CONFIG_FILE} not found, using defaults");
                Self::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        let data = &self.data;
        if data.phone_min > data.phone_max {
            return Err(Error::Config(format!(
                "phone_min {} exceeds phone_max {}",
                data.phone_min, data.phone_max
            )));
        }
        if data.age_min > data.age_max {
            return Err(Error::Config(format!(
                "age_min {} exceeds age_max {}",
                data.age_min, data.age_max
            )));
        }
        if data.time_start_hour > data.time_end_hour || data.time_end_hour > 23 {
            return Err(Error::Config(format!(
                "business hours {}..={} must be ordered and within 0..=23",
                data.time_start_hour, data.time_end_hour
            )));
        }
        if let Some(minute) = data.time_minutes.iter().find(|m| **m > 59) {
            return Err(Error::Config(format!("minute {minute} is out of range")));
        }
        let behavior = &self.behavior;
        if behavior.checkbox_min_select == 0 {
            return Err(Error::Config(
                "checkbox_min_select must be at least 1".to_string(),
            ));
        }
        if behavior.checkbox_min_select > behavior.checkbox_max_select {
            return Err(Error::Config(format!(
                "checkbox_min_select {} exceeds checkbox_max_select {}",
                behavior.checkbox_min_select, behavior.checkbox_max_select
            )));
        }
        Ok(())
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.browser.wait_timeout_secs)
    }

    pub fn browser_config(&self) -> BrowserConfig {
        let mut builder = BrowserBuilder::new()
            .headless(self.browser.headless)
            .maximize(self.browser.maximize)
            .stealth(self.browser.stealth)
            .viewport(self.browser.viewport_width, self.browser.viewport_height);
        if let Some(ref path) = self.browser.chrome_path {
            builder = builder.chrome_path(path);
        }
        builder.build_config()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
