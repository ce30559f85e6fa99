use std::borrow::Cow;
use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::compose::{
    ComposeOptions, DISCORD_MESSAGE_LIMIT, EmbedStyle, MESSAGE_MAX_LENGTH, SectionStyle,
    overflow_notice,
};
use crate::models::ConfigError;

use super::lookback::LookbackPeriod;

/// Fallbacks for variables referenced from the config file when the environment lacks them
const ENV_DEFAULTS: &[(&str, &str)] = &[
    ("PLEX_URL", "https://localhost:32400"),
    ("PLEX_TOKEN", "XXXXXXXXXXXXXXXXXXXXX"),
    (
        "DISCORD_URL",
        "https://discord.com/api/webhooks/XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    ),
    ("LOOPBACK_PERIOD", "24h"),
];

const DEFAULT_CONFIG_FILE: &str = "config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub plex: PlexSettings,
    #[serde(default)]
    pub uptime_status: UptimeSettings,
    #[serde(rename = "plex_discord_media_updates")]
    pub updates: UpdateSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlexSettings {
    pub url: String,
    pub token: String,
    pub libraries: Libraries,
}

/// Library section titles on the Plex server
#[derive(Debug, Clone, Deserialize)]
pub struct Libraries {
    pub movies: String,
    pub shows: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UptimeSettings {
    /// Monitor push URL; elapsed seconds are appended to it
    #[serde(rename = "plex_discord_media_updates", default)]
    pub push_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSettings {
    pub webhook: String,
    pub lookback_period: LookbackPeriod,
    #[serde(default)]
    pub testing_mode: bool,
    #[serde(default)]
    pub testing: Option<TestingSettings>,
    #[serde(default)]
    pub skip_libraries: SkipLibraries,
    #[serde(default = "default_true")]
    pub show_total_episode_count: bool,
    #[serde(default = "default_true")]
    pub show_episode_count_per_show: bool,
    pub message_options: MessageOptions,
    pub embed_options: EmbedOptions,
    pub overflow_footer: String,
    #[serde(default = "default_message_max_length")]
    pub message_max_length: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestingSettings {
    pub webhook: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkipLibraries {
    #[serde(default)]
    pub movies: bool,
    #[serde(default)]
    pub shows: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageOptions {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbedOptions {
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub bullet: String,
    pub movies_colour: u32,
    pub shows_colour: u32,
    pub movies_emote: String,
    pub shows_emote: String,
}

fn default_true() -> bool {
    true
}

fn default_message_max_length() -> usize {
    MESSAGE_MAX_LENGTH
}

/// Config file location: `CONFIG_FILE` if set, else `config.yml` in the working directory
pub fn config_path() -> PathBuf {
    env::var("CONFIG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Look a variable up in the process environment, falling back to the built-in defaults
pub fn env_or_default(name: &str) -> Option<String> {
    env::var(name).ok().or_else(|| {
        ENV_DEFAULTS
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    })
}

/// Replace `$VAR` / `${VAR}` references. Unknown variables are left as written.
pub fn expand_env<'a, F>(text: &'a str, lookup: F) -> Cow<'a, str>
where
    F: FnMut(&str) -> Option<String>,
{
    shellexpand::env_with_context_no_errors(text, lookup)
}

impl Config {
    /// Read, expand and validate the config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!("Loading config from {:?}", path);
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text, env_or_default)
    }

    /// Parse config text after substituting variables through `lookup`
    pub fn from_yaml<F>(text: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let expanded = expand_env(text, lookup);
        let config: Config = serde_yaml::from_str(&expanded)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.updates.message_max_length == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        // A section that fits is sent with the whole budget as its allowance
        if self.updates.message_max_length > DISCORD_MESSAGE_LIMIT {
            return Err(ConfigError::BudgetTooLarge {
                budget: self.updates.message_max_length,
                limit: DISCORD_MESSAGE_LIMIT,
            });
        }
        self.webhook_url()?;
        Ok(())
    }

    /// Webhook to post to; the testing webhook when testing mode is on
    pub fn webhook_url(&self) -> Result<&str, ConfigError> {
        if self.updates.testing_mode {
            self.updates
                .testing
                .as_ref()
                .map(|t| t.webhook.as_str())
                .ok_or(ConfigError::MissingTestingWebhook)
        } else {
            Ok(self.updates.webhook.as_str())
        }
    }

    pub fn lookback(&self) -> LookbackPeriod {
        self.updates.lookback_period
    }

    pub fn uptime_url(&self) -> Option<&str> {
        self.uptime_status
            .push_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Message content shown above the embeds, e.g. "_ _\n**New media added in the past 24 hours:**"
    pub fn header_text(&self) -> String {
        format!(
            "_ _\n**{} {}:**",
            self.updates.message_options.title,
            self.lookback().label()
        )
    }

    pub fn compose_options(&self) -> ComposeOptions {
        let embed = &self.updates.embed_options;
        ComposeOptions {
            style: SectionStyle {
                bullet: embed.bullet.clone(),
                movies_emote: embed.movies_emote.clone(),
                shows_emote: embed.shows_emote.clone(),
                show_episode_count_per_show: self.updates.show_episode_count_per_show,
                show_total_episode_count: self.updates.show_total_episode_count,
            },
            embed: EmbedStyle {
                movies_colour: embed.movies_colour,
                shows_colour: embed.shows_colour,
                thumbnail: embed.thumbnail.clone().filter(|t| !t.trim().is_empty()),
            },
            overflow_notice: overflow_notice(&self.updates.overflow_footer),
            message_budget: self.updates.message_max_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
plex:
  url: ${PLEX_URL}
  token: ${PLEX_TOKEN}
  libraries:
    movies: Movies
    shows: TV Shows
uptime_status:
  plex_discord_media_updates: https://status.example.com/api/push/abc?ping=
plex_discord_media_updates:
  webhook: ${DISCORD_URL}
  lookback_period: ${LOOPBACK_PERIOD}
  skip_libraries:
    movies: false
    shows: false
  show_total_episode_count: true
  show_episode_count_per_show: true
  message_options:
    title: New media added in the past
  embed_options:
    thumbnail: ""
    bullet: "•"
    movies_colour: 0xE5A00D
    shows_colour: 15048717
    movies_emote: "🎬"
    shows_emote: "📺"
  overflow_footer: Too many new items to list them all
"#;

    fn defaults_only(name: &str) -> Option<String> {
        ENV_DEFAULTS
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.to_string())
    }

    #[test]
    fn loads_sample_with_defaults() {
        let config = Config::from_yaml(SAMPLE, defaults_only).unwrap();
        assert_eq!(config.plex.url, "https://localhost:32400");
        assert_eq!(config.plex.libraries.shows, "TV Shows");
        assert_eq!(config.lookback().to_string(), "24h");
        assert_eq!(
            config.webhook_url().unwrap(),
            "https://discord.com/api/webhooks/XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX"
        );
        assert_eq!(
            config.uptime_url(),
            Some("https://status.example.com/api/push/abc?ping=")
        );
        assert_eq!(config.updates.message_max_length, 4000);
        assert!(!config.updates.testing_mode);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_yaml(SAMPLE, |name| match name {
            "LOOPBACK_PERIOD" => Some("1d".to_string()),
            "PLEX_URL" => Some("http://plex.lan:32400".to_string()),
            other => defaults_only(other),
        })
        .unwrap();
        assert_eq!(config.plex.url, "http://plex.lan:32400");
        assert_eq!(config.header_text(), "_ _\n**New media added in the past day:**");
    }

    #[test]
    fn header_pluralizes_period() {
        let config = Config::from_yaml(SAMPLE, defaults_only).unwrap();
        assert_eq!(
            config.header_text(),
            "_ _\n**New media added in the past 24 hours:**"
        );
    }

    #[test]
    fn malformed_lookback_is_fatal() {
        let result = Config::from_yaml(SAMPLE, |name| match name {
            "LOOPBACK_PERIOD" => Some("24y".to_string()),
            other => defaults_only(other),
        });
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid lookback period"), "{err}");
    }

    #[test]
    fn compose_options_follow_embed_settings() {
        let config = Config::from_yaml(SAMPLE, defaults_only).unwrap();
        let options = config.compose_options();
        assert_eq!(options.embed.movies_colour, 0xE5A00D);
        assert_eq!(options.embed.shows_colour, 15048717);
        assert_eq!(options.embed.thumbnail, None);
        assert_eq!(options.style.bullet, "•");
        assert_eq!(
            options.overflow_notice,
            "\n\n**Too many new items to list them all**"
        );
        assert_eq!(options.message_budget, 4000);
    }

    #[test]
    fn testing_mode_uses_testing_webhook() {
        let text = SAMPLE.replace(
            "  skip_libraries:",
            "  testing_mode: true\n  testing:\n    webhook: https://discord.com/api/webhooks/1/test\n  skip_libraries:",
        );
        let config = Config::from_yaml(&text, defaults_only).unwrap();
        assert_eq!(
            config.webhook_url().unwrap(),
            "https://discord.com/api/webhooks/1/test"
        );
    }

    #[test]
    fn testing_mode_without_webhook_is_rejected() {
        let text = SAMPLE.replace("  skip_libraries:", "  testing_mode: true\n  skip_libraries:");
        let err = Config::from_yaml(&text, defaults_only).unwrap_err();
        assert!(matches!(err, ConfigError::MissingTestingWebhook));
    }

    fn with_budget(budget: usize) -> String {
        format!("{}  message_max_length: {}\n", SAMPLE, budget)
    }

    #[test]
    fn zero_budget_is_rejected() {
        let err = Config::from_yaml(&with_budget(0), defaults_only).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroBudget));
    }

    #[test]
    fn budget_over_discord_limit_is_rejected() {
        let err = Config::from_yaml(&with_budget(5000), defaults_only).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::BudgetTooLarge {
                budget: 5000,
                limit: 4096
            }
        ));
    }

    #[test]
    fn budget_at_discord_limit_is_accepted() {
        let config = Config::from_yaml(&with_budget(4096), defaults_only).unwrap();
        assert_eq!(config.compose_options().message_budget, 4096);
    }

    #[test]
    fn unknown_variables_are_left_alone() {
        assert_eq!(expand_env("cost: $5 and ${NOPE}", |_| None), "cost: $5 and ${NOPE}");
    }
}
