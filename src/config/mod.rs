mod lookback;
mod settings;

pub use lookback::{LookbackPeriod, LookbackUnit};
pub use settings::{
    Config, EmbedOptions, Libraries, MessageOptions, PlexSettings, SkipLibraries,
    TestingSettings, UpdateSettings, UptimeSettings, config_path, env_or_default, expand_env,
};
