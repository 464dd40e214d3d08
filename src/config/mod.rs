mod settings;

pub use settings::{
    Config, ConnectivitySettings, DisplaySettings, ServiceSettings, Settings, ThresholdSettings,
    PASSWORD_ENV, USERNAME_ENV,
};
