mod settings;

pub use settings::{parse_log_level, Cli, Command, DatasetArgs, ForecastSettings, ServeArgs};
