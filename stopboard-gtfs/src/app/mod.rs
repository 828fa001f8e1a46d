mod stopboard_app;
mod stopboard_config;

pub use stopboard_app::{StopboardApp, StopboardOperation};
pub use stopboard_config::{find_target, read_targets};
