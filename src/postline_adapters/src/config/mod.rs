pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AppEnvironment, ApplicationSetting, AuthSetting, DatabaseSetting, EmailClientSetting,
    PostlineSetting,
};
