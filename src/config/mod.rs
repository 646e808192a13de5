pub mod action;
pub mod global;

pub use action::{ActionConfig, IftttConfig, NotifyOn, TemplateConfig};
pub use global::{global, initiate, set_global, NotifierGlobalConfig};
