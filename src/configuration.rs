use crate::types::Slot;
use std::path::PathBuf;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn port(&self) -> String;
    fn database_url(&self) -> Option<String>;
    fn services_file(&self) -> Option<PathBuf>;
    fn slots(&self) -> Vec<Slot>;
}
