//! Client-local ambient state: persisted JSON documents, preferences, logging.

pub mod logging;
pub mod prefs;
pub mod storage;
