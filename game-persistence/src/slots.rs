use game_types::{BearerToken, ProgressRecord, User};
use serde::{de::DeserializeOwned, Serialize};

/// A value with a fixed slot in local storage.
pub trait StoredValue: Serialize + DeserializeOwned {
    const KEY: &'static str;
}

impl StoredValue for User {
    const KEY: &'static str = "playlearn_user";
}

impl StoredValue for BearerToken {
    const KEY: &'static str = "playlearn_token";
}

impl StoredValue for ProgressRecord {
    const KEY: &'static str = "playlearn_game_progress";
}
