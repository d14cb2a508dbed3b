//! Browser Session Storage
//!
//! The token pair and email live in `localStorage` under the shared
//! [`keys`] so a reload keeps the member signed in.

use bichance::models::TokenPair;
use bichance::session::{keys, Session};
use web_sys::{window, Storage};

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

fn read(storage: &Storage, key: &str) -> Option<String> {
    storage.get_item(key).ok().flatten().filter(|v| !v.is_empty())
}

/// Session as currently stored
pub fn load() -> Session {
    let Some(storage) = local_storage() else {
        return Session::default();
    };
    Session {
        access_token: read(&storage, keys::ACCESS_TOKEN),
        refresh_token: read(&storage, keys::REFRESH_TOKEN),
        email: read(&storage, keys::EMAIL),
        pending_dinner_id: read(&storage, keys::PENDING_DINNER_ID),
        profile: None,
    }
}

pub fn access_token() -> Option<String> {
    local_storage().and_then(|storage| read(&storage, keys::ACCESS_TOKEN))
}

pub fn store_login(tokens: &TokenPair, email: &str) -> Result<(), String> {
    let storage = local_storage().ok_or("localStorage unavailable")?;
    storage
        .set_item(keys::ACCESS_TOKEN, &tokens.access_token)
        .map_err(|_| "Failed to store access token".to_string())?;
    if let Some(refresh) = &tokens.refresh_token {
        storage
            .set_item(keys::REFRESH_TOKEN, refresh)
            .map_err(|_| "Failed to store refresh token".to_string())?;
    }
    storage
        .set_item(keys::EMAIL, email)
        .map_err(|_| "Failed to store email".to_string())?;
    Ok(())
}

/// Sign-out wipes storage entirely
pub fn clear() {
    if let Some(storage) = local_storage() {
        let _ = storage.clear();
    }
}

pub fn set_pending_dinner(dinner_id: &str) -> Result<(), String> {
    let storage = local_storage().ok_or("localStorage unavailable")?;
    storage
        .set_item(keys::PENDING_DINNER_ID, dinner_id)
        .map_err(|_| "Failed to remember the dinner".to_string())
}

/// Read and forget the dinner chosen before checkout
pub fn take_pending_dinner() -> Option<String> {
    let storage = local_storage()?;
    let id = read(&storage, keys::PENDING_DINNER_ID);
    let _ = storage.remove_item(keys::PENDING_DINNER_ID);
    id
}
