//! 会话存储
//!
//! 管理员会话只存在于 sessionStorage，关闭标签页即失效。
//! 所有键集中在这里，组件不直接访问 storage。

use gloo_storage::{SessionStorage, Storage};
use serde::{Serialize, de::DeserializeOwned};
use vikasam_shared::AdminProfile;

pub const KEY_TOKEN: &str = "adminToken";
pub const KEY_ADMIN: &str = "adminData";
pub const KEY_ACTIVE_TAB: &str = "adminActiveTab";
pub const KEY_STATS_SECTION: &str = "activeStatsSection";

/// 会话存储访问器
pub struct SessionStore;

impl SessionStore {
    fn read<T: DeserializeOwned>(key: &str) -> Option<T> {
        SessionStorage::get(key).ok()
    }

    fn write<T: Serialize>(key: &str, value: &T) {
        if let Err(e) = SessionStorage::set(key, value) {
            log::warn!("[Storage] failed to write {}: {}", key, e);
        }
    }

    pub fn token() -> Option<String> {
        Self::read::<String>(KEY_TOKEN).filter(|t| !t.is_empty())
    }

    pub fn admin() -> Option<AdminProfile> {
        Self::read(KEY_ADMIN)
    }

    pub fn save_session(token: &str, admin: &AdminProfile) {
        Self::write(KEY_TOKEN, &token);
        Self::write(KEY_ADMIN, admin);
    }

    /// 登出时清除三项会话数据
    pub fn clear_session() {
        SessionStorage::delete(KEY_TOKEN);
        SessionStorage::delete(KEY_ADMIN);
        SessionStorage::delete(KEY_ACTIVE_TAB);
    }

    pub fn active_tab() -> Option<String> {
        Self::read(KEY_ACTIVE_TAB)
    }

    pub fn set_active_tab(tab: &str) {
        Self::write(KEY_ACTIVE_TAB, &tab);
    }

    pub fn stats_section() -> Option<String> {
        Self::read(KEY_STATS_SECTION)
    }

    pub fn set_stats_section(section: &str) {
        Self::write(KEY_STATS_SECTION, &section);
    }
}
