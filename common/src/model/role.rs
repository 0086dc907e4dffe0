use serde::{Deserialize, Serialize};

/// Session roles recognised by the administrative dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    /// Team leader (ketua tim).
    KetuaTim,
    /// Staff member (pegawai).
    Pegawai,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::KetuaTim => "ketua_tim",
            Role::Pegawai => "pegawai",
        }
    }

    /// Parses a role name as stored in the user profile. Case and
    /// surrounding whitespace are ignored, and `-` is accepted in place of `_`.
    pub fn parse(value: &str) -> Option<Role> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "admin" => Some(Role::Admin),
            "ketua_tim" => Some(Role::KetuaTim),
            "pegawai" => Some(Role::Pegawai),
            _ => None,
        }
    }
}
