use serde::{Deserialize, Serialize};

/// Everything needed to print a team assignment decree (SK Tim).
///
/// The export form builds one of these per submission and hands it to the
/// backend exactly once; the backend never mutates it. Missing keys
/// deserialize to empty values so the backend can report the offending field
/// instead of a generic parse failure.
///
/// Keys are camelCase on the wire. The aliases accept payloads produced by
/// the earlier SK Tim form (`nomorSK`, `kotaKabupaten`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecreeRequest {
    /// Human-assigned decree number, e.g. `SK/2024/001`.
    #[serde(alias = "nomorSK")]
    pub decree_number: String,
    pub project_name: String,
    /// Four-digit budget year of the project.
    pub project_year: i32,
    /// Issuing city or regency.
    #[serde(alias = "kotaKabupaten")]
    pub location_name: String,
    /// `DD-MM-YYYY`; `DD/MM/YYYY` and `YYYY-MM-DD` are accepted as well.
    #[serde(alias = "tanggalPenetapan")]
    pub issue_date: String,
    /// End of the work term, same formats as `issue_date`.
    #[serde(alias = "masaKerjaAkhir")]
    pub term_end_date: String,
    /// Signing official.
    #[serde(alias = "namaKetua")]
    pub leader_name: String,
    /// Team roster. Order is the row order of the appendix table.
    #[serde(alias = "teamMembers")]
    pub members: Vec<TeamMember>,
}

/// One row of the decree appendix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamMember {
    /// Unique within a single request only.
    pub id: String,
    pub person_name: String,
    /// Employee number (NIP) or partner number (SOBAT/NMS).
    #[serde(alias = "nipOrSobat")]
    pub identifier_code: String,
    pub task_title: String,
}
