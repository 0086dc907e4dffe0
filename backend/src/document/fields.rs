//! Maps a validated decree onto the names used by template markup.

use super::locale::{self, DayStyle};
use super::markup::{Fields, RenderData, Schema};
use super::template::Logo;
use super::validate::ValidDecree;

pub const MEMBERS: &str = "members";
pub const LETTERHEAD: &str = "letterhead";

pub const GLOBAL_FIELDS: &[&str] = &[
    "decree_number",
    "project_name",
    "project_name_upper",
    "project_year",
    "location_name",
    "location_name_upper",
    "issue_date",
    "issue_date_long",
    "term_end_date",
    "term_end_date_long",
    "leader_name",
    "member_count",
];

pub const MEMBER_FIELDS: &[&str] = &[
    "no",
    "member_id",
    "person_name",
    "identifier_code",
    "task_title",
];

pub const LETTERHEAD_FIELDS: &[&str] = &["logo_rel_id", "logo_name", "logo_cx", "logo_cy"];

pub const SCHEMA: Schema<'static> = Schema {
    fields: GLOBAL_FIELDS,
    sections: &[(MEMBERS, MEMBER_FIELDS), (LETTERHEAD, LETTERHEAD_FIELDS)],
};

/// Relationship id the document uses to reference the logo image.
pub const LOGO_REL_ID: &str = "rIdLogo";

const LOGO_HEIGHT_PX: u64 = 60;
const EMU_PER_PX: u64 = 9525;

/// Builds the render data for one decree. `logo` is `None` when the
/// letterhead should be left out, which empties the `letterhead` section.
pub fn render_data(decree: &ValidDecree, logo: Option<&Logo>) -> RenderData {
    let mut fields = Fields::new();
    fields.insert("decree_number", decree.decree_number.clone());
    fields.insert("project_name", decree.project_name.clone());
    fields.insert("project_name_upper", decree.project_name.to_uppercase());
    fields.insert("project_year", decree.project_year.to_string());
    fields.insert("location_name", decree.location_name.clone());
    fields.insert("location_name_upper", decree.location_name.to_uppercase());
    fields.insert("issue_date", locale::short_date(decree.issue_date));
    fields.insert(
        "issue_date_long",
        locale::long_date(decree.issue_date, DayStyle::TwoDigit),
    );
    fields.insert("term_end_date", locale::short_date(decree.term_end_date));
    fields.insert(
        "term_end_date_long",
        locale::long_date(decree.term_end_date, DayStyle::Numeric),
    );
    fields.insert("leader_name", decree.leader_name.clone());
    fields.insert("member_count", decree.members.len().to_string());

    let members = decree
        .members
        .iter()
        .enumerate()
        .map(|(index, member)| {
            let mut row = Fields::new();
            row.insert("no", (index + 1).to_string());
            row.insert("member_id", member.id.clone());
            row.insert("person_name", member.person_name.clone());
            row.insert("identifier_code", member.identifier_code.clone());
            row.insert("task_title", member.task_title.clone());
            row
        })
        .collect();

    let mut data = RenderData {
        fields,
        ..RenderData::default()
    };
    data.sections.insert(MEMBERS, members);
    data.sections
        .insert(LETTERHEAD, logo.map(letterhead).into_iter().collect());
    data
}

/// The logo is drawn 60px tall; width follows the image's aspect ratio.
fn letterhead(logo: &Logo) -> Fields {
    let height = u64::from(logo.height.max(1));
    let width_px = (u64::from(logo.width) * LOGO_HEIGHT_PX + height / 2) / height;

    let mut scope = Fields::new();
    scope.insert("logo_rel_id", LOGO_REL_ID.to_string());
    scope.insert("logo_name", logo.file_name.clone());
    scope.insert("logo_cx", (width_px * EMU_PER_PX).to_string());
    scope.insert("logo_cy", (LOGO_HEIGHT_PX * EMU_PER_PX).to_string());
    scope
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::validate::ValidMember;
    use chrono::NaiveDate;

    fn decree() -> ValidDecree {
        ValidDecree {
            decree_number: "SK/2024/001".into(),
            project_name: "Survei Angkatan Kerja".into(),
            project_year: 2024,
            location_name: "Kota Batu".into(),
            issue_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            term_end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            leader_name: "Budi".into(),
            members: vec![
                ValidMember {
                    id: "a".into(),
                    person_name: "Ani".into(),
                    identifier_code: "NIP001".into(),
                    task_title: "Surveyor".into(),
                },
                ValidMember {
                    id: "b".into(),
                    person_name: "Bayu".into(),
                    identifier_code: "NMS002".into(),
                    task_title: "Pengawas".into(),
                },
            ],
        }
    }

    #[test]
    fn globals_use_fixed_locale() {
        let data = render_data(&decree(), None);
        assert_eq!(data.fields["location_name_upper"], "KOTA BATU");
        assert_eq!(data.fields["project_name_upper"], "SURVEI ANGKATAN KERJA");
        assert_eq!(data.fields["issue_date_long"], "01 Januari 2024");
        assert_eq!(data.fields["term_end_date_long"], "31 Desember 2024");
        assert_eq!(data.fields["issue_date"], "01-01-2024");
        assert_eq!(data.fields["member_count"], "2");
    }

    #[test]
    fn member_rows_are_numbered_from_one_in_order() {
        let data = render_data(&decree(), None);
        let rows = &data.sections[MEMBERS];
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["no"], "1");
        assert_eq!(rows[0]["person_name"], "Ani");
        assert_eq!(rows[1]["no"], "2");
        assert_eq!(rows[1]["identifier_code"], "NMS002");
    }

    #[test]
    fn letterhead_scope_scales_logo_to_sixty_pixels() {
        let logo = Logo {
            part: "word/media/logo.png".into(),
            file_name: "logo.png".into(),
            width: 240,
            height: 120,
        };
        let data = render_data(&decree(), Some(&logo));
        let scopes = &data.sections[LETTERHEAD];
        assert_eq!(scopes.len(), 1);
        assert_eq!(scopes[0]["logo_cy"], (60 * 9525).to_string());
        assert_eq!(scopes[0]["logo_cx"], (120 * 9525).to_string());
        assert_eq!(scopes[0]["logo_rel_id"], LOGO_REL_ID);

        let plain = render_data(&decree(), None);
        assert!(plain.sections[LETTERHEAD].is_empty());
    }
}
