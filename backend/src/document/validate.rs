//! Structural checks on an incoming [`DecreeRequest`].
//!
//! Validation runs once, before any rendering, and yields a [`ValidDecree`]
//! with trimmed strings and parsed dates. Nothing downstream re-checks the
//! request.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use decree_common::model::decree::{DecreeRequest, TeamMember};

use super::error::AssemblyError;

pub const MIN_PROJECT_YEAR: i32 = 2000;
pub const MAX_PROJECT_YEAR: i32 = 2100;

const DATE_FORMATS: [&str; 3] = ["%d-%m-%Y", "%d/%m/%Y", "%Y-%m-%d"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDecree {
    pub decree_number: String,
    pub project_name: String,
    pub project_year: i32,
    pub location_name: String,
    pub issue_date: NaiveDate,
    pub term_end_date: NaiveDate,
    pub leader_name: String,
    pub members: Vec<ValidMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidMember {
    pub id: String,
    pub person_name: String,
    pub identifier_code: String,
    pub task_title: String,
}

impl ValidDecree {
    /// Checks every required field in declaration order and stops at the
    /// first problem.
    pub fn from_request(request: &DecreeRequest) -> Result<Self, AssemblyError> {
        let decree_number = required("decreeNumber", &request.decree_number)?;
        let project_name = required("projectName", &request.project_name)?;
        let project_year = project_year(request.project_year)?;
        let location_name = required("locationName", &request.location_name)?;
        let issue_date = date("issueDate", &request.issue_date)?;
        let term_end_date = date("termEndDate", &request.term_end_date)?;
        if term_end_date < issue_date {
            return Err(AssemblyError::invalid(
                "termEndDate",
                "must not be earlier than issueDate",
            ));
        }
        let leader_name = required("leaderName", &request.leader_name)?;
        let members = members(&request.members)?;

        Ok(ValidDecree {
            decree_number,
            project_name,
            project_year,
            location_name,
            issue_date,
            term_end_date,
            leader_name,
            members,
        })
    }
}

/// Trims `value` and rejects it when empty or when it holds a character
/// that cannot appear in an XML 1.0 document.
fn required(field: &str, value: &str) -> Result<String, AssemblyError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AssemblyError::invalid(field, "is required"));
    }
    if let Some(c) = value.chars().find(|&c| !is_xml_char(c)) {
        return Err(AssemblyError::invalid(
            field,
            format!("contains U+{:04X}, which XML does not allow", u32::from(c)),
        ));
    }
    Ok(value.to_string())
}

/// The `Char` production of XML 1.0. Tab, line feed and carriage return are
/// the only C0 controls allowed.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || matches!(c, '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

fn project_year(year: i32) -> Result<i32, AssemblyError> {
    if !(MIN_PROJECT_YEAR..=MAX_PROJECT_YEAR).contains(&year) {
        return Err(AssemblyError::invalid(
            "projectYear",
            format!(
                "must be between {} and {}, got {}",
                MIN_PROJECT_YEAR, MAX_PROJECT_YEAR, year
            ),
        ));
    }
    Ok(year)
}

fn date(field: &str, value: &str) -> Result<NaiveDate, AssemblyError> {
    let value = required(field, value)?;
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&value, format).ok())
        .filter(|date| (MIN_PROJECT_YEAR..=MAX_PROJECT_YEAR).contains(&date.year()))
        .ok_or_else(|| {
            AssemblyError::invalid(
                field,
                format!(
                    "`{}` is not a DD-MM-YYYY date between {} and {}",
                    value, MIN_PROJECT_YEAR, MAX_PROJECT_YEAR
                ),
            )
        })
}

fn members(members: &[TeamMember]) -> Result<Vec<ValidMember>, AssemblyError> {
    if members.is_empty() {
        return Err(AssemblyError::invalid("members", "at least one member is required"));
    }

    let mut seen = HashSet::with_capacity(members.len());
    let mut valid = Vec::with_capacity(members.len());
    for (index, member) in members.iter().enumerate() {
        let path = |name: &str| format!("members[{}].{}", index, name);

        let id = required(&path("id"), &member.id)?;
        if !seen.insert(id.clone()) {
            return Err(AssemblyError::invalid(
                path("id"),
                format!("duplicate member id `{}`", id),
            ));
        }

        valid.push(ValidMember {
            id,
            person_name: required(&path("personName"), &member.person_name)?,
            identifier_code: required(&path("identifierCode"), &member.identifier_code)?,
            task_title: required(&path("taskTitle"), &member.task_title)?,
        });
    }
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn member(id: &str, name: &str) -> TeamMember {
        TeamMember {
            id: id.to_string(),
            person_name: name.to_string(),
            identifier_code: format!("NIP-{}", id),
            task_title: "Pencacah".to_string(),
        }
    }

    fn request() -> DecreeRequest {
        DecreeRequest {
            decree_number: " SK/2024/001 ".to_string(),
            project_name: "Survei A".to_string(),
            project_year: 2024,
            location_name: "Jakarta".to_string(),
            issue_date: "01-01-2024".to_string(),
            term_end_date: "31-12-2024".to_string(),
            leader_name: "Budi".to_string(),
            members: vec![member("1", "Ani"), member("2", "Bayu")],
        }
    }

    fn invalid_field(request: &DecreeRequest) -> String {
        match ValidDecree::from_request(request) {
            Err(AssemblyError::InvalidInput { field, .. }) => field,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn valid_request_is_trimmed_and_parsed() {
        let decree = ValidDecree::from_request(&request()).unwrap();
        assert_eq!(decree.decree_number, "SK/2024/001");
        assert_eq!(decree.issue_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(decree.term_end_date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(decree.members.len(), 2);
        assert_eq!(decree.members[1].person_name, "Bayu");
    }

    #[test]
    fn accepts_slash_and_iso_dates() {
        let mut req = request();
        req.issue_date = "15/02/2024".to_string();
        req.term_end_date = "2024-06-30".to_string();
        let decree = ValidDecree::from_request(&req).unwrap();
        assert_eq!(decree.issue_date, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        assert_eq!(decree.term_end_date, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }

    #[test]
    fn empty_members_is_rejected() {
        let mut req = request();
        req.members.clear();
        assert_eq!(invalid_field(&req), "members");
    }

    #[test]
    fn blank_required_fields_are_named() {
        let mut req = request();
        req.decree_number = "   ".to_string();
        assert_eq!(invalid_field(&req), "decreeNumber");

        let mut req = request();
        req.leader_name.clear();
        assert_eq!(invalid_field(&req), "leaderName");

        let mut req = request();
        req.location_name.clear();
        assert_eq!(invalid_field(&req), "locationName");
    }

    #[test]
    fn blank_member_fields_carry_their_index() {
        let mut req = request();
        req.members[1].task_title = " ".to_string();
        assert_eq!(invalid_field(&req), "members[1].taskTitle");

        let mut req = request();
        req.members[0].identifier_code.clear();
        assert_eq!(invalid_field(&req), "members[0].identifierCode");

        let mut req = request();
        req.members[1].id.clear();
        assert_eq!(invalid_field(&req), "members[1].id");
    }

    #[test]
    fn duplicate_member_ids_are_rejected() {
        let mut req = request();
        req.members.push(member("1", "Citra"));
        assert_eq!(invalid_field(&req), "members[2].id");
    }

    #[test]
    fn project_year_must_be_plausible() {
        let mut req = request();
        req.project_year = 1999;
        assert_eq!(invalid_field(&req), "projectYear");

        req.project_year = 2101;
        assert_eq!(invalid_field(&req), "projectYear");

        req.project_year = 2100;
        assert_matches!(ValidDecree::from_request(&req), Ok(_));
    }

    #[test]
    fn term_end_must_not_precede_issue_date() {
        let mut req = request();
        req.term_end_date = "31-12-2023".to_string();
        assert_eq!(invalid_field(&req), "termEndDate");

        req.term_end_date = "01-01-2024".to_string();
        assert_matches!(ValidDecree::from_request(&req), Ok(_));
    }

    #[test]
    fn unparseable_dates_are_rejected() {
        let mut req = request();
        req.issue_date = "1 Januari 2024".to_string();
        assert_eq!(invalid_field(&req), "issueDate");

        let mut req = request();
        req.term_end_date = "31-02-2024".to_string();
        assert_eq!(invalid_field(&req), "termEndDate");
    }

    #[test]
    fn two_digit_years_are_rejected() {
        let mut req = request();
        req.issue_date = "01-01-24".to_string();
        req.term_end_date = "31-12-24".to_string();
        assert_eq!(invalid_field(&req), "issueDate");

        let mut req = request();
        req.term_end_date = "31-12-24".to_string();
        assert_eq!(invalid_field(&req), "termEndDate");

        let mut req = request();
        req.issue_date = "0024-01-01".to_string();
        assert_eq!(invalid_field(&req), "issueDate");
    }

    #[test]
    fn xml_forbidden_control_characters_are_rejected() {
        let mut req = request();
        req.members[0].person_name = "Ani\u{0B}Putri".to_string();
        assert_eq!(invalid_field(&req), "members[0].personName");

        for c in ['\u{0}', '\u{8}', '\u{C}', '\u{1F}', '\u{FFFE}'] {
            let mut req = request();
            req.project_name = format!("Survei{}A", c);
            assert_eq!(invalid_field(&req), "projectName");
        }
    }

    #[test]
    fn tabs_and_line_breaks_are_kept() {
        let mut req = request();
        req.members[0].task_title = "Pencacah\tLapangan\r\nWilayah 1".to_string();
        let decree = ValidDecree::from_request(&req).unwrap();
        assert_eq!(decree.members[0].task_title, "Pencacah\tLapangan\r\nWilayah 1");
    }
}
