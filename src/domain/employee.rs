//! Employee domain model.
//!
//! [`Employee`] is the record served by the `/users` REST collection. The wire
//! format is camelCase JSON; identifiers and join dates are decoded leniently
//! because json-server releases disagree on their representation.

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of an employee record, assigned by the backend.
///
/// Decodes from either a JSON number (`7`) or a numeric string (`"7"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u64);

impl<'de> Deserialize<'de> for EmployeeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => s
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| D::Error::custom(format!("invalid employee id: {s:?}"))),
        }
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Active,
    Inactive,
    #[serde(rename = "On Leave")]
    OnLeave,
}

impl EmployeeStatus {
    /// Every status, in the order offered by the edit form.
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::OnLeave];

    /// Display label, identical to the wire value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::OnLeave => "On Leave",
        }
    }

    /// Parses a display label back into a status.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An employee record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
    #[serde(with = "join_date")]
    pub join_date: NaiveDate,
    pub status: EmployeeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// An employee without an identifier: the body of create and update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub department: String,
    pub salary: f64,
    #[serde(with = "join_date")]
    pub join_date: NaiveDate,
    pub status: EmployeeStatus,
}

impl Employee {
    /// Builds a full record from a draft and a server-assigned id.
    #[must_use]
    pub fn from_draft(id: EmployeeId, draft: EmployeeDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            position: draft.position,
            department: draft.department,
            salary: draft.salary,
            join_date: draft.join_date,
            status: draft.status,
            avatar: None,
        }
    }

    /// Copies the editable fields into a draft.
    #[must_use]
    pub fn to_draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            position: self.position.clone(),
            department: self.department.clone(),
            salary: self.salary,
            join_date: self.join_date,
            status: self.status,
        }
    }

    /// `"First Last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Lowercased text the table filter matches against.
    ///
    /// Covers name parts, contact info, role, department and status.
    #[must_use]
    pub fn search_text(&self) -> String {
        [
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.position.as_str(),
            self.department.as_str(),
            self.status.label(),
        ]
        .join(" ")
        .to_lowercase()
    }

    /// Salary as whole US dollars, e.g. `$85,000`.
    #[must_use]
    pub fn formatted_salary(&self) -> String {
        format_usd(self.salary)
    }

    /// Join date as `Jan 15, 2023`.
    #[must_use]
    pub fn formatted_join_date(&self) -> String {
        self.join_date.format("%b %-d, %Y").to_string()
    }
}

/// Formats an amount as US dollars without decimals.
#[must_use]
pub fn format_usd(amount: f64) -> String {
    #[allow(clippy::cast_possible_truncation)]
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Lenient `joinDate` codec: accepts `YYYY-MM-DD` or RFC 3339, writes `YYYY-MM-DD`.
mod join_date {
    use chrono::{DateTime, NaiveDate};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid join date: {raw:?}")))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, FORMAT)
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
            .or_else(|| raw.get(..10).and_then(|prefix| NaiveDate::parse_from_str(prefix, FORMAT).ok()))
    }
}

/// Parses a join date the same way the wire codec does.
#[must_use]
pub fn parse_join_date(raw: &str) -> Option<NaiveDate> {
    join_date::parse(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json(id: &str) -> String {
        format!(
            r#"{{
                "id": {id},
                "firstName": "John",
                "lastName": "Doe",
                "email": "john.doe@example.com",
                "phone": "+15550100",
                "position": "Software Engineer",
                "department": "Engineering",
                "salary": 85000,
                "joinDate": "2023-01-15T00:00:00.000Z",
                "status": "On Leave"
            }}"#
        )
    }

    #[test]
    fn decodes_numeric_and_string_ids() {
        let numeric: Employee = serde_json::from_str(&sample_json("7")).unwrap();
        let textual: Employee = serde_json::from_str(&sample_json("\"7\"")).unwrap();

        assert_eq!(numeric.id, EmployeeId(7));
        assert_eq!(textual.id, EmployeeId(7));
        assert_eq!(numeric.status, EmployeeStatus::OnLeave);
        assert_eq!(numeric.join_date, NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
    }

    #[test]
    fn rejects_non_numeric_id() {
        let result: std::result::Result<Employee, _> = serde_json::from_str(&sample_json("\"abc\""));
        assert!(result.is_err());
    }

    #[test]
    fn serializes_camel_case_with_plain_date() {
        let employee: Employee = serde_json::from_str(&sample_json("3")).unwrap();
        let value = serde_json::to_value(employee.to_draft()).unwrap();

        assert_eq!(value["firstName"], "John");
        assert_eq!(value["joinDate"], "2023-01-15");
        assert_eq!(value["status"], "On Leave");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn search_text_covers_names_and_status() {
        let employee: Employee = serde_json::from_str(&sample_json("1")).unwrap();
        let text = employee.search_text();

        assert!(text.contains("john doe"));
        assert!(text.contains("engineering"));
        assert!(text.contains("on leave"));
    }

    #[test]
    fn formats_salary_and_date() {
        let employee: Employee = serde_json::from_str(&sample_json("1")).unwrap();

        assert_eq!(employee.formatted_salary(), "$85,000");
        assert_eq!(employee.formatted_join_date(), "Jan 15, 2023");
        assert_eq!(format_usd(999.6), "$1,000");
        assert_eq!(format_usd(1_234_567.0), "$1,234,567");
        assert_eq!(format_usd(0.0), "$0");
    }
}
