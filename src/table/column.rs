//! Table columns and sort keys.

use std::cmp::Ordering;

use crate::domain::Employee;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Name,
    Email,
    Phone,
    Position,
    Department,
    Salary,
    JoinDate,
    Status,
}

impl Column {
    /// Display order. Digit keys `1`..`9` select sort columns in this order.
    pub const ALL: [Self; 9] = [
        Self::Id,
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Position,
        Self::Department,
        Self::Salary,
        Self::JoinDate,
        Self::Status,
    ];

    /// Columns hidden first when the pane is too narrow, in drop order.
    pub const DROP_ORDER: [Self; 6] = [
        Self::Phone,
        Self::JoinDate,
        Self::Department,
        Self::Email,
        Self::Salary,
        Self::Position,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Position => "Position",
            Self::Department => "Department",
            Self::Salary => "Salary",
            Self::JoinDate => "Join Date",
            Self::Status => "Status",
        }
    }

    /// Preferred display width in cells, header included.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Id => 5,
            Self::Name => 22,
            Self::Email => 28,
            Self::Phone => 14,
            Self::Position => 24,
            Self::Department => 18,
            Self::Salary => 10,
            Self::JoinDate => 13,
            Self::Status => 9,
        }
    }

    /// Column for a 1-based digit key.
    #[must_use]
    pub fn from_digit(digit: u32) -> Option<Self> {
        let index = usize::try_from(digit).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    /// Cell text for `employee`.
    #[must_use]
    pub fn cell(self, employee: &Employee) -> String {
        match self {
            Self::Id => employee.id.to_string(),
            Self::Name => employee.full_name(),
            Self::Email => employee.email.clone(),
            Self::Phone => employee.phone.clone(),
            Self::Position => employee.position.clone(),
            Self::Department => employee.department.clone(),
            Self::Salary => employee.formatted_salary(),
            Self::JoinDate => employee.formatted_join_date(),
            Self::Status => employee.status.label().to_string(),
        }
    }

    /// Whether the filter searches this column's text.
    #[must_use]
    pub const fn is_searchable(self) -> bool {
        !matches!(self, Self::Id | Self::Salary | Self::JoinDate)
    }

    /// Ascending order of two rows on this column.
    ///
    /// Text compares case-insensitively; numbers and dates by value.
    #[must_use]
    pub fn compare(self, a: &Employee, b: &Employee) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Salary => a.salary.total_cmp(&b.salary),
            Self::JoinDate => a.join_date.cmp(&b.join_date),
            Self::Status => a.status.label().cmp(b.status.label()),
            Self::Name => compare_text(&a.full_name(), &b.full_name()),
            Self::Email => compare_text(&a.email, &b.email),
            Self::Phone => compare_text(&a.phone, &b.phone),
            Self::Position => compare_text(&a.position, &b.position),
            Self::Department => compare_text(&a.department, &b.department),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: Column,
    pub direction: SortDirection,
}

impl SortKey {
    #[must_use]
    pub fn compare(self, a: &Employee, b: &Employee) -> Ordering {
        let ordering = self.column.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_keys_map_to_columns() {
        assert_eq!(Column::from_digit(1), Some(Column::Id));
        assert_eq!(Column::from_digit(9), Some(Column::Status));
        assert_eq!(Column::from_digit(0), None);
        assert_eq!(Column::from_digit(10), None);
    }
}
