//! Add/edit employee form.
//!
//! The form holds raw text for every field and validates only on submit.
//! Validation failures are attached to the offending fields and the first
//! one is returned as [`RosterError::Validation`].

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::error::{Result, RosterError};
use crate::domain::{parse_join_date, Employee, EmployeeDraft, EmployeeId, EmployeeStatus};

/// Positions offered by the position picker.
pub const POSITIONS: [&str; 20] = [
    "Software Engineer",
    "Senior Software Engineer",
    "Lead Software Engineer",
    "Frontend Developer",
    "Backend Developer",
    "Full Stack Developer",
    "DevOps Engineer",
    "Product Manager",
    "Project Manager",
    "UI/UX Designer",
    "Data Scientist",
    "Data Analyst",
    "Quality Assurance Engineer",
    "Business Analyst",
    "Marketing Manager",
    "Sales Representative",
    "HR Manager",
    "Finance Manager",
    "Operations Manager",
    "Customer Support Representative",
];

/// Departments offered by the department picker.
pub const DEPARTMENTS: [&str; 12] = [
    "Engineering",
    "Product",
    "Design",
    "Marketing",
    "Sales",
    "Human Resources",
    "Finance",
    "Operations",
    "Customer Support",
    "Data & Analytics",
    "Quality Assurance",
    "DevOps",
];

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*$").expect("email pattern compiles"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone pattern compiles"));

const STATUSES: [&str; 3] = [
    EmployeeStatus::Active.label(),
    EmployeeStatus::Inactive.label(),
    EmployeeStatus::OnLeave.label(),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Position,
    Department,
    Salary,
    JoinDate,
    Status,
}

impl Field {
    /// Tab order.
    pub const ALL: [Self; 9] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::Position,
        Self::Department,
        Self::Salary,
        Self::JoinDate,
        Self::Status,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Position => "Position",
            Self::Department => "Department",
            Self::Salary => "Salary",
            Self::JoinDate => "Join Date",
            Self::Status => "Status",
        }
    }

    /// Fixed options for picker fields, `None` for free text.
    #[must_use]
    pub const fn choices(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Position => Some(&POSITIONS),
            Self::Department => Some(&DEPARTMENTS),
            Self::Status => Some(&STATUSES),
            _ => None,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(EmployeeId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldState {
    pub value: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeForm {
    pub mode: FormMode,
    fields: [FieldState; 9],
    focus: usize,
    /// Picker values carried over from the edited record that are not in
    /// the fixed option lists.
    kept: Vec<(Field, String)>,
    /// Set while the create/update request is in flight.
    pub submitting: bool,
}

impl EmployeeForm {
    /// Empty add form. Join date defaults to `today`, status to Active.
    #[must_use]
    pub fn new_add(today: NaiveDate) -> Self {
        let mut form = Self {
            mode: FormMode::Add,
            fields: Default::default(),
            focus: 0,
            kept: Vec::new(),
            submitting: false,
        };
        form.set(Field::JoinDate, today.format("%Y-%m-%d").to_string());
        form.set(Field::Status, EmployeeStatus::Active.label());
        form
    }

    /// Edit form pre-filled from `employee`.
    ///
    /// A position or department outside the fixed lists stays selectable so
    /// the record can be saved unchanged.
    #[must_use]
    pub fn for_employee(employee: &Employee) -> Self {
        let kept = [
            (Field::Position, employee.position.as_str()),
            (Field::Department, employee.department.as_str()),
        ]
        .into_iter()
        .filter(|(field, value)| {
            !value.trim().is_empty() && field.choices().is_some_and(|options| !options.contains(value))
        })
        .map(|(field, value)| (field, value.to_string()))
        .collect();

        let mut form = Self {
            mode: FormMode::Edit(employee.id),
            fields: Default::default(),
            focus: 0,
            kept,
            submitting: false,
        };
        form.set(Field::FirstName, employee.first_name.as_str());
        form.set(Field::LastName, employee.last_name.as_str());
        form.set(Field::Email, employee.email.as_str());
        form.set(Field::Phone, employee.phone.as_str());
        form.set(Field::Position, employee.position.as_str());
        form.set(Field::Department, employee.department.as_str());
        form.set(Field::Salary, format_salary_input(employee.salary));
        form.set(Field::JoinDate, employee.join_date.format("%Y-%m-%d").to_string());
        form.set(Field::Status, employee.status.label());
        form
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add New Employee",
            FormMode::Edit(_) => "Edit Employee",
        }
    }

    /// Options for a picker field, `None` for free text.
    #[must_use]
    pub fn options(&self, field: Field) -> Option<Vec<&str>> {
        let mut options: Vec<&str> = field.choices()?.to_vec();
        options.extend(
            self.kept
                .iter()
                .filter(|(kept, _)| *kept == field)
                .map(|(_, value)| value.as_str()),
        );
        Some(options)
    }

    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        &self.fields[field.index()].value
    }

    #[must_use]
    pub fn error(&self, field: Field) -> Option<&str> {
        self.fields[field.index()].error.as_deref()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let state = &mut self.fields[field.index()];
        state.value = value.into();
        state.error = None;
    }

    #[must_use]
    pub const fn focused(&self) -> Field {
        Field::ALL[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Field::ALL.len();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.checked_sub(1).unwrap_or(Field::ALL.len() - 1);
    }

    /// Types into the focused text field. Picker fields ignore typing.
    pub fn input_char(&mut self, c: char) {
        let field = self.focused();
        if field.choices().is_some() || c.is_control() {
            return;
        }
        let state = &mut self.fields[field.index()];
        state.value.push(c);
        state.error = None;
    }

    pub fn backspace(&mut self) {
        let field = self.focused();
        if field.choices().is_some() {
            return;
        }
        let state = &mut self.fields[field.index()];
        state.value.pop();
        state.error = None;
    }

    /// Steps the focused picker to its next or previous option.
    ///
    /// An unset picker starts at the first (or last) option.
    pub fn cycle_choice(&mut self, forward: bool) {
        let field = self.focused();
        let Some(options) = self.options(field) else {
            return;
        };
        let current = options.iter().position(|o| *o == self.value(field));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(i), false) => i.checked_sub(1).unwrap_or(options.len() - 1),
        };
        let value = options[next].to_string();
        self.set(field, value);
    }

    /// Validates every field and builds the request payload.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Validation`] carrying the first field error. All
    /// field errors are kept on the form for display.
    pub fn validate(&mut self) -> Result<EmployeeDraft> {
        for field in Field::ALL {
            let error = check(field, self.value(field), self.options(field).as_deref()).err();
            self.fields[field.index()].error = error;
        }

        if let Some(message) = self.fields.iter().find_map(|f| f.error.clone()) {
            tracing::debug!(%message, "form validation failed");
            return Err(RosterError::Validation(message));
        }

        let salary = self.value(Field::Salary).trim().parse::<f64>().map_err(|_| invalid(Field::Salary))?;
        let join_date = parse_join_date(self.value(Field::JoinDate)).ok_or_else(|| invalid(Field::JoinDate))?;
        let status = EmployeeStatus::from_label(self.value(Field::Status)).ok_or_else(|| invalid(Field::Status))?;

        Ok(EmployeeDraft {
            first_name: self.value(Field::FirstName).trim().to_string(),
            last_name: self.value(Field::LastName).trim().to_string(),
            email: self.value(Field::Email).trim().to_string(),
            phone: self.value(Field::Phone).trim().to_string(),
            position: self.value(Field::Position).to_string(),
            department: self.value(Field::Department).to_string(),
            salary,
            join_date,
            status,
        })
    }
}

fn invalid(field: Field) -> RosterError {
    RosterError::Validation(format!("{} is invalid", field.label()))
}

/// Validates one field. Picker fields must hold one of `options`.
fn check(field: Field, raw: &str, options: Option<&[&str]>) -> std::result::Result<(), String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(format!("{} is required", field.label()));
    }

    match field {
        Field::FirstName | Field::LastName if value.chars().count() < 2 => {
            Err(format!("{} must be at least 2 characters", field.label()))
        }
        Field::Email if !EMAIL_RE.is_match(value) => Err("Please enter a valid email address".to_string()),
        Field::Phone if !PHONE_RE.is_match(value) => Err("Please enter a valid phone number".to_string()),
        Field::Salary => match value.parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(()),
            Ok(_) => Err("Salary must be greater than 0".to_string()),
            Err(_) => Err("Salary must be a number".to_string()),
        },
        Field::JoinDate if parse_join_date(value).is_none() => {
            Err("Join Date must be a date (YYYY-MM-DD)".to_string())
        }
        Field::Position | Field::Department | Field::Status => {
            if options.is_some_and(|options| options.contains(&value)) {
                Ok(())
            } else {
                Err(format!("Please select a valid {}", field.label().to_lowercase()))
            }
        }
        _ => Ok(()),
    }
}

fn format_salary_input(salary: f64) -> String {
    if salary.fract() == 0.0 {
        format!("{salary:.0}")
    } else {
        salary.to_string()
    }
}
