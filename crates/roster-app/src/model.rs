// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Count,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Count(Option<usize>),
}

impl FieldValue {
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Count(_) => FieldKind::Count,
        }
    }

    pub fn parse_for(kind: FieldKind, raw: &str) -> Option<Self> {
        match kind {
            FieldKind::Text => Some(Self::Text(raw.to_owned())),
            FieldKind::Count => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Some(Self::Count(None));
                }
                trimmed.parse().ok().map(|count| Self::Count(Some(count)))
            }
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Count(Some(count)) => count.to_string(),
            Self::Count(None) => String::new(),
        }
    }
}

/// A row type that can live in a [`crate::Collection`] and be shown in a
/// [`crate::TableState`].
pub trait Record: Clone + Debug + PartialEq {
    type Id: Copy + Eq + Hash + Debug;
    type Field: Copy + Eq + Debug;

    fn id(&self) -> Self::Id;
    fn field(&self, field: Self::Field) -> FieldValue;
    fn field_kind(field: Self::Field) -> FieldKind;

    /// Returns `false` without mutating when the value kind does not match
    /// the field kind.
    fn set_field(&mut self, field: Self::Field, value: FieldValue) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub employees_count: Option<usize>,
    pub address: String,
}

impl Company {
    pub fn summary(&self) -> CompanySummary {
        CompanySummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanyField {
    Name,
    EmployeesCount,
    Address,
}

impl CompanyField {
    pub const ALL: [Self; 3] = [Self::Name, Self::EmployeesCount, Self::Address];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::EmployeesCount => "employees_count",
            Self::Address => "address",
        }
    }
}

impl Record for Company {
    type Id = CompanyId;
    type Field = CompanyField;

    fn id(&self) -> CompanyId {
        self.id
    }

    fn field(&self, field: CompanyField) -> FieldValue {
        match field {
            CompanyField::Name => FieldValue::Text(self.name.clone()),
            CompanyField::EmployeesCount => FieldValue::Count(self.employees_count),
            CompanyField::Address => FieldValue::Text(self.address.clone()),
        }
    }

    fn field_kind(field: CompanyField) -> FieldKind {
        match field {
            CompanyField::Name | CompanyField::Address => FieldKind::Text,
            CompanyField::EmployeesCount => FieldKind::Count,
        }
    }

    fn set_field(&mut self, field: CompanyField, value: FieldValue) -> bool {
        match (field, value) {
            (CompanyField::Name, FieldValue::Text(value)) => self.name = value,
            (CompanyField::Address, FieldValue::Text(value)) => self.address = value,
            (CompanyField::EmployeesCount, FieldValue::Count(value)) => {
                self.employees_count = value;
            }
            _ => return false,
        }
        true
    }
}

/// The `{id, name}` pair an employee is generated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub id: CompanyId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub company_id: CompanyId,
    /// Snapshot of the company name at generation time. Not kept in sync.
    pub company_name: String,
    pub name: String,
    pub surname: String,
    pub work_position: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeField {
    Surname,
    Name,
    CompanyName,
    WorkPosition,
}

impl EmployeeField {
    pub const ALL: [Self; 4] = [
        Self::Surname,
        Self::Name,
        Self::CompanyName,
        Self::WorkPosition,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Surname => "surname",
            Self::Name => "name",
            Self::CompanyName => "company_name",
            Self::WorkPosition => "work_position",
        }
    }
}

impl Record for Employee {
    type Id = EmployeeId;
    type Field = EmployeeField;

    fn id(&self) -> EmployeeId {
        self.id
    }

    fn field(&self, field: EmployeeField) -> FieldValue {
        let value = match field {
            EmployeeField::Surname => &self.surname,
            EmployeeField::Name => &self.name,
            EmployeeField::CompanyName => &self.company_name,
            EmployeeField::WorkPosition => &self.work_position,
        };
        FieldValue::Text(value.clone())
    }

    fn field_kind(_field: EmployeeField) -> FieldKind {
        FieldKind::Text
    }

    fn set_field(&mut self, field: EmployeeField, value: FieldValue) -> bool {
        let FieldValue::Text(value) = value else {
            return false;
        };
        match field {
            EmployeeField::Surname => self.surname = value,
            EmployeeField::Name => self.name = value,
            EmployeeField::CompanyName => self.company_name = value,
            EmployeeField::WorkPosition => self.work_position = value,
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Companies,
    Employees,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Companies => "companies",
            Self::Employees => "employees",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Company, CompanyField, Employee, EmployeeField, EntityKind, FieldKind, FieldValue, Record,
    };
    use crate::{CompanyId, EmployeeId};

    fn company() -> Company {
        Company {
            id: CompanyId::from_random_bytes([1; 16]),
            name: "Acme".to_owned(),
            employees_count: None,
            address: "1 Main St".to_owned(),
        }
    }

    #[test]
    fn count_parse_accepts_integers_and_empty() {
        assert_eq!(
            FieldValue::parse_for(FieldKind::Count, " 12 "),
            Some(FieldValue::Count(Some(12)))
        );
        assert_eq!(
            FieldValue::parse_for(FieldKind::Count, ""),
            Some(FieldValue::Count(None))
        );
        assert_eq!(FieldValue::parse_for(FieldKind::Count, "twelve"), None);
        assert_eq!(FieldValue::parse_for(FieldKind::Count, "-1"), None);
    }

    #[test]
    fn text_parse_keeps_raw_value() {
        assert_eq!(
            FieldValue::parse_for(FieldKind::Text, "  padded "),
            Some(FieldValue::Text("  padded ".to_owned()))
        );
    }

    #[test]
    fn mismatched_kind_is_rejected_without_mutation() {
        let mut row = company();
        let before = row.clone();
        assert!(!row.set_field(CompanyField::Name, FieldValue::Count(Some(3))));
        assert!(!row.set_field(
            CompanyField::EmployeesCount,
            FieldValue::Text("3".to_owned())
        ));
        assert_eq!(row, before);
    }

    #[test]
    fn company_field_round_trip() {
        let mut row = company();
        for field in CompanyField::ALL {
            let value = row.field(field);
            assert_eq!(value.kind(), Company::field_kind(field), "field {field:?}");
            assert!(row.set_field(field, value.clone()));
            assert_eq!(row.field(field), value);
        }
    }

    #[test]
    fn employee_fields_are_all_text() {
        let mut row = Employee {
            id: EmployeeId::from_random_bytes([2; 16]),
            company_id: CompanyId::from_random_bytes([1; 16]),
            company_name: "Acme".to_owned(),
            name: "Ivan".to_owned(),
            surname: "Petrov".to_owned(),
            work_position: "Engineer".to_owned(),
        };
        for field in EmployeeField::ALL {
            assert_eq!(Employee::field_kind(field), FieldKind::Text);
        }
        assert!(row.set_field(EmployeeField::WorkPosition, FieldValue::Text("Lead".to_owned())));
        assert_eq!(row.work_position, "Lead");
        assert!(!row.set_field(EmployeeField::Name, FieldValue::Count(None)));
    }

    #[test]
    fn field_names_are_snake_case_keys() {
        let names = CompanyField::ALL.map(CompanyField::as_str);
        assert_eq!(names, ["name", "employees_count", "address"]);
        assert_eq!(EmployeeField::CompanyName.as_str(), "company_name");
        assert_eq!(EntityKind::Employees.label(), "employees");
    }

    #[test]
    fn null_count_displays_empty() {
        assert_eq!(FieldValue::Count(None).display(), "");
        assert_eq!(FieldValue::Count(Some(0)).display(), "0");
    }
}
