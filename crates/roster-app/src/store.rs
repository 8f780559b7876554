// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::HashMap;

use crate::{Company, CompanyId, Employee, FieldValue, Record, SelectionChange, SelectionSet};

/// One entity collection plus the ids selected in it.
///
/// Every operation is total: unknown ids degrade to no-ops that report
/// `false` and leave the collection untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<R: Record> {
    rows: Vec<R>,
    selected: SelectionSet<R::Id>,
}

impl<R: Record> Default for Collection<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            selected: SelectionSet::default(),
        }
    }
}

impl<R: Record> Collection<R> {
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn selected(&self) -> &SelectionSet<R::Id> {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row_id: R::Id) -> Option<&R> {
        self.rows.iter().find(|row| row.id() == row_id)
    }

    pub fn replace(&mut self, rows: Vec<R>) {
        self.rows = rows;
    }

    pub fn append(&mut self, rows: Vec<R>) {
        self.rows.extend(rows);
    }

    pub fn update_field(&mut self, row_id: R::Id, field: R::Field, value: FieldValue) -> bool {
        if value.kind() != R::field_kind(field) {
            return false;
        }
        match self.rows.iter_mut().find(|row| row.id() == row_id) {
            Some(row) => row.set_field(field, value),
            None => false,
        }
    }

    /// Removes the row only. Selection state for the id is left as is.
    pub fn delete(&mut self, row_id: R::Id) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id() != row_id);
        self.rows.len() != before
    }

    pub fn change_selection(&mut self, change: SelectionChange<R::Id>) {
        self.selected.apply(change);
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [R] {
        &mut self.rows
    }
}

/// Sets every company's `employees_count` from the full employee list,
/// including `Some(0)` for companies nobody references.
pub fn recompute_employee_counts(companies: &mut [Company], employees: &[Employee]) {
    let mut counts: HashMap<CompanyId, usize> = HashMap::new();
    for employee in employees {
        *counts.entry(employee.company_id).or_default() += 1;
    }
    for company in companies {
        company.employees_count = Some(counts.get(&company.id).copied().unwrap_or(0));
    }
}

#[cfg(test)]
mod tests {
    use super::{Collection, recompute_employee_counts};
    use crate::{
        Company, CompanyField, CompanyId, Employee, EmployeeId, FieldValue, SelectionChange,
    };

    fn company(seed: u8, name: &str) -> Company {
        Company {
            id: CompanyId::from_random_bytes([seed; 16]),
            name: name.to_owned(),
            employees_count: None,
            address: format!("{seed} Main St"),
        }
    }

    fn employee(seed: u8, company: &Company) -> Employee {
        Employee {
            id: EmployeeId::from_random_bytes([seed; 16]),
            company_id: company.id,
            company_name: company.name.clone(),
            name: "Anna".to_owned(),
            surname: "Ivanova".to_owned(),
            work_position: "Designer".to_owned(),
        }
    }

    fn collection() -> Collection<Company> {
        let mut collection = Collection::default();
        collection.replace(vec![company(1, "Acme"), company(2, "Bravo")]);
        collection
    }

    #[test]
    fn update_field_changes_only_target_field() {
        let mut companies = collection();
        let target = companies.rows()[1].clone();

        assert!(companies.update_field(
            target.id,
            CompanyField::Name,
            FieldValue::Text("Bravo Ltd".to_owned()),
        ));

        let updated = companies.get(target.id).expect("updated row present");
        assert_eq!(updated.name, "Bravo Ltd");
        assert_eq!(updated.address, target.address);
        assert_eq!(updated.employees_count, target.employees_count);
        assert_eq!(companies.rows()[0], company(1, "Acme"));
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut companies = collection();
        let before = companies.clone();
        assert!(!companies.update_field(
            CompanyId::from_random_bytes([99; 16]),
            CompanyField::Name,
            FieldValue::Text("Ghost".to_owned()),
        ));
        assert_eq!(companies, before);
    }

    #[test]
    fn update_with_wrong_kind_is_noop() {
        let mut companies = collection();
        let before = companies.clone();
        let id = companies.rows()[0].id;
        assert!(!companies.update_field(id, CompanyField::Address, FieldValue::Count(Some(1))));
        assert_eq!(companies, before);
    }

    #[test]
    fn delete_unknown_id_leaves_collection_unchanged() {
        let mut companies = collection();
        let before = companies.clone();
        assert!(!companies.delete(CompanyId::from_random_bytes([42; 16])));
        assert_eq!(companies, before);
    }

    #[test]
    fn delete_keeps_selection_state() {
        let mut companies = collection();
        let id = companies.rows()[0].id;
        companies.change_selection(SelectionChange::Single(id));

        assert!(companies.delete(id));
        assert_eq!(companies.len(), 1);
        assert!(companies.selected().contains(id));
    }

    #[test]
    fn append_preserves_existing_order() {
        let mut companies = collection();
        companies.append(vec![company(3, "Cobalt")]);
        let names = companies
            .rows()
            .iter()
            .map(|row| row.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Acme", "Bravo", "Cobalt"]);
    }

    #[test]
    fn recompute_counts_sets_zero_for_unreferenced_companies() {
        let mut companies = vec![company(1, "Acme"), company(2, "Bravo"), company(3, "Cobalt")];
        let employees = vec![
            employee(10, &companies[0]),
            employee(11, &companies[0]),
            employee(12, &companies[1]),
        ];

        recompute_employee_counts(&mut companies, &employees);
        let counts = companies
            .iter()
            .map(|company| company.employees_count)
            .collect::<Vec<_>>();
        assert_eq!(counts, vec![Some(2), Some(1), Some(0)]);

        recompute_employee_counts(&mut companies, &employees);
        let again = companies
            .iter()
            .map(|company| company.employees_count)
            .collect::<Vec<_>>();
        assert_eq!(again, counts);
    }
}
