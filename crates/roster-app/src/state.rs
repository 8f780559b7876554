// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::debug;

use crate::{
    Collection, Company, CompanyField, CompanyId, Employee, EmployeeField, EmployeeId, EntityKind,
    FieldValue, SelectionChange, recompute_employee_counts, visible_employees,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RootState {
    pub companies: Collection<Company>,
    pub employees: Collection<Employee>,
}

impl RootState {
    pub fn visible_employees(&self) -> Vec<Employee> {
        visible_employees(self.employees.rows(), self.companies.selected())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetCompanies(Vec<Company>),
    AppendCompanies(Vec<Company>),
    UpdateCompany {
        row_id: CompanyId,
        field: CompanyField,
        value: FieldValue,
    },
    DeleteCompany(CompanyId),
    ChangeSelectedCompanies(SelectionChange<CompanyId>),
    AppendEmployees(Vec<Employee>),
    UpdateEmployee {
        row_id: EmployeeId,
        field: EmployeeField,
        value: FieldValue,
    },
    DeleteEmployee(EmployeeId),
    ChangeSelectedEmployees(SelectionChange<EmployeeId>),
    RecomputeEmployeeCounts,
}

impl Action {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SetCompanies(_) => "set_companies",
            Self::AppendCompanies(_) => "append_companies",
            Self::UpdateCompany { .. } => "update_company",
            Self::DeleteCompany(_) => "delete_company",
            Self::ChangeSelectedCompanies(_) => "change_selected_companies",
            Self::AppendEmployees(_) => "append_employees",
            Self::UpdateEmployee { .. } => "update_employee",
            Self::DeleteEmployee(_) => "delete_employee",
            Self::ChangeSelectedEmployees(_) => "change_selected_employees",
            Self::RecomputeEmployeeCounts => "recompute_employee_counts",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    CompaniesReplaced { len: usize },
    CompaniesAppended { added: usize, len: usize },
    CompanyUpdated(CompanyId, CompanyField),
    CompanyDeleted(CompanyId),
    SelectionChanged { entity: EntityKind, len: usize },
    EmployeesAppended { added: usize, len: usize },
    EmployeeUpdated(EmployeeId, EmployeeField),
    EmployeeDeleted(EmployeeId),
    EmployeeCountsRecomputed,
}

impl StoreEvent {
    pub const fn touches_companies(&self) -> bool {
        matches!(
            self,
            Self::CompaniesReplaced { .. }
                | Self::CompaniesAppended { .. }
                | Self::CompanyUpdated(..)
                | Self::CompanyDeleted(_)
                | Self::EmployeeCountsRecomputed
        )
    }

    pub const fn touches_employees(&self) -> bool {
        matches!(
            self,
            Self::EmployeesAppended { .. } | Self::EmployeeUpdated(..) | Self::EmployeeDeleted(_)
        )
    }
}

/// The state container. Owned by whoever drives the UI; there is no global
/// instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Store {
    state: RootState,
    revision: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RootState {
        &self.state
    }

    pub fn select<T>(&self, derive: impl FnOnce(&RootState) -> T) -> T {
        derive(&self.state)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies `action` and returns what changed. Follow-up derivations run
    /// after the triggering mutation, so their events come last.
    pub fn dispatch(&mut self, action: Action) -> Vec<StoreEvent> {
        debug!(action = action.label(), "dispatch");
        let mut events = Vec::new();
        if let Some(event) = self.apply(action) {
            events.push(event);
        }

        if events.iter().any(StoreEvent::touches_employees)
            && !self.state.employees.is_empty()
            && let Some(event) = self.apply(Action::RecomputeEmployeeCounts)
        {
            events.push(event);
        }

        for event in &events {
            trace_event(event);
        }
        if !events.is_empty() {
            self.revision = self.revision.wrapping_add(1);
        }
        events
    }

    fn apply(&mut self, action: Action) -> Option<StoreEvent> {
        let companies = &mut self.state.companies;
        let employees = &mut self.state.employees;
        match action {
            Action::SetCompanies(rows) => {
                companies.replace(rows);
                Some(StoreEvent::CompaniesReplaced {
                    len: companies.len(),
                })
            }
            Action::AppendCompanies(rows) => {
                let added = rows.len();
                companies.append(rows);
                Some(StoreEvent::CompaniesAppended {
                    added,
                    len: companies.len(),
                })
            }
            Action::UpdateCompany {
                row_id,
                field,
                value,
            } => companies
                .update_field(row_id, field, value)
                .then_some(StoreEvent::CompanyUpdated(row_id, field)),
            Action::DeleteCompany(row_id) => companies
                .delete(row_id)
                .then_some(StoreEvent::CompanyDeleted(row_id)),
            Action::ChangeSelectedCompanies(change) => {
                companies.change_selection(change);
                Some(StoreEvent::SelectionChanged {
                    entity: EntityKind::Companies,
                    len: companies.selected().len(),
                })
            }
            Action::AppendEmployees(rows) => {
                let added = rows.len();
                employees.append(rows);
                Some(StoreEvent::EmployeesAppended {
                    added,
                    len: employees.len(),
                })
            }
            Action::UpdateEmployee {
                row_id,
                field,
                value,
            } => employees
                .update_field(row_id, field, value)
                .then_some(StoreEvent::EmployeeUpdated(row_id, field)),
            Action::DeleteEmployee(row_id) => employees
                .delete(row_id)
                .then_some(StoreEvent::EmployeeDeleted(row_id)),
            Action::ChangeSelectedEmployees(change) => {
                employees.change_selection(change);
                Some(StoreEvent::SelectionChanged {
                    entity: EntityKind::Employees,
                    len: employees.selected().len(),
                })
            }
            Action::RecomputeEmployeeCounts => {
                recompute_employee_counts(companies.rows_mut(), employees.rows());
                Some(StoreEvent::EmployeeCountsRecomputed)
            }
        }
    }
}

fn trace_event(event: &StoreEvent) {
    match event {
        StoreEvent::CompanyUpdated(row_id, field) => {
            debug!(%row_id, field = field.as_str(), "company field updated");
        }
        StoreEvent::EmployeeUpdated(row_id, field) => {
            debug!(%row_id, field = field.as_str(), "employee field updated");
        }
        StoreEvent::SelectionChanged { entity, len } => {
            debug!(entity = entity.label(), len, "selection changed");
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, Store, StoreEvent};
    use crate::{
        Company, CompanyField, CompanyId, Employee, EmployeeId, EntityKind, FieldValue,
        SelectionChange,
    };

    fn company(seed: u8, name: &str) -> Company {
        Company {
            id: CompanyId::from_random_bytes([seed; 16]),
            name: name.to_owned(),
            employees_count: None,
            address: String::new(),
        }
    }

    fn employee(seed: u8, company: &Company) -> Employee {
        Employee {
            id: EmployeeId::from_random_bytes([seed; 16]),
            company_id: company.id,
            company_name: company.name.clone(),
            name: "Oleg".to_owned(),
            surname: "Smirnov".to_owned(),
            work_position: "Driver".to_owned(),
        }
    }

    #[test]
    fn appending_employees_recomputes_counts_after_the_append() {
        let mut store = Store::new();
        let acme = company(1, "Acme");
        store.dispatch(Action::SetCompanies(vec![acme.clone(), company(2, "Bravo")]));
        assert!(
            store
                .state()
                .companies
                .rows()
                .iter()
                .all(|company| company.employees_count.is_none())
        );

        let events = store.dispatch(Action::AppendEmployees(vec![employee(10, &acme)]));
        assert_eq!(
            events,
            vec![
                StoreEvent::EmployeesAppended { added: 1, len: 1 },
                StoreEvent::EmployeeCountsRecomputed,
            ]
        );
        let counts = store.select(|state| {
            state
                .companies
                .rows()
                .iter()
                .map(|company| company.employees_count)
                .collect::<Vec<_>>()
        });
        assert_eq!(counts, vec![Some(1), Some(0)]);
    }

    #[test]
    fn deleting_the_last_employee_skips_recompute() {
        let mut store = Store::new();
        let acme = company(1, "Acme");
        let worker = employee(10, &acme);
        store.dispatch(Action::SetCompanies(vec![acme.clone()]));
        store.dispatch(Action::AppendEmployees(vec![worker.clone()]));

        let events = store.dispatch(Action::DeleteEmployee(worker.id));
        assert_eq!(events, vec![StoreEvent::EmployeeDeleted(worker.id)]);
        assert_eq!(store.state().companies.rows()[0].employees_count, Some(1));
    }

    #[test]
    fn noop_actions_emit_nothing_and_keep_revision() {
        let mut store = Store::new();
        store.dispatch(Action::SetCompanies(vec![company(1, "Acme")]));
        let before = store.clone();

        let ghost = CompanyId::from_random_bytes([77; 16]);
        assert!(store.dispatch(Action::DeleteCompany(ghost)).is_empty());
        assert!(
            store
                .dispatch(Action::UpdateCompany {
                    row_id: ghost,
                    field: CompanyField::Name,
                    value: FieldValue::Text("x".to_owned()),
                })
                .is_empty()
        );
        assert!(
            store
                .dispatch(Action::DeleteEmployee(EmployeeId::from_random_bytes([78; 16])))
                .is_empty()
        );
        assert_eq!(store, before);
    }

    #[test]
    fn company_rename_does_not_touch_employee_snapshot() {
        let mut store = Store::new();
        let acme = company(1, "Acme");
        store.dispatch(Action::SetCompanies(vec![acme.clone()]));
        store.dispatch(Action::AppendEmployees(vec![employee(10, &acme)]));

        store.dispatch(Action::UpdateCompany {
            row_id: acme.id,
            field: CompanyField::Name,
            value: FieldValue::Text("Acme Holdings".to_owned()),
        });
        assert_eq!(store.state().companies.rows()[0].name, "Acme Holdings");
        assert_eq!(store.state().employees.rows()[0].company_name, "Acme");
    }

    #[test]
    fn company_delete_does_not_cascade() {
        let mut store = Store::new();
        let acme = company(1, "Acme");
        let worker = employee(10, &acme);
        store.dispatch(Action::SetCompanies(vec![acme.clone()]));
        store.dispatch(Action::AppendEmployees(vec![worker.clone()]));
        store.dispatch(Action::ChangeSelectedEmployees(SelectionChange::Single(
            worker.id,
        )));

        store.dispatch(Action::DeleteCompany(acme.id));
        assert!(store.state().companies.is_empty());
        assert_eq!(store.state().employees.rows(), &[worker.clone()]);
        assert!(store.state().employees.selected().contains(worker.id));
    }

    #[test]
    fn selection_change_reports_entity_and_size() {
        let mut store = Store::new();
        let rows = vec![company(1, "Acme"), company(2, "Bravo")];
        let ids = rows.iter().map(|row| row.id).collect::<Vec<_>>();
        store.dispatch(Action::SetCompanies(rows));

        let events = store.dispatch(Action::ChangeSelectedCompanies(SelectionChange::Bulk(ids)));
        assert_eq!(
            events,
            vec![StoreEvent::SelectionChanged {
                entity: EntityKind::Companies,
                len: 2,
            }]
        );
        assert_eq!(store.revision(), 2);
    }
}
