// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;

use crate::{CompanyId, Employee};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange<Id> {
    /// Toggle one id.
    Single(Id),
    /// Replace the whole set.
    Bulk(Vec<Id>),
}

/// Selected ids in insertion order, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet<Id> {
    ids: Vec<Id>,
}

impl<Id> Default for SelectionSet<Id> {
    fn default() -> Self {
        Self { ids: Vec::new() }
    }
}

impl<Id: Copy + PartialEq> SelectionSet<Id> {
    pub fn contains(&self, id: Id) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Id> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[Id] {
        &self.ids
    }

    /// Adds `id` when absent, removes it when present. Returns whether the id
    /// is selected afterwards.
    pub fn toggle(&mut self, id: Id) -> bool {
        if let Some(position) = self.ids.iter().position(|entry| *entry == id) {
            self.ids.remove(position);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn replace(&mut self, ids: impl IntoIterator<Item = Id>) {
        self.clear();
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn apply(&mut self, change: SelectionChange<Id>) {
        match change {
            SelectionChange::Single(id) => {
                self.toggle(id);
            }
            SelectionChange::Bulk(ids) => self.replace(ids),
        }
    }
}

impl<Id: Copy + PartialEq> FromIterator<Id> for SelectionSet<Id> {
    fn from_iter<I: IntoIterator<Item = Id>>(iter: I) -> Self {
        let mut set = Self::default();
        set.replace(iter);
        set
    }
}

/// Employees that belong to a selected company, ordered by company name.
pub fn visible_employees(
    employees: &[Employee],
    selected_companies: &SelectionSet<CompanyId>,
) -> Vec<Employee> {
    let mut visible = employees
        .iter()
        .filter(|employee| selected_companies.contains(employee.company_id))
        .cloned()
        .collect::<Vec<_>>();
    visible.sort_by(|left, right| locale_cmp(&left.company_name, &right.company_name));
    visible
}

/// Case-insensitive ordering that treats `ё` as `е`. Equal keys fall back
/// to lowercase before uppercase, then to code points, so the order is total.
pub fn locale_cmp(left: &str, right: &str) -> Ordering {
    collation_key(left)
        .cmp(collation_key(right))
        .then_with(|| case_key(left).cmp(case_key(right)))
}

fn case_key(value: &str) -> impl Iterator<Item = (bool, char)> + '_ {
    value.chars().map(|ch| (ch.is_uppercase(), ch))
}

fn collation_key(value: &str) -> impl Iterator<Item = char> + '_ {
    value.chars().flat_map(char::to_lowercase).map(|ch| match ch {
        'ё' => 'е',
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::{SelectionChange, SelectionSet, locale_cmp, visible_employees};
    use crate::{CompanyId, Employee, EmployeeId};
    use std::cmp::Ordering;

    fn employee(seed: u8, company: CompanyId, company_name: &str) -> Employee {
        Employee {
            id: EmployeeId::from_random_bytes([seed; 16]),
            company_id: company,
            company_name: company_name.to_owned(),
            name: format!("name-{seed}"),
            surname: format!("surname-{seed}"),
            work_position: "Analyst".to_owned(),
        }
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let mut set = [1_u8, 2].into_iter().collect::<SelectionSet<_>>();
        let before = set.clone();

        assert!(set.toggle(3));
        assert!(!set.toggle(3));
        assert_eq!(set, before);

        assert!(!set.toggle(1));
        assert!(set.toggle(1));
        assert!(set.contains(1));
        assert_eq!(set.len(), before.len());
    }

    #[test]
    fn bulk_change_replaces_and_dedups() {
        let mut set = SelectionSet::default();
        set.apply(SelectionChange::Single(9_u8));
        set.apply(SelectionChange::Bulk(vec![1, 2, 2, 3]));
        assert_eq!(set.as_slice(), &[1, 2, 3]);

        set.apply(SelectionChange::Bulk(Vec::new()));
        assert!(set.is_empty());
    }

    #[test]
    fn visible_employees_filters_and_sorts_by_company_name() {
        let acme = CompanyId::from_random_bytes([1; 16]);
        let bravo = CompanyId::from_random_bytes([2; 16]);
        let employees = vec![employee(1, bravo, "Bravo"), employee(2, acme, "Acme")];
        let selected = [acme, bravo].into_iter().collect::<SelectionSet<_>>();

        let visible = visible_employees(&employees, &selected);
        let names = visible
            .iter()
            .map(|employee| employee.company_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Acme", "Bravo"]);
        assert_eq!(visible[0].id, employees[1].id);
        assert_eq!(employees[0].company_name, "Bravo", "source must not be reordered");
    }

    #[test]
    fn visible_employees_drops_unselected_companies() {
        let acme = CompanyId::from_random_bytes([1; 16]);
        let bravo = CompanyId::from_random_bytes([2; 16]);
        let employees = vec![employee(1, bravo, "Bravo"), employee(2, acme, "Acme")];
        let selected = [bravo].into_iter().collect::<SelectionSet<_>>();

        let visible = visible_employees(&employees, &selected);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].company_id, bravo);
        assert!(visible_employees(&employees, &SelectionSet::default()).is_empty());
    }

    #[test]
    fn locale_cmp_ignores_case_and_folds_yo() {
        assert_eq!(locale_cmp("acme", "Bravo"), Ordering::Less);
        assert_eq!(locale_cmp("Ёлка", "Жук"), Ordering::Less);
        assert_eq!(locale_cmp("еж", "ёж"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn locale_cmp_puts_lowercase_first_on_case_ties() {
        assert_eq!(locale_cmp("альфа", "Альфа"), Ordering::Less);
        assert_eq!(locale_cmp("Альфа", "альфа"), Ordering::Greater);
        assert_eq!(locale_cmp("acme", "Acme"), Ordering::Less);
        assert_eq!(locale_cmp("Альфа", "Бета"), Ordering::Less);
    }

    #[test]
    fn replace_drops_previous_members() {
        let mut set = [1_u8, 2, 3].into_iter().collect::<SelectionSet<_>>();
        set.replace([3, 4]);
        assert_eq!(set.as_slice(), &[3, 4]);

        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(3));
    }
}
