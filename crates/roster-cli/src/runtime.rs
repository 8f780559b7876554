// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::config::Config;
use anyhow::Result;
use roster_app::{Action, Company, CompanySummary, Employee, Store};
use roster_faker::RecordFaker;
use serde::Serialize;
use std::time::Duration;

/// Snapshot printed by `--dump`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub companies: Vec<Company>,
    pub employees: Vec<Employee>,
}

pub struct FakerRuntime {
    faker: RecordFaker,
    initial_companies: usize,
    more_companies: usize,
    employees_per_batch: usize,
    employee_delay: Duration,
    coalesce_load_more: bool,
}

impl FakerRuntime {
    /// `seed` overrides `[data].seed`; without either the data is random.
    pub fn from_config(config: &Config, seed: Option<u64>) -> Result<Self> {
        let locale = config.locale();
        let faker = match seed.or(config.seed()) {
            Some(seed) => RecordFaker::new(seed, locale),
            None => RecordFaker::from_entropy(locale),
        };
        Ok(Self {
            faker,
            initial_companies: config.initial_companies(),
            more_companies: config.more_companies(),
            employees_per_batch: config.employees_per_batch(),
            employee_delay: config.employee_delay()?,
            coalesce_load_more: config.coalesce_load_more(),
        })
    }

    /// The startup dataset with employees already seeded and counted.
    pub fn dump(&mut self) -> Result<Dataset> {
        let mut store = Store::new();
        let companies = self.faker.companies(self.initial_companies);
        let pool = companies.iter().map(Company::summary).collect::<Vec<_>>();
        store.dispatch(Action::SetCompanies(companies));
        let employees = self.faker.employees(&pool, self.employees_per_batch)?;
        store.dispatch(Action::AppendEmployees(employees));

        let state = store.state();
        Ok(Dataset {
            companies: state.companies.rows().to_vec(),
            employees: state.employees.rows().to_vec(),
        })
    }
}

impl roster_tui::AppRuntime for FakerRuntime {
    fn initial_companies(&mut self) -> Vec<Company> {
        self.faker.companies(self.initial_companies)
    }

    fn more_companies(&mut self) -> Vec<Company> {
        self.faker.companies(self.more_companies)
    }

    fn employees_for(&mut self, pool: &[CompanySummary]) -> Result<Vec<Employee>> {
        Ok(self.faker.employees(pool, self.employees_per_batch)?)
    }

    fn employee_delay(&self) -> Duration {
        self.employee_delay
    }

    fn coalesce_load_more(&self) -> bool {
        self.coalesce_load_more
    }
}

#[cfg(test)]
mod tests {
    use super::FakerRuntime;
    use crate::config::Config;
    use anyhow::Result;
    use roster_tui::AppRuntime;
    use std::time::Duration;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.data.initial_companies = Some(6);
        config.data.more_companies = Some(3);
        config.data.employees_per_batch = Some(15);
        config.data.employee_delay = Some("0ms".to_owned());
        config
    }

    #[test]
    fn runtime_honors_configured_batch_sizes() -> Result<()> {
        let mut runtime = FakerRuntime::from_config(&small_config(), Some(1))?;
        let initial = runtime.initial_companies();
        assert_eq!(initial.len(), 6);
        assert_eq!(runtime.more_companies().len(), 3);

        let pool = initial.iter().map(|company| company.summary()).collect::<Vec<_>>();
        assert_eq!(runtime.employees_for(&pool)?.len(), 15);
        assert_eq!(runtime.employee_delay(), Duration::ZERO);
        assert!(runtime.coalesce_load_more());
        Ok(())
    }

    #[test]
    fn empty_pool_surfaces_as_an_error() -> Result<()> {
        let mut runtime = FakerRuntime::from_config(&small_config(), Some(1))?;
        let error = runtime.employees_for(&[]).expect_err("empty pool must fail");
        assert!(error.to_string().contains("empty list"));
        Ok(())
    }

    #[test]
    fn seeded_dumps_are_reproducible() -> Result<()> {
        let config = small_config();
        let first = FakerRuntime::from_config(&config, Some(42))?.dump()?;
        let second = FakerRuntime::from_config(&config, Some(42))?.dump()?;
        assert_eq!(first, second);

        let other = FakerRuntime::from_config(&config, Some(43))?.dump()?;
        assert_ne!(first, other);
        Ok(())
    }

    #[test]
    fn dump_counts_match_generated_employees() -> Result<()> {
        let dataset = FakerRuntime::from_config(&small_config(), Some(9))?.dump()?;
        assert_eq!(dataset.companies.len(), 6);
        assert_eq!(dataset.employees.len(), 15);

        let counted = dataset
            .companies
            .iter()
            .map(|company| company.employees_count.unwrap_or(0))
            .sum::<usize>();
        assert_eq!(counted, 15);

        let json = serde_json::to_value(&dataset)?;
        assert_eq!(json["companies"].as_array().map(Vec::len), Some(6));
        Ok(())
    }
}
