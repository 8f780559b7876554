// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use roster_app::{Company, CompanyId, CompanySummary, Employee, EmployeeId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const RU_COMPANY_PREFIXES: [&str; 5] = ["ООО", "АО", "ЗАО", "ПАО", "ИП"];
const RU_COMPANY_WORDS: [&str; 24] = [
    "Рога и Копыта",
    "Вектор",
    "Горизонт",
    "Северсталь",
    "Ромашка",
    "Меридиан",
    "Альтаир",
    "Прогресс",
    "Заря",
    "Уралмаш",
    "Восход",
    "Сибирь",
    "Надежда",
    "Фаворит",
    "Гранит",
    "Лидер",
    "Стройинвест",
    "ТехноСервис",
    "Ёлочка",
    "Атлант",
    "Кристалл",
    "Байкал",
    "Созвездие",
    "Янтарь",
];
const RU_CITIES: [&str; 12] = [
    "Москва",
    "Санкт-Петербург",
    "Казань",
    "Новосибирск",
    "Екатеринбург",
    "Нижний Новгород",
    "Самара",
    "Омск",
    "Ростов-на-Дону",
    "Уфа",
    "Пермь",
    "Воронеж",
];
const RU_STREETS: [&str; 16] = [
    "Ленина",
    "Гагарина",
    "Пушкина",
    "Советская",
    "Мира",
    "Садовая",
    "Лесная",
    "Школьная",
    "Набережная",
    "Молодёжная",
    "Центральная",
    "Кирова",
    "Победы",
    "Солнечная",
    "Зелёная",
    "Чехова",
];
const RU_MALE_NAMES: [&str; 16] = [
    "Александр",
    "Дмитрий",
    "Максим",
    "Сергей",
    "Андрей",
    "Алексей",
    "Артём",
    "Илья",
    "Кирилл",
    "Михаил",
    "Никита",
    "Матвей",
    "Роман",
    "Егор",
    "Иван",
    "Олег",
];
const RU_MALE_SURNAMES: [&str; 16] = [
    "Иванов",
    "Смирнов",
    "Кузнецов",
    "Попов",
    "Васильев",
    "Петров",
    "Соколов",
    "Михайлов",
    "Новиков",
    "Фёдоров",
    "Морозов",
    "Волков",
    "Алексеев",
    "Лебедев",
    "Семёнов",
    "Егоров",
];
const RU_FEMALE_NAMES: [&str; 16] = [
    "Анастасия",
    "Мария",
    "Анна",
    "Виктория",
    "Екатерина",
    "Наталья",
    "Марина",
    "Полина",
    "Софья",
    "Дарья",
    "Алиса",
    "Ксения",
    "Александра",
    "Елена",
    "Ольга",
    "Татьяна",
];
const RU_FEMALE_SURNAMES: [&str; 16] = [
    "Иванова",
    "Смирнова",
    "Кузнецова",
    "Попова",
    "Васильева",
    "Петрова",
    "Соколова",
    "Михайлова",
    "Новикова",
    "Фёдорова",
    "Морозова",
    "Волкова",
    "Алексеева",
    "Лебедева",
    "Семёнова",
    "Егорова",
];
const RU_JOB_TYPES: [&str; 14] = [
    "Директор",
    "Инженер",
    "Бухгалтер",
    "Менеджер",
    "Аналитик",
    "Программист",
    "Дизайнер",
    "Юрист",
    "Консультант",
    "Администратор",
    "Технолог",
    "Координатор",
    "Специалист",
    "Агент",
];

const EN_COMPANY_SUFFIXES: [&str; 6] = ["LLC", "Inc", "Group", "Partners", "Co", "Holdings"];
const EN_COMPANY_WORDS: [&str; 18] = [
    "Acme",
    "Summit",
    "Bluebird",
    "Northwind",
    "Granite",
    "Harbor",
    "Meridian",
    "Keystone",
    "Evergreen",
    "Silverline",
    "Redwood",
    "Beacon",
    "Ironclad",
    "Lakeshore",
    "Pioneer",
    "Crescent",
    "Falcon",
    "Juniper",
];
const EN_CITIES: [&str; 10] = [
    "Austin",
    "Seattle",
    "Denver",
    "Madison",
    "Raleigh",
    "Portland",
    "Boise",
    "Phoenix",
    "Nashville",
    "Omaha",
];
const EN_STREETS: [&str; 12] = [
    "Cedar", "Maple", "Oak", "Pine", "Willow", "Elm", "Birch", "Sunset", "Ridge", "Valley",
    "Meadow", "Aspen",
];
const EN_FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const EN_SURNAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];
const EN_JOB_TYPES: [&str; 14] = [
    "Director",
    "Engineer",
    "Accountant",
    "Manager",
    "Analyst",
    "Developer",
    "Designer",
    "Counsel",
    "Consultant",
    "Administrator",
    "Technician",
    "Coordinator",
    "Specialist",
    "Agent",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot pick from an empty list")]
pub struct EmptyInputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl Locale {
    pub const ALL: [Self; 2] = [Self::Ru, Self::En];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
        }
    }
}

/// Calls `factory` `count` times and keeps the results in call order.
pub fn generate_batch<T>(mut factory: impl FnMut() -> T, count: usize) -> Vec<T> {
    (0..count).map(|_| factory()).collect()
}

pub fn pick_random<'a, T, R>(rng: &mut R, items: &'a [T]) -> Result<&'a T, EmptyInputError>
where
    R: Rng + ?Sized,
{
    if items.is_empty() {
        return Err(EmptyInputError);
    }
    Ok(&items[rng.gen_range(0..items.len())])
}

/// Localized company and employee generator. Seeded instances are
/// reproducible, ids included.
#[derive(Debug, Clone)]
pub struct RecordFaker {
    rng: StdRng,
    locale: Locale,
}

impl RecordFaker {
    pub fn new(seed: u64, locale: Locale) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            locale,
        }
    }

    pub fn from_entropy(locale: Locale) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            locale,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn company(&mut self) -> Company {
        let id = CompanyId::from_random_bytes(self.id_bytes());
        let name = self.company_name();
        let address = self.street_address();
        Company {
            id,
            name,
            employees_count: None,
            address,
        }
    }

    pub fn employee(&mut self, pool: &[CompanySummary]) -> Result<Employee, EmptyInputError> {
        let company = pick_random(&mut self.rng, pool)?.clone();
        let id = EmployeeId::from_random_bytes(self.id_bytes());
        let (name, surname) = self.person();
        let work_position = self.pick(self.job_types()).to_owned();
        Ok(Employee {
            id,
            company_id: company.id,
            company_name: company.name,
            name,
            surname,
            work_position,
        })
    }

    pub fn companies(&mut self, count: usize) -> Vec<Company> {
        generate_batch(|| self.company(), count)
    }

    pub fn employees(
        &mut self,
        pool: &[CompanySummary],
        count: usize,
    ) -> Result<Vec<Employee>, EmptyInputError> {
        generate_batch(|| self.employee(pool), count)
            .into_iter()
            .collect()
    }

    fn id_bytes(&mut self) -> [u8; 16] {
        let mut bytes = [0_u8; 16];
        self.rng.fill_bytes(&mut bytes);
        bytes
    }

    fn pick(&mut self, items: &'static [&'static str]) -> &'static str {
        pick_random(&mut self.rng, items).map_or("", |item| *item)
    }

    fn company_name(&mut self) -> String {
        match self.locale {
            Locale::Ru => {
                let prefix = self.pick(&RU_COMPANY_PREFIXES);
                let word = self.pick(&RU_COMPANY_WORDS);
                format!("{prefix} «{word}»")
            }
            Locale::En => {
                let word = self.pick(&EN_COMPANY_WORDS);
                let suffix = self.pick(&EN_COMPANY_SUFFIXES);
                format!("{word} {suffix}")
            }
        }
    }

    fn street_address(&mut self) -> String {
        let house = self.rng.gen_range(1..=199);
        match self.locale {
            Locale::Ru => {
                let city = self.pick(&RU_CITIES);
                let street = self.pick(&RU_STREETS);
                format!("г. {city}, ул. {street}, д. {house}")
            }
            Locale::En => {
                let street = self.pick(&EN_STREETS);
                let city = self.pick(&EN_CITIES);
                format!("{house} {street} St, {city}")
            }
        }
    }

    /// Russian surnames agree with the first name, so both come from the
    /// same list pair.
    fn person(&mut self) -> (String, String) {
        let (names, surnames): (&'static [&'static str], &'static [&'static str]) =
            match self.locale {
                Locale::Ru if self.rng.gen_bool(0.5) => (&RU_MALE_NAMES, &RU_MALE_SURNAMES),
                Locale::Ru => (&RU_FEMALE_NAMES, &RU_FEMALE_SURNAMES),
                Locale::En => (&EN_FIRST_NAMES, &EN_SURNAMES),
            };
        let name = self.pick(names).to_owned();
        let surname = self.pick(surnames).to_owned();
        (name, surname)
    }

    fn job_types(&self) -> &'static [&'static str] {
        match self.locale {
            Locale::Ru => &RU_JOB_TYPES,
            Locale::En => &EN_JOB_TYPES,
        }
    }
}
