use serde::Serialize;

pub const DEFAULT_INFLATION_RATE: f64 = 0.025;
pub const DEFAULT_INVESTMENT_RETURN: f64 = 0.05;
pub const DEFAULT_WITHDRAWAL_RATE: f64 = 0.04;
pub const DEFAULT_DEPENDENCY_YEARS: u32 = 20;

/// Last age simulated; the series never runs past it.
pub const MAX_AGE: u32 = 100;
/// Years of drawdown kept in the series after the crossing year.
pub const POST_RETIREMENT_TAIL_YEARS: u32 = 15;

/// Parameters for one projection run. Rates are fractions (0.08 == 8%).
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub current_age: u32,
    pub current_savings: f64,
    pub annual_income: f64,
    pub monthly_personal_expenses: f64,
    pub monthly_rent: f64,
    pub income_growth_rate: f64,
    pub buy_house: bool,
    pub house_cost: f64,
    pub buy_car: bool,
    pub car_cost: f64,
    pub kids_count: u32,
    /// Annual cost per child in year-zero money.
    pub kid_cost: f64,
    pub inflation_rate: f64,
    pub investment_return: f64,
    pub withdrawal_rate: f64,
    pub dependency_years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRecord {
    pub age: u32,
    pub savings: i64,
    pub target: i64,
    pub income: i64,
    pub expenses: i64,
    pub is_retired: bool,
}

/// Outcome bands, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Peace,
    Worry,
    Panic,
    Void,
}

/// Inclusive upper retirement age for each band; anything later is `Void`.
const THEME_BANDS: [(u32, Theme); 3] = [
    (50, Theme::Peace),
    (60, Theme::Worry),
    (75, Theme::Panic),
];

impl Theme {
    pub fn from_retirement_age(retirement_age: Option<u32>) -> Self {
        let Some(age) = retirement_age else {
            return Theme::Void;
        };
        THEME_BANDS
            .iter()
            .find(|(ceiling, _)| age <= *ceiling)
            .map(|(_, theme)| *theme)
            .unwrap_or(Theme::Void)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionResult {
    pub years_to_retire: Option<u32>,
    pub retirement_age: Option<u32>,
    pub target_corpus: i64,
    pub years: Vec<YearRecord>,
    /// Year-zero savings rate in percent; 0 when income is not positive.
    pub savings_rate: f64,
    pub theme: Theme,
}

impl ProjectionResult {
    pub fn achievable(&self) -> bool {
        self.years_to_retire.is_some()
    }
}
