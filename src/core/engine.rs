use super::types::{
    Inputs, MAX_AGE, POST_RETIREMENT_TAIL_YEARS, ProjectionResult, Theme, YearRecord,
};

/// Carried-forward simulation state. Never rounded.
#[derive(Debug, Clone, Copy)]
struct RunningState {
    corpus: f64,
    annual_income: f64,
    base_expenses: f64,
    kid_expense: f64,
}

#[derive(Debug, Clone, Copy)]
struct Crossing {
    year_index: u32,
}

pub fn run_projection(inputs: &Inputs) -> ProjectionResult {
    let base_expenses = initial_base_expenses(inputs);
    let kid_expense = initial_kid_expense(inputs);
    let savings_rate = savings_rate(inputs.annual_income, base_expenses + kid_expense);

    let mut state = RunningState {
        corpus: initial_corpus(inputs),
        annual_income: inputs.annual_income,
        base_expenses,
        kid_expense,
    };

    let max_years = MAX_AGE.saturating_sub(inputs.current_age);
    let mut years = Vec::with_capacity(max_years as usize + 1);
    let mut crossing: Option<Crossing> = None;
    let mut age = inputs.current_age;

    for i in 0..=max_years {
        state.kid_expense = decayed_kid_expense(inputs, state.kid_expense, i);

        let total_expenses = state.base_expenses + state.kid_expense;
        let target = total_expenses / inputs.withdrawal_rate;

        if crossing.is_none() && state.corpus >= target {
            crossing = Some(Crossing { year_index: i });
        }

        years.push(YearRecord {
            age,
            savings: display_amount(state.corpus),
            target: display_amount(target),
            income: display_amount(state.annual_income),
            expenses: display_amount(total_expenses),
            is_retired: crossing.is_some(),
        });

        match crossing {
            None => apply_working_year(inputs, &mut state),
            Some(Crossing { year_index }) => {
                apply_retired_year(inputs, &mut state);
                if i > year_index + POST_RETIREMENT_TAIL_YEARS {
                    break;
                }
            }
        }

        age += 1;
    }

    let years_to_retire = crossing.map(|c| c.year_index);
    let retirement_age = years_to_retire.map(|n| inputs.current_age + n);
    let target_index = years_to_retire
        .map(|n| n as usize)
        .unwrap_or_else(|| years.len().saturating_sub(1));
    let target_corpus = years.get(target_index).map(|y| y.target).unwrap_or(0);

    ProjectionResult {
        years_to_retire,
        retirement_age,
        target_corpus,
        years,
        savings_rate,
        theme: Theme::from_retirement_age(retirement_age),
    }
}

/// Owning a house removes rent from the budget from year zero.
fn initial_base_expenses(inputs: &Inputs) -> f64 {
    let annual_rent = if inputs.buy_house {
        0.0
    } else {
        inputs.monthly_rent * 12.0
    };
    inputs.monthly_personal_expenses * 12.0 + annual_rent
}

fn initial_kid_expense(inputs: &Inputs) -> f64 {
    inputs.kids_count as f64 * inputs.kid_cost
}

fn savings_rate(annual_income: f64, total_expenses: f64) -> f64 {
    if annual_income > 0.0 {
        (annual_income - total_expenses) / annual_income * 100.0
    } else {
        0.0
    }
}

fn initial_corpus(inputs: &Inputs) -> f64 {
    let mut corpus = inputs.current_savings;
    if inputs.buy_house {
        corpus -= inputs.house_cost;
    }
    if inputs.buy_car {
        corpus -= inputs.car_cost;
    }
    corpus
}

fn decayed_kid_expense(inputs: &Inputs, current: f64, year_index: u32) -> f64 {
    if year_index >= inputs.dependency_years {
        0.0
    } else if year_index > 0 {
        current * (1.0 + inputs.inflation_rate)
    } else {
        current
    }
}

fn apply_working_year(inputs: &Inputs, state: &mut RunningState) {
    state.annual_income *= 1.0 + inputs.income_growth_rate;
    state.base_expenses *= 1.0 + inputs.inflation_rate;
    let net_savings = state.annual_income - (state.base_expenses + state.kid_expense);
    state.corpus = state.corpus * (1.0 + inputs.investment_return) + net_savings;
}

fn apply_retired_year(inputs: &Inputs, state: &mut RunningState) {
    state.base_expenses *= 1.0 + inputs.inflation_rate;
    let withdrawal = state.base_expenses + state.kid_expense;
    state.corpus = state.corpus * (1.0 + inputs.investment_return) - withdrawal;
}

fn display_amount(value: f64) -> i64 {
    value.round() as i64
}
