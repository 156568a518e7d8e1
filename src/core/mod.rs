mod engine;
mod types;

pub use engine::run_projection;
pub use types::{
    DEFAULT_DEPENDENCY_YEARS, DEFAULT_INFLATION_RATE, DEFAULT_INVESTMENT_RETURN,
    DEFAULT_WITHDRAWAL_RATE, Inputs, MAX_AGE, POST_RETIREMENT_TAIL_YEARS, ProjectionResult, Theme,
    YearRecord,
};
