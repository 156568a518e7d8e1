use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::ffi::OsString;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::core::{
    DEFAULT_DEPENDENCY_YEARS, DEFAULT_INFLATION_RATE, DEFAULT_INVESTMENT_RETURN,
    DEFAULT_WITHDRAWAL_RATE, Inputs, MAX_AGE, ProjectionResult, Theme, YearRecord,
    run_projection,
};

/// Wire value for `yearsToRetire` / `retirementAge` when the target is never reached.
const NOT_ACHIEVABLE: i64 = -1;
const MAX_KIDS: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("--{flag} must be a finite number")]
    NotFinite { flag: &'static str },
    #[error("--{flag} must be {requirement}")]
    OutOfRange {
        flag: &'static str,
        requirement: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Args(#[from] clap::Error),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("failed to encode projection: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[command(
    name = "nestegg",
    about = "Year-by-year retirement savings projection against a 4% withdrawal target"
)]
struct Cli {
    #[arg(long, default_value_t = 28)]
    current_age: u32,
    #[arg(long, default_value_t = 100_000.0)]
    current_savings: f64,
    #[arg(long, default_value_t = 200_000.0, allow_negative_numbers = true)]
    annual_income: f64,
    #[arg(
        long,
        default_value_t = 5_000.0,
        help = "Monthly living expenses excluding rent"
    )]
    monthly_personal_expenses: f64,
    #[arg(
        long,
        default_value_t = 3_000.0,
        help = "Monthly rent; dropped entirely with --buy-house"
    )]
    monthly_rent: f64,
    #[arg(
        long,
        default_value_t = 8.0,
        allow_negative_numbers = true,
        help = "Annual income growth in percent"
    )]
    income_growth: f64,
    #[arg(long, help = "Pay --house-cost out of savings today and stop paying rent")]
    buy_house: bool,
    #[arg(long, default_value_t = 2_000_000.0)]
    house_cost: f64,
    #[arg(long, help = "Pay --car-cost out of savings today")]
    buy_car: bool,
    #[arg(long, default_value_t = 200_000.0)]
    car_cost: f64,
    #[arg(long, default_value_t = 0)]
    kids_count: u32,
    #[arg(
        long,
        default_value_t = 30_000.0,
        help = "Annual cost per child in today's money"
    )]
    kid_cost: f64,
    #[arg(
        long,
        default_value_t = 2.5,
        allow_negative_numbers = true,
        help = "Expected annual inflation in percent"
    )]
    inflation_rate: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        allow_negative_numbers = true,
        help = "Expected annual investment return in percent"
    )]
    investment_return: f64,
    #[arg(
        long,
        default_value_t = 4.0,
        help = "Safe withdrawal rate in percent; target = expenses / rate"
    )]
    withdrawal_rate: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_DEPENDENCY_YEARS,
        help = "Years each child remains a dependent"
    )]
    dependency_years: u32,
}

/// Query/JSON body for `/api/project`. Every field is optional; numeric text is
/// coerced and empty text counts as zero.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    #[serde(deserialize_with = "lenient")]
    current_age: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    current_savings: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    annual_income: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    monthly_personal_expenses: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    monthly_rent: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    income_growth: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    buy_house: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    house_cost: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    buy_car: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    car_cost: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    kids_count: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    kid_cost: Option<f64>,

    #[serde(deserialize_with = "lenient")]
    inflation_rate: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    investment_return: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    withdrawal_rate: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    dependency_years: Option<u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientField<T> {
    Value(T),
    Text(String),
    Null(()),
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr + Default,
    <T as FromStr>::Err: fmt::Display,
{
    match LenientField::<T>::deserialize(deserializer)? {
        LenientField::Value(value) => Ok(Some(value)),
        LenientField::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(Some(T::default()));
            }
            text.parse::<T>().map(Some).map_err(de::Error::custom)
        }
        LenientField::Null(()) => Ok(None),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssumptionsResponse {
    inflation_rate: f64,
    investment_return: f64,
    withdrawal_rate: f64,
    dependency_years: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    years_to_retire: i64,
    retirement_age: i64,
    target_corpus: i64,
    achievable: bool,
    savings_rate: f64,
    theme: Theme,
    assumptions: AssumptionsResponse,
    data: Vec<YearRecord>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for InputError {
    fn into_response(self) -> Response {
        error_response(StatusCode::BAD_REQUEST, &self.to_string())
    }
}

fn build_inputs(cli: Cli) -> Result<Inputs, InputError> {
    for (flag, value) in [
        ("current-savings", cli.current_savings),
        ("annual-income", cli.annual_income),
        ("monthly-personal-expenses", cli.monthly_personal_expenses),
        ("monthly-rent", cli.monthly_rent),
        ("income-growth", cli.income_growth),
        ("house-cost", cli.house_cost),
        ("car-cost", cli.car_cost),
        ("kid-cost", cli.kid_cost),
        ("inflation-rate", cli.inflation_rate),
        ("investment-return", cli.investment_return),
        ("withdrawal-rate", cli.withdrawal_rate),
    ] {
        if !value.is_finite() {
            return Err(InputError::NotFinite { flag });
        }
    }

    if cli.current_age >= MAX_AGE {
        return Err(InputError::OutOfRange {
            flag: "current-age",
            requirement: "below 100",
        });
    }

    for (flag, value) in [
        ("monthly-personal-expenses", cli.monthly_personal_expenses),
        ("monthly-rent", cli.monthly_rent),
        ("house-cost", cli.house_cost),
        ("car-cost", cli.car_cost),
        ("kid-cost", cli.kid_cost),
    ] {
        if value < 0.0 {
            return Err(InputError::OutOfRange {
                flag,
                requirement: ">= 0",
            });
        }
    }

    if cli.kids_count > MAX_KIDS {
        return Err(InputError::OutOfRange {
            flag: "kids-count",
            requirement: "at most 10",
        });
    }

    for (flag, rate) in [
        ("income-growth", cli.income_growth),
        ("inflation-rate", cli.inflation_rate),
        ("investment-return", cli.investment_return),
    ] {
        if rate <= -100.0 {
            return Err(InputError::OutOfRange {
                flag,
                requirement: "> -100",
            });
        }
    }

    if cli.withdrawal_rate <= 0.0 || cli.withdrawal_rate > 100.0 {
        return Err(InputError::OutOfRange {
            flag: "withdrawal-rate",
            requirement: "> 0 and <= 100",
        });
    }

    Ok(Inputs {
        current_age: cli.current_age,
        current_savings: cli.current_savings,
        annual_income: cli.annual_income,
        monthly_personal_expenses: cli.monthly_personal_expenses,
        monthly_rent: cli.monthly_rent,
        income_growth_rate: cli.income_growth / 100.0,
        buy_house: cli.buy_house,
        house_cost: cli.house_cost,
        buy_car: cli.buy_car,
        car_cost: cli.car_cost,
        kids_count: cli.kids_count,
        kid_cost: cli.kid_cost,
        inflation_rate: cli.inflation_rate / 100.0,
        investment_return: cli.investment_return / 100.0,
        withdrawal_rate: cli.withdrawal_rate / 100.0,
        dependency_years: cli.dependency_years,
    })
}

/// Runs one projection from command-line flags and returns it as pretty JSON.
pub fn run_cli<I, T>(args: I) -> Result<String, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    let inputs = build_inputs(cli)?;
    let result = run_projection(&inputs);
    debug!(
        retirement_age = ?result.retirement_age,
        years = result.years.len(),
        "projection computed"
    );
    Ok(serde_json::to_string_pretty(&build_project_response(
        &inputs, result,
    ))?)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "projection API listening");
    info!("local access: http://127.0.0.1:{port}/api/project");

    axum::serve(listener, router()).await
}

fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/defaults", get(defaults_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, serde_json::json!({ "status": "ok" }))
}

async fn defaults_handler() -> Response {
    json_response(StatusCode::OK, default_cli())
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload)
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    let inputs = match inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(e) => {
            warn!(error = %e, "rejected projection request");
            return e.into_response();
        }
    };

    let result = run_projection(&inputs);
    debug!(
        current_age = inputs.current_age,
        retirement_age = ?result.retirement_age,
        theme = ?result.theme,
        "projection computed"
    );
    json_response(StatusCode::OK, build_project_response(&inputs, result))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn inputs_from_json(json: &str) -> Result<Inputs, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    inputs_from_payload(payload).map_err(|e| e.to_string())
}

fn inputs_from_payload(payload: ProjectPayload) -> Result<Inputs, InputError> {
    let mut cli = default_cli();

    if let Some(v) = payload.current_age {
        cli.current_age = v;
    }
    if let Some(v) = payload.current_savings {
        cli.current_savings = v;
    }
    if let Some(v) = payload.annual_income {
        cli.annual_income = v;
    }
    if let Some(v) = payload.monthly_personal_expenses {
        cli.monthly_personal_expenses = v;
    }
    if let Some(v) = payload.monthly_rent {
        cli.monthly_rent = v;
    }
    if let Some(v) = payload.income_growth {
        cli.income_growth = v;
    }

    if let Some(v) = payload.buy_house {
        cli.buy_house = v;
    }
    if let Some(v) = payload.house_cost {
        cli.house_cost = v;
    }
    if let Some(v) = payload.buy_car {
        cli.buy_car = v;
    }
    if let Some(v) = payload.car_cost {
        cli.car_cost = v;
    }
    if let Some(v) = payload.kids_count {
        cli.kids_count = v;
    }
    if let Some(v) = payload.kid_cost {
        cli.kid_cost = v;
    }

    if let Some(v) = payload.inflation_rate {
        cli.inflation_rate = v;
    }
    if let Some(v) = payload.investment_return {
        cli.investment_return = v;
    }
    if let Some(v) = payload.withdrawal_rate {
        cli.withdrawal_rate = v;
    }
    if let Some(v) = payload.dependency_years {
        cli.dependency_years = v;
    }

    build_inputs(cli)
}

fn default_cli() -> Cli {
    Cli {
        current_age: 28,
        current_savings: 100_000.0,
        annual_income: 200_000.0,
        monthly_personal_expenses: 5_000.0,
        monthly_rent: 3_000.0,
        income_growth: 8.0,
        buy_house: false,
        house_cost: 2_000_000.0,
        buy_car: false,
        car_cost: 200_000.0,
        kids_count: 0,
        kid_cost: 30_000.0,
        inflation_rate: DEFAULT_INFLATION_RATE * 100.0,
        investment_return: DEFAULT_INVESTMENT_RETURN * 100.0,
        withdrawal_rate: DEFAULT_WITHDRAWAL_RATE * 100.0,
        dependency_years: DEFAULT_DEPENDENCY_YEARS,
    }
}

fn build_project_response(inputs: &Inputs, result: ProjectionResult) -> ProjectResponse {
    let achievable = result.achievable();
    ProjectResponse {
        years_to_retire: result
            .years_to_retire
            .map(i64::from)
            .unwrap_or(NOT_ACHIEVABLE),
        retirement_age: result
            .retirement_age
            .map(i64::from)
            .unwrap_or(NOT_ACHIEVABLE),
        target_corpus: result.target_corpus,
        achievable,
        savings_rate: result.savings_rate,
        theme: result.theme,
        assumptions: AssumptionsResponse {
            inflation_rate: inputs.inflation_rate,
            investment_return: inputs.investment_return,
            withdrawal_rate: inputs.withdrawal_rate,
            dependency_years: inputs.dependency_years,
        },
        data: result.years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use std::fs;
    use std::path::Path;
    use tower::ServiceExt;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_cli() -> Cli {
        default_cli()
    }

    fn assert_golden_snapshot(path: &str, actual: &str) {
        let update = matches!(
            std::env::var("UPDATE_GOLDEN").as_deref(),
            Ok("1") | Ok("true") | Ok("TRUE")
        );
        let snapshot_path = Path::new(path);

        if update {
            if let Some(parent) = snapshot_path.parent() {
                fs::create_dir_all(parent).expect("failed to create snapshot directory");
            }
            fs::write(snapshot_path, actual).expect("failed to write golden snapshot");
            return;
        }

        let expected = fs::read_to_string(snapshot_path).unwrap_or_else(|_| {
            panic!("missing golden snapshot at {path}; run with UPDATE_GOLDEN=1 to generate")
        });
        assert_eq!(
            actual, expected,
            "snapshot mismatch for {path}; run with UPDATE_GOLDEN=1 to refresh if expected"
        );
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should read");
        let body = serde_json::from_slice(&bytes).expect("body should be json");
        (status, body)
    }

    #[test]
    fn default_cli_matches_clap_defaults() {
        let parsed = Cli::try_parse_from(["nestegg"]).expect("defaults should parse");
        assert_eq!(parsed, default_cli());
    }

    #[test]
    fn build_inputs_converts_percentages_to_fractions() {
        let inputs = build_inputs(sample_cli()).expect("valid inputs");
        assert_approx(inputs.income_growth_rate, 0.08);
        assert_approx(inputs.inflation_rate, DEFAULT_INFLATION_RATE);
        assert_approx(inputs.investment_return, DEFAULT_INVESTMENT_RETURN);
        assert_approx(inputs.withdrawal_rate, DEFAULT_WITHDRAWAL_RATE);
        assert_eq!(inputs.dependency_years, DEFAULT_DEPENDENCY_YEARS);
    }

    #[test]
    fn build_inputs_rejects_age_at_max() {
        let mut cli = sample_cli();
        cli.current_age = 100;
        let err = build_inputs(cli).expect_err("must reject age 100");
        assert!(err.to_string().contains("--current-age"));
    }

    #[test]
    fn build_inputs_rejects_negative_costs() {
        let mut cli = sample_cli();
        cli.house_cost = -1.0;
        let err = build_inputs(cli).expect_err("must reject negative house cost");
        assert_eq!(
            err,
            InputError::OutOfRange {
                flag: "house-cost",
                requirement: ">= 0"
            }
        );
    }

    #[test]
    fn build_inputs_rejects_non_finite_values() {
        let mut cli = sample_cli();
        cli.annual_income = f64::NAN;
        let err = build_inputs(cli).expect_err("must reject NaN income");
        assert_eq!(
            err,
            InputError::NotFinite {
                flag: "annual-income"
            }
        );
    }

    #[test]
    fn build_inputs_tolerates_negative_income() {
        let mut cli = sample_cli();
        cli.annual_income = -5_000.0;
        let inputs = build_inputs(cli).expect("negative income is allowed");
        assert_approx(inputs.annual_income, -5_000.0);
    }

    #[test]
    fn build_inputs_rejects_zero_withdrawal_rate() {
        let mut cli = sample_cli();
        cli.withdrawal_rate = 0.0;
        let err = build_inputs(cli).expect_err("must reject zero withdrawal rate");
        assert!(err.to_string().contains("--withdrawal-rate"));
    }

    #[test]
    fn build_inputs_rejects_too_many_kids() {
        let mut cli = sample_cli();
        cli.kids_count = 11;
        let err = build_inputs(cli).expect_err("must reject 11 kids");
        assert!(err.to_string().contains("--kids-count"));
    }

    #[test]
    fn inputs_from_json_parses_web_keys() {
        let json = r#"{
          "currentAge": 35,
          "currentSavings": 250000,
          "annualIncome": 120000,
          "monthlyPersonalExpenses": 4000,
          "monthlyRent": 2500,
          "incomeGrowth": 3,
          "buyHouse": true,
          "houseCost": 900000,
          "buyCar": true,
          "carCost": 50000,
          "kidsCount": 2,
          "kidCost": 25000
        }"#;
        let inputs = inputs_from_json(json).expect("json should parse");

        assert_eq!(inputs.current_age, 35);
        assert_approx(inputs.current_savings, 250_000.0);
        assert_approx(inputs.annual_income, 120_000.0);
        assert_approx(inputs.monthly_personal_expenses, 4_000.0);
        assert_approx(inputs.monthly_rent, 2_500.0);
        assert_approx(inputs.income_growth_rate, 0.03);
        assert!(inputs.buy_house);
        assert_approx(inputs.house_cost, 900_000.0);
        assert!(inputs.buy_car);
        assert_approx(inputs.car_cost, 50_000.0);
        assert_eq!(inputs.kids_count, 2);
        assert_approx(inputs.kid_cost, 25_000.0);
    }

    #[test]
    fn inputs_from_json_coerces_text_and_treats_empty_as_zero() {
        let json = r#"{
          "currentAge": "40",
          "annualIncome": "",
          "monthlyRent": " 1500 ",
          "buyCar": "true",
          "kidsCount": "",
          "houseCost": null
        }"#;
        let inputs = inputs_from_json(json).expect("json should parse");

        assert_eq!(inputs.current_age, 40);
        assert_approx(inputs.annual_income, 0.0);
        assert_approx(inputs.monthly_rent, 1_500.0);
        assert!(inputs.buy_car);
        assert_eq!(inputs.kids_count, 0);
        assert_approx(inputs.house_cost, 2_000_000.0);
    }

    #[test]
    fn inputs_from_json_rejects_unparseable_text() {
        let err = inputs_from_json(r#"{ "annualIncome": "lots" }"#)
            .expect_err("must reject non-numeric text");
        assert!(err.contains("Invalid API JSON payload"));
    }

    #[test]
    fn project_response_uses_sentinel_when_unachievable() {
        let mut cli = sample_cli();
        cli.annual_income = 0.0;
        let inputs = build_inputs(cli).expect("valid inputs");
        let response = build_project_response(&inputs, run_projection(&inputs));

        assert_eq!(response.years_to_retire, NOT_ACHIEVABLE);
        assert_eq!(response.retirement_age, NOT_ACHIEVABLE);
        assert!(!response.achievable);
        assert_eq!(response.theme, Theme::Void);
        assert_eq!(response.savings_rate, 0.0);
    }

    #[test]
    fn project_response_serialization_contains_expected_fields() {
        let inputs = build_inputs(sample_cli()).expect("valid inputs");
        let response = build_project_response(&inputs, run_projection(&inputs));
        let json = serde_json::to_string(&response).expect("response should serialize");

        assert!(json.contains("\"yearsToRetire\":12"));
        assert!(json.contains("\"retirementAge\":40"));
        assert!(json.contains("\"targetCorpus\""));
        assert!(json.contains("\"achievable\":true"));
        assert!(json.contains("\"savingsRate\""));
        assert!(json.contains("\"theme\":\"peace\""));
        assert!(json.contains("\"isRetired\""));
        assert!(json.contains("\"withdrawalRate\":0.04"));
    }

    #[test]
    fn run_cli_prints_projection_json() {
        let output = run_cli(["nestegg", "--annual-income", "0"]).expect("cli should run");
        let value: serde_json::Value = serde_json::from_str(&output).expect("output is json");
        assert_eq!(value["yearsToRetire"], -1);
        assert_eq!(value["theme"], "void");
    }

    #[test]
    fn run_cli_reports_invalid_input() {
        let err = run_cli(["nestegg", "--current-age", "120"]).expect_err("must reject age");
        assert!(matches!(err, CliError::Input(_)));
    }

    #[test]
    fn run_cli_reports_unknown_flags() {
        let err = run_cli(["nestegg", "--salary", "1"]).expect_err("must reject flag");
        assert!(matches!(err, CliError::Args(_)));
    }

    #[tokio::test]
    async fn project_get_accepts_query_parameters() {
        let request = Request::builder()
            .uri("/api/project?currentAge=30&annualIncome=&buyHouse=true&houseCost=0")
            .body(Body::empty())
            .expect("valid request");
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["savingsRate"], 0.0);
        assert_eq!(body["data"][0]["age"], 30);
        assert_eq!(body["data"][0]["expenses"], 60_000);
    }

    #[tokio::test]
    async fn project_post_returns_bad_request_for_invalid_input() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/project")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{ "currentAge": 100 }"#))
            .expect("valid request");
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "--current-age must be below 100");
    }

    #[tokio::test]
    async fn defaults_and_unknown_routes() {
        let request = Request::builder()
            .uri("/api/defaults")
            .body(Body::empty())
            .expect("valid request");
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["currentAge"], 28);
        assert_eq!(body["kidCost"], 30_000.0);

        let request = Request::builder()
            .uri("/nowhere")
            .body(Body::empty())
            .expect("valid request");
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
    }

    #[test]
    fn golden_snapshot_family_with_car_json() {
        let mut cli = sample_cli();
        cli.current_age = 30;
        cli.current_savings = 300_000.0;
        cli.annual_income = 180_000.0;
        cli.monthly_personal_expenses = 4_000.0;
        cli.monthly_rent = 2_500.0;
        cli.income_growth = 5.0;
        cli.buy_car = true;
        cli.car_cost = 150_000.0;
        cli.kids_count = 2;
        cli.kid_cost = 30_000.0;

        let inputs = build_inputs(cli).expect("valid inputs");
        let response = build_project_response(&inputs, run_projection(&inputs));
        let json = format!(
            "{}\n",
            serde_json::to_string(&response).expect("response should serialize")
        );

        assert_golden_snapshot("tests/golden/family_with_car.json", &json);
    }
}
