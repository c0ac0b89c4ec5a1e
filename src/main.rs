use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use ckd_aid::assessment::{
    assessment_router, ingest, AssessmentService, EvaluationResult, FactStore,
    InMemorySubjectRepository, ProgramCatalog, SubjectId,
};
use ckd_aid::config::AppConfig;
use ckd_aid::error::AppError;
use ckd_aid::telemetry;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "CKD Aid Assessor",
    about = "Assess chronic kidney disease patients for financial aid from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate subjects from a CSV fact file
    Assess(AssessArgs),
    /// List the program catalog
    Programs,
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct AssessArgs {
    /// CSV file with subject,attribute,value rows
    #[arg(long)]
    facts: PathBuf,
    /// Only evaluate this subject
    #[arg(long)]
    subject: Option<String>,
    /// Evaluation date printed on the report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    as_of: Option<NaiveDate>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct AssessmentReport {
    evaluated_on: NaiveDate,
    results: Vec<EvaluationResult>,
    rejected: Vec<RejectedSubject>,
}

#[derive(Debug, Serialize)]
struct RejectedSubject {
    subject_id: SubjectId,
    error: String,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Assess(args) => run_assessment(args),
        Command::Programs => {
            render_programs(&ProgramCatalog::standard());
            Ok(())
        }
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let policy = config.assessment.merge_policy;
    let store = match &config.assessment.facts_path {
        Some(path) => ingest::load_path(path, policy)?,
        None => FactStore::new(),
    };
    let preloaded = store.len();
    let repository = Arc::new(InMemorySubjectRepository::with_store(store, policy));
    let service = Arc::new(AssessmentService::new(repository));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(assessment_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, %policy, preloaded, "ckd aid assessor ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        facts,
        subject,
        as_of,
        json,
    } = args;

    let config = AppConfig::load()?;
    let policy = config.assessment.merge_policy;
    let store = ingest::load_path(&facts, policy)?;
    let service = AssessmentService::new(Arc::new(InMemorySubjectRepository::with_store(
        store, policy,
    )));

    let evaluated_on = as_of.unwrap_or_else(|| Local::now().date_naive());
    let report = build_report(&service, subject.as_deref(), evaluated_on)?;

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|err| AppError::Io(std::io::Error::from(err)))?;
        println!("{rendered}");
    } else {
        render_report(&report);
    }

    Ok(())
}

fn build_report(
    service: &AssessmentService<InMemorySubjectRepository>,
    subject: Option<&str>,
    evaluated_on: NaiveDate,
) -> Result<AssessmentReport, AppError> {
    let (results, rejected) = match subject {
        Some(raw) => {
            let id = SubjectId::normalized(raw);
            (vec![service.assess_stored(&id)?], Vec::new())
        }
        None => {
            let batch = service.assess_all()?;
            let rejected = batch
                .rejected
                .into_iter()
                .map(|(subject_id, error)| RejectedSubject {
                    subject_id,
                    error: error.to_string(),
                })
                .collect();
            (batch.results, rejected)
        }
    };

    Ok(AssessmentReport {
        evaluated_on,
        results,
        rejected,
    })
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn render_report(report: &AssessmentReport) {
    println!("CKD financial aid assessment");
    println!(
        "Evaluated {} on {}",
        plural(report.results.len(), "subject"),
        report.evaluated_on
    );

    let catalog = ProgramCatalog::standard();
    let program_name = |id| {
        catalog
            .get(id)
            .map(|program| program.name)
            .unwrap_or("unlisted program")
    };

    for result in &report.results {
        println!("\n{}", result.subject_id);
        println!("- decision: {}", result.decision_summary());
        println!(
            "- scores: severity {}, economic {}, dependency {}, access {} (total {})",
            result.scores.health_severity,
            result.scores.economic_vulnerability,
            result.scores.dependency,
            result.scores.accessibility,
            result.scores.total
        );
        match result.priority_score {
            Some(score) => println!("- priority score: {score}"),
            None => println!("- priority score: income not recorded"),
        }
        println!(
            "- recommended program: {}",
            program_name(result.recommended_program)
        );

        if result.eligible_programs.is_empty() {
            println!("- eligible programs: none");
        } else {
            let names: Vec<_> = result
                .eligible_programs
                .iter()
                .map(|id| program_name(*id))
                .collect();
            println!("- eligible programs: {}", names.join(", "));
        }

        match result.dialysis_cost {
            Some(cost) => println!("- dialysis: LKR {cost} per week"),
            None => println!("- dialysis: not applicable"),
        }
        println!(
            "- indirect costs: transport LKR {}, caregiving LKR {}",
            result.indirect_cost.transportation, result.indirect_cost.caregiving
        );
        println!("- recommended aid: LKR {}", result.recommended_aid);

        for flag in &result.missing_data {
            println!("- missing data: {} ({:?})", flag.attribute, flag.kind);
        }
    }

    if !report.rejected.is_empty() {
        println!("\nRejected records");
        for rejected in &report.rejected {
            println!("- {}: {}", rejected.subject_id, rejected.error);
        }
    }
}

fn render_programs(catalog: &ProgramCatalog) {
    println!("Program catalog");
    for program in catalog.programs() {
        let renewal = match program.renewal_months {
            Some(months) => format!(" (renew every {months} months)"),
            None => String::new(),
        };
        println!(
            "- {} [{}]: {}{}",
            program.name, program.id, program.description, renewal
        );
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
