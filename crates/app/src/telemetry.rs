use std::{
    fmt::Write as _,
    sync::{Mutex, OnceLock},
    time::Instant,
};

use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{
    BuildError as PrometheusBuildError, PrometheusBuilder, PrometheusHandle,
};
use thiserror::Error;
use tracing_subscriber::{
    fmt::{self as tracing_fmt, time::UtcTime, MakeWriter},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer, Registry,
};

use forsale_util::{AppConfig, Environment};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to initialize tracing: {0}")]
    Tracing(#[from] TryInitError),
    #[error("failed to initialize prometheus recorder: {0}")]
    Metrics(#[from] PrometheusBuildError),
}

static TRACING_INIT: OnceLock<()> = OnceLock::new();
static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
static METRICS_INSTALL_GUARD: Mutex<()> = Mutex::new(());
static START_TIME: OnceLock<Instant> = OnceLock::new();

const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

fn build_git_sha() -> &'static str {
    option_env!("GIT_SHA").unwrap_or("unknown")
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Pretty output for local runs, JSON lines in production.
fn fmt_layer<W>(environment: Environment, writer: W) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = tracing_fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false);

    // `event_format` replaces the layer's formatter, so the pretty format
    // carries its own timer.
    match environment {
        Environment::Development | Environment::Test => base
            .event_format(
                tracing_fmt::format()
                    .pretty()
                    .with_target(false)
                    .with_timer(UtcTime::rfc_3339()),
            )
            .boxed(),
        Environment::Production => base.with_timer(UtcTime::rfc_3339()).json().boxed(),
    }
}

pub fn init_tracing(config: &AppConfig) -> Result<(), TelemetryError> {
    if TRACING_INIT.get().is_some() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt_layer(config.environment, std::io::stdout))
        .with(env_filter)
        .try_init()?;

    TRACING_INIT.set(()).ok();
    tracing::info!(
        stage = "telemetry",
        env = %config.environment.as_str(),
        site = %config.site_domain,
        version = BUILD_VERSION,
        git_sha = build_git_sha(),
        "tracing initialized"
    );
    Ok(())
}

/// Installs the global Prometheus recorder once and returns its handle.
pub fn init_metrics() -> Result<PrometheusHandle, TelemetryError> {
    if let Some(handle) = METRICS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let _guard = METRICS_INSTALL_GUARD
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(handle) = METRICS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    METRICS_HANDLE.set(handle.clone()).ok();

    describe_gauge!("app_build_info", "Build metadata for the running binary");
    describe_gauge!("app_uptime_seconds", "Seconds since the process started");
    describe_counter!(
        "contact_submissions_total",
        "Count of contact form submissions, labelled by result"
    );
    describe_histogram!(
        "relay_request_seconds",
        "Latency in seconds of form-relay requests"
    );
    START_TIME.get_or_init(Instant::now);

    Ok(handle)
}

/// Renders recorder output followed by build and uptime gauges.
pub fn render_metrics(handle: &PrometheusHandle) -> String {
    let mut body = handle.render();
    if !body.is_empty() && !body.ends_with('\n') {
        body.push('\n');
    }

    let uptime = START_TIME
        .get()
        .map(|start| start.elapsed().as_secs_f64())
        .unwrap_or_default();

    let _ = writeln!(body, "# TYPE app_build_info gauge");
    let _ = writeln!(
        body,
        "app_build_info{{version=\"{BUILD_VERSION}\",git=\"{}\"}} 1",
        build_git_sha()
    );
    let _ = writeln!(body, "# TYPE app_uptime_seconds gauge");
    let _ = writeln!(body, "app_uptime_seconds {uptime}");

    body
}
