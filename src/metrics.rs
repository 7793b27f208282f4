//! Prometheus metrics for the question-answering CLI.
//!
//! Exposes:
//! - `medical_kgqa_answers_total` (counter by answer branch)
//! - `medical_kgqa_query_duration_seconds` (histogram by relationship)
//! - `medical_kgqa_queries_total` (counter by relationship and status)
//! - `medical_kgqa_command_duration_seconds` (histogram by CLI command)
//! - process metrics via `process` collector

use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use once_cell::sync::Lazy;
use prometheus::process_collector::ProcessCollector;
use prometheus::{
    default_registry, register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec,
    IntCounterVec, TextEncoder,
};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

static PROCESS_COLLECTOR: Lazy<()> = Lazy::new(|| {
    if let Err(err) = default_registry().register(Box::new(ProcessCollector::for_self())) {
        warn!("Failed to register process collector: {}", err);
    }
});

static ANSWER_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "medical_kgqa_answers_total",
        "Answered questions by outcome branch",
        &["outcome"]
    )
    .expect("failed to register answer counter")
});

static QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    // 5ms .. ~20s
    let buckets =
        prometheus::exponential_buckets(0.005, 2.0, 12).expect("failed to create histogram buckets");
    register_histogram_vec!(
        "medical_kgqa_query_duration_seconds",
        "Graph traversal duration in seconds",
        &["relationship"],
        buckets
    )
    .expect("failed to register query duration histogram")
});

static QUERY_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "medical_kgqa_queries_total",
        "Graph traversals by relationship and status",
        &["relationship", "status"]
    )
    .expect("failed to register query counter")
});

static COMMAND_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "medical_kgqa_command_duration_seconds",
        "CLI command duration in seconds",
        &["command", "status"]
    )
    .expect("failed to register command duration histogram")
});

fn init_collectors() {
    Lazy::force(&PROCESS_COLLECTOR);
    Lazy::force(&ANSWER_TOTAL);
    Lazy::force(&QUERY_DURATION);
    Lazy::force(&QUERY_TOTAL);
    Lazy::force(&COMMAND_DURATION);
}

/// Count one answered question under its branch label.
pub fn record_answer(outcome: &'static str) {
    init_collectors();
    ANSWER_TOTAL.with_label_values(&[outcome]).inc();
}

/// Record one traversal with duration and status.
pub fn record_query(relationship: &'static str, duration: Duration, success: bool) {
    init_collectors();
    QUERY_DURATION
        .with_label_values(&[relationship])
        .observe(duration.as_secs_f64());
    QUERY_TOTAL
        .with_label_values(&[relationship, if success { "ok" } else { "error" }])
        .inc();
}

/// Record CLI command completion.
pub fn record_command(command: &'static str, duration: Duration, success: bool) {
    init_collectors();
    COMMAND_DURATION
        .with_label_values(&[command, if success { "ok" } else { "error" }])
        .observe(duration.as_secs_f64());
}

async fn metrics_response() -> Result<Response<Full<Bytes>>, Infallible> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        error!("Failed to encode metrics: {}", err);
        return Ok(Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(Full::from("encode error"))
            .unwrap());
    }

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(hyper::header::CONTENT_TYPE, encoder.format_type())
        .body(Full::from(buffer))
        .unwrap())
}

async fn handle_request(req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    match req.uri().path() {
        "/metrics" => metrics_response().await,
        _ => Ok(Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Full::new(Bytes::new()))
            .unwrap()),
    }
}

async fn serve(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Prometheus metrics endpoint started");

    loop {
        let (stream, peer) = listener.accept().await?;
        let io = TokioIo::new(stream);

        tokio::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .serve_connection(io, service_fn(handle_request))
                .await
            {
                warn!(?peer, "Metrics connection error: {}", err);
            }
        });
    }
}

/// Spawn the metrics HTTP endpoint on the given address.
pub fn spawn_metrics_server(addr: SocketAddr) {
    init_collectors();
    tokio::spawn(async move {
        if let Err(err) = serve(addr).await {
            error!(%addr, "Metrics server failed: {}", err);
        }
    });
}
