//! Unit tests for the release wait service.
//!
//! The service is driven with `ScriptedApi` (one dyno list per poll),
//! `RecordingReporter` and `VirtualClock`, so no test touches the network or
//! actually sleeps.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use pswait_cli::application::services::release_wait::{
    WaitRequest, wait_for_release, waiting_banner,
};
use pswait_cli::domain::error::{ApiError, WaitError, error_code};
use pswait_cli::domain::filter::{DynoFilter, ReleaseDynoMatch};

use crate::helpers::{
    Event, FailingDynosApi, InterruptedClock, R0, R1, RecordingReporter, ScriptedApi,
    VirtualClock, app, dyno, release,
};

fn request(filter: DynoFilter) -> WaitRequest {
    WaitRequest {
        app: "sushi".to_string(),
        filter,
        interval: Duration::from_secs(10),
        require_private_space: false,
    }
}

fn filter(include_run: bool, only_type: Option<&str>) -> DynoFilter {
    DynoFilter::new(
        include_run,
        only_type.map(str::to_string),
        ReleaseDynoMatch::Type,
    )
    .expect("valid filter")
}

fn statuses(reporter: &RecordingReporter) -> Vec<String> {
    reporter
        .events()
        .into_iter()
        .filter_map(|e| match e {
            Event::Status(s) | Event::Done(s) => Some(s),
            Event::Start(_) => None,
        })
        .collect()
}

// ── Convergence ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_already_converged_is_silent() {
    let api = ScriptedApi::new(
        vec![release(R1, "23")],
        vec![vec![dyno("web", "up", R1)]],
    );
    let reporter = RecordingReporter::default();
    let clock = VirtualClock::default();

    let outcome = wait_for_release(&api, &reporter, &clock, &request(DynoFilter::default()))
        .await
        .expect("converged");

    assert!(reporter.events().is_empty(), "nothing should be reported");
    assert!(clock.sleeps().is_empty(), "no sleep on first-tick convergence");
    assert_eq!(outcome.ticks, 1);
    assert!(!outcome.waited());
    assert_eq!(outcome.tally.to_string(), "1 / 1");
}

#[tokio::test]
async fn test_waits_until_every_dyno_is_up_on_latest() {
    let api = ScriptedApi::new(
        vec![release(R1, "23")],
        vec![
            vec![dyno("web", "up", R0)],
            vec![dyno("web", "starting", R1)],
            vec![dyno("web", "up", R1)],
        ],
    );
    let reporter = RecordingReporter::default();
    let clock = VirtualClock::default();

    let outcome = wait_for_release(&api, &reporter, &clock, &request(DynoFilter::default()))
        .await
        .expect("converged");

    assert_eq!(
        reporter.events(),
        vec![
            Event::Start("Waiting for every dyno to be running v23".to_string()),
            Event::Status("0 / 1".to_string()),
            Event::Status("0 / 1".to_string()),
            Event::Done("1 / 1, done".to_string()),
        ]
    );
    assert_eq!(outcome.ticks, 3);
    assert!(outcome.waited());
    assert_eq!(clock.sleeps().len(), 2);
}

#[tokio::test]
async fn test_banner_is_started_exactly_once() {
    let api = ScriptedApi::new(
        vec![release(R1, "7")],
        vec![
            vec![dyno("web", "down", R1)],
            vec![dyno("web", "crashed", R1)],
            vec![dyno("web", "starting", R1)],
            vec![dyno("web", "up", R1)],
        ],
    );
    let reporter = RecordingReporter::default();

    wait_for_release(
        &api,
        &reporter,
        &VirtualClock::default(),
        &request(DynoFilter::default()),
    )
    .await
    .expect("converged");

    assert_eq!(reporter.count(|e| matches!(e, Event::Start(_))), 1);
    assert_eq!(reporter.count(|e| matches!(e, Event::Done(_))), 1);
}

#[tokio::test]
async fn test_release_dynos_are_ignored() {
    let api = ScriptedApi::new(
        vec![release(R1, "23")],
        vec![vec![dyno("web", "up", R1), dyno("release", "starting", R0)]],
    );
    let reporter = RecordingReporter::default();

    let outcome = wait_for_release(
        &api,
        &reporter,
        &VirtualClock::default(),
        &request(DynoFilter::default()),
    )
    .await
    .expect("converged");

    assert!(reporter.events().is_empty());
    assert_eq!(outcome.tally.total, 1);
}

#[tokio::test]
async fn test_run_dynos_ignored_by_default() {
    let api = ScriptedApi::new(
        vec![release(R1, "23")],
        vec![vec![dyno("web", "up", R1), dyno("run", "up", R0)]],
    );
    let reporter = RecordingReporter::default();

    wait_for_release(
        &api,
        &reporter,
        &VirtualClock::default(),
        &request(DynoFilter::default()),
    )
    .await
    .expect("converged");

    assert!(reporter.events().is_empty());
}

#[tokio::test]
async fn test_with_run_counts_one_off_dynos() {
    let api = ScriptedApi::new(
        vec![release(R1, "23")],
        vec![
            vec![dyno("web", "up", R0), dyno("run", "up", R0)],
            vec![dyno("web", "up", R1), dyno("run", "up", R0)],
            vec![dyno("web", "up", R1), dyno("run", "up", R1)],
        ],
    );
    let reporter = RecordingReporter::default();

    wait_for_release(
        &api,
        &reporter,
        &VirtualClock::default(),
        &request(filter(true, None)),
    )
    .await
    .expect("converged");

    assert_eq!(statuses(&reporter), vec!["0 / 2", "1 / 2", "2 / 2, done"]);
}

#[tokio::test]
async fn test_type_filter_counts_only_that_type() {
    let api = ScriptedApi::new(
        vec![release(R1, "23")],
        vec![
            vec![dyno("web", "starting", R1), dyno("worker", "up", R0)],
            vec![dyno("web", "up", R1), dyno("worker", "up", R0)],
        ],
    );
    let reporter = RecordingReporter::default();

    wait_for_release(
        &api,
        &reporter,
        &VirtualClock::default(),
        &request(filter(false, Some("web"))),
    )
    .await
    .expect("converged");

    assert_eq!(statuses(&reporter), vec!["0 / 1", "1 / 1, done"]);
}

#[tokio::test]
async fn test_no_counted_dynos_converges_immediately() {
    let api = ScriptedApi::new(
        vec![release(R1, "23")],
        vec![vec![dyno("release", "up", R0)]],
    );
    let reporter = RecordingReporter::default();

    let outcome = wait_for_release(
        &api,
        &reporter,
        &VirtualClock::default(),
        &request(DynoFilter::default()),
    )
    .await
    .expect("vacuously converged");

    assert_eq!(outcome.tally.to_string(), "0 / 0");
    assert!(reporter.events().is_empty());
}

#[tokio::test]
async fn test_name_policy_ignores_release_named_dynos() {
    let mut release_dyno = dyno("web", "starting", R0);
    release_dyno.name = "release.4".to_string();
    let api = ScriptedApi::new(
        vec![release(R1, "23")],
        vec![vec![dyno("web", "up", R1), release_dyno]],
    );
    let filter = DynoFilter::new(false, None, ReleaseDynoMatch::Name).expect("valid filter");

    let outcome = wait_for_release(
        &api,
        &RecordingReporter::default(),
        &VirtualClock::default(),
        &request(filter),
    )
    .await
    .expect("converged");

    assert_eq!(outcome.tally.total, 1);
}

// ── Preconditions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_no_releases_fails_before_polling_dynos() {
    let api = ScriptedApi::new(vec![], vec![vec![dyno("web", "up", R1)]]);
    let reporter = RecordingReporter::default();

    let err = wait_for_release(
        &api,
        &reporter,
        &VirtualClock::default(),
        &request(DynoFilter::default()),
    )
    .await
    .expect_err("no releases");

    assert_eq!(
        err.downcast_ref::<WaitError>(),
        Some(&WaitError::NoReleases {
            app: "sushi".to_string()
        })
    );
    assert_eq!(error_code(&err), "no_releases");
    assert_eq!(api.dyno_calls(), 0);
    assert!(reporter.events().is_empty());
}

#[tokio::test]
async fn test_private_space_check_skipped_by_default() {
    let api = ScriptedApi::new(
        vec![release(R1, "23")],
        vec![vec![dyno("web", "up", R1)]],
    )
    .with_app(app(false));

    wait_for_release(
        &api,
        &RecordingReporter::default(),
        &VirtualClock::default(),
        &request(DynoFilter::default()),
    )
    .await
    .expect("converged");

    assert!(!api.calls().contains(&"/apps/sushi".to_string()));
}

#[tokio::test]
async fn test_private_space_required_rejects_common_runtime_app() {
    let api = ScriptedApi::new(
        vec![release(R1, "23")],
        vec![vec![dyno("web", "up", R1)]],
    )
    .with_app(app(false));
    let mut req = request(DynoFilter::default());
    req.require_private_space = true;

    let err = wait_for_release(
        &api,
        &RecordingReporter::default(),
        &VirtualClock::default(),
        &req,
    )
    .await
    .expect_err("not in a space");

    assert!(matches!(
        err.downcast_ref::<WaitError>(),
        Some(WaitError::NotInPrivateSpace { .. })
    ));
    assert_eq!(api.calls(), vec!["/apps/sushi".to_string()]);
}

#[tokio::test]
async fn test_private_space_required_accepts_space_app() {
    let api = ScriptedApi::new(
        vec![release(R1, "23")],
        vec![vec![dyno("web", "up", R1)]],
    )
    .with_app(app(true));
    let mut req = request(DynoFilter::default());
    req.require_private_space = true;

    wait_for_release(
        &api,
        &RecordingReporter::default(),
        &VirtualClock::default(),
        &req,
    )
    .await
    .expect("converged");

    assert_eq!(
        api.calls(),
        vec!["/apps/sushi", "/apps/sushi/releases", "/apps/sushi/dynos"]
    );
}

// ── Timing and failures ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_sleeps_for_the_requested_interval() {
    let api = ScriptedApi::new(
        vec![release(R1, "23")],
        vec![
            vec![dyno("web", "starting", R1)],
            vec![dyno("web", "starting", R1)],
            vec![dyno("web", "up", R1)],
        ],
    );
    let clock = VirtualClock::default();
    let mut req = request(DynoFilter::default());
    req.interval = Duration::from_millis(2500);

    wait_for_release(&api, &RecordingReporter::default(), &clock, &req)
        .await
        .expect("converged");

    assert_eq!(clock.sleeps(), vec![Duration::from_millis(2500); 2]);
    assert_eq!(clock.elapsed(), Duration::from_secs(5));
    assert_eq!(api.remaining_ticks(), 0);
}

#[tokio::test]
async fn test_api_error_aborts_the_wait() {
    let api = FailingDynosApi {
        releases: vec![release(R1, "23")],
    };
    let reporter = RecordingReporter::default();

    let err = wait_for_release(
        &api,
        &reporter,
        &VirtualClock::default(),
        &request(DynoFilter::default()),
    )
    .await
    .expect_err("api failure");

    assert!(err.to_string().contains("connection reset"));
    assert!(reporter.events().is_empty());
}

#[tokio::test]
async fn test_api_status_error_keeps_its_code() {
    struct Unauthorized;
    impl pswait_cli::application::ports::PlatformApi for Unauthorized {
        async fn app(&self, _: &str) -> anyhow::Result<pswait_cli::domain::App> {
            unreachable!("private space check is off")
        }
        async fn latest_releases(
            &self,
            _: &str,
        ) -> anyhow::Result<Vec<pswait_cli::domain::Release>> {
            Err(ApiError::Status {
                status: 401,
                path: "/apps/sushi/releases".to_string(),
                message: "Invalid credentials provided.".to_string(),
            }
            .into())
        }
        async fn dynos(&self, _: &str) -> anyhow::Result<Vec<pswait_cli::domain::Dyno>> {
            unreachable!("releases failed first")
        }
    }

    let err = wait_for_release(
        &Unauthorized,
        &RecordingReporter::default(),
        &VirtualClock::default(),
        &request(DynoFilter::default()),
    )
    .await
    .expect_err("401");

    assert_eq!(error_code(&err), "api_status");
    assert!(err.to_string().contains("HTTP 401"));
}

#[tokio::test]
async fn test_interrupted_sleep_stops_the_loop() {
    let api = ScriptedApi::new(
        vec![release(R1, "23")],
        vec![vec![dyno("web", "starting", R1)], vec![dyno("web", "up", R1)]],
    );
    let reporter = RecordingReporter::default();

    let err = wait_for_release(&api, &reporter, &InterruptedClock, &request(DynoFilter::default()))
        .await
        .expect_err("interrupted");

    assert_eq!(error_code(&err), "interrupted");
    assert_eq!(api.dyno_calls(), 1);
    assert_eq!(
        reporter.events(),
        vec![
            Event::Start("Waiting for every dyno to be running v23".to_string()),
            Event::Status("0 / 1".to_string()),
        ]
    );
}

#[test]
fn test_waiting_banner_uses_release_version() {
    assert_eq!(
        waiting_banner(&release(R1, "42")),
        "Waiting for every dyno to be running v42"
    );
}
