//! Tests for the poller.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeZone};
use tempfile::TempDir;

use super::{CycleError, CycleReport, Poller};
use crate::api::{FetchError, HttpError, MachineList, MachineRecord, MachineSource};
use crate::hosts::{FileHostsSink, HostsSink, WriteError};
use crate::time::Clock;

/// Clock pinned to a single instant.
struct FixedClock(DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

fn fixed_clock() -> FixedClock {
    FixedClock(
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2022, 3, 1, 12, 0, 0)
            .unwrap(),
    )
}

/// Mock source returning queued results, then empty lists.
struct MockSource {
    results: Mutex<VecDeque<Result<MachineList, FetchError>>>,
    calls: AtomicUsize,
}

impl MockSource {
    fn new(results: Vec<Result<MachineList, FetchError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn returning(machines: Vec<MachineRecord>) -> Self {
        Self::new(vec![Ok(MachineList { machines })])
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MachineSource for MockSource {
    async fn fetch_machines(&self) -> Result<MachineList, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(MachineList::default()))
    }
}

/// Mock sink capturing every write.
#[derive(Default)]
struct MockSink {
    writes: Mutex<Vec<String>>,
    fail: bool,
}

impl MockSink {
    fn failing() -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl HostsSink for MockSink {
    fn location(&self) -> String {
        "memory".to_string()
    }

    async fn write(&self, contents: String) -> Result<(), WriteError> {
        if self.fail {
            return Err(WriteError::Io {
                path: "memory".into(),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            });
        }
        self.writes.lock().unwrap().push(contents);
        Ok(())
    }
}

fn server_error() -> FetchError {
    FetchError::Status {
        url: url::Url::parse("https://hs.example.com/api/v1/machine?namespace=home").unwrap(),
        status: http::StatusCode::INTERNAL_SERVER_ERROR,
        body: "internal error".to_string(),
    }
}

fn poller<S, W>(source: S, sink: W) -> Poller<S, W, FixedClock> {
    Poller::new(source, sink, Duration::from_secs(60)).with_clock(fixed_clock())
}

mod run_cycle {
    use super::*;

    #[tokio::test]
    async fn writes_rendered_hosts_file() {
        let source = MockSource::returning(vec![MachineRecord::new(
            "alice",
            ["100.64.0.1", "fd7a:115c:a1e0::1"],
        )]);
        let poller = poller(source, MockSink::default()).with_domain_suffix(".ts.net");

        let report = poller.run_cycle().await.unwrap();

        assert_eq!(
            report,
            CycleReport {
                machines: 1,
                entries: 2
            }
        );
        assert_eq!(
            poller.sink().writes(),
            vec![
                "# Generated by HEADSCALE2HOSTS\n\
                 # Generated at 2022-03-01T12:00:00Z\n\
                 # Do not edit this file manually\n\
                 \n\
                 100.64.0.1        alice.ts.net\n\
                 fd7a:115c:a1e0::1 alice.ts.net\n"
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn empty_machine_list_writes_header_only() {
        let poller = poller(MockSource::returning(vec![]), MockSink::default());

        let report = poller.run_cycle().await.unwrap();

        assert_eq!(report.entries, 0);
        assert_eq!(poller.sink().writes()[0].lines().count(), 4);
    }

    #[tokio::test]
    async fn fetch_failure_skips_write() {
        let poller = poller(MockSource::new(vec![Err(server_error())]), MockSink::default());

        let error = poller.run_cycle().await.unwrap_err();

        assert!(matches!(error, CycleError::Fetch(FetchError::Status { .. })));
        assert!(error.to_string().starts_with("failed to get machines: "));
        assert!(error.to_string().contains("internal error"));
        assert!(poller.sink().writes().is_empty());
    }

    #[tokio::test]
    async fn write_failure_is_reported() {
        let poller = poller(
            MockSource::returning(vec![MachineRecord::new("bob", ["100.64.0.2"])]),
            MockSink::failing(),
        );

        let error = poller.run_cycle().await.unwrap_err();

        assert!(matches!(error, CycleError::Write(WriteError::Io { .. })));
        assert!(error.to_string().contains("failed to write hosts file"));
    }

    #[tokio::test]
    async fn dry_run_does_not_write() {
        let poller = poller(
            MockSource::returning(vec![MachineRecord::new("bob", ["100.64.0.2"])]),
            MockSink::default(),
        )
        .with_dry_run(true);

        let report = poller.run_cycle().await.unwrap();

        assert_eq!(report.entries, 1);
        assert!(poller.sink().writes().is_empty());
    }

    #[tokio::test]
    async fn server_error_leaves_previous_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hosts");
        let sink = FileHostsSink::new(&path);
        let source = MockSource::new(vec![
            Ok(MachineList {
                machines: vec![MachineRecord::new("alice", ["100.64.0.1"])],
            }),
            Err(server_error()),
        ]);
        let poller = poller(source, sink);

        poller.run_cycle().await.unwrap();
        let before = std::fs::read_to_string(&path).unwrap();
        assert!(poller.run_cycle().await.is_err());
        let after = std::fs::read_to_string(&path).unwrap();

        assert!(before.ends_with("100.64.0.1 alice\n"));
        assert_eq!(before, after);
    }
}

mod run_once {
    use super::*;

    #[tokio::test]
    async fn returns_report_on_success() {
        let poller = poller(
            MockSource::returning(vec![
                MachineRecord::new("alice", ["100.64.0.1"]),
                MachineRecord::new("bob", Vec::<String>::new()),
            ]),
            MockSink::default(),
        );

        let report = poller.run_once().await.unwrap();

        assert_eq!(
            report,
            CycleReport {
                machines: 2,
                entries: 1
            }
        );
    }

    #[tokio::test]
    async fn returns_error_on_failure() {
        let poller = poller(MockSource::new(vec![Err(server_error())]), MockSink::default());

        assert!(poller.run_once().await.is_err());
        assert_eq!(poller.source().calls(), 1);
    }
}

mod run_until {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn repeats_every_interval_until_shutdown() {
        let source = MockSource::returning(vec![MachineRecord::new("alice", ["100.64.0.1"])]);
        let poller = poller(source, MockSink::default());
        let start = tokio::time::Instant::now();

        // Cycles start at 0s, 60s and 120s; shutdown lands during the third sleep.
        let cycles = poller
            .run_until(tokio::time::sleep(Duration::from_secs(150)))
            .await;

        assert_eq!(cycles, 3);
        assert_eq!(poller.source.calls(), 3);
        assert_eq!(poller.sink().writes().len(), 3);
        assert!(start.elapsed() >= Duration::from_secs(150));
        assert!(start.elapsed() < Duration::from_secs(180));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_cycle_does_not_stop_the_loop() {
        let source = MockSource::new(vec![
            Err(FetchError::Http {
                url: url::Url::parse("https://hs.example.com/").unwrap(),
                source: HttpError::Timeout,
            }),
            Err(server_error()),
            Ok(MachineList {
                machines: vec![MachineRecord::new("alice", ["100.64.0.1"])],
            }),
        ]);
        let poller = poller(source, MockSink::default());

        let cycles = poller
            .run_until(tokio::time::sleep(Duration::from_secs(130)))
            .await;

        assert_eq!(cycles, 3);
        let writes = poller.sink().writes();
        assert_eq!(writes.len(), 1);
        assert!(writes[0].ends_with("100.64.0.1 alice\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_shutdown_still_runs_first_cycle() {
        let poller = poller(MockSource::returning(vec![]), MockSink::default());

        let cycles = poller.run_until(std::future::ready(())).await;

        assert_eq!(cycles, 1);
        assert_eq!(poller.sink().writes().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn write_failures_do_not_stop_the_loop() {
        let poller = poller(MockSource::returning(vec![]), MockSink::failing());

        let cycles = poller
            .run_until(tokio::time::sleep(Duration::from_secs(90)))
            .await;

        assert_eq!(cycles, 2);
        assert_eq!(poller.source.calls(), 2);
    }
}

#[test]
fn builder_sets_options() {
    let poller = Poller::new(
        MockSource::returning(vec![]),
        MockSink::default(),
        Duration::from_secs(30),
    )
    .with_domain_suffix(".lan")
    .with_dry_run(true);

    assert_eq!(poller.interval(), Duration::from_secs(30));
    assert_eq!(poller.domain_suffix(), ".lan");
    assert!(poller.dry_run);
}
