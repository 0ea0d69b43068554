//! Polling monitor tests

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tickmark_theme::error::Result;
use tickmark_theme::{ColorScheme, SchemeSource, ThemeMonitor};

/// Scheme source the test flips by hand
#[derive(Clone, Default)]
struct ScriptedSource(Arc<Mutex<ColorScheme>>);

impl ScriptedSource {
    fn set(&self, scheme: ColorScheme) {
        *self.0.lock().unwrap() = scheme;
    }
}

impl SchemeSource for ScriptedSource {
    fn current(&self) -> Result<ColorScheme> {
        Ok(*self.0.lock().unwrap())
    }
}

fn recorder(monitor: &ThemeMonitor) -> Arc<Mutex<Vec<ColorScheme>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    monitor.on_change(move |scheme| sink.lock().unwrap().push(scheme));
    seen
}

#[tokio::test(start_paused = true)]
async fn polling_reports_each_distinct_change_once() {
    let source = ScriptedSource::default();
    let monitor = Arc::new(ThemeMonitor::new(source.clone()));
    assert_eq!(monitor.current(), ColorScheme::Light);
    let seen = recorder(&monitor);

    let handle = monitor.spawn(Duration::from_secs(1));

    // Several polls with no change.
    tokio::time::sleep(Duration::from_millis(3500)).await;
    assert!(seen.lock().unwrap().is_empty());

    source.set(ColorScheme::Dark);
    tokio::time::sleep(Duration::from_secs(3)).await;
    source.set(ColorScheme::Light);
    tokio::time::sleep(Duration::from_secs(3)).await;

    assert_eq!(
        *seen.lock().unwrap(),
        vec![ColorScheme::Dark, ColorScheme::Light]
    );

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn stopped_monitor_no_longer_polls() {
    let source = ScriptedSource::default();
    let monitor = Arc::new(ThemeMonitor::new(source.clone()));
    let seen = recorder(&monitor);

    let handle = monitor.spawn(Duration::from_secs(1));
    handle.stop().await;

    source.set(ColorScheme::Dark);
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(monitor.current(), ColorScheme::Light);
}

#[tokio::test(start_paused = true)]
async fn pushed_and_polled_changes_share_dedupe() {
    let source = ScriptedSource::default();
    let monitor = Arc::new(ThemeMonitor::new(source.clone()));
    let seen = recorder(&monitor);
    let handle = monitor.spawn(Duration::from_secs(1));

    // An OS event arrives before the next poll observes the same value.
    source.set(ColorScheme::Dark);
    assert!(monitor.notify(ColorScheme::Dark));
    tokio::time::sleep(Duration::from_secs(3)).await;

    assert_eq!(*seen.lock().unwrap(), vec![ColorScheme::Dark]);
    handle.stop().await;
}

/// Source that takes `delay` of wall time to answer, like a hung `defaults` call
struct SlowSource {
    delay: Duration,
    scheme: ColorScheme,
}

impl SchemeSource for SlowSource {
    fn current(&self) -> Result<ColorScheme> {
        std::thread::sleep(self.delay);
        Ok(self.scheme)
    }
}

// Real time on the single-threaded runtime: a read that blocks must not hold
// up timers, other tasks or shutdown.
#[tokio::test]
async fn slow_source_does_not_stall_the_runtime() {
    let source = SlowSource {
        delay: Duration::from_secs(2),
        scheme: ColorScheme::Dark,
    };
    let monitor = Arc::new(ThemeMonitor::with_initial(source, ColorScheme::Light));
    let started = std::time::Instant::now();
    let handle = monitor.spawn(Duration::from_millis(50));

    let ticks = tokio::spawn(async {
        let mut count = 0;
        for _ in 0..5 {
            tokio::time::sleep(Duration::from_millis(40)).await;
            count += 1;
        }
        count
    });
    assert_eq!(ticks.await.unwrap(), 5);
    assert!(
        started.elapsed() < Duration::from_secs(1),
        "timers waited {:?} on the scheme read",
        started.elapsed()
    );

    // The read is still in flight; stopping does not wait for it.
    handle.stop().await;
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(monitor.current(), ColorScheme::Light);
}
