//! Background progress rendering for batch runs

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

/// Width of the rendered bar in characters
const BAR_WIDTH: usize = 50;

/// Default sampling cadence
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

/// Samples a shared outstanding counter on a fixed cadence and renders a
/// textual progress bar.
///
/// A frame is rendered only when the completed count changed since the last
/// sample. The monitor terminates on its own when the counter reaches zero,
/// emitting exactly one final 100% frame; `stop()` tears it down early
/// without the final frame.
pub struct ProgressMonitor {
    handle: JoinHandle<()>,
    stop: Arc<AtomicBool>,
}

impl ProgressMonitor {
    /// Start a monitor rendering to stdout
    pub fn start(outstanding: Arc<AtomicUsize>, total: usize, interval: Duration) -> Self {
        Self::start_with_writer(outstanding, total, interval, std::io::stdout())
    }

    /// Start a monitor rendering to an arbitrary writer
    pub fn start_with_writer<W>(
        outstanding: Arc<AtomicUsize>,
        total: usize,
        interval: Duration,
        mut writer: W,
    ) -> Self
    where
        W: Write + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let handle = std::thread::spawn(move || {
            let mut last_completed = usize::MAX;
            loop {
                if stop_flag.load(Ordering::Relaxed) {
                    return;
                }
                let remaining = outstanding.load(Ordering::Acquire);
                if remaining == 0 {
                    break;
                }
                let completed = total.saturating_sub(remaining);
                if completed != last_completed {
                    let _ = write!(writer, "{}", render_frame(completed, total));
                    let _ = writer.flush();
                    last_completed = completed;
                }
                std::thread::sleep(interval);
            }
            // Exactly one final frame once everything completed
            let _ = writeln!(writer, "{}", render_frame(total, total));
            let _ = writer.flush();
        });

        Self { handle, stop }
    }

    /// Block until the monitor exits on its own (counter reached zero)
    pub fn wait(self) {
        let _ = self.handle.join();
    }

    /// Tear the monitor down without waiting for completion
    pub fn stop(self) {
        self.stop.store(true, Ordering::Relaxed);
        let _ = self.handle.join();
    }
}

/// One progress frame: bar, percentage and completed/total counts
fn render_frame(completed: usize, total: usize) -> String {
    let percentage = if total == 0 {
        100.0
    } else {
        completed as f64 * 100.0 / total as f64
    };
    let filled = (percentage / 2.0) as usize;
    format!(
        "\rProgress: [{:<width$}] {:.1}% ({}/{})",
        "=".repeat(filled.min(BAR_WIDTH)),
        percentage,
        completed,
        total,
        width = BAR_WIDTH
    )
}
