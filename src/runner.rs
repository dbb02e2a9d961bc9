use crate::report::build_report;
use crate::rule::Rule;
use crate::validate::validate;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

/// Sample text is truncated to this many characters before matching.
pub const MAX_SAMPLE_CHARS: usize = 800;

type Callback = Box<dyn FnOnce(String) + Send + 'static>;

struct Job {
    token: u64,
    rules: Vec<Rule>,
    sample_text: String,
    callback: Callback,
}

/// Runs rule-set evaluations on a single background worker, delivering each
/// result to its callback only while no newer submission exists.
///
/// Every `submit` bumps an instance-owned sequence counter and captures the
/// new value as its token. When the worker finishes a job it compares the
/// token against the current counter; a mismatch means the job was
/// superseded and its result is dropped silently. In-flight work is never
/// interrupted, it just loses the race to publish.
pub struct TestRunner {
    seq: Arc<AtomicU64>,
    sender: Option<mpsc::Sender<Job>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl TestRunner {
    pub fn new() -> Self {
        let seq = Arc::new(AtomicU64::new(0));
        let (sender, receiver) = mpsc::channel::<Job>();
        let worker_seq = Arc::clone(&seq);
        let worker = thread::spawn(move || {
            while let Ok(job) = receiver.recv() {
                run_job(&worker_seq, job);
            }
        });
        Self {
            seq,
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// Queue an evaluation of `rules` against `sample_text`. The callback is
    /// invoked on the worker thread, and only if this is still the newest
    /// submission when the evaluation finishes.
    pub fn submit<F>(&self, rules: Vec<Rule>, sample_text: String, callback: F)
    where
        F: FnOnce(String) + Send + 'static,
    {
        let token = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(sender) = &self.sender {
            // send only fails after shutdown; dropping the job is correct then
            let _ = sender.send(Job {
                token,
                rules,
                sample_text,
                callback: Box::new(callback),
            });
        }
    }

    /// Stop the worker. Queued and in-flight jobs are invalidated before the
    /// channel closes, so no callback fires after this returns. Safe to call
    /// repeatedly and with no work in flight.
    pub fn shutdown(&mut self) {
        // invalidate every outstanding token
        self.seq.fetch_add(1, Ordering::SeqCst);
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestRunner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// One evaluation's outcome: the per-rule compile errors and the report.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub errors: Vec<crate::validate::ValidationError>,
    pub report: String,
}

/// The full evaluation pipeline: cap the sample, validate regex rules,
/// build the report. This is what the worker runs per job; synchronous
/// callers (the CLI) use it directly.
pub fn evaluate(rules: &[Rule], sample_text: &str) -> Evaluation {
    let sample = truncate_chars(sample_text, MAX_SAMPLE_CHARS);
    let errors = validate(rules);
    let report = build_report(rules, &errors, sample);
    Evaluation { errors, report }
}

fn run_job(seq: &AtomicU64, job: Job) {
    let outcome = evaluate(&job.rules, &job.sample_text);
    deliver_if_current(seq, job.token, job.callback, outcome.report);
}

fn deliver_if_current(seq: &AtomicU64, token: u64, callback: Callback, report: String) {
    if seq.load(Ordering::SeqCst) == token {
        callback(report);
    }
}

fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
