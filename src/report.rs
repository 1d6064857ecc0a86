//! Operator-facing reporting sink
//!
//! Enumeration progress and findings are pushed through a [`Reporter`]
//! rather than returned, so partial results survive partial failures and
//! the engine can be embedded under any front end. The sink is one-way and
//! fire-and-forget; internal diagnostics go through `tracing` instead.

use console::style;
use std::sync::Mutex;

/// One-way sink for operator-facing output.
pub trait Reporter {
    /// Neutral status message.
    fn display(&self, msg: &str);

    /// A share (or operation) that worked.
    fn success(&self, label: &str);

    /// A share (or operation) that failed.
    fn fail(&self, msg: &str);

    /// A result line worth the operator's attention.
    fn highlight(&self, line: &str);

    /// Low-priority diagnostic detail.
    fn debug(&self, msg: &str);
}

impl<T: Reporter + ?Sized> Reporter for &T {
    fn display(&self, msg: &str) {
        (**self).display(msg);
    }

    fn success(&self, label: &str) {
        (**self).success(label);
    }

    fn fail(&self, msg: &str) {
        (**self).fail(msg);
    }

    fn highlight(&self, line: &str) {
        (**self).highlight(line);
    }

    fn debug(&self, msg: &str) {
        (**self).debug(msg);
    }
}

/// Console reporter with a target-context column and colored status tags.
///
/// Every line leads with the protocol tag and the `host port` pair so output
/// from several targets can be interleaved and still read unambiguously.
pub struct ConsoleReporter {
    host: String,
    port: u16,
}

impl ConsoleReporter {
    /// Create a reporter for one target.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    fn line(&self, tag: &str, body: &str) -> String {
        format!(
            "{:<8}{:<16}{:<7}{} {}",
            style("NFS").cyan().bold(),
            self.host,
            self.port,
            tag,
            body
        )
    }
}

impl Reporter for ConsoleReporter {
    fn display(&self, msg: &str) {
        println!("{}", self.line(&style("[*]").blue().to_string(), msg));
    }

    fn success(&self, label: &str) {
        println!(
            "{}",
            self.line(
                &style("[+]").green().bold().to_string(),
                &style(label).bold().to_string()
            )
        );
    }

    fn fail(&self, msg: &str) {
        println!("{}", self.line(&style("[-]").red().bold().to_string(), msg));
    }

    fn highlight(&self, line: &str) {
        println!("{}", self.line("   ", &style(line).yellow().to_string()));
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{} {}", self.host, msg);
    }
}

/// One recorded reporter event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Display(String),
    Success(String),
    Fail(String),
    Highlight(String),
    Debug(String),
}

/// Reporter that records every event in memory.
///
/// Useful when embedding the engine in a larger tool that renders output
/// itself, and as the observation point in tests.
#[derive(Debug, Default)]
pub struct BufferedReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl BufferedReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: ReportEvent) {
        self.events
            .lock()
            .expect("reporter mutex poisoned")
            .push(event);
    }

    /// All recorded events, in emission order.
    pub fn events(&self) -> Vec<ReportEvent> {
        self.events
            .lock()
            .expect("reporter mutex poisoned")
            .clone()
    }

    /// Labels passed to `success`, in order.
    pub fn successes(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ReportEvent::Success(label) => Some(label),
                _ => None,
            })
            .collect()
    }

    /// Messages passed to `fail`, in order.
    pub fn failures(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ReportEvent::Fail(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    /// Lines passed to `highlight`, in order.
    pub fn highlights(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ReportEvent::Highlight(line) => Some(line),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for BufferedReporter {
    fn display(&self, msg: &str) {
        self.push(ReportEvent::Display(msg.to_string()));
    }

    fn success(&self, label: &str) {
        self.push(ReportEvent::Success(label.to_string()));
    }

    fn fail(&self, msg: &str) {
        self.push(ReportEvent::Fail(msg.to_string()));
    }

    fn highlight(&self, line: &str) {
        self.push(ReportEvent::Highlight(line.to_string()));
    }

    fn debug(&self, msg: &str) {
        self.push(ReportEvent::Debug(msg.to_string()));
    }
}
