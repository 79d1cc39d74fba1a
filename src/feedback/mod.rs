use std::fmt::{Display, Formatter};
use std::sync::{Arc, RwLock};

use compact_str::CompactString;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ReportKind {
    Network,
    Api,
    Auth,
    Validation,
    App,
    Unknown,
}

impl ReportKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ReportKind::Network => "network",
            ReportKind::Api => "api",
            ReportKind::Auth => "auth",
            ReportKind::Validation => "validation",
            ReportKind::App => "app",
            ReportKind::Unknown => "unknown",
        }
    }
}

impl Display for ReportKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type ReportCause = Arc<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Clone, Debug)]
pub struct ErrorReport {
    pub kind: ReportKind,
    pub message: CompactString,
    pub context: Option<CompactString>,
    pub source: Option<&'static str>,
    pub cause: Option<ReportCause>,
}

impl ErrorReport {
    pub fn new(kind: ReportKind, message: impl Into<CompactString>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: None,
            source: None,
            cause: None,
        }
    }

    pub fn source(mut self, value: &'static str) -> Self {
        self.source = Some(value);
        self
    }

    pub fn context(mut self, value: impl Into<CompactString>) -> Self {
        self.context = Some(value.into());
        self
    }

    pub fn cause(mut self, value: impl Into<ReportCause>) -> Self {
        self.cause = Some(value.into());
        self
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(source) = self.source {
            write!(f, " (source: {source})")?;
        }
        if let Some(context) = &self.context {
            write!(f, " [{context}]")?;
        }
        if let Some(cause) = &self.cause {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

pub trait ErrorReporter: Send + Sync {
    fn report(&self, report: &ErrorReport);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, report: &ErrorReport) {
        match report.kind {
            ReportKind::Validation => log::warn!("{report}"),
            _ => log::error!("{report}"),
        }
    }
}

static REPORTERS: RwLock<Vec<Arc<dyn ErrorReporter>>> = RwLock::new(Vec::new());

pub fn install_reporter(reporter: impl ErrorReporter + 'static) {
    let mut reporters = match REPORTERS.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    reporters.push(Arc::new(reporter));
}

pub fn report(report: ErrorReport) {
    let reporters = {
        let guard = match REPORTERS.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.clone()
    };

    if reporters.is_empty() {
        log::error!("unhandled failure report: {report}");
        return;
    }
    for reporter in reporters {
        reporter.report(&report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct CaptureReporter {
        seen: Arc<Mutex<Vec<CompactString>>>,
    }

    impl ErrorReporter for CaptureReporter {
        fn report(&self, report: &ErrorReport) {
            self.seen
                .lock()
                .expect("capture lock poisoned")
                .push(report.message.clone());
        }
    }

    #[test]
    fn report_fans_out_to_installed_reporters() {
        let capture = CaptureReporter::default();
        install_reporter(capture.clone());

        report(ErrorReport::new(ReportKind::Api, "request rejected").source("test"));

        let seen = capture.seen.lock().expect("capture lock poisoned");
        assert!(seen.iter().any(|message| message == "request rejected"));
    }

    #[test]
    fn report_display_includes_kind_source_context_and_cause() {
        let report = ErrorReport::new(ReportKind::Auth, "session expired")
            .source("apiClient::refresh")
            .context("user 42")
            .cause(Box::new(std::io::Error::other("token revoked"))
                as Box<dyn std::error::Error + Send + Sync>);

        let rendered = report.to_string();
        assert!(rendered.contains("[auth] session expired"));
        assert!(rendered.contains("(source: apiClient::refresh)"));
        assert!(rendered.contains("[user 42]"));
        assert!(rendered.contains("token revoked"));
    }
}
