use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Largest file the uploader will accept.
pub const MAX_FILE_BYTES: u64 = 50 * 1024 * 1024;

/// Accepted document extensions (compared case-insensitively).
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["pdf", "docx", "doc", "tex"];

/// Pause between the last stage and completion.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// How long the "Analysis Complete" screen stays up before the dashboard.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1000);

/// One labelled step of the simulated analysis.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    pub label: &'static str,
    pub duration: Duration,
}

pub const STAGES: [Stage; 6] = [
    Stage {
        label: "Extracting text content...",
        duration: Duration::from_millis(1000),
    },
    Stage {
        label: "Detecting formatting anomalies...",
        duration: Duration::from_millis(1500),
    },
    Stage {
        label: "Analyzing citation styles...",
        duration: Duration::from_millis(1200),
    },
    Stage {
        label: "Checking language and grammar...",
        duration: Duration::from_millis(2000),
    },
    Stage {
        label: "Verifying logical consistency...",
        duration: Duration::from_millis(1500),
    },
    Stage {
        label: "Finalizing report...",
        duration: Duration::from_millis(800),
    },
];

/// Errors raised when a file is offered for analysis.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("unsupported file type: {0} (expected .pdf, .docx, .doc or .tex)")]
    UnsupportedExtension(String),
    #[error("file is {size} bytes, larger than the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("an analysis is already running")]
    Busy,
}

/// Where the simulated analysis currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakePhase {
    Idle,
    /// `stage` indexes into [`STAGES`].
    Processing { stage: usize },
    Complete,
}

/// Timed, scripted stand-in for document analysis.
///
/// Nothing here looks at file content. The owner drives it with
/// [`Intake::tick`] and re-seeds the review store when a tick reports
/// completion.
#[derive(Debug, Clone)]
pub struct Intake {
    phase: IntakePhase,
    file_name: Option<String>,
    elapsed: Duration,
}

impl Intake {
    pub fn new() -> Self {
        Self {
            phase: IntakePhase::Idle,
            file_name: None,
            elapsed: Duration::ZERO,
        }
    }

    pub fn phase(&self) -> IntakePhase {
        self.phase
    }

    /// Name of the file being analysed, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Validate `path` and begin the simulation.
    ///
    /// Only the extension and size are checked; the file is never opened.
    pub fn start(&mut self, path: &Path) -> Result<(), IntakeError> {
        check_file(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.start_unchecked(name)
    }

    /// Begin the simulation for a named document without touching the filesystem.
    pub fn start_unchecked(&mut self, name: impl Into<String>) -> Result<(), IntakeError> {
        if matches!(self.phase, IntakePhase::Processing { .. }) {
            return Err(IntakeError::Busy);
        }
        let name = name.into();
        tracing::info!(file = %name, "analysis started");
        self.file_name = Some(name);
        self.elapsed = Duration::ZERO;
        self.phase = IntakePhase::Processing { stage: 0 };
        Ok(())
    }

    /// Return to the idle upload screen.
    pub fn reset(&mut self) {
        self.phase = IntakePhase::Idle;
        self.file_name = None;
        self.elapsed = Duration::ZERO;
    }

    /// Advance the simulation clock.
    ///
    /// Returns `true` only on the tick that moves into `Complete`.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !matches!(self.phase, IntakePhase::Processing { .. }) {
            return false;
        }
        self.elapsed += delta;
        let next = phase_at(self.elapsed);
        if next != self.phase {
            match next {
                IntakePhase::Processing { stage } => {
                    tracing::debug!(stage = stage + 1, label = STAGES[stage].label, "analysis stage");
                }
                IntakePhase::Complete => tracing::info!("analysis complete"),
                IntakePhase::Idle => {}
            }
        }
        self.phase = next;
        self.phase == IntakePhase::Complete
    }

    /// Label of the stage currently shown.
    pub fn stage_label(&self) -> Option<&'static str> {
        match self.phase {
            IntakePhase::Processing { stage } => Some(STAGES[stage].label),
            _ => None,
        }
    }

    /// Progress in percent: reaches 100 when the last stage begins.
    pub fn progress_percent(&self) -> u16 {
        match self.phase {
            IntakePhase::Idle => 0,
            IntakePhase::Processing { stage } => ((stage + 1) * 100 / STAGES.len()) as u16,
            IntakePhase::Complete => 100,
        }
    }

    /// Total time from start to completion.
    pub fn total_duration() -> Duration {
        STAGES.iter().map(|s| s.duration).sum::<Duration>() + SETTLE_DELAY
    }
}

impl Default for Intake {
    fn default() -> Self {
        Self::new()
    }
}

fn phase_at(elapsed: Duration) -> IntakePhase {
    let mut boundary = Duration::ZERO;
    for (idx, stage) in STAGES.iter().enumerate() {
        boundary += stage.duration;
        if elapsed < boundary {
            return IntakePhase::Processing { stage: idx };
        }
    }
    if elapsed < boundary + SETTLE_DELAY {
        IntakePhase::Processing {
            stage: STAGES.len() - 1,
        }
    } else {
        IntakePhase::Complete
    }
}

/// Check that a file looks like something the uploader accepts.
pub fn check_file(path: &Path) -> Result<(), IntakeError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(IntakeError::UnsupportedExtension(path.display().to_string()));
    }

    let size = fs::metadata(path)
        .map_err(|source| IntakeError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    if size > MAX_FILE_BYTES {
        return Err(IntakeError::FileTooLarge {
            size,
            limit: MAX_FILE_BYTES,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_ticks_do_nothing() {
        let mut intake = Intake::new();
        assert!(!intake.tick(Duration::from_secs(60)));
        assert_eq!(intake.phase(), IntakePhase::Idle);
    }

    #[test]
    fn phase_boundaries() {
        assert_eq!(phase_at(Duration::ZERO), IntakePhase::Processing { stage: 0 });
        assert_eq!(
            phase_at(Duration::from_millis(999)),
            IntakePhase::Processing { stage: 0 }
        );
        assert_eq!(
            phase_at(Duration::from_millis(1000)),
            IntakePhase::Processing { stage: 1 }
        );
        // 1000 + 1500 + 1200 + 2000 + 1500 = 7200 is where the last stage starts
        assert_eq!(
            phase_at(Duration::from_millis(7200)),
            IntakePhase::Processing { stage: 5 }
        );
        // Settle delay keeps the last stage on screen
        assert_eq!(
            phase_at(Duration::from_millis(8100)),
            IntakePhase::Processing { stage: 5 }
        );
        assert_eq!(phase_at(Duration::from_millis(8500)), IntakePhase::Complete);
    }

    #[test]
    fn total_duration_matches_script() {
        assert_eq!(Intake::total_duration(), Duration::from_millis(8500));
    }

    #[test]
    fn start_while_processing_is_rejected() {
        let mut intake = Intake::new();
        intake.start_unchecked("a.pdf").unwrap();
        assert!(matches!(
            intake.start_unchecked("b.pdf"),
            Err(IntakeError::Busy)
        ));
        assert_eq!(intake.file_name(), Some("a.pdf"));
    }

    #[test]
    fn progress_tracks_stage() {
        let mut intake = Intake::new();
        assert_eq!(intake.progress_percent(), 0);
        intake.start_unchecked("report.pdf").unwrap();
        assert_eq!(intake.progress_percent(), 16);
        assert_eq!(intake.stage_label(), Some("Extracting text content..."));
        intake.tick(Duration::from_millis(7200));
        assert_eq!(intake.progress_percent(), 100);
        assert_eq!(intake.stage_label(), Some("Finalizing report..."));
    }

    #[test]
    fn rejects_unknown_extension_before_touching_disk() {
        let err = check_file(Path::new("/nonexistent/notes.txt")).unwrap_err();
        assert!(matches!(err, IntakeError::UnsupportedExtension(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = check_file(Path::new("/nonexistent/report.PDF")).unwrap_err();
        assert!(matches!(err, IntakeError::Io { .. }));
    }
}
