use crate::harness::logs::test_now;
use crate::harness::{CapturedEvent, init_test_tracing};
use sphinxmon_core::cli::{Mode, PluginError, Status, execute};
use sphinxmon_core::conf::PluginConfig;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};
use tempfile::TempDir;

/// A plugin instance pointed at a private pair of log files.
///
/// Log files are only created once something is written to them, so a fresh
/// plugin sees both logs as missing.
pub struct TestPlugin {
    dir: TempDir,
    config: PluginConfig,
}

/// Everything one invocation produced.
pub struct PluginOutput {
    pub result: Result<Status, PluginError>,
    pub stdout: String,
    pub stderr: String,
}

impl PluginOutput {
    /// Exit status the binary would report.
    pub fn exit_code(&self) -> u8 {
        match &self.result {
            Ok(status) => status.exit_code(),
            Err(err) => err.exit_code(),
        }
    }
}

impl TestPlugin {
    pub fn new() -> Self {
        Self::with_vars(Vec::<(String, String)>::new())
    }

    /// Build the config from plugin environment variables; log paths are
    /// always redirected into the private directory.
    pub fn with_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        init_test_tracing(events());

        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let base = PluginConfig::from_vars(vars).expect("invalid plugin environment");

        let config = PluginConfig {
            searchd_log_path: dir.path().join("searchd.log"),
            query_log_path: dir.path().join("query.log"),
            ..base
        };

        Self { dir, config }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_query_log(&self, lines: &[String]) {
        write_lines(&self.config.query_log_path, lines, false);
    }

    pub fn append_query_log(&self, lines: &[String]) {
        write_lines(&self.config.query_log_path, lines, true);
    }

    pub fn write_daemon_log(&self, lines: &[String]) {
        write_lines(&self.config.searchd_log_path, lines, false);
    }

    pub fn run(&self, mode: Mode, metric: Option<&str>) -> PluginOutput {
        let mut out = Vec::new();
        let mut diag = Vec::new();

        let result = execute(mode, metric, &self.config, test_now(), &mut out, &mut diag);

        PluginOutput {
            result,
            stdout: String::from_utf8(out).expect("stdout is not utf-8"),
            stderr: String::from_utf8(diag).expect("stderr is not utf-8"),
        }
    }

    pub fn fetch(&self, metric: &str) -> PluginOutput {
        self.run(Mode::Fetch, Some(metric))
    }

    /// Captured tracing events that mention one of this plugin's log files.
    pub fn diagnostics(&self) -> Vec<CapturedEvent> {
        let dir = self.dir.path().display().to_string();

        events()
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.field("path").is_some_and(|p| p.starts_with(&dir)))
            .cloned()
            .collect()
    }
}

impl Default for TestPlugin {
    fn default() -> Self {
        Self::new()
    }
}

fn write_lines(path: &Path, lines: &[String], append: bool) {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .expect("failed to open log fixture");

    for line in lines {
        writeln!(file, "{line}").expect("failed to write log fixture");
    }
}

static EVENTS: OnceLock<Arc<Mutex<Vec<CapturedEvent>>>> = OnceLock::new();

fn events() -> Arc<Mutex<Vec<CapturedEvent>>> {
    EVENTS
        .get_or_init(|| Arc::new(Mutex::new(Vec::new())))
        .clone()
}
