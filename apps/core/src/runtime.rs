use std::fmt::{Display, Formatter};
use std::path::PathBuf;
#[cfg(target_os = "windows")]
use std::time::Duration;

use crate::config::{self, Config, ConfigError};
use crate::dispatch::{ActivationMachine, Transition};
#[cfg(target_os = "windows")]
use crate::hotkey::HotkeyCombination;
use crate::hotkey_runtime::HotkeyRuntimeError;
use crate::interpreters;
use crate::launch::LaunchError;
use crate::logging;
use crate::model::ResultEntry;
use crate::search;
use crate::search_worker::{SearchCoordinator, SearchOptions};
use crate::shell::LauncherShell;
use crate::usage_store::{UsageStore, UsageStoreError};

pub const TOGGLE_HOTKEY_NAME: &str = "toggle_launcher";

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    Logging(std::io::Error),
    Usage(UsageStoreError),
    Hotkey(HotkeyRuntimeError),
    Instance(String),
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Logging(error) => write!(f, "logging error: {error}"),
            Self::Usage(error) => write!(f, "usage store error: {error}"),
            Self::Hotkey(error) => write!(f, "hotkey runtime error: {error}"),
            Self::Instance(error) => write!(f, "single instance error: {error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<UsageStoreError> for RuntimeError {
    fn from(value: UsageStoreError) -> Self {
        Self::Usage(value)
    }
}

impl From<HotkeyRuntimeError> for RuntimeError {
    fn from(value: HotkeyRuntimeError) -> Self {
        Self::Hotkey(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuntimeOptions {
    pub background: bool,
    pub config_path: Option<PathBuf>,
}

pub fn parse_cli_args(args: &[String]) -> Result<RuntimeOptions, String> {
    let mut options = RuntimeOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--background" => options.background = true,
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| "--config requires a path argument".to_string())?;
                options.config_path = Some(PathBuf::from(path));
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(options)
}

/// UI-thread state: the activation machine, the shell seam, the search
/// coordinator and the usage store. The hotkey listener and search workers
/// talk to it only through channels; it owns everything it mutates.
pub struct LauncherController<S: LauncherShell> {
    config: Config,
    shell: S,
    machine: ActivationMachine,
    coordinator: SearchCoordinator,
    usage: UsageStore,
    current_query: String,
}

impl<S: LauncherShell> LauncherController<S> {
    pub fn new(config: Config, shell: S, usage: UsageStore) -> Self {
        let coordinator = SearchCoordinator::new(SearchOptions::new(config.search_roots.clone()));
        Self {
            config,
            shell,
            machine: ActivationMachine::new(),
            coordinator,
            usage,
            current_query: String::new(),
        }
    }

    pub fn machine(&self) -> &ActivationMachine {
        &self.machine
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    /// One logical activation. Side effects run synchronously here, so any
    /// activation queued mid-transition drains before this returns.
    pub fn on_activation(&mut self) {
        let mut next = self.machine.on_activation();
        while let Some(transition) = next {
            self.execute(transition);
            next = self.machine.transition_complete();
        }
    }

    /// The query box changed. Interpreters run synchronously first; only a
    /// plain query spawns a search worker.
    pub fn on_query_changed(&mut self, query: &str) {
        self.current_query = query.trim().to_string();
        if self.current_query.is_empty() {
            self.coordinator.cancel_current();
            self.shell.present_results(&[]);
            self.shell.set_status("");
            return;
        }

        if let Some(action) = interpreters::classify(query) {
            self.coordinator.cancel_current();
            self.shell.present_action(&action);
            return;
        }

        self.coordinator.start_search(query);
    }

    /// Drain worker deliveries; stale generations were already discarded by
    /// the coordinator.
    pub fn poll_search_results(&mut self) {
        if let Some(entries) = self.coordinator.poll_results() {
            let ranked = search::rank(
                &entries,
                &self.current_query,
                self.config.max_results as usize,
                |name| self.usage.rank_bonus(name),
            );
            self.shell.present_results(&ranked);
        }
    }

    pub fn launch_entry(&mut self, entry: &ResultEntry) -> Result<(), LaunchError> {
        crate::launch::open_path(&entry.path)?;
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        if let Err(error) = self
            .usage
            .record_launch(&entry.name, entry.kind.as_str(), now)
        {
            logging::warn(&format!("usage record failed: {error}"));
        }
        self.on_activation();
        Ok(())
    }

    fn execute(&mut self, transition: Transition) {
        match transition {
            Transition::Show => {
                // Reset before visibility so stale results never flash.
                self.shell.reset_session();
                self.shell.show();
            }
            Transition::Hide => {
                self.coordinator.cancel_current();
                self.shell.hide();
            }
        }
    }
}

pub fn run() -> Result<(), RuntimeError> {
    run_with_options(RuntimeOptions::default())
}

pub fn run_with_options(options: RuntimeOptions) -> Result<(), RuntimeError> {
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(config::default_config_path);
    let cfg = config::load(Some(&config_path))?;
    logging::init(cfg.verbosity).map_err(RuntimeError::Logging)?;
    if !config_path.exists() {
        config::save(&cfg, &config_path)?;
        logging::info(&format!(
            "wrote default config to {}",
            config_path.display()
        ));
    }
    logging::info(&format!(
        "startup mode={} hotkey={} config_path={}",
        runtime_mode(),
        cfg.hotkey_toggle,
        config_path.display(),
    ));

    #[cfg(target_os = "windows")]
    {
        run_windows(cfg, options.background)
    }

    #[cfg(not(target_os = "windows"))]
    {
        let _ = options.background;
        logging::info("non-windows runtime mode: no global hotkey loop");
        Ok(())
    }
}

#[cfg(target_os = "windows")]
fn run_windows(cfg: Config, _background: bool) -> Result<(), RuntimeError> {
    use crate::hotkey_runtime::{self, HotkeyEvent};
    use crate::shell::LoggingShell;

    let _single_instance = match acquire_single_instance_guard() {
        Ok(Some(guard)) => guard,
        Ok(None) => {
            logging::info("runtime already active; exiting duplicate process");
            return Ok(());
        }
        Err(error) => return Err(RuntimeError::Instance(error)),
    };

    if let Ok(exe) = std::env::current_exe() {
        if let Err(error) = crate::startup::sync_with_config(cfg.launch_at_startup, &exe) {
            logging::warn(&format!("startup entry sync failed: {error}"));
        }
    }

    let combination = HotkeyCombination::parse(&cfg.hotkey_toggle)
        .map_err(|error| RuntimeError::Config(ConfigError::Invalid(error.to_string())))?;
    let usage = UsageStore::open(&config::default_usage_db_path())?;
    let mut controller = LauncherController::new(cfg, LoggingShell, usage);

    let listener = hotkey_runtime::spawn_listener(combination, TOGGLE_HOTKEY_NAME.to_string());
    logging::info("event loop running");

    loop {
        match listener.events().recv_timeout(Duration::from_millis(50)) {
            Ok(HotkeyEvent::Fired(name)) => {
                if name == TOGGLE_HOTKEY_NAME {
                    controller.on_activation();
                }
            }
            Ok(HotkeyEvent::Disabled(reason)) => {
                // The hotkey feature degrades to off; an embedding shell
                // can keep serving queries through the transport seam.
                logging::error(&format!("hotkey feature disabled: {reason}"));
                return Ok(());
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                controller.poll_search_results();
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                logging::info("hotkey listener stopped; shutting down");
                return Ok(());
            }
        }
    }
}

fn runtime_mode() -> &'static str {
    #[cfg(target_os = "windows")]
    {
        "windows-hotkey-runtime"
    }

    #[cfg(not(target_os = "windows"))]
    {
        "non-windows-noop"
    }
}

#[cfg(target_os = "windows")]
struct SingleInstanceGuard {
    handle: windows_sys::Win32::Foundation::HANDLE,
}

#[cfg(target_os = "windows")]
impl Drop for SingleInstanceGuard {
    fn drop(&mut self) {
        unsafe {
            windows_sys::Win32::Foundation::CloseHandle(self.handle);
        }
    }
}

#[cfg(target_os = "windows")]
fn acquire_single_instance_guard() -> Result<Option<SingleInstanceGuard>, String> {
    use windows_sys::Win32::Foundation::GetLastError;
    use windows_sys::Win32::System::Threading::CreateMutexW;

    let mutex_name: Vec<u16> = "Local\\GlintRuntimeSingleton"
        .encode_utf16()
        .chain(std::iter::once(0))
        .collect();
    let handle = unsafe { CreateMutexW(std::ptr::null(), 0, mutex_name.as_ptr()) };
    if handle.is_null() {
        let error = unsafe { GetLastError() };
        return Err(format!("CreateMutexW failed with error {error}"));
    }

    // ERROR_ALREADY_EXISTS
    let error = unsafe { GetLastError() };
    if error == 183 {
        unsafe {
            windows_sys::Win32::Foundation::CloseHandle(handle);
        }
        return Ok(None);
    }

    Ok(Some(SingleInstanceGuard { handle }))
}
