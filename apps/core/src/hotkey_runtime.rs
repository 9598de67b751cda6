//! OS hotkey registration and the dedicated listening thread.
//!
//! Registration decomposes a combination into a modifier bitmask plus its
//! primary base key; extra base keys of a chord are not enforced at the OS
//! level. The listening loop owns the id-to-logical-name table exclusively
//! and forwards fired hotkeys over a channel in arrival order.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::mpsc;
use std::thread;

use crate::hotkey::{HotkeyCombination, Modifiers};
use crate::logging;

pub type HotkeyId = i32;

// Same values as the Win32 MOD_* constants; defined locally so the
// decomposition logic is shared with non-Windows builds and tests.
pub const MOD_BIT_ALT: u32 = 0x0001;
pub const MOD_BIT_CTRL: u32 = 0x0002;
pub const MOD_BIT_SHIFT: u32 = 0x0004;
pub const MOD_BIT_WIN: u32 = 0x0008;

pub fn modifier_bits(modifiers: &Modifiers) -> u32 {
    let mut bits = 0;
    if modifiers.alt {
        bits |= MOD_BIT_ALT;
    }
    if modifiers.ctrl {
        bits |= MOD_BIT_CTRL;
    }
    if modifiers.shift {
        bits |= MOD_BIT_SHIFT;
    }
    if modifiers.win {
        bits |= MOD_BIT_WIN;
    }
    bits
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotkeyRuntimeError {
    AlreadyBound(String),
    RegistrationFailed(String),
    EventLoopFailed(String),
    UnsupportedPlatform,
}

impl Display for HotkeyRuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyBound(combination) => {
                write!(f, "hotkey already bound: {combination}")
            }
            Self::RegistrationFailed(detail) => write!(f, "registration failed: {detail}"),
            Self::EventLoopFailed(detail) => write!(f, "event loop failed: {detail}"),
            Self::UnsupportedPlatform => write!(f, "global hotkeys unsupported on this platform"),
        }
    }
}

impl std::error::Error for HotkeyRuntimeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnregisterFailure {
    pub id: HotkeyId,
    pub error: HotkeyRuntimeError,
}

pub trait HotkeyRegistrar: Send {
    /// Bind a combination under a logical name. Fails without fallback when
    /// the (modifiers, primary key) pair is already claimed or invalid;
    /// prior bindings stay intact.
    fn register(
        &mut self,
        combination: &HotkeyCombination,
        logical_name: &str,
    ) -> Result<HotkeyId, HotkeyRuntimeError>;

    /// Release every binding this registrar created. Idempotent; one failed
    /// release never blocks the rest. Failures are returned for logging.
    fn unregister_all(&mut self) -> Vec<UnregisterFailure>;

    fn logical_name(&self, id: HotkeyId) -> Option<&str>;
}

/// Test registrar: tracks claimed (modifiers, vk) pairs so duplicate
/// registrations fail the way the OS facility does.
#[derive(Default)]
pub struct MockRegistrar {
    next_id: HotkeyId,
    bindings: Vec<(HotkeyId, u32, u32, String)>,
}

impl MockRegistrar {
    pub fn bindings(&self) -> Vec<(HotkeyId, String)> {
        self.bindings
            .iter()
            .map(|(id, _, _, name)| (*id, name.clone()))
            .collect()
    }
}

impl HotkeyRegistrar for MockRegistrar {
    fn register(
        &mut self,
        combination: &HotkeyCombination,
        logical_name: &str,
    ) -> Result<HotkeyId, HotkeyRuntimeError> {
        let bits = modifier_bits(&combination.modifiers);
        let vk = combination.primary_vk_code();
        if self
            .bindings
            .iter()
            .any(|(_, claimed_bits, claimed_vk, _)| *claimed_bits == bits && *claimed_vk == vk)
        {
            return Err(HotkeyRuntimeError::AlreadyBound(combination.canonical()));
        }

        self.next_id += 1;
        self.bindings
            .push((self.next_id, bits, vk, logical_name.to_string()));
        Ok(self.next_id)
    }

    fn unregister_all(&mut self) -> Vec<UnregisterFailure> {
        self.bindings.clear();
        Vec::new()
    }

    fn logical_name(&self, id: HotkeyId) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(candidate, _, _, _)| *candidate == id)
            .map(|(_, _, _, name)| name.as_str())
    }
}

#[cfg(not(target_os = "windows"))]
#[derive(Default)]
pub struct NoopRegistrar {
    next_id: HotkeyId,
    names: HashMap<HotkeyId, String>,
}

#[cfg(not(target_os = "windows"))]
impl HotkeyRegistrar for NoopRegistrar {
    fn register(
        &mut self,
        _combination: &HotkeyCombination,
        logical_name: &str,
    ) -> Result<HotkeyId, HotkeyRuntimeError> {
        self.next_id += 1;
        self.names.insert(self.next_id, logical_name.to_string());
        Ok(self.next_id)
    }

    fn unregister_all(&mut self) -> Vec<UnregisterFailure> {
        self.names.clear();
        Vec::new()
    }

    fn logical_name(&self, id: HotkeyId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }
}

#[cfg(target_os = "windows")]
pub struct WindowsRegistrar {
    next_id: HotkeyId,
    names: HashMap<HotkeyId, String>,
}

#[cfg(target_os = "windows")]
impl Default for WindowsRegistrar {
    fn default() -> Self {
        Self {
            next_id: 0,
            names: HashMap::new(),
        }
    }
}

#[cfg(target_os = "windows")]
impl HotkeyRegistrar for WindowsRegistrar {
    fn register(
        &mut self,
        combination: &HotkeyCombination,
        logical_name: &str,
    ) -> Result<HotkeyId, HotkeyRuntimeError> {
        use windows_sys::Win32::UI::Input::KeyboardAndMouse::RegisterHotKey;

        let bits = modifier_bits(&combination.modifiers);
        let vk = combination.primary_vk_code();
        let id = self.next_id + 1;

        let ok = unsafe { RegisterHotKey(std::ptr::null_mut(), id, bits, vk) };
        if ok == 0 {
            return Err(HotkeyRuntimeError::RegistrationFailed(format!(
                "RegisterHotKey failed for '{}'",
                combination.canonical()
            )));
        }

        self.next_id = id;
        self.names.insert(id, logical_name.to_string());
        Ok(id)
    }

    fn unregister_all(&mut self) -> Vec<UnregisterFailure> {
        use windows_sys::Win32::UI::Input::KeyboardAndMouse::UnregisterHotKey;

        let mut failures = Vec::new();
        for (id, _) in self.names.drain() {
            let ok = unsafe { UnregisterHotKey(std::ptr::null_mut(), id) };
            if ok == 0 {
                failures.push(UnregisterFailure {
                    id,
                    error: HotkeyRuntimeError::RegistrationFailed(format!(
                        "UnregisterHotKey failed for id {id}"
                    )),
                });
            }
        }
        failures
    }

    fn logical_name(&self, id: HotkeyId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }
}

pub fn default_registrar() -> Box<dyn HotkeyRegistrar> {
    #[cfg(target_os = "windows")]
    {
        Box::new(WindowsRegistrar::default())
    }

    #[cfg(not(target_os = "windows"))]
    {
        Box::new(NoopRegistrar::default())
    }
}

/// Blocking Win32 message pump. Must run on the thread that registered the
/// hotkeys; WM_HOTKEY messages for thread-bound hotkeys arrive here.
#[cfg(target_os = "windows")]
pub fn run_message_loop<F>(mut on_hotkey: F) -> Result<(), HotkeyRuntimeError>
where
    F: FnMut(HotkeyId),
{
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, GetMessageW, TranslateMessage, MSG, WM_HOTKEY,
    };

    let mut msg: MSG = unsafe { std::mem::zeroed() };
    loop {
        let status = unsafe { GetMessageW(&mut msg, std::ptr::null_mut(), 0, 0) };
        if status == -1 {
            return Err(HotkeyRuntimeError::EventLoopFailed(
                "GetMessageW returned -1".to_string(),
            ));
        }
        if status == 0 {
            return Ok(());
        }

        if msg.message == WM_HOTKEY {
            on_hotkey(msg.wParam as HotkeyId);
        }

        unsafe {
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

#[cfg(not(target_os = "windows"))]
pub fn run_message_loop<F>(_on_hotkey: F) -> Result<(), HotkeyRuntimeError>
where
    F: FnMut(HotkeyId),
{
    Err(HotkeyRuntimeError::UnsupportedPlatform)
}

/// What the listener thread reports back to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotkeyEvent {
    /// A registered hotkey fired; carries its logical name.
    Fired(String),
    /// Registration or the message pump failed; the feature is off but the
    /// rest of the application keeps running.
    Disabled(String),
}

pub struct HotkeyListener {
    events: mpsc::Receiver<HotkeyEvent>,
}

impl HotkeyListener {
    pub fn events(&self) -> &mpsc::Receiver<HotkeyEvent> {
        &self.events
    }
}

/// Spawn the dedicated listening thread. Registration happens on that
/// thread because thread-message hotkeys are delivered to the registering
/// thread's queue.
pub fn spawn_listener(combination: HotkeyCombination, logical_name: String) -> HotkeyListener {
    let (tx, rx) = mpsc::channel();

    thread::Builder::new()
        .name("glint-hotkey-listener".to_string())
        .spawn(move || {
            let mut registrar = default_registrar();
            match registrar.register(&combination, &logical_name) {
                Ok(id) => {
                    logging::info(&format!(
                        "hotkey '{}' registered as '{logical_name}' (id {id})",
                        combination.canonical()
                    ));
                }
                Err(error) => {
                    let _ = tx.send(HotkeyEvent::Disabled(error.to_string()));
                    return;
                }
            }

            let pump = run_message_loop(|id| {
                if let Some(name) = registrar.logical_name(id) {
                    let _ = tx.send(HotkeyEvent::Fired(name.to_string()));
                }
            });
            if let Err(error) = pump {
                let _ = tx.send(HotkeyEvent::Disabled(error.to_string()));
            }

            for failure in registrar.unregister_all() {
                logging::warn(&format!(
                    "unregister failed for hotkey id {}: {}",
                    failure.id, failure.error
                ));
            }
        })
        .expect("hotkey listener thread should spawn");

    HotkeyListener { events: rx }
}
