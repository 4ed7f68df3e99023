// tray.rs
use crate::error::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

pub const TRAY_TOOLTIP: &str = "Startup App Auto-Run";

/// What the tray loop gets to talk back to its owner.
pub struct LoopHandle {
    cancel: Arc<AtomicBool>,
    ready: Sender<()>,
    exit: Sender<()>,
}

impl LoopHandle {
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Setup is done; `TrayTask::spawn_with` may return.
    pub fn ready(&self) {
        let _ = self.ready.send(());
    }

    pub fn request_exit(&self) {
        let _ = self.exit.send(());
    }
}

/// Background tray loop. The owner waits for an exit request, then cancels
/// and joins.
pub struct TrayTask {
    cancel: Arc<AtomicBool>,
    exit: Receiver<()>,
    handle: JoinHandle<Result<()>>,
}

impl TrayTask {
    /// Starts the platform tray indicator with a single "Exit" item.
    pub fn start(tooltip: &str) -> Result<Self> {
        let tooltip = tooltip.to_string();
        Self::spawn_with(move |handle| platform::run_tray(&tooltip, &handle))
    }

    /// Runs `run_loop` on a worker thread and waits until it reports ready
    /// or returns.
    pub fn spawn_with<F>(run_loop: F) -> Result<Self>
    where
        F: FnOnce(LoopHandle) -> Result<()> + Send + 'static,
    {
        let cancel = Arc::new(AtomicBool::new(false));
        let (ready_tx, ready_rx) = mpsc::channel();
        let (exit_tx, exit_rx) = mpsc::channel();

        let loop_handle = LoopHandle {
            cancel: cancel.clone(),
            ready: ready_tx,
            exit: exit_tx,
        };
        let handle = thread::Builder::new()
            .name("tray".to_string())
            .spawn(move || run_loop(loop_handle))
            .map_err(|e| Error::Tray(e.to_string()))?;

        let task = Self {
            cancel,
            exit: exit_rx,
            handle,
        };
        match ready_rx.recv() {
            Ok(()) => Ok(task),
            // Loop returned before signalling ready.
            Err(_) => match task.shutdown() {
                Ok(()) => Err(Error::Tray("tray loop exited during setup".to_string())),
                Err(e) => Err(e),
            },
        }
    }

    /// Blocks until the user asks to exit or the loop ends on its own.
    pub fn wait_for_exit(&self) {
        let _ = self.exit.recv();
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn shutdown(self) -> Result<()> {
        self.cancel();
        self.handle
            .join()
            .unwrap_or_else(|_| Err(Error::Tray("tray thread panicked".to_string())))
    }
}

#[cfg(target_os = "windows")]
mod platform {
    use super::LoopHandle;
    use crate::error::{Error, Result};
    use crate::icon::{icon_image, ICON_SIZE};
    use std::time::Duration;
    use tray_icon::{
        menu::{Menu, MenuEvent, MenuItem},
        Icon, TrayIconBuilder,
    };

    const POLL_INTERVAL: Duration = Duration::from_millis(50);

    pub fn run_tray(tooltip: &str, handle: &LoopHandle) -> Result<()> {
        let menu = Menu::new();
        let exit = MenuItem::new("Exit", true, None);
        menu.append(&exit).map_err(|e| Error::Tray(e.to_string()))?;

        let image = icon_image(ICON_SIZE);
        let (width, height) = image.dimensions();
        let icon = Icon::from_rgba(image.into_raw(), width, height)
            .map_err(|e| Error::Tray(e.to_string()))?;

        // Dropping the icon removes it from the tray.
        let _tray = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_tooltip(tooltip)
            .with_icon(icon)
            .build()
            .map_err(|e| Error::Tray(e.to_string()))?;

        handle.ready();
        let menu_channel = MenuEvent::receiver();

        while !handle.is_cancelled() {
            pump_messages();
            while let Ok(event) = menu_channel.try_recv() {
                if &event.id == exit.id() {
                    log::info!("Exit requested from tray");
                    handle.request_exit();
                }
            }
            std::thread::sleep(POLL_INTERVAL);
        }

        Ok(())
    }

    /// Tray and menu callbacks arrive through this thread's message queue.
    fn pump_messages() {
        use winapi::um::winuser::{DispatchMessageW, PeekMessageW, TranslateMessage, MSG, PM_REMOVE};

        unsafe {
            let mut msg: MSG = std::mem::zeroed();
            while PeekMessageW(&mut msg, std::ptr::null_mut(), 0, 0, PM_REMOVE) != 0 {
                TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }
}

#[cfg(not(target_os = "windows"))]
mod platform {
    use super::LoopHandle;
    use crate::error::{Error, Result};

    pub fn run_tray(_tooltip: &str, _handle: &LoopHandle) -> Result<()> {
        Err(Error::Tray(
            "tray indicator is only available on Windows".to_string(),
        ))
    }
}
