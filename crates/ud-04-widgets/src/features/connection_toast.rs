//! LAN address toast with copy and close buttons.

use std::fmt;
use std::sync::Arc;

use shared_bus::{names, DashboardEvent, UserInput};
use shared_types::preferences::keys;
use tracing::warn;
use ud_02_feature_registry::{Feature, FeatureContext, FeatureError, FeatureInfo, MountHandle};

use crate::clipboard::Clipboard;
use crate::layout::slots;
use crate::toast::{spawn, AfterFlash, Flash};

/// LAN address used until one has been saved.
pub const DEFAULT_LAN_IP: &str = "192.168.219.100";

const COPY_LABEL: &str = "Copy address";
const COPIED_LABEL: &str = "Copied!";
const COPY_FAILED: &str = "Clipboard copy failed";

pub struct ConnectionToast {
    port: u16,
    clipboard: Arc<dyn Clipboard>,
}

impl ConnectionToast {
    pub fn new(port: u16, clipboard: Arc<dyn Clipboard>) -> Self {
        Self { port, clipboard }
    }

    fn address(&self, ctx: &FeatureContext) -> String {
        let ip = ctx
            .preferences
            .get(keys::LAN_IP)
            .filter(|ip| !ip.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LAN_IP.to_string());
        format!("http://{}:{}", ip.trim(), self.port)
    }
}

impl fmt::Debug for ConnectionToast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionToast")
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

impl Feature for ConnectionToast {
    fn info(&self) -> FeatureInfo {
        FeatureInfo::new("connection-toast")
    }

    fn when(&self, ctx: &FeatureContext) -> bool {
        ctx.surface.has(slots::TOAST)
    }

    fn mount(&self, ctx: &FeatureContext) -> Result<MountHandle, FeatureError> {
        let address = self.address(ctx);
        let surface = &ctx.surface;
        surface.set_text(slots::ADDR, &address);
        surface.set_text(slots::COPY_BTN, COPY_LABEL);
        surface.set_visible(slots::TOAST_ERROR, false);
        surface.set_visible(slots::TOAST, true);

        let handle = MountHandle::new();
        let keeper = handle.keeper();
        let clipboard = Arc::clone(&self.clipboard);
        let surface = Arc::clone(&ctx.surface);
        let flash = Arc::new(Flash::new(Arc::clone(&surface), slots::COPY_BTN));

        let on_input = ctx.bus.on_fn(names::USER_INPUT, move |event: &DashboardEvent| {
            match event {
                DashboardEvent::Input(UserInput::CopyAddress) => {
                    let clipboard = Arc::clone(&clipboard);
                    let surface = Arc::clone(&surface);
                    let flash = Arc::clone(&flash);
                    let address = address.clone();
                    let copy = spawn(async move {
                        match clipboard.write_text(&address).await {
                            Ok(()) => {
                                surface.set_visible(slots::TOAST_ERROR, false);
                                flash.show(COPIED_LABEL, AfterFlash::Restore(COPY_LABEL.into()));
                            }
                            Err(e) => {
                                warn!(error = %e, "Copy to clipboard failed");
                                surface.set_text(slots::TOAST_ERROR, COPY_FAILED);
                                surface.set_visible(slots::TOAST_ERROR, true);
                            }
                        }
                    });
                    if let Some(copy) = copy {
                        keeper.hold_task(copy);
                    }
                }
                DashboardEvent::Input(UserInput::CloseToast) => {
                    surface.set_visible(slots::TOAST, false);
                }
                _ => {}
            }
            Ok(())
        });

        Ok(handle.with_subscription(on_input))
    }
}
