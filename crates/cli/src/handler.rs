use eyre::EyreHandler;
use itertools::Itertools;
use minty_common::errors::{config_hint, dedup_chain};
use std::{error::Error, fmt};

/// Reports errors returned from `main` as the failed operation, its causes and, when the
/// failure points at a setting, which one to check.
///
/// With `MINTY_DEBUG` set, `Debug` output is handed to color-eyre instead.
pub struct Handler {
    debug_handler: Option<Box<dyn EyreHandler>>,
}

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&dedup_chain(error).iter().format("; "), f)
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(debug_handler) = &self.debug_handler {
            return debug_handler.debug(error, f);
        }
        if f.alternate() {
            return fmt::Debug::fmt(error, f);
        }

        let messages = dedup_chain(error);
        let Some((operation, causes)) = messages.split_first() else { return Ok(()) };
        write!(f, "{operation}")?;
        if !causes.is_empty() {
            write!(f, "\n\nCaused by:")?;
            for cause in causes {
                write!(f, "\n  {cause}")?;
            }
        }
        if let Some(hint) = config_hint(error) {
            write!(f, "\n\nHint: {hint}")?;
        }
        Ok(())
    }

    fn track_caller(&mut self, location: &'static std::panic::Location<'static>) {
        if let Some(debug_handler) = &mut self.debug_handler {
            debug_handler.track_caller(location);
        }
    }
}

/// Installs the minty [`eyre`] hook and the color-eyre panic hook.
pub fn install() {
    let (panic_hook, debug_hook) = color_eyre::config::HookBuilder::default()
        .panic_section("This is a bug in minty, please report it.")
        .into_hooks();
    panic_hook.install();

    let debug_hook = debug_hook.into_eyre_hook();
    let debug = std::env::var_os("MINTY_DEBUG").is_some();
    let hook = Box::new(move |e: &(dyn Error + 'static)| -> Box<dyn EyreHandler> {
        Box::new(Handler { debug_handler: debug.then(|| debug_hook(e)) })
    });
    if let Err(e) = eyre::set_hook(hook) {
        debug!("failed to install eyre error hook: {e}");
    }
}
