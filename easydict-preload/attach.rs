use std::panic::{AssertUnwindSafe, catch_unwind};

use jni::sys::{JNI_VERSION_1_6, jint};
use log::{debug, error, info, warn};

use crate::{AttachConfig, RetainedSymbol, RetentionReport, preload, retain, zstd};

/// What happened when the compression library was preloaded.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PreloadOutcome {
    Loaded {
        library: String,
        /// Retained symbols the loaded library does not export.
        unresolved: Vec<&'static str>,
    },
    Failed {
        library: String,
        /// The platform loader's diagnostic.
        reason: String,
    },
}

impl PreloadOutcome {
    #[inline]
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, PreloadOutcome::Loaded { .. })
    }
}

/// Result of running the attach sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttachReport {
    pub version: jint,
    pub retention: RetentionReport,
    pub preload: PreloadOutcome,
}

/// Run the attach sequence: log, check the retained table, preload the
/// compression library.
///
/// A preload failure is logged and recorded in the report, never returned as
/// an error. `report.version` is always `config.version`.
pub fn attach(config: &AttachConfig) -> AttachReport {
    crate::logging::init(config.tag, config.max_level);
    info!("EasyDict JNI library loaded (zstd {})", zstd::linked_version());

    let retention = retain::check();
    for name in ["ZSTD_createDCtx", "ZSTD_createDDict"] {
        if let Some(address) = retain::address_of(name) {
            debug!("{name} address: {address:p}");
        }
    }
    if retention.all_resolved() {
        info!("all {} retained zstd symbols are linked", retention.total);
    } else {
        warn!(
            "{} of {} retained zstd symbols are null: {:?}",
            retention.null.len(),
            retention.total,
            retention.null
        );
    }

    let preload = preload_library(config);

    AttachReport {
        version: config.version,
        retention,
        preload,
    }
}

fn preload_library(config: &AttachConfig) -> PreloadOutcome {
    let library = &*config.library;
    match preload::preload(library, config.flags) {
        Ok(handle) => {
            info!("{library} loaded successfully via dlopen");
            let unresolved: Vec<_> = retain::retained()
                .iter()
                .map(RetainedSymbol::name)
                .filter(|symbol| handle.resolve(symbol).is_none())
                .collect();
            if !unresolved.is_empty() {
                warn!("{library} does not export {unresolved:?}");
            }
            PreloadOutcome::Loaded {
                library: library.to_owned(),
                unresolved,
            }
        }
        Err(err) => {
            let reason = err.reason();
            error!("Failed to load {library}: {reason}");
            PreloadOutcome::Failed {
                library: library.to_owned(),
                reason,
            }
        }
    }
}

/// The body of the runtime's load callback.
///
/// Builds the config, runs [`attach()`] and returns the configured version
/// token. Nothing unwinds out of this function: if building the config
/// panics, `JNI_VERSION_1_6` is returned; if attach panics, the version from
/// the config is returned. A panic reaching the runtime would abort the
/// process.
pub fn on_load(config: impl FnOnce() -> AttachConfig) -> jint {
    let Ok(config) = catch_unwind(AssertUnwindSafe(config)) else {
        log_quietly("EasyDict attach config panicked; continuing without preload");
        return JNI_VERSION_1_6;
    };
    if catch_unwind(AssertUnwindSafe(|| attach(&config))).is_err() {
        log_quietly("EasyDict attach panicked; continuing without preload");
    }
    config.version
}

/// Install the platform logger from a config built by `config`.
///
/// Used by the static initializer of [`attach_hook!()`](crate::attach_hook),
/// where a panic would abort the process, so panics are swallowed.
pub fn install_logger(config: impl FnOnce() -> AttachConfig) {
    _ = catch_unwind(AssertUnwindSafe(|| {
        let config = config();
        crate::logging::init(config.tag, config.max_level);
    }));
}

/// Log after a panic. The logger may be what panicked in the first place.
fn log_quietly(message: &str) {
    _ = catch_unwind(|| error!("{message}"));
}
