use core::{ffi::CStr, ptr::NonNull};
use std::ffi::{CString, NulError, c_int, c_void};

/// Flags passed to the dynamic loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadFlags {
    /// Resolve all undefined symbols immediately (`RTLD_NOW`) instead of on
    /// first use (`RTLD_LAZY`).
    pub now: bool,
    /// Make the library's symbols available to modules loaded afterwards
    /// (`RTLD_GLOBAL`) instead of keeping them private (`RTLD_LOCAL`).
    pub global: bool,
}

impl LoadFlags {
    /// `RTLD_NOW | RTLD_GLOBAL`
    pub const NOW_GLOBAL: LoadFlags = LoadFlags {
        now: true,
        global: true,
    };

    #[must_use]
    pub fn bits(self) -> c_int {
        let binding = if self.now {
            libc::RTLD_NOW
        } else {
            libc::RTLD_LAZY
        };
        let visibility = if self.global {
            libc::RTLD_GLOBAL
        } else {
            libc::RTLD_LOCAL
        };
        binding | visibility
    }
}

impl Default for LoadFlags {
    #[inline]
    fn default() -> Self {
        Self::NOW_GLOBAL
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PreloadError {
    #[error("invalid library name {name:?}: {source}")]
    InvalidName {
        name: String,
        #[source]
        source: NulError,
    },
    #[error("failed to load {library}: {reason}")]
    Loader { library: String, reason: String },
}

impl PreloadError {
    /// The loader's diagnostic, or the name validation error.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            PreloadError::InvalidName { source, .. } => source.to_string(),
            PreloadError::Loader { reason, .. } => reason.clone(),
        }
    }
}

/// A library opened by [`preload()`].
///
/// The handle is never closed. Once preloaded, the library stays resident for
/// the rest of the process, which is the whole point of preloading it.
#[derive(Debug)]
pub struct LibraryHandle {
    name: String,
    raw: NonNull<c_void>,
}

// SAFETY: A `dlopen` handle is an opaque token, and `dlsym` is thread-safe.
unsafe impl Send for LibraryHandle {}
unsafe impl Sync for LibraryHandle {}

impl LibraryHandle {
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up `symbol` in this library (and, for global handles, its
    /// dependencies).
    ///
    /// Returns `None` if the symbol is absent or the name contains a NUL byte.
    #[must_use]
    pub fn resolve(&self, symbol: &str) -> Option<NonNull<c_void>> {
        let symbol = CString::new(symbol).ok()?;
        let address = unsafe {
            // SAFETY: `raw` came from a successful `dlopen` and is never
            // closed, and `symbol` is NUL-terminated.
            libc::dlsym(self.raw.as_ptr(), symbol.as_ptr())
        };
        NonNull::new(address)
    }
}

/// Load `name` through the platform's dynamic loader.
///
/// `name` is looked up the same way the loader would look up a `DT_NEEDED`
/// entry, i.e. through the library search path unless it contains a slash.
///
/// # Errors
///
/// Returns [`PreloadError::InvalidName`] if `name` contains a NUL byte, and
/// [`PreloadError::Loader`] with the loader's diagnostic if the library could
/// not be loaded.
pub fn preload(name: &str, flags: LoadFlags) -> Result<LibraryHandle, PreloadError> {
    let c_name = c_name(name)?;
    let raw = unsafe {
        // SAFETY: `c_name` is NUL-terminated. Running the library's
        // initializers is the intended effect.
        libc::dlopen(c_name.as_ptr(), flags.bits())
    };

    match NonNull::new(raw) {
        Some(raw) => Ok(LibraryHandle {
            name: name.to_owned(),
            raw,
        }),
        None => Err(PreloadError::Loader {
            library: name.to_owned(),
            reason: last_error(),
        }),
    }
}

/// Check whether `name` is already resident in the process, without loading it.
#[must_use]
pub fn is_loaded(name: &str) -> bool {
    let Ok(c_name) = c_name(name) else {
        return false;
    };
    let raw = unsafe {
        // SAFETY: `RTLD_NOLOAD` never maps anything new.
        libc::dlopen(c_name.as_ptr(), libc::RTLD_NOLOAD | libc::RTLD_LAZY)
    };
    if raw.is_null() {
        // Clear the pending error so it does not leak into the next report.
        _ = last_error();
        return false;
    }
    unsafe {
        // SAFETY: Drops the reference taken by the probe above. The library
        // stays loaded because someone else already holds it.
        libc::dlclose(raw);
    }
    true
}

fn c_name(name: &str) -> Result<CString, PreloadError> {
    CString::new(name).map_err(|source| PreloadError::InvalidName {
        name: name.to_owned(),
        source,
    })
}

/// Take the loader's pending error message.
fn last_error() -> String {
    let message = unsafe {
        // SAFETY: `dlerror` returns either null or a NUL-terminated string
        // owned by the loader, valid until the next `dl*` call on this thread.
        libc::dlerror()
    };
    if message.is_null() {
        return String::from("unknown dynamic loader error");
    }
    unsafe {
        // SAFETY: See above. The string is copied out before returning.
        CStr::from_ptr(message)
    }
    .to_string_lossy()
    .into_owned()
}
