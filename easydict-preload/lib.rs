//! Native attach layer for EasyDict.
//!
//! The application's dictionary reader talks to zstd directly, so the native
//! library it loads has two jobs:
//!
//! 1. Keep the linked copy of every zstd function the reader needs in the
//!    final binary, even though no Rust code calls them. This is done with a
//!    link-time table (see [`retain!`]). The copy stays local to the binary;
//!    it is not exported.
//! 2. When the Java runtime attaches the library, preload `libzstd.so` into
//!    the global symbol namespace. That library is what supplies the
//!    globally visible zstd symbols the reader resolves by name. The outcome
//!    is logged, and a failed preload is never fatal.
//!
//! The `cdylib` the application loads only needs to contain a call to
//! [`attach_hook!()`](attach_hook), which exports `JNI_OnLoad`.

mod attach;
mod config;
mod logging;
mod preload;
mod retain;
pub mod zstd;

pub use attach::*;
pub use config::*;
pub use logging::init as init_logging;
pub use preload::*;
pub use retain::*;

/// Export the `JNI_OnLoad` callback from the calling crate.
///
/// Put a call to this macro in the root of the `cdylib` that the application
/// loads with `System.loadLibrary()`. With no arguments the default
/// [`AttachConfig`] is used; otherwise the argument is an expression
/// evaluating to an `AttachConfig`.
///
/// ## Details
///
/// Besides the callback, this creates a static initializer that installs the
/// platform logger as soon as the library is mapped, before the runtime calls
/// `JNI_OnLoad`.
///
/// The config expression is evaluated inside a panic guard, both in the
/// static initializer and in the callback. The callback never dereferences the
/// `JavaVM` pointer, never unwinds, and always returns a version token: the
/// configured one, or `JNI_VERSION_1_6` if the config expression panicked.
#[macro_export]
macro_rules! attach_hook {
    () => {
        $crate::attach_hook!(<$crate::AttachConfig as ::core::default::Default>::default());
    };
    ($config:expr) => {
        #[doc(hidden)]
        mod _easydict_attach_hook {
            #[allow(unused_imports)]
            use super::*;

            pub(crate) fn config() -> $crate::AttachConfig {
                $config
            }

            $crate::internal::ctor::declarative::ctor! {
                #[ctor]
                #[doc(hidden)]
                pub fn _easydict_install_logger() {
                    $crate::install_logger(config);
                }
            }

            #[unsafe(no_mangle)]
            #[allow(non_snake_case)]
            pub extern "system" fn JNI_OnLoad(
                _vm: *mut $crate::internal::jni::sys::JavaVM,
                _reserved: *mut ::core::ffi::c_void,
            ) -> $crate::internal::jni::sys::jint {
                $crate::on_load(config)
            }
        }
    };
}

#[doc(hidden)]
pub mod internal {
    pub use ctor;
    pub use jni;
    pub use linkme;
}
