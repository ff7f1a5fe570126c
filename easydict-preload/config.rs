use std::borrow::Cow;

use jni::sys::{JNI_VERSION_1_6, jint};
use log::LevelFilter;

use crate::LoadFlags;

/// Log tag used by the native layer.
pub const LOG_TAG: &str = "EasyDictNative";

/// Settings for [`attach()`](crate::attach).
///
/// The defaults match what the application ships with: preload `libzstd.so`
/// with `RTLD_NOW | RTLD_GLOBAL`, log under `EasyDictNative`, and report
/// `JNI_VERSION_1_6` to the runtime.
#[derive(Clone, Debug)]
pub struct AttachConfig {
    pub library: Cow<'static, str>,
    pub flags: LoadFlags,
    pub tag: &'static str,
    pub max_level: LevelFilter,
    /// The version token returned to the host runtime. This is returned
    /// unconditionally, whatever happens during attach.
    pub version: jint,
}

impl Default for AttachConfig {
    fn default() -> Self {
        Self {
            library: Cow::Borrowed(crate::zstd::LIBRARY),
            flags: LoadFlags::default(),
            tag: LOG_TAG,
            max_level: LevelFilter::Debug,
            version: JNI_VERSION_1_6,
        }
    }
}

impl AttachConfig {
    #[must_use]
    pub fn with_library(mut self, library: impl Into<Cow<'static, str>>) -> Self {
        self.library = library.into();
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: LoadFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }

    #[must_use]
    pub fn with_max_level(mut self, max_level: LevelFilter) -> Self {
        self.max_level = max_level;
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: jint) -> Self {
        self.version = version;
        self
    }
}
