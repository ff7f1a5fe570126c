//! The zstd functions the application calls through the dictionary reader.
//!
//! None of these are called from Rust. They are listed here so that the
//! linker keeps the linked zstd copy of each in the final `cdylib`. Those
//! copies are local to the binary; the globally visible symbols come from the
//! `libzstd.so` preloaded at attach.

use zstd_safe::zstd_sys;

crate::retain!(
    zstd_sys::ZSTD_createDCtx,
    zstd_sys::ZSTD_createCCtx,
    zstd_sys::ZSTD_createDDict,
    zstd_sys::ZSTD_createCDict,
    zstd_sys::ZSTD_decompress_usingDDict,
    zstd_sys::ZSTD_compress_usingCDict,
    zstd_sys::ZSTD_freeDCtx,
    zstd_sys::ZSTD_freeCCtx,
    zstd_sys::ZSTD_freeDDict,
    zstd_sys::ZSTD_freeCDict,
    zstd_sys::ZSTD_getFrameContentSize,
    zstd_sys::ZSTD_isError,
    zstd_sys::ZSTD_getErrorName,
    zstd_sys::ZSTD_decompress,
    zstd_sys::ZSTD_compress,
    zstd_sys::ZSTD_compressBound,
);

/// Default name of the shared library preloaded at attach.
pub const LIBRARY: &str = "libzstd.so";

/// Version of the zstd that was linked in, e.g. `"1.5.6"`.
#[inline]
#[must_use]
pub fn linked_version() -> &'static str {
    zstd_safe::version_string()
}
