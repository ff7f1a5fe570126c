//! The native library the EasyDict app loads with
//! `System.loadLibrary("easydict_native")`.
//!
//! Linking `easydict-preload` pulls in zstd and its retained-symbol table, so
//! every zstd function the dictionary reader uses is linked into this library.
//! The attach hook then preloads `libzstd.so` into the global namespace, for
//! readers that resolve zstd from the shared library by name.

easydict_preload::attach_hook!();
