use easydict_preload::{LoadFlags, PreloadError, is_loaded, preload};

const MISSING: &str = "libeasydict-test-missing.so";

#[test]
fn default_flags() {
    assert_eq!(LoadFlags::default(), LoadFlags::NOW_GLOBAL);
    assert_eq!(
        LoadFlags::default().bits(),
        libc::RTLD_NOW | libc::RTLD_GLOBAL
    );
    let lazy_local = LoadFlags {
        now: false,
        global: false,
    };
    assert_eq!(lazy_local.bits(), libc::RTLD_LAZY | libc::RTLD_LOCAL);
}

#[test]
fn missing_library() {
    let err = preload(MISSING, LoadFlags::default()).unwrap_err();
    match &err {
        PreloadError::Loader { library, reason } => {
            assert_eq!(library, MISSING);
            assert!(!reason.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("failed to load libeasydict-test-missing.so: "));
}

#[test]
fn nul_in_name() {
    let err = preload("libz\0std.so", LoadFlags::default()).unwrap_err();
    assert!(matches!(err, PreloadError::InvalidName { .. }));
    assert!(!err.reason().is_empty());
    assert!(!is_loaded("libz\0std.so"));
}

#[test]
fn probe_does_not_load() {
    assert!(!is_loaded(MISSING));
    assert!(preload(MISSING, LoadFlags::default()).is_err());
    assert!(!is_loaded(MISSING));
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
mod glibc {
    use super::*;

    const PRESENT: &str = "libc.so.6";

    #[test]
    fn present_library() {
        assert!(is_loaded(PRESENT));
        let handle = preload(PRESENT, LoadFlags::default()).unwrap();
        assert_eq!(handle.name(), PRESENT);
        assert!(handle.resolve("malloc").is_some());
        assert!(handle.resolve("ZSTD_notAFunction").is_none());
        assert!(handle.resolve("mal\0loc").is_none());
    }

    #[test]
    fn lazy_local() {
        let flags = LoadFlags {
            now: false,
            global: false,
        };
        assert!(preload(PRESENT, flags).is_ok());
    }
}
