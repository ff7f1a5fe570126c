use easydict_preload::{address_of, check, retained, zstd};
use zstd_safe::zstd_sys;

/// The zstd functions the dictionary reader calls.
const DECLARED: [&str; 16] = [
    "ZSTD_createDCtx",
    "ZSTD_createCCtx",
    "ZSTD_createDDict",
    "ZSTD_createCDict",
    "ZSTD_decompress_usingDDict",
    "ZSTD_compress_usingCDict",
    "ZSTD_freeDCtx",
    "ZSTD_freeCCtx",
    "ZSTD_freeDDict",
    "ZSTD_freeCDict",
    "ZSTD_getFrameContentSize",
    "ZSTD_isError",
    "ZSTD_getErrorName",
    "ZSTD_decompress",
    "ZSTD_compress",
    "ZSTD_compressBound",
];

#[test]
fn every_declared_function_is_retained() {
    let table = retained();
    assert_eq!(table.len(), DECLARED.len());

    for name in DECLARED {
        let address = address_of(name).unwrap_or_else(|| panic!("{name} not retained"));
        assert!(!address.is_null(), "{name} linked at null");
    }
}

#[test]
fn table_names_are_unique() {
    let mut names: Vec<_> = retained().iter().map(|symbol| symbol.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), DECLARED.len());
}

#[test]
fn addresses_match_the_linked_functions() {
    assert_eq!(
        address_of("ZSTD_createDCtx"),
        Some(zstd_sys::ZSTD_createDCtx as *const ())
    );
    assert_eq!(
        address_of("ZSTD_createDDict"),
        Some(zstd_sys::ZSTD_createDDict as *const ())
    );
    assert_ne!(address_of("ZSTD_createDCtx"), address_of("ZSTD_createDDict"));
}

#[test]
fn unknown_names() {
    assert_eq!(address_of("ZSTD_notAFunction"), None);
    assert_eq!(address_of(""), None);
}

#[test]
fn capability_check() {
    let report = check();
    assert_eq!(report.total, 16);
    assert!(report.all_resolved(), "null entries: {:?}", report.null);
}

#[test]
fn linked_version_is_reported() {
    assert!(zstd::linked_version().starts_with("1."));
}
