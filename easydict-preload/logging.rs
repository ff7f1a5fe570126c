use log::LevelFilter;

/// Install the platform logger.
///
/// On Android this routes the `log` macros to logcat under `tag`. Calling it
/// more than once is harmless; only the first call configures the logger.
///
/// Elsewhere this does nothing, and whoever embeds the library owns the
/// global `log` backend.
#[allow(unused_variables)]
pub fn init(tag: &'static str, max_level: LevelFilter) {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(max_level)
            .with_tag(tag),
    );
}
