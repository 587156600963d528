pub fn set_panic_hook() {
    // Routes panic messages to console.error instead of an opaque
    // "unreachable" trap. Safe to call more than once.
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
