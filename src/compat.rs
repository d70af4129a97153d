//! Compatibility layer for non-Linux builds.

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(any(
        target_os = "linux",
        target_os = "l4re",
        target_os = "android",
        target_os = "emscripten"
    ))] {
        pub(crate) use libc::{
            input_event, input_id, uinput_setup, KEY_CNT, UINPUT_MAX_NAME_SIZE,
        };
    } else {
        mod non_linux;
        pub(crate) use non_linux::{
            input_event, input_id, uinput_setup, KEY_CNT, UINPUT_MAX_NAME_SIZE,
        };
    }
}
