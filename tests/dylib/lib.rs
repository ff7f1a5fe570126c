#![cfg(all(test, unix, not(miri)))]

use core::{ffi::c_void, ptr};

use easydict_preload::internal::jni::sys::{JNI_VERSION_1_6, JavaVM, jint};

unsafe extern "system" {
    fn JNI_OnLoad(vm: *mut JavaVM, reserved: *mut c_void) -> jint;
}

#[test]
fn on_load_from_linked_cdylib() {
    // The hook must not touch the VM pointer, so calling it without a runtime
    // is fine.
    let version = unsafe { JNI_OnLoad(ptr::null_mut(), ptr::null_mut()) };
    assert_eq!(version, JNI_VERSION_1_6);
}

#[test]
fn on_load_twice() {
    let first = unsafe { JNI_OnLoad(ptr::null_mut(), ptr::null_mut()) };
    let second = unsafe { JNI_OnLoad(ptr::null_mut(), ptr::null_mut()) };
    assert_eq!(first, second);
}

#[test]
#[cfg(target_os = "linux")]
fn cdylib_is_resident() {
    // Linked at build time, so the probe finds it without loading anything.
    assert!(easydict_preload::is_loaded("libeasydict_native.so"));
}
