use crate::compat::uinput_setup;
use nix::{
    convert_ioctl_res, ioctl_none, ioctl_read_buf, ioctl_write_int, ioctl_write_ptr,
    request_code_read,
};

ioctl_read_buf!(eviocgname, b'E', 0x06, u8);

// EVIOCGBIT(EV_KEY, ..): the kernel copies its key-capability bitmap into an array of
// native words, least significant bit first within each word.
ioctl_read_buf!(eviocgbit_key, b'E', 0x20 + crate::EventType::KEY.0, ::libc::c_ulong);

const UINPUT_IOCTL_BASE: u8 = b'U';
ioctl_write_ptr!(ui_dev_setup, UINPUT_IOCTL_BASE, 3, uinput_setup);
ioctl_none!(ui_dev_create, UINPUT_IOCTL_BASE, 1);

ioctl_write_int!(ui_set_evbit, UINPUT_IOCTL_BASE, 100);
ioctl_write_int!(ui_set_keybit, UINPUT_IOCTL_BASE, 101);

pub unsafe fn ui_get_sysname(fd: ::libc::c_int, bytes: &mut [u8]) -> ::nix::Result<::libc::c_int> {
    convert_ioctl_res!(::nix::libc::ioctl(
        fd,
        request_code_read!(UINPUT_IOCTL_BASE, 44, bytes.len()),
        bytes.as_mut_ptr(),
    ))
}
