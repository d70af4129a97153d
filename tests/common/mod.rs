#![allow(dead_code)]

use std::fs::File;
use std::io::Read;
use std::mem;
use std::path::Path;

// Raw kernel identifiers, so the decode side stays independent of the crate's newtypes.
pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const SYN_REPORT: u16 = 0;

/// Reinterprets a byte stream as the `input_event` records it holds.
pub fn decode_events(bytes: &[u8]) -> Vec<libc::input_event> {
    let record = mem::size_of::<libc::input_event>();
    assert_eq!(bytes.len() % record, 0, "partial event record in stream");

    bytes
        .chunks_exact(record)
        .map(|chunk| unsafe {
            std::ptr::read_unaligned(chunk.as_ptr() as *const libc::input_event)
        })
        .collect()
}

/// Reads a file of raw `input_event` records, oldest first.
pub fn read_events(path: &Path) -> Vec<libc::input_event> {
    let mut bytes = Vec::new();
    File::open(path)
        .expect("open event stream")
        .read_to_end(&mut bytes)
        .expect("read event stream");
    decode_events(&bytes)
}

/// The (type, code, value) triple of each record, for comparisons that should ignore
/// timestamps.
pub fn shapes(events: &[libc::input_event]) -> Vec<(u16, u16, i32)> {
    events.iter().map(|ev| (ev.type_, ev.code, ev.value)).collect()
}

pub fn assert_key(ev: &libc::input_event, code: u16, value: i32) {
    assert_eq!(ev.type_, EV_KEY, "expected an EV_KEY record: {ev:?}");
    assert_eq!(ev.code, code);
    assert_eq!(ev.value, value);
}

pub fn assert_syn(ev: &libc::input_event) {
    assert_eq!(ev.type_, EV_SYN, "expected an EV_SYN record: {ev:?}");
    assert_eq!(ev.code, SYN_REPORT);
}
