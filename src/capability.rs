//! Key capability bitmaps, as reported by `EVIOCGBIT(EV_KEY, ..)`.

use std::fmt;
use std::fs::File;
use std::io;
use std::mem;
use std::os::unix::io::AsRawFd;

use crate::compat::KEY_CNT;
use crate::event::KeyCode;
use crate::{nix_err, sys};

type Word = libc::c_ulong;

const WORD_BITS: usize = mem::size_of::<Word>() * 8;

const fn words_for(bits: usize) -> usize {
    bits / WORD_BITS + (bits % WORD_BITS != 0) as usize
}

const KEY_WORDS: usize = words_for(KEY_CNT);

/// The set of key codes a device claims to support, stored exactly as the kernel hands it
/// out: one bit per code, packed least-significant-first into native unsigned words.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyBitmap {
    words: [Word; KEY_WORDS],
}

impl KeyBitmap {
    pub fn new() -> Self {
        Self {
            words: [0; KEY_WORDS],
        }
    }

    /// Queries an event device for the keys it reports supporting.
    pub fn from_device(file: &File) -> io::Result<Self> {
        let mut set = Self::new();
        unsafe { sys::eviocgbit_key(file.as_raw_fd(), &mut set.words) }.map_err(nix_err)?;
        Ok(set)
    }

    /// Returns whether `key` is marked as supported. Codes past the end of the bitmap can
    /// never be set, so out-of-range queries return false rather than reading past it.
    pub fn contains(&self, key: KeyCode) -> bool {
        let code = key.code() as usize;
        match self.words.get(code / WORD_BITS) {
            Some(word) => (word >> (code % WORD_BITS)) & 1 != 0,
            None => false,
        }
    }

    /// Marks `key` as supported.
    ///
    /// # Panics
    ///
    /// Panics if the code is larger than the kernel's `KEY_MAX`.
    pub fn insert(&mut self, key: KeyCode) {
        let code = key.code() as usize;
        self.words[code / WORD_BITS] |= 1 << (code % WORD_BITS);
    }

    pub fn iter(&self) -> impl Iterator<Item = KeyCode> + '_ {
        (0..KEY_CNT as u16)
            .map(KeyCode::new)
            .filter(|&key| self.contains(key))
    }
}

impl Default for KeyBitmap {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<KeyCode> for KeyBitmap {
    fn from_iter<I: IntoIterator<Item = KeyCode>>(iter: I) -> Self {
        let mut set = Self::new();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

impl fmt::Debug for KeyBitmap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|key| key.code())).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_covers_every_code() {
        assert_eq!(words_for(1), 1);
        assert_eq!(words_for(WORD_BITS), 1);
        assert_eq!(words_for(WORD_BITS + 1), 2);
        assert!(KEY_WORDS * WORD_BITS >= KEY_CNT);
    }

    #[test]
    fn insert_and_query_across_word_boundaries() {
        let mut set = KeyBitmap::new();
        for code in [0, WORD_BITS - 1, WORD_BITS, KEY_CNT - 1] {
            set.insert(KeyCode::new(code as u16));
        }

        assert!(set.contains(KeyCode::new(0)));
        assert!(set.contains(KeyCode::new((WORD_BITS - 1) as u16)));
        assert!(set.contains(KeyCode::new(WORD_BITS as u16)));
        assert!(set.contains(KeyCode::new((KEY_CNT - 1) as u16)));

        assert!(!set.contains(KeyCode::new(1)));
        assert!(!set.contains(KeyCode::new((WORD_BITS + 1) as u16)));
    }

    #[test]
    fn out_of_range_codes_are_never_contained() {
        let set: KeyBitmap = [KeyCode::new(125)].into_iter().collect();
        assert!(!set.contains(KeyCode::new(KEY_CNT as u16)));
        assert!(!set.contains(KeyCode::new(u16::MAX)));
    }

    #[test]
    fn iter_yields_inserted_codes_in_order() {
        let set: KeyBitmap = [125, 1, 767]
            .into_iter()
            .map(KeyCode::new)
            .collect();
        let codes: Vec<u16> = set.iter().map(KeyCode::code).collect();
        assert_eq!(codes, [1, 125, 767]);
    }
}
