use alloc::boxed::Box;
use alloc::vec;

use crate::group::GROUP_WIDTH;
use crate::group::Group;

/// Control byte of a slot that has never held an entry since the last
/// rebuild.
///
/// Both markers have the high bit set, so they can never collide with a
/// fingerprint, which is always below 0x80.
pub(crate) const EMPTY: u8 = 0x80;

/// Control byte of a slot whose entry was removed while its group had no
/// empty lane. Probes continue past it.
pub(crate) const TOMBSTONE: u8 = 0xFE;

/// The low 7 bits of a hash, stored in the control byte of an occupied slot.
#[inline(always)]
pub(crate) fn fingerprint(hash: u64) -> u8 {
    (hash & 0x7F) as u8
}

/// The hash bits above the fingerprint, used to pick the home group.
#[inline(always)]
pub(crate) fn group_selector(hash: u64) -> u64 {
    hash >> 7
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Status {
    Empty,
    Tombstone,
    Occupied(u8),
}

impl Status {
    #[inline]
    pub(crate) fn of(byte: u8) -> Self {
        match byte {
            EMPTY => Status::Empty,
            TOMBSTONE => Status::Tombstone,
            fp if fp & 0x80 == 0 => Status::Occupied(fp),
            _ => invalid_control_byte(byte),
        }
    }
}

#[cold]
#[inline(never)]
fn invalid_control_byte(byte: u8) -> ! {
    panic!("invalid control byte {byte:#04x}")
}

/// The per-slot status bytes of a table.
#[derive(Clone)]
pub(crate) struct ControlBytes {
    bytes: Box<[u8]>,
}

impl ControlBytes {
    /// Allocates `capacity` empty control bytes.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity >= GROUP_WIDTH && capacity % GROUP_WIDTH == 0);
        Self {
            bytes: vec![EMPTY; capacity].into_boxed_slice(),
        }
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline(always)]
    pub(crate) fn num_groups(&self) -> usize {
        self.bytes.len() / GROUP_WIDTH
    }

    #[inline(always)]
    pub(crate) fn get(&self, index: usize) -> u8 {
        self.bytes[index]
    }

    #[inline(always)]
    pub(crate) fn set(&mut self, index: usize, byte: u8) {
        self.bytes[index] = byte;
    }

    #[inline(always)]
    pub(crate) fn is_occupied(&self, index: usize) -> bool {
        self.bytes[index] & 0x80 == 0
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Marks every slot empty.
    pub(crate) fn reset(&mut self) {
        self.bytes.fill(EMPTY);
    }

    pub(crate) fn count(&self, byte: u8) -> usize {
        self.bytes.iter().filter(|&&b| b == byte).count()
    }

    /// Start index of the first group probed for `hash`.
    #[inline(always)]
    pub(crate) fn home_group(&self, hash: u64) -> usize {
        (group_selector(hash) % self.num_groups() as u64) as usize * GROUP_WIDTH
    }

    /// Reads the 16 bytes starting at `start`.
    ///
    /// Windows that run off the end continue from index 0, always reading
    /// the current bytes there.
    #[inline(always)]
    pub(crate) fn group_at(&self, start: usize) -> Group {
        debug_assert!(start < self.len());
        let mut group = [EMPTY; GROUP_WIDTH];
        let end = start + GROUP_WIDTH;
        if end <= self.len() {
            group.copy_from_slice(&self.bytes[start..end]);
        } else {
            let head = self.len() - start;
            group[..head].copy_from_slice(&self.bytes[start..]);
            group[head..].copy_from_slice(&self.bytes[..GROUP_WIDTH - head]);
        }
        group
    }
}
