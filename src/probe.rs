use crate::control::ControlBytes;
use crate::control::EMPTY;
use crate::control::fingerprint;
use crate::group;
use crate::group::BitMaskIter;
use crate::group::GROUP_WIDTH;

/// Outcome of a lookup.
///
/// `group` is the start of the window the probe stopped in. It is only
/// meaningful until the table is next mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Probe {
    /// A slot holding an equal entry.
    Found { slot: usize, group: usize },
    /// The lowest empty lane of the first group that had one.
    Vacant { slot: usize, group: usize },
}

// The probe sequence: whole groups, starting at the hash-selected group and
// wrapping around the end of the table.
struct ProbeSeq {
    pos: usize,
    capacity: usize,
    remaining: usize,
}

impl ProbeSeq {
    #[inline(always)]
    fn start(control: &ControlBytes, hash: u64) -> Self {
        ProbeSeq {
            pos: control.home_group(hash),
            capacity: control.len(),
            remaining: control.num_groups(),
        }
    }

    #[inline(always)]
    fn advance(&mut self) {
        self.remaining -= 1;
        if self.remaining == 0 {
            probe_exhausted(self.capacity);
        }

        self.pos += GROUP_WIDTH;
        if self.pos >= self.capacity {
            self.pos = 0;
        }
    }
}

// The growth policy keeps at least one empty lane in every table, so a probe
// that sees every group without stopping means the control bytes are corrupt.
#[cold]
#[inline(never)]
fn probe_exhausted(capacity: usize) -> ! {
    panic!("probe visited all {capacity} slots without finding an empty lane")
}

/// Searches for an entry with `hash`.
///
/// `is_match` is called with the index of every slot whose fingerprint
/// matches, lowest lane first, and decides full equality. Tombstones neither
/// match nor stop the search.
#[inline]
pub(crate) fn find(
    control: &ControlBytes,
    hash: u64,
    mut is_match: impl FnMut(usize) -> bool,
) -> Probe {
    let tag = fingerprint(hash);
    let capacity = control.len();
    let mut seq = ProbeSeq::start(control, hash);

    loop {
        let start = seq.pos;
        let window = control.group_at(start);

        for lane in BitMaskIter::new(group::match_byte(tag, &window)) {
            let slot = (start + lane) % capacity;
            if is_match(slot) {
                return Probe::Found { slot, group: start };
            }
        }

        let empties = group::match_byte(EMPTY, &window);
        if empties != 0 {
            let (lane, _) = group::next_match(empties);
            return Probe::Vacant {
                slot: (start + lane) % capacity,
                group: start,
            };
        }

        seq.advance();
    }
}

/// Finds the slot a new entry with `hash` would be written to, skipping the
/// equality search.
///
/// Only valid when the entry is known to be absent, as during a rebuild.
#[inline]
pub(crate) fn find_insert_slot(control: &ControlBytes, hash: u64) -> usize {
    let capacity = control.len();
    let mut seq = ProbeSeq::start(control, hash);

    loop {
        let window = control.group_at(seq.pos);
        let empties = group::match_byte(EMPTY, &window);
        if empties != 0 {
            return (seq.pos + group::trailing_zeros(empties)) % capacity;
        }

        seq.advance();
    }
}
