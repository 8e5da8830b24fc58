macro_rules! bitpos {
    ($idx:expr) => {{
        let idx = $idx;
        (idx >> 6, idx & 63)
    }};
}

/// Maps a 1-based id to its bit index, or `None` when it falls outside
/// `[1, capacity]`.
macro_rules! id_bit {
    ($id:expr, $capacity:expr) => {{
        let id: usize = $id;
        if id == 0 || id > $capacity {
            None
        } else {
            Some(id - 1)
        }
    }};
}

pub(crate) use bitpos;
pub(crate) use id_bit;
