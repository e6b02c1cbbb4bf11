use std::collections::HashSet;
use std::io::{Read, Write};

use crate::csvio::{RowReader, RowWriter};
use crate::error::Result;
use crate::phone::PhoneNumber;

/// Outcome of a dedup pass. `removed + kept` equals the superset row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupStats {
    pub removed: usize,
    pub kept: usize,
}

/// Filters superset rows whose canonicalized `cell` appears in the subset's
/// `contact[cell]` column.
///
/// The subset is read fully into a set first; the superset streams through,
/// preserving row order and column schema. Both sides canonicalize so that
/// formatting differences between the two exports never defeat the match.
pub fn filter_superset<R1, R2, W>(
    superset: &mut RowReader<R1>,
    subset: &mut RowReader<R2>,
    output: &mut RowWriter<W>,
) -> Result<DedupStats>
where
    R1: Read,
    R2: Read,
    W: Write,
{
    let mut excluded: HashSet<PhoneNumber> = HashSet::new();
    for row in subset.rows() {
        let row = row?;
        excluded.insert(PhoneNumber::canonicalize(row.require("contact[cell]")?));
    }

    output.write_record(superset.headers())?;
    let mut stats = DedupStats { removed: 0, kept: 0 };
    for row in superset.rows() {
        let row = row?;
        let number = PhoneNumber::canonicalize(row.require("cell")?);
        if excluded.contains(&number) {
            stats.removed += 1;
        } else {
            output.write_record(row.values())?;
            stats.kept += 1;
        }
    }
    Ok(stats)
}
