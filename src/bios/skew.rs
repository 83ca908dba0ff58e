//! ## Sector Skewing Module
//!
//! This contains the sector skew tables and the permutation algebra used to
//! chain them.  Every table maps a logical sector position to a physical
//! position within a 16-sector track; the operating systems of the era each
//! used a different interleave for performance reasons, so bridging two
//! conventions is a matter of composing one table with another's inverse.

/// Enumerates skew table errors.  A bad table is a programming defect,
/// not bad user input, so these surface immediately.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("table element(s) out of range")]
    OutOfRange,
    #[error("table elements not unique")]
    NotUnique,
    #[error("tables not same length")]
    LengthMismatch
}

/// Translate DOS 3.3 logical sector to physical sector, 2:1 interleave in descending order
pub const DOS_LSEC_TO_PSEC: [usize;16] = [0,13,11,9,7,5,3,1,14,12,10,8,6,4,2,15];
/// Translate ProDOS logical sector to physical sector, 2:1 interleave in ascending order
pub const PRODOS_LSEC_TO_PSEC: [usize;16] = [0,2,4,6,8,10,12,14,1,3,5,7,9,11,13,15];
/// Translate CP/M logical sector to physical sector, 3:1 interleave in ascending order
pub const CPM_LSEC_TO_PSEC: [usize;16] = [0,3,6,9,12,15,2,5,8,11,14,1,4,7,10,13];

/// Produce the inverse permutation.  Fails if any element falls outside
/// `[0,len)` or two elements map to the same slot.
pub fn invert_table(table: &[usize]) -> Result<Vec<usize>,Error> {
    let mut inverse: Vec<Option<usize>> = vec![None;table.len()];
    for i in 0..table.len() {
        if table[i] >= table.len() {
            return Err(Error::OutOfRange);
        }
        if inverse[table[i]].is_some() {
            return Err(Error::NotUnique);
        }
        inverse[table[i]] = Some(i);
    }
    Ok(inverse.into_iter().map(|x| x.expect("unreachable")).collect())
}

/// Chain two permutations, `ans[i] = table2[table1[i]]`.
/// Fails if the tables differ in length.
pub fn compose_tables(table1: &[usize],table2: &[usize]) -> Result<Vec<usize>,Error> {
    if table1.len() != table2.len() {
        return Err(Error::LengthMismatch);
    }
    Ok(table1.iter().map(|i| table2[*i]).collect())
}

/// Take ProDOS logical sector to DOS logical sector.  Apex numbers its blocks
/// in the ProDOS convention while DSK images store sectors in DOS order, so
/// the offset mapper needs ProDOS composed with the inverse of DOS.
pub fn prodos_to_dos() -> Result<Vec<usize>,Error> {
    let psec_to_dos = invert_table(&DOS_LSEC_TO_PSEC)?;
    compose_tables(&PRODOS_LSEC_TO_PSEC,&psec_to_dos)
}
