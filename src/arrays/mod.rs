mod block_id;
mod jxs;
mod nxs;

pub use block_id::BlockId;
pub use jxs::{JxsArray, JXS_LEN, fortran_to_index};
pub use nxs::{NxsArray, NxsId, NXS_LEN};
