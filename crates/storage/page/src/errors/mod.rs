pub(crate) mod delete_error;
pub(crate) mod header_error;
pub(crate) mod insert_error;
pub(crate) mod page_op_error;
pub(crate) mod read_row_error;
pub(crate) mod slot_error;

pub mod page_error;
