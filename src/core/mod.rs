pub mod errors;
pub mod record;

pub use errors::{Error, Result};
pub use record::{
    item_type_label, FieldSlot, FieldTag, InventoryRecord, DEFAULT_ITEM_TYPE, UNCOLORED,
    UNKNOWN_ITEM,
};
