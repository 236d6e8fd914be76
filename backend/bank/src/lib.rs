//! # Bank
//!
//! Everything the dashboard keeps on disk and the arithmetic around it.
//!
//! - [`records`]: dish and bill rows with their exact CSV/JSON column names
//! - [`store`]: read-all, append and update-first over one CSV file per collection
//! - [`payloads`]: creation request bodies shared by the server and the client
//! - [`footprint`]: ingredient catalog plus dish/bill totals
pub mod error;
pub mod footprint;
pub mod payloads;
pub mod records;
pub mod store;

pub use error::{DraftError, StoreError};
pub use footprint::{BillDraft, Catalog, DishDraft, Ingredient};
pub use payloads::{BillPayload, DishPayload};
pub use records::{Bill, Dish, Record};
pub use store::RecordStore;
