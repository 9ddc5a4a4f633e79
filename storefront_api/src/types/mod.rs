mod envelope;
pub use self::envelope::{Envelope, PageMeta};

mod product;
pub use self::product::{DeleteReceipt, DeleteRequest, NewProduct, Product, ProductUpdate};

mod user;
pub use self::user::User;
