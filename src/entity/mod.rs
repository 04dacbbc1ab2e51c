pub mod order_items;
pub mod orders;
pub mod products;
pub mod tables;
pub mod users;

pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
pub use tables::Entity as Tables;
pub use users::Entity as Users;
