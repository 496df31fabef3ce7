#![cfg_attr(test, recursion_limit = "256")]

pub mod basket;
pub mod catalog;
pub mod config;
pub mod date;
pub mod division;
pub mod error;
pub mod image;
pub mod order;
pub mod pim;
pub mod price;
pub mod promotion;
pub mod record;
pub mod shipping;
pub mod user;

pub use basket::{Basket, BasketItem};
pub use config::{build_sdk_config, load_sdk_config, ApiCredentials, SdkConfig};
pub use date::denormalize_last_status_change;
pub use division::{build_division_tree, DisabledBy, Division, DivisionCompany};
pub use error::{ConfigError, DomainError, NormalizeError};
pub use image::Image;
pub use order::OrderStatus;
pub use pim::PimProductDeclination;
pub use price::Price;
pub use promotion::{CatalogPromotion, CatalogRule};
pub use record::{normalize, normalize_list, normalize_strings, FromRecord, Record};
pub use shipping::{Shipping, ShippingRate, ShippingStatus, UpdateShippingCommand};
pub use user::{UpdateUserCommand, UserTitle};
