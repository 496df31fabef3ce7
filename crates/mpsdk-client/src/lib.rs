pub mod api;
pub mod error;
pub mod http;
pub mod services;

pub use api::ApiClient;
pub use error::ClientError;
pub use http::{HttpClient, Method, RequestOptions};
pub use services::{
    BasketService, CatalogService, DivisionService, OrderService, ProductService,
    PromotionService, UserService,
};
