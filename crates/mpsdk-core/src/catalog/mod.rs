pub mod attribute;
pub mod company;
pub mod declination;
pub mod option;
pub mod product;
pub mod report;
pub mod search;

pub use attribute::{Attribute, AttributeType, AttributeVariant, ProductAttributeValue};
pub use company::{CompanyDetail, CompanyListItem, CompanySummary};
pub use declination::{Declination, DeclinationId, DeclinationOption, DeclinationShipping};
pub use option::{OptionVariant, ProductOption};
pub use product::{BrandSource, Product, ProductAttribute, ProductSummary, SummaryAttribute};
pub use report::ProductReport;
pub use search::{Pagination, SearchQuery, SearchResult};
