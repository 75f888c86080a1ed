mod endpoint;
mod fix;

pub use endpoint::Endpoint;
pub use fix::Fix;
