pub mod errors;
pub mod operations;
pub mod stub_oauth1_operations;

pub use errors::OAuth1Error;
pub use operations::OAuth1Operations;
pub use stub_oauth1_operations::StubOAuth1Operations;
