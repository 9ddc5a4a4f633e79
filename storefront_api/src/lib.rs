mod credentials;
mod endpoint;
mod errors;
mod params;
mod transport;
pub mod types;
pub use self::credentials::{MemoryTokenStore, TokenStore};
pub use self::endpoint::{Endpoint, Method};
pub use self::errors::Error;
pub use self::params::ListParams;
pub use self::transport::{base_url_from_env, Transport, BASE_URL_ENV, DEFAULT_BASE_URL};
