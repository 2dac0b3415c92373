// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AddressInput, AddressCandidate, FieldWeights, FieldScores, MatchResult};
pub use requests::MatchAddressRequest;
pub use responses::{MatchAddressResponse, HealthResponse, ErrorResponse};
