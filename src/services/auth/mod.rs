pub mod accounts;
pub mod credential;
pub mod factory;
pub mod issuer;
pub mod token_service;

pub use credential::{Credential, CredentialError, IssuedCredential, TokenKind};
pub use factory::{build_issuer, build_token_service};
pub use issuer::{CredentialIssuer, IssuerSettings};
pub use token_service::{IssuedTokenPair, TokenService};
