//! Authentication vocabulary: sessions, change events, requests and errors.

mod credentials;
mod error;
mod events;
pub mod forms;
mod session;

pub use credentials::{
    PasswordCredentials, SignInRequest, SignUpMetadata, SignUpOptions, SignUpPayload,
    SignUpRequest,
};
pub use error::AuthError;
pub use events::AuthChangeEvent;
pub use forms::{FieldError, FormErrors, FormField, LoginForm, PasswordRequirements, SignUpForm};
pub use session::{AuthSession, AuthUser};
