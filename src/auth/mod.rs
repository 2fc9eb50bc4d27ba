pub mod claims;
pub mod error;
pub mod extractor;
pub mod permission;

pub use claims::Claims;
pub use error::{AuthError, AuthErrorKind};
pub use extractor::{
    Authorized, DeleteDrinks, GetDrinksDetail, PatchDrinks, Permission, PostDrinks,
};
pub use permission::{bearer_token, PermissionChecker, VerificationKey};
